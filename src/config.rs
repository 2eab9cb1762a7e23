//! Configuration for the upload boundary
//!
//! The scanner itself takes no configuration. This module holds the
//! parameters the upload handler checks before a file reaches it.

use crate::error::{ConfigError, ConfigResult};

/// Upload handler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Multipart form field carrying the file
    pub field_name: String,
    /// MIME type accepted without looking at the file name
    pub accepted_mime_type: String,
    /// File name suffix accepted regardless of MIME type
    pub accepted_extension: String,
    /// Largest accepted upload in bytes, unlimited if `None`
    pub max_file_size: Option<usize>,
}

impl UploadConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            field_name: "file".to_string(),
            accepted_mime_type: "audio/mpeg".to_string(),
            accepted_extension: ".mp3".to_string(),
            max_file_size: None,
        }
    }

    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.accepted_mime_type = mime_type.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.accepted_extension = extension.into();
        self
    }

    pub fn with_max_file_size(mut self, limit: usize) -> Self {
        self.max_file_size = Some(limit);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.field_name.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName);
        }

        match self.accepted_mime_type.split_once('/') {
            Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() => {}
            _ => return Err(ConfigError::InvalidMimeType(self.accepted_mime_type.clone())),
        }

        if self.accepted_extension.len() < 2 || !self.accepted_extension.starts_with('.') {
            return Err(ConfigError::InvalidExtension(self.accepted_extension.clone()));
        }

        if self.max_file_size == Some(0) {
            return Err(ConfigError::ZeroMaxFileSize);
        }

        Ok(())
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new()
    }
}
