//! Upload boundary
//!
//! Transport-independent half of the upload endpoint. An HTTP adapter
//! extracts the multipart file into an [`UploadedFile`], passes it to
//! [`UploadHandler::handle`], and sends the [`HttpReply`] built from the
//! result. Input checks happen here, before the scanner sees any bytes.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::UploadConfig;
use crate::diagnostics::{NullObserver, ScanObserver};
use crate::error::{UploadError, UploadResult};
use crate::scanner::{FrameScanner, ScanSummary};

/// A file received from a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Form field the file arrived in
    pub field_name: String,
    /// File name as sent by the client
    pub original_name: String,
    /// Content type as sent by the client
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create a file in the default "file" field
    pub fn new(
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            field_name: "file".to_string(),
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Build an upload from a file on disk, inferring the MIME type from
    /// its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let original_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = guess_mime_type(&original_name);
        Ok(Self::new(original_name, mime_type, bytes))
    }

    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// MIME type for a file name, by extension
pub fn guess_mime_type(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("txt") => "text/plain",
        Some("wav") => "audio/wav",
        _ => "application/octet-stream",
    }
}

/// Successful response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameCountResponse {
    pub frame_count: usize,
}

/// Status code and JSON body ready to be sent by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

impl HttpReply {
    /// Status returned for a successful upload
    pub const CREATED: u16 = 201;

    pub fn from_result(result: UploadResult<FrameCountResponse>) -> Self {
        match result {
            Ok(response) => Self {
                status: Self::CREATED,
                body: json!(response),
            },
            Err(err) => {
                let status = err.status_code();
                Self {
                    status,
                    body: json!({
                        "statusCode": status,
                        "message": err.to_string(),
                        "error": reason_phrase(status),
                    }),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        500 => "Internal Server Error",
        _ => "Error",
    }
}

/// Validates uploads and counts their frames
///
/// Owns a single scanner, constructed by the caller.
#[derive(Debug, Clone)]
pub struct UploadHandler<O = NullObserver> {
    config: UploadConfig,
    scanner: FrameScanner<O>,
}

impl UploadHandler {
    /// Handler with default configuration and a silent scanner
    pub fn new() -> Self {
        Self::with_scanner(UploadConfig::default(), FrameScanner::new())
    }
}

impl Default for UploadHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ScanObserver> UploadHandler<O> {
    pub fn with_scanner(config: UploadConfig, scanner: FrameScanner<O>) -> Self {
        Self { config, scanner }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Check an upload and count its frames
    pub fn handle(&self, file: Option<&UploadedFile>) -> UploadResult<FrameCountResponse> {
        self.scan_upload(file).map(|summary| FrameCountResponse {
            frame_count: summary.frame_count,
        })
    }

    /// Check an upload and return the full scan totals
    ///
    /// Applies the same checks as [`UploadHandler::handle`]; a scan with no
    /// frames is still an error.
    pub fn scan_upload(&self, file: Option<&UploadedFile>) -> UploadResult<ScanSummary> {
        let file = match file {
            Some(file) if file.field_name == self.config.field_name => file,
            Some(file) => {
                log::warn!("Unexpected upload field: {}", file.field_name);
                return Err(UploadError::UnexpectedField {
                    field: file.field_name.clone(),
                });
            }
            None => {
                log::warn!("No file uploaded");
                return Err(UploadError::NoFile);
            }
        };

        if !self.is_accepted_type(file) {
            log::warn!("Invalid file type: {}", file.mime_type);
            return Err(UploadError::UnsupportedType {
                mime_type: file.mime_type.clone(),
            });
        }

        if let Some(limit) = self.config.max_file_size {
            if file.size() > limit {
                log::warn!("File too large: {} bytes (limit {})", file.size(), limit);
                return Err(UploadError::TooLarge {
                    size: file.size(),
                    limit,
                });
            }
        }

        let summary = panic::catch_unwind(AssertUnwindSafe(|| self.scanner.scan(&file.bytes)))
            .map_err(|payload| {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                log::error!("Error processing file {}: {}", file.original_name, detail);
                UploadError::Internal
            })?;

        if summary.frame_count == 0 {
            log::warn!("No valid MP3 frames found in {}", file.original_name);
            return Err(UploadError::NoFrames);
        }

        log::info!("{}: {} frames", file.original_name, summary.frame_count);
        Ok(summary)
    }

    /// Handle an upload and build the reply in one step
    pub fn reply(&self, file: Option<&UploadedFile>) -> HttpReply {
        HttpReply::from_result(self.handle(file))
    }

    fn is_accepted_type(&self, file: &UploadedFile) -> bool {
        file.mime_type == self.config.accepted_mime_type
            || file.original_name.ends_with(&self.config.accepted_extension)
    }
}
