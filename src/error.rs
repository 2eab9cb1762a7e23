//! Error types for the frame counter
//!
//! This module defines the error taxonomy used throughout the crate:
//! per-candidate header rejections consumed by the scanner, upload
//! boundary errors mapped to HTTP status codes, and configuration errors.

use thiserror::Error;

/// Reasons a sync candidate is rejected as a frame header
///
/// The scanner never surfaces these to callers; each one triggers a
/// one-byte resync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Fewer than four bytes remain at the candidate offset
    #[error("Truncated header at offset {offset}: {available} bytes available")]
    Truncated { offset: usize, available: usize },

    /// Top 11 bits are not all set
    #[error("Invalid sync word: 0x{0:03X}")]
    BadSyncWord(u16),

    /// Version bits other than 0b11 (MPEG-1)
    #[error("Unsupported MPEG version bits: {0:02b}")]
    UnsupportedVersion(u8),

    /// Layer bits other than 0b01 (Layer III)
    #[error("Unsupported layer bits: {0:02b}")]
    UnsupportedLayer(u8),

    /// Bitrate index 0 (free format) or 15 (bad)
    #[error("Reserved bitrate index: {0}")]
    ReservedBitrate(u8),

    /// Sample rate index 3
    #[error("Reserved sample rate index: {0}")]
    ReservedSampleRate(u8),

    /// Computed frame size outside the accepted range
    #[error("Frame size {0} bytes outside accepted range")]
    FrameSizeOutOfRange(usize),
}

/// Errors produced by the upload boundary
///
/// Every variant maps to a fixed HTTP status code and a caller-facing
/// message. Internal details are logged, never carried in the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No file field in the request
    #[error("No file uploaded")]
    NoFile,

    /// File arrived in a form field other than the configured one
    #[error("Unexpected field")]
    UnexpectedField { field: String },

    /// MIME type and file name both fail the MP3 check
    #[error("Only MP3 files are allowed")]
    UnsupportedType { mime_type: String },

    /// File exceeds the configured size limit
    #[error("File exceeds maximum size of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// The scanner found no frames
    #[error("No valid MP3 frames found")]
    NoFrames,

    /// Unexpected failure while processing the file
    #[error("Error processing MP3 file")]
    Internal,
}

impl UploadError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            UploadError::NoFile
            | UploadError::UnexpectedField { .. }
            | UploadError::UnsupportedType { .. }
            | UploadError::TooLarge { .. }
            | UploadError::NoFrames => 400,
            UploadError::Internal => 500,
        }
    }

    /// Whether the caller can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Upload configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Form field name is empty
    #[error("Upload field name must not be empty")]
    EmptyFieldName,

    /// Accepted MIME type is empty or lacks a subtype
    #[error("Invalid MIME type: {0:?}")]
    InvalidMimeType(String),

    /// Accepted extension does not look like ".ext"
    #[error("Invalid file extension: {0:?}")]
    InvalidExtension(String),

    /// Size limit of zero would reject every upload
    #[error("Maximum file size must be greater than zero")]
    ZeroMaxFileSize,
}

/// Specialized result types for different modules
pub type HeaderResult<T> = std::result::Result<T, HeaderError>;
pub type UploadResult<T> = std::result::Result<T, UploadError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_status_codes() {
        assert_eq!(UploadError::NoFile.status_code(), 400);
        assert_eq!(
            UploadError::UnexpectedField {
                field: "audio".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            UploadError::UnsupportedType {
                mime_type: "text/plain".into()
            }
            .status_code(),
            400
        );
        assert_eq!(UploadError::TooLarge { size: 10, limit: 5 }.status_code(), 400);
        assert_eq!(UploadError::NoFrames.status_code(), 400);
        assert_eq!(UploadError::Internal.status_code(), 500);
        assert!(!UploadError::Internal.is_client_error());
    }

    #[test]
    fn test_upload_error_messages_hide_details() {
        let err = UploadError::UnsupportedType {
            mime_type: "application/x-secret".into(),
        };
        assert_eq!(err.to_string(), "Only MP3 files are allowed");
        assert_eq!(UploadError::Internal.to_string(), "Error processing MP3 file");
    }

    #[test]
    fn test_header_error_display() {
        assert_eq!(
            HeaderError::BadSyncWord(0x3FF).to_string(),
            "Invalid sync word: 0x3FF"
        );
        assert_eq!(
            HeaderError::UnsupportedLayer(0b11).to_string(),
            "Unsupported layer bits: 11"
        );
    }
}
