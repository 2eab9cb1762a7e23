//! Fixture errors
//!
//! Frame parameters outside the MPEG-1 Layer III tables, and fixture files
//! that cannot be loaded.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum FixtureError {
    /// Bitrate has no MPEG-1 Layer III index
    UnsupportedBitrate(u32),
    /// Sample rate has no MPEG-1 index
    UnsupportedSampleRate(u32),
    /// Fixture file could not be read
    Unreadable { path: PathBuf, source: io::Error },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::UnsupportedBitrate(kbps) => {
                write!(f, "no MPEG-1 Layer III bitrate index for {} kbps", kbps)
            }
            FixtureError::UnsupportedSampleRate(hz) => {
                write!(f, "no MPEG-1 sample rate index for {} Hz", hz)
            }
            FixtureError::Unreadable { path, source } => {
                write!(f, "cannot read fixture {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixtureError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type FixtureResult<T> = std::result::Result<T, FixtureError>;
