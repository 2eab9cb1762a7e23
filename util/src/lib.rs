//! Test data helpers for the frame counter
//!
//! This crate builds synthetic MP3 byte streams (ID3v2 tags, frame headers,
//! padding and junk) and loads fixture files for tests and benchmarks.

pub mod error;
pub mod fixtures;

// Re-export commonly used functions and types
pub use error::*;
pub use fixtures::*;
