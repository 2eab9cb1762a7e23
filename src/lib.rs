//! # MP3 Frame Counter
//!
//! Counts MPEG-1 Layer III frames in a byte buffer. A leading ID3v2 tag is
//! skipped by its declared size, then the buffer is searched for frame
//! sync patterns; each valid header advances the scan by its frame size.
//!
//! ```
//! let mut frame = vec![0xFF, 0xFB, 0x90, 0x00];
//! frame.resize(417, 0);
//! assert_eq!(mp3_frame_counter::count_frames(&frame), 1);
//! ```
//!
//! The [`upload`] module wraps the scanner with the checks and status
//! mapping of an upload endpoint, independent of any HTTP framework.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod header;
pub mod scanner;
pub mod tables;
pub mod tag;
pub mod upload;

pub use config::UploadConfig;
pub use diagnostics::{FnObserver, LogObserver, NullObserver, ScanEvent, ScanObserver};
pub use error::{ConfigError, HeaderError, UploadError};
pub use header::{FrameHeader, ValidFrame};
pub use scanner::{count_frames, FrameScanner, ScanSummary};
pub use upload::{FrameCountResponse, HttpReply, UploadHandler, UploadedFile};
