//! Scan diagnostics
//!
//! The scanner reports what it does through an injected [`ScanObserver`]
//! instead of a global logger. Results never depend on the observer.
//!
//! With the "diagnostics" feature enabled, [`TraceObserver`] records every
//! event with a timestamp and can dump the trace as JSON.

use crate::error::HeaderError;
use crate::header::ValidFrame;
use crate::scanner::ScanSummary;

/// Something the scanner observed at a buffer position
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// A leading ID3v2 tag was skipped
    TagSkipped { tag_size: usize, audio_offset: usize },
    /// A header was accepted and the cursor jumped past its frame
    FrameAccepted { offset: usize, frame: ValidFrame },
    /// A sync candidate failed header validation
    CandidateRejected { offset: usize, reason: HeaderError },
    /// Scanning reached the end of the buffer
    Finished(ScanSummary),
}

/// Receiver for scan events
pub trait ScanObserver {
    fn on_event(&self, event: &ScanEvent);
}

/// Observer that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ScanObserver for NullObserver {
    #[inline]
    fn on_event(&self, _event: &ScanEvent) {}
}

/// Adapter turning a closure into an observer
#[derive(Clone, Copy)]
pub struct FnObserver<F>(pub F);

impl<F> ScanObserver for FnObserver<F>
where
    F: Fn(&ScanEvent),
{
    fn on_event(&self, event: &ScanEvent) {
        (self.0)(event)
    }
}

impl<T: ScanObserver + ?Sized> ScanObserver for &T {
    fn on_event(&self, event: &ScanEvent) {
        (**self).on_event(event)
    }
}

/// Observer that forwards events to the `log` facade
///
/// Per-frame acceptance is logged at trace level since a typical file
/// holds thousands of frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ScanObserver for LogObserver {
    fn on_event(&self, event: &ScanEvent) {
        match event {
            ScanEvent::TagSkipped { tag_size, .. } => {
                log::debug!("Skipping ID3v2 tag of size {} bytes", tag_size);
            }
            ScanEvent::FrameAccepted { offset, frame } => {
                log::trace!(
                    "Frame at offset {}: {} kbps, {} Hz, {} bytes",
                    offset,
                    frame.bitrate_kbps,
                    frame.sample_rate,
                    frame.frame_size
                );
            }
            ScanEvent::CandidateRejected { offset, reason } => {
                log::debug!("Rejected frame candidate at offset {}: {}", offset, reason);
            }
            ScanEvent::Finished(summary) => {
                log::info!("Found {} frames in MP3 file", summary.frame_count);
            }
        }
    }
}

#[cfg(feature = "diagnostics")]
pub use trace::{TraceEntry, TraceObserver};

#[cfg(feature = "diagnostics")]
mod trace {
    use super::{ScanEvent, ScanObserver};
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use std::fs::File;
    use std::io::{self, Write};
    use std::path::Path;
    use std::sync::Mutex;

    /// One recorded scan event
    #[derive(Debug, Clone, Serialize)]
    pub struct TraceEntry {
        pub timestamp: DateTime<Utc>,
        pub kind: &'static str,
        pub offset: Option<usize>,
        pub detail: String,
    }

    impl TraceEntry {
        fn from_event(event: &ScanEvent) -> Self {
            let (kind, offset, detail) = match event {
                ScanEvent::TagSkipped {
                    tag_size,
                    audio_offset,
                } => ("tag_skipped", Some(*audio_offset), format!("{} bytes", tag_size)),
                ScanEvent::FrameAccepted { offset, frame } => (
                    "frame_accepted",
                    Some(*offset),
                    format!(
                        "{} kbps, {} Hz, {} bytes",
                        frame.bitrate_kbps, frame.sample_rate, frame.frame_size
                    ),
                ),
                ScanEvent::CandidateRejected { offset, reason } => {
                    ("candidate_rejected", Some(*offset), reason.to_string())
                }
                ScanEvent::Finished(summary) => {
                    ("finished", None, format!("{} frames", summary.frame_count))
                }
            };

            Self {
                timestamp: Utc::now(),
                kind,
                offset,
                detail,
            }
        }
    }

    /// Observer that records a timestamped trace of every event
    #[derive(Debug, Default)]
    pub struct TraceObserver {
        entries: Mutex<Vec<TraceEntry>>,
    }

    impl TraceObserver {
        pub fn new() -> Self {
            Self::default()
        }

        /// Snapshot of the recorded entries
        pub fn entries(&self) -> Vec<TraceEntry> {
            match self.entries.lock() {
                Ok(entries) => entries.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            }
        }

        pub fn to_json(&self) -> serde_json::Result<String> {
            serde_json::to_string_pretty(&self.entries())
        }

        /// Write the trace as pretty-printed JSON
        pub fn write_json<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
            let json = self.to_json()?;
            let mut file = File::create(path)?;
            file.write_all(json.as_bytes())?;
            Ok(())
        }
    }

    impl ScanObserver for TraceObserver {
        fn on_event(&self, event: &ScanEvent) {
            let entry = TraceEntry::from_event(event);
            match self.entries.lock() {
                Ok(mut entries) => entries.push(entry),
                Err(poisoned) => poisoned.into_inner().push(entry),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_observer_receives_events() {
        let seen = RefCell::new(Vec::new());
        let observer = FnObserver(|event: &ScanEvent| seen.borrow_mut().push(event.clone()));

        observer.on_event(&ScanEvent::CandidateRejected {
            offset: 3,
            reason: HeaderError::ReservedBitrate(0),
        });
        observer.on_event(&ScanEvent::Finished(ScanSummary::default()));

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], ScanEvent::CandidateRejected { offset: 3, .. }));
    }

    #[test]
    fn test_log_observer_does_not_panic() {
        let observer = LogObserver;
        observer.on_event(&ScanEvent::TagSkipped {
            tag_size: 20,
            audio_offset: 20,
        });
        observer.on_event(&ScanEvent::Finished(ScanSummary::default()));
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn test_trace_observer_records_json() {
        let observer = TraceObserver::new();
        observer.on_event(&ScanEvent::TagSkipped {
            tag_size: 10,
            audio_offset: 10,
        });
        observer.on_event(&ScanEvent::Finished(ScanSummary::default()));

        let entries = observer.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, "tag_skipped");
        assert_eq!(entries[0].offset, Some(10));
        assert_eq!(entries[1].kind, "finished");

        let json = observer.to_json().unwrap();
        assert!(json.contains("\"kind\": \"finished\""));
    }
}
