//! Frame scanning
//!
//! [`FrameScanner`] walks a byte buffer once: it skips a leading ID3v2 tag,
//! searches for 11-bit sync patterns, and validates the header at each
//! candidate. An accepted header advances the cursor by its frame size; a
//! rejected one advances by a single byte. Every step moves forward, so a
//! scan does at most `buffer.len()` iterations.

use serde::Serialize;

use crate::diagnostics::{NullObserver, ScanEvent, ScanObserver};
use crate::header::FrameHeader;
use crate::tables::FRAME_HEADER_LEN;
use crate::tag::skip_id3v2_tag;

/// Totals gathered during one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub frame_count: usize,
    /// Bytes occupied by the leading tag, header included
    pub tag_size: usize,
    /// Sync candidates whose header failed validation
    pub rejected_candidates: usize,
    /// Sum of accepted frame sizes
    pub audio_bytes: usize,
    /// Playback duration of the accepted frames in seconds
    pub duration_secs: f64,
}

/// Whether an 11-bit frame sync starts at `offset`
#[inline]
pub fn is_frame_sync(buffer: &[u8], offset: usize) -> bool {
    match buffer.get(offset..offset.saturating_add(2)) {
        Some(&[first, second]) => first == 0xFF && second & 0xE0 == 0xE0,
        _ => false,
    }
}

/// MPEG-1 Layer III frame scanner
///
/// The scanner holds no per-scan state; one instance can be shared across
/// threads and reused for any number of buffers.
#[derive(Debug, Clone, Default)]
pub struct FrameScanner<O = NullObserver> {
    observer: O,
}

impl FrameScanner {
    /// Create a scanner without diagnostics
    pub fn new() -> Self {
        Self {
            observer: NullObserver,
        }
    }
}

impl<O: ScanObserver> FrameScanner<O> {
    /// Create a scanner reporting to `observer`
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Count the frames in `buffer`
    pub fn count_frames(&self, buffer: &[u8]) -> usize {
        self.scan(buffer).frame_count
    }

    /// Scan `buffer` and return the collected totals
    pub fn scan(&self, buffer: &[u8]) -> ScanSummary {
        let mut summary = ScanSummary::default();

        let mut cursor = skip_id3v2_tag(buffer, 0);
        if cursor > 0 {
            summary.tag_size = cursor;
            self.observer.on_event(&ScanEvent::TagSkipped {
                tag_size: cursor,
                audio_offset: cursor,
            });
        }

        while cursor
            .checked_add(FRAME_HEADER_LEN)
            .is_some_and(|end| end <= buffer.len())
        {
            if !is_frame_sync(buffer, cursor) {
                cursor += 1;
                continue;
            }

            match FrameHeader::read(buffer, cursor).and_then(|header| header.validate()) {
                Ok(frame) => {
                    self.observer.on_event(&ScanEvent::FrameAccepted {
                        offset: cursor,
                        frame,
                    });
                    summary.frame_count += 1;
                    summary.audio_bytes += frame.frame_size;
                    summary.duration_secs += frame.duration_secs();
                    cursor += frame.frame_size;
                }
                Err(reason) => {
                    self.observer.on_event(&ScanEvent::CandidateRejected {
                        offset: cursor,
                        reason,
                    });
                    summary.rejected_candidates += 1;
                    cursor += 1;
                }
            }
        }

        self.observer.on_event(&ScanEvent::Finished(summary));
        summary
    }
}

/// Count MPEG-1 Layer III frames in `buffer`
///
/// Returns 0 for empty input, non-MP3 input, or input without any
/// recognizable frame. Never fails.
pub fn count_frames(buffer: &[u8]) -> usize {
    FrameScanner::new().count_frames(buffer)
}
