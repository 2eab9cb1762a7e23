//! Synthetic MP3 stream construction
//!
//! Frames carry a real MPEG-1 Layer III header followed by a zero-filled
//! body of the correct length, which is enough for frame counting.

use crate::error::{FixtureError, FixtureResult};
use std::fs;
use std::path::Path;

const BITRATES_KBPS: [u32; 14] = [32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];
const SAMPLE_RATES: [u32; 3] = [44100, 48000, 32000];

/// Encode a value as a 4-byte synchsafe integer
pub fn encode_synchsafe(value: u32) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

/// Build the 4-byte header for an MPEG-1 Layer III frame
///
/// Protection bit is set (no CRC), channel mode is joint stereo.
pub fn frame_header(bitrate_kbps: u32, sample_rate: u32, padding: bool) -> FixtureResult<[u8; 4]> {
    let bitrate_index = BITRATES_KBPS
        .iter()
        .position(|&rate| rate == bitrate_kbps)
        .map(|pos| pos as u8 + 1)
        .ok_or(FixtureError::UnsupportedBitrate(bitrate_kbps))?;
    let sample_rate_index = SAMPLE_RATES
        .iter()
        .position(|&rate| rate == sample_rate)
        .map(|pos| pos as u8)
        .ok_or(FixtureError::UnsupportedSampleRate(sample_rate))?;

    Ok([
        0xFF,
        0xFB,
        (bitrate_index << 4) | (sample_rate_index << 2) | ((padding as u8) << 1),
        0x44,
    ])
}

/// Frame length in bytes for the given parameters
pub fn frame_length(bitrate_kbps: u32, sample_rate: u32, padding: bool) -> usize {
    (144 * bitrate_kbps as usize * 1000) / sample_rate as usize + padding as usize
}

/// Incremental builder for synthetic MP3 streams
#[derive(Debug, Default, Clone)]
pub struct Mp3Builder {
    bytes: Vec<u8>,
    frames: usize,
}

impl Mp3Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ID3v2.3 tag with `payload` as its body
    pub fn id3v2_tag(mut self, payload: &[u8]) -> Self {
        self.bytes.extend_from_slice(b"ID3");
        self.bytes.extend_from_slice(&[0x03, 0x00, 0x00]);
        self.bytes.extend_from_slice(&encode_synchsafe(payload.len() as u32));
        self.bytes.extend_from_slice(payload);
        self
    }

    /// Append one frame with a zero-filled body
    pub fn frame(
        mut self,
        bitrate_kbps: u32,
        sample_rate: u32,
        padding: bool,
    ) -> FixtureResult<Self> {
        let header = frame_header(bitrate_kbps, sample_rate, padding)?;
        let start = self.bytes.len();
        self.bytes.extend_from_slice(&header);
        self.bytes.resize(start + frame_length(bitrate_kbps, sample_rate, padding), 0);
        self.frames += 1;
        Ok(self)
    }

    /// Append `count` identical frames
    pub fn frames(
        mut self,
        count: usize,
        bitrate_kbps: u32,
        sample_rate: u32,
    ) -> FixtureResult<Self> {
        for _ in 0..count {
            self = self.frame(bitrate_kbps, sample_rate, false)?;
        }
        Ok(self)
    }

    /// Append raw bytes that are not counted as frames
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Number of frames appended so far
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Deterministic pseudo-random bytes (xorshift32)
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Read a fixture file, keeping its path in the error
pub fn read_fixture<P: AsRef<Path>>(path: P) -> FixtureResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| FixtureError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}
