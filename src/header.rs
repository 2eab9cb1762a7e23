//! MPEG audio frame header decoding and validation
//!
//! A header is the 32-bit big-endian word at a sync candidate. Decoding
//! extracts the raw bit fields; validation resolves them against the
//! MPEG-1 Layer III tables and computes the frame size.

use crate::error::{HeaderError, HeaderResult};
use crate::tables::{
    bitrate_kbps, sample_rate_hz, FRAME_HEADER_LEN, FRAME_SIZE_COEFFICIENT, LAYER_III,
    MAX_FRAME_SIZE_EXCLUSIVE, MPEG_VERSION_1, SAMPLES_PER_FRAME, SYNC_WORD,
};

/// Raw frame header fields
///
/// Bit layout (MSB first):
/// AAAAAAAA AAABBCCD EEEEFFGH ........
/// A = sync, B = version, C = layer, D = protection,
/// E = bitrate index, F = sample rate index, G = padding, H = private
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub sync_word: u16,
    pub mpeg_version: u8,
    pub layer: u8,
    pub bitrate_index: u8,
    pub sample_rate_index: u8,
    pub padding: u8,
}

/// A header that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidFrame {
    /// Bitrate in kbps
    pub bitrate_kbps: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub padding: bool,
    /// Total frame length including the header
    pub frame_size: usize,
}

impl ValidFrame {
    /// Playback duration of this frame in seconds
    pub fn duration_secs(&self) -> f64 {
        SAMPLES_PER_FRAME as f64 / self.sample_rate as f64
    }
}

impl FrameHeader {
    /// Decode the bit fields of a 4-byte header
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let word = u32::from_be_bytes(bytes);

        Self {
            sync_word: ((word >> 21) & 0x7FF) as u16,
            mpeg_version: ((word >> 19) & 0x3) as u8,
            layer: ((word >> 17) & 0x3) as u8,
            bitrate_index: ((word >> 12) & 0xF) as u8,
            sample_rate_index: ((word >> 10) & 0x3) as u8,
            padding: ((word >> 9) & 0x1) as u8,
        }
    }

    /// Decode the header at `offset`, failing if it would run past the buffer
    pub fn read(buffer: &[u8], offset: usize) -> HeaderResult<Self> {
        let bytes = offset
            .checked_add(FRAME_HEADER_LEN)
            .and_then(|end| buffer.get(offset..end))
            .ok_or(HeaderError::Truncated {
                offset,
                available: buffer.len().saturating_sub(offset),
            })?;

        Ok(Self::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Validate against MPEG-1 Layer III and compute the frame size
    pub fn validate(&self) -> HeaderResult<ValidFrame> {
        if self.sync_word != SYNC_WORD {
            return Err(HeaderError::BadSyncWord(self.sync_word));
        }
        if self.mpeg_version != MPEG_VERSION_1 {
            return Err(HeaderError::UnsupportedVersion(self.mpeg_version));
        }
        if self.layer != LAYER_III {
            return Err(HeaderError::UnsupportedLayer(self.layer));
        }

        let bitrate = bitrate_kbps(self.bitrate_index)
            .ok_or(HeaderError::ReservedBitrate(self.bitrate_index))?;
        let sample_rate = sample_rate_hz(self.sample_rate_index)
            .ok_or(HeaderError::ReservedSampleRate(self.sample_rate_index))?;

        let frame_size = frame_size(bitrate, sample_rate, self.padding == 1);
        if frame_size == 0 || frame_size >= MAX_FRAME_SIZE_EXCLUSIVE {
            return Err(HeaderError::FrameSizeOutOfRange(frame_size));
        }

        Ok(ValidFrame {
            bitrate_kbps: bitrate,
            sample_rate,
            padding: self.padding == 1,
            frame_size,
        })
    }
}

/// Frame length in bytes: floor(144 * bitrate / sample_rate) + padding
pub fn frame_size(bitrate_kbps: u32, sample_rate: u32, padding: bool) -> usize {
    if sample_rate == 0 {
        return 0;
    }
    let bits = FRAME_SIZE_COEFFICIENT as u64 * bitrate_kbps as u64 * 1000;
    (bits / sample_rate as u64) as usize + padding as usize
}
