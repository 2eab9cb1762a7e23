//! Lookup tables and constants for MPEG-1 Layer III frame headers
//!
//! Only the MPEG-1 / Layer III column of the standard tables is carried;
//! other versions and layers are never recognized.

/// Bitrate table in kbps, indexed by the 4-bit bitrate index
///
/// Index 0 (free format) and 15 (bad) are reserved and map to 0.
pub const BITRATES_KBPS: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];

/// Sample rates in Hz, indexed by the 2-bit sample rate index
///
/// Index 3 is reserved and maps to 0.
pub const SAMPLE_RATES: [u32; 4] = [44100, 48000, 32000, 0];

/// 11-bit frame sync pattern
pub const SYNC_WORD: u16 = 0x7FF;

/// Version bits for MPEG-1
pub const MPEG_VERSION_1: u8 = 0b11;

/// Layer bits for Layer III
pub const LAYER_III: u8 = 0b01;

/// Frame header length in bytes
pub const FRAME_HEADER_LEN: usize = 4;

/// Samples per MPEG-1 Layer III frame
pub const SAMPLES_PER_FRAME: u32 = 1152;

/// Frame size coefficient (samples per frame / 8 bits)
pub const FRAME_SIZE_COEFFICIENT: u32 = SAMPLES_PER_FRAME / 8;

/// Exclusive upper bound on accepted frame sizes
///
/// The largest legal MPEG-1 Layer III frame is 1441 bytes (320 kbps at
/// 32 kHz with padding). This bound is kept as-is for compatibility with
/// existing counts; tightening it would change results on corrupt input.
pub const MAX_FRAME_SIZE_EXCLUSIVE: usize = 2881;

/// ID3v2 tag marker
pub const ID3V2_MARKER: &[u8; 3] = b"ID3";

/// ID3v2 tag header length (marker, version, flags, size)
pub const ID3V2_HEADER_LEN: usize = 10;

/// Resolve a bitrate index, returning `None` for reserved entries
pub fn bitrate_kbps(index: u8) -> Option<u32> {
    match BITRATES_KBPS.get(index as usize) {
        Some(&0) | None => None,
        Some(&kbps) => Some(kbps),
    }
}

/// Resolve a sample rate index, returning `None` for reserved entries
pub fn sample_rate_hz(index: u8) -> Option<u32> {
    match SAMPLE_RATES.get(index as usize) {
        Some(&0) | None => None,
        Some(&hz) => Some(hz),
    }
}
