//! Frame counting behaviour on synthetic streams
//!
//! Covers the scanner contract end to end: empty and non-MP3 input, tag
//! skipping, frame-size driven advancement and robustness on random bytes.

use mp3_frame_counter::{count_frames, FrameHeader, FrameScanner};
use proptest::prelude::*;
use util::{frame_length, noise, Mp3Builder};

#[test]
fn test_empty_buffer() {
    assert_eq!(count_frames(&[]), 0);
}

#[test]
fn test_non_mp3_data() {
    assert_eq!(count_frames(b"This is not an MP3 file"), 0);
    assert_eq!(count_frames(&[0u8; 4096]), 0);
    // 0xFF bytes without the following sync bits
    assert_eq!(count_frames(&[0xFF, 0x00].repeat(1000)), 0);
}

#[test]
fn test_single_header_with_filler() {
    let mut buffer = vec![0xFF, 0xFB, 0x90, 0x00];
    buffer.extend(std::iter::repeat(0xFF).take(413));
    // Filler bytes are all 0xFF but never followed by a second window
    // once the cursor jumps to 417
    assert_eq!(count_frames(&buffer), 1);
}

#[test]
fn test_frame_size_for_reference_header() {
    let frame = FrameHeader::from_bytes([0xFF, 0xFB, 0x90, 0x00]).validate().unwrap();
    assert_eq!(frame.frame_size, 144 * 128_000 / 44_100);
    assert_eq!(frame.frame_size, 417);
}

#[test]
fn test_id3v2_tag_with_empty_payload() {
    let mut buffer = b"ID3\x03\x00\x00\x00\x00\x00\x00".to_vec();
    buffer.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
    buffer.resize(10 + 417, 0);
    assert!(count_frames(&buffer) >= 1);
}

#[test]
fn test_id3v2_tag_with_payload() {
    let buffer = Mp3Builder::new()
        .id3v2_tag(&[0u8; 10])
        .frame(128, 44100, false)
        .unwrap()
        .build();
    assert_eq!(buffer.len(), 20 + 417);
    assert_eq!(count_frames(&buffer), 1);
}

#[test]
fn test_mixed_bitrates_and_rates() {
    let builder = Mp3Builder::new()
        .frames(10, 128, 44100)
        .and_then(|b| b.frame(320, 32000, true))
        .and_then(|b| b.frames(7, 32, 48000))
        .and_then(|b| b.frame(192, 44100, true))
        .unwrap();
    let expected = builder.frame_count();
    assert_eq!(count_frames(&builder.build()), expected);
}

#[test]
fn test_junk_between_frames() {
    let buffer = Mp3Builder::new()
        .raw(b"leading junk")
        .frames(3, 128, 44100)
        .unwrap()
        .raw(&[0xFF, 0xF3, 0x90, 0x00]) // MPEG-2 header
        .raw(&[0xFF, 0xFD, 0x90, 0x00]) // Layer II header
        .frames(2, 64, 32000)
        .unwrap()
        .raw(&[0xFF, 0xFB, 0x90]) // truncated
        .build();

    let summary = FrameScanner::new().scan(&buffer);
    assert_eq!(summary.frame_count, 5);
    assert_eq!(summary.rejected_candidates, 2);
    assert_eq!(
        summary.audio_bytes,
        3 * frame_length(128, 44100, false) + 2 * frame_length(64, 32000, false)
    );
}

#[test]
fn test_summary_matches_count() {
    let buffer = Mp3Builder::new()
        .id3v2_tag(b"TIT2 some title")
        .frames(25, 160, 48000)
        .unwrap()
        .build();
    let summary = FrameScanner::new().scan(&buffer);
    assert_eq!(summary.frame_count, count_frames(&buffer));
    assert_eq!(summary.tag_size, 25);
    assert!((summary.duration_secs - 25.0 * 0.024).abs() < 1e-9);
}

#[test]
fn test_random_noise_is_stable() {
    let buffer = noise(1 << 16, 0x1234_5678);
    let first = count_frames(&buffer);
    assert_eq!(count_frames(&buffer), first);
}

proptest! {
    #[test]
    fn test_scan_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..4096)) {
        let summary = FrameScanner::new().scan(&bytes);
        prop_assert!(summary.frame_count <= bytes.len() / 96 + 1);
        prop_assert_eq!(count_frames(&bytes), summary.frame_count, "Count must be deterministic");
    }

    #[test]
    fn test_tag_contents_are_ignored(
        payload in prop::collection::vec(any::<u8>(), 0..2048),
        frames in 1usize..20,
    ) {
        let buffer = Mp3Builder::new()
            .id3v2_tag(&payload)
            .frames(frames, 128, 44100)
            .unwrap()
            .build();
        prop_assert_eq!(count_frames(&buffer), frames);
    }

    #[test]
    fn test_well_formed_streams_are_counted_exactly(
        params in prop::collection::vec(
            (prop::sample::select(vec![32u32, 64, 128, 192, 256, 320]),
             prop::sample::select(vec![44100u32, 48000, 32000]),
             any::<bool>()),
            0..40)
    ) {
        let mut builder = Mp3Builder::new();
        for (bitrate, sample_rate, padding) in &params {
            builder = builder.frame(*bitrate, *sample_rate, *padding).unwrap();
        }
        prop_assert_eq!(count_frames(&builder.build()), params.len());
    }
}
