//! ID3v2 tag detection and skipping
//!
//! Only the 10-byte tag header is read. The payload is skipped by its
//! declared size without being interpreted.

use crate::tables::{ID3V2_HEADER_LEN, ID3V2_MARKER};

/// Decoded ID3v2 tag header
///
/// Structure:
/// bytes\[0..3]   => "ID3"
/// bytes\[3..5]   => major and revision version
/// bytes\[5]      => flags
/// bytes\[6..10]  => synchsafe payload size (excludes this header)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub major_version: u8,
    pub revision: u8,
    pub flags: u8,

    /// Declared payload size
    pub payload_size: u32,
}

impl Id3v2Header {
    /// Parse a tag header at the start of `bytes`
    ///
    /// Returns `None` when fewer than 10 bytes are available or the marker
    /// does not match.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let header = bytes.get(..ID3V2_HEADER_LEN)?;
        if &header[..3] != ID3V2_MARKER {
            return None;
        }

        Some(Self {
            major_version: header[3],
            revision: header[4],
            flags: header[5],
            payload_size: decode_synchsafe([header[6], header[7], header[8], header[9]]),
        })
    }

    /// Total bytes occupied by the tag, header included
    pub fn total_size(&self) -> usize {
        self.payload_size as usize + ID3V2_HEADER_LEN
    }
}

/// Decode a 28-bit synchsafe integer (7 significant bits per byte)
pub fn decode_synchsafe(bytes: [u8; 4]) -> u32 {
    ((bytes[0] as u32 & 0x7F) << 21)
        | ((bytes[1] as u32 & 0x7F) << 14)
        | ((bytes[2] as u32 & 0x7F) << 7)
        | (bytes[3] as u32 & 0x7F)
}

/// Skip a leading ID3v2 tag at `offset`, returning the first byte after it
///
/// Returns `offset` unchanged when no tag is present. The result may lie
/// past the end of `buffer` if the declared size overruns it.
pub fn skip_id3v2_tag(buffer: &[u8], offset: usize) -> usize {
    match buffer.get(offset..).and_then(Id3v2Header::parse) {
        Some(tag) => offset.saturating_add(tag.total_size()),
        None => offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_synchsafe() {
        assert_eq!(decode_synchsafe([0, 0, 0, 0]), 0);
        assert_eq!(decode_synchsafe([0, 0, 0, 0x0A]), 10);
        assert_eq!(decode_synchsafe([0, 0, 0x02, 0x01]), 257);
        assert_eq!(decode_synchsafe([0x7F, 0x7F, 0x7F, 0x7F]), 0x0FFF_FFFF);
        // High bits are ignored
        assert_eq!(decode_synchsafe([0x80, 0x80, 0x80, 0x81]), 1);
    }

    #[test]
    fn test_parse_header_fields() {
        let bytes = [b'I', b'D', b'3', 0x04, 0x00, 0x40, 0x00, 0x00, 0x01, 0x00];
        let tag = Id3v2Header::parse(&bytes).unwrap();
        assert_eq!(tag.major_version, 4);
        assert_eq!(tag.revision, 0);
        assert_eq!(tag.flags, 0x40);
        assert_eq!(tag.payload_size, 128);
        assert_eq!(tag.total_size(), 138);
    }

    #[test]
    fn test_skip_without_tag() {
        assert_eq!(skip_id3v2_tag(&[], 0), 0);
        assert_eq!(skip_id3v2_tag(b"not a tag at all", 0), 0);
        assert_eq!(skip_id3v2_tag(&[0xFF, 0xFB, 0x90, 0x00], 0), 0);
    }

    #[test]
    fn test_skip_short_buffer_with_marker() {
        // Marker present but fewer than 10 bytes
        assert_eq!(skip_id3v2_tag(b"ID3\x03\x00\x00\x00\x00\x00", 0), 0);
    }

    #[test]
    fn test_skip_with_tag() {
        let mut bytes = vec![b'I', b'D', b'3', 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0A];
        bytes.extend_from_slice(&[0xFF; 10]);
        assert_eq!(skip_id3v2_tag(&bytes, 0), 20);
    }

    #[test]
    fn test_skip_may_overrun_buffer() {
        let bytes = [b'I', b'D', b'3', 0x03, 0x00, 0x00, 0x00, 0x00, 0x7F, 0x7F];
        assert_eq!(skip_id3v2_tag(&bytes, 0), 10 + 0x3FFF);
    }

    #[test]
    fn test_skip_from_nonzero_offset() {
        let mut bytes = vec![0u8; 5];
        bytes.extend_from_slice(&[b'I', b'D', b'3', 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02]);
        assert_eq!(skip_id3v2_tag(&bytes, 5), 17);
        assert_eq!(skip_id3v2_tag(&bytes, 100), 100);
    }
}
