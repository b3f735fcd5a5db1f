use crate::utf::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Utf8Sequence {
    bytes: [u8; 4],
    full_length: u8,
    current_length: u8,
}

impl Utf for Utf8Sequence {
    type Point = u8;

    #[inline]
    fn build(byte: Self::Point) -> Option<Self> {
        if Self::is_continuation(byte) {
            return None;
        }
        let full_length = Self::decode_length(byte)? as u8;
        Some(Self {
            bytes: [byte, 0, 0, 0],
            full_length,
            current_length: 1,
        })
    }

    #[inline]
    fn is_complete(&self) -> bool {
        self.current_length == self.full_length
    }

    #[inline]
    fn add_point(&mut self, point: Self::Point) -> bool {
        if self.is_complete() || !Self::is_continuation(point) {
            return false;
        }
        self.bytes[self.current_length as usize] = point;
        self.current_length += 1;
        true
    }

    #[inline]
    fn get_codepoint(&self) -> Codepoint {
        let lead = self.bytes[0] as u32;
        let mut codepoint = match self.full_length {
            1 => return lead & 0x7F,
            2 => lead & 0x1F,
            3 => lead & 0x0F,
            _ => lead & 0x07,
        };
        for &byte in &self.bytes[1..self.current_len()] {
            codepoint = (codepoint << 6) | (byte & 0x3F) as u32;
        }
        codepoint
    }

    /// Rejects overlong forms in addition to non-scalar values.
    #[inline]
    fn is_valid(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let codepoint = self.get_codepoint();
        if !is_valid_codepoint(codepoint) {
            return false;
        }
        Self::encode_length(codepoint) == Some(self.full_len())
    }

    #[inline]
    fn encode(codepoint: Codepoint) -> Option<Self> {
        let full_length = Self::encode_length(codepoint)?;
        let bytes = match full_length {
            1 => [codepoint as u8, 0, 0, 0],
            2 => [
                0xC0 | ((codepoint >> 6) & 0x1F) as u8,
                0x80 | (codepoint & 0x3F) as u8,
                0,
                0,
            ],
            3 => [
                0xE0 | ((codepoint >> 12) & 0x0F) as u8,
                0x80 | ((codepoint >> 6) & 0x3F) as u8,
                0x80 | (codepoint & 0x3F) as u8,
                0,
            ],
            _ => [
                0xF0 | ((codepoint >> 18) & 0x07) as u8,
                0x80 | ((codepoint >> 12) & 0x3F) as u8,
                0x80 | ((codepoint >> 6) & 0x3F) as u8,
                0x80 | (codepoint & 0x3F) as u8,
            ],
        };
        Some(Self {
            bytes,
            full_length: full_length as u8,
            current_length: full_length as u8,
        })
    }
}

impl Utf8Sequence {
    /// Length of the sequence introduced by `lead`, judged by its range
    /// alone. Continuation bytes classify as two-byte leads here; `build`
    /// rejects them.
    #[inline]
    pub const fn decode_length(lead: u8) -> Option<usize> {
        match lead {
            0x00..=0x7F => Some(1),
            0x80..=0xDF => Some(2),
            0xE0..=0xEF => Some(3),
            0xF0..=0xF7 => Some(4),
            _ => None,
        }
    }

    #[inline]
    pub const fn encode_length(codepoint: Codepoint) -> Option<usize> {
        match codepoint {
            0x00..=0x7F => Some(1),
            0x80..=0x7FF => Some(2),
            0x800..=0xFFFF => Some(3),
            0x10000..=MAX_CODEPOINT => Some(4),
            _ => None,
        }
    }

    #[inline]
    const fn is_continuation(byte: u8) -> bool {
        byte & 0b1100_0000 == 0b1000_0000
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.current_len()]
    }

    pub const fn current_len(&self) -> usize {
        self.current_length as usize
    }

    pub const fn full_len(&self) -> usize {
        self.full_length as usize
    }
}

/// Number of complete sequences at the start of `bytes`, judged by lead
/// bytes only. Stops at the first unclassifiable lead or truncated tail.
pub fn count_codepoints(bytes: &[u8]) -> usize {
    let mut offset = 0;
    let mut count = 0;
    while let Some(&lead) = bytes.get(offset) {
        match Utf8Sequence::decode_length(lead) {
            Some(length) if length <= bytes.len() - offset => {
                offset += length;
                count += 1;
            }
            _ => break,
        }
    }
    count
}
