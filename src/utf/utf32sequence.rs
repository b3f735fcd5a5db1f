use crate::utf::*;

/// A single UTF-32 code unit. No range check happens here; `is_valid`
/// reports whether the value is a scalar value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf32Sequence(u32);

impl Utf for Utf32Sequence {
    type Point = u32;

    #[inline]
    fn build(point: Self::Point) -> Option<Self> {
        Some(Self(point))
    }

    #[inline]
    fn is_complete(&self) -> bool {
        true
    }

    #[inline]
    fn add_point(&mut self, _point: Self::Point) -> bool {
        false
    }

    #[inline]
    fn get_codepoint(&self) -> Codepoint {
        self.0
    }

    #[inline]
    fn encode(codepoint: Codepoint) -> Option<Self> {
        (codepoint <= MAX_CODEPOINT).then_some(Self(codepoint))
    }
}

impl Utf32Sequence {
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    pub const fn from_bytes(bytes: [u8; 4], endianness: Endianness) -> Self {
        Self(endianness.read_u32(bytes))
    }

    pub const fn to_bytes(self, endianness: Endianness) -> [u8; 4] {
        endianness.write_u32(self.0)
    }
}
