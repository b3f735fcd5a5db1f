pub mod utf16sequence;
pub mod utf32sequence;
pub mod utf8sequence;

pub type Codepoint = u32;

pub const MAX_CODEPOINT: Codepoint = 0x10FFFF;
pub const REPLACEMENT_CHARACTER: Codepoint = 0xFFFD;

pub const MAX_SEQUENCE_LEN: usize = 4;

pub const fn is_valid_codepoint(codepoint: Codepoint) -> bool {
    char::from_u32(codepoint).is_some()
}

/// A sequence of code units making up one codepoint in some encoding.
///
/// Sequences are built from their first unit and grown one unit at a time
/// until complete; the encoding direction builds a complete sequence
/// directly from a codepoint.
pub trait Utf: Sized {
    type Point;

    fn build(point: Self::Point) -> Option<Self>;
    fn is_complete(&self) -> bool;
    /// Appends a trailing unit. Returns false if the unit does not fit the
    /// sequence or the sequence is already complete.
    fn add_point(&mut self, point: Self::Point) -> bool;
    fn get_codepoint(&self) -> Codepoint;
    fn is_valid(&self) -> bool {
        self.is_complete() && is_valid_codepoint(self.get_codepoint())
    }
    fn encode(codepoint: Codepoint) -> Option<Self>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

impl Endianness {
    #[inline]
    pub const fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::BigEndian => u16::from_be_bytes(bytes),
            Endianness::LittleEndian => u16::from_le_bytes(bytes),
        }
    }

    #[inline]
    pub const fn write_u16(self, unit: u16) -> [u8; 2] {
        match self {
            Endianness::BigEndian => unit.to_be_bytes(),
            Endianness::LittleEndian => unit.to_le_bytes(),
        }
    }

    #[inline]
    pub const fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::BigEndian => u32::from_be_bytes(bytes),
            Endianness::LittleEndian => u32::from_le_bytes(bytes),
        }
    }

    #[inline]
    pub const fn write_u32(self, unit: u32) -> [u8; 4] {
        match self {
            Endianness::BigEndian => unit.to_be_bytes(),
            Endianness::LittleEndian => unit.to_le_bytes(),
        }
    }
}
