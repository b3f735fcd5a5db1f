use crate::utf::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Utf16Type {
    Bmp(u16),
    Surrogate { data: [u16; 2], is_complete: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf16Sequence(Utf16Type);

impl Utf for Utf16Sequence {
    type Point = u16;

    #[inline]
    fn build(point: Self::Point) -> Option<Self> {
        let data = match point {
            0xD800..=0xDBFF => Utf16Type::Surrogate {
                data: [point, 0],
                is_complete: false,
            },
            0xDC00..=0xDFFF => return None,
            _ => Utf16Type::Bmp(point),
        };
        Some(Self(data))
    }

    #[inline]
    fn is_complete(&self) -> bool {
        match self.0 {
            Utf16Type::Bmp(_) => true,
            Utf16Type::Surrogate { is_complete, .. } => is_complete,
        }
    }

    #[inline]
    fn add_point(&mut self, point: Self::Point) -> bool {
        match self.0 {
            Utf16Type::Bmp(_) => false,
            Utf16Type::Surrogate {
                ref mut data,
                ref mut is_complete,
            } => {
                if *is_complete || !(0xDC00..=0xDFFF).contains(&point) {
                    false
                } else {
                    data[1] = point;
                    *is_complete = true;
                    true
                }
            }
        }
    }

    #[inline]
    fn get_codepoint(&self) -> Codepoint {
        match self.0 {
            Utf16Type::Bmp(unit) => unit as u32,
            Utf16Type::Surrogate { data, .. } => {
                let high = (data[0] & 0x3FF) as u32;
                let low = (data[1] & 0x3FF) as u32;
                0x10000 + (high << 10) + low
            }
        }
    }

    #[inline]
    fn encode(codepoint: Codepoint) -> Option<Self> {
        let data = match codepoint {
            0x0000..=0xFFFF => Utf16Type::Bmp(codepoint as u16),
            0x10000..=MAX_CODEPOINT => {
                let v = codepoint - 0x10000;
                Utf16Type::Surrogate {
                    data: [0xD800 | (v >> 10) as u16, 0xDC00 | (v & 0x3FF) as u16],
                    is_complete: true,
                }
            }
            _ => return None,
        };
        Some(Self(data))
    }
}

impl Utf16Sequence {
    /// Number of code units the sequence starting with `lead` needs. A lone
    /// low surrogate cannot start a sequence.
    #[inline]
    pub const fn decode_length(lead: u16) -> Option<usize> {
        match lead {
            0xD800..=0xDBFF => Some(2),
            0xDC00..=0xDFFF => None,
            _ => Some(1),
        }
    }

    #[inline]
    pub const fn encode_length(codepoint: Codepoint) -> Option<usize> {
        match codepoint {
            0x0000..=0xFFFF => Some(1),
            0x10000..=MAX_CODEPOINT => Some(2),
            _ => None,
        }
    }

    pub fn units(&self) -> &[u16] {
        match &self.0 {
            Utf16Type::Bmp(unit) => std::slice::from_ref(unit),
            Utf16Type::Surrogate {
                data,
                is_complete: true,
            } => &data[..],
            Utf16Type::Surrogate { data, .. } => &data[..1],
        }
    }

    pub const fn is_surrogate(&self) -> bool {
        matches!(self.0, Utf16Type::Surrogate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmp_unit_is_complete() {
        let sequence = Utf16Sequence::build(0x0041).unwrap();
        assert!(sequence.is_complete());
        assert!(!sequence.is_surrogate());
        assert_eq!(sequence.get_codepoint(), 0x41);
    }

    #[test]
    fn pairs_surrogates() {
        let mut sequence = Utf16Sequence::build(0xD800).unwrap();
        assert!(!sequence.is_complete());
        assert!(!sequence.is_valid());
        assert!(sequence.add_point(0xDC00));
        assert!(sequence.is_valid());
        assert_eq!(sequence.get_codepoint(), 0x10000);
        assert!(!sequence.add_point(0xDC00));
    }

    #[test]
    fn high_surrogate_needs_low() {
        let mut sequence = Utf16Sequence::build(0xD83D).unwrap();
        assert!(!sequence.add_point(0x0041));
        assert!(!sequence.add_point(0xD800));
        assert!(!sequence.is_complete());
    }

    #[test]
    fn lone_low_surrogate() {
        assert!(Utf16Sequence::build(0xDC00).is_none());
        assert_eq!(Utf16Sequence::decode_length(0xDFFF), None);
    }

    #[test]
    fn encodes_pair() {
        let sequence = Utf16Sequence::encode(0x1F600).unwrap();
        assert_eq!(sequence.units(), [0xD83D, 0xDE00]);
        assert_eq!(Utf16Sequence::encode(0x10FFFF).unwrap().units(), [0xDBFF, 0xDFFF]);
        assert_eq!(Utf16Sequence::encode(0x20AC).unwrap().units(), [0x20AC]);
        assert!(Utf16Sequence::encode(0x110000).is_none());
    }

    #[test]
    fn encode_length_matches_units() {
        for codepoint in [0x0, 0x41, 0xD7FF, 0xE000, 0xFFFF, 0x10000, 0x1F600, 0x10FFFF] {
            let units = Utf16Sequence::encode(codepoint).unwrap().units().len();
            assert_eq!(Utf16Sequence::encode_length(codepoint), Some(units));
        }
        assert_eq!(Utf16Sequence::encode_length(0x110000), None);
    }

    #[test]
    fn matches_std() {
        for c in ['\0', 'z', '€', '\u{FFFF}', '\u{10000}', '😀', '\u{10FFFF}'] {
            let mut buf = [0; 2];
            let expected = c.encode_utf16(&mut buf);
            assert_eq!(Utf16Sequence::encode(c as u32).unwrap().units(), expected);
        }
    }
}
