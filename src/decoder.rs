use crate::{
    error::{UtfxError, UtfxResult},
    mode::{Format, Mode},
    utf::{
        utf16sequence::Utf16Sequence, utf32sequence::Utf32Sequence, utf8sequence::Utf8Sequence,
        Codepoint, Endianness, Utf,
    },
};

/// Turns raw bytes into codepoints, one sequence per call.
///
/// The mode is chosen by the owner and can change between calls; the last
/// successfully decoded codepoint is retained across mode changes.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    mode: Mode,
    last_codepoint: Option<Codepoint>,
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            mode: Mode::None,
            last_codepoint: None,
        }
    }

    pub const fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            last_codepoint: None,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn last_codepoint(&self) -> Option<Codepoint> {
        self.last_codepoint
    }

    /// How many bytes the sequence at the start of `input` occupies, judged
    /// from its first code unit. Nothing is consumed.
    ///
    /// Fails with `BufferTooSmall` when `input` is shorter than one code
    /// unit and with `InvalidSequence` when that unit cannot start a
    /// sequence.
    pub fn expected_input_length(&self, input: &[u8]) -> UtfxResult<usize> {
        match self.mode.format()? {
            Format::Utf8 => {
                let [lead] = peek::<1>(input)?;
                Utf8Sequence::decode_length(lead).ok_or(UtfxError::InvalidSequence)
            }
            Format::Utf16(endianness) => {
                let lead = endianness.read_u16(peek::<2>(input)?);
                Utf16Sequence::decode_length(lead)
                    .map(|units| units * 2)
                    .ok_or(UtfxError::InvalidSequence)
            }
            Format::Utf32(_) => peek::<4>(input).map(|bytes| bytes.len()),
        }
    }

    /// Decodes the sequence at the start of `input`.
    ///
    /// A sequence cut short by the end of `input`, such as a UTF-16 high
    /// surrogate with no unit after it, fails with `BufferTooSmall` rather
    /// than `InvalidSequence`.
    pub fn decode(&mut self, input: &[u8]) -> UtfxResult<Codepoint> {
        self.decode_next(input).map(|(codepoint, _)| codepoint)
    }

    /// Like [`decode`](Self::decode), but never looks past `max_len` bytes.
    pub fn decode_bounded(&mut self, input: &[u8], max_len: usize) -> UtfxResult<Codepoint> {
        let input = &input[..max_len.min(input.len())];
        self.decode(input)
    }

    /// Decodes the sequence at the start of `input` and reports how many
    /// bytes it occupied. On failure the retained codepoint is untouched.
    pub fn decode_next(&mut self, input: &[u8]) -> UtfxResult<(Codepoint, usize)> {
        let required = self.expected_input_length(input).inspect_err(|error| {
            log::debug!("{} decoder: cannot size next sequence: {}", self.mode, error);
        })?;
        if required > input.len() {
            log::debug!(
                "{} decoder: sequence needs {} bytes, {} available",
                self.mode,
                required,
                input.len()
            );
            return Err(UtfxError::BufferTooSmall {
                required,
                available: input.len(),
            });
        }
        let input = &input[..required];
        let codepoint = match self.mode.format()? {
            Format::Utf8 => assemble::<Utf8Sequence>(input.iter().copied()),
            Format::Utf16(endianness) => assemble::<Utf16Sequence>(utf16_units(input, endianness)),
            Format::Utf32(endianness) => {
                let sequence = Utf32Sequence::from_bytes(peek::<4>(input)?, endianness);
                if sequence.is_valid() {
                    Ok(sequence.get_codepoint())
                } else {
                    Err(UtfxError::InvalidSequence)
                }
            }
        }
        .inspect_err(|_| {
            log::debug!("{} decoder: rejected sequence {:02X?}", self.mode, input);
        })?;
        log::trace!("{} decoder: U+{:04X} from {} bytes", self.mode, codepoint, required);
        self.last_codepoint = Some(codepoint);
        Ok((codepoint, required))
    }

    /// True when `input` is the start of a well-formed sequence that runs
    /// past the end of `input`. A bad unit inside the available bytes makes
    /// it false.
    pub fn is_truncated(&self, input: &[u8]) -> bool {
        if input.is_empty() {
            return false;
        }
        match self.expected_input_length(input) {
            Ok(required) if required > input.len() => match self.mode.format() {
                Ok(Format::Utf8) => is_prefix::<Utf8Sequence>(input.iter().copied()),
                Ok(Format::Utf16(endianness)) => {
                    is_prefix::<Utf16Sequence>(utf16_units(input, endianness))
                }
                Ok(Format::Utf32(_)) | Err(_) => false,
            },
            Err(UtfxError::BufferTooSmall { .. }) => true,
            _ => false,
        }
    }
}

fn peek<const N: usize>(input: &[u8]) -> UtfxResult<[u8; N]> {
    input
        .get(..N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(UtfxError::BufferTooSmall {
            required: N,
            available: input.len(),
        })
}

fn utf16_units(input: &[u8], endianness: Endianness) -> impl Iterator<Item = u16> + '_ {
    input
        .chunks_exact(2)
        .map(move |pair| endianness.read_u16([pair[0], pair[1]]))
}

fn is_prefix<S: Utf>(mut points: impl Iterator<Item = S::Point>) -> bool {
    let Some(mut sequence) = points.next().and_then(S::build) else {
        return false;
    };
    points.all(|point| sequence.add_point(point))
}

fn assemble<S: Utf>(mut points: impl Iterator<Item = S::Point>) -> UtfxResult<Codepoint> {
    let first = points.next().ok_or(UtfxError::InvalidSequence)?;
    let mut sequence = S::build(first).ok_or(UtfxError::InvalidSequence)?;
    for point in points {
        if !sequence.add_point(point) {
            return Err(UtfxError::InvalidSequence);
        }
    }
    if !sequence.is_valid() {
        return Err(UtfxError::InvalidSequence);
    }
    Ok(sequence.get_codepoint())
}
