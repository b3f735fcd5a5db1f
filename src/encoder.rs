use crate::{
    error::{UtfxError, UtfxResult},
    mode::{Format, Mode},
    utf::{
        is_valid_codepoint, utf16sequence::Utf16Sequence, utf32sequence::Utf32Sequence,
        utf8sequence::Utf8Sequence, Codepoint, Utf, MAX_SEQUENCE_LEN,
    },
};

/// Turns codepoints into raw bytes in the selected mode.
///
/// The bytes of the last successful encode stay pending until the next one
/// replaces them.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    mode: Mode,
    pending: [u8; MAX_SEQUENCE_LEN],
    pending_length: u8,
}

impl Encoder {
    pub const fn new() -> Self {
        Self::with_mode(Mode::None)
    }

    pub const fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            pending: [0; MAX_SEQUENCE_LEN],
            pending_length: 0,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Encodes `codepoint` and makes its bytes the pending output. Returns
    /// the number of bytes produced.
    ///
    /// Surrogates and values above `0x10FFFF` are rejected in every mode.
    /// On failure the pending output is left as it was.
    pub fn encode(&mut self, codepoint: Codepoint) -> UtfxResult<usize> {
        let format = self.mode.format()?;
        if !is_valid_codepoint(codepoint) {
            log::debug!("{} encoder: U+{:04X} is not a scalar value", self.mode, codepoint);
            return Err(UtfxError::InvalidSequence);
        }
        let mut bytes = [0; MAX_SEQUENCE_LEN];
        let length = match format {
            Format::Utf8 => {
                let sequence = Utf8Sequence::encode(codepoint).ok_or(UtfxError::InvalidSequence)?;
                let encoded = sequence.as_bytes();
                bytes[..encoded.len()].copy_from_slice(encoded);
                encoded.len()
            }
            Format::Utf16(endianness) => {
                let sequence =
                    Utf16Sequence::encode(codepoint).ok_or(UtfxError::InvalidSequence)?;
                for (chunk, &unit) in bytes.chunks_exact_mut(2).zip(sequence.units()) {
                    chunk.copy_from_slice(&endianness.write_u16(unit));
                }
                sequence.units().len() * 2
            }
            Format::Utf32(endianness) => {
                let sequence =
                    Utf32Sequence::encode(codepoint).ok_or(UtfxError::InvalidSequence)?;
                bytes = sequence.to_bytes(endianness);
                MAX_SEQUENCE_LEN
            }
        };
        self.pending = bytes;
        self.pending_length = length as u8;
        log::trace!("{} encoder: U+{:04X} into {:02X?}", self.mode, codepoint, self.output());
        Ok(length)
    }

    pub fn output(&self) -> &[u8] {
        &self.pending[..self.output_length()]
    }

    pub const fn output_length(&self) -> usize {
        self.pending_length as usize
    }

    /// Copies the pending bytes to the start of `dst`.
    ///
    /// # Panics
    /// Panics if `dst` is shorter than [`output_length`](Self::output_length).
    pub fn copy_output(&self, dst: &mut [u8]) -> usize {
        let output = self.output();
        dst[..output.len()].copy_from_slice(output);
        output.len()
    }

    /// Copies the pending bytes into `dst`, treating `dst_capacity` (or the
    /// length of `dst`, if smaller) as the space available.
    pub fn copy_output_bounded(&self, dst: &mut [u8], dst_capacity: usize) -> UtfxResult<usize> {
        let available = dst_capacity.min(dst.len());
        if available < self.output_length() {
            log::debug!(
                "{} encoder: {} pending bytes do not fit in {}",
                self.mode,
                self.output_length(),
                available
            );
            return Err(UtfxError::BufferTooSmall {
                required: self.output_length(),
                available,
            });
        }
        Ok(self.copy_output(&mut dst[..available]))
    }
}
