use crate::{
    decoder::Decoder,
    encoder::Encoder,
    error::{UtfxError, UtfxResult},
    mode::Mode,
    utf::Codepoint,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub consumed: usize,
    pub written: usize,
}

/// A decoder feeding an encoder.
///
/// Each [`write`](Self::write) transcodes exactly one unit of input, and the
/// result must be collected with [`read`](Self::read) before the next write
/// replaces it.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    decoder: Decoder,
    encoder: Encoder,
    unread: bool,
}

impl Converter {
    pub const fn new() -> Self {
        Self {
            decoder: Decoder::new(),
            encoder: Encoder::new(),
            unread: false,
        }
    }

    pub const fn with_modes(decoder_mode: Mode, encoder_mode: Mode) -> Self {
        Self {
            decoder: Decoder::with_mode(decoder_mode),
            encoder: Encoder::with_mode(encoder_mode),
            unread: false,
        }
    }

    pub const fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut Decoder {
        &mut self.decoder
    }

    pub const fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut Encoder {
        &mut self.encoder
    }

    pub const fn decoder_mode(&self) -> Mode {
        self.decoder.mode()
    }

    pub const fn encoder_mode(&self) -> Mode {
        self.encoder.mode()
    }

    pub fn set_decoder_mode(&mut self, mode: Mode) {
        self.decoder.set_mode(mode);
    }

    pub fn set_encoder_mode(&mut self, mode: Mode) {
        self.encoder.set_mode(mode);
    }

    pub const fn has_pending(&self) -> bool {
        self.unread
    }

    /// Decodes one unit from `src` and re-encodes it. Returns the number of
    /// source bytes that unit occupied.
    ///
    /// Nothing is consumed on failure. A codepoint that decodes but cannot
    /// be encoded also counts as a failure.
    pub fn try_write(&mut self, src: &[u8]) -> UtfxResult<usize> {
        let mut decoder = self.decoder.clone();
        let (codepoint, consumed) = decoder.decode_next(src)?;
        self.encoder.encode(codepoint)?;
        self.decoder = decoder;
        self.unread = true;
        Ok(consumed)
    }

    /// Encodes `codepoint` as if it had been decoded from the input, e.g. to
    /// stand in for a unit that failed to decode.
    pub fn write_codepoint(&mut self, codepoint: Codepoint) -> UtfxResult<()> {
        self.encoder.encode(codepoint)?;
        self.unread = true;
        Ok(())
    }

    pub fn write(&mut self, src: &[u8]) -> usize {
        self.try_write(src).unwrap_or(0)
    }

    /// Copies the pending output of the last write into `dst`. Returns `0`
    /// if nothing is pending or `dst` cannot hold it; in the latter case the
    /// output stays pending.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        if !self.unread {
            return 0;
        }
        match self.encoder.copy_output_bounded(dst, dst.len()) {
            Ok(written) => {
                self.unread = false;
                written
            }
            Err(_) => 0,
        }
    }

    /// Transcodes as much of `src` into `dst` as fits, one unit at a time.
    ///
    /// Output left pending by an earlier call is flushed first. A unit whose
    /// output does not fit in the remaining space is consumed and stays
    /// pending for the next call. An error is returned only when the call
    /// made no progress at all; otherwise the progress so far is returned
    /// and the same error shows up on the next call.
    pub fn convert(&mut self, src: &[u8], dst: &mut [u8]) -> UtfxResult<Progress> {
        let mut progress = Progress::default();
        if self.unread {
            progress.written = self.read(dst);
            if self.unread {
                return Err(UtfxError::BufferTooSmall {
                    required: self.encoder.output_length(),
                    available: dst.len(),
                });
            }
        }
        while progress.consumed < src.len() {
            match self.try_write(&src[progress.consumed..]) {
                Ok(consumed) => progress.consumed += consumed,
                Err(error) if progress == Progress::default() => return Err(error),
                Err(_) => break,
            }
            let written = self.read(&mut dst[progress.written..]);
            progress.written += written;
            if self.unread {
                break;
            }
        }
        Ok(progress)
    }
}
