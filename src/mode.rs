use std::{fmt, str::FromStr};

use crate::{
    error::{UtfxError, UtfxResult},
    utf::Endianness,
};

/// The codec and byte order selected for a [`Decoder`](crate::Decoder) or
/// [`Encoder`](crate::Encoder).
///
/// `None` and `Unknown` are placeholders: any decode or encode attempted in
/// either of them fails.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    None,
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    Unknown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Utf8,
    Utf16(Endianness),
    Utf32(Endianness),
}

impl Mode {
    pub const CODECS: [Mode; 5] = [
        Mode::Utf8,
        Mode::Utf16Le,
        Mode::Utf16Be,
        Mode::Utf32Le,
        Mode::Utf32Be,
    ];

    pub(crate) const fn format(self) -> UtfxResult<Format> {
        match self {
            Mode::None => Err(UtfxError::ModeNotSet),
            Mode::Unknown => Err(UtfxError::InvalidMode),
            Mode::Utf8 => Ok(Format::Utf8),
            Mode::Utf16Le => Ok(Format::Utf16(Endianness::LittleEndian)),
            Mode::Utf16Be => Ok(Format::Utf16(Endianness::BigEndian)),
            Mode::Utf32Le => Ok(Format::Utf32(Endianness::LittleEndian)),
            Mode::Utf32Be => Ok(Format::Utf32(Endianness::BigEndian)),
        }
    }

    pub const fn unit_len(self) -> Option<usize> {
        match self.format() {
            Ok(Format::Utf8) => Some(1),
            Ok(Format::Utf16(_)) => Some(2),
            Ok(Format::Utf32(_)) => Some(4),
            Err(_) => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Mode::None => "none",
            Mode::Utf8 => "utf-8",
            Mode::Utf16Le => "utf-16le",
            Mode::Utf16Be => "utf-16be",
            Mode::Utf32Le => "utf-32le",
            Mode::Utf32Be => "utf-32be",
            Mode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised mode label: {0}")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Accepts the labels written by `Display`, ignoring case and the
    /// separators `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Ok(Mode::Utf8),
            "utf16le" => Ok(Mode::Utf16Le),
            "utf16be" => Ok(Mode::Utf16Be),
            "utf32le" => Ok(Mode::Utf32Le),
            "utf32be" => Ok(Mode::Utf32Be),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}
