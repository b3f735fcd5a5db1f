//! Incremental transcoding between UTF-8, UTF-16 and UTF-32.
//!
//! A [`Decoder`] turns one byte sequence into a codepoint, an [`Encoder`]
//! turns one codepoint into bytes, and a [`Converter`] chains the two so
//! text can be streamed through one unit at a time without allocating.

mod converter;
mod decoder;
mod encoder;
mod error;
mod mode;
pub mod utf;

use std::{ffi::OsString, io::Write, path::PathBuf};

use itertools::Itertools;

pub use converter::{Converter, Progress};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{UtfxError, UtfxResult};
pub use mode::{Mode, ParseModeError};
pub use utf::Codepoint;

use utf::REPLACEMENT_CHARACTER;

pub const USAGE: &str = "utfx [--hex] [--replace] <from> <to> [file]";

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("usage: {}", USAGE)]
    Usage,
    #[error(transparent)]
    Mode(#[from] ParseModeError),
    #[error("{mode} input at byte {offset}: {source}")]
    Input {
        mode: Mode,
        offset: usize,
        source: UtfxError,
    },
    #[error("{mode} output: {source}")]
    Output { mode: Mode, source: UtfxError },
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    from: Mode,
    to: Mode,
    hex: bool,
    replace: bool,
    path: Option<PathBuf>,
}

impl Options {
    fn parse(argv: Vec<OsString>) -> Result<Self, TranscodeError> {
        let mut hex = false;
        let mut replace = false;
        let mut positional = Vec::new();
        for argument in argv {
            match argument.to_str() {
                Some("--hex") => hex = true,
                Some("--replace") => replace = true,
                Some(flag) if flag.starts_with("--") => return Err(TranscodeError::Usage),
                _ => positional.push(argument),
            }
        }
        let mut positional = positional.into_iter();
        let (Some(from), Some(to)) = (positional.next(), positional.next()) else {
            return Err(TranscodeError::Usage);
        };
        let path = positional.next().map(PathBuf::from);
        if positional.next().is_some() {
            return Err(TranscodeError::Usage);
        }
        Ok(Self {
            from: from.to_string_lossy().parse()?,
            to: to.to_string_lossy().parse()?,
            hex,
            replace,
            path,
        })
    }
}

/// Transcodes a file (or stdin) between two modes and writes the result to
/// `output`, either raw or as space separated hex bytes.
///
/// `argv` holds the arguments without the program name.
pub fn transcode(
    argv: Vec<OsString>,
    output: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::parse(argv)?;
    let input = match &options.path {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buffer = Vec::new();
            std::io::Read::read_to_end(&mut std::io::stdin().lock(), &mut buffer)?;
            buffer
        }
    };
    log::debug!(
        "transcoding {} bytes from {} to {}",
        input.len(),
        options.from,
        options.to
    );
    let transcoded = transcode_bytes(&options, &input)?;
    if options.hex {
        writeln!(output, "{:02X}", transcoded.iter().format(" "))?;
    } else {
        output.write_all(&transcoded)?;
    }
    output.flush()?;
    Ok(())
}

fn transcode_bytes(options: &Options, input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let mut converter = Converter::with_modes(options.from, options.to);
    let mut transcoded = Vec::with_capacity(input.len());
    let mut chunk = [0; 4096];
    let mut offset = 0;
    while offset < input.len() || converter.has_pending() {
        match converter.convert(&input[offset..], &mut chunk) {
            Ok(progress) => {
                offset += progress.consumed;
                transcoded.extend_from_slice(&chunk[..progress.written]);
            }
            Err(source) if !options.replace => {
                return Err(TranscodeError::Input {
                    mode: options.from,
                    offset,
                    source,
                })
            }
            Err(source) => {
                // One code unit, unless the rest is a cut-off sequence.
                let rest = &input[offset..];
                let skipped = if converter.decoder().is_truncated(rest) {
                    rest.len()
                } else {
                    options.from.unit_len().unwrap_or(1).min(rest.len())
                };
                log::warn!(
                    "replacing {} undecodable bytes at offset {}: {}",
                    skipped,
                    offset,
                    source
                );
                offset += skipped;
                converter
                    .write_codepoint(REPLACEMENT_CHARACTER)
                    .map_err(|source| TranscodeError::Output {
                        mode: options.to,
                        source,
                    })?;
            }
        }
    }
    Ok(transcoded)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use crate::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(name: &str, contents: &[u8]) -> Self {
            let path = std::env::temp_dir().join(format!("utfx-{}-{name}", std::process::id()));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }

        fn as_str(&self) -> &str {
            self.0.to_str().unwrap()
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn run(argv: &[&str]) -> Result<Vec<u8>, String> {
        let mut output = Vec::new();
        transcode(args(argv), &mut output).map_err(|error| error.to_string())?;
        Ok(output)
    }

    #[test]
    fn no_args() {
        assert!(run(&[]).is_err());
        assert!(run(&["utf-8"]).is_err());
    }

    #[test]
    fn bad_mode() {
        let error = run(&["utf-8", "latin1", "foo"]).unwrap_err();
        assert!(error.contains("latin1"));
    }

    #[test]
    fn unknown_flag() {
        assert!(run(&["--fast", "utf-8", "utf-16le"]).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(run(&["utf-8", "utf-16le", "./no/such/file"]).is_err());
    }

    #[test]
    fn parses_options() {
        let options = Options::parse(args(&["--hex", "UTF8", "utf_32_be", "in.txt"])).unwrap();
        assert_eq!(
            options,
            Options {
                from: Mode::Utf8,
                to: Mode::Utf32Be,
                hex: true,
                replace: false,
                path: Some(PathBuf::from("in.txt")),
            }
        );
        assert!(Options::parse(args(&["utf-8", "utf-8", "a", "b"])).is_err());
    }

    #[test]
    fn utf8_to_utf16le() {
        let path = TempFile::new("utf16le", "A😀".as_bytes());
        assert_eq!(
            run(&["utf-8", "utf-16le", path.as_str()]),
            Ok(vec![0x41, 0x00, 0x3D, 0xD8, 0x00, 0xDE])
        );
    }

    #[test]
    fn hex_output() {
        let path = TempFile::new("hex", &[0x00, 0x00, 0x20, 0xAC]);
        assert_eq!(
            run(&["--hex", "utf-32be", "utf-16be", path.as_str()]),
            Ok(b"20 AC\n".to_vec())
        );
    }

    #[test]
    fn large_input_crosses_chunks() {
        let text = "€".repeat(5000);
        let path = TempFile::new("large", text.as_bytes());
        let expected: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        assert_eq!(run(&["utf-8", "utf-16be", path.as_str()]), Ok(expected));
    }

    #[test]
    fn invalid_input_reports_offset() {
        let path = TempFile::new("invalid", &[0x41, 0x42, 0xFF, 0x43]);
        let error = run(&["utf-8", "utf-32le", path.as_str()]).unwrap_err();
        assert_eq!(error, "utf-8 input at byte 2: invalid sequence");
    }

    #[test]
    fn replace_invalid_input() {
        let path = TempFile::new("replace", &[0x41, 0xFF, 0x42, 0xE2, 0x82]);
        assert_eq!(
            run(&["--replace", "utf-8", "utf-16be", path.as_str()]),
            Ok(vec![0x00, 0x41, 0xFF, 0xFD, 0x00, 0x42, 0xFF, 0xFD])
        );
    }

    #[test]
    fn replace_keeps_bytes_after_short_sequence() {
        let path = TempFile::new("short-lead", &[0x78, 0xE2, 0x41]);
        assert_eq!(
            run(&["--replace", "utf-8", "utf-8", path.as_str()]),
            Ok(vec![0x78, 0xEF, 0xBF, 0xBD, 0x41])
        );
        let path = TempFile::new("short-four", &[0xF0, 0x41, 0x42]);
        assert_eq!(
            run(&["--replace", "utf-8", "utf-8", path.as_str()]),
            Ok(vec![0xEF, 0xBF, 0xBD, 0x41, 0x42])
        );
    }

    #[test]
    fn replace_truncated_tail_once() {
        let path = TempFile::new("tail", &[0x41, 0xF0, 0x9F, 0x98]);
        assert_eq!(
            run(&["--replace", "utf-8", "utf-16le", path.as_str()]),
            Ok(vec![0x41, 0x00, 0xFD, 0xFF])
        );
    }

    #[test]
    fn temp_files_are_removed() {
        let path = TempFile::new("cleanup", b"A");
        let location = path.0.clone();
        assert!(location.exists());
        drop(path);
        assert!(!location.exists());
    }

    #[test]
    fn replace_lone_surrogate() {
        let path = TempFile::new("surrogate", &[0x00, 0xDC, 0x41, 0x00]);
        assert_eq!(
            run(&["--replace", "utf-16le", "utf-8", path.as_str()]),
            Ok(vec![0xEF, 0xBF, 0xBD, 0x41])
        );
    }
}
