//! Error types for the transcoding engine.

use thiserror::Error;

/// Failure of a decode, encode or bounded copy.
///
/// Every failure is local: the decoder or encoder that reported it keeps the
/// state it had before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtfxError {
    #[error("no mode has been set")]
    ModeNotSet,

    #[error("mode is unknown")]
    InvalidMode,

    #[error("invalid sequence")]
    InvalidSequence,

    #[error("buffer too small: {required} bytes required, {available} available")]
    BufferTooSmall { required: usize, available: usize },
}

pub type UtfxResult<T> = Result<T, UtfxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_not_set() {
        assert_eq!(UtfxError::ModeNotSet.to_string(), "no mode has been set");
    }

    #[test]
    fn invalid_mode() {
        assert_eq!(UtfxError::InvalidMode.to_string(), "mode is unknown");
    }

    #[test]
    fn buffer_too_small() {
        let err = UtfxError::BufferTooSmall {
            required: 4,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "buffer too small: 4 bytes required, 3 available"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<UtfxError>();
        assert_sync::<UtfxError>();
    }

    #[test]
    fn implements_std_error() {
        let err = UtfxError::InvalidSequence;
        let std_err: &dyn std::error::Error = &err;
        assert!(std_err.source().is_none());
    }
}
