use std::fmt;
use std::io;

use swptsave_frame::FrameError;
use swptsave_game::GameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const NOT_FOUND: i32 = 2;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::WriteZero | io::ErrorKind::StorageFull => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn game_error(context: &str, err: GameError) -> CliError {
    match err {
        GameError::Io { path, source } => {
            io_error(&format!("{context}: {}", path.display()), source)
        }
        GameError::Frame { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        GameError::NotFound(_) => CliError::new(NOT_FOUND, format!("{context}: {err}")),
        GameError::InvalidPath(_) => CliError::new(USAGE, format!("{context}: {err}")),
        GameError::IndexOutOfRange { .. } => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn io_kinds_map_to_exit_codes() {
        assert_eq!(io_error("x", io::ErrorKind::NotFound.into()).code, NOT_FOUND);
        assert_eq!(
            io_error("x", io::ErrorKind::PermissionDenied.into()).code,
            PERMISSION_DENIED
        );
        assert_eq!(io_error("x", io::ErrorKind::Other.into()).code, INTERNAL);
    }

    #[test]
    fn decode_failures_are_data_invalid() {
        let err = frame_error("decode", FrameError::InvalidMarker(0x01));
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("decode: "));

        let err = game_error(
            "load",
            GameError::Frame {
                path: PathBuf::from("a.txt"),
                source: FrameError::Truncated { buffered: 3 },
            },
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn missing_save_is_not_found() {
        let err = game_error("load", GameError::NotFound(PathBuf::from("Slot9")));
        assert_eq!(err.code, NOT_FOUND);
        assert!(err.message.contains("Slot9"));
    }
}
