use std::path::PathBuf;

use swptsave_frame::FrameError;

/// Errors that can occur while loading, editing or saving save files.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A file's contents could not be decoded or encoded.
    #[error("{}: {source}", path.display())]
    Frame {
        path: PathBuf,
        #[source]
        source: FrameError,
    },

    /// A file could not be opened, created, read or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory is unreadable or holds no loadable save file.
    #[error("no save files found in {}", .0.display())]
    NotFound(PathBuf),

    /// The path has no file name to carry over to another directory.
    #[error("path has no file name: {}", .0.display())]
    InvalidPath(PathBuf),

    /// A property index was outside the file's property list.
    #[error("property index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl GameError {
    /// Attach `path` to a frame error, lifting I/O failures to [`GameError::Io`].
    pub(crate) fn from_frame(path: &std::path::Path, err: FrameError) -> Self {
        match err {
            FrameError::Io(source) => GameError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => GameError::Frame {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        GameError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The underlying frame error, if decoding or encoding failed.
    pub fn frame_error(&self) -> Option<&FrameError> {
        match self {
            GameError::Frame { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
