use swptsave_types::ValueError;

/// Errors that can occur during property encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A fixed marker byte (prefix, postfix, array body) had the wrong value.
    #[error("unexpected {what} byte 0x{found:02x} (expected 0x{expected:02x})")]
    UnexpectedByte {
        what: &'static str,
        expected: u8,
        found: u8,
    },

    /// The byte opening the payload is neither the array nor the type marker.
    #[error("invalid type marker 0x{0:02x}")]
    InvalidMarker(u8),

    /// The size field is negative or too small to hold a payload.
    #[error("invalid property size {0}")]
    InvalidSize(i32),

    /// The payload ended before the declared size was used up.
    #[error("property size mismatch (declared {declared} bytes, consumed {consumed})")]
    LengthMismatch { declared: usize, consumed: usize },

    /// A value needed more bytes than its payload holds.
    #[error("payload ended early (needed {needed} bytes, {remaining} left)")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// The stream ended in the middle of a property.
    #[error("stream ended inside a property ({buffered} bytes buffered)")]
    Truncated { buffered: usize },

    /// Bytes were left over after a single-property buffer was decoded.
    #[error("{0} trailing bytes after property")]
    TrailingBytes(usize),

    /// An array element count was negative.
    #[error("invalid array length {0}")]
    InvalidCount(i32),

    /// A string payload was malformed.
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// A property name is not ASCII or longer than 255 bytes.
    #[error("invalid property name: {0}")]
    InvalidName(String),

    /// The array type ID appeared without the array marker.
    #[error("array type id without array marker")]
    UnmarkedArray,

    /// A size read from the stream exceeds the configured limit.
    #[error("{what} of {size} exceeds limit of {max}")]
    LimitExceeded {
        what: &'static str,
        size: usize,
        max: usize,
    },

    /// Kind resolution or value construction failed.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// An I/O error occurred while reading or writing properties.
    #[error("property I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// True for structural violations of the byte layout.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            FrameError::UnexpectedByte { .. }
                | FrameError::InvalidMarker(_)
                | FrameError::InvalidSize(_)
                | FrameError::LengthMismatch { .. }
                | FrameError::UnexpectedEnd { .. }
                | FrameError::Truncated { .. }
                | FrameError::TrailingBytes(_)
                | FrameError::InvalidCount(_)
                | FrameError::InvalidString(_)
                | FrameError::InvalidName(_)
                | FrameError::UnmarkedArray
                | FrameError::LimitExceeded { .. }
                | FrameError::Value(ValueError::NestedArray)
        )
    }

    /// The type ID that could not be resolved, if that is what failed.
    pub fn unknown_type(&self) -> Option<u32> {
        match self {
            FrameError::Value(ValueError::UnknownType(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn is_unknown_type(&self) -> bool {
        self.unknown_type().is_some()
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
