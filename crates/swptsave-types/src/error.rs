use crate::kind::ValueKind;

/// Errors raised by the kind registry and the value model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// No known kind has this type ID.
    #[error("unknown type id 0x{0:08x}")]
    UnknownType(u32),

    /// An array was requested without saying what it holds.
    #[error("array values need an item kind")]
    MissingItemKind,

    /// Arrays hold a single level of scalar, vector or color items.
    #[error("arrays of arrays are not supported by the save format")]
    NestedArray,

    /// A payload of the wrong kind was offered to a value.
    #[error("kind mismatch (expected {expected}, found {found})")]
    KindMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    /// An array item index was out of bounds.
    #[error("item index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A candidate type name hashes onto an ID that is already taken.
    #[error("type name {type_name:?} hashes to 0x{id:08x}, already used by {existing}")]
    IdCollision {
        type_name: String,
        id: u32,
        existing: ValueKind,
    },
}

pub type Result<T> = std::result::Result<T, ValueError>;
