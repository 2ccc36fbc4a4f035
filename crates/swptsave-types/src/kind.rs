//! Built-in value kinds.
//!
//! IDs are persisted in every save file and must never change. `Array` uses
//! a fixed ID; every other kind is identified by the hash of its engine type
//! name (see [`crate::hash`]).

use std::fmt;

use crate::error::Result;
use crate::registry::TypeRegistry;

/// Fixed type ID of the array kind. It doubles as the array marker byte.
pub const ARRAY_ID: u32 = 0x53;

/// The closed set of value kinds the save format knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Array,
    String,
    Bool,
    Int32,
    Single,
    Vector2,
    Vector3,
    Vector4,
    LinearColor,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 9] = [
        ValueKind::Array,
        ValueKind::String,
        ValueKind::Bool,
        ValueKind::Int32,
        ValueKind::Single,
        ValueKind::Vector2,
        ValueKind::Vector3,
        ValueKind::Vector4,
        ValueKind::LinearColor,
    ];

    /// Engine type name the kind's ID is hashed from. `None` for `Array`.
    pub fn type_name(self) -> Option<&'static str> {
        match self {
            ValueKind::Array => None,
            ValueKind::String => Some("System.String"),
            ValueKind::Bool => Some("System.Boolean"),
            ValueKind::Int32 => Some("System.Int32"),
            ValueKind::Single => Some("System.Single"),
            ValueKind::Vector2 => Some("UnityEngine.Vector2"),
            ValueKind::Vector3 => Some("UnityEngine.Vector3"),
            ValueKind::Vector4 => Some("UnityEngine.Vector4"),
            ValueKind::LinearColor => Some("UnityEngine.Color"),
        }
    }

    /// Human-readable name for editors.
    pub fn display_name(self) -> &'static str {
        match self {
            ValueKind::Array => "Array",
            ValueKind::String => "Text",
            ValueKind::Bool => "Boolean",
            ValueKind::Int32 => "Integer",
            ValueKind::Single => "Number",
            ValueKind::Vector2 => "2D Vector",
            ValueKind::Vector3 => "3D Vector",
            ValueKind::Vector4 => "4D Vector",
            ValueKind::LinearColor => "Color",
        }
    }

    /// Persisted type ID, looked up in the global registry.
    pub fn id(self) -> u32 {
        TypeRegistry::global().id_of(self)
    }

    /// Resolve a persisted type ID through the global registry.
    pub fn from_id(id: u32) -> Result<Self> {
        TypeRegistry::global().resolve(id)
    }

    pub fn is_array(self) -> bool {
        self == ValueKind::Array
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
