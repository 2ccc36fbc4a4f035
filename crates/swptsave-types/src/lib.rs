//! Value kinds and the typed value model of the save format.
//!
//! Every property in a save file carries a 32-bit type ID. For all kinds but
//! `Array` the ID is the [`type_hash`] of the engine's type name, so the IDs
//! here must match the game bit-for-bit:
//!
//! - [`hash`]: the legacy type-name hash
//! - [`kind`]: the closed set of value kinds
//! - [`registry`]: the process-wide ID <-> kind table
//! - [`value`]: values, vectors, colors and single-level arrays

pub mod error;
pub mod hash;
pub mod kind;
pub mod registry;
pub mod value;

pub use error::{Result, ValueError};
pub use hash::{hash_code_units, type_hash};
pub use kind::{ValueKind, ARRAY_ID};
pub use registry::{KindEntry, TypeRegistry};
pub use value::{ArrayValue, LinearColor, Value, Vector2, Vector3, Vector4};
