//! Property framing for SWPT save files.
//!
//! A save file is a bare sequence of properties, each framed as:
//! - A `0x7E` prefix byte
//! - A one-byte name length and the ASCII name
//! - A 4-byte little-endian size covering everything after it
//! - An optional `0x53` array marker, then `0xFF` and the 4-byte type ID
//! - The value bytes and a `0x7B` postfix byte
//!
//! The size is patched in after the value is encoded, so writers never seek.

pub mod codec;
pub mod error;
pub mod reader;
pub mod value;
pub mod writer;

pub use codec::{
    decode_property, decode_property_from_slice, encode_property, encode_property_to_vec,
    CodecConfig, Property, ARRAY_MARKER, DEFAULT_MAX_ARRAY_LEN, DEFAULT_MAX_PROPERTY_SIZE,
    DEFAULT_MAX_STRING_LEN, MAX_NAME_LEN, PROPERTY_POSTFIX, PROPERTY_PREFIX, TYPE_MARKER,
};
pub use error::{FrameError, Result};
pub use reader::PropertyReader;
pub use value::{decode_array, decode_array_into, decode_value, encode_array, encode_value};
pub use writer::PropertyWriter;
