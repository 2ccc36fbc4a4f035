use std::fmt;

use bytes::{Buf, BufMut, BytesMut};
use swptsave_types::{TypeRegistry, Value, ValueKind};

use crate::error::{FrameError, Result};
use crate::value::{decode_array, decode_value, encode_value, need};

/// First byte of every property.
pub const PROPERTY_PREFIX: u8 = 0x7E;

/// Last byte of every property.
pub const PROPERTY_POSTFIX: u8 = 0x7B;

/// Opens the payload of an array property, followed by [`TYPE_MARKER`].
pub const ARRAY_MARKER: u8 = 0x53;

/// Precedes the 4-byte type ID.
pub const TYPE_MARKER: u8 = 0xFF;

/// Longest property name the one-byte length prefix can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Smallest possible payload: type marker + type ID + postfix.
pub const MIN_PAYLOAD_SIZE: usize = 1 + 4 + 1;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PROPERTY_SIZE: usize = 16 * 1024 * 1024;

/// Default maximum array element count.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1024 * 1024;

/// Default maximum string length in bytes: 16 MiB.
pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// A named value, the unit a save file is made of.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Limits applied while decoding untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest accepted property size field. Default: 16 MiB.
    pub max_property_size: usize,
    /// Largest accepted array element count.
    pub max_array_len: usize,
    /// Largest accepted string byte length. Default: 16 MiB.
    pub max_string_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_property_size: DEFAULT_MAX_PROPERTY_SIZE,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}

/// Encode a property into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────┬──────────┬──────────┬─────────────────────────────────────────────┐
/// │ 0x7E │ Name     │ Size     │ Payload (Size bytes)                        │
/// │      │ (1B len  │ (4B LE)  │ [0x53] 0xFF │ Type ID │ Value   │ 0x7B      │
/// │      │ + ASCII) │          │             │ (4B LE) │         │           │
/// └──────┴──────────┴──────────┴─────────────────────────────────────────────┘
/// ```
///
/// The leading `0x53` is present only for arrays, whose type ID is that of
/// their items. Size is patched in once the payload is written. On error
/// `dst` is left as it was.
pub fn encode_property(property: &Property, dst: &mut BytesMut) -> Result<()> {
    let mark = dst.len();
    let result = encode_property_inner(property, dst);
    if result.is_err() {
        dst.truncate(mark);
    }
    result
}

fn encode_property_inner(property: &Property, dst: &mut BytesMut) -> Result<()> {
    let name = validate_name(&property.name)?;
    let registry = TypeRegistry::global();

    dst.put_u8(PROPERTY_PREFIX);
    dst.put_u8(name.len() as u8);
    dst.put_slice(name);

    let size_at = dst.len();
    dst.put_i32_le(0); // size placeholder
    let payload_start = dst.len();

    match &property.value {
        Value::Array(array) => {
            dst.put_u8(ARRAY_MARKER);
            dst.put_u8(TYPE_MARKER);
            dst.put_u32_le(registry.id_of(array.item_kind()));
        }
        other => {
            dst.put_u8(TYPE_MARKER);
            dst.put_u32_le(registry.id_of(other.kind()));
        }
    }
    encode_value(&property.value, dst)?;
    dst.put_u8(PROPERTY_POSTFIX);

    let payload_len = dst.len() - payload_start;
    let size = i32::try_from(payload_len).map_err(|_| FrameError::LimitExceeded {
        what: "property size",
        size: payload_len,
        max: i32::MAX as usize,
    })?;
    dst[size_at..payload_start].copy_from_slice(&size.to_le_bytes());
    Ok(())
}

/// Decode a property from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete property yet.
/// On success, consumes the property bytes from the buffer.
pub fn decode_property(src: &mut BytesMut, config: &CodecConfig) -> Result<Option<Property>> {
    if src.is_empty() {
        return Ok(None);
    }

    if src[0] != PROPERTY_PREFIX {
        return Err(FrameError::UnexpectedByte {
            what: "property prefix",
            expected: PROPERTY_PREFIX,
            found: src[0],
        });
    }

    if src.len() < 2 {
        return Ok(None);
    }
    let name_len = src[1] as usize;
    let header_len = 2 + name_len + 4;
    if src.len() < header_len {
        return Ok(None);
    }

    let size_field: [u8; 4] = [
        src[header_len - 4],
        src[header_len - 3],
        src[header_len - 2],
        src[header_len - 1],
    ];
    let size = i32::from_le_bytes(size_field);
    let payload_len = usize::try_from(size).map_err(|_| FrameError::InvalidSize(size))?;
    if payload_len < MIN_PAYLOAD_SIZE {
        return Err(FrameError::InvalidSize(size));
    }
    if payload_len > config.max_property_size {
        return Err(FrameError::LimitExceeded {
            what: "property size",
            size: payload_len,
            max: config.max_property_size,
        });
    }

    let total = header_len + payload_len;
    if src.len() < total {
        return Ok(None);
    }

    let name = parse_name(&src[2..2 + name_len])?;
    let value = decode_payload(&src[header_len..total], config)?;
    src.advance(total);

    Ok(Some(Property { name, value }))
}

/// Decode the bytes covered by a property's size field.
fn decode_payload(mut payload: &[u8], config: &CodecConfig) -> Result<Value> {
    let declared = payload.len();

    need(&payload, 1)?;
    let is_array = match payload.get_u8() {
        ARRAY_MARKER => {
            need(&payload, 1)?;
            let found = payload.get_u8();
            if found != TYPE_MARKER {
                return Err(FrameError::UnexpectedByte {
                    what: "type marker",
                    expected: TYPE_MARKER,
                    found,
                });
            }
            true
        }
        TYPE_MARKER => false,
        other => return Err(FrameError::InvalidMarker(other)),
    };

    need(&payload, 4)?;
    let kind = TypeRegistry::global().resolve(payload.get_u32_le())?;

    let value = if is_array {
        Value::Array(decode_array(kind, &mut payload, config)?)
    } else {
        decode_value(kind, &mut payload, config)?
    };

    need(&payload, 1)?;
    let postfix = payload.get_u8();
    if postfix != PROPERTY_POSTFIX {
        return Err(FrameError::UnexpectedByte {
            what: "property postfix",
            expected: PROPERTY_POSTFIX,
            found: postfix,
        });
    }

    if !payload.is_empty() {
        return Err(FrameError::LengthMismatch {
            declared,
            consumed: declared - payload.len(),
        });
    }

    Ok(value)
}

/// Encode a single property into its own buffer, e.g. for a clipboard.
pub fn encode_property_to_vec(property: &Property) -> Result<Vec<u8>> {
    let mut buf = BytesMut::new();
    encode_property(property, &mut buf)?;
    Ok(buf.to_vec())
}

/// Decode a buffer holding exactly one property.
pub fn decode_property_from_slice(bytes: &[u8], config: &CodecConfig) -> Result<Property> {
    let mut buf = BytesMut::from(bytes);
    match decode_property(&mut buf, config)? {
        Some(_) if !buf.is_empty() => Err(FrameError::TrailingBytes(buf.len())),
        Some(property) => Ok(property),
        None => Err(FrameError::Truncated {
            buffered: bytes.len(),
        }),
    }
}

fn validate_name(name: &str) -> Result<&[u8]> {
    if !name.is_ascii() {
        return Err(FrameError::InvalidName(format!("{name:?} is not ASCII")));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(FrameError::InvalidName(format!(
            "{} bytes long (max {MAX_NAME_LEN})",
            name.len()
        )));
    }
    Ok(name.as_bytes())
}

fn parse_name(bytes: &[u8]) -> Result<String> {
    if !bytes.is_ascii() {
        return Err(FrameError::InvalidName(format!(
            "non-ASCII bytes {:02x?}",
            bytes
        )));
    }
    Ok(bytes.iter().map(|&b| b as char).collect())
}
