//! Per-kind payload encoding.
//!
//! Numbers are little-endian, floats IEEE-754 single precision. Booleans are
//! one byte. Strings are a 7-bit variable-length byte count followed by UTF-8.
//! Array bodies are a zero byte, an element count, then the bare items.

use bytes::{Buf, BufMut, BytesMut};
use swptsave_types::{
    ArrayValue, LinearColor, Value, ValueError, ValueKind, Vector2, Vector3, Vector4,
};

use crate::codec::CodecConfig;
use crate::error::{FrameError, Result};

/// First byte of every array body.
pub const ARRAY_BODY_MARKER: u8 = 0x00;

/// A 32-bit 7-bit-encoded integer takes at most five bytes.
const MAX_VARINT_BYTES: usize = 5;

/// Encode a value's payload (no type tag).
pub fn encode_value(value: &Value, dst: &mut BytesMut) -> Result<()> {
    match value {
        Value::String(s) => put_string(s, dst)?,
        Value::Bool(b) => dst.put_u8(u8::from(*b)),
        Value::Int32(n) => dst.put_i32_le(*n),
        Value::Single(n) => dst.put_f32_le(*n),
        Value::Vector2(v) => {
            dst.put_f32_le(v.x);
            dst.put_f32_le(v.y);
        }
        Value::Vector3(v) => {
            dst.put_f32_le(v.x);
            dst.put_f32_le(v.y);
            dst.put_f32_le(v.z);
        }
        Value::Vector4(v) => {
            dst.put_f32_le(v.x);
            dst.put_f32_le(v.y);
            dst.put_f32_le(v.z);
            dst.put_f32_le(v.w);
        }
        Value::LinearColor(c) => {
            dst.put_f32_le(c.r);
            dst.put_f32_le(c.g);
            dst.put_f32_le(c.b);
            dst.put_f32_le(c.a);
        }
        Value::Array(array) => encode_array(array, dst)?,
    }
    Ok(())
}

/// Encode an array body: marker, count, then each item without a type tag.
pub fn encode_array(array: &ArrayValue, dst: &mut BytesMut) -> Result<()> {
    let count = i32::try_from(array.len()).map_err(|_| FrameError::LimitExceeded {
        what: "array length",
        size: array.len(),
        max: i32::MAX as usize,
    })?;

    dst.put_u8(ARRAY_BODY_MARKER);
    dst.put_i32_le(count);
    for item in array {
        if item.kind().is_array() {
            return Err(ValueError::NestedArray.into());
        }
        encode_value(item, dst)?;
    }
    Ok(())
}

/// Decode the payload of a non-array kind.
///
/// Array payloads carry their item kind in the property header instead;
/// decode those with [`decode_array`].
pub fn decode_value(kind: ValueKind, src: &mut &[u8], config: &CodecConfig) -> Result<Value> {
    let value = match kind {
        ValueKind::Array => return Err(FrameError::UnmarkedArray),
        ValueKind::String => Value::String(get_string(src, config)?),
        ValueKind::Bool => {
            need(src, 1)?;
            Value::Bool(src.get_u8() != 0)
        }
        ValueKind::Int32 => {
            need(src, 4)?;
            Value::Int32(src.get_i32_le())
        }
        ValueKind::Single => {
            need(src, 4)?;
            Value::Single(src.get_f32_le())
        }
        ValueKind::Vector2 => {
            need(src, 8)?;
            Value::Vector2(Vector2::new(src.get_f32_le(), src.get_f32_le()))
        }
        ValueKind::Vector3 => {
            need(src, 12)?;
            Value::Vector3(Vector3::new(
                src.get_f32_le(),
                src.get_f32_le(),
                src.get_f32_le(),
            ))
        }
        ValueKind::Vector4 => {
            need(src, 16)?;
            Value::Vector4(Vector4::new(
                src.get_f32_le(),
                src.get_f32_le(),
                src.get_f32_le(),
                src.get_f32_le(),
            ))
        }
        ValueKind::LinearColor => {
            need(src, 16)?;
            Value::LinearColor(LinearColor::new(
                src.get_f32_le(),
                src.get_f32_le(),
                src.get_f32_le(),
                src.get_f32_le(),
            ))
        }
    };
    Ok(value)
}

/// Decode an array body of `item_kind` items.
pub fn decode_array(
    item_kind: ValueKind,
    src: &mut &[u8],
    config: &CodecConfig,
) -> Result<ArrayValue> {
    let mut array = ArrayValue::new(item_kind)?;
    decode_array_into(&mut array, src, config)?;
    Ok(array)
}

/// Decode an array body into `array`, replacing whatever it held.
pub fn decode_array_into(
    array: &mut ArrayValue,
    src: &mut &[u8],
    config: &CodecConfig,
) -> Result<()> {
    array.clear();

    need(src, 1)?;
    let marker = src.get_u8();
    if marker != ARRAY_BODY_MARKER {
        return Err(FrameError::UnexpectedByte {
            what: "array body",
            expected: ARRAY_BODY_MARKER,
            found: marker,
        });
    }

    need(src, 4)?;
    let count = src.get_i32_le();
    let count = usize::try_from(count).map_err(|_| FrameError::InvalidCount(count))?;
    if count > config.max_array_len {
        return Err(FrameError::LimitExceeded {
            what: "array length",
            size: count,
            max: config.max_array_len,
        });
    }

    // Every item takes at least one byte, so never reserve past the input.
    array.reserve(count.min(src.remaining()));
    for _ in 0..count {
        let item = decode_value(array.item_kind(), src, config)?;
        array.push_item(item)?;
    }
    Ok(())
}

fn put_string(value: &str, dst: &mut BytesMut) -> Result<()> {
    let len = u32::try_from(value.len())
        .ok()
        .filter(|len| *len <= i32::MAX as u32)
        .ok_or(FrameError::LimitExceeded {
            what: "string length",
            size: value.len(),
            max: i32::MAX as usize,
        })?;
    put_7bit_int(len, dst);
    dst.put_slice(value.as_bytes());
    Ok(())
}

fn get_string(src: &mut &[u8], config: &CodecConfig) -> Result<String> {
    let len = get_7bit_int(src)? as usize;
    if len > config.max_string_len {
        return Err(FrameError::LimitExceeded {
            what: "string length",
            size: len,
            max: config.max_string_len,
        });
    }
    need(src, len)?;
    let bytes = src[..len].to_vec();
    src.advance(len);
    String::from_utf8(bytes).map_err(|err| FrameError::InvalidString(err.to_string()))
}

pub(crate) fn put_7bit_int(mut value: u32, dst: &mut BytesMut) {
    while value >= 0x80 {
        dst.put_u8((value as u8) | 0x80);
        value >>= 7;
    }
    dst.put_u8(value as u8);
}

pub(crate) fn get_7bit_int(src: &mut &[u8]) -> Result<u32> {
    let mut value = 0u32;
    for i in 0..MAX_VARINT_BYTES {
        need(src, 1)?;
        let byte = src.get_u8();
        if i == MAX_VARINT_BYTES - 1 && byte > 0x07 {
            // Bit 31 or beyond: negative or wider than 32 bits.
            return Err(FrameError::InvalidString(
                "length prefix out of range".to_string(),
            ));
        }
        value |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(FrameError::InvalidString(
        "length prefix longer than 5 bytes".to_string(),
    ))
}

pub(crate) fn need(src: &&[u8], needed: usize) -> Result<()> {
    if src.len() < needed {
        return Err(FrameError::UnexpectedEnd {
            needed,
            remaining: src.len(),
        });
    }
    Ok(())
}
