//! Typed property values.
//!
//! A [`Value`] holds data of exactly one [`ValueKind`]. Arrays hold a single
//! level of items that all share the array's item kind; arrays of arrays do
//! not exist in the save format and cannot be constructed here.

use std::fmt;

use crate::error::{Result, ValueError};
use crate::kind::ValueKind;

/// Arrays with at most this many items are listed inline by
/// [`ArrayValue::display_string`].
const INLINE_DISPLAY_ITEMS: usize = 8;

/// A two-dimensional vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A three-dimensional vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A four-dimensional vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// A color in linear space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for LinearColor {
    /// Opaque magenta, the engine's "unset" color.
    fn default() -> Self {
        Self::new(1.0, 0.0, 1.0, 1.0)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl fmt::Display for LinearColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// The value of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Int32(i32),
    Single(f32),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    LinearColor(LinearColor),
    Array(ArrayValue),
}

impl Value {
    /// Default-valued instance of a kind, `None` for `Array`.
    pub(crate) fn default_of(kind: ValueKind) -> Option<Value> {
        let value = match kind {
            ValueKind::Array => return None,
            ValueKind::String => Value::String(String::new()),
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Int32 => Value::Int32(0),
            ValueKind::Single => Value::Single(0.0),
            ValueKind::Vector2 => Value::Vector2(Vector2::default()),
            ValueKind::Vector3 => Value::Vector3(Vector3::default()),
            ValueKind::Vector4 => Value::Vector4(Vector4::default()),
            ValueKind::LinearColor => Value::LinearColor(LinearColor::default()),
        };
        Some(value)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int32(_) => ValueKind::Int32,
            Value::Single(_) => ValueKind::Single,
            Value::Vector2(_) => ValueKind::Vector2,
            Value::Vector3(_) => ValueKind::Vector3,
            Value::Vector4(_) => ValueKind::Vector4,
            Value::LinearColor(_) => ValueKind::LinearColor,
            Value::Array(_) => ValueKind::Array,
        }
    }

    /// Kind label for editors, e.g. `"Integer Array"` for arrays.
    pub fn display_type(&self) -> String {
        match self {
            Value::Array(array) => format!("{} {}", array.item_kind(), ValueKind::Array),
            other => other.kind().display_name().to_string(),
        }
    }

    /// Replace the payload, keeping the kind.
    ///
    /// Arrays only accept arrays of the same item kind.
    pub fn set_data(&mut self, data: Value) -> Result<()> {
        check_same_shape(self, &data)?;
        *self = data;
        Ok(())
    }

    /// Deep copy of the payload, for undo snapshots.
    pub fn clone_data(&self) -> Value {
        self.clone()
    }

    /// Deep payload equality, recursing into array items.
    ///
    /// Floats compare by bit pattern, so an unchanged NaN equals itself.
    pub fn compare_data(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Single(a), Value::Single(b)) => same_bits(&[*a], &[*b]),
            (Value::Vector2(a), Value::Vector2(b)) => same_bits(&[a.x, a.y], &[b.x, b.y]),
            (Value::Vector3(a), Value::Vector3(b)) => {
                same_bits(&[a.x, a.y, a.z], &[b.x, b.y, b.z])
            }
            (Value::Vector4(a), Value::Vector4(b)) => {
                same_bits(&[a.x, a.y, a.z, a.w], &[b.x, b.y, b.z, b.w])
            }
            (Value::LinearColor(a), Value::LinearColor(b)) => {
                same_bits(&[a.r, a.g, a.b, a.a], &[b.r, b.g, b.b, b.a])
            }
            (Value::Array(a), Value::Array(b)) => {
                a.item_kind() == b.item_kind()
                    && a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.compare_data(y))
            }
            (a, b) => a == b,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Single(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int32(n) => write!(f, "{n}"),
            Value::Single(n) => write!(f, "{n}"),
            Value::Vector2(v) => write!(f, "{v}"),
            Value::Vector3(v) => write!(f, "{v}"),
            Value::Vector4(v) => write!(f, "{v}"),
            Value::LinearColor(c) => write!(f, "{c}"),
            Value::Array(array) => write!(f, "{} items", array.len()),
        }
    }
}

fn same_bits(a: &[f32], b: &[f32]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

fn check_same_shape(current: &Value, incoming: &Value) -> Result<()> {
    match (current, incoming) {
        (Value::Array(a), Value::Array(b)) if a.item_kind() != b.item_kind() => {
            Err(ValueError::KindMismatch {
                expected: a.item_kind(),
                found: b.item_kind(),
            })
        }
        (a, b) if a.kind() != b.kind() => Err(ValueError::KindMismatch {
            expected: a.kind(),
            found: b.kind(),
        }),
        _ => Ok(()),
    }
}

/// An ordered, homogeneous sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    item_kind: ValueKind,
    items: Vec<Value>,
}

impl ArrayValue {
    /// Empty array of `item_kind` items.
    pub fn new(item_kind: ValueKind) -> Result<Self> {
        if item_kind.is_array() {
            return Err(ValueError::NestedArray);
        }
        Ok(Self {
            item_kind,
            items: Vec::new(),
        })
    }

    /// Array pre-filled with `items`, all of which must be `item_kind`.
    pub fn with_items(item_kind: ValueKind, items: Vec<Value>) -> Result<Self> {
        let mut array = Self::new(item_kind)?;
        array.items.reserve(items.len());
        for item in items {
            array.push_item(item)?;
        }
        Ok(array)
    }

    pub fn item_kind(&self) -> ValueKind {
        self.item_kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// New default-valued item of this array's item kind, not yet inserted.
    pub fn create_item(&self) -> Value {
        match Value::default_of(self.item_kind) {
            Some(value) => value,
            // `new` never accepts an array item kind.
            None => unreachable!("array item kind is never Array"),
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    pub fn push_item(&mut self, item: Value) -> Result<()> {
        self.check_item(&item)?;
        self.items.push(item);
        Ok(())
    }

    pub fn insert_item(&mut self, index: usize, item: Value) -> Result<()> {
        if index > self.items.len() {
            return Err(self.out_of_range(index));
        }
        self.check_item(&item)?;
        self.items.insert(index, item);
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<Value> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.items.remove(index))
    }

    /// Replace the item at `index`, returning the old one.
    pub fn replace_item(&mut self, index: usize, item: Value) -> Result<Value> {
        self.check_item(&item)?;
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Position of the first item equal to `item`.
    pub fn index_of_item(&self, item: &Value) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Swap the item at `index` with its predecessor. No-op at the front.
    pub fn move_item_up(&mut self, index: usize) {
        if index >= 1 && index < self.items.len() {
            self.items.swap(index - 1, index);
        }
    }

    /// Swap the item at `index` with its successor. No-op at the back.
    pub fn move_item_down(&mut self, index: usize) {
        if index + 1 < self.items.len() {
            self.items.swap(index, index + 1);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Short summary: short arrays inline, long or empty ones by count.
    pub fn display_string(&self) -> String {
        if !self.items.is_empty() && self.items.len() <= INLINE_DISPLAY_ITEMS {
            self.items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            format!("{} Items", self.items.len())
        }
    }

    fn check_item(&self, item: &Value) -> Result<()> {
        if item.kind() != self.item_kind {
            return Err(ValueError::KindMismatch {
                expected: self.item_kind,
                found: item.kind(),
            });
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> ValueError {
        ValueError::IndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }
}

impl<'a> IntoIterator for &'a ArrayValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i32]) -> ArrayValue {
        ArrayValue::with_items(
            ValueKind::Int32,
            values.iter().copied().map(Value::Int32).collect(),
        )
        .unwrap()
    }

    #[test]
    fn nested_arrays_are_rejected() {
        assert_eq!(
            ArrayValue::new(ValueKind::Array),
            Err(ValueError::NestedArray)
        );
    }

    #[test]
    fn heterogeneous_items_are_rejected() {
        let mut array = ArrayValue::new(ValueKind::Int32).unwrap();
        assert_eq!(
            array.push_item(Value::Single(1.0)),
            Err(ValueError::KindMismatch {
                expected: ValueKind::Int32,
                found: ValueKind::Single,
            })
        );
        assert!(array.is_empty());
    }

    #[test]
    fn insert_remove_bounds() {
        let mut array = ints(&[1, 2]);
        array.insert_item(2, Value::Int32(3)).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(
            array.insert_item(5, Value::Int32(9)),
            Err(ValueError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(array.remove_item(0).unwrap(), Value::Int32(1));
        assert!(matches!(
            array.remove_item(2),
            Err(ValueError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn replace_item_keeps_kind() {
        let mut array = ints(&[1, 2]);
        assert_eq!(
            array.replace_item(1, Value::Int32(7)).unwrap(),
            Value::Int32(2)
        );
        assert!(array.replace_item(0, Value::Bool(true)).is_err());
        assert!(array.replace_item(9, Value::Int32(0)).is_err());
        assert_eq!(array, ints(&[1, 7]));
    }

    #[test]
    fn move_items() {
        let mut array = ints(&[1, 2, 3]);
        array.move_item_up(2);
        assert_eq!(array, ints(&[1, 3, 2]));
        array.move_item_down(0);
        assert_eq!(array, ints(&[3, 1, 2]));

        // Edges are no-ops.
        array.move_item_up(0);
        array.move_item_down(2);
        array.move_item_down(7);
        assert_eq!(array, ints(&[3, 1, 2]));
    }

    #[test]
    fn index_of_item_finds_first_match() {
        let array = ints(&[4, 5, 4]);
        assert_eq!(array.index_of_item(&Value::Int32(4)), Some(0));
        assert_eq!(array.index_of_item(&Value::Int32(6)), None);
    }

    #[test]
    fn create_item_uses_item_kind() {
        let array = ArrayValue::new(ValueKind::LinearColor).unwrap();
        assert_eq!(
            array.create_item(),
            Value::LinearColor(LinearColor::default())
        );
    }

    #[test]
    fn set_data_keeps_kind() {
        let mut value = Value::Int32(1);
        value.set_data(Value::Int32(5)).unwrap();
        assert_eq!(value, Value::Int32(5));
        assert_eq!(
            value.set_data(Value::String("x".into())),
            Err(ValueError::KindMismatch {
                expected: ValueKind::Int32,
                found: ValueKind::String,
            })
        );
        assert_eq!(value, Value::Int32(5));
    }

    #[test]
    fn set_data_on_array_requires_same_item_kind() {
        let mut value = Value::Array(ints(&[1]));
        value.set_data(Value::Array(ints(&[2, 3]))).unwrap();
        assert_eq!(value.as_array().map(ArrayValue::len), Some(2));

        let floats = ArrayValue::new(ValueKind::Single).unwrap();
        assert!(matches!(
            value.set_data(Value::Array(floats)),
            Err(ValueError::KindMismatch {
                expected: ValueKind::Int32,
                found: ValueKind::Single,
            })
        ));
    }

    #[test]
    fn clone_and_compare_are_deep() {
        let original = Value::Array(ints(&[1, 2, 3]));
        let mut snapshot = original.clone_data();
        assert!(original.compare_data(&snapshot));

        if let Some(array) = snapshot.as_array_mut() {
            array.replace_item(1, Value::Int32(20)).unwrap();
        }
        assert!(!original.compare_data(&snapshot));
        assert_eq!(original.as_array().map(ArrayValue::len), Some(3));
    }

    #[test]
    fn compare_data_treats_nan_as_unchanged() {
        let nan = Value::Single(f32::NAN);
        assert!(nan.compare_data(&nan.clone_data()));
        assert!(!nan.compare_data(&Value::Single(0.0)));

        let color = Value::LinearColor(LinearColor::new(f32::NAN, 0.0, 1.0, 1.0));
        assert!(color.compare_data(&color.clone_data()));

        let singles = ArrayValue::with_items(ValueKind::Single, vec![Value::Single(f32::NAN)])
            .unwrap();
        let array = Value::Array(singles);
        assert!(array.compare_data(&array.clone_data()));
        assert!(!array.compare_data(&Value::Array(ArrayValue::new(ValueKind::Single).unwrap())));
    }

    #[test]
    fn compare_data_distinguishes_signed_zero() {
        assert!(!Value::Single(0.0).compare_data(&Value::Single(-0.0)));
    }

    #[test]
    fn display_strings() {
        assert_eq!(Value::Vector2(Vector2::new(1.0, 2.5)).to_string(), "(1, 2.5)");
        assert_eq!(
            Value::LinearColor(LinearColor::default()).to_string(),
            "(1, 0, 1, 1)"
        );
        assert_eq!(Value::Array(ints(&[1, 2])).to_string(), "2 items");
        assert_eq!(ints(&[1, 2]).display_string(), "1, 2");
        assert_eq!(ints(&[]).display_string(), "0 Items");
        assert_eq!(ints(&[0; 9]).display_string(), "9 Items");
        assert_eq!(Value::Array(ints(&[])).display_type(), "Integer Array");
        assert_eq!(Value::Bool(true).display_type(), "Boolean");
    }
}
