use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;
use swptsave_types::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(out: &T) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn type_id_hex(id: u32) -> String {
    format!("0x{id:08X}")
}

/// One-line rendering for tables; long arrays collapse to a count.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Array(array) => array.display_string(),
        other => other.to_string(),
    }
}

pub fn value_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Bool(b) => json!(b),
        Value::Int32(n) => json!(n),
        Value::Single(n) => json!(n),
        Value::Vector2(v) => json!({ "x": v.x, "y": v.y }),
        Value::Vector3(v) => json!({ "x": v.x, "y": v.y, "z": v.z }),
        Value::Vector4(v) => json!({ "x": v.x, "y": v.y, "z": v.z, "w": v.w }),
        Value::LinearColor(c) => json!({ "r": c.r, "g": c.g, "b": c.b, "a": c.a }),
        Value::Array(array) => array.iter().map(value_json).collect(),
    }
}

#[cfg(test)]
mod tests {
    use swptsave_types::{ArrayValue, ValueKind, Vector2};

    use super::*;

    #[test]
    fn json_shapes() {
        assert_eq!(value_json(&Value::Int32(-3)), json!(-3));
        assert_eq!(
            value_json(&Value::Vector2(Vector2::new(1.0, 2.5))),
            json!({ "x": 1.0, "y": 2.5 })
        );

        let array =
            ArrayValue::with_items(ValueKind::Bool, vec![Value::Bool(true), Value::Bool(false)])
                .unwrap();
        assert_eq!(value_json(&Value::Array(array)), json!([true, false]));
    }

    #[test]
    fn text_collapses_long_arrays() {
        let items = (0..20).map(Value::Int32).collect();
        let array = ArrayValue::with_items(ValueKind::Int32, items).unwrap();
        assert_eq!(value_text(&Value::Array(array)), "20 Items");
        assert_eq!(value_text(&Value::String("hi".into())), "hi");
    }

    #[test]
    fn type_ids_are_zero_padded() {
        assert_eq!(type_id_hex(0x53), "0x00000053");
        assert_eq!(type_id_hex(0xE2A8_0856), "0xE2A80856");
    }
}
