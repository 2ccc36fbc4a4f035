use serde::Serialize;
use swptsave_frame::Property;
use swptsave_game::SaveFile;
use swptsave_types::{TypeRegistry, Value};

use crate::cmd::DumpArgs;
use crate::exit::{game_error, CliResult, SUCCESS};
use crate::output::{print_json, table, type_id_hex, value_json, value_text, OutputFormat};

#[derive(Serialize)]
struct PropertyRow {
    index: usize,
    name: String,
    #[serde(rename = "type")]
    display_type: String,
    type_id: String,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct DumpOutput {
    schema_id: &'static str,
    file: String,
    properties: Vec<PropertyRow>,
}

pub fn run(args: DumpArgs, format: OutputFormat) -> CliResult<i32> {
    let file = SaveFile::load_with_config(&args.path, args.limits.config())
        .map_err(|err| game_error("load failed", err))?;

    let indices = match &args.name {
        Some(name) => matching_indices(&file, name),
        None => (0..file.len()).collect(),
    };

    let rows: Vec<(PropertyRow, &Property)> = indices
        .into_iter()
        .filter_map(|index| file.property(index).map(|p| (index, p)))
        .map(|(index, property)| {
            let row = PropertyRow {
                index,
                name: property.name.clone(),
                display_type: property.value.display_type(),
                type_id: type_id_hex(wire_type_id(&property.value)),
                value: value_json(&property.value),
            };
            (row, property)
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&DumpOutput {
            schema_id: "swptsave/cli/v1/file-dump",
            file: file.path().display().to_string(),
            properties: rows.into_iter().map(|(row, _)| row).collect(),
        }),
        OutputFormat::Table => {
            let mut t = table(vec!["#", "NAME", "TYPE", "VALUE"]);
            for (row, property) in &rows {
                t.add_row(vec![
                    row.index.to_string(),
                    row.name.clone(),
                    row.display_type.clone(),
                    value_text(&property.value),
                ]);
            }
            println!("{t}");
        }
        OutputFormat::Pretty => {
            println!("{} ({} properties)", file.name(), file.len());
            for (row, property) in &rows {
                println!(
                    "  [{}] {} <{}> = {}",
                    row.index,
                    row.name,
                    row.display_type,
                    value_text(&property.value)
                );
            }
        }
        OutputFormat::Raw => {
            for (row, property) in &rows {
                println!("{}={}", row.name, value_text(&property.value));
            }
        }
    }
    Ok(SUCCESS)
}

fn matching_indices(file: &SaveFile, name: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut start = 0;
    while let Some(index) = file.index_of_property(name, start) {
        indices.push(index);
        start = index + 1;
    }
    indices
}

/// The type ID stored on the wire: arrays carry their item kind's ID.
fn wire_type_id(value: &Value) -> u32 {
    let kind = match value {
        Value::Array(array) => array.item_kind(),
        other => other.kind(),
    };
    TypeRegistry::global().id_of(kind)
}

#[cfg(test)]
mod tests {
    use swptsave_types::{ArrayValue, ValueKind};

    use super::*;

    #[test]
    fn finds_every_duplicate() {
        let mut file = SaveFile::new("Player.txt");
        file.add_property(Property::new("a", Value::Int32(1)));
        file.add_property(Property::new("b", Value::Int32(2)));
        file.add_property(Property::new("a", Value::Int32(3)));

        assert_eq!(matching_indices(&file, "a"), vec![0, 2]);
        assert!(matching_indices(&file, "z").is_empty());
    }

    #[test]
    fn arrays_report_item_type_id() {
        let array = Value::Array(ArrayValue::new(ValueKind::Int32).unwrap());
        assert_eq!(wire_type_id(&array), 0xE2A8_0856);
        assert_eq!(wire_type_id(&Value::Int32(0)), 0xE2A8_0856);
    }
}
