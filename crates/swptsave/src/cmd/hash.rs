use serde::Serialize;
use swptsave_types::{type_hash, TypeRegistry};

use crate::cmd::HashArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, table, type_id_hex, OutputFormat};

#[derive(Serialize)]
struct HashRow {
    name: String,
    hash: String,
    value: u32,
    kind: Option<&'static str>,
}

#[derive(Serialize)]
struct HashOutput {
    schema_id: &'static str,
    hashes: Vec<HashRow>,
}

pub fn run(args: HashArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = TypeRegistry::global();
    let hashes: Vec<HashRow> = args
        .names
        .into_iter()
        .map(|name| {
            let value = type_hash(&name);
            let kind = registry
                .resolve(value)
                .ok()
                .map(|kind| registry.entry(kind))
                .filter(|entry| entry.type_name == Some(name.as_str()))
                .map(|entry| entry.display_name);
            HashRow {
                hash: type_id_hex(value),
                value,
                kind,
                name,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&HashOutput {
            schema_id: "swptsave/cli/v1/type-hash",
            hashes,
        }),
        OutputFormat::Table => {
            let mut t = table(vec!["NAME", "HASH", "KIND"]);
            for row in &hashes {
                t.add_row(vec![
                    row.name.clone(),
                    row.hash.clone(),
                    row.kind.unwrap_or("-").to_string(),
                ]);
            }
            println!("{t}");
        }
        OutputFormat::Pretty => {
            for row in &hashes {
                match row.kind {
                    Some(kind) => println!("{} {} ({kind})", row.hash, row.name),
                    None => println!("{} {}", row.hash, row.name),
                }
            }
        }
        OutputFormat::Raw => {
            for row in &hashes {
                println!("{}", row.hash);
            }
        }
    }
    Ok(SUCCESS)
}
