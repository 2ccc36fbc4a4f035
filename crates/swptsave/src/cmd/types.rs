use serde::Serialize;
use swptsave_types::TypeRegistry;

use crate::cmd::TypesArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, table, type_id_hex, OutputFormat};

#[derive(Serialize)]
struct KindRow {
    kind: String,
    type_name: Option<&'static str>,
    id: String,
    display_name: &'static str,
}

#[derive(Serialize)]
struct TypesOutput {
    schema_id: &'static str,
    kinds: Vec<KindRow>,
}

#[derive(Serialize)]
struct CandidateOutput<'a> {
    schema_id: &'static str,
    type_name: &'a str,
    id: String,
    available: bool,
}

pub fn run(args: TypesArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = TypeRegistry::global();

    if let Some(candidate) = args.candidate.as_deref() {
        let id = registry
            .check_candidate(candidate)
            .map_err(|err| CliError::new(DATA_INVALID, err.to_string()))?;
        let out = CandidateOutput {
            schema_id: "swptsave/cli/v1/type-candidate",
            type_name: candidate,
            id: type_id_hex(id),
            available: true,
        };
        match format {
            OutputFormat::Json => print_json(&out),
            _ => println!("{} {} is free", out.id, out.type_name),
        }
        return Ok(SUCCESS);
    }

    let kinds: Vec<KindRow> = registry
        .entries()
        .iter()
        .map(|entry| KindRow {
            kind: format!("{:?}", entry.kind),
            type_name: entry.type_name,
            id: type_id_hex(entry.id),
            display_name: entry.display_name,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&TypesOutput {
            schema_id: "swptsave/cli/v1/value-kinds",
            kinds,
        }),
        OutputFormat::Table => {
            let mut t = table(vec!["KIND", "ID", "TYPE NAME", "DISPLAY NAME"]);
            for row in &kinds {
                t.add_row(vec![
                    row.kind.clone(),
                    row.id.clone(),
                    row.type_name.unwrap_or("-").to_string(),
                    row.display_name.to_string(),
                ]);
            }
            println!("{t}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &kinds {
                println!(
                    "{} {:<12} {}",
                    row.id,
                    row.kind,
                    row.type_name.unwrap_or("-")
                );
            }
        }
    }
    Ok(SUCCESS)
}
