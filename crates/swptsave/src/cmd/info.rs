use serde::Serialize;
use swptsave_game::SaveGame;

use crate::cmd::InfoArgs;
use crate::exit::{game_error, CliResult, SUCCESS};
use crate::output::{print_json, table, OutputFormat};

#[derive(Serialize)]
struct FileInfo {
    name: String,
    path: String,
    properties: usize,
}

#[derive(Serialize)]
struct InfoOutput {
    schema_id: &'static str,
    name: String,
    directory: String,
    files: Vec<FileInfo>,
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let game = SaveGame::load_with_config(&args.path, args.limits.config())
        .map_err(|err| game_error("load failed", err))?;

    let out = InfoOutput {
        schema_id: "swptsave/cli/v1/save-info",
        name: game.name().to_string(),
        directory: game.directory().display().to_string(),
        files: game
            .files()
            .iter()
            .map(|file| FileInfo {
                name: file.name().to_string(),
                path: file.path().display().to_string(),
                properties: file.len(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut t = table(vec!["FILE", "PROPERTIES", "PATH"]);
            for file in &out.files {
                t.add_row(vec![
                    file.name.clone(),
                    file.properties.to_string(),
                    file.path.clone(),
                ]);
            }
            println!("Save game: {} ({})", out.name, out.directory);
            println!("{t}");
        }
        OutputFormat::Pretty => {
            println!("Save game: {}", out.name);
            println!("  Directory: {}", out.directory);
            for file in &out.files {
                println!("  {:<24} {} properties", file.name, file.properties);
            }
        }
        OutputFormat::Raw => {
            for file in &out.files {
                println!("{}", file.name);
            }
        }
    }
    Ok(SUCCESS)
}
