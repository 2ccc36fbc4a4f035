use serde::Serialize;
use swptsave_game::SaveGame;
use tracing::info;

use crate::cmd::SaveAsArgs;
use crate::exit::{game_error, io_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct SaveAsOutput {
    schema_id: &'static str,
    name: String,
    directory: String,
    files: Vec<String>,
}

pub fn run(args: SaveAsArgs, format: OutputFormat) -> CliResult<i32> {
    let mut game = SaveGame::load_with_config(&args.source, args.limits.config())
        .map_err(|err| game_error("load failed", err))?;

    std::fs::create_dir_all(&args.dest).map_err(|err| {
        io_error(&format!("cannot create {}", args.dest.display()), err)
    })?;
    game.save_to(&args.dest)
        .map_err(|err| game_error("save failed", err))?;
    info!(
        from = %args.source.display(),
        to = %game.directory().display(),
        files = game.files().len(),
        "saved game"
    );

    let out = SaveAsOutput {
        schema_id: "swptsave/cli/v1/save-as",
        name: game.name().to_string(),
        directory: game.directory().display().to_string(),
        files: game
            .files()
            .iter()
            .map(|file| file.path().display().to_string())
            .collect(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Saved {} ({} files) to {}", out.name, out.files.len(), out.directory);
        }
        OutputFormat::Raw => {
            for path in &out.files {
                println!("{path}");
            }
        }
    }
    Ok(SUCCESS)
}
