use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use swptsave_frame::{CodecConfig, FrameError, PropertyReader, PropertyWriter};
use tracing::debug;

use crate::cmd::CheckArgs;
use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, NOT_FOUND, SUCCESS};
use crate::output::{print_json, table, OutputFormat};

#[derive(Serialize)]
struct CheckedFile {
    path: String,
    status: &'static str,
    properties: usize,
    bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_difference: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CheckedFile {
    fn ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Serialize)]
struct CheckOutput {
    schema_id: &'static str,
    ok: bool,
    files: Vec<CheckedFile>,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let paths = collect_paths(&args.path)?;
    if paths.is_empty() {
        return Err(CliError::new(
            NOT_FOUND,
            format!("no files in {}", args.path.display()),
        ));
    }

    let config = args.limits.config();
    let files: Vec<CheckedFile> = paths.iter().map(|path| check_file(path, &config)).collect();
    let out = CheckOutput {
        schema_id: "swptsave/cli/v1/round-trip-check",
        ok: files.iter().all(CheckedFile::ok),
        files,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut t = table(vec!["PATH", "STATUS", "PROPERTIES", "BYTES", "DETAIL"]);
            for file in &out.files {
                t.add_row(vec![
                    file.path.clone(),
                    file.status.to_string(),
                    file.properties.to_string(),
                    file.bytes.to_string(),
                    detail(file),
                ]);
            }
            println!("{t}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for file in &out.files {
                println!("{} {} {}", file.status, file.path, detail(file));
            }
        }
    }

    Ok(if out.ok { SUCCESS } else { DATA_INVALID })
}

fn collect_paths(path: &Path) -> CliResult<Vec<PathBuf>> {
    let context = || format!("cannot read {}", path.display());
    let metadata = fs::metadata(path).map_err(|err| io_error(&context(), err))?;
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(path).map_err(|err| io_error(&context(), err))? {
        let entry_path = entry.map_err(|err| io_error(&context(), err))?.path();
        if fs::metadata(&entry_path).is_ok_and(|meta| meta.is_file()) {
            paths.push(entry_path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn check_file(path: &Path, config: &CodecConfig) -> CheckedFile {
    let mut checked = CheckedFile {
        path: path.display().to_string(),
        status: "error",
        properties: 0,
        bytes: 0,
        first_difference: None,
        error: None,
    };

    let original = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            checked.error = Some(err.to_string());
            return checked;
        }
    };
    checked.bytes = original.len();

    match round_trip(&original, config) {
        Ok((count, encoded)) => {
            checked.properties = count;
            checked.first_difference = first_difference(&original, &encoded);
            checked.status = if checked.first_difference.is_none() {
                "ok"
            } else {
                "mismatch"
            };
        }
        Err(err) => checked.error = Some(err.to_string()),
    }

    debug!(path = %checked.path, status = checked.status, "checked file");
    checked
}

/// Decode every property, then encode them again.
fn round_trip(bytes: &[u8], config: &CodecConfig) -> Result<(usize, Vec<u8>), FrameError> {
    let properties = PropertyReader::with_config(bytes, config.clone()).read_all()?;
    let mut writer = PropertyWriter::new(Vec::with_capacity(bytes.len()));
    writer.write_all(&properties)?;
    Ok((properties.len(), writer.finish()?))
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(offset) => Some(offset),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}

fn detail(file: &CheckedFile) -> String {
    match (&file.error, file.first_difference) {
        (Some(err), _) => err.clone(),
        (None, Some(offset)) => format!("differs at byte {offset}"),
        (None, None) => String::new(),
    }
}
