use clap::{Args, Subcommand};
use std::path::PathBuf;

use swptsave_frame::{
    CodecConfig, DEFAULT_MAX_ARRAY_LEN, DEFAULT_MAX_PROPERTY_SIZE, DEFAULT_MAX_STRING_LEN,
};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod dump;
pub mod hash;
pub mod info;
pub mod save_as;
pub mod types;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the files of a save game directory.
    Info(InfoArgs),
    /// List the properties of one save file.
    Dump(DumpArgs),
    /// Verify that files decode and re-encode byte for byte.
    Check(CheckArgs),
    /// Print the type hash of one or more type names.
    Hash(HashArgs),
    /// Print the value kind table.
    Types(TypesArgs),
    /// Write a save game into another directory.
    SaveAs(SaveAsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Info(args) => info::run(args, format),
        Command::Dump(args) => dump::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Hash(args) => hash::run(args, format),
        Command::Types(args) => types::run(args, format),
        Command::SaveAs(args) => save_as::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Decode limits for untrusted files.
#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Largest accepted property size in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_PROPERTY_SIZE)]
    pub max_property_size: usize,
    /// Largest accepted array element count.
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_MAX_ARRAY_LEN)]
    pub max_array_len: usize,
    /// Largest accepted string length in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_STRING_LEN)]
    pub max_string_len: usize,
}

impl LimitArgs {
    pub fn config(&self) -> CodecConfig {
        CodecConfig {
            max_property_size: self.max_property_size,
            max_array_len: self.max_array_len,
            max_string_len: self.max_string_len,
        }
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Save game directory.
    pub path: PathBuf,
    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Save file to list.
    pub path: PathBuf,
    /// Only show properties with this name.
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// A save file, or a directory whose files are all checked.
    pub path: PathBuf,
    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Fully qualified type names, e.g. System.Int32.
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Check whether a new type name would collide with a known ID.
    #[arg(long, value_name = "TYPE")]
    pub candidate: Option<String>,
}

#[derive(Args, Debug)]
pub struct SaveAsArgs {
    /// Save game directory to load.
    pub source: PathBuf,
    /// Directory to write the save game into; created if missing.
    pub dest: PathBuf,
    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
