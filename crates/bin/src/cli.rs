//! CLI argument definitions for the jsonbind binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Value type used to read or write a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Plain string, never coerced
    String,
    /// 64-bit integer, also accepted from numeric strings
    Int,
    /// Boolean, accepting yes/no, on/off, 1/0 and similar spellings
    Bool,
    /// GUID in any of the usual textual forms
    Guid,
    /// Round-trip date-time (RFC 3339)
    Datetime,
}

/// Read and edit JSON configuration files through typed accessors
#[derive(Parser, Debug)]
#[command(name = "jsonbind")]
#[command(about = "jsonbind: typed access to JSON configuration files")]
#[command(version)]
pub struct Cli {
    /// Print results as JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the value at a dotted path
    Get(GetArgs),
    /// Write a value at a dotted path and save the file
    Set(SetArgs),
    /// List the keys of the object at a dotted path
    Keys(KeysArgs),
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Configuration file to read
    pub file: PathBuf,

    /// Dotted path of the property, e.g. `output.format`
    pub path: String,

    /// Read the value as this type; without it the raw JSON is printed
    #[arg(short = 't', long = "type")]
    pub kind: Option<ValueKind>,

    /// Value printed when the property is absent, null or blank
    #[arg(short, long, requires = "kind")]
    pub default: Option<String>,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration file to edit; created if missing
    pub file: PathBuf,

    /// Dotted path of the property; missing intermediate objects are created
    pub path: String,

    /// Value to store
    pub value: String,

    /// Type the value is parsed as before it is stored
    #[arg(short = 't', long = "type", default_value = "string")]
    pub kind: ValueKind,
}

/// Arguments for the keys command
#[derive(clap::Args, Debug)]
pub struct KeysArgs {
    /// Configuration file to read
    pub file: PathBuf,

    /// Dotted path of the object; the root when omitted
    pub path: Option<String>,
}
