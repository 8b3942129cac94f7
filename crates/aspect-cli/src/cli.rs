//! CLI argument definitions for the submodel table editor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use aspect_client::DEFAULT_SUBMIT_PATH;

#[derive(Parser)]
#[command(
    name = "aspect-portal",
    version,
    about = "Submodel table editor - edit, validate and submit aspect data",
    long_about = "Edit tabular aspect data against a submodel schema.\n\n\
                  Derives editable columns from a submodel description, manages a\n\
                  working row set, validates it and submits it to a backend endpoint."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive and print the editable columns of a submodel description.
    Columns(ColumnsArgs),

    /// Validate a rows file against a submodel description.
    Validate(ValidateArgs),

    /// Append empty rows to a rows file through the table session.
    AddRows(AddRowsArgs),

    /// Validate a rows file and submit it to the backend.
    Submit(SubmitArgs),

    /// List the submodels a backend offers.
    Submodels(SubmodelsArgs),
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Path to the submodel description JSON.
    #[arg(value_name = "SUBMODEL_JSON")]
    pub submodel: PathBuf,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the submodel description JSON.
    #[arg(value_name = "SUBMODEL_JSON")]
    pub submodel: PathBuf,

    /// Path to the rows JSON (flat array of row objects).
    #[arg(value_name = "ROWS_JSON")]
    pub rows: PathBuf,
}

#[derive(Parser)]
pub struct AddRowsArgs {
    /// Path to the submodel description JSON.
    #[arg(value_name = "SUBMODEL_JSON")]
    pub submodel: PathBuf,

    /// Path to the rows JSON; created when absent.
    #[arg(value_name = "ROWS_JSON")]
    pub rows: PathBuf,

    /// Number of rows to append (must be at least 1).
    #[arg(long = "count", default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: u64,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// Path to the submodel description JSON.
    #[arg(value_name = "SUBMODEL_JSON")]
    pub submodel: PathBuf,

    /// Path to the rows JSON (flat array of row objects).
    #[arg(value_name = "ROWS_JSON")]
    pub rows: PathBuf,

    /// Backend base URL.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: String,

    /// Submission path on the backend.
    #[arg(long = "path", default_value = DEFAULT_SUBMIT_PATH)]
    pub path: String,

    /// Validate and report without issuing the POST.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct SubmodelsArgs {
    /// Backend base URL.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
