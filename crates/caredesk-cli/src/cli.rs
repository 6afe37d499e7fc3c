//! CLI argument definitions for the caredesk table renderer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use caredesk_table::emit::DEFAULT_TEXT_WIDTH;

#[derive(Parser)]
#[command(
    name = "caredesk",
    version,
    about = "Render caredesk dashboard list views",
    long_about = "Render a list view of the caredesk administration dashboard.\n\n\
                  A view file (TOML or JSON) describes the columns; a records file holds\n\
                  the list endpoint payload. Output is terminal text, HTML or JSON."
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

    /// Allow record values (patient data) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a view definition against a records payload.
    Render(RenderArgs),

    /// List the built-in cell renderers.
    Renderers,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// View definition (.toml or .json).
    #[arg(value_name = "VIEW")]
    pub view: PathBuf,

    /// Records payload: a JSON array or a list envelope.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,

    /// Alternate row shading.
    #[arg(long = "striped")]
    pub striped: bool,

    /// Draw cell borders.
    #[arg(long = "bordered")]
    pub bordered: bool,

    /// Reduce cell padding.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Disable the row hover modifier.
    #[arg(long = "no-hover")]
    pub no_hover: bool,

    /// Message shown when there are no records.
    #[arg(long = "empty-message", value_name = "TEXT")]
    pub empty_message: Option<String>,

    /// Date used by the `age` renderer instead of today.
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD", value_parser = parse_reference_date)]
    pub reference_date: Option<NaiveDate>,

    /// Fail when any column descriptor had to be degraded.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Terminal width for text output.
    #[arg(long = "width", value_name = "COLUMNS", default_value_t = DEFAULT_TEXT_WIDTH)]
    pub width: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Html,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_reference_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}
