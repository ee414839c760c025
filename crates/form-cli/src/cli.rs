//! CLI argument definitions for `formcheck`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formcheck",
    version,
    about = "Lint form definitions and replay form events",
    long_about = "Load a TOML or JSON form definition, drive it with values or a \
                  recorded event script, and report per-field status and whether \
                  the form may be submitted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow field values to appear in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report every configuration error in a form definition.
    Lint(LintArgs),

    /// Fill a form from the command line and attempt a submission.
    Check(CheckArgs),

    /// Replay a JSON event script against a form definition.
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct LintArgs {
    /// Form definition (.toml or .json).
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Form definition (.toml or .json).
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Set a text field, e.g. `--set email=a@b.com`. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Select a checkbox option, e.g. `--select category=SF`. Repeatable.
    #[arg(long = "select", value_name = "GROUP=OPTION", value_parser = parse_assignment)]
    pub select: Vec<(String, String)>,

    /// Reject fields without a pattern or predicate.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Form definition (.toml or .json).
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// JSON array of events.
    #[arg(value_name = "EVENTS")]
    pub events: PathBuf,

    /// Reject fields without a pattern or predicate.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
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

/// Split `NAME=VALUE` at the first `=`. The value may be empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}
