//! `formcheck`: lint form definitions and replay form events.

use clap::{ColorChoice, Parser};
use form_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use crate::commands::{run_check, run_lint, run_replay};
use crate::summary::{print_findings, print_replay, print_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Lint(args) => match run_lint(&args) {
            Ok(findings) => {
                print_findings(&findings);
                if form_cli::lint::has_errors(&findings) { 1 } else { 0 }
            }
            Err(error) => report_error(&error),
        },
        Command::Check(args) => match run_check(&args) {
            Ok(report) => {
                match args.format {
                    OutputFormatArg::Table => print_report(&report),
                    OutputFormatArg::Json => print_json(&report),
                }
                if report.submittable { 0 } else { 1 }
            }
            Err(error) => report_error(&error),
        },
        Command::Replay(args) => match run_replay(&args) {
            Ok((steps, report)) => {
                match args.format {
                    OutputFormatArg::Table => {
                        print_replay(&steps);
                        print_report(&report);
                    }
                    OutputFormatArg::Json => print_json(&serde_json::json!({
                        "steps": steps,
                        "report": report,
                    })),
                }
                if report.submittable { 0 } else { 1 }
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    2
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(error) => eprintln!("error: failed to serialize output: {error}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
