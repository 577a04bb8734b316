use clap::{builder::PossibleValuesParser, Arg, ArgAction, ArgMatches, Command};
use tracing::Level;

use crate::cli::telemetry::LogFormat;

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_LEVEL: &str = "log-level";
pub const ARG_LOG_FORMAT: &str = "log-format";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_LOG_LEVEL)
                .long("log-level")
                .help("Level for the service's own logs and request spans")
                .env("SCOREBOARD_LOG_LEVEL")
                .global(true)
                .ignore_case(true)
                .value_parser(PossibleValuesParser::new(LEVELS)),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Raise the log level: -v for DEBUG, -vv for TRACE")
                .global(true)
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new(ARG_LOG_FORMAT)
                .long("log-format")
                .help("Log line format")
                .env("SCOREBOARD_LOG_FORMAT")
                .global(true)
                .default_value("text")
                .value_parser(PossibleValuesParser::new(["text", "json"])),
        )
}

/// `-v` flags on the command line beat `--log-level`; INFO otherwise.
#[must_use]
pub fn level(matches: &ArgMatches) -> Level {
    match matches.get_count(ARG_VERBOSITY) {
        0 => matches
            .get_one::<String>(ARG_LOG_LEVEL)
            .and_then(|level| level.parse().ok())
            .unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[must_use]
pub fn format(matches: &ArgMatches) -> LogFormat {
    match matches.get_one::<String>(ARG_LOG_FORMAT).map(String::as_str) {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}
