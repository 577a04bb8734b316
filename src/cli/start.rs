use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// Main entry point for the CLI - builds and returns the Action
///
/// # Errors
///
/// Returns an error if argument parsing, telemetry initialization, or action dispatch fails
pub fn start() -> Result<Action> {
    // 1. Load `.env` from the working directory, if any
    dotenvy::dotenv().ok();

    // 2. Parse command-line arguments
    let matches = commands::new().get_matches();

    // 3. Initialize logging and the optional span exporter
    telemetry::init(
        commands::logging::level(&matches),
        commands::logging::format(&matches),
    )?;

    // 4. Dispatch to appropriate action
    dispatch::handler(&matches)
}
