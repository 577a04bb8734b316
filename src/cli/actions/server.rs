use crate::{api, cli::telemetry};
use anyhow::Result;
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub secret_key: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let state = api::AppState::in_memory(&args.secret_key);

    let result = api::new(args.port, state).await;

    telemetry::shutdown_tracer();

    result
}
