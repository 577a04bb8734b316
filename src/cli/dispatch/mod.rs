//! Map validated CLI arguments to the action to run.

use crate::cli::{
    actions::{server::Args, Action},
    commands::{ARG_PORT, ARG_SECRET_KEY},
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);
    let secret_key = matches
        .get_one::<String>(ARG_SECRET_KEY)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --secret-key")?;

    Ok(Action::Server(Args { port, secret_key }))
}
