mod config;
mod converter;
mod normalize;
mod request;
mod session;
mod warning;

use anyhow::Error;
use std::io;
use tracing_subscriber::EnvFilter;

use config::Config;
use session::Session;

fn main() -> Result<(), Error> {
    // Diagnostics go to stderr so they never mix with the console protocol.
    tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

    let config = Config::from_env()?;

    tracing::debug!(?config, "Starting converter");

    let stdin = io::stdin();
    let mut session = Session::new(config, stdin.lock(), io::stdout());

    session.run()?;

    tracing::debug!(rules = session.converter().len(), "Session finished");

    Ok(())
}
