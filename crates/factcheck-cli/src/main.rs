//! factcheck - generate facts about a topic and verify them with a second model.

use clap::Parser;
use factcheck_cli::input::read_request;
use factcheck_cli::run::{build_providers, execute};
use factcheck_cli::{Cli, CliError, Config, Formatter};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> factcheck_cli::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(&cli)?;

    let formatter = Formatter::new(config.settings.color);
    let (generation, verification) = build_providers(&config)?;

    let request = match read_request(&cli) {
        Ok(request) => request,
        Err(CliError::InvalidInput(message)) => {
            println!("{}", formatter.error(&message));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    execute(
        &request,
        &config,
        &formatter,
        Arc::new(generation),
        Arc::new(verification),
    )
    .await?;

    Ok(())
}
