//! DSA CLI - proposal validation and submission.
//!
//! The main entry point for the `dsa` binary.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dsa_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    let config = cli.config()?;

    // Create runtime and execute
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Validate(args) => dsa_cli::commands::validate::execute(args, &config).await,
            Commands::Normalize(args) => dsa_cli::commands::normalize::execute(&args, &config),
            Commands::Submit(args) => dsa_cli::commands::submit::execute(args, &config).await,
        }
    })
}
