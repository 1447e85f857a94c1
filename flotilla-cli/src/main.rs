use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Args, Mode};

/// Initialize tracing for CLI use: human-readable output on stderr,
/// filtered by RUST_LOG (default: info). Stdout stays reserved for
/// command output.
fn initialize_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    initialize_tracing();

    match args.mode {
        Mode::Unjoin(args) => commands::unjoin::run_unjoin(args).await,
    }
}
