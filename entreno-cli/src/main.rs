use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use entreno_cli::commands::Cli;

fn main() -> Result<()> {
    // Parse first so --verbose can raise the default level
    let cli = Cli::parse();
    let default_level = if cli.verbose() { "debug" } else { "info" };

    // Logs go to stderr, stdout is for screens
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { cli.execute().await })
}
