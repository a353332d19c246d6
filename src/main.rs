#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use humanic_chat::Config;
use humanic_chat::cli::Cli;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    // Logs share the terminal with the chat, so stay quiet unless asked.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_filter())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    config.validate()?;
    humanic_chat::app::dispatch(cli, config).await
}
