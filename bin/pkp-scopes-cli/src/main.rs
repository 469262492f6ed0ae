mod app;
mod cli;
mod cli_command;
mod logging;
mod render;
mod state;

use clap::Parser;
use pkp_scopes_client::Config;
use tracing::info;

#[tokio::main]
pub async fn main() {
    if let Err(e) = run_main().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = Config::from_file(&cli.config, cli.relay_api_key.clone())?;

    // Logs are flushed when `_logging` is dropped.
    let _logging = logging::init_logging(&config.logging)?;
    info!("Starting PKP scopes CLI");
    info!("Logging config settings: {:?}", config.logging);

    match cli.credential_text()? {
        Some(credential_text) => app::run_once(config, credential_text, cli.json).await,
        None => app::run(config, cli.json).await,
    }
}
