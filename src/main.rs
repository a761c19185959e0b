use clap::Parser;
use jobprep_api::cli::Cli;
use jobprep_api::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, MOCK_MODE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Invalid configuration aborts commands that serve or sign tokens
    let config: AppConfig = jobprep_api::config::config().clone();
    if cli.requires_valid_config() {
        if let Err(e) = config.validate() {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    }
    if jobprep_api::is_development!() && !config.auth.mock_mode {
        tracing::info!("Development mode: `jobprep-api token` signs a session token for local calls");
    }

    if let Err(e) = jobprep_api::cli::run(cli, config).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
