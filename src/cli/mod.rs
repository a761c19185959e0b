pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "jobprep-api")]
#[command(about = "JobPrep API - typed procedure server for job search and interview prep")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, short, env = "JOBPREP_API_PORT", help = "Port to listen on (falls back to PORT, then 3000)")]
        port: Option<u16>,
    },

    #[command(about = "List every registered procedure")]
    Routes,

    #[command(about = "Sign a session token for local testing")]
    Token {
        #[arg(long, default_value_t = 1, help = "Principal id")]
        user_id: i64,
        #[arg(long, default_value = "local-user", help = "Principal open id")]
        open_id: String,
        #[arg(long, help = "Principal display name")]
        name: Option<String>,
        #[arg(long, help = "Principal email")]
        email: Option<String>,
        #[arg(long, help = "Grant the admin role")]
        admin: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl Cli {
    /// Commands that serve requests or sign tokens need a valid configuration
    pub fn requires_valid_config(&self) -> bool {
        matches!(
            self.command,
            None | Some(Commands::Serve { .. }) | Some(Commands::Token { .. })
        )
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Routes => commands::routes::handle(output_format),
        Commands::Token {
            user_id,
            open_id,
            name,
            email,
            admin,
        } => {
            let request = commands::token::TokenRequest {
                user_id,
                open_id,
                name,
                email,
                admin,
            };
            commands::token::handle(&config, request, output_format)
        }
    }
}
