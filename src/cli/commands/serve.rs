use crate::config::AppConfig;
use crate::server;

const DEFAULT_PORT: u16 = 3000;

pub async fn handle(config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.or_else(port_from_env).unwrap_or(DEFAULT_PORT);
    server::serve(config, port).await
}

fn port_from_env() -> Option<u16> {
    std::env::var("PORT").ok().and_then(|s| s.parse().ok())
}
