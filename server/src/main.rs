use std::sync::Arc;

use tokio::net::TcpListener;

use server::config::ServerConfig;
use server::gateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (for development)
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting chat server...");
    log::info!("Protocol version: {}", protocol::protocol_version());

    // Load configuration; a missing CONFIG_PATH falls back to defaults.
    let mut config = match std::env::var("CONFIG_PATH") {
        Ok(path) => ServerConfig::load_from_file(&path).unwrap_or_else(|e| {
            eprintln!("Failed to load server configuration from '{}': {}", path, e);
            std::process::exit(1);
        }),
        Err(_) => ServerConfig::default(),
    };

    if let Some(port) = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config.port = port;
    }

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_addr).await.unwrap_or_else(|e| {
        eprintln!("Failed to bind {}: {}", bind_addr, e);
        std::process::exit(1);
    });

    log::info!("Server listening on {}", bind_addr);

    gateway::run(listener, Arc::new(config)).await
}
