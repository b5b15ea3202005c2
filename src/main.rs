use anyhow::Result;
use attrition_server::{config, logging, server::Server};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = logging::resolve_level(&config.server.logs);
    if let Err(e) = logging::init(&log_level, config.server.logs.format) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Starting attrition server with log level: {}", log_level);

    let server = Server::new(config.server).await;
    if let Err(e) = server.run().await {
        error!("Server startup error: {:?}", e);
        return Err(e.into());
    }

    Ok(())
}
