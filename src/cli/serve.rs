//! HTTP API server command

use notify_rank::{
    api::{ApiServer, ApiServerConfig, AppState},
    error::{RankError, Result},
    RankConfig,
};
use std::net::SocketAddr;
use tracing::debug;

/// Handle API server startup command
pub async fn handle(config: RankConfig, addr: Option<String>) -> Result<()> {
    debug!("Starting HTTP API server...");

    let addr = addr.unwrap_or_else(|| config.server.addr.clone());
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| RankError::Other(format!("Invalid address '{}': {}", addr, e)))?;

    let state = AppState::from_config(&config)?;
    let server_config = ApiServerConfig {
        addr: socket_addr,
        static_dir: config.server.static_dir.clone(),
    };

    println!();
    println!("notify-rank API Server");
    println!();
    println!("   Address: http://{}", socket_addr);
    println!("   Data:    {}", config.storage.data_dir.display());
    println!();
    println!("   Endpoints:");
    println!("   - POST /api/train - Train on the server dataset");
    println!("   - POST /api/predict - Rank domains (?alpha=, ?scores=true)");
    println!("   - GET  /api/settings/:domain - Load domain settings");
    println!("   - POST /api/settings/:domain - Save domain settings");
    println!("   - POST /api/reset - Clear settings and model");
    println!("   - GET  /health - Health check");
    println!();

    ApiServer::new(server_config, state).serve().await?;
    Ok(())
}
