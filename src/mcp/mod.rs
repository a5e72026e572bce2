//! MCP surface over stdio

pub mod resources;
pub mod server;

use std::sync::Arc;

use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info};

use crate::core::LookupAdapter;

pub use server::GeniusServer;

/// Serve MCP on stdin/stdout until the client disconnects or Ctrl-C.
pub async fn serve_stdio(adapter: Arc<LookupAdapter>) -> anyhow::Result<()> {
    info!("Starting Genius MCP server on stdio");

    let service = GeniusServer::new(adapter)
        .serve(stdio())
        .await
        .inspect_err(|e| error!("Failed to start MCP session: {:?}", e))?;

    tokio::select! {
        reason = service.waiting() => {
            let reason = reason?;
            info!("MCP session ended: {:?}", reason);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}
