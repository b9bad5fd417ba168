//! STDIO transport implementation.
//!
//! The default MCP mode: one client on stdin/stdout. Logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single client over stdin/stdout until it disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        info!("{} ready - communicating via stdin/stdout", name);

        service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO client disconnected");
        Ok(())
    }
}
