//! Klaviyo MCP Server Library
//!
//! This crate exposes the Klaviyo marketing REST API to Model Context
//! Protocol clients: 48 tools over profiles, lists, events, campaigns, flows,
//! templates, segments, metrics, catalogs and data privacy, plus a
//! documentation resource.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the Klaviyo API client, the
//!   server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: one tool per Klaviyo operation, each answering with a text
//!     envelope
//!   - **resources**: the `klaviyo://docs/{section}` documentation pages
//!
//! # Example
//!
//! ```rust,no_run
//! use klaviyo_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
