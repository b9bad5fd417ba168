//! Tools domain module.
//!
//! This module exposes the Klaviyo API as MCP tools. Each tool validates its
//! arguments, makes exactly one API call, and answers with a text envelope.
//!
//! ## Architecture
//!
//! - `contract.rs` - The `KlaviyoTool` trait and the `invoke` wrapper
//! - `common.rs` - Shared parameter types (email, URL, paging)
//! - `definitions/` - Tool implementations, one file per resource family
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Ordered tool list and dispatch by name
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct and a unit struct implementing `KlaviyoTool` in the
//!    matching file under `definitions/`
//! 2. Append `ToolEntry::of::<YourTool>()` to that file's `tools()`
//!
//! The registry and the router both pick it up from there.

pub mod common;
mod contract;
pub mod definitions;
mod error;
mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use contract::{KlaviyoTool, ToolEntry, ToolReply, error_result, invoke};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
