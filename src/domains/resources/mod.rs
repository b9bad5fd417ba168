//! Resources domain module.
//!
//! This module handles all resource-related functionality for the MCP server.
//! Resources represent read-only data MCP clients can fetch by URI; here that
//! is the Klaviyo API documentation, one page per section.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource template definitions
//! - `registry.rs` - Central template registration
//! - `service.rs` - Resource service for listing and reading
//!
//! ## Adding a New Resource Template
//!
//! 1. Create a new file in `definitions/` (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceTemplateDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`
//!
//! **No need to modify `service.rs`!**

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceTemplateDefinition;
pub use error::ResourceError;
pub use registry::get_all_resource_templates;
pub use service::{ResourceService, TemplateEntry};
