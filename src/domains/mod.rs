//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: `tools` maps the Klaviyo API to callable tools, `resources` serves
//! the API documentation pages.

pub mod resources;
pub mod tools;
