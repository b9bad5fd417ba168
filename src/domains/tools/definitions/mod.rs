//! Tool definitions module.
//!
//! One file per Klaviyo resource family. Each file exposes its tools as
//! `KlaviyoTool` implementations and a `tools()` list in registry order.

pub mod campaigns;
pub mod catalogs;
pub mod data_privacy;
pub mod events;
pub mod flows;
pub mod lists;
pub mod metrics;
pub mod profiles;
pub mod segments;
pub mod templates;
