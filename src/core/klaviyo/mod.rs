//! Klaviyo REST API client.
//!
//! - `client.rs` - the request primitive (auth, revision header, error mapping)
//! - `endpoints.rs` - one named operation per upstream endpoint
//! - `document.rs` - JSON:API write documents and linkage objects
//! - `handle.rs` - lazily-initialized shared client slot

mod client;
pub mod document;
mod endpoints;
mod error;
mod handle;
mod request;

pub use client::KlaviyoClient;
pub use document::{Document, Relationship, ResourceIdentifier, ResourceObject};
pub use error::{KlaviyoError, KlaviyoResult};
pub use handle::ClientHandle;
pub use request::ApiRequest;
