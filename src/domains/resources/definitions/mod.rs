//! Resource definitions module.
//!
//! Each resource template is defined in its own file with:
//! - URI template and metadata
//! - A resolver mapping concrete URIs to content
//!
//! ## Adding a New Resource Template
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceTemplateDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

pub mod klaviyo_docs;

pub use klaviyo_docs::KlaviyoDocsResource;

/// Trait for parameterized resources.
///
/// Each template must implement this trait to provide its metadata and a
/// resolver for the URIs it covers.
pub trait ResourceTemplateDefinition {
    /// The RFC 6570 URI template.
    const URI_TEMPLATE: &'static str;

    /// The display name of the template.
    const NAME: &'static str;

    /// A human-readable title.
    const TITLE: &'static str;

    /// A description of the template.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resolved content.
    const MIME_TYPE: &'static str;

    /// Resolve a concrete URI to its text, or `None` if the URI does not
    /// belong to this template.
    fn resolve(uri: &str) -> Option<String>;
}
