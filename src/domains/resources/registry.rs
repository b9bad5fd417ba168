//! Resource Registry - central registration of all resource templates.
//!
//! This module provides dynamic registration without modifying service.rs.
//! When adding a new resource template:
//! 1. Create the definition file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resource_templates()`

use rmcp::model::{AnnotateAble, RawResourceTemplate};

use super::definitions::{KlaviyoDocsResource, ResourceTemplateDefinition};
use super::service::TemplateEntry;

/// Helper function to create a template entry from a definition.
fn build_template<R: ResourceTemplateDefinition>() -> TemplateEntry {
    TemplateEntry {
        template: RawResourceTemplate {
            uri_template: R::URI_TEMPLATE.to_string(),
            name: R::NAME.to_string(),
            title: Some(R::TITLE.to_string()),
            description: Some(R::DESCRIPTION.to_string()),
            mime_type: Some(R::MIME_TYPE.to_string()),
        }
        .no_annotation(),
        resolve: R::resolve,
    }
}

/// Get all registered resource templates.
///
/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn get_all_resource_templates() -> Vec<TemplateEntry> {
    vec![build_template::<KlaviyoDocsResource>()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 1);

        let docs = &templates[0].template.raw;
        assert_eq!(docs.uri_template, "klaviyo://docs/{section}");
        assert_eq!(docs.name, "documentation");
        assert_eq!(docs.mime_type.as_deref(), Some("text/markdown"));
    }
}
