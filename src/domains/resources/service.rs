//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. This server
//! exposes no fixed resources, only URI templates resolved on read.
//!
//! Templates are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new template does NOT require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::get_all_resource_templates;

/// Service for listing and reading resources.
#[derive(Debug, Clone)]
pub struct ResourceService {
    /// Resource templates for parameterized resources.
    templates: Vec<TemplateEntry>,
}

/// An entry in the template registry.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    /// The template metadata.
    pub template: ResourceTemplate,

    /// Maps a concrete URI to its text, or `None` if the URI is not covered.
    pub resolve: fn(&str) -> Option<String>,
}

impl ResourceService {
    /// Create a new ResourceService with every registered template.
    pub fn new() -> Self {
        info!("Initializing ResourceService");
        Self {
            templates: get_all_resource_templates(),
        }
    }

    /// List all available resources. Only templates are exposed.
    pub async fn list_resources(&self) -> Vec<Resource> {
        Vec::new()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates
            .iter()
            .map(|entry| entry.template.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let (entry, text) = self
            .templates
            .iter()
            .find_map(|entry| (entry.resolve)(uri).map(|text| (entry, text)))
            .ok_or_else(|| ResourceError::not_found(uri))?;

        debug!("Resolved resource {} via {}", uri, entry.template.raw.uri_template);

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.template.raw.mime_type.clone(),
                text,
                meta: None,
            }],
        })
    }
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: &ReadResourceResult) -> (&str, &str, Option<&str>) {
        match &result.contents[0] {
            ResourceContents::TextResourceContents {
                uri,
                text,
                mime_type,
                ..
            } => (uri.as_str(), text.as_str(), mime_type.as_deref()),
            other => panic!("Expected text contents, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_fixed_resources() {
        let service = ResourceService::new();
        assert!(service.list_resources().await.is_empty());
        assert_eq!(service.list_resource_templates().await.len(), 1);
    }

    #[tokio::test]
    async fn test_read_known_section() {
        let service = ResourceService::new();
        let result = service
            .read_resource("klaviyo://docs/campaigns")
            .await
            .unwrap();

        assert_eq!(result.contents.len(), 1);
        let (uri, text, mime) = text_of(&result);
        assert_eq!(uri, "klaviyo://docs/campaigns");
        assert!(text.starts_with("# Campaigns API"));
        assert_eq!(mime, Some("text/markdown"));
    }

    #[tokio::test]
    async fn test_read_unknown_section_returns_index() {
        let service = ResourceService::new();
        let result = service.read_resource("klaviyo://docs/webhooks").await.unwrap();
        let (_, text, _) = text_of(&result);
        assert!(text.starts_with("Available documentation sections: overview, profiles"));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = ResourceService::new();
        let result = service.read_resource("mcp://server/nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}
