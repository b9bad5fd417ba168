//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The ordered list of all available tools
//! - Dispatch by name (used by the HTTP transport)
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::warn;

use super::contract::{ToolEntry, error_result};
use super::definitions::{
    campaigns, catalogs, data_privacy, events, flows, lists, metrics, profiles, segments,
    templates,
};
use super::error::ToolError;
use crate::core::klaviyo::ClientHandle;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Holds every tool entry in a fixed order along with the shared client
/// handle the tools call through.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    handle: Arc<ClientHandle>,
    entries: Arc<Vec<ToolEntry>>,
}

impl ToolRegistry {
    /// Create a new tool registry around the shared client handle.
    pub fn new(handle: Arc<ClientHandle>) -> Self {
        Self {
            handle,
            entries: Arc::new(Self::entries()),
        }
    }

    /// All tool entries in registry order: profile, list, event, campaign,
    /// flow, template, segment, metric, catalog, data privacy.
    pub fn entries() -> Vec<ToolEntry> {
        [
            profiles::tools(),
            lists::tools(),
            events::tools(),
            campaigns::tools(),
            flows::tools(),
            templates::tools(),
            segments::tools(),
            metrics::tools(),
            catalogs::tools(),
            data_privacy::tools(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.iter().map(ToolEntry::name).collect()
    }

    /// Get all tools as Tool models (metadata), in registry order.
    pub fn get_all_tools() -> Vec<Tool> {
        Self::entries()
            .into_iter()
            .map(|entry| entry.tool().clone())
            .collect()
    }

    /// Tool metadata for `tools/list`, in registry order.
    ///
    /// Every transport lists tools from here; `ToolRouter::list_all` has no
    /// stable order.
    pub fn tools(&self) -> Vec<Tool> {
        self.entries
            .iter()
            .map(|entry| entry.tool().clone())
            .collect()
    }

    /// The shared client handle.
    pub fn handle(&self) -> Arc<ClientHandle> {
        self.handle.clone()
    }

    /// Dispatch a tool call by name.
    ///
    /// An unknown name is an error for the caller to report; every known
    /// tool resolves to an envelope.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.name() == name)
            .ok_or_else(|| {
                warn!("Unknown tool requested: {}", name);
                ToolError::not_found(name)
            })?;
        Ok(entry.call(self.handle.clone(), arguments).await)
    }

    /// Dispatch a tool call, folding an unknown name into an error envelope.
    pub async fn call_tool_enveloped(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        match self.call_tool(name, arguments).await {
            Ok(result) => result,
            Err(e) => error_result(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::KlaviyoConfig;
    use crate::domains::tools::test_support::{args, handle_for, text_of};
    use serde_json::json;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EXPECTED_ORDER: [&str; 48] = [
        "get_profiles",
        "get_profile",
        "create_profile",
        "update_profile",
        "delete_profile",
        "get_lists",
        "get_list",
        "create_list",
        "update_list",
        "delete_list",
        "get_list_profiles",
        "add_profiles_to_list",
        "remove_profiles_from_list",
        "get_events",
        "get_event",
        "create_event",
        "get_campaigns",
        "get_campaign",
        "create_campaign",
        "update_campaign",
        "delete_campaign",
        "send_campaign",
        "get_flows",
        "get_flow",
        "update_flow_status",
        "get_templates",
        "get_template",
        "create_template",
        "update_template",
        "delete_template",
        "clone_template",
        "render_template",
        "get_segments",
        "get_segment",
        "get_metrics",
        "get_metric",
        "get_metric_aggregate",
        "get_metric_timeline",
        "get_catalogs",
        "get_catalog",
        "get_catalog_items",
        "get_catalog_item",
        "create_catalog_item",
        "update_catalog_item",
        "delete_catalog_item",
        "create_deletion_request",
        "get_deletion_requests",
        "get_deletion_request",
    ];

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(ClientHandle::shared(KlaviyoConfig::default()))
    }

    #[test]
    fn test_registry_order() {
        let registry = test_registry();
        assert_eq!(registry.tool_names(), EXPECTED_ORDER.to_vec());
    }

    #[test]
    fn test_tool_listing_is_stable() {
        let registry = test_registry();
        for _ in 0..3 {
            let listed: Vec<String> = registry.tools().iter().map(|t| t.name.to_string()).collect();
            assert_eq!(listed, EXPECTED_ORDER.to_vec());
        }
    }

    #[test]
    fn test_tool_names_unique() {
        let names: HashSet<_> = ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names.len(), 48);
    }

    #[test]
    fn test_every_tool_has_object_schema_and_description() {
        for tool in ToolRegistry::get_all_tools() {
            assert_eq!(
                tool.input_schema.get("type").and_then(|v| v.as_str()),
                Some("object"),
                "{} schema is not an object",
                tool.name
            );
            assert!(
                tool.description.as_deref().is_some_and(|d| !d.is_empty()),
                "{} has no description",
                tool.name
            );
        }
    }

    #[test]
    fn test_required_fields_in_schema() {
        let tools = ToolRegistry::get_all_tools();
        let create_campaign = tools
            .iter()
            .find(|t| t.name == "create_campaign")
            .unwrap();
        let required = create_campaign.input_schema["required"].as_array().unwrap();
        for field in ["name", "template_id", "list_id", "subject", "from_email", "from_name"] {
            assert!(required.contains(&json!(field)), "missing {}", field);
        }
        assert_eq!(
            create_campaign.input_schema["properties"]["from_email"]["format"],
            "email"
        );

        let get_profiles = tools.iter().find(|t| t.name == "get_profiles").unwrap();
        assert!(get_profiles.input_schema.get("required").is_none_or(|r| r
            .as_array()
            .is_some_and(|a| a.is_empty())));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = test_registry();
        let err = registry.call_tool("nope", JsonObject::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));

        let result = registry.call_tool_enveloped("nope", JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Tool not found: nope");
    }

    #[tokio::test]
    async fn test_dispatch_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lists/L1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "L1"}})))
            .expect(1)
            .mount(&server)
            .await;

        let registry = ToolRegistry::new(handle_for(&server));
        let result = registry
            .call_tool("get_list", args(json!({"list_id": "L1"})))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(text_of(&result).contains("\"L1\""));
    }

    #[tokio::test]
    async fn test_every_tool_envelopes_missing_key() {
        let registry = test_registry();
        for name in EXPECTED_ORDER {
            let result = registry
                .call_tool(name, minimal_arguments(name))
                .await
                .unwrap();
            assert_eq!(result.is_error, Some(true), "{}", name);
            assert_eq!(
                text_of(&result),
                "Error: Klaviyo API key is not set. Please set the KLAVIYO_API_KEY environment variable.",
                "{}",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_every_tool_envelopes_unreachable_upstream() {
        let registry = ToolRegistry::new(ClientHandle::shared(KlaviyoConfig {
            api_key: Some("pk_test".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            revision: "2023-12-15".to_string(),
        }));
        for name in EXPECTED_ORDER {
            let result = registry
                .call_tool(name, minimal_arguments(name))
                .await
                .unwrap();
            assert_eq!(result.is_error, Some(true), "{}", name);
            assert_eq!(
                text_of(&result),
                "Error: Klaviyo API Request Error: No response received",
                "{}",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_every_tool_envelopes_upstream_rejection() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let registry = ToolRegistry::new(handle_for(&server));
        for name in EXPECTED_ORDER {
            let result = registry
                .call_tool(name, minimal_arguments(name))
                .await
                .unwrap();
            assert_eq!(result.is_error, Some(true), "{}", name);
            assert_eq!(
                text_of(&result),
                "Error: Klaviyo API Error: 429 - slow down",
                "{}",
                name
            );
        }
    }

    /// Smallest valid argument object for each tool.
    fn minimal_arguments(name: &str) -> JsonObject {
        let value = match name {
            "get_profile" | "delete_profile" | "update_profile" => json!({"profile_id": "P1"}),
            "create_profile" => json!({"email": "ada@example.com"}),
            "get_list" | "delete_list" | "get_list_profiles" => json!({"list_id": "L1"}),
            "create_list" => json!({"name": "VIP"}),
            "update_list" => json!({"list_id": "L1", "name": "VIP"}),
            "add_profiles_to_list" | "remove_profiles_from_list" => {
                json!({"list_id": "L1", "profile_ids": ["P1"]})
            }
            "get_event" => json!({"event_id": "E1"}),
            "create_event" => json!({
                "metric": {"name": "Viewed"},
                "profile": {"external_id": "X1"}
            }),
            "get_campaign" | "update_campaign" | "delete_campaign" | "send_campaign" => {
                json!({"campaign_id": "C1"})
            }
            "create_campaign" => json!({
                "name": "n",
                "template_id": "T1",
                "list_id": "L1",
                "subject": "s",
                "from_email": "shop@example.com",
                "from_name": "Shop"
            }),
            "get_flow" => json!({"flow_id": "F1"}),
            "update_flow_status" => json!({"flow_id": "F1", "status": "live"}),
            "get_template" | "update_template" | "delete_template" => {
                json!({"template_id": "T1"})
            }
            "create_template" => json!({"name": "n", "html": "<p/>"}),
            "clone_template" => json!({"template_id": "T1", "name": "copy"}),
            "render_template" => json!({"template_id": "T1", "context": {}}),
            "get_segment" => json!({"segment_id": "S1"}),
            "get_metric" | "get_metric_timeline" => json!({"metric_id": "M1"}),
            "get_metric_aggregate" => json!({
                "metric_id": "M1",
                "measurement": "count",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "interval": "day"
            }),
            "get_catalog" | "get_catalog_items" => json!({"catalog_id": "CAT"}),
            "get_catalog_item" | "delete_catalog_item" => {
                json!({"catalog_id": "CAT", "item_id": "I1"})
            }
            "create_catalog_item" => json!({
                "catalog_id": "CAT",
                "external_id": "SKU",
                "title": "Mug"
            }),
            "update_catalog_item" => json!({"catalog_id": "CAT", "item_id": "I1"}),
            "create_deletion_request" => json!({"profile_id": "P1"}),
            "get_deletion_request" => json!({"request_id": "R1"}),
            _ => json!({}),
        };
        args(value)
    }
}
