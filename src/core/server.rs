//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`, one file per Klaviyo
//! resource family. Every tool shares a single lazily-built API client held
//! by a [`ClientHandle`]; the client is only constructed on the first call,
//! so a server without an API key still starts and lists its tools.
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs` and
//! handles calls; listings come from the `ToolRegistry` so that tools are
//! always advertised in registry order.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::klaviyo::ClientHandle;
use crate::domains::{
    resources::ResourceService,
    tools::{ToolRegistry, build_tool_router},
};

const INSTRUCTIONS: &str = "Klaviyo marketing API server. Tools cover profiles, lists, events, \
    campaigns, flows, templates, segments, metrics, catalogs, and data privacy deletion requests. \
    Every tool answers with the API response as JSON text, or a message starting with \"Error:\". \
    Reference notes are available at klaviyo://docs/{section}.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between different domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Name-based dispatch over the same tools the router serves.
    tool_registry: ToolRegistry,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let handle = ClientHandle::shared(config.klaviyo.clone());
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(handle.clone()),
            tool_registry: ToolRegistry::new(handle),
            resource_service: Arc::new(ResourceService::new()),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The shared Klaviyo client handle.
    pub fn client_handle(&self) -> Arc<ClientHandle> {
        self.tool_registry.handle()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools in registry order (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Always yields an envelope; an unknown tool name becomes an error
    /// envelope like any other failure.
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        self.tool_registry.call_tool_enveloped(name, arguments).await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available resource templates (for HTTP transport).
    pub async fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        let templates = self.resource_service.list_resource_templates().await;

        templates
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }
}

/// ServerHandler implementation: tool calls are routed through the
/// ToolRouter, tool listings come from the registry.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                title: Some("Klaviyo MCP Server".to_string()),
                version: self.config.server.version.clone(),
                icons: None,
                website_url: None,
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_registry.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::text_of;
    use serde_json::json;

    fn test_server() -> McpServer {
        McpServer::new(Config::new())
    }

    #[test]
    fn test_server_info() {
        let server = test_server();
        assert_eq!(server.name(), "klaviyo-mcp-server");

        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "klaviyo-mcp-server");
    }

    #[test]
    fn test_list_tools_over_http_shape() {
        let tools = test_server().list_tools();
        assert_eq!(tools.len(), 48);
        assert_eq!(tools[0]["name"], "get_profiles");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
    }

    #[test]
    fn test_list_tools_follows_registry_order() {
        let server = test_server();
        let expected: Vec<String> = ToolRegistry::get_all_tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();

        for _ in 0..5 {
            let listed: Vec<String> = McpServer::new(Config::new())
                .list_tools()
                .iter()
                .filter_map(|t| t["name"].as_str().map(str::to_string))
                .collect();
            assert_eq!(listed, expected);
        }
        assert_eq!(server.list_tools()[47]["name"], "get_deletion_request");
    }

    #[tokio::test]
    async fn test_call_tool_without_key_is_error_envelope() {
        let server = test_server();
        let arguments = json!({ "profile_id": "01H" })
            .as_object()
            .cloned()
            .unwrap_or_default();

        let result = server.call_tool("get_profile", arguments).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Error: Klaviyo API key is not set. Please set the KLAVIYO_API_KEY environment variable."
        );
        // The client itself builds without a key; the key is checked per request.
        assert!(server.client_handle().is_initialized());
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_error_envelope() {
        let result = test_server()
            .call_tool("send_fax", JsonObject::new())
            .await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Tool not found: send_fax");
    }

    #[tokio::test]
    async fn test_read_docs_resource() {
        let server = test_server();
        let value = server.read_resource("klaviyo://docs/lists").await.unwrap();
        assert_eq!(value["contents"][0]["uri"], "klaviyo://docs/lists");
        assert!(server.read_resource("other://x").await.is_err());

        let templates = server.list_resource_templates().await;
        assert_eq!(templates[0]["uriTemplate"], "klaviyo://docs/{section}");
    }
}
