//! The contract every Klaviyo tool implements, and the single wrapper that
//! turns a tool's result into a response envelope.

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{instrument, warn};

use super::error::ToolError;
use crate::core::klaviyo::{ClientHandle, KlaviyoClient};

/// A tool backed by exactly one Klaviyo API call.
///
/// Implementors declare a name, a description and a parameter type; the
/// input schema is generated from `Params`, and argument decoding, client
/// acquisition and error reporting are handled by [`invoke`].
#[async_trait]
pub trait KlaviyoTool: Send + Sync + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Decoded arguments. Required fields, enum values and string formats are
    /// enforced while decoding.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Core logic: build the payload and make the call.
    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError>;

    /// Tool metadata as advertised by `tools/list`.
    fn to_tool() -> Tool
    where
        Self: Sized,
    {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Successful outcome of a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolReply {
    /// The upstream document, shown as pretty-printed JSON.
    Document(Value),
    /// A fixed confirmation sentence.
    Message(String),
}

impl ToolReply {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    fn render(self) -> Result<String, ToolError> {
        match self {
            Self::Document(value) => serde_json::to_string_pretty(&value)
                .map_err(|e| ToolError::internal(format!("Failed to render response: {}", e))),
            Self::Message(text) => Ok(text),
        }
    }
}

impl From<Value> for ToolReply {
    fn from(value: Value) -> Self {
        Self::Document(value)
    }
}

/// Run a tool and wrap the outcome in an envelope.
///
/// Always resolves: any failure becomes a single `Error: <message>` text
/// block with `isError` set.
#[instrument(skip(handle, arguments), fields(tool = T::NAME))]
pub async fn invoke<T: KlaviyoTool>(handle: &ClientHandle, arguments: JsonObject) -> CallToolResult {
    match execute::<T>(handle, arguments).await {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_result(&e),
    }
}

async fn execute<T: KlaviyoTool>(
    handle: &ClientHandle,
    arguments: JsonObject,
) -> Result<String, ToolError> {
    let params: T::Params = serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
    let client = handle.client().await?;
    T::run(client, params).await?.render()
}

/// Build the error envelope for a failed call.
pub fn error_result(error: &ToolError) -> CallToolResult {
    let upstream_status = match error {
        ToolError::Api(e) => e.status(),
        _ => None,
    };
    warn!(upstream_status, "Tool call failed: {}", error);
    CallToolResult::error(vec![Content::text(format!("Error: {}", error))])
}

/// Type-erased entry point of a tool.
pub type ToolCall = fn(Arc<ClientHandle>, JsonObject) -> BoxFuture<'static, CallToolResult>;

fn call_boxed<T: KlaviyoTool>(
    handle: Arc<ClientHandle>,
    arguments: JsonObject,
) -> BoxFuture<'static, CallToolResult> {
    async move { invoke::<T>(&handle, arguments).await }.boxed()
}

/// A registered tool: its metadata plus its type-erased handler.
#[derive(Clone)]
pub struct ToolEntry {
    tool: Tool,
    call: ToolCall,
}

impl ToolEntry {
    pub fn of<T: KlaviyoTool>() -> Self {
        Self {
            tool: T::to_tool(),
            call: call_boxed::<T>,
        }
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Invoke the tool with raw arguments.
    pub fn call(&self, handle: Arc<ClientHandle>, arguments: JsonObject) -> BoxFuture<'static, CallToolResult> {
        (self.call)(handle, arguments)
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn route<S>(&self, handle: Arc<ClientHandle>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        let call = self.call;
        ToolRoute::new_dyn(self.tool.clone(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let handle = handle.clone();
            async move { Ok(call(handle, args).await) }.boxed()
        })
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.tool.name)
            .finish()
    }
}
