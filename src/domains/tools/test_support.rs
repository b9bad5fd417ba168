//! Helpers for tool tests.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::Value;
use wiremock::MockServer;

use super::contract::{KlaviyoTool, invoke};
use crate::core::config::KlaviyoConfig;
use crate::core::klaviyo::ClientHandle;

pub fn handle_for(server: &MockServer) -> Arc<ClientHandle> {
    ClientHandle::shared(KlaviyoConfig {
        api_key: Some("pk_test".to_string()),
        base_url: server.uri(),
        revision: "2023-12-15".to_string(),
    })
}

pub fn args(value: Value) -> JsonObject {
    value.as_object().cloned().unwrap_or_default()
}

pub fn text_of(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "expected exactly one content block");
    match &result.content[0].raw {
        RawContent::Text(t) => t.text.clone(),
        other => panic!("Expected text content, got {:?}", other),
    }
}

/// Call a tool against a mock server and return `(is_error, text)`.
pub async fn call<T: KlaviyoTool>(server: &MockServer, arguments: Value) -> (bool, String) {
    let handle = handle_for(server);
    let result = invoke::<T>(&handle, args(arguments)).await;
    (result.is_error == Some(true), text_of(&result))
}
