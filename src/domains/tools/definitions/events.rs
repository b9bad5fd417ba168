//! Event tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::klaviyo::{Document, KlaviyoClient};
use crate::domains::tools::common::{EmailAddress, FilteredPageParams, filled, require_any};
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

const EVENT: &str = "event";

/// Event tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetEventsTool>(),
        ToolEntry::of::<GetEventTool>(),
        ToolEntry::of::<CreateEventTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EventIdParams {
    #[schemars(description = "The ID of the event to retrieve")]
    pub event_id: String,
}

/// The metric an event is recorded against.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EventMetric {
    #[schemars(description = "Name of the metric")]
    pub name: String,

    #[schemars(description = "Service name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// The profile an event belongs to.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EventProfile {
    #[schemars(description = "Email address")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailAddress>,

    #[schemars(description = "Phone number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[schemars(description = "External ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[schemars(description = "Profile properties")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateEventParams {
    #[schemars(description = "Metric information")]
    pub metric: EventMetric,

    #[schemars(description = "Profile information")]
    pub profile: EventProfile,

    #[schemars(description = "Event properties")]
    pub properties: Option<Map<String, Value>>,

    #[schemars(description = "ISO timestamp for the event")]
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventAttributes {
    metric: EventMetric,
    profile: EventProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
}

pub struct GetEventsTool;

#[async_trait]
impl KlaviyoTool for GetEventsTool {
    const NAME: &'static str = "get_events";
    const DESCRIPTION: &'static str = "Get a list of events with optional filtering";
    type Params = FilteredPageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_events(&params.query()).await?.into())
    }
}

pub struct GetEventTool;

#[async_trait]
impl KlaviyoTool for GetEventTool {
    const NAME: &'static str = "get_event";
    const DESCRIPTION: &'static str = "Get a specific event by ID";
    type Params = EventIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_event(&params.event_id).await?.into())
    }
}

pub struct CreateEventTool;

#[async_trait]
impl KlaviyoTool for CreateEventTool {
    const NAME: &'static str = "create_event";
    const DESCRIPTION: &'static str = "Create a new event";
    type Params = CreateEventParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let CreateEventParams {
            metric,
            mut profile,
            properties,
            time,
        } = params;

        profile.phone_number = filled(profile.phone_number);
        profile.external_id = filled(profile.external_id);
        require_any(
            &[
                profile.email.is_some(),
                profile.phone_number.is_some(),
                profile.external_id.is_some(),
            ],
            "email, phone_number, or external_id",
        )?;

        let attributes = EventAttributes {
            metric: EventMetric {
                name: metric.name,
                service: filled(metric.service),
            },
            profile,
            properties,
            time: filled(time),
        };
        let body = Document::create(EVENT, attributes);
        Ok(client.create_event(&body).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::call;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_event_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/events"))
            .and(body_json(json!({
                "data": {
                    "type": "event",
                    "attributes": {
                        "metric": {"name": "Placed Order"},
                        "profile": {"email": "ada@example.com"},
                        "properties": {"value": 42.5},
                        "time": "2024-01-01T00:00:00Z"
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, text) = call::<CreateEventTool>(
            &server,
            json!({
                "metric": {"name": "Placed Order"},
                "profile": {"email": "ada@example.com"},
                "properties": {"value": 42.5},
                "time": "2024-01-01T00:00:00Z"
            }),
        )
        .await;
        assert!(!is_error, "{}", text);
        assert_eq!(text, "null");
    }

    #[tokio::test]
    async fn test_create_event_requires_profile_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let (is_error, text) = call::<CreateEventTool>(
            &server,
            json!({
                "metric": {"name": "Viewed Product"},
                "profile": {"properties": {"tier": "gold"}}
            }),
        )
        .await;
        assert!(is_error);
        assert_eq!(
            text,
            "Error: At least one of email, phone_number, or external_id is required"
        );
    }

    #[tokio::test]
    async fn test_create_event_requires_metric() {
        let server = MockServer::start().await;
        let (is_error, text) =
            call::<CreateEventTool>(&server, json!({"profile": {"external_id": "x"}})).await;
        assert!(is_error);
        assert!(text.contains("metric"), "{}", text);
    }
}
