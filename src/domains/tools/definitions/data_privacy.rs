//! Data privacy tools: profile deletion requests.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::klaviyo::{Document, KlaviyoClient};
use crate::domains::tools::common::{EmailAddress, PageParams, filled, require_any};
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

const DELETION_REQUEST: &str = "data-privacy-deletion-request";

/// Data privacy tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<CreateDeletionRequestTool>(),
        ToolEntry::of::<GetDeletionRequestsTool>(),
        ToolEntry::of::<GetDeletionRequestTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDeletionRequestParams {
    #[schemars(description = "Email address to delete")]
    pub email: Option<EmailAddress>,

    #[schemars(description = "Phone number to delete")]
    pub phone_number: Option<String>,

    #[schemars(description = "Profile ID to delete")]
    pub profile_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeletionRequestIdParams {
    #[schemars(description = "The ID of the deletion request to retrieve")]
    pub request_id: String,
}

/// One `{type, value}` entry of a deletion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: String,
}

impl CreateDeletionRequestParams {
    /// Identifiers in fixed order: email, phone number, profile id.
    fn identifiers(self) -> Vec<Identifier> {
        [
            ("email", self.email.map(String::from)),
            ("phone_number", filled(self.phone_number)),
            ("profile_id", filled(self.profile_id)),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|value| Identifier { kind, value }))
        .collect()
    }
}

#[derive(Debug, Serialize)]
struct DeletionRequestAttributes {
    identifiers: Vec<Identifier>,
}

pub struct CreateDeletionRequestTool;

#[async_trait]
impl KlaviyoTool for CreateDeletionRequestTool {
    const NAME: &'static str = "create_deletion_request";
    const DESCRIPTION: &'static str = "Create a new data deletion request";
    type Params = CreateDeletionRequestParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let identifiers = params.identifiers();
        require_any(
            &[!identifiers.is_empty()],
            "email, phone_number, or profile_id",
        )?;

        let body = Document::create(DELETION_REQUEST, DeletionRequestAttributes { identifiers });
        Ok(client.create_deletion_request(&body).await?.into())
    }
}

pub struct GetDeletionRequestsTool;

#[async_trait]
impl KlaviyoTool for GetDeletionRequestsTool {
    const NAME: &'static str = "get_deletion_requests";
    const DESCRIPTION: &'static str = "Get a list of data deletion requests";
    type Params = PageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_deletion_requests(&params.query()).await?.into())
    }
}

pub struct GetDeletionRequestTool;

#[async_trait]
impl KlaviyoTool for GetDeletionRequestTool {
    const NAME: &'static str = "get_deletion_request";
    const DESCRIPTION: &'static str = "Get a specific data deletion request by ID";
    type Params = DeletionRequestIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_deletion_request(&params.request_id).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::call;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_identifier_order() {
        let params = CreateDeletionRequestParams {
            email: None,
            phone_number: Some("+15555550100".to_string()),
            profile_id: Some("P1".to_string()),
        };
        let ids = params.identifiers();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].kind, "phone_number");
        assert_eq!(ids[1].kind, "profile_id");
    }

    #[tokio::test]
    async fn test_create_deletion_request_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/data-privacy/deletion-requests"))
            .and(body_json(json!({
                "data": {
                    "type": "data-privacy-deletion-request",
                    "attributes": {
                        "identifiers": [
                            {"type": "email", "value": "ada@example.com"},
                            {"type": "profile_id", "value": "P1"}
                        ]
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, text) = call::<CreateDeletionRequestTool>(
            &server,
            json!({"profile_id": "P1", "email": "ada@example.com"}),
        )
        .await;
        assert!(!is_error, "{}", text);
    }

    #[tokio::test]
    async fn test_create_deletion_request_requires_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let (is_error, text) = call::<CreateDeletionRequestTool>(&server, json!({})).await;
        assert!(is_error);
        assert_eq!(
            text,
            "Error: At least one of email, phone_number, or profile_id is required"
        );
    }

    #[tokio::test]
    async fn test_get_deletion_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data-privacy/deletion-requests/R1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "R1"}})))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, text) =
            call::<GetDeletionRequestTool>(&server, json!({"request_id": "R1"})).await;
        assert!(!is_error);
        assert!(text.contains("\"R1\""));
    }
}
