//! Campaign tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::klaviyo::{Document, KlaviyoClient, Relationship};
use crate::domains::tools::common::{EmailAddress, FilteredPageParams, filled};
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

const CAMPAIGN: &str = "campaign";

/// Campaign tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetCampaignsTool>(),
        ToolEntry::of::<GetCampaignTool>(),
        ToolEntry::of::<CreateCampaignTool>(),
        ToolEntry::of::<UpdateCampaignTool>(),
        ToolEntry::of::<DeleteCampaignTool>(),
        ToolEntry::of::<SendCampaignTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CampaignIdParams {
    #[schemars(description = "The ID of the campaign")]
    pub campaign_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateCampaignParams {
    #[schemars(description = "Name of the campaign")]
    pub name: String,

    #[schemars(description = "ID of the template to use")]
    pub template_id: String,

    #[schemars(description = "ID of the list to send to")]
    pub list_id: String,

    #[schemars(description = "Email subject line")]
    pub subject: String,

    #[schemars(description = "Sender email address")]
    pub from_email: EmailAddress,

    #[schemars(description = "Sender name")]
    pub from_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateCampaignParams {
    #[schemars(description = "The ID of the campaign to update")]
    pub campaign_id: String,

    #[schemars(description = "Name of the campaign")]
    pub name: Option<String>,

    #[schemars(description = "Email subject line")]
    pub subject: Option<String>,

    #[schemars(description = "Sender email address")]
    pub from_email: Option<EmailAddress>,

    #[schemars(description = "Sender name")]
    pub from_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CampaignAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_email: Option<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CampaignRelationships {
    template: Relationship,
    list: Relationship,
}

pub struct GetCampaignsTool;

#[async_trait]
impl KlaviyoTool for GetCampaignsTool {
    const NAME: &'static str = "get_campaigns";
    const DESCRIPTION: &'static str = "Get a list of campaigns with optional filtering";
    type Params = FilteredPageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_campaigns(&params.query()).await?.into())
    }
}

pub struct GetCampaignTool;

#[async_trait]
impl KlaviyoTool for GetCampaignTool {
    const NAME: &'static str = "get_campaign";
    const DESCRIPTION: &'static str = "Get a specific campaign by ID";
    type Params = CampaignIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_campaign(&params.campaign_id).await?.into())
    }
}

pub struct CreateCampaignTool;

#[async_trait]
impl KlaviyoTool for CreateCampaignTool {
    const NAME: &'static str = "create_campaign";
    const DESCRIPTION: &'static str = "Create a new campaign";
    type Params = CreateCampaignParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let attributes = CampaignAttributes {
            name: Some(params.name),
            subject: Some(params.subject),
            from_email: Some(params.from_email),
            from_name: Some(params.from_name),
        };
        let relationships = CampaignRelationships {
            template: Relationship::to("template", params.template_id),
            list: Relationship::to("list", params.list_id),
        };
        let body = Document::create_related(CAMPAIGN, attributes, relationships);
        Ok(client.create_campaign(&body).await?.into())
    }
}

pub struct UpdateCampaignTool;

#[async_trait]
impl KlaviyoTool for UpdateCampaignTool {
    const NAME: &'static str = "update_campaign";
    const DESCRIPTION: &'static str = "Update an existing campaign";
    type Params = UpdateCampaignParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let attributes = CampaignAttributes {
            name: filled(params.name),
            subject: filled(params.subject),
            from_email: params.from_email,
            from_name: filled(params.from_name),
        };
        let body = Document::update(CAMPAIGN, params.campaign_id.as_str(), attributes);
        Ok(client
            .update_campaign(&params.campaign_id, &body)
            .await?
            .into())
    }
}

pub struct DeleteCampaignTool;

#[async_trait]
impl KlaviyoTool for DeleteCampaignTool {
    const NAME: &'static str = "delete_campaign";
    const DESCRIPTION: &'static str = "Delete a campaign";
    type Params = CampaignIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        client.delete_campaign(&params.campaign_id).await?;
        Ok(ToolReply::message(format!(
            "Campaign {} successfully deleted",
            params.campaign_id
        )))
    }
}

pub struct SendCampaignTool;

#[async_trait]
impl KlaviyoTool for SendCampaignTool {
    const NAME: &'static str = "send_campaign";
    const DESCRIPTION: &'static str = "Send a campaign";
    type Params = CampaignIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        client.send_campaign(&params.campaign_id).await?;
        Ok(ToolReply::message(format!(
            "Campaign {} successfully sent",
            params.campaign_id
        )))
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
    async fn test_create_campaign_links_template_and_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/campaigns"))
            .and(body_json(json!({
                "data": {
                    "type": "campaign",
                    "attributes": {
                        "name": "Spring Sale",
                        "subject": "20% off",
                        "from_email": "news@shop.example.com",
                        "from_name": "Shop"
                    },
                    "relationships": {
                        "template": {"data": {"type": "template", "id": "T1"}},
                        "list": {"data": {"type": "list", "id": "L1"}}
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "C1"}})))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, text) = call::<CreateCampaignTool>(
            &server,
            json!({
                "name": "Spring Sale",
                "template_id": "T1",
                "list_id": "L1",
                "subject": "20% off",
                "from_email": "news@shop.example.com",
                "from_name": "Shop"
            }),
        )
        .await;
        assert!(!is_error, "{}", text);
    }

    #[tokio::test]
    async fn test_update_campaign_sends_only_supplied_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/campaigns/C1"))
            .and(body_json(json!({
                "data": {"type": "campaign", "id": "C1", "attributes": {"subject": "Last chance"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, _) = call::<UpdateCampaignTool>(
            &server,
            json!({"campaign_id": "C1", "subject": "Last chance"}),
        )
        .await;
        assert!(!is_error);
    }

    #[tokio::test]
    async fn test_send_campaign_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/campaigns/C1/send"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, text) = call::<SendCampaignTool>(&server, json!({"campaign_id": "C1"})).await;
        assert!(!is_error);
        assert_eq!(text, "Campaign C1 successfully sent");
    }

    #[tokio::test]
    async fn test_create_campaign_rejects_bad_sender() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let (is_error, _) = call::<CreateCampaignTool>(
            &server,
            json!({
                "name": "n", "template_id": "T1", "list_id": "L1",
                "subject": "s", "from_email": "shop", "from_name": "Shop"
            }),
        )
        .await;
        assert!(is_error);
    }
}
