//! Template tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::klaviyo::{Document, KlaviyoClient};
use crate::domains::tools::common::{FilteredPageParams, filled};
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

const TEMPLATE: &str = "template";
const TEMPLATE_RENDER: &str = "template-render";

/// Template tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetTemplatesTool>(),
        ToolEntry::of::<GetTemplateTool>(),
        ToolEntry::of::<CreateTemplateTool>(),
        ToolEntry::of::<UpdateTemplateTool>(),
        ToolEntry::of::<DeleteTemplateTool>(),
        ToolEntry::of::<CloneTemplateTool>(),
        ToolEntry::of::<RenderTemplateTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TemplateIdParams {
    #[schemars(description = "The ID of the template")]
    pub template_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTemplateParams {
    #[schemars(description = "Name of the template")]
    pub name: String,

    #[schemars(description = "HTML content of the template")]
    pub html: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTemplateParams {
    #[schemars(description = "The ID of the template to update")]
    pub template_id: String,

    #[schemars(description = "Name of the template")]
    pub name: Option<String>,

    #[schemars(description = "HTML content of the template")]
    pub html: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CloneTemplateParams {
    #[schemars(description = "The ID of the template to clone")]
    pub template_id: String,

    #[schemars(description = "Name for the cloned template")]
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenderTemplateParams {
    #[schemars(description = "The ID of the template to render")]
    pub template_id: String,

    #[schemars(description = "Context variables for rendering")]
    pub context: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct TemplateAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

#[derive(Debug, Serialize)]
struct RenderAttributes {
    context: Map<String, Value>,
}

pub struct GetTemplatesTool;

#[async_trait]
impl KlaviyoTool for GetTemplatesTool {
    const NAME: &'static str = "get_templates";
    const DESCRIPTION: &'static str = "Get a list of templates with optional filtering";
    type Params = FilteredPageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_templates(&params.query()).await?.into())
    }
}

pub struct GetTemplateTool;

#[async_trait]
impl KlaviyoTool for GetTemplateTool {
    const NAME: &'static str = "get_template";
    const DESCRIPTION: &'static str = "Get a specific template by ID";
    type Params = TemplateIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_template(&params.template_id).await?.into())
    }
}

pub struct CreateTemplateTool;

#[async_trait]
impl KlaviyoTool for CreateTemplateTool {
    const NAME: &'static str = "create_template";
    const DESCRIPTION: &'static str = "Create a new template";
    type Params = CreateTemplateParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let attributes = TemplateAttributes {
            name: Some(params.name),
            html: Some(params.html),
        };
        let body = Document::create(TEMPLATE, attributes);
        Ok(client.create_template(&body).await?.into())
    }
}

pub struct UpdateTemplateTool;

#[async_trait]
impl KlaviyoTool for UpdateTemplateTool {
    const NAME: &'static str = "update_template";
    const DESCRIPTION: &'static str = "Update an existing template";
    type Params = UpdateTemplateParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let attributes = TemplateAttributes {
            name: filled(params.name),
            html: filled(params.html),
        };
        let body = Document::update(TEMPLATE, params.template_id.as_str(), attributes);
        Ok(client
            .update_template(&params.template_id, &body)
            .await?
            .into())
    }
}

pub struct DeleteTemplateTool;

#[async_trait]
impl KlaviyoTool for DeleteTemplateTool {
    const NAME: &'static str = "delete_template";
    const DESCRIPTION: &'static str = "Delete a template";
    type Params = TemplateIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        client.delete_template(&params.template_id).await?;
        Ok(ToolReply::message(format!(
            "Template {} successfully deleted",
            params.template_id
        )))
    }
}

pub struct CloneTemplateTool;

#[async_trait]
impl KlaviyoTool for CloneTemplateTool {
    const NAME: &'static str = "clone_template";
    const DESCRIPTION: &'static str = "Clone an existing template";
    type Params = CloneTemplateParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let attributes = TemplateAttributes {
            name: Some(params.name),
            html: None,
        };
        let body = Document::create(TEMPLATE, attributes);
        Ok(client
            .clone_template(&params.template_id, &body)
            .await?
            .into())
    }
}

pub struct RenderTemplateTool;

#[async_trait]
impl KlaviyoTool for RenderTemplateTool {
    const NAME: &'static str = "render_template";
    const DESCRIPTION: &'static str = "Render a template with context variables";
    type Params = RenderTemplateParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let body = Document::create(
            TEMPLATE_RENDER,
            RenderAttributes {
                context: params.context,
            },
        );
        Ok(client
            .render_template(&params.template_id, &body)
            .await?
            .into())
    }
}
