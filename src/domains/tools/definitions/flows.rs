//! Flow tools.

use std::fmt;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::klaviyo::KlaviyoClient;
use crate::domains::tools::common::FilteredPageParams;
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

/// Flow tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetFlowsTool>(),
        ToolEntry::of::<GetFlowTool>(),
        ToolEntry::of::<UpdateFlowStatusTool>(),
    ]
}

/// Run state of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    Draft,
    Manual,
    Live,
}

impl FlowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Manual => "manual",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FlowIdParams {
    #[schemars(description = "The ID of the flow to retrieve")]
    pub flow_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateFlowStatusParams {
    #[schemars(description = "The ID of the flow to update")]
    pub flow_id: String,

    #[schemars(description = "New status for the flow")]
    pub status: FlowStatus,
}

pub struct GetFlowsTool;

#[async_trait]
impl KlaviyoTool for GetFlowsTool {
    const NAME: &'static str = "get_flows";
    const DESCRIPTION: &'static str = "Get a list of flows with optional filtering";
    type Params = FilteredPageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_flows(&params.query()).await?.into())
    }
}

pub struct GetFlowTool;

#[async_trait]
impl KlaviyoTool for GetFlowTool {
    const NAME: &'static str = "get_flow";
    const DESCRIPTION: &'static str = "Get a specific flow by ID";
    type Params = FlowIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_flow(&params.flow_id).await?.into())
    }
}

pub struct UpdateFlowStatusTool;

#[async_trait]
impl KlaviyoTool for UpdateFlowStatusTool {
    const NAME: &'static str = "update_flow_status";
    const DESCRIPTION: &'static str = "Update the status of a flow (draft, manual, live)";
    type Params = UpdateFlowStatusParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        client
            .update_flow_status(&params.flow_id, params.status.as_str())
            .await?;
        Ok(ToolReply::message(format!(
            "Flow {} status updated to {}",
            params.flow_id, params.status
        )))
    }
}
