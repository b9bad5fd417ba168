//! Segment tools (read-only).

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::klaviyo::KlaviyoClient;
use crate::domains::tools::common::FilteredPageParams;
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetSegmentsTool>(),
        ToolEntry::of::<GetSegmentTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SegmentIdParams {
    #[schemars(description = "The ID of the segment to retrieve")]
    pub segment_id: String,
}

pub struct GetSegmentsTool;

#[async_trait]
impl KlaviyoTool for GetSegmentsTool {
    const NAME: &'static str = "get_segments";
    const DESCRIPTION: &'static str = "Get a list of segments with optional filtering";
    type Params = FilteredPageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_segments(&params.query()).await?.into())
    }
}

pub struct GetSegmentTool;

#[async_trait]
impl KlaviyoTool for GetSegmentTool {
    const NAME: &'static str = "get_segment";
    const DESCRIPTION: &'static str = "Get a specific segment by ID";
    type Params = SegmentIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_segment(&params.segment_id).await?.into())
    }
}
