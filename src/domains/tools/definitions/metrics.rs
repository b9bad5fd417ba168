//! Metric tools: listing, lookup and the two reporting queries.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::klaviyo::KlaviyoClient;
use crate::domains::tools::common::{PageParams, nonzero};
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

/// Metric tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetMetricsTool>(),
        ToolEntry::of::<GetMetricTool>(),
        ToolEntry::of::<GetMetricAggregateTool>(),
        ToolEntry::of::<GetMetricTimelineTool>(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    Count,
    Sum,
    Unique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Day,
    Week,
    Month,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MetricIdParams {
    #[schemars(description = "The ID of the metric to retrieve")]
    pub metric_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MetricAggregateParams {
    #[schemars(description = "The ID of the metric")]
    pub metric_id: String,

    #[schemars(description = "Measurement type")]
    pub measurement: Measurement,

    #[schemars(description = "Start date in ISO format")]
    pub start_date: String,

    #[schemars(description = "End date in ISO format")]
    pub end_date: String,

    #[schemars(description = "Time interval")]
    pub interval: Interval,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MetricTimelineParams {
    #[schemars(description = "The ID of the metric")]
    pub metric_id: String,

    #[schemars(description = "Start date in ISO format")]
    pub start_date: Option<String>,

    #[schemars(description = "End date in ISO format")]
    pub end_date: Option<String>,

    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Debug, Serialize)]
struct AggregateQuery<'a> {
    measurement: Measurement,
    start_date: &'a str,
    end_date: &'a str,
    interval: Interval,
}

#[derive(Debug, Serialize)]
struct TimelineQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_cursor: Option<&'a str>,
}

pub struct GetMetricsTool;

#[async_trait]
impl KlaviyoTool for GetMetricsTool {
    const NAME: &'static str = "get_metrics";
    const DESCRIPTION: &'static str = "Get a list of metrics with optional filtering";
    type Params = PageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_metrics(&params.query()).await?.into())
    }
}

pub struct GetMetricTool;

#[async_trait]
impl KlaviyoTool for GetMetricTool {
    const NAME: &'static str = "get_metric";
    const DESCRIPTION: &'static str = "Get a specific metric by ID";
    type Params = MetricIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_metric(&params.metric_id).await?.into())
    }
}

pub struct GetMetricAggregateTool;

#[async_trait]
impl KlaviyoTool for GetMetricAggregateTool {
    const NAME: &'static str = "get_metric_aggregate";
    const DESCRIPTION: &'static str = "Get aggregate data for a metric";
    type Params = MetricAggregateParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let query = AggregateQuery {
            measurement: params.measurement,
            start_date: &params.start_date,
            end_date: &params.end_date,
            interval: params.interval,
        };
        Ok(client
            .get_metric_aggregate(&params.metric_id, &query)
            .await?
            .into())
    }
}

pub struct GetMetricTimelineTool;

#[async_trait]
impl KlaviyoTool for GetMetricTimelineTool {
    const NAME: &'static str = "get_metric_timeline";
    const DESCRIPTION: &'static str = "Get timeline data for a metric";
    type Params = MetricTimelineParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let query = TimelineQuery {
            start_date: params.start_date.as_deref(),
            end_date: params.end_date.as_deref(),
            page_size: nonzero(params.page.page_size),
            page_cursor: params.page.page_cursor.as_deref().filter(|c| !c.is_empty()),
        };
        Ok(client
            .get_metric_timeline(&params.metric_id, &query)
            .await?
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::call;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_aggregate_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metrics/M1/aggregate"))
            .and(query_param("measurement", "unique"))
            .and(query_param("start_date", "2024-01-01"))
            .and(query_param("end_date", "2024-01-31"))
            .and(query_param("interval", "week"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"values": [3]}})))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, text) = call::<GetMetricAggregateTool>(
            &server,
            json!({
                "metric_id": "M1",
                "measurement": "unique",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "interval": "week"
            }),
        )
        .await;
        assert!(!is_error, "{}", text);
    }

    #[tokio::test]
    async fn test_aggregate_rejects_unknown_interval() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (is_error, _) = call::<GetMetricAggregateTool>(
            &server,
            json!({
                "metric_id": "M1",
                "measurement": "count",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "interval": "hour"
            }),
        )
        .await;
        assert!(is_error);
    }

    #[tokio::test]
    async fn test_timeline_optional_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metrics/M1/timeline"))
            .and(query_param("start_date", "2024-02-01"))
            .and(query_param("page_size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, _) = call::<GetMetricTimelineTool>(
            &server,
            json!({"metric_id": "M1", "start_date": "2024-02-01", "page_size": 20}),
        )
        .await;
        assert!(!is_error);
    }

    #[tokio::test]
    async fn test_timeline_zero_page_size_is_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metrics/M1/timeline"))
            .and(query_param_is_missing("page_size"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let (is_error, text) =
            call::<GetMetricTimelineTool>(&server, json!({"metric_id": "M1", "page_size": 0})).await;
        assert!(!is_error, "{}", text);
    }
}
