//! Named Klaviyo operations.
//!
//! Each operation picks a method, fills identifiers into a fixed path and
//! passes the caller's body or query through to [`KlaviyoClient::request`].

use serde::Serialize;
use serde_json::{Value, json};

use super::client::KlaviyoClient;
use super::error::KlaviyoResult;
use super::request::ApiRequest;

const PROFILES: &str = "profiles";
const LISTS: &str = "lists";
const EVENTS: &str = "events";
const CAMPAIGNS: &str = "campaigns";
const FLOWS: &str = "flows";
const TEMPLATES: &str = "templates";
const SEGMENTS: &str = "segments";
const METRICS: &str = "metrics";
const CATALOGS: &str = "catalogs";
const DATA_PRIVACY: &str = "data-privacy";
const DELETION_REQUESTS: &str = "deletion-requests";

impl KlaviyoClient {
    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    pub async fn get_profiles<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([PROFILES]).query(query)?).await
    }

    pub async fn get_profile(&self, profile_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([PROFILES, profile_id])).await
    }

    pub async fn create_profile<B: Serialize + ?Sized>(&self, body: &B) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([PROFILES]).json(body)?).await
    }

    pub async fn update_profile<B: Serialize + ?Sized>(
        &self,
        profile_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::patch([PROFILES, profile_id]).json(body)?)
            .await
    }

    pub async fn delete_profile(&self, profile_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([PROFILES, profile_id])).await
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    pub async fn get_lists<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([LISTS]).query(query)?).await
    }

    pub async fn get_list(&self, list_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([LISTS, list_id])).await
    }

    pub async fn create_list<B: Serialize + ?Sized>(&self, body: &B) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([LISTS]).json(body)?).await
    }

    pub async fn update_list<B: Serialize + ?Sized>(
        &self,
        list_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::patch([LISTS, list_id]).json(body)?)
            .await
    }

    pub async fn delete_list(&self, list_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([LISTS, list_id])).await
    }

    pub async fn get_list_profiles<Q: Serialize + ?Sized>(
        &self,
        list_id: &str,
        query: &Q,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([LISTS, list_id, PROFILES]).query(query)?)
            .await
    }

    pub async fn add_profiles_to_list<B: Serialize + ?Sized>(
        &self,
        list_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([LISTS, list_id, "relationships", PROFILES]).json(body)?)
            .await
    }

    pub async fn remove_profiles_from_list<B: Serialize + ?Sized>(
        &self,
        list_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([LISTS, list_id, "relationships", PROFILES]).json(body)?)
            .await
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub async fn get_events<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([EVENTS]).query(query)?).await
    }

    pub async fn get_event(&self, event_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([EVENTS, event_id])).await
    }

    pub async fn create_event<B: Serialize + ?Sized>(&self, body: &B) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([EVENTS]).json(body)?).await
    }

    // ------------------------------------------------------------------
    // Campaigns
    // ------------------------------------------------------------------

    pub async fn get_campaigns<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([CAMPAIGNS]).query(query)?).await
    }

    pub async fn get_campaign(&self, campaign_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([CAMPAIGNS, campaign_id])).await
    }

    pub async fn create_campaign<B: Serialize + ?Sized>(&self, body: &B) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([CAMPAIGNS]).json(body)?).await
    }

    pub async fn update_campaign<B: Serialize + ?Sized>(
        &self,
        campaign_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::patch([CAMPAIGNS, campaign_id]).json(body)?)
            .await
    }

    pub async fn delete_campaign(&self, campaign_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([CAMPAIGNS, campaign_id]))
            .await
    }

    pub async fn send_campaign(&self, campaign_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([CAMPAIGNS, campaign_id, "send"]))
            .await
    }

    // ------------------------------------------------------------------
    // Flows
    // ------------------------------------------------------------------

    pub async fn get_flows<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([FLOWS]).query(query)?).await
    }

    pub async fn get_flow(&self, flow_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([FLOWS, flow_id])).await
    }

    pub async fn create_flow<B: Serialize + ?Sized>(&self, body: &B) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([FLOWS]).json(body)?).await
    }

    pub async fn update_flow<B: Serialize + ?Sized>(
        &self,
        flow_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::patch([FLOWS, flow_id]).json(body)?)
            .await
    }

    pub async fn delete_flow(&self, flow_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([FLOWS, flow_id])).await
    }

    pub async fn update_flow_status(&self, flow_id: &str, status: &str) -> KlaviyoResult<Value> {
        self.request(
            ApiRequest::post([FLOWS, flow_id, "actions", "update-status"])
                .json(&json!({ "status": status }))?,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    pub async fn get_templates<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([TEMPLATES]).query(query)?).await
    }

    pub async fn get_template(&self, template_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([TEMPLATES, template_id])).await
    }

    pub async fn create_template<B: Serialize + ?Sized>(&self, body: &B) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([TEMPLATES]).json(body)?).await
    }

    pub async fn update_template<B: Serialize + ?Sized>(
        &self,
        template_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::patch([TEMPLATES, template_id]).json(body)?)
            .await
    }

    pub async fn delete_template(&self, template_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([TEMPLATES, template_id]))
            .await
    }

    pub async fn clone_template<B: Serialize + ?Sized>(
        &self,
        template_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([TEMPLATES, template_id, "clone"]).json(body)?)
            .await
    }

    pub async fn render_template<B: Serialize + ?Sized>(
        &self,
        template_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([TEMPLATES, template_id, "render"]).json(body)?)
            .await
    }

    // ------------------------------------------------------------------
    // Segments
    // ------------------------------------------------------------------

    pub async fn get_segments<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([SEGMENTS]).query(query)?).await
    }

    pub async fn get_segment(&self, segment_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([SEGMENTS, segment_id])).await
    }

    pub async fn create_segment<B: Serialize + ?Sized>(&self, body: &B) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([SEGMENTS]).json(body)?).await
    }

    pub async fn update_segment<B: Serialize + ?Sized>(
        &self,
        segment_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::patch([SEGMENTS, segment_id]).json(body)?)
            .await
    }

    pub async fn delete_segment(&self, segment_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([SEGMENTS, segment_id]))
            .await
    }

    // ------------------------------------------------------------------
    // Metrics
    // ------------------------------------------------------------------

    pub async fn get_metrics<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([METRICS]).query(query)?).await
    }

    pub async fn get_metric(&self, metric_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([METRICS, metric_id])).await
    }

    pub async fn get_metric_aggregate<Q: Serialize + ?Sized>(
        &self,
        metric_id: &str,
        query: &Q,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([METRICS, metric_id, "aggregate"]).query(query)?)
            .await
    }

    pub async fn get_metric_timeline<Q: Serialize + ?Sized>(
        &self,
        metric_id: &str,
        query: &Q,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([METRICS, metric_id, "timeline"]).query(query)?)
            .await
    }

    // ------------------------------------------------------------------
    // Catalogs
    // ------------------------------------------------------------------

    pub async fn get_catalogs<Q: Serialize + ?Sized>(&self, query: &Q) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([CATALOGS]).query(query)?).await
    }

    pub async fn get_catalog(&self, catalog_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([CATALOGS, catalog_id])).await
    }

    pub async fn get_catalog_items<Q: Serialize + ?Sized>(
        &self,
        catalog_id: &str,
        query: &Q,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([CATALOGS, catalog_id, "items"]).query(query)?)
            .await
    }

    pub async fn get_catalog_item(&self, catalog_id: &str, item_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([CATALOGS, catalog_id, "items", item_id]))
            .await
    }

    pub async fn create_catalog_item<B: Serialize + ?Sized>(
        &self,
        catalog_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([CATALOGS, catalog_id, "items"]).json(body)?)
            .await
    }

    pub async fn update_catalog_item<B: Serialize + ?Sized>(
        &self,
        catalog_id: &str,
        item_id: &str,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::patch([CATALOGS, catalog_id, "items", item_id]).json(body)?)
            .await
    }

    pub async fn delete_catalog_item(
        &self,
        catalog_id: &str,
        item_id: &str,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::delete([CATALOGS, catalog_id, "items", item_id]))
            .await
    }

    // ------------------------------------------------------------------
    // Data privacy
    // ------------------------------------------------------------------

    pub async fn create_deletion_request<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::post([DATA_PRIVACY, DELETION_REQUESTS]).json(body)?)
            .await
    }

    pub async fn get_deletion_requests<Q: Serialize + ?Sized>(
        &self,
        query: &Q,
    ) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([DATA_PRIVACY, DELETION_REQUESTS]).query(query)?)
            .await
    }

    pub async fn get_deletion_request(&self, request_id: &str) -> KlaviyoResult<Value> {
        self.request(ApiRequest::get([DATA_PRIVACY, DELETION_REQUESTS, request_id]))
            .await
    }
}
