//! Klaviyo API client: the single point of outbound HTTP communication.

use reqwest::{
    Client, Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{KlaviyoError, KlaviyoResult};
use super::request::ApiRequest;
use crate::core::config::KlaviyoConfig;

/// Name of the header pinning the API revision.
const REVISION_HEADER: &str = "revision";

/// Authorization scheme for private API keys.
const AUTH_SCHEME: &str = "Klaviyo-API-Key";

/// Client for the Klaviyo REST API.
///
/// Holds only fixed configuration and a pooled `reqwest::Client`, so it can
/// be shared freely between concurrent tool calls.
#[derive(Debug, Clone)]
pub struct KlaviyoClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    revision: String,
}

impl KlaviyoClient {
    /// Build a client from configuration.
    ///
    /// A missing API key is not an error here; it is reported by
    /// [`KlaviyoClient::request`] before any network I/O.
    pub fn new(config: &KlaviyoConfig) -> KlaviyoResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| KlaviyoError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(KlaviyoError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = Client::builder().build().map_err(KlaviyoError::Http)?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            revision: config.revision.clone(),
        })
    }

    /// The pinned API revision sent with every call.
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Build the headers for a call authenticated with `api_key`.
    fn headers(&self, api_key: &str) -> KlaviyoResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("{} {}", AUTH_SCHEME, api_key))
                .map_err(|_| KlaviyoError::encode("API key contains invalid header characters"))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(REVISION_HEADER),
            HeaderValue::from_str(&self.revision)
                .map_err(|_| KlaviyoError::encode("revision contains invalid header characters"))?,
        );
        Ok(headers)
    }

    /// Resolve the full URL for a request.
    fn url_for(&self, request: &ApiRequest) -> KlaviyoResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| KlaviyoError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(request.segments());
        url.set_query(request.query_string());
        Ok(url)
    }

    /// Issue one HTTP call and return the parsed response body.
    ///
    /// - non-2xx responses become [`KlaviyoError::Api`] with the status and
    ///   the raw upstream body;
    /// - a request that got no response becomes [`KlaviyoError::NoResponse`];
    /// - anything else is propagated unchanged.
    pub async fn request(&self, request: ApiRequest) -> KlaviyoResult<Value> {
        let api_key = self.api_key.as_deref().ok_or(KlaviyoError::MissingApiKey)?;

        let url = self.url_for(&request)?;
        debug!(method = %request.method(), path = %request.path(), "Klaviyo request");

        let mut builder = self
            .http
            .request(request.method().clone(), url)
            .headers(self.headers(api_key)?);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                KlaviyoError::Http(e)
            } else {
                warn!(path = %request.path(), "Klaviyo request got no response: {}", e);
                KlaviyoError::NoResponse
            }
        })?;

        let status = response.status();
        // The upstream answered; a broken body is a transport error, not "no response".
        let text = response.text().await.map_err(|e| {
            warn!(
                status = status.as_u16(),
                path = %request.path(),
                "Failed to read Klaviyo response body: {}",
                e
            );
            KlaviyoError::Http(e)
        })?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                path = %request.path(),
                "Klaviyo API rejected request"
            );
            return Err(KlaviyoError::api(status.as_u16(), text));
        }

        Ok(parse_body(&text))
    }
}

/// Parse a successful response body.
///
/// Empty bodies (e.g. `204 No Content`) become `null`; bodies that are not
/// JSON are returned as a JSON string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
