//! Request descriptor for a single Klaviyo API call.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::KlaviyoResult;

/// A single outbound call: method, path, optional JSON body and query.
///
/// The path is kept as individual segments so identifiers supplied by
/// clients are percent-encoded and can never change the endpoint.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    body: Option<Value>,
    query: Option<String>,
}

impl ApiRequest {
    /// Create a request for the given method and path segments.
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
            query: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PATCH, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> KlaviyoResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach query parameters. Fields serializing to nothing are dropped.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> KlaviyoResult<Self> {
        let encoded = serde_urlencoded::to_string(query)?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The encoded query string, without the leading `?`.
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The path as it appears after the base URL, e.g. `/profiles/abc`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}
