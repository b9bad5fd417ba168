//! Parameter types and helpers shared across Klaviyo tools.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

use super::error::ToolError;

/// An email address, checked while decoding tool arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_email(&value) {
            Ok(Self(value))
        } else {
            Err(format!("Invalid email: {}", value))
        }
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl JsonSchema for EmailAddress {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "EmailAddress".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "format": "email"
        })
    }
}

/// `local@domain.tld` with no whitespace.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// An absolute http(s) URL, checked while decoding tool arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebUrl(String);

impl WebUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WebUrl {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let url = reqwest::Url::parse(&value).map_err(|e| format!("Invalid url: {}", e))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(value)),
            other => Err(format!("Invalid url: unsupported scheme '{}'", other)),
        }
    }
}

impl From<WebUrl> for String {
    fn from(value: WebUrl) -> Self {
        value.0
    }
}

impl JsonSchema for WebUrl {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "WebUrl".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "format": "uri"
        })
    }
}

/// Paging arguments for collection tools.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PageParams {
    #[schemars(description = "Number of results per page")]
    pub page_size: Option<u32>,

    #[schemars(description = "Cursor for pagination")]
    pub page_cursor: Option<String>,
}

impl PageParams {
    pub fn query(&self) -> ListingQuery<'_> {
        ListingQuery::page(self.page_size, self.page_cursor.as_deref())
    }
}

/// Filter plus paging arguments for collection tools.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FilteredPageParams {
    #[schemars(description = "Filter criteria in the format 'field:operator:value'")]
    pub filter: Option<String>,

    #[schemars(description = "Number of results per page")]
    pub page_size: Option<u32>,

    #[schemars(description = "Cursor for pagination")]
    pub page_cursor: Option<String>,
}

impl FilteredPageParams {
    pub fn query(&self) -> ListingQuery<'_> {
        ListingQuery::filtered(
            self.filter.as_deref(),
            self.page_size,
            self.page_cursor.as_deref(),
        )
    }
}

/// Query string for collection endpoints.
///
/// Absent values are omitted from the query entirely, as are a zero
/// `page_size` and empty `filter`/`page_cursor` strings.
#[derive(Debug, Default, Serialize)]
pub struct ListingQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_cursor: Option<&'a str>,
}

impl<'a> ListingQuery<'a> {
    pub fn page(page_size: Option<u32>, page_cursor: Option<&'a str>) -> Self {
        Self::filtered(None, page_size, page_cursor)
    }

    pub fn filtered(
        filter: Option<&'a str>,
        page_size: Option<u32>,
        page_cursor: Option<&'a str>,
    ) -> Self {
        Self {
            filter: filter.filter(|f| !f.is_empty()),
            page_size: nonzero(page_size),
            page_cursor: page_cursor.filter(|c| !c.is_empty()),
        }
    }
}

/// Drop a zero page size; Klaviyo then applies its default.
pub fn nonzero(page_size: Option<u32>) -> Option<u32> {
    page_size.filter(|n| *n > 0)
}

/// Drop blank strings.
pub fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fail unless at least one candidate identifier is present.
pub fn require_any(present: &[bool], names: &str) -> Result<(), ToolError> {
    if present.iter().any(|p| *p) {
        Ok(())
    } else {
        Err(ToolError::invalid_arguments(format!(
            "At least one of {} is required",
            names
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::klaviyo::ApiRequest;

    #[test]
    fn test_email_accepts_and_rejects() {
        assert!(EmailAddress::try_from("ada@example.com".to_string()).is_ok());
        assert!(EmailAddress::try_from("first.last+tag@mail.example.co".to_string()).is_ok());

        for bad in ["", "plain", "@example.com", "ada@", "ada@example", "a da@example.com", "a@b@c.com", "ada@example."] {
            assert!(
                EmailAddress::try_from(bad.to_string()).is_err(),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_email_decodes_from_json() {
        let ok: EmailAddress = serde_json::from_value(serde_json::json!("ada@example.com")).unwrap();
        assert_eq!(ok.as_str(), "ada@example.com");

        let err = serde_json::from_value::<EmailAddress>(serde_json::json!("nope")).unwrap_err();
        assert!(err.to_string().contains("Invalid email"));
    }

    #[test]
    fn test_web_url_requires_http() {
        assert!(WebUrl::try_from("https://shop.example.com/p/1".to_string()).is_ok());
        assert!(WebUrl::try_from("http://localhost:8080".to_string()).is_ok());
        assert!(WebUrl::try_from("ftp://example.com/file".to_string()).is_err());
        assert!(WebUrl::try_from("/relative/path".to_string()).is_err());
    }

    #[test]
    fn test_schemas_advertise_formats() {
        let email = serde_json::to_value(schemars::schema_for!(EmailAddress)).unwrap();
        assert_eq!(email["format"], "email");

        let url = serde_json::to_value(schemars::schema_for!(WebUrl)).unwrap();
        assert_eq!(url["format"], "uri");
    }

    #[test]
    fn test_listing_query_skips_absent_values() {
        let req = ApiRequest::get(["profiles"])
            .query(&ListingQuery::filtered(Some("equals(email,\"a@b.co\")"), None, Some("abc")))
            .unwrap();
        assert_eq!(
            req.query_string(),
            Some("filter=equals%28email%2C%22a%40b.co%22%29&page_cursor=abc")
        );

        let req = ApiRequest::get(["lists"])
            .query(&ListingQuery::page(None, None))
            .unwrap();
        assert_eq!(req.query_string(), None);
    }

    #[test]
    fn test_listing_query_drops_zero_and_empty_values() {
        let req = ApiRequest::get(["profiles"])
            .query(&ListingQuery::filtered(Some(""), Some(0), Some("")))
            .unwrap();
        assert_eq!(req.query_string(), None);

        let req = ApiRequest::get(["lists"])
            .query(&ListingQuery::page(Some(25), None))
            .unwrap();
        assert_eq!(req.query_string(), Some("page_size=25"));
    }

    #[test]
    fn test_require_any() {
        assert!(require_any(&[false, true], "a or b").is_ok());
        let err = require_any(&[false, false, false], "email, phone_number, or external_id")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one of email, phone_number, or external_id is required"
        );
    }

    #[test]
    fn test_filled_drops_blank() {
        assert_eq!(filled(Some("  ".to_string())), None);
        assert_eq!(filled(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(filled(None), None);
    }
}
