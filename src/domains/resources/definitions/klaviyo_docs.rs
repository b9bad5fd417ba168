//! Klaviyo API documentation resource template.
//!
//! `klaviyo://docs/{section}` returns a short Markdown page per API area.
//! A missing or unknown section returns the list of available sections.

use super::ResourceTemplateDefinition;

const URI_PREFIX: &str = "klaviyo://docs";

/// Documentation pages, in listing order.
const SECTIONS: [(&str, &str); 11] = [
    ("overview", OVERVIEW),
    ("profiles", PROFILES),
    ("lists", LISTS),
    ("events", EVENTS),
    ("campaigns", CAMPAIGNS),
    ("flows", FLOWS),
    ("segments", SEGMENTS),
    ("metrics", METRICS),
    ("templates", TEMPLATES),
    ("catalogs", CATALOGS),
    ("data-privacy", DATA_PRIVACY),
];

/// Klaviyo documentation resource (static Markdown per section).
pub struct KlaviyoDocsResource;

impl KlaviyoDocsResource {
    /// Section names in listing order.
    pub fn section_names() -> impl Iterator<Item = &'static str> {
        SECTIONS.iter().map(|(name, _)| *name)
    }

    /// Text for a section, or the section index when absent or unknown.
    pub fn lookup(section: Option<&str>) -> String {
        section
            .and_then(|name| SECTIONS.iter().find(|(key, _)| *key == name))
            .map(|(_, text)| text.to_string())
            .unwrap_or_else(Self::index)
    }

    fn index() -> String {
        format!(
            "Available documentation sections: {}",
            Self::section_names().collect::<Vec<_>>().join(", ")
        )
    }
}

impl ResourceTemplateDefinition for KlaviyoDocsResource {
    const URI_TEMPLATE: &'static str = "klaviyo://docs/{section}";
    const NAME: &'static str = "documentation";
    const TITLE: &'static str = "Klaviyo API Documentation";
    const DESCRIPTION: &'static str =
        "Reference notes for each Klaviyo API area covered by this server's tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn resolve(uri: &str) -> Option<String> {
        let rest = uri.strip_prefix(URI_PREFIX)?;
        let section = match rest {
            "" | "/" => None,
            _ => Some(rest.strip_prefix('/')?),
        };
        Some(Self::lookup(section))
    }
}

const OVERVIEW: &str = r#"# Klaviyo API Overview

The Klaviyo API allows you to programmatically access and manage your Klaviyo account data.

## Base URL

All API requests should be made to: `https://a.klaviyo.com/api`

## Authentication

Klaviyo API uses API keys for authentication. You can generate API keys in your Klaviyo account settings.

## API Versions

Klaviyo uses date-based API versioning (e.g., 2023-12-15)."#;

const PROFILES: &str = r#"# Profiles API

Profiles represent individuals in your Klaviyo account. Each profile can have properties, metrics, and be part of segments and lists.

## Endpoints

- GET /api/profiles
- POST /api/profiles
- GET /api/profiles/{profile_id}
- PATCH /api/profiles/{profile_id}
- DELETE /api/profiles/{profile_id}"#;

const LISTS: &str = r#"# Lists API

Lists are static collections of profiles that you can use for sending campaigns and flows.

## Endpoints

- GET /api/lists
- POST /api/lists
- GET /api/lists/{list_id}
- PATCH /api/lists/{list_id}
- DELETE /api/lists/{list_id}
- GET /api/lists/{list_id}/profiles
- POST /api/lists/{list_id}/relationships/profiles"#;

const EVENTS: &str = r#"# Events API

Events represent actions taken by profiles, such as viewing a product, placing an order, or opening an email.

## Endpoints

- GET /api/events
- POST /api/events
- GET /api/events/{event_id}"#;

const CAMPAIGNS: &str = r#"# Campaigns API

Campaigns are one-time email or SMS sends to a specific audience.

## Endpoints

- GET /api/campaigns
- POST /api/campaigns
- GET /api/campaigns/{campaign_id}
- PATCH /api/campaigns/{campaign_id}
- DELETE /api/campaigns/{campaign_id}
- POST /api/campaigns/{campaign_id}/send"#;

const FLOWS: &str = r#"# Flows API

Flows are automated sequences of messages triggered by specific events or conditions.

## Endpoints

- GET /api/flows
- POST /api/flows
- GET /api/flows/{flow_id}
- PATCH /api/flows/{flow_id}
- DELETE /api/flows/{flow_id}
- POST /api/flows/{flow_id}/actions/update-status"#;

const SEGMENTS: &str = r#"# Segments API

Segments are dynamic groups of profiles that match specific criteria.

## Endpoints

- GET /api/segments
- POST /api/segments
- GET /api/segments/{segment_id}
- PATCH /api/segments/{segment_id}
- DELETE /api/segments/{segment_id}"#;

const METRICS: &str = r#"# Metrics API

Metrics are the events and properties that Klaviyo tracks for your account.

## Endpoints

- GET /api/metrics
- GET /api/metrics/{metric_id}
- GET /api/metrics/{metric_id}/aggregate
- GET /api/metrics/{metric_id}/timeline"#;

const TEMPLATES: &str = r#"# Templates API

Templates are reusable email designs that can be used in campaigns and flows.

## Endpoints

- GET /api/templates
- POST /api/templates
- GET /api/templates/{template_id}
- PATCH /api/templates/{template_id}
- DELETE /api/templates/{template_id}
- POST /api/templates/{template_id}/clone
- POST /api/templates/{template_id}/render"#;

const CATALOGS: &str = r#"# Catalogs API

Catalogs store product information that can be used in campaigns and flows.

## Endpoints

- GET /api/catalogs
- GET /api/catalogs/{catalog_id}
- GET /api/catalogs/{catalog_id}/items
- POST /api/catalogs/{catalog_id}/items
- GET /api/catalogs/{catalog_id}/items/{item_id}
- PATCH /api/catalogs/{catalog_id}/items/{item_id}
- DELETE /api/catalogs/{catalog_id}/items/{item_id}"#;

const DATA_PRIVACY: &str = r#"# Data Privacy API

The Data Privacy API allows you to manage data deletion requests and compliance with privacy regulations.

## Endpoints

- POST /api/data-privacy/deletion-requests
- GET /api/data-privacy/deletion-requests
- GET /api/data-privacy/deletion-requests/{request_id}"#;
