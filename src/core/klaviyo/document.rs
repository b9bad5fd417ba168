//! JSON:API document shapes used in Klaviyo write payloads.
//!
//! Reads are passed through as opaque [`serde_json::Value`]s; only the
//! envelopes and linkage objects needed to build writes are typed here.

use serde::Serialize;

/// A resource linkage object: `{"type": ..., "id": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// A to-one relationship: `{"data": {"type": ..., "id": ...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct Relationship {
    pub data: ResourceIdentifier,
}

impl Relationship {
    pub fn to(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            data: ResourceIdentifier::new(kind, id),
        }
    }
}

/// A resource object inside a write document.
///
/// `id` is only present on updates; `relationships` only when the write
/// links other resources.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceObject<A, R = ()> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: A,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<R>,
}

/// Top-level write document: `{"data": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct Document<D> {
    pub data: D,
}

impl<A> Document<ResourceObject<A>> {
    /// Document creating a new resource of the given type.
    pub fn create(kind: &'static str, attributes: A) -> Self {
        Self {
            data: ResourceObject {
                kind,
                id: None,
                attributes,
                relationships: None,
            },
        }
    }

    /// Document updating an existing resource.
    pub fn update(kind: &'static str, id: impl Into<String>, attributes: A) -> Self {
        Self {
            data: ResourceObject {
                kind,
                id: Some(id.into()),
                attributes,
                relationships: None,
            },
        }
    }
}

impl<A, R> Document<ResourceObject<A, R>> {
    /// Document creating a resource linked to others.
    pub fn create_related(kind: &'static str, attributes: A, relationships: R) -> Self {
        Self {
            data: ResourceObject {
                kind,
                id: None,
                attributes,
                relationships: Some(relationships),
            },
        }
    }
}

impl Document<Vec<ResourceIdentifier>> {
    /// To-many linkage document, e.g. profiles to add to a list.
    pub fn linkage<I, S>(kind: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: ids
                .into_iter()
                .map(|id| ResourceIdentifier::new(kind, id))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Name {
        name: String,
    }

    #[test]
    fn test_create_document_has_no_id() {
        let doc = Document::create(
            "list",
            Name {
                name: "VIP".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"data": {"type": "list", "attributes": {"name": "VIP"}}})
        );
    }

    #[test]
    fn test_update_document_carries_id() {
        let doc = Document::update(
            "list",
            "L1",
            Name {
                name: "VIP".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"data": {"type": "list", "id": "L1", "attributes": {"name": "VIP"}}})
        );
    }

    #[test]
    fn test_linkage_document() {
        let doc = Document::linkage("profile", ["a", "b"]);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"data": [{"type": "profile", "id": "a"}, {"type": "profile", "id": "b"}]})
        );
    }

    #[test]
    fn test_relationship_shape() {
        assert_eq!(
            serde_json::to_value(Relationship::to("template", "T1")).unwrap(),
            json!({"data": {"type": "template", "id": "T1"}})
        );
    }
}
