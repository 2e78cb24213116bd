//! Serde model of JSON:API documents.
//!
//! See <https://jsonapi.org/format/#document-structure>. Attribute, link and
//! meta payloads are kept as open JSON maps; typed access happens on the
//! [`ResourceGraph`](super::ResourceGraph).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object with dynamically typed values.
pub type JsonMap = Map<String, Value>;

/// A top-level JSON:API document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonApiDocument {
    /// Primary data; `None` for `null` or an absent member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PrimaryData>,
    /// Related resources bundled with the primary data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    /// Document links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonMap>,
    /// Document meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
    /// Error objects; a non-empty list marks a failure document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorObject>,
    /// The `jsonapi` implementation object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Value>,
}

impl JsonApiDocument {
    /// Returns `true` if the document carries error objects.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Primary data: a single resource or a collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A collection of resources.
    Many(Vec<ResourceObject>),
    /// A single resource.
    One(Box<ResourceObject>),
}

/// A resource object as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// The resource type, e.g. `node--article`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The resource id (a UUID for Drupal entities).
    #[serde(default)]
    pub id: String,
    /// Attribute values.
    #[serde(default)]
    pub attributes: JsonMap,
    /// Relationship objects by name.
    #[serde(default)]
    pub relationships: BTreeMap<String, RelationshipObject>,
    /// Resource links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonMap>,
    /// Resource meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
}

/// A relationship object.
///
/// `data` distinguishes three states: absent (links-only relationship),
/// `null` (empty to-one), and present linkage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
    /// Resource linkage.
    #[serde(default, deserialize_with = "linkage::deserialize")]
    pub data: Linkage,
    /// Relationship links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonMap>,
    /// Relationship meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
}

/// Resource linkage of a relationship.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Linkage {
    /// No `data` member.
    #[default]
    Absent,
    /// `"data": null`.
    Null,
    /// A to-one identifier.
    One(ResourceIdentifier),
    /// A to-many identifier list.
    Many(Vec<ResourceIdentifier>),
}

mod linkage {
    use super::{Linkage, ResourceIdentifier};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Present {
        Many(Vec<ResourceIdentifier>),
        One(ResourceIdentifier),
    }

    // Only called when the member exists, so `None` here means `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Linkage, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Present>::deserialize(deserializer)? {
            None => Linkage::Null,
            Some(Present::One(identifier)) => Linkage::One(identifier),
            Some(Present::Many(identifiers)) => Linkage::Many(identifiers),
        })
    }
}

/// A resource identifier object: `{ type, id, meta? }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The resource id.
    pub id: String,
    /// Identifier meta, e.g. image `alt`, `width`, `height`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// A JSON:API error object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// A unique identifier for this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The HTTP status code, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// An application-specific error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// A short summary of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// A human-readable explanation of this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A pointer to the offending part of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    /// Error links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonMap>,
    /// Error meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
}

impl ErrorObject {
    /// Returns the most descriptive message available.
    #[must_use]
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .or(self.code.as_deref())
            .unwrap_or("Unknown JSON:API error")
    }
}

/// A link: either a bare href or a link object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link {
    /// A bare URL string.
    Href(String),
    /// A link object with an `href` and optional meta.
    Object {
        /// The link target.
        href: String,
        /// Link meta.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta: Option<Value>,
    },
}

impl Link {
    /// Returns the link target.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Href(href) | Self::Object { href, .. } => href,
        }
    }
}

/// The JSON:API entry point document listing resource endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Endpoint links by resource type name (plus `self`).
    #[serde(default)]
    pub links: BTreeMap<String, Link>,
    /// Index meta (Drupal reports links to the current user here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
}

impl IndexDocument {
    /// Returns the endpoint registered for `resource_type`.
    #[must_use]
    pub fn endpoint(&self, resource_type: &str) -> Option<&str> {
        self.links.get(resource_type).map(Link::href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_and_collection_primary_data() {
        let single: JsonApiDocument =
            serde_json::from_value(json!({"data": {"type": "node--page", "id": "1"}})).unwrap();
        assert!(matches!(single.data, Some(PrimaryData::One(_))));

        let many: JsonApiDocument =
            serde_json::from_value(json!({"data": [{"type": "node--page", "id": "1"}]})).unwrap();
        assert!(matches!(many.data, Some(PrimaryData::Many(ref v)) if v.len() == 1));

        let null: JsonApiDocument = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(null.data.is_none());
    }

    #[test]
    fn test_relationship_linkage_states() {
        let resource: ResourceObject = serde_json::from_value(json!({
            "type": "node--article",
            "id": "1",
            "relationships": {
                "uid": {"data": {"type": "user--user", "id": "u1"}},
                "field_tags": {"data": [{"type": "taxonomy_term--tags", "id": "t1"}]},
                "field_image": {"data": null},
                "node_type": {"links": {"related": {"href": "https://x"}}}
            }
        }))
        .unwrap();

        assert!(matches!(resource.relationships["uid"].data, Linkage::One(_)));
        assert!(matches!(resource.relationships["field_tags"].data, Linkage::Many(_)));
        assert_eq!(resource.relationships["field_image"].data, Linkage::Null);
        assert_eq!(resource.relationships["node_type"].data, Linkage::Absent);
    }

    #[test]
    fn test_errors_mark_failure_document() {
        let doc: JsonApiDocument = serde_json::from_value(json!({
            "errors": [{"status": "403", "title": "Forbidden", "detail": "No access"}]
        }))
        .unwrap();

        assert!(doc.has_errors());
        assert_eq!(doc.errors[0].message(), "No access");
    }

    #[test]
    fn test_index_endpoint_lookup_accepts_both_link_forms() {
        let index: IndexDocument = serde_json::from_value(json!({
            "links": {
                "self": {"href": "https://cms.example.com/jsonapi"},
                "node--article": {"href": "https://cms.example.com/jsonapi/node/article"},
                "node--page": "https://cms.example.com/jsonapi/node/page"
            }
        }))
        .unwrap();

        assert_eq!(
            index.endpoint("node--article"),
            Some("https://cms.example.com/jsonapi/node/article")
        );
        assert_eq!(
            index.endpoint("node--page"),
            Some("https://cms.example.com/jsonapi/node/page")
        );
        assert!(index.endpoint("node--missing").is_none());
    }
}
