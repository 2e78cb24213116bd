//! Response payload types returned by [`DrupalClient`](crate::DrupalClient).

use serde::{Deserialize, Serialize};

use crate::jsonapi::JsonMap;

/// Result of translating a front-end path with the decoupled router.
///
/// Mirrors the `/router/translate-path` response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathData {
    /// The resolved canonical URL.
    pub resolved: String,
    /// Whether the path is the configured front page.
    #[serde(default)]
    pub is_home_path: bool,
    /// The entity behind the path.
    pub entity: PathEntity,
    /// The entity label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// JSON:API coordinates for the entity, when the module exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<PathJsonApi>,
}

/// Entity details in a [`PathData`] response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntity {
    /// Canonical URL of the entity.
    pub canonical: String,
    /// Entity type id, e.g. `node`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Bundle, e.g. `article`.
    pub bundle: String,
    /// Numeric entity id, as a string.
    pub id: String,
    /// Entity UUID.
    pub uuid: String,
    /// Language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub langcode: Option<String>,
    /// Path alias of the entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// JSON:API section of a [`PathData`] response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathJsonApi {
    /// URL of the individual resource.
    pub individual: String,
    /// Resource type name, e.g. `node--article`.
    pub resource_name: String,
    /// JSON:API base path, e.g. `/jsonapi`.
    pub base_path: String,
    /// JSON:API entry point URL.
    pub entry_point: String,
}

/// The `path` attribute of a routable entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAlias {
    /// The alias, e.g. `/blog/first-post`.
    #[serde(default)]
    pub alias: Option<String>,
    /// Path alias id.
    #[serde(default)]
    pub pid: Option<u64>,
    /// Language code.
    #[serde(default)]
    pub langcode: Option<String>,
}

/// Results of a JSON:API view display.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewResult<T> {
    /// The view name as requested, e.g. `featured_articles--page_1`.
    pub id: String,
    /// The deserialized view rows.
    pub results: T,
    /// Document meta (Drupal reports the total `count` here).
    pub meta: Option<JsonMap>,
    /// Document links (pager `next`, `prev`, ...).
    pub links: Option<JsonMap>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_data_deserializes_router_response() {
        let data: PathData = serde_json::from_value(json!({
            "resolved": "https://cms.example.com/blog/hello",
            "isHomePath": false,
            "entity": {
                "canonical": "https://cms.example.com/node/1",
                "type": "node",
                "bundle": "article",
                "id": "1",
                "uuid": "6b7a-1",
                "langcode": "en",
                "path": "/blog/hello"
            },
            "label": "Hello",
            "jsonapi": {
                "individual": "https://cms.example.com/jsonapi/node/article/6b7a-1",
                "resourceName": "node--article",
                "basePath": "/jsonapi",
                "entryPoint": "https://cms.example.com/jsonapi"
            }
        }))
        .unwrap();

        assert_eq!(data.entity.entity_type, "node");
        assert_eq!(data.jsonapi.unwrap().resource_name, "node--article");
        assert_eq!(data.label.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_path_data_optional_sections_may_be_missing() {
        let data: PathData = serde_json::from_value(json!({
            "resolved": "https://cms.example.com/",
            "isHomePath": true,
            "entity": {
                "canonical": "https://cms.example.com/node/2",
                "type": "node", "bundle": "page", "id": "2", "uuid": "u-2"
            }
        }))
        .unwrap();

        assert!(data.is_home_path);
        assert!(data.jsonapi.is_none());
        assert!(data.entity.path.is_none());
    }
}
