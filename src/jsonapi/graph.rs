//! Compound document deserialization into a connected resource graph.
//!
//! Every resource found in `data` or `included` becomes exactly one node,
//! keyed by `(type, id)`. Relationship identifiers are resolved to node
//! handles, so two relationships pointing at the same resource lead to the
//! same `&Resource`. Nodes live in an arena, which lets cyclic relationships
//! (an article whose author links back to the article) exist without
//! reference cycles.
//!
//! # Example
//!
//! ```rust
//! use drupal_fetch::jsonapi::deserialize;
//! use serde_json::json;
//!
//! let graph = deserialize(json!({
//!     "data": {
//!         "type": "node--article", "id": "a1",
//!         "attributes": {"title": "Hello"},
//!         "relationships": {"uid": {"data": {"type": "user--user", "id": "u1"}}}
//!     },
//!     "included": [{"type": "user--user", "id": "u1", "attributes": {"name": "admin"}}]
//! }))
//! .unwrap()
//! .unwrap();
//!
//! let article = graph.primary_resources()[0];
//! let author = graph.related(article, "uid")[0];
//! assert_eq!(author.attribute_str("name"), Some("admin"));
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::document::{
    JsonApiDocument, JsonMap, Linkage, PrimaryData, RelationshipObject, ResourceIdentifier,
    ResourceObject,
};

/// Handle to a node in a [`ResourceGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// The shape of a document's primary data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Primary {
    /// `data` was `null` or absent.
    #[default]
    Empty,
    /// A single resource.
    One(NodeId),
    /// A collection, in document order.
    Many(Vec<NodeId>),
}

/// A relationship target: the wire identifier plus the node it resolved to.
#[derive(Clone, Debug, PartialEq)]
pub struct Related {
    /// The identifier as sent by the server, including identifier meta.
    pub identifier: ResourceIdentifier,
    /// The resolved node, or `None` if the target was not in the document.
    pub node: Option<NodeId>,
}

impl Related {
    /// Returns `true` if the target was found in the document.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.node.is_some()
    }
}

/// Resolved linkage of a relationship.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RelationshipData {
    /// The relationship carried no `data` member.
    #[default]
    NotLoaded,
    /// An empty to-one relationship.
    Empty,
    /// A to-one relationship.
    One(Related),
    /// A to-many relationship.
    Many(Vec<Related>),
}

/// A relationship with its links and meta.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Relationship {
    /// Resolved linkage.
    pub data: RelationshipData,
    /// Relationship links.
    pub links: Option<JsonMap>,
    /// Relationship meta.
    pub meta: Option<JsonMap>,
}

impl Relationship {
    /// Iterates over all targets of this relationship.
    pub fn targets(&self) -> impl Iterator<Item = &Related> {
        let slice: &[Related] = match &self.data {
            RelationshipData::One(related) => std::slice::from_ref(related),
            RelationshipData::Many(related) => related,
            RelationshipData::NotLoaded | RelationshipData::Empty => &[],
        };
        slice.iter()
    }
}

/// A canonical resource node.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    /// The resource type.
    pub resource_type: String,
    /// The resource id.
    pub id: String,
    /// Attribute values.
    pub attributes: JsonMap,
    /// Relationships by name.
    pub relationships: BTreeMap<String, Relationship>,
    /// Resource links.
    pub links: Option<JsonMap>,
    /// Resource meta.
    pub meta: Option<JsonMap>,
}

impl Resource {
    /// Returns the raw attribute value stored under `key`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the attribute under `key` if it is a string.
    #[must_use]
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(Value::as_str)
    }

    /// Deserializes the attribute under `key` into `T`.
    ///
    /// Returns `Ok(None)` when the attribute is absent or `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the value does not fit `T`.
    pub fn attribute_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        match self.attribute(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some),
        }
    }

    /// Returns the relationship named `name`.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }
}

/// A deserialized compound document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceGraph {
    nodes: Vec<Resource>,
    index: HashMap<(String, String), NodeId>,
    primary: Primary,
    links: Option<JsonMap>,
    meta: Option<JsonMap>,
}

/// Converts a JSON:API document value into a [`ResourceGraph`].
///
/// Falsy input (`null`, `false`, `0`, `""`) yields `Ok(None)`.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the value is not a JSON:API document.
pub fn deserialize(value: Value) -> Result<Option<ResourceGraph>, serde_json::Error> {
    if is_falsy(&value) {
        return Ok(None);
    }
    let document: JsonApiDocument = serde_json::from_value(value)?;
    Ok(Some(ResourceGraph::from_document(document)))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl ResourceGraph {
    /// Builds a graph from a parsed document.
    #[must_use]
    pub fn from_document(document: JsonApiDocument) -> Self {
        let mut index: HashMap<(String, String), NodeId> = HashMap::new();
        let mut raw: Vec<ResourceObject> = Vec::new();

        let primary = match document.data {
            None => Primary::Empty,
            Some(PrimaryData::One(resource)) => {
                Primary::One(insert_or_merge(&mut raw, &mut index, *resource))
            }
            Some(PrimaryData::Many(resources)) => Primary::Many(
                resources
                    .into_iter()
                    .map(|resource| insert_or_merge(&mut raw, &mut index, resource))
                    .collect(),
            ),
        };
        for resource in document.included {
            insert_or_merge(&mut raw, &mut index, resource);
        }

        let nodes = raw
            .into_iter()
            .map(|object| Resource {
                relationships: object
                    .relationships
                    .into_iter()
                    .map(|(name, relationship)| (name, resolve(relationship, &index)))
                    .collect(),
                resource_type: object.resource_type,
                id: object.id,
                attributes: object.attributes,
                links: object.links,
                meta: object.meta,
            })
            .collect();

        Self {
            nodes,
            index,
            primary,
            links: document.links,
            meta: document.meta,
        }
    }

    /// Returns the primary data shape.
    #[must_use]
    pub const fn primary(&self) -> &Primary {
        &self.primary
    }

    /// Returns `true` if the primary data is a collection.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self.primary, Primary::Many(_))
    }

    /// Returns the primary resources in document order.
    #[must_use]
    pub fn primary_resources(&self) -> Vec<&Resource> {
        match &self.primary {
            Primary::Empty => Vec::new(),
            Primary::One(node) => vec![self.get(*node)],
            Primary::Many(nodes) => nodes.iter().map(|node| self.get(*node)).collect(),
        }
    }

    /// Returns the resource behind `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` belongs to a different graph and is out of range.
    #[must_use]
    pub fn get(&self, node: NodeId) -> &Resource {
        &self.nodes[node.0]
    }

    /// Finds a resource by its identity.
    #[must_use]
    pub fn find(&self, resource_type: &str, id: &str) -> Option<&Resource> {
        self.node_id(resource_type, id).map(|node| self.get(node))
    }

    /// Returns the node handle for a resource identity.
    #[must_use]
    pub fn node_id(&self, resource_type: &str, id: &str) -> Option<NodeId> {
        self.index
            .get(&(resource_type.to_string(), id.to_string()))
            .copied()
    }

    /// Resolves a relationship target to its resource, if present.
    #[must_use]
    pub fn resolve(&self, related: &Related) -> Option<&Resource> {
        related.node.map(|node| self.get(node))
    }

    /// Returns the resolved targets of `resource`'s relationship `name`.
    ///
    /// Unresolved identifier stubs are skipped.
    #[must_use]
    pub fn related(&self, resource: &Resource, name: &str) -> Vec<&Resource> {
        resource
            .relationship(name)
            .map(|relationship| {
                relationship
                    .targets()
                    .filter_map(|related| self.resolve(related))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the number of distinct resources in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the document-level links.
    #[must_use]
    pub const fn links(&self) -> Option<&JsonMap> {
        self.links.as_ref()
    }

    /// Returns the document-level meta.
    #[must_use]
    pub const fn meta(&self) -> Option<&JsonMap> {
        self.meta.as_ref()
    }

    /// Flattens a node into a plain JSON object.
    ///
    /// The object holds `type`, `id` and the attributes at the top level,
    /// with each relationship embedding its flattened target(s). Identifier
    /// meta is exposed as `resourceIdObjMeta`. A target that is already being
    /// flattened further up the current path, or that is missing from the
    /// document, is emitted as a `{type, id}` stub.
    #[must_use]
    pub fn to_json(&self, node: NodeId) -> Value {
        let mut path = HashSet::new();
        self.flatten(node, None, &mut path)
    }

    /// Flattens the primary data: an object, an array, or `null`.
    #[must_use]
    pub fn primary_json(&self) -> Value {
        match &self.primary {
            Primary::Empty => Value::Null,
            Primary::One(node) => self.to_json(*node),
            Primary::Many(nodes) => {
                Value::Array(nodes.iter().map(|node| self.to_json(*node)).collect())
            }
        }
    }

    /// Deserializes the flattened primary data into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the flattened data does not fit `T`.
    pub fn primary_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.primary_json())
    }

    fn flatten(
        &self,
        node: NodeId,
        identifier_meta: Option<&Value>,
        path: &mut HashSet<NodeId>,
    ) -> Value {
        let resource = self.get(node);
        let mut object = JsonMap::new();
        object.insert("type".into(), Value::String(resource.resource_type.clone()));
        object.insert("id".into(), Value::String(resource.id.clone()));
        for (key, value) in &resource.attributes {
            object.insert(key.clone(), value.clone());
        }

        path.insert(node);
        for (name, relationship) in &resource.relationships {
            let value = match &relationship.data {
                RelationshipData::NotLoaded => continue,
                RelationshipData::Empty => Value::Null,
                RelationshipData::One(related) => self.flatten_related(related, path),
                RelationshipData::Many(related) => Value::Array(
                    related
                        .iter()
                        .map(|target| self.flatten_related(target, path))
                        .collect(),
                ),
            };
            object.insert(name.clone(), value);
        }
        path.remove(&node);

        if let Some(links) = &resource.links {
            object.insert("links".into(), Value::Object(links.clone()));
        }
        if let Some(meta) = &resource.meta {
            object.insert("meta".into(), Value::Object(meta.clone()));
        }
        if let Some(meta) = identifier_meta {
            object.insert("resourceIdObjMeta".into(), meta.clone());
        }
        Value::Object(object)
    }

    fn flatten_related(&self, related: &Related, path: &mut HashSet<NodeId>) -> Value {
        match related.node {
            Some(node) if !path.contains(&node) => {
                self.flatten(node, related.identifier.meta.as_ref(), path)
            }
            _ => {
                let mut stub = JsonMap::new();
                stub.insert(
                    "type".into(),
                    Value::String(related.identifier.resource_type.clone()),
                );
                stub.insert("id".into(), Value::String(related.identifier.id.clone()));
                if let Some(meta) = &related.identifier.meta {
                    stub.insert("resourceIdObjMeta".into(), meta.clone());
                }
                Value::Object(stub)
            }
        }
    }
}

/// Inserts `object`, or merges it into the existing node with the same identity.
///
/// The first occurrence wins; later duplicates only fill in missing
/// attributes, relationships, links and meta.
fn insert_or_merge(
    raw: &mut Vec<ResourceObject>,
    index: &mut HashMap<(String, String), NodeId>,
    object: ResourceObject,
) -> NodeId {
    let key = (object.resource_type.clone(), object.id.clone());
    if let Some(&node) = index.get(&key) {
        let existing = &mut raw[node.0];
        for (name, value) in object.attributes {
            existing.attributes.entry(name).or_insert(value);
        }
        for (name, relationship) in object.relationships {
            let slot = existing.relationships.entry(name).or_default();
            if slot.data == Linkage::Absent {
                slot.data = relationship.data;
            }
            if slot.links.is_none() {
                slot.links = relationship.links;
            }
            if slot.meta.is_none() {
                slot.meta = relationship.meta;
            }
        }
        if existing.links.is_none() {
            existing.links = object.links;
        }
        if existing.meta.is_none() {
            existing.meta = object.meta;
        }
        return node;
    }

    let node = NodeId(raw.len());
    raw.push(object);
    index.insert(key, node);
    node
}

fn resolve(relationship: RelationshipObject, index: &HashMap<(String, String), NodeId>) -> Relationship {
    let link = |identifier: ResourceIdentifier| {
        let node = index
            .get(&(identifier.resource_type.clone(), identifier.id.clone()))
            .copied();
        Related { identifier, node }
    };

    let data = match relationship.data {
        Linkage::Absent => RelationshipData::NotLoaded,
        Linkage::Null => RelationshipData::Empty,
        Linkage::One(identifier) => RelationshipData::One(link(identifier)),
        Linkage::Many(identifiers) => {
            RelationshipData::Many(identifiers.into_iter().map(link).collect())
        }
    };

    Relationship {
        data,
        links: relationship.links,
        meta: relationship.meta,
    }
}
