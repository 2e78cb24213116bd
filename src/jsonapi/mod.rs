//! JSON:API document model and compound document deserialization.
//!
//! - [`document`]: serde types mirroring the wire format
//! - [`graph`]: [`deserialize`] and the resolved [`ResourceGraph`]

pub mod document;
pub mod graph;

pub use document::{
    ErrorObject, IndexDocument, JsonApiDocument, JsonMap, Link, Linkage, PrimaryData,
    RelationshipObject, ResourceIdentifier, ResourceObject,
};
pub use graph::{
    deserialize, NodeId, Primary, Related, Relationship, RelationshipData, Resource,
    ResourceGraph,
};
