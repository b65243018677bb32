//! Relationship metadata: foreign-key edges between resources and the
//! bidirectional index used to resolve auto-chained joins.
//!
//! The graph is built once during startup from the full edge list and is
//! read-only afterward, so it can be shared freely across compilation
//! calls without locking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod metadata;

pub use errors::ResourceGraphError;
pub use metadata::{ResourceDefinition, ResourceMetadata, ResourceRegistry};

/// One directed foreign-key edge between two resources.
///
/// Direction records which side owns the key; lookups through
/// [`RelationshipGraph::find_edge`] work in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    /// Resource owning the foreign key.
    pub source: String,
    /// Resource the key points at.
    pub target: String,
    /// Entity field on the source holding the reference.
    pub fk_field: String,
    /// Storage column backing `fk_field`.
    #[serde(default)]
    pub fk_column: Option<String>,
    /// Referenced field on the target, usually its primary key.
    #[serde(default = "default_target_field")]
    pub target_field: String,
    /// Storage column backing `target_field`.
    #[serde(default)]
    pub target_column: Option<String>,
    /// A composite key joins on several field pairs at once.
    #[serde(default)]
    pub composite: bool,
    /// Source field → target field pairs, only when `composite` is set.
    #[serde(default)]
    pub components: Vec<(String, String)>,
}

fn default_target_field() -> String {
    "id".to_string()
}

impl RelationshipEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        fk_field: impl Into<String>,
    ) -> Self {
        RelationshipEdge {
            source: source.into(),
            target: target.into(),
            fk_field: fk_field.into(),
            fk_column: None,
            target_field: default_target_field(),
            target_column: None,
            composite: false,
            components: Vec::new(),
        }
    }

    /// True when `resource` is the side holding the foreign key.
    pub fn owns_key(&self, resource: &str) -> bool {
        self.source == resource
    }
}

/// Shape of the YAML relationship file.
#[derive(Debug, Deserialize)]
struct RelationshipConfig {
    relationships: Vec<RelationshipEdge>,
}

/// Bidirectional edge index: `(source, target)` and its mirror both map to
/// the same edge, so either orientation resolves in one lookup.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    edges: Vec<RelationshipEdge>,
    index: HashMap<(String, String), usize>,
}

impl RelationshipGraph {
    pub fn from_edges(
        edges: impl IntoIterator<Item = RelationshipEdge>,
    ) -> Result<Self, ResourceGraphError> {
        let mut graph = RelationshipGraph::default();
        for edge in edges {
            graph.insert(edge)?;
        }
        Ok(graph)
    }

    pub fn from_yaml(input: &str) -> Result<Self, ResourceGraphError> {
        let config: RelationshipConfig = serde_yaml::from_str(input)?;
        Self::from_edges(config.relationships)
    }

    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ResourceGraphError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn insert(&mut self, edge: RelationshipEdge) -> Result<(), ResourceGraphError> {
        if edge.composite && edge.components.is_empty() {
            return Err(ResourceGraphError::EmptyComposite {
                from: edge.source,
                to: edge.target,
            });
        }
        let forward = (edge.source.clone(), edge.target.clone());
        let mirror = (edge.target.clone(), edge.source.clone());
        if self.index.contains_key(&forward) || self.index.contains_key(&mirror) {
            return Err(ResourceGraphError::DuplicateRelationship {
                from: edge.source,
                to: edge.target,
            });
        }
        let slot = self.edges.len();
        self.edges.push(edge);
        self.index.insert(forward, slot);
        self.index.insert(mirror, slot);
        Ok(())
    }

    /// Edge registered as `a → b` or `b → a`, if any.
    pub fn find_edge(&self, a: &str, b: &str) -> Option<&RelationshipEdge> {
        self.index
            .get(&(a.to_string(), b.to_string()))
            .map(|&slot| &self.edges[slot])
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
