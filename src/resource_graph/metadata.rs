//! Resource metadata lookup used by the semantic compiler.
//!
//! The compiler only needs three facts about a resource: whether a field
//! exists on it, the entity name to emit into query text, and its primary
//! key. The trait keeps the compiler decoupled from wherever those facts
//! actually live; [`ResourceRegistry`] is the YAML-backed implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ResourceGraphError;

pub trait ResourceMetadata {
    fn has_field(&self, resource: &str, field: &str) -> bool;
    /// Entity name used in generated query text; `None` for an unknown
    /// resource.
    fn entity_name(&self, resource: &str) -> Option<&str>;
    fn primary_key(&self, resource: &str) -> Option<&str>;
}

/// Declared shape of one resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Entity name emitted into query text; defaults to the resource name.
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    pub fields: Vec<String>,
}

fn default_primary_key() -> String {
    "id".to_string()
}

#[derive(Debug, Deserialize)]
struct RegistryConfig {
    resources: HashMap<String, ResourceDefinition>,
}

/// In-memory resource catalog, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: HashMap<String, ResourceDefinition>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml(input: &str) -> Result<Self, ResourceGraphError> {
        let config: RegistryConfig = serde_yaml::from_str(input)?;
        Ok(ResourceRegistry {
            resources: config.resources,
        })
    }

    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ResourceGraphError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn register(&mut self, name: impl Into<String>, definition: ResourceDefinition) {
        self.resources.insert(name.into(), definition);
    }

    /// Shorthand for tests and embedded setups.
    pub fn with_resource(
        mut self,
        name: impl Into<String>,
        fields: &[&str],
    ) -> Self {
        let name = name.into();
        self.register(
            name,
            ResourceDefinition {
                entity: None,
                primary_key: default_primary_key(),
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
        );
        self
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.resources.contains_key(resource)
    }
}

impl ResourceMetadata for ResourceRegistry {
    fn has_field(&self, resource: &str, field: &str) -> bool {
        self.resources
            .get(resource)
            .map(|def| def.fields.iter().any(|f| f == field))
            .unwrap_or(false)
    }

    fn entity_name(&self, resource: &str) -> Option<&str> {
        // The fallback must borrow from the map, not the lookup argument,
        // to satisfy the `&self` return lifetime.
        let (key, def) = self.resources.get_key_value(resource)?;
        Some(def.entity.as_deref().unwrap_or(key))
    }

    fn primary_key(&self, resource: &str) -> Option<&str> {
        self.resources.get(resource).map(|def| def.primary_key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookups() {
        let registry = ResourceRegistry::new()
            .with_resource("Asset", &["assetId", "tag", "location"])
            .with_resource("Location", &["name", "city"]);

        assert!(registry.has_field("Asset", "tag"));
        assert!(!registry.has_field("Asset", "name"));
        assert!(!registry.has_field("Missing", "tag"));
        assert_eq!(registry.entity_name("Asset"), Some("Asset"));
        assert_eq!(registry.entity_name("Missing"), None);
        assert_eq!(registry.primary_key("Location"), Some("id"));
    }

    #[test]
    fn test_registry_from_yaml() {
        let registry = ResourceRegistry::from_yaml(
            "resources:\n\
             \x20 Asset:\n\
             \x20   entity: AssetEntity\n\
             \x20   primary_key: assetId\n\
             \x20   fields: [assetId, tag]\n",
        )
        .unwrap();
        assert_eq!(registry.entity_name("Asset"), Some("AssetEntity"));
        assert_eq!(registry.primary_key("Asset"), Some("assetId"));
        assert!(registry.has_field("Asset", "tag"));
    }
}
