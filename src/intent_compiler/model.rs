//! The validated Intent model produced by semantic compilation.
//!
//! Every structure here is created fresh per compilation call and is
//! immutable once returned; nothing is cached or shared across calls.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

use super::errors::IntentConfigError;

/// Comparison semantics applied when generating a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Equals,
    Like,
    In,
    GreaterThan,
    LessThan,
}

impl BindingKind {
    /// Operator emitted into query text.
    pub fn operator(&self) -> &'static str {
        match self {
            BindingKind::Equals => "=",
            BindingKind::Like => "LIKE",
            BindingKind::In => "IN",
            BindingKind::GreaterThan => ">",
            BindingKind::LessThan => "<",
        }
    }
}

impl Default for BindingKind {
    fn default() -> Self {
        BindingKind::Equals
    }
}

impl FromStr for BindingKind {
    type Err = IntentConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(BindingKind::Equals),
            "like" => Ok(BindingKind::Like),
            "in" => Ok(BindingKind::In),
            "greater_than" => Ok(BindingKind::GreaterThan),
            "less_than" => Ok(BindingKind::LessThan),
            other => Err(IntentConfigError::UnknownBinding(other.to_string())),
        }
    }
}

/// Where a parameter's bound value comes from at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    Static,
    Request,
    UserContext,
    SecurityProfile,
}

impl FromStr for ParameterSource {
    type Err = IntentConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(ParameterSource::Static),
            "request" => Ok(ParameterSource::Request),
            "user_context" => Ok(ParameterSource::UserContext),
            "security_profile" => Ok(ParameterSource::SecurityProfile),
            other => Err(IntentConfigError::UnknownParameterSource(other.to_string())),
        }
    }
}

lazy_static! {
    /// Short type names accepted in parameter declarations, mapped to the
    /// canonical type names the execution collaborator understands.
    static ref CANONICAL_TYPES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("string", "String");
        m.insert("int", "Integer");
        m.insert("integer", "Integer");
        m.insert("long", "Long");
        m.insert("bool", "Boolean");
        m.insert("boolean", "Boolean");
        m.insert("float", "Float");
        m.insert("double", "Double");
        m.insert("decimal", "BigDecimal");
        m.insert("date", "LocalDate");
        m.insert("datetime", "LocalDateTime");
        m.insert("time", "LocalTime");
        m.insert("timestamp", "Timestamp");
        m
    };
}

/// Declared type of an Intent parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParameterType {
    /// A primitive or temporal type, stored canonically.
    Canonical(&'static str),
    /// An entity reference naming a fully-qualified type,
    /// declared as `entity:<fqn>`.
    EntityReference(String),
}

impl ParameterType {
    pub fn parse(declared: &str) -> Result<Self, IntentConfigError> {
        if let Some(fqn) = declared.strip_prefix("entity:") {
            if fqn.is_empty() {
                return Err(IntentConfigError::UnknownParameterType(declared.to_string()));
            }
            return Ok(ParameterType::EntityReference(fqn.to_string()));
        }
        CANONICAL_TYPES
            .get(declared.to_lowercase().as_str())
            .copied()
            .map(ParameterType::Canonical)
            .ok_or_else(|| IntentConfigError::UnknownParameterType(declared.to_string()))
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterType::Canonical(name) => write!(f, "{}", name),
            ParameterType::EntityReference(fqn) => write!(f, "entity:{}", fqn),
        }
    }
}

/// One projected attribute, always qualified by a resolved alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectAttribute {
    pub alias: String,
    pub field: String,
    /// Output rename, if declared.
    pub alias_as: Option<String>,
}

/// One filter predicate attached to a join's ON clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinFilter {
    /// Alias-qualified field the predicate applies to.
    pub field: String,
    /// Named parameter supplying the right-hand side.
    pub param: String,
    pub binding: BindingKind,
}

/// One joined resource in flattened, parent-before-child order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinSpec {
    pub resource: String,
    /// Entity name emitted into query text.
    pub entity: String,
    pub alias: String,
    /// Explicit join predicate; overrides auto-chaining when present.
    pub on: Option<String>,
    pub auto_chain: bool,
    pub filters: Vec<JoinFilter>,
}

/// One declared parameter, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub default_value: Option<String>,
    pub source: ParameterSource,
    /// Binding override for filters referencing this parameter.
    pub binding: Option<BindingKind>,
}

/// A compiled, named query specification over a root resource plus its
/// joined resources. Produced by [`compile_intent`](super::compile_intent)
/// and consumed by the query generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentModel {
    pub name: String,
    pub description: Option<String>,
    pub root_resource: String,
    /// Entity name of the root resource.
    pub root_entity: String,
    pub root_alias: String,
    pub paginated: bool,
    pub limit: Option<u64>,
    /// Where clause with every field reference rewritten to
    /// alias-qualified form; `None` when no clause was declared.
    pub where_clause: Option<String>,
    pub selects: Vec<SelectAttribute>,
    pub joins: Vec<JoinSpec>,
    pub parameters: Vec<ParameterSpec>,
    /// Alias-qualified sort references, in declaration order.
    pub sort_by: Vec<String>,
    pub group_by: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_kind_words_and_operators() {
        assert_eq!("equals".parse::<BindingKind>().unwrap().operator(), "=");
        assert_eq!("like".parse::<BindingKind>().unwrap().operator(), "LIKE");
        assert_eq!("in".parse::<BindingKind>().unwrap().operator(), "IN");
        assert_eq!("greater_than".parse::<BindingKind>().unwrap().operator(), ">");
        assert_eq!("less_than".parse::<BindingKind>().unwrap().operator(), "<");
        assert!("between".parse::<BindingKind>().is_err());
    }

    #[test]
    fn test_parameter_type_canonicalization() {
        assert_eq!(
            ParameterType::parse("int").unwrap(),
            ParameterType::Canonical("Integer")
        );
        assert_eq!(
            ParameterType::parse("DateTime").unwrap(),
            ParameterType::Canonical("LocalDateTime")
        );
        assert_eq!(
            ParameterType::parse("entity:com.acme.City").unwrap(),
            ParameterType::EntityReference("com.acme.City".to_string())
        );
        assert!(ParameterType::parse("uuid").is_err());
        assert!(ParameterType::parse("entity:").is_err());
    }

    #[test]
    fn test_parameter_source_words() {
        assert_eq!(
            "security_profile".parse::<ParameterSource>().unwrap(),
            ParameterSource::SecurityProfile
        );
        assert!("session".parse::<ParameterSource>().is_err());
    }
}
