//! Query generation: lowers a compiled [`IntentModel`] plus the
//! relationship graph into a data query and a matching count query.
//!
//! Output is a SQL-like query string with named parameter placeholders
//! (`:name`); binding actual values happens at execution time through
//! [`binder`]. Pagination offsets and GROUP BY application are left to the
//! execution collaborator, which reads the model's paginated/limit
//! attributes.

use serde::Serialize;

use crate::intent_compiler::{IntentModel, JoinSpec, ParameterSpec};
use crate::resource_graph::{RelationshipEdge, RelationshipGraph};

pub mod binder;
pub mod errors;

pub use binder::{bind_parameters, ExecutionContext};
pub use errors::QueryGeneratorError;

/// The transformer's output: query text plus the parameter list the
/// caller must supply values for at execution time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedQuery {
    pub data_query: String,
    /// Shares FROM/JOIN/WHERE with the data query; projects a count of
    /// the root alias and carries no ORDER BY.
    pub count_query: String,
    pub parameters: Vec<ParameterSpec>,
}

pub fn generate_queries(
    model: &IntentModel,
    graph: &RelationshipGraph,
) -> Result<GeneratedQuery, QueryGeneratorError> {
    let mut body = String::new();
    body.push_str("FROM ");
    body.push_str(&model.root_entity);
    body.push(' ');
    body.push_str(&model.root_alias);

    // Chain state: the previous join is the preferred auto-chain target.
    let mut previous: Option<&JoinSpec> = None;
    for join in &model.joins {
        body.push_str(" JOIN ");
        body.push_str(&join.entity);
        body.push(' ');
        body.push_str(&join.alias);
        body.push_str(" ON ");
        body.push_str(&join_predicate(model, graph, join, previous)?);
        for filter in &join.filters {
            body.push_str(" AND ");
            body.push_str(&filter.field);
            body.push(' ');
            body.push_str(filter.binding.operator());
            body.push_str(" :");
            body.push_str(&filter.param);
        }
        previous = Some(join);
    }

    if let Some(where_clause) = &model.where_clause {
        body.push_str(" WHERE ");
        body.push_str(where_clause);
    }

    let projection = if model.selects.is_empty() {
        model.root_alias.clone()
    } else {
        model
            .selects
            .iter()
            .map(|s| match &s.alias_as {
                Some(rename) => format!("{}.{} AS {}", s.alias, s.field, rename),
                None => format!("{}.{}", s.alias, s.field),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut data_query = format!("SELECT {} {}", projection, body);
    if !model.sort_by.is_empty() {
        data_query.push_str(" ORDER BY ");
        data_query.push_str(&model.sort_by.join(", "));
    }
    let count_query = format!("SELECT count({}) {}", model.root_alias, body);

    Ok(GeneratedQuery {
        data_query,
        count_query,
        parameters: model.parameters.clone(),
    })
}

/// Resolves one join's linking predicate. Explicit `on` text wins; else
/// the edge to the previous join is used when auto-chaining, falling back
/// to the edge to the root resource.
fn join_predicate(
    model: &IntentModel,
    graph: &RelationshipGraph,
    join: &JoinSpec,
    previous: Option<&JoinSpec>,
) -> Result<String, QueryGeneratorError> {
    if let Some(on) = &join.on {
        return Ok(on.clone());
    }
    let (other_resource, other_alias) = match previous {
        Some(prev) if join.auto_chain => (prev.resource.as_str(), prev.alias.as_str()),
        _ => (model.root_resource.as_str(), model.root_alias.as_str()),
    };
    let edge = graph.find_edge(&join.resource, other_resource).ok_or_else(|| {
        QueryGeneratorError::MissingRelationship {
            from: join.resource.clone(),
            to: other_resource.to_string(),
        }
    })?;
    Ok(edge_predicate(edge, &join.resource, &join.alias, other_alias))
}

/// Emits the predicate for one edge, oriented by key ownership: the side
/// holding the foreign key qualifies the key field, the other side is
/// referenced by its alias alone. Composite edges emit one conjunct per
/// component field pair.
fn edge_predicate(
    edge: &RelationshipEdge,
    current_resource: &str,
    current_alias: &str,
    other_alias: &str,
) -> String {
    let current_owns = edge.owns_key(current_resource);
    if edge.composite {
        let (owner, referenced) = if current_owns {
            (current_alias, other_alias)
        } else {
            (other_alias, current_alias)
        };
        edge.components
            .iter()
            .map(|(source_field, target_field)| {
                format!("{}.{} = {}.{}", owner, source_field, referenced, target_field)
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    } else if current_owns {
        format!("{}.{} = {}", current_alias, edge.fk_field, other_alias)
    } else {
        format!("{}.{} = {}", other_alias, edge.fk_field, current_alias)
    }
}
