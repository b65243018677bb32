//! Semantic compilation: validated IR plus resource metadata in, an
//! immutable [`IntentModel`] out.
//!
//! The compiler owns alias resolution, join-tree flattening, field
//! reference validation, where-clause rewriting and parameter resolution.
//! It assumes the IR already passed the schema validator; structural
//! shapes are not re-checked here. Synthesized aliases come from a
//! per-compilation counter, so output is deterministic for a given input.

use std::collections::HashMap;

use crate::intent_ir::{attrs, labels, IrNode};
use crate::resource_graph::ResourceMetadata;

pub mod errors;
pub mod model;
pub mod where_rewrite;

pub use errors::IntentConfigError;
pub use model::{
    BindingKind, IntentModel, JoinFilter, JoinSpec, ParameterSource, ParameterSpec, ParameterType,
    SelectAttribute,
};
pub use where_rewrite::rewrite_where;

/// Deterministic alias synthesis: lowercased resource name plus a counter
/// that increments per synthesized alias within one compilation.
struct AliasAllocator {
    counter: usize,
}

impl AliasAllocator {
    fn new() -> Self {
        AliasAllocator { counter: 0 }
    }

    fn next(&mut self, resource: &str) -> String {
        self.counter += 1;
        format!("{}_{}", resource.to_lowercase(), self.counter)
    }
}

/// Per-compilation working state shared across the flattening passes.
struct CompileCtx<'a> {
    intent_name: String,
    metadata: &'a dyn ResourceMetadata,
    alloc: AliasAllocator,
    /// resource name → alias; repeated resources overwrite their entry,
    /// which is safe because repeats are forced to carry explicit aliases.
    alias_map: HashMap<String, String>,
    /// Every alias handed out, in declaration order.
    alias_values: Vec<String>,
}

pub fn compile_intent(
    ir: &IrNode,
    metadata: &dyn ResourceMetadata,
) -> Result<IntentModel, IntentConfigError> {
    let intent_name = ir.attr(attrs::NAME).unwrap_or_default().to_string();
    let root_resource = ir.attr(attrs::RESOURCE).unwrap_or_default().to_string();
    let root_entity = metadata
        .entity_name(&root_resource)
        .ok_or_else(|| IntentConfigError::UnknownResource(root_resource.clone()))?
        .to_string();

    let mut ctx = CompileCtx {
        intent_name,
        metadata,
        alloc: AliasAllocator::new(),
        alias_map: HashMap::new(),
        alias_values: Vec::new(),
    };

    let root_alias = match ir.attr(attrs::ROOT_ALIAS) {
        Some(alias) => alias.to_string(),
        None => ctx.alloc.next(&root_resource),
    };
    ctx.alias_map
        .insert(root_resource.clone(), root_alias.clone());
    ctx.alias_values.push(root_alias.clone());

    // Join flattening first: select/sort/where resolution needs the
    // complete alias map.
    let mut joins: Vec<JoinSpec> = Vec::new();
    let mut join_selects: Vec<SelectAttribute> = Vec::new();
    if let Some(drill) = ir.child(labels::RESOURCE_DRILL) {
        for node in drill.children_labeled(labels::X_RESOURCE) {
            flatten_join(node, &mut ctx, &mut joins, &mut join_selects)?;
        }
    }

    let mut selects: Vec<SelectAttribute> = Vec::new();
    for node in ir.children_labeled(labels::SELECT_ATTRIBUTE) {
        selects.push(resolve_intent_select(
            node,
            &ctx,
            &root_resource,
            &root_alias,
            &joins,
        )?);
    }
    selects.extend(join_selects);

    let where_clause = match ir.attr(attrs::WHERE) {
        Some(text) if !text.trim().is_empty() => Some(rewrite_where(
            text,
            &root_resource,
            &root_alias,
            &ctx.alias_map,
            metadata,
        )?),
        _ => None,
    };

    let sort_by = resolve_value_list(ir, labels::SORT_BY, &ctx, &root_resource, &root_alias, &joins)?;
    let group_by =
        resolve_value_list(ir, labels::GROUP_BY, &ctx, &root_resource, &root_alias, &joins)?;

    let mut parameters: Vec<ParameterSpec> = Vec::new();
    if let Some(block) = ir.child(labels::PARAMETERS) {
        for node in block.children_labeled(labels::INTENT_PARAMETER) {
            parameters.push(resolve_parameter(node)?);
        }
    }

    Ok(IntentModel {
        name: ctx.intent_name,
        description: ir.attr(attrs::DESCRIPTION).map(str::to_string),
        root_resource,
        root_entity,
        root_alias,
        paginated: ir.attr(attrs::PAGINATED) == Some("true"),
        limit: ir.attr(attrs::LIMIT).and_then(|v| v.parse().ok()),
        where_clause,
        selects,
        joins,
        parameters,
        sort_by,
        group_by,
    })
}

/// Depth-first join flattening, parent before child. Each node's selects
/// and filters are qualified with the node's own alias.
fn flatten_join(
    node: &IrNode,
    ctx: &mut CompileCtx<'_>,
    joins: &mut Vec<JoinSpec>,
    selects: &mut Vec<SelectAttribute>,
) -> Result<(), IntentConfigError> {
    let resource = node.attr(attrs::NAME).unwrap_or_default().to_string();
    let entity = ctx
        .metadata
        .entity_name(&resource)
        .ok_or_else(|| IntentConfigError::UnknownResource(resource.clone()))?
        .to_string();

    let alias = match node.attr(attrs::ALIAS) {
        Some(explicit) => explicit.to_string(),
        None => {
            if ctx.alias_map.contains_key(&resource) {
                return Err(IntentConfigError::DuplicateResourceNeedsAlias {
                    resource,
                    intent: ctx.intent_name.clone(),
                });
            }
            ctx.alloc.next(&resource)
        }
    };
    // Aliases are unique per Intent; a collision with the root alias or
    // any earlier join is a configuration error.
    if ctx.alias_values.iter().any(|a| a == &alias) {
        return Err(IntentConfigError::DuplicateAlias {
            alias,
            intent: ctx.intent_name.clone(),
        });
    }
    ctx.alias_map.insert(resource.clone(), alias.clone());
    ctx.alias_values.push(alias.clone());

    let mut filters: Vec<JoinFilter> = Vec::new();
    for child in node.children_labeled(labels::SELECT_ATTRIBUTE) {
        let field = child.attr(attrs::FIELD).unwrap_or_default();
        check_field(ctx.metadata, &resource, field)?;
        selects.push(SelectAttribute {
            alias: alias.clone(),
            field: field.to_string(),
            alias_as: child.attr(attrs::ALIAS_AS).map(str::to_string),
        });
    }
    for child in node.children_labeled(labels::JOIN_FILTER) {
        let field = child.attr(attrs::FIELD).unwrap_or_default();
        check_field(ctx.metadata, &resource, field)?;
        let binding = match child.attr(attrs::BINDING) {
            Some(word) => word.parse()?,
            None => BindingKind::default(),
        };
        filters.push(JoinFilter {
            field: format!("{}.{}", alias, field),
            param: child.attr(attrs::PARAM).unwrap_or_default().to_string(),
            binding,
        });
    }

    joins.push(JoinSpec {
        resource: resource.clone(),
        entity,
        alias,
        on: node.attr(attrs::ON).map(str::to_string),
        auto_chain: node.attr(attrs::AUTO_CHAIN) != Some("false"),
        filters,
    });

    for child in node.children_labeled(labels::X_RESOURCE) {
        flatten_join(child, ctx, joins, selects)?;
    }
    Ok(())
}

fn check_field(
    metadata: &dyn ResourceMetadata,
    resource: &str,
    field: &str,
) -> Result<(), IntentConfigError> {
    if metadata.has_field(resource, field) {
        Ok(())
    } else {
        Err(IntentConfigError::UnknownField {
            resource: resource.to_string(),
            field: field.to_string(),
        })
    }
}

/// Intent-level select resolution. Resolution order: explicit alias
/// attribute, then dotted resource prefix, then unqualified lookup on the
/// root resource followed by each join in flattened order.
fn resolve_intent_select(
    node: &IrNode,
    ctx: &CompileCtx<'_>,
    root_resource: &str,
    root_alias: &str,
    joins: &[JoinSpec],
) -> Result<SelectAttribute, IntentConfigError> {
    let field = node.attr(attrs::FIELD).unwrap_or_default();
    let alias_as = node.attr(attrs::ALIAS_AS).map(str::to_string);

    if let Some(explicit) = node.attr(attrs::ALIAS) {
        if !ctx.alias_values.iter().any(|a| a == explicit) {
            return Err(IntentConfigError::UnknownSelectAlias {
                alias: explicit.to_string(),
                intent: ctx.intent_name.clone(),
            });
        }
        return Ok(SelectAttribute {
            alias: explicit.to_string(),
            field: field.to_string(),
            alias_as,
        });
    }

    let (alias, field) =
        resolve_field_reference(field, ctx, root_resource, root_alias, joins)?;
    Ok(SelectAttribute {
        alias,
        field,
        alias_as,
    })
}

/// Shared resolution for select, sort and group references.
fn resolve_field_reference(
    reference: &str,
    ctx: &CompileCtx<'_>,
    root_resource: &str,
    root_alias: &str,
    joins: &[JoinSpec],
) -> Result<(String, String), IntentConfigError> {
    if let Some((prefix, field)) = reference.split_once('.') {
        let alias = ctx.alias_map.get(prefix).ok_or_else(|| {
            IntentConfigError::UnknownResourcePrefix {
                prefix: prefix.to_string(),
                reference: reference.to_string(),
            }
        })?;
        return Ok((alias.clone(), field.to_string()));
    }
    if ctx.metadata.has_field(root_resource, reference) {
        return Ok((root_alias.to_string(), reference.to_string()));
    }
    for join in joins {
        if ctx.metadata.has_field(&join.resource, reference) {
            return Ok((join.alias.clone(), reference.to_string()));
        }
    }
    Err(IntentConfigError::UnresolvedField {
        field: reference.to_string(),
    })
}

fn resolve_value_list(
    ir: &IrNode,
    label: &str,
    ctx: &CompileCtx<'_>,
    root_resource: &str,
    root_alias: &str,
    joins: &[JoinSpec],
) -> Result<Vec<String>, IntentConfigError> {
    let mut resolved = Vec::new();
    if let Some(list) = ir.child(label) {
        for value in list.children_labeled(labels::VALUE) {
            let reference = value.text.as_deref().unwrap_or_default();
            let (alias, field) =
                resolve_field_reference(reference, ctx, root_resource, root_alias, joins)?;
            resolved.push(format!("{}.{}", alias, field));
        }
    }
    Ok(resolved)
}

fn resolve_parameter(node: &IrNode) -> Result<ParameterSpec, IntentConfigError> {
    let name = node.attr(attrs::NAME).unwrap_or_default().to_string();
    let param_type = ParameterType::parse(node.attr(attrs::TYPE).unwrap_or_default())?;
    let source: ParameterSource = node.attr(attrs::SOURCE).unwrap_or_default().parse()?;
    let default_value = node
        .attr(attrs::DEFAULT_VALUE)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    if source == ParameterSource::Static && default_value.is_none() {
        return Err(IntentConfigError::StaticParameterNeedsDefault(name));
    }
    let binding = match node.attr(attrs::BINDING) {
        Some(word) => Some(word.parse()?),
        None => None,
    };
    Ok(ParameterSpec {
        name,
        param_type,
        default_value,
        source,
        binding,
    })
}
