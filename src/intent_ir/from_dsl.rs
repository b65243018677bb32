//! Depth-first lowering of the DSL parse tree into the shared IR shape.
//!
//! Only the first occurrence of a singleton block (description, alias,
//! where, paginated, limit, top-level select, parameters, sort, group) is
//! honored; later occurrences are dropped with a warning. Statements that
//! have no legal place in the IR (a `Where` inside an `Include`, a stray
//! `Param`) are still emitted as IR nodes so the schema validator reports
//! them as structural violations instead of silently vanishing.

use log::warn;

use super::{attrs, labels, IrNode};
use crate::intent_dsl::{FilterDecl, IncludeBlock, IntentAst, ParamDecl, SelectItem, Statement};

pub fn intent_ast_to_ir(ast: &IntentAst) -> IrNode {
    let mut intent = IrNode::new(labels::INTENT)
        .with_attr(attrs::NAME, &ast.name)
        .with_attr(attrs::RESOURCE, &ast.resource);

    let mut select_nodes: Vec<IrNode> = Vec::new();
    let mut drill: Option<IrNode> = None;
    let mut parameters: Option<IrNode> = None;
    let mut sort_by: Option<IrNode> = None;
    let mut group_by: Option<IrNode> = None;
    let mut misplaced: Vec<IrNode> = Vec::new();
    let mut have_select = false;

    for stmt in &ast.statements {
        match stmt {
            Statement::Description(text) => {
                set_singleton_attr(&mut intent, attrs::DESCRIPTION, text, &ast.name)
            }
            Statement::Alias(alias) => {
                set_singleton_attr(&mut intent, attrs::ROOT_ALIAS, alias, &ast.name)
            }
            Statement::Where(text) => {
                set_singleton_attr(&mut intent, attrs::WHERE, text, &ast.name)
            }
            Statement::Paginated(flag) => {
                set_singleton_attr(&mut intent, attrs::PAGINATED, &flag.to_string(), &ast.name)
            }
            Statement::Limit(limit) => {
                set_singleton_attr(&mut intent, attrs::LIMIT, &limit.to_string(), &ast.name)
            }
            Statement::Select(items) => {
                if have_select {
                    warn!(
                        "intent `{}`: duplicate top-level Select block ignored",
                        ast.name
                    );
                } else {
                    have_select = true;
                    select_nodes.extend(items.iter().map(select_item_to_ir));
                }
            }
            Statement::Include(block) => {
                drill
                    .get_or_insert_with(|| IrNode::new(labels::RESOURCE_DRILL))
                    .children
                    .push(include_to_ir(block, &ast.name));
            }
            Statement::Parameters(params) => {
                if parameters.is_some() {
                    warn!(
                        "intent `{}`: duplicate Parameters block ignored",
                        ast.name
                    );
                } else {
                    let mut node = IrNode::new(labels::PARAMETERS);
                    node.children.extend(params.iter().map(param_to_ir));
                    parameters = Some(node);
                }
            }
            Statement::SortBy(fields) => {
                set_singleton_list(&mut sort_by, labels::SORT_BY, fields, &ast.name)
            }
            Statement::GroupBy(fields) => {
                set_singleton_list(&mut group_by, labels::GROUP_BY, fields, &ast.name)
            }
            // Structurally illegal at intent level; surfaced to the validator.
            Statement::AddFilter(filter) => misplaced.push(filter_to_ir(filter)),
            Statement::Param(param) => misplaced.push(param_to_ir(param)),
        }
    }

    intent.children.extend(select_nodes);
    intent.children.extend(drill);
    intent.children.extend(parameters);
    intent.children.extend(sort_by);
    intent.children.extend(group_by);
    intent.children.extend(misplaced);
    intent
}

fn set_singleton_attr(intent: &mut IrNode, attr: &str, value: &str, intent_name: &str) {
    if intent.attrs.contains_key(attr) {
        warn!(
            "intent `{}`: duplicate `{}` declaration ignored",
            intent_name, attr
        );
    } else {
        intent.attrs.insert(attr.to_string(), value.to_string());
    }
}

fn set_singleton_list(slot: &mut Option<IrNode>, label: &str, fields: &[String], intent_name: &str) {
    if slot.is_some() {
        warn!(
            "intent `{}`: duplicate `{}` declaration ignored",
            intent_name, label
        );
        return;
    }
    let mut node = IrNode::new(label);
    node.children.extend(
        fields
            .iter()
            .map(|f| IrNode::new(labels::VALUE).with_text(f)),
    );
    *slot = Some(node);
}

fn select_item_to_ir(item: &SelectItem) -> IrNode {
    let mut node = IrNode::new(labels::SELECT_ATTRIBUTE).with_attr(attrs::FIELD, &item.field);
    if let Some(rename) = &item.alias_as {
        node = node.with_attr(attrs::ALIAS_AS, rename);
    }
    node
}

fn filter_to_ir(filter: &FilterDecl) -> IrNode {
    IrNode::new(labels::JOIN_FILTER)
        .with_attr(attrs::FIELD, &filter.field)
        .with_attr(attrs::PARAM, &filter.param)
        .with_attr(attrs::BINDING, &filter.binding)
}

fn param_to_ir(param: &ParamDecl) -> IrNode {
    let mut node = IrNode::new(labels::INTENT_PARAMETER)
        .with_attr(attrs::NAME, &param.name)
        .with_attr(attrs::TYPE, &param.datatype)
        .with_attr(attrs::SOURCE, &param.source);
    if let Some(default) = &param.default_value {
        node = node.with_attr(attrs::DEFAULT_VALUE, default);
    }
    if let Some(binding) = &param.binding {
        node = node.with_attr(attrs::BINDING, binding);
    }
    node
}

fn include_to_ir(block: &IncludeBlock, intent_name: &str) -> IrNode {
    let mut node = IrNode::new(labels::X_RESOURCE).with_attr(attrs::NAME, &block.resource);
    if let Some(alias) = &block.alias {
        node = node.with_attr(attrs::ALIAS, alias);
    }
    // DSL joins always auto-chain; explicit `on` predicates and chain
    // control are only expressible through the XML surface.
    node = node.with_attr(attrs::AUTO_CHAIN, "true");

    for stmt in &block.statements {
        match stmt {
            Statement::Select(items) => {
                node.children.extend(items.iter().map(select_item_to_ir));
            }
            Statement::AddFilter(filter) => node.children.push(filter_to_ir(filter)),
            Statement::Include(nested) => node.children.push(include_to_ir(nested, intent_name)),
            Statement::Param(param) => node.children.push(param_to_ir(param)),
            // No IR position under a join; emit the node where it was
            // written and let the validator reject it.
            other => node.children.push(misplaced_statement_node(other)),
        }
    }
    node
}

fn misplaced_statement_node(stmt: &Statement) -> IrNode {
    let label = match stmt {
        Statement::Description(_) => "Description",
        Statement::Alias(_) => "Alias",
        Statement::Where(_) => "Where",
        Statement::Paginated(_) => "Paginated",
        Statement::Limit(_) => "Limit",
        Statement::Parameters(_) => labels::PARAMETERS,
        Statement::SortBy(_) => labels::SORT_BY,
        Statement::GroupBy(_) => labels::GROUP_BY,
        // Handled by the callers above.
        Statement::Select(_)
        | Statement::AddFilter(_)
        | Statement::Include(_)
        | Statement::Param(_) => unreachable!("placed statements are mapped by the caller"),
    };
    IrNode::new(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent_dsl::parse_intent_dsl;

    #[test]
    fn test_full_intent_lowering() {
        let ast = parse_intent_dsl(
            "Create Intent for resource Asset as assetQuery\n\
             \x20   With alias ast\n\
             \x20   Where \"tag='TAG-2'\"\n\
             \x20   Select assetId, tag\n\
             \x20   Include Location as loc\n\
             \x20       Select name\n\
             \x20   Sort by assetId\n",
        )
        .unwrap();
        let ir = intent_ast_to_ir(&ast);

        assert_eq!(ir.label, labels::INTENT);
        assert_eq!(ir.attr(attrs::NAME), Some("assetQuery"));
        assert_eq!(ir.attr(attrs::RESOURCE), Some("Asset"));
        assert_eq!(ir.attr(attrs::ROOT_ALIAS), Some("ast"));
        assert_eq!(ir.attr(attrs::WHERE), Some("tag='TAG-2'"));
        assert_eq!(ir.children_labeled(labels::SELECT_ATTRIBUTE).count(), 2);

        let drill = ir.child(labels::RESOURCE_DRILL).expect("drill node");
        let join = drill.child(labels::X_RESOURCE).expect("join node");
        assert_eq!(join.attr(attrs::NAME), Some("Location"));
        assert_eq!(join.attr(attrs::ALIAS), Some("loc"));
        assert_eq!(join.attr(attrs::AUTO_CHAIN), Some("true"));
        assert_eq!(join.children_labeled(labels::SELECT_ATTRIBUTE).count(), 1);

        let sort = ir.child(labels::SORT_BY).expect("sortBy node");
        assert_eq!(sort.children[0].text.as_deref(), Some("assetId"));
    }

    #[test]
    fn test_duplicate_singletons_first_wins() {
        let ast = parse_intent_dsl(
            "Create Intent for resource Asset as q\n\
             Where \"a=1\"\n\
             Where \"b=2\"\n\
             Limit 10\n\
             Limit 20\n",
        )
        .unwrap();
        let ir = intent_ast_to_ir(&ast);
        assert_eq!(ir.attr(attrs::WHERE), Some("a=1"));
        assert_eq!(ir.attr(attrs::LIMIT), Some("10"));
    }
}
