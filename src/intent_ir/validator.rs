//! Structural validation of the IR tree.
//!
//! Checks only shape: known elements and attributes, required attributes,
//! multiplicity limits. Semantic concerns (alias resolution, parameter
//! wiring, field existence) belong to the compiler and run only on a tree
//! that passed here.

use super::{attrs, labels, IrNode, IrSchemaError};

const INTENT_ATTRS: &[&str] = &[
    attrs::NAME,
    attrs::RESOURCE,
    attrs::DESCRIPTION,
    attrs::ROOT_ALIAS,
    attrs::PAGINATED,
    attrs::LIMIT,
    attrs::WHERE,
];
const SELECT_ATTRS: &[&str] = &[attrs::FIELD, attrs::ALIAS, attrs::ALIAS_AS];
const X_RESOURCE_ATTRS: &[&str] = &[attrs::NAME, attrs::ALIAS, attrs::ON, attrs::AUTO_CHAIN];
const JOIN_FILTER_ATTRS: &[&str] = &[attrs::FIELD, attrs::PARAM, attrs::BINDING];
const PARAMETER_ATTRS: &[&str] = &[
    attrs::NAME,
    attrs::TYPE,
    attrs::SOURCE,
    attrs::DEFAULT_VALUE,
    attrs::BINDING,
];

pub fn validate_ir(root: &IrNode) -> Result<(), IrSchemaError> {
    if root.label != labels::INTENT {
        return Err(IrSchemaError::WrongRoot(root.label.clone()));
    }
    check_attrs(root, INTENT_ATTRS, &[attrs::NAME, attrs::RESOURCE])?;
    check_flag_attrs(root)?;

    for child in &root.children {
        match child.label.as_str() {
            labels::SELECT_ATTRIBUTE => validate_select(child)?,
            labels::RESOURCE_DRILL => validate_drill(child)?,
            labels::PARAMETERS => validate_parameters(child)?,
            labels::SORT_BY | labels::GROUP_BY => validate_value_list(child)?,
            _ => return Err(unknown_or_misplaced(child, labels::INTENT)),
        }
    }
    for singleton in [
        labels::RESOURCE_DRILL,
        labels::PARAMETERS,
        labels::SORT_BY,
        labels::GROUP_BY,
    ] {
        let count = root.children_labeled(singleton).count();
        if count > 1 {
            return Err(IrSchemaError::DuplicateElement {
                element: singleton.to_string(),
                parent: labels::INTENT.to_string(),
                count,
            });
        }
    }
    Ok(())
}

fn validate_select(node: &IrNode) -> Result<(), IrSchemaError> {
    check_attrs(node, SELECT_ATTRS, &[attrs::FIELD])?;
    check_leaf(node)
}

fn validate_drill(node: &IrNode) -> Result<(), IrSchemaError> {
    check_attrs(node, &[], &[])?;
    if node.children.is_empty() {
        return Err(IrSchemaError::EmptyResourceDrill);
    }
    for child in &node.children {
        if child.label != labels::X_RESOURCE {
            return Err(unknown_or_misplaced(child, labels::RESOURCE_DRILL));
        }
        validate_x_resource(child)?;
    }
    Ok(())
}

fn validate_x_resource(node: &IrNode) -> Result<(), IrSchemaError> {
    check_attrs(node, X_RESOURCE_ATTRS, &[attrs::NAME])?;
    if let Some(value) = node.attr(attrs::AUTO_CHAIN) {
        check_boolean(node, attrs::AUTO_CHAIN, value)?;
    }
    for child in &node.children {
        match child.label.as_str() {
            labels::SELECT_ATTRIBUTE => validate_select(child)?,
            labels::JOIN_FILTER => {
                check_attrs(child, JOIN_FILTER_ATTRS, &[attrs::FIELD, attrs::PARAM])?;
                check_leaf(child)?;
            }
            labels::X_RESOURCE => validate_x_resource(child)?,
            _ => return Err(unknown_or_misplaced(child, labels::X_RESOURCE)),
        }
    }
    Ok(())
}

fn validate_parameters(node: &IrNode) -> Result<(), IrSchemaError> {
    check_attrs(node, &[], &[])?;
    for child in &node.children {
        if child.label != labels::INTENT_PARAMETER {
            return Err(unknown_or_misplaced(child, labels::PARAMETERS));
        }
        check_attrs(child, PARAMETER_ATTRS, &[attrs::NAME, attrs::TYPE, attrs::SOURCE])?;
        check_leaf(child)?;
    }
    Ok(())
}

fn validate_value_list(node: &IrNode) -> Result<(), IrSchemaError> {
    check_attrs(node, &[], &[])?;
    for child in &node.children {
        if child.label != labels::VALUE {
            return Err(unknown_or_misplaced(child, &node.label));
        }
        if child.text.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(IrSchemaError::MissingValueText {
                parent: node.label.clone(),
            });
        }
    }
    Ok(())
}

fn check_attrs(
    node: &IrNode,
    allowed: &[&str],
    required: &[&str],
) -> Result<(), IrSchemaError> {
    for key in node.attrs.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(IrSchemaError::UnknownAttribute {
                attribute: key.clone(),
                element: node.label.clone(),
            });
        }
    }
    for key in required {
        if node.attr(key).map_or(true, |v| v.trim().is_empty()) {
            return Err(IrSchemaError::MissingAttribute {
                attribute: key.to_string(),
                element: node.label.clone(),
            });
        }
    }
    Ok(())
}

fn check_leaf(node: &IrNode) -> Result<(), IrSchemaError> {
    match node.children.first() {
        Some(child) => Err(unknown_or_misplaced(child, &node.label)),
        None => Ok(()),
    }
}

fn check_flag_attrs(root: &IrNode) -> Result<(), IrSchemaError> {
    if let Some(value) = root.attr(attrs::PAGINATED) {
        check_boolean(root, attrs::PAGINATED, value)?;
    }
    if let Some(value) = root.attr(attrs::LIMIT) {
        if value.parse::<u64>().is_err() {
            return Err(IrSchemaError::InvalidAttributeValue {
                attribute: attrs::LIMIT.to_string(),
                element: root.label.clone(),
                value: value.to_string(),
                expected: "a non-negative integer",
            });
        }
    }
    Ok(())
}

fn check_boolean(node: &IrNode, attr: &str, value: &str) -> Result<(), IrSchemaError> {
    if value == "true" || value == "false" {
        Ok(())
    } else {
        Err(IrSchemaError::InvalidAttributeValue {
            attribute: attr.to_string(),
            element: node.label.clone(),
            value: value.to_string(),
            expected: "`true` or `false`",
        })
    }
}

fn unknown_or_misplaced(child: &IrNode, parent: &str) -> IrSchemaError {
    let known = matches!(
        child.label.as_str(),
        labels::INTENT
            | labels::SELECT_ATTRIBUTE
            | labels::RESOURCE_DRILL
            | labels::X_RESOURCE
            | labels::JOIN_FILTER
            | labels::PARAMETERS
            | labels::INTENT_PARAMETER
            | labels::SORT_BY
            | labels::GROUP_BY
            | labels::VALUE
    );
    if known {
        IrSchemaError::MisplacedElement {
            element: child.label.clone(),
            parent: parent.to_string(),
        }
    } else {
        IrSchemaError::UnknownElement {
            element: child.label.clone(),
            parent: parent.to_string(),
        }
    }
}
