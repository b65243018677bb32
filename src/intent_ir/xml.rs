//! XML front-end: the second intent surface.
//!
//! The XML document is mapped element-for-element into the same [`IrNode`]
//! tree the DSL front-end produces. No validation happens here beyond XML
//! well-formedness; the schema validator owns the structural contract, so
//! both surfaces fail identically on bad shapes.

use roxmltree::{Document, Node};

use super::{IrNode, IrSchemaError};

pub fn parse_intent_xml(input: &str) -> Result<IrNode, IrSchemaError> {
    let doc = Document::parse(input).map_err(|e| IrSchemaError::XmlSyntax(e.to_string()))?;
    Ok(element_to_ir(doc.root_element()))
}

fn element_to_ir(element: Node<'_, '_>) -> IrNode {
    let mut node = IrNode::new(element.tag_name().name());
    for attr in element.attributes() {
        node.attrs
            .insert(attr.name().to_string(), attr.value().to_string());
    }

    let has_element_children = element.children().any(|c| c.is_element());
    if has_element_children {
        node.children.extend(
            element
                .children()
                .filter(|c| c.is_element())
                .map(element_to_ir),
        );
    } else if let Some(text) = element.text() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            node.text = Some(trimmed.to_string());
        }
    }
    node
}
