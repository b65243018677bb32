//! Intermediate Representation shared by both intent surfaces.
//!
//! The IR is a generic labeled tree mirroring the XML surface. The DSL
//! front-end ([`from_dsl`]) and the XML front-end ([`xml`]) both produce
//! this exact shape, and the schema validator ([`validator`]) checks it
//! before any semantic compilation, so a single IR → IntentModel compiler
//! serves both entry points.

use std::collections::BTreeMap;

pub mod errors;
pub mod from_dsl;
pub mod validator;
pub mod xml;

pub use errors::IrSchemaError;
pub use from_dsl::intent_ast_to_ir;
pub use validator::validate_ir;
pub use xml::parse_intent_xml;

/// Element labels of the IR contract.
pub mod labels {
    pub const INTENT: &str = "Intent";
    pub const SELECT_ATTRIBUTE: &str = "SelectAttribute";
    pub const RESOURCE_DRILL: &str = "ResourceDrill";
    pub const X_RESOURCE: &str = "XResource";
    pub const JOIN_FILTER: &str = "JoinFilter";
    pub const PARAMETERS: &str = "parameters";
    pub const INTENT_PARAMETER: &str = "IntentParameter";
    pub const SORT_BY: &str = "sortBy";
    pub const GROUP_BY: &str = "groupBy";
    pub const VALUE: &str = "value";
}

/// Attribute names of the IR contract.
pub mod attrs {
    pub const NAME: &str = "name";
    pub const RESOURCE: &str = "resource";
    pub const DESCRIPTION: &str = "description";
    pub const ROOT_ALIAS: &str = "rootAlias";
    pub const PAGINATED: &str = "paginated";
    pub const LIMIT: &str = "limit";
    pub const WHERE: &str = "where";
    pub const FIELD: &str = "field";
    pub const ALIAS: &str = "alias";
    pub const ALIAS_AS: &str = "aliasAs";
    pub const ON: &str = "on";
    pub const AUTO_CHAIN: &str = "autoChain";
    pub const PARAM: &str = "param";
    pub const BINDING: &str = "binding";
    pub const TYPE: &str = "type";
    pub const SOURCE: &str = "source";
    pub const DEFAULT_VALUE: &str = "defaultValue";
}

/// One node of the labeled IR tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrNode {
    pub label: String,
    pub attrs: BTreeMap<String, String>,
    /// Text content, used only by `value` elements.
    pub text: Option<String>,
    pub children: Vec<IrNode>,
}

impl IrNode {
    pub fn new(label: impl Into<String>) -> Self {
        IrNode {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: IrNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// First child with the given label.
    pub fn child(&self, label: &str) -> Option<&IrNode> {
        self.children.iter().find(|c| c.label == label)
    }

    /// All children with the given label, in document order.
    pub fn children_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a IrNode> {
        self.children.iter().filter(move |c| c.label == label)
    }
}
