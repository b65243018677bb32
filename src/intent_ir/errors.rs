use thiserror::Error;

/// Structural violations of the IR contract. Raised before any semantic
/// resolution, so configuration errors are never reported against a
/// malformed tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IrSchemaError {
    #[error("Malformed XML in intent definition: {0}")]
    XmlSyntax(String),
    #[error("Root element must be `Intent`, found `{0}`")]
    WrongRoot(String),
    #[error("Unknown element `{element}` under `{parent}`")]
    UnknownElement { element: String, parent: String },
    #[error("Element `{element}` is not allowed under `{parent}`")]
    MisplacedElement { element: String, parent: String },
    #[error("Unknown attribute `{attribute}` on `{element}`")]
    UnknownAttribute { attribute: String, element: String },
    #[error("Missing required attribute `{attribute}` on `{element}`")]
    MissingAttribute { attribute: String, element: String },
    #[error("At most one `{element}` is allowed under `{parent}`, found {count}")]
    DuplicateElement {
        element: String,
        parent: String,
        count: usize,
    },
    #[error("`ResourceDrill` must contain at least one `XResource`")]
    EmptyResourceDrill,
    #[error("`value` element under `{parent}` must carry text content")]
    MissingValueText { parent: String },
    #[error("Invalid value `{value}` for attribute `{attribute}` on `{element}`: expected {expected}")]
    InvalidAttributeValue {
        attribute: String,
        element: String,
        value: String,
        expected: &'static str,
    },
}
