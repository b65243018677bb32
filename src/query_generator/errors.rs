use thiserror::Error;

/// Failures while lowering an [`IntentModel`](crate::intent_compiler::IntentModel)
/// into query text or binding its parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryGeneratorError {
    #[error(
        "No relationship exists between `{from}` and `{to}`; \
         declare one or give the join an explicit `on` predicate"
    )]
    MissingRelationship { from: String, to: String },
    // `param_source` rather than `source`: thiserror reserves that field
    // name for the error cause.
    #[error("No bound value for parameter `{name}` from source `{param_source}`")]
    MissingBoundParameter { name: String, param_source: String },
}
