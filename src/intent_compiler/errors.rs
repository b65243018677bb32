use thiserror::Error;

/// Semantic violations found while compiling a structurally valid IR tree
/// into an [`IntentModel`](super::IntentModel). All are fatal; compilation
/// aborts on the first one and no partial model is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntentConfigError {
    #[error("Unknown resource `{0}`")]
    UnknownResource(String),
    #[error("Field `{field}` does not exist on resource `{resource}`")]
    UnknownField { resource: String, field: String },
    #[error("Field `{field}` does not exist on the root resource or any joined resource")]
    UnresolvedField { field: String },
    #[error("Alias `{alias}` in select attribute does not name any resource in intent `{intent}`")]
    UnknownSelectAlias { alias: String, intent: String },
    #[error("Resource `{prefix}` in `{reference}` is not joined in this intent")]
    UnknownResourcePrefix { prefix: String, reference: String },
    #[error(
        "Resource `{resource}` is joined more than once in intent `{intent}`; \
         every repeated join must carry an explicit alias"
    )]
    DuplicateResourceNeedsAlias { resource: String, intent: String },
    #[error("Alias `{alias}` is bound more than once in intent `{intent}`")]
    DuplicateAlias { alias: String, intent: String },
    #[error("Unknown binding kind `{0}`")]
    UnknownBinding(String),
    #[error("Unknown parameter source `{0}`")]
    UnknownParameterSource(String),
    #[error("Unknown parameter type `{0}`")]
    UnknownParameterType(String),
    #[error("Parameter `{0}` has source `static` but no default value")]
    StaticParameterNeedsDefault(String),
}
