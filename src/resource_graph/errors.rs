use thiserror::Error;

/// Failures while loading resource metadata or relationship definitions.
#[derive(Debug, Error)]
pub enum ResourceGraphError {
    #[error("Failed to read metadata file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse metadata YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    // `from`/`to` rather than source/target: thiserror reserves a field
    // named `source` for the error cause.
    #[error("Relationship declared twice between `{from}` and `{to}`")]
    DuplicateRelationship { from: String, to: String },
    #[error("Composite relationship between `{from}` and `{to}` has no components")]
    EmptyComposite { from: String, to: String },
}
