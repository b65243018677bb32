use thiserror::Error;

use crate::intent_compiler::IntentConfigError;
use crate::intent_dsl::DslParseError;
use crate::intent_ir::IrSchemaError;
use crate::query_generator::QueryGeneratorError;

/// Any failure across the compile-then-transform pipeline. All variants
/// are fatal to the call that raised them; the caller decides how to
/// surface them (typically as a client-facing bad request).
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] DslParseError),
    #[error(transparent)]
    Schema(#[from] IrSchemaError),
    #[error(transparent)]
    Configuration(#[from] IntentConfigError),
    #[error(transparent)]
    QueryGeneration(#[from] QueryGeneratorError),
}
