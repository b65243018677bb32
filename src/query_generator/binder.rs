//! Execution-time parameter binding.
//!
//! The generator emits `:name` placeholders; the caller supplies the
//! surrounding request, user and security values through an
//! [`ExecutionContext`] and receives the name → value map to hand to the
//! persistence collaborator.

use std::collections::HashMap;

use crate::intent_compiler::{ParameterSource, ParameterSpec};

use super::QueryGeneratorError;

/// Values available at execution time, keyed by parameter source.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    request: HashMap<String, String>,
    user: HashMap<String, String>,
    security: HashMap<String, String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.insert(name.into(), value.into());
        self
    }

    pub fn with_user_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.user.insert(name.into(), value.into());
        self
    }

    pub fn with_security_value(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.security.insert(name.into(), value.into());
        self
    }
}

/// Resolves every declared parameter to a concrete value. Static
/// parameters always use their default (the compiler guarantees one
/// exists); the other sources look up the context map and fall back to
/// the default, failing when neither provides a value.
pub fn bind_parameters(
    parameters: &[ParameterSpec],
    context: &ExecutionContext,
) -> Result<HashMap<String, String>, QueryGeneratorError> {
    let mut bound = HashMap::with_capacity(parameters.len());
    for param in parameters {
        let (lookup, source_name) = match param.source {
            ParameterSource::Static => (None, "static"),
            ParameterSource::Request => (context.request.get(&param.name), "request"),
            ParameterSource::UserContext => (context.user.get(&param.name), "user_context"),
            ParameterSource::SecurityProfile => {
                (context.security.get(&param.name), "security_profile")
            }
        };
        let value = lookup
            .cloned()
            .or_else(|| param.default_value.clone())
            .ok_or_else(|| QueryGeneratorError::MissingBoundParameter {
                name: param.name.clone(),
                param_source: source_name.to_string(),
            })?;
        bound.insert(param.name.clone(), value);
    }
    Ok(bound)
}
