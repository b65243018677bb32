use std::fmt;
use thiserror::Error;

/// A single malformed line in the DSL input, with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based line number in the original input.
    pub line: usize,
    /// 1-based column of the first unparseable character.
    pub column: usize,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

/// Aggregated parse failure. The parser never recovers into a partial
/// compilation: every bad line is collected and reported at once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct DslParseError {
    pub errors: Vec<SyntaxError>,
}

impl fmt::Display for DslParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} syntax error(s) in intent definition:", self.errors.len())?;
        for err in &self.errors {
            writeln!(f, "  {}", err)?;
        }
        Ok(())
    }
}

impl DslParseError {
    pub fn single(line: usize, column: usize, message: impl Into<String>) -> Self {
        DslParseError {
            errors: vec![SyntaxError {
                line,
                column,
                message: message.into(),
            }],
        }
    }
}
