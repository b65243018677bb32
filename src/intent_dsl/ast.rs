//! Parse tree for the Intent DSL.
//!
//! This is the surface-level tree produced by the grammar front-end. It is
//! deliberately dumb: no alias resolution, no metadata checks. The
//! `intent_ir::from_dsl` transform lowers it into the shared IR shape that
//! the XML surface also produces.

/// A parsed `Create Intent for resource <R> as <N>` definition with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentAst {
    pub resource: String,
    pub name: String,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Description(String),
    Alias(String),
    Where(String),
    Paginated(bool),
    Limit(u64),
    Select(Vec<SelectItem>),
    Include(IncludeBlock),
    Parameters(Vec<ParamDecl>),
    /// A `Param` line found outside a `Parameters` block. Kept in the tree
    /// so the IR schema validator reports the misplacement.
    Param(ParamDecl),
    /// An `Add filter` line. Only valid inside an `Include` block; the IR
    /// schema validator rejects top-level occurrences.
    AddFilter(FilterDecl),
    SortBy(Vec<String>),
    GroupBy(Vec<String>),
}

/// One entry of a `Select` list: `field` or `Resource.field`, with an
/// optional output rename (`as <name>`).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub field: String,
    pub alias_as: Option<String>,
}

/// `Include <Resource> [as <alias>]` and its nested body.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeBlock {
    pub resource: String,
    pub alias: Option<String>,
    pub statements: Vec<Statement>,
}

/// `Add filter for <field> having <binding> value from parameter <name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDecl {
    pub field: String,
    pub binding: String,
    pub param: String,
}

/// `Param <name> with datatype <type> [having default value "<text>"]
/// from source <source> [using <binding>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub datatype: String,
    pub default_value: Option<String>,
    pub source: String,
    pub binding: Option<String>,
}
