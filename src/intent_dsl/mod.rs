//! Grammar front-end for the Intent DSL.
//!
//! The surface is line-oriented: every clause lives on its own line and
//! nesting (`Include`, `Parameters`) is expressed by indentation depth.
//! Each line is parsed with a nom clause parser; malformed lines are
//! collected with their position and reported together as one aggregated
//! [`DslParseError`]. Parsing is a pure function of the input text.

use nom::IResult;

pub mod ast;
pub mod common;
pub mod errors;
mod filter_clause;
mod header;
mod include_clause;
mod parameters_clause;
mod select_clause;
mod simple_clauses;
mod sort_group_clause;

pub use ast::{FilterDecl, IncludeBlock, IntentAst, ParamDecl, SelectItem, Statement};
pub use errors::{DslParseError, SyntaxError};

use ast::Statement as Stmt;

/// One successfully parsed line of the DSL body.
#[derive(Debug, Clone, PartialEq)]
enum LineItem {
    Header { resource: String, name: String },
    Description(String),
    Alias(String),
    Where(String),
    Paginated(bool),
    Limit(u64),
    Select(Vec<SelectItem>),
    Include { resource: String, alias: Option<String> },
    AddFilter(FilterDecl),
    ParametersOpen,
    Param(ParamDecl),
    SortBy(Vec<String>),
    GroupBy(Vec<String>),
}

#[derive(Debug, Clone)]
struct Line {
    number: usize,
    indent: usize,
    item: LineItem,
}

/// Parse a complete Intent definition.
///
/// Returns the parse tree, or every syntax error found in the input.
pub fn parse_intent_dsl(input: &str) -> Result<IntentAst, DslParseError> {
    let mut errors: Vec<SyntaxError> = Vec::new();

    // Blank lines carry no meaning; indentation is the count of leading
    // whitespace characters.
    let raw_lines: Vec<(usize, usize, &str)> = input
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let trimmed_end = raw.trim_end();
            let content = trimmed_end.trim_start();
            if content.is_empty() {
                None
            } else {
                let indent = trimmed_end.len() - content.len();
                Some((idx + 1, indent, content))
            }
        })
        .collect();

    let Some(&(first_number, first_indent, first_content)) = raw_lines.first() else {
        return Err(DslParseError::single(1, 1, "empty intent definition"));
    };

    let header = match run_line_parser(
        first_content,
        header::parse_header,
        "Create Intent header",
    ) {
        Ok((resource, name)) => Some((resource.to_string(), name.to_string())),
        Err((offset, message)) => {
            errors.push(SyntaxError {
                line: first_number,
                column: first_indent + offset + 1,
                message,
            });
            None
        }
    };

    let mut lines: Vec<Line> = Vec::new();
    for &(number, indent, content) in raw_lines.iter().skip(1) {
        match parse_line_item(content) {
            Ok(item) => lines.push(Line { number, indent, item }),
            Err((offset, message)) => errors.push(SyntaxError {
                line: number,
                column: indent + offset + 1,
                message,
            }),
        }
    }

    let mut pos = 0usize;
    let statements = collect_block(&lines, &mut pos, 0, &mut errors);

    if !errors.is_empty() {
        return Err(DslParseError { errors });
    }
    // Header is present whenever no error was recorded for line one.
    let (resource, name) = header.expect("header parsed without recorded error");
    Ok(IntentAst {
        resource,
        name,
        statements,
    })
}

/// Recursively assemble statements at or below `min_indent`. `Include`
/// bodies are the following lines indented deeper than the opener.
fn collect_block(
    lines: &[Line],
    pos: &mut usize,
    min_indent: usize,
    errors: &mut Vec<SyntaxError>,
) -> Vec<Stmt> {
    let mut statements = Vec::new();
    while *pos < lines.len() {
        let line = lines[*pos].clone();
        if line.indent < min_indent {
            break;
        }
        *pos += 1;
        match line.item {
            LineItem::Header { .. } => errors.push(SyntaxError {
                line: line.number,
                column: line.indent + 1,
                message: "unexpected intent header inside the body".to_string(),
            }),
            LineItem::Description(text) => statements.push(Stmt::Description(text)),
            LineItem::Alias(alias) => statements.push(Stmt::Alias(alias)),
            LineItem::Where(text) => statements.push(Stmt::Where(text)),
            LineItem::Paginated(flag) => statements.push(Stmt::Paginated(flag)),
            LineItem::Limit(limit) => statements.push(Stmt::Limit(limit)),
            LineItem::Select(items) => statements.push(Stmt::Select(items)),
            LineItem::AddFilter(filter) => statements.push(Stmt::AddFilter(filter)),
            LineItem::Param(param) => statements.push(Stmt::Param(param)),
            LineItem::SortBy(fields) => statements.push(Stmt::SortBy(fields)),
            LineItem::GroupBy(fields) => statements.push(Stmt::GroupBy(fields)),
            LineItem::Include { resource, alias } => {
                let body = collect_block(lines, pos, line.indent + 1, errors);
                statements.push(Stmt::Include(IncludeBlock {
                    resource,
                    alias,
                    statements: body,
                }));
            }
            LineItem::ParametersOpen => {
                let mut params = Vec::new();
                while *pos < lines.len() && lines[*pos].indent > line.indent {
                    let inner = lines[*pos].clone();
                    *pos += 1;
                    match inner.item {
                        LineItem::Param(param) => params.push(param),
                        _ => errors.push(SyntaxError {
                            line: inner.number,
                            column: inner.indent + 1,
                            message: "only Param lines are allowed inside a Parameters block"
                                .to_string(),
                        }),
                    }
                }
                statements.push(Stmt::Parameters(params));
            }
        }
    }
    statements
}

/// Dispatch one body line to its clause parser, keyed by the first word.
fn parse_line_item(content: &str) -> Result<LineItem, (usize, String)> {
    let first_word = content
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match first_word.as_str() {
        "create" => {
            let (resource, name) =
                run_line_parser(content, header::parse_header, "Create Intent header")?;
            Ok(LineItem::Header {
                resource: resource.to_string(),
                name: name.to_string(),
            })
        }
        "description" => {
            let text = run_line_parser(content, simple_clauses::parse_description, "Description")?;
            Ok(LineItem::Description(text.to_string()))
        }
        "with" => {
            let alias = run_line_parser(content, simple_clauses::parse_alias, "With alias")?;
            Ok(LineItem::Alias(alias.to_string()))
        }
        "where" => {
            let text = run_line_parser(content, simple_clauses::parse_where, "Where")?;
            Ok(LineItem::Where(text.to_string()))
        }
        "paginated" => {
            let flag = run_line_parser(content, simple_clauses::parse_paginated, "Paginated")?;
            Ok(LineItem::Paginated(flag))
        }
        "limit" => {
            let limit = run_line_parser(content, simple_clauses::parse_limit, "Limit")?;
            Ok(LineItem::Limit(limit))
        }
        "select" => {
            let items = run_line_parser(content, select_clause::parse_select_clause, "Select")?;
            Ok(LineItem::Select(items))
        }
        "include" => {
            let (resource, alias) =
                run_line_parser(content, include_clause::parse_include_clause, "Include")?;
            Ok(LineItem::Include {
                resource: resource.to_string(),
                alias: alias.map(str::to_string),
            })
        }
        "add" => {
            let filter = run_line_parser(content, filter_clause::parse_filter_clause, "Add filter")?;
            Ok(LineItem::AddFilter(filter))
        }
        "parameters" => {
            run_line_parser(content, parameters_clause::parse_parameters_open, "Parameters")?;
            Ok(LineItem::ParametersOpen)
        }
        "param" => {
            let param = run_line_parser(content, parameters_clause::parse_param_clause, "Param")?;
            Ok(LineItem::Param(param))
        }
        "sort" => {
            let fields = run_line_parser(content, sort_group_clause::parse_sort_by, "Sort by")?;
            Ok(LineItem::SortBy(fields))
        }
        "group" => {
            let fields = run_line_parser(content, sort_group_clause::parse_group_by, "Group by")?;
            Ok(LineItem::GroupBy(fields))
        }
        _ => Err((0, format!("unrecognized statement `{}`", first_word))),
    }
}

/// Run a clause parser over a whole line, requiring full consumption.
/// On failure, reports the 0-based offset of the unparseable input.
fn run_line_parser<'a, O, P>(
    content: &'a str,
    mut parser: P,
    clause: &str,
) -> Result<O, (usize, String)>
where
    P: FnMut(&'a str) -> IResult<&'a str, O>,
{
    match parser(content) {
        Ok((rest, value)) => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                Ok(value)
            } else {
                Err((
                    content.len() - rest.len(),
                    format!("unexpected trailing input in {} clause", clause),
                ))
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err((
            content.len() - e.input.len(),
            format!("malformed {} clause", clause),
        )),
        Err(nom::Err::Incomplete(_)) => {
            Err((content.len(), format!("incomplete {} clause", clause)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_INTENT: &str = r#"Create Intent for resource Asset as assetQuery
    Description "Assets with their location"
    With alias ast
    Where "tag='TAG-2'"
    Paginated true
    Limit 100
    Select assetId, tag as assetTag
    Include Location as loc
        Select name
        Add filter for name having like value from parameter locName
        Include City as ct
            Select name as cityName
    Parameters
        Param locName with datatype string having default value "%" from source request using like
    Sort by assetId
    Group by tag
"#;

    #[test]
    fn test_parse_full_intent() {
        let ast = parse_intent_dsl(FULL_INTENT).expect("intent should parse");
        assert_eq!(ast.resource, "Asset");
        assert_eq!(ast.name, "assetQuery");

        let mut includes = 0;
        let mut params = 0;
        for stmt in &ast.statements {
            match stmt {
                Statement::Include(block) => {
                    includes += 1;
                    assert_eq!(block.resource, "Location");
                    assert_eq!(block.alias.as_deref(), Some("loc"));
                    // nested include lives inside the Location block
                    assert!(block
                        .statements
                        .iter()
                        .any(|s| matches!(s, Statement::Include(inner) if inner.resource == "City")));
                    assert!(block
                        .statements
                        .iter()
                        .any(|s| matches!(s, Statement::AddFilter(f) if f.param == "locName")));
                }
                Statement::Parameters(list) => {
                    params += 1;
                    assert_eq!(list.len(), 1);
                    assert_eq!(list[0].name, "locName");
                }
                _ => {}
            }
        }
        assert_eq!(includes, 1, "City must nest under Location, not top level");
        assert_eq!(params, 1);
    }

    #[test]
    fn test_parse_minimal_intent() {
        let ast = parse_intent_dsl("Create Intent for resource Asset as q1").unwrap();
        assert_eq!(ast.resource, "Asset");
        assert!(ast.statements.is_empty());
    }

    #[test]
    fn test_errors_are_aggregated_with_positions() {
        let input = "Create Intent for resource Asset as q1\n\
                     Paginated maybe\n\
                     Limit lots\n";
        let err = parse_intent_dsl(input).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].line, 2);
        assert_eq!(err.errors[1].line, 3);
        assert!(err.errors[0].column > 1);
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let err = parse_intent_dsl("Select assetId\n").unwrap_err();
        assert_eq!(err.errors[0].line, 1);
    }

    #[test]
    fn test_param_outside_parameters_block_is_kept_for_validation() {
        let input = "Create Intent for resource Asset as q1\n\
                     Param p with datatype string from source request\n";
        let ast = parse_intent_dsl(input).unwrap();
        assert!(matches!(ast.statements[0], Statement::Param(_)));
    }

    #[test]
    fn test_non_param_inside_parameters_block() {
        let input = "Create Intent for resource Asset as q1\n\
                     Parameters\n    Select assetId\n";
        let err = parse_intent_dsl(input).unwrap_err();
        assert!(err.errors[0].message.contains("Parameters block"));
    }
}
