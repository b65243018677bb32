//! Where-clause rewriting.
//!
//! The clause text is tokenized into identifiers, quoted literals,
//! comparison operators and raw text, then every identifier standing in
//! comparison position is rewritten to alias-qualified form. Literals and
//! operators pass through untouched, so operator-like substrings inside
//! string literals never trigger a rewrite.

use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while},
    character::complete::{alphanumeric1, char, digit1},
    combinator::{map, opt, recognize},
    multi::many1,
    sequence::{delimited, pair},
    IResult, Parser,
};

use super::errors::IntentConfigError;
use crate::resource_graph::ResourceMetadata;

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    /// `identifier` or `identifier.identifier`.
    Identifier(&'a str),
    /// Quoted string, kept verbatim including its quotes.
    Literal(&'a str),
    Operator(&'a str),
    /// Whitespace, punctuation, numbers; passed through unchanged.
    Text(&'a str),
}

impl<'a> Token<'a> {
    fn source(&self) -> &'a str {
        match self {
            Token::Identifier(s) | Token::Literal(s) | Token::Operator(s) | Token::Text(s) => s,
        }
    }
}

fn string_literal(input: &str) -> IResult<&str, &str> {
    recognize(alt((
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
    )))
    .parse(input)
}

fn operator(input: &str) -> IResult<&str, &str> {
    alt((
        tag("<="),
        tag(">="),
        tag("!="),
        tag("<>"),
        tag("="),
        tag("<"),
        tag(">"),
    ))
    .parse(input)
}

// Tried before identifiers, so a numeric operand is never mistaken for a
// field reference.
fn number(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, opt(pair(char('.'), digit1)))).parse(input)
}

fn bare_identifier(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((alphanumeric1, tag("_"))))).parse(input)
}

fn dotted_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        bare_identifier,
        opt(pair(char('.'), bare_identifier)),
    ))
    .parse(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        map(string_literal, Token::Literal),
        map(operator, Token::Operator),
        map(number, Token::Text),
        map(dotted_identifier, Token::Identifier),
        map(take(1usize), Token::Text),
    ))
    .parse(input)
}

fn tokenize(mut input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    while !input.is_empty() {
        match token(input) {
            Ok((rest, tok)) => {
                tokens.push(tok);
                input = rest;
            }
            // take(1) always succeeds on non-empty input.
            Err(_) => break,
        }
    }
    tokens
}

/// Words that can legally precede an operand but are never field names.
fn is_reserved_word(word: &str) -> bool {
    matches!(
        word.to_ascii_uppercase().as_str(),
        "AND" | "OR" | "NOT" | "LIKE" | "IN" | "IS" | "NULL" | "BETWEEN" | "TRUE" | "FALSE"
    )
}

/// True when the identifier at `index` stands on the left of a comparison.
fn in_comparison_position(tokens: &[Token<'_>], index: usize) -> bool {
    for tok in &tokens[index + 1..] {
        match tok {
            Token::Text(s) if s.trim().is_empty() => continue,
            Token::Operator(_) => return true,
            Token::Identifier(word) => {
                return matches!(word.to_ascii_uppercase().as_str(), "LIKE" | "IN" | "NOT")
            }
            _ => return false,
        }
    }
    false
}

/// Rewrites every field reference in `input` to alias-qualified form.
///
/// Undotted identifiers must be fields of the root resource and resolve to
/// the root alias. Dotted identifiers must name an aliased resource on the
/// left and resolve to that resource's alias.
pub fn rewrite_where(
    input: &str,
    root_resource: &str,
    root_alias: &str,
    alias_map: &HashMap<String, String>,
    metadata: &dyn ResourceMetadata,
) -> Result<String, IntentConfigError> {
    let tokens = tokenize(input);
    let mut output = String::with_capacity(input.len() + 16);

    for (index, tok) in tokens.iter().enumerate() {
        match tok {
            Token::Identifier(ident)
                if !is_reserved_word(ident) && in_comparison_position(&tokens, index) =>
            {
                match ident.split_once('.') {
                    None => {
                        if !metadata.has_field(root_resource, ident) {
                            return Err(IntentConfigError::UnknownField {
                                resource: root_resource.to_string(),
                                field: ident.to_string(),
                            });
                        }
                        output.push_str(root_alias);
                        output.push('.');
                        output.push_str(ident);
                    }
                    Some((prefix, field)) => {
                        let alias = alias_map.get(prefix).ok_or_else(|| {
                            IntentConfigError::UnknownResourcePrefix {
                                prefix: prefix.to_string(),
                                reference: ident.to_string(),
                            }
                        })?;
                        output.push_str(alias);
                        output.push('.');
                        output.push_str(field);
                    }
                }
            }
            other => output.push_str(other.source()),
        }
    }
    Ok(output)
}
