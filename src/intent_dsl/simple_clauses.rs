//! Single-line body clauses: `Description`, `With alias`, `Where`,
//! `Paginated`, `Limit`.

use nom::{character::complete::multispace1, IResult, Parser};

use super::common::{boolean, identifier, integer, keyword, quoted_string};

/// `Description "<text>"`
pub fn parse_description(input: &str) -> IResult<&str, &str> {
    let (input, _) = keyword("Description")(input)?;
    let (input, _) = multispace1.parse(input)?;
    quoted_string(input)
}

/// `With alias <id>`
pub fn parse_alias(input: &str) -> IResult<&str, &str> {
    let (input, _) = keyword("With")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("alias")(input)?;
    let (input, _) = multispace1.parse(input)?;
    identifier(input)
}

/// `Where "<predicate text>"` — the text is carried verbatim; the compiler
/// rewrites field references later.
pub fn parse_where(input: &str) -> IResult<&str, &str> {
    let (input, _) = keyword("Where")(input)?;
    let (input, _) = multispace1.parse(input)?;
    quoted_string(input)
}

/// `Paginated <true|false>`
pub fn parse_paginated(input: &str) -> IResult<&str, bool> {
    let (input, _) = keyword("Paginated")(input)?;
    let (input, _) = multispace1.parse(input)?;
    boolean(input)
}

/// `Limit <int>`
pub fn parse_limit(input: &str) -> IResult<&str, u64> {
    let (input, _) = keyword("Limit")(input)?;
    let (input, _) = multispace1.parse(input)?;
    integer(input)
}
