use nom::{character::complete::multispace1, combinator::opt, IResult, Parser};

use super::common::{identifier, keyword};

/// `Include <Resource> [as <alias>]` — opens a nested join block; the block
/// body is assembled by indentation in the module root.
pub fn parse_include_clause(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = keyword("Include")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, resource) = identifier(input)?;
    let (input, alias) = opt(parse_alias).parse(input)?;
    Ok((input, (resource, alias)))
}

fn parse_alias(input: &str) -> IResult<&str, &str> {
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("as")(input)?;
    let (input, _) = multispace1.parse(input)?;
    identifier(input)
}
