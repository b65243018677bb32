use nom::{character::complete::multispace1, IResult, Parser};

use super::ast::FilterDecl;
use super::common::{identifier, keyword};

/// `Add filter for <field> having <binding> value from parameter <name>`
///
/// The binding word is carried verbatim; the compiler parses it into a
/// `BindingKind` and rejects unknown words as configuration errors.
pub fn parse_filter_clause(input: &str) -> IResult<&str, FilterDecl> {
    let (input, _) = keyword("Add")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("filter")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("for")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, field) = identifier(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("having")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, binding) = identifier(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("value")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("from")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("parameter")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, param) = identifier(input)?;
    Ok((
        input,
        FilterDecl {
            field: field.to_string(),
            binding: binding.to_string(),
            param: param.to_string(),
        },
    ))
}
