use nom::{
    character::complete::{char, multispace1},
    combinator::opt,
    multi::separated_list1,
    IResult, Parser,
};

use super::ast::SelectItem;
use super::common::{dotted_field, identifier, keyword, ws};

/// `Select <field>[ as <rename>][, <field>[ as <rename>]]...`
///
/// Fields may be plain (`tag`), dotted (`City.name`), and each entry may
/// carry its own output rename.
pub fn parse_select_clause(input: &str) -> IResult<&str, Vec<SelectItem>> {
    let (input, _) = keyword("Select")(input)?;
    let (input, _) = multispace1.parse(input)?;
    separated_list1(ws(char(',')), parse_select_item).parse(input)
}

fn parse_select_item(input: &str) -> IResult<&str, SelectItem> {
    let (input, field) = dotted_field(input)?;
    let (input, alias_as) = opt(parse_rename).parse(input)?;
    Ok((
        input,
        SelectItem {
            field: field.to_string(),
            alias_as: alias_as.map(str::to_string),
        },
    ))
}

fn parse_rename(input: &str) -> IResult<&str, &str> {
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("as")(input)?;
    let (input, _) = multispace1.parse(input)?;
    identifier(input)
}
