use nom::{
    character::complete::{char, multispace1},
    multi::separated_list1,
    IResult, Parser,
};

use super::common::{dotted_field, keyword, ws};

/// `Sort by <field>[, <field>]...`
pub fn parse_sort_by(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = keyword("Sort")(input)?;
    parse_by_list(input)
}

/// `Group by <field>[, <field>]...`
pub fn parse_group_by(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = keyword("Group")(input)?;
    parse_by_list(input)
}

fn parse_by_list(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("by")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, fields) = separated_list1(ws(char(',')), dotted_field).parse(input)?;
    Ok((input, fields.into_iter().map(str::to_string).collect()))
}
