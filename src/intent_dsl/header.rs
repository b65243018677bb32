use nom::{character::complete::multispace1, IResult, Parser};

use super::common::{identifier, keyword};

/// `Create Intent for resource <Resource> as <IntentName>`
pub fn parse_header(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = keyword("Create")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("Intent")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("for")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("resource")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, resource) = identifier(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("as")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, name) = identifier(input)?;
    Ok((input, (resource, name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Create Intent for resource Asset as assetQuery"),
            Ok(("", ("Asset", "assetQuery")))
        );
    }

    #[test]
    fn test_parse_header_case_insensitive() {
        assert_eq!(
            parse_header("create intent FOR Resource Asset AS q1"),
            Ok(("", ("Asset", "q1")))
        );
    }

    #[test]
    fn test_parse_header_missing_alias() {
        assert!(parse_header("Create Intent for resource Asset").is_err());
    }
}
