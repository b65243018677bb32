use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_until, take_while1},
    character::complete::{alphanumeric1, char, digit1, multispace0},
    combinator::{opt, recognize, value},
    error::{Error, ErrorKind, ParseError},
    multi::many0,
    sequence::{delimited, pair},
    IResult, Parser,
};

pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

/// Case-insensitive keyword with a word boundary, so `Selection` never
/// matches the keyword `Select`.
pub fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| {
        let (rest, matched) = tag_no_case::<_, _, Error<&str>>(kw).parse(input)?;
        match rest.chars().next() {
            Some(c) if c.is_alphanumeric() || c == '_' => {
                Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)))
            }
            _ => Ok((rest, matched)),
        }
    }
}

// one or more alphanumerics followed by zero or more underscore-separated
// alphanumeric runs, e.g. "assetId", "tag", "asset_tag_2".
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(alphanumeric1, many0(pair(underscore1, alphanumeric1)))).parse(input)
}

fn underscore1(input: &str) -> IResult<&str, &str> {
    take_while1(|c| c == '_')(input)
}

/// Field reference with at most one dot: `tag` or `City.name`.
pub fn dotted_field(input: &str) -> IResult<&str, &str> {
    recognize(pair(identifier, opt(pair(tag("."), identifier)))).parse(input)
}

/// Datatype token: a plain type name or the entity-reference pseudo-type
/// `entity:com.acme.City`.
pub fn type_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '.' || c == ':')(input)
}

/// Double-quoted free text. Inner single quotes are untouched, so
/// `"tag='TAG-2'"` round-trips.
pub fn quoted_string(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_until("\""), char('"')).parse(input)
}

pub fn integer(input: &str) -> IResult<&str, u64> {
    let (rest, digits) = digit1(input)?;
    match digits.parse::<u64>() {
        Ok(n) => Ok((rest, n)),
        Err(_) => Err(nom::Err::Error(Error::new(input, ErrorKind::Digit))),
    }
}

pub fn boolean(input: &str) -> IResult<&str, bool> {
    alt((value(true, keyword("true")), value(false, keyword("false")))).parse(input)
}
