use nom::{character::complete::multispace1, combinator::opt, IResult, Parser};

use super::ast::ParamDecl;
use super::common::{identifier, keyword, quoted_string, type_token};

/// The `Parameters` block opener (the `Param` lines below it are assembled
/// by indentation in the module root).
pub fn parse_parameters_open(input: &str) -> IResult<&str, ()> {
    let (input, _) = keyword("Parameters")(input)?;
    Ok((input, ()))
}

/// `Param <name> with datatype <type> [having default value "<text>"]
///  from source <static|request|user_context|security_profile> [using <binding>]`
pub fn parse_param_clause(input: &str) -> IResult<&str, ParamDecl> {
    let (input, _) = keyword("Param")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, name) = identifier(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("with")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("datatype")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, datatype) = type_token(input)?;
    let (input, default_value) = opt(parse_default_value).parse(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("from")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("source")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, source) = identifier(input)?;
    let (input, binding) = opt(parse_binding_override).parse(input)?;
    Ok((
        input,
        ParamDecl {
            name: name.to_string(),
            datatype: datatype.to_string(),
            default_value: default_value.map(str::to_string),
            source: source.to_string(),
            binding: binding.map(str::to_string),
        },
    ))
}

fn parse_default_value(input: &str) -> IResult<&str, &str> {
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("having")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("default")(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("value")(input)?;
    let (input, _) = multispace1.parse(input)?;
    quoted_string(input)
}

fn parse_binding_override(input: &str) -> IResult<&str, &str> {
    let (input, _) = multispace1.parse(input)?;
    let (input, _) = keyword("using")(input)?;
    let (input, _) = multispace1.parse(input)?;
    identifier(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_full_form() {
        let (rest, param) = parse_param_clause(
            "Param locName with datatype string having default value \"City 1\" from source request using like",
        )
        .unwrap();
        assert_eq!(rest, "");
        assert_eq!(param.name, "locName");
        assert_eq!(param.datatype, "string");
        assert_eq!(param.default_value.as_deref(), Some("City 1"));
        assert_eq!(param.source, "request");
        assert_eq!(param.binding.as_deref(), Some("like"));
    }

    #[test]
    fn test_param_minimal_form() {
        let (_, param) =
            parse_param_clause("Param tenantId with datatype long from source security_profile")
                .unwrap();
        assert_eq!(param.datatype, "long");
        assert_eq!(param.default_value, None);
        assert_eq!(param.source, "security_profile");
        assert_eq!(param.binding, None);
    }

    #[test]
    fn test_param_entity_reference_type() {
        let (_, param) = parse_param_clause(
            "Param city with datatype entity:com.acme.City from source static",
        )
        .unwrap();
        assert_eq!(param.datatype, "entity:com.acme.City");
    }
}
