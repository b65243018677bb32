//! Tests malformed DSL inputs: parsing must never panic and must report
//! every error with its position in one aggregated failure.

use intentql::parse_intent_dsl;

#[test]
fn test_malformed_inputs_no_panic() {
    let malformed = vec![
        "",
        "Create",
        "Create Intent",
        "Create Intent for resource",
        "Create Intent for resource Asset",
        "Create Intent for resource Asset as",
        "Select a, b",
        "Create Intent for resource Asset as q\nInclude",
        "Create Intent for resource Asset as q\nLimit many",
        "Create Intent for resource Asset as q\nParaginated true",
        "Create Intent for resource Asset as q\nAdd filter for x",
        "Create Intent for resource Asset as q\nParameters\n    Param p",
        "Create Intent for resource Asset as q\nSort by",
    ];
    for input in malformed {
        let result = parse_intent_dsl(input);
        assert!(result.is_err(), "expected failure for input: {:?}", input);
    }
}

#[test]
fn test_errors_are_aggregated_with_positions() {
    let err = parse_intent_dsl(
        "Create Intent for resource Asset as q\n\
         Limit many\n\
         Paginated true\n\
         Sort by\n",
    )
    .unwrap_err();
    assert_eq!(err.errors.len(), 2);
    assert_eq!(err.errors[0].line, 2);
    assert_eq!(err.errors[1].line, 4);
}

#[test]
fn test_missing_header_is_reported_on_first_line() {
    let err = parse_intent_dsl("Select a\n").unwrap_err();
    assert_eq!(err.errors[0].line, 1);
}

#[test]
fn test_valid_input_with_blank_lines_and_case_insensitive_keywords() {
    let ast = parse_intent_dsl(
        "create intent for resource Asset as q\n\
         \n\
         select assetId\n\
         \n\
         limit 25\n",
    )
    .unwrap();
    assert_eq!(ast.resource, "Asset");
    assert_eq!(ast.statements.len(), 2);
}
