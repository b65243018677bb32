//! Structural contract tests driven through the XML surface, which is
//! the only entry point that can produce arbitrary tree shapes.

use intentql::intent_ir::{parse_intent_xml, validate_ir, IrSchemaError};

fn validate(xml: &str) -> Result<(), IrSchemaError> {
    validate_ir(&parse_intent_xml(xml)?)
}

#[test]
fn test_minimal_intent_passes() {
    assert!(validate(r#"<Intent name="q" resource="Asset"/>"#).is_ok());
}

#[test]
fn test_wrong_root_element() {
    let err = validate(r#"<Query name="q" resource="Asset"/>"#).unwrap_err();
    assert_eq!(err, IrSchemaError::WrongRoot("Query".to_string()));
}

#[test]
fn test_unknown_attribute_rejected() {
    let err = validate(r#"<Intent name="q" resource="Asset" color="red"/>"#).unwrap_err();
    assert!(matches!(err, IrSchemaError::UnknownAttribute { ref attribute, .. }
        if attribute == "color"));
}

#[test]
fn test_x_resource_outside_drill_rejected() {
    let err = validate(
        r#"<Intent name="q" resource="Asset"><XResource name="Location"/></Intent>"#,
    )
    .unwrap_err();
    assert!(matches!(err, IrSchemaError::MisplacedElement { ref element, .. }
        if element == "XResource"));
}

#[test]
fn test_parameter_requires_type_and_source() {
    let err = validate(
        r#"<Intent name="q" resource="Asset">
             <parameters><IntentParameter name="p" type="string"/></parameters>
           </Intent>"#,
    )
    .unwrap_err();
    assert!(matches!(err, IrSchemaError::MissingAttribute { ref attribute, .. }
        if attribute == "source"));
}

#[test]
fn test_limit_must_be_numeric() {
    let err = validate(r#"<Intent name="q" resource="Asset" limit="lots"/>"#).unwrap_err();
    assert!(matches!(err, IrSchemaError::InvalidAttributeValue { .. }));
}

#[test]
fn test_nested_drill_shape_passes() {
    assert!(validate(
        r#"<Intent name="q" resource="Asset">
             <SelectAttribute field="assetId"/>
             <ResourceDrill>
               <XResource name="Location" alias="loc">
                 <JoinFilter field="name" param="p" binding="like"/>
                 <XResource name="City" alias="ct"/>
               </XResource>
             </ResourceDrill>
             <sortBy><value>assetId</value></sortBy>
           </Intent>"#,
    )
    .is_ok());
}
