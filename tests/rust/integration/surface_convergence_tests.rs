//! The DSL and XML surfaces must converge on identical models and query
//! text, since both feed the same validator and compiler.

use intentql::{compile_dsl, compile_xml, RelationshipEdge, RelationshipGraph, ResourceRegistry};

fn registry() -> ResourceRegistry {
    ResourceRegistry::new()
        .with_resource("Asset", &["assetId", "tag", "location"])
        .with_resource("Location", &["name"])
}

fn graph() -> RelationshipGraph {
    RelationshipGraph::from_edges([RelationshipEdge::new("Asset", "Location", "location")])
        .unwrap()
}

const DSL: &str = "Create Intent for resource Asset as assetQuery\n\
                   With alias ast\n\
                   Where \"tag='TAG-2'\"\n\
                   Select assetId, tag\n\
                   Include Location as loc\n\
                   \x20   Select name\n\
                   \x20   Add filter for name having like value from parameter locName\n\
                   Parameters\n\
                   \x20   Param locName with datatype string having default value \"%\" from source request\n\
                   Sort by assetId\n";

const XML: &str = r#"
<Intent name="assetQuery" resource="Asset" rootAlias="ast" where="tag='TAG-2'">
    <SelectAttribute field="assetId"/>
    <SelectAttribute field="tag"/>
    <ResourceDrill>
        <XResource name="Location" alias="loc" autoChain="true">
            <SelectAttribute field="name"/>
            <JoinFilter field="name" param="locName" binding="like"/>
        </XResource>
    </ResourceDrill>
    <parameters>
        <IntentParameter name="locName" type="string" source="request" defaultValue="%"/>
    </parameters>
    <sortBy><value>assetId</value></sortBy>
</Intent>
"#;

#[test]
fn test_both_surfaces_produce_the_same_model_and_queries() {
    let (dsl_model, dsl_query) = compile_dsl(DSL, &registry(), &graph()).unwrap();
    let (xml_model, xml_query) = compile_xml(XML, &registry(), &graph()).unwrap();

    assert_eq!(dsl_model, xml_model);
    assert_eq!(dsl_query.data_query, xml_query.data_query);
    assert_eq!(dsl_query.count_query, xml_query.count_query);
}

#[test]
fn test_xml_schema_violation_is_rejected_before_compilation() {
    let err = compile_xml(
        r#"<Intent name="q" resource="Asset"><JoinFilter field="x" param="p"/></Intent>"#,
        &registry(),
        &graph(),
    )
    .unwrap_err();
    assert!(matches!(err, intentql::CompileError::Schema(_)));
}

#[test]
fn test_malformed_xml_is_rejected() {
    let err = compile_xml("<Intent name='q'", &registry(), &graph()).unwrap_err();
    assert!(matches!(err, intentql::CompileError::Schema(_)));
}
