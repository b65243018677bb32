//! End-to-end compilation: DSL text in, query strings and bound
//! parameter values out.

use anyhow::Result;
use intentql::{
    bind_parameters, compile_dsl, CompileError, ExecutionContext, RelationshipEdge,
    RelationshipGraph, ResourceRegistry,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn registry() -> ResourceRegistry {
    ResourceRegistry::new()
        .with_resource("Asset", &["assetId", "tag", "location"])
        .with_resource("Location", &["name", "city"])
        .with_resource("City", &["name", "country"])
}

fn graph() -> RelationshipGraph {
    RelationshipGraph::from_edges([
        RelationshipEdge::new("Asset", "Location", "location"),
        RelationshipEdge::new("Location", "City", "city"),
    ])
    .unwrap()
}

#[test]
fn test_root_intent_end_to_end() {
    init_logging();
    let (model, query) = compile_dsl(
        "Create Intent for resource Asset as assetQuery\n\
         Where \"tag='TAG-2'\"\n\
         Select assetId, tag\n\
         Sort by assetId\n",
        &registry(),
        &graph(),
    )
    .unwrap();

    let alias = &model.root_alias;
    assert_eq!(
        query.data_query,
        format!(
            "SELECT {a}.assetId, {a}.tag FROM Asset {a} WHERE {a}.tag='TAG-2' ORDER BY {a}.assetId",
            a = alias
        )
    );
    assert_eq!(
        query.count_query,
        format!("SELECT count({a}) FROM Asset {a} WHERE {a}.tag='TAG-2'", a = alias)
    );
}

#[test]
fn test_joined_intent_with_filters_and_parameters() {
    let (model, query) = compile_dsl(
        "Create Intent for resource Asset as assetQuery\n\
         Description \"Assets with their location and city\"\n\
         With alias ast\n\
         Paginated true\n\
         Limit 50\n\
         Select assetId, tag as assetTag\n\
         Include Location as loc\n\
         \x20   Select name\n\
         \x20   Add filter for name having like value from parameter locName\n\
         \x20   Include City as ct\n\
         \x20       Select name as cityName\n\
         Where \"tag='TAG-2' AND City.name='City 4'\"\n\
         Parameters\n\
         \x20   Param locName with datatype string having default value \"%\" from source request\n\
         Sort by assetId\n",
        &registry(),
        &graph(),
    )
    .unwrap();

    assert_eq!(model.root_alias, "ast");
    assert!(model.paginated);
    assert_eq!(model.limit, Some(50));
    assert_eq!(model.joins.len(), 2);

    assert_eq!(
        query.data_query,
        "SELECT ast.assetId, ast.tag AS assetTag, loc.name, ct.name AS cityName \
         FROM Asset ast \
         JOIN Location loc ON ast.location = loc AND loc.name LIKE :locName \
         JOIN City ct ON loc.city = ct \
         WHERE ast.tag='TAG-2' AND ct.name='City 4' \
         ORDER BY ast.assetId"
    );
    assert!(!query.count_query.contains("ORDER BY"));
    assert!(query.count_query.starts_with("SELECT count(ast) FROM Asset ast"));
}

#[test]
fn test_parameter_binding_round_trip() -> Result<()> {
    init_logging();
    let (_, query) = compile_dsl(
        "Create Intent for resource Asset as q\n\
         Include Location as loc\n\
         \x20   Add filter for name having like value from parameter locName\n\
         Parameters\n\
         \x20   Param locName with datatype string from source request\n\
         \x20   Param tenant with datatype string from source security_profile\n",
        &registry(),
        &graph(),
    )?;

    let context = ExecutionContext::new()
        .with_request_value("locName", "Ware%")
        .with_security_value("tenant", "acme");
    let bound = bind_parameters(&query.parameters, &context)?;
    assert_eq!(bound["locName"], "Ware%");
    assert_eq!(bound["tenant"], "acme");

    let missing = bind_parameters(&query.parameters, &ExecutionContext::new());
    assert!(missing.is_err());
    Ok(())
}

#[test]
fn test_syntax_errors_surface_as_compile_error() {
    let err = compile_dsl("Create Intent for\n", &registry(), &graph()).unwrap_err();
    assert!(matches!(err, CompileError::Syntax(_)));
}

#[test]
fn test_configuration_errors_surface_as_compile_error() {
    let err = compile_dsl(
        "Create Intent for resource Asset as q\n\
         Select nonexistent\n",
        &registry(),
        &graph(),
    )
    .unwrap_err();
    assert!(matches!(err, CompileError::Configuration(_)));
}

#[test]
fn test_missing_relationship_surfaces_as_compile_error() {
    let err = compile_dsl(
        "Create Intent for resource Asset as q\n\
         Include City as ct\n",
        &registry(),
        &graph(),
    )
    .unwrap_err();
    assert!(matches!(err, CompileError::QueryGeneration(_)));
    assert!(err.to_string().contains("City"));
    assert!(err.to_string().contains("Asset"));
}
