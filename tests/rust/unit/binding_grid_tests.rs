//! Verifies the mapping from binding words to generated filter
//! predicates.

use intentql::{compile_dsl, RelationshipEdge, RelationshipGraph, ResourceRegistry};
use test_case::test_case;

fn setup() -> (ResourceRegistry, RelationshipGraph) {
    let registry = ResourceRegistry::new()
        .with_resource("Asset", &["assetId", "location"])
        .with_resource("Location", &["name"]);
    let graph =
        RelationshipGraph::from_edges([RelationshipEdge::new("Asset", "Location", "location")])
            .unwrap();
    (registry, graph)
}

#[test_case("equals", "="; "equals maps to equality")]
#[test_case("like", "LIKE"; "like maps to pattern match")]
#[test_case("in", "IN"; "in maps to set membership")]
#[test_case("greater_than", ">"; "greater_than maps to greater")]
#[test_case("less_than", "<"; "less_than maps to less")]
fn test_binding_word_operator(word: &str, operator: &str) {
    let (registry, graph) = setup();
    let dsl = format!(
        "Create Intent for resource Asset as q\n\
         With alias ast\n\
         Include Location as loc\n\
         \x20   Add filter for name having {} value from parameter p\n",
        word
    );
    let (_, query) = compile_dsl(&dsl, &registry, &graph).unwrap();
    let expected = format!("loc.name {} :p", operator);
    assert!(
        query.data_query.contains(&expected),
        "query `{}` does not contain `{}`",
        query.data_query,
        expected
    );
}
