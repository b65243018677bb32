//! IntentQL - a query-intent compiler
//!
//! This crate compiles declarative query intents into executable query
//! text through:
//! - A textual DSL and an equivalent XML surface
//! - A shared intermediate representation with structural validation
//! - Semantic compilation into a validated Intent model
//! - Query generation over a bidirectional resource relationship graph

pub mod errors;
pub mod intent_compiler;
pub mod intent_dsl;
pub mod intent_ir;
pub mod query_generator;
pub mod resource_graph;

pub use errors::CompileError;
pub use intent_compiler::{compile_intent, IntentModel};
pub use intent_dsl::parse_intent_dsl;
pub use intent_ir::{intent_ast_to_ir, parse_intent_xml, validate_ir, IrNode};
pub use query_generator::{bind_parameters, generate_queries, ExecutionContext, GeneratedQuery};
pub use resource_graph::{
    RelationshipEdge, RelationshipGraph, ResourceMetadata, ResourceRegistry,
};

use log::debug;

/// Full pipeline for the DSL surface: parse, lower to IR, validate,
/// compile and generate query text.
pub fn compile_dsl(
    input: &str,
    metadata: &dyn ResourceMetadata,
    graph: &RelationshipGraph,
) -> Result<(IntentModel, GeneratedQuery), CompileError> {
    let ast = parse_intent_dsl(input)?;
    let ir = intent_ast_to_ir(&ast);
    compile_ir(&ir, metadata, graph)
}

/// Full pipeline for the XML surface. Joins the DSL pipeline at the
/// schema validator, so both surfaces share one compiler.
pub fn compile_xml(
    input: &str,
    metadata: &dyn ResourceMetadata,
    graph: &RelationshipGraph,
) -> Result<(IntentModel, GeneratedQuery), CompileError> {
    let ir = parse_intent_xml(input)?;
    compile_ir(&ir, metadata, graph)
}

fn compile_ir(
    ir: &IrNode,
    metadata: &dyn ResourceMetadata,
    graph: &RelationshipGraph,
) -> Result<(IntentModel, GeneratedQuery), CompileError> {
    validate_ir(ir)?;
    let model = compile_intent(ir, metadata)?;
    debug!(
        "compiled intent `{}`: {} select(s), {} join(s), {} parameter(s)",
        model.name,
        model.selects.len(),
        model.joins.len(),
        model.parameters.len()
    );
    let query = generate_queries(&model, graph)?;
    Ok((model, query))
}
