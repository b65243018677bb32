//! Unit tests - edge cases and error handling for the individual
//! pipeline stages, exercised through the public API.

mod binding_grid_tests;
mod dsl_robustness_tests;
mod schema_contract_tests;
