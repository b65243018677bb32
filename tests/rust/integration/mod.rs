//! Integration tests - the whole pipeline from intent text to query
//! strings and bound parameters.

mod pipeline_tests;
mod surface_convergence_tests;
