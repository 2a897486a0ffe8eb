//! Pattern querying over Radiograph graphs.
//!
//! Evaluation itself is a pluggable concern: the [`PatternEvaluator`] trait
//! is the contract any engine must satisfy (match a basic graph pattern,
//! return variable bindings), and [`BasicEvaluator`] is the built-in
//! implementation the facade uses by default. This crate's own
//! responsibility is everything around evaluation:
//!
//! - [`pattern`]: the query model: terms, triple patterns, selected
//!   variables.
//! - [`parse`]: the small text syntax (`select` line + one pattern per
//!   line) used by the CLI.
//! - [`facade`]: binding post-processing: display stringification, numeric
//!   coercion, and the grouped catalog → dataset → distribution-count view.
//!
//! Malformed queries surface as one [`QueryError`] carrying the evaluator's
//! (or parser's) message; there are no partial result sets.

pub mod eval;
pub mod facade;
pub mod parse;
pub mod pattern;

pub use eval::{BasicEvaluator, PatternEvaluator};
pub use facade::{catalog_listing, query, BoundValue, CatalogSummary, DatasetSummary, ResultRow};
pub use parse::parse_pattern_query;
pub use pattern::{PatternQuery, PatternTerm, TriplePattern};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("malformed pattern query: {0}")]
    Malformed(String),

    #[error("query evaluation failed: {0}")]
    Evaluation(String),

    #[error("unknown prefix `{0}` in pattern query")]
    UnknownPrefix(String),
}
