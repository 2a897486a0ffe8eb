//! Knowledge-graph core for Radiograph.
//!
//! Takes the flat extraction records of `radiograph-ingest-dicom` and turns
//! them into a DCAT-shaped knowledge graph:
//!
//! - [`coerce`]: VR-driven value coercion into [`TypedLiteral`]s (total:
//!   worst case degrades to `Text`, never fails the pipeline).
//! - [`mapping`]: element name → ontology predicates, with the SNOMED
//!   anatomical-site lookup.
//! - [`grouping`]: catalog/dataset keys from file paths and study
//!   identifiers (deterministic, configurable path index).
//! - [`assemble`]: structural and descriptive fact emission per file.
//! - [`pipeline`]: the batch build: parallel per-file mapping with a single
//!   lock around graph merge, fail-soft cancellation, a build report.
//! - [`subgraph`]: the bounded-depth reachability copy rooted at one
//!   catalog.
//! - [`rdf_io`]: Turtle / N-Triples serialization through `oxrdf`/`oxttl`,
//!   preserving namespace-prefix bindings.
//!
//! The graph itself ([`Graph`]) is an explicit value: built once by the
//! pipeline, then consumed read-only by extraction and querying. There is no
//! process-global graph state.

pub mod assemble;
pub mod coerce;
pub mod grouping;
pub mod mapping;
pub mod model;
pub mod pipeline;
pub mod rdf_io;
pub mod subgraph;
pub mod vocab;

pub use coerce::coerce;
pub use model::{Fact, FactObject, Graph, GraphNode, TypedLiteral};
pub use pipeline::{build_graph, BuildReport, DistributionUriScheme, GroupingMode, PipelineConfig};
pub use rdf_io::RdfSyntax;
pub use subgraph::extract_catalog_subgraph;

use thiserror::Error;

/// Errors surfaced to callers of the graph layer.
///
/// Everything else in this crate is a degrade-and-continue policy: coercion
/// falls back to `Text`, unmapped names are dropped, shallow paths are
/// skipped and counted.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The requested catalog name resolves to no subject in the graph.
    #[error("no catalog named `{0}` in the graph")]
    CatalogNotFound(String),

    #[error("invalid IRI `{iri}`: {message}")]
    InvalidIri { iri: String, message: String },

    #[error("RDF serialization failed: {0}")]
    Serialize(String),

    #[error("RDF parsing failed: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
