//! Binding post-processing: the facade in front of the evaluator.
//!
//! Evaluators return raw bindings; callers want display strings, numbers,
//! and (for the catalog view) nested structures. This module owns that
//! shaping:
//!
//! - [`query`]: run a pattern query and project rows of [`BoundValue`]s.
//! - [`group_count`]: fold flat rows into groups keyed by leading columns,
//!   counting *distinct* values of a designated column (a plain row count
//!   would double-count through join fan-out).
//! - [`catalog_listing`]: the nested catalog → dataset →
//!   distribution-count view built on the two above.

use crate::eval::{Binding, PatternEvaluator, Solution};
use crate::pattern::{PatternQuery, PatternTerm, TriplePattern};
use crate::QueryError;
use radiograph_graph::{vocab, Graph, GraphNode, TypedLiteral};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A post-processed bound value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl BoundValue {
    fn from_binding(binding: &Binding) -> Self {
        match binding {
            Binding::Node(GraphNode::Iri(iri)) => BoundValue::Text(iri.clone()),
            Binding::Node(GraphNode::Blank(id)) => BoundValue::Text(format!("_:{id}")),
            Binding::Literal(TypedLiteral::Integer(v)) => BoundValue::Integer(*v),
            Binding::Literal(TypedLiteral::Decimal(v)) => BoundValue::Decimal(*v),
            Binding::Literal(other) => BoundValue::Text(other.lexical_form()),
        }
    }

    pub fn display_string(&self) -> String {
        match self {
            BoundValue::Text(s) => s.clone(),
            BoundValue::Integer(v) => v.to_string(),
            BoundValue::Decimal(v) => v.to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BoundValue::Integer(v) => Some(*v as f64),
            BoundValue::Decimal(v) => Some(*v),
            BoundValue::Text(_) => None,
        }
    }
}

/// One projected result row, keyed by variable name.
pub type ResultRow = BTreeMap<String, BoundValue>;

/// Run a query through the evaluator and project its rows.
pub fn query(
    graph: &Graph,
    evaluator: &dyn PatternEvaluator,
    pattern_query: &PatternQuery,
) -> Result<Vec<ResultRow>, QueryError> {
    let solutions = evaluator.evaluate(graph, pattern_query)?;
    let projection = pattern_query.projection();
    Ok(solutions
        .iter()
        .map(|solution| project(solution, &projection))
        .collect())
}

fn project(solution: &Solution, projection: &[String]) -> ResultRow {
    projection
        .iter()
        .filter_map(|var| {
            solution
                .get(var)
                .map(|binding| (var.clone(), BoundValue::from_binding(binding)))
        })
        .collect()
}

/// Fold rows into groups keyed by `keys` (in order), counting distinct
/// values of `counted` per group. Group order is the keys' sort order, so
/// output is deterministic.
pub fn group_count(
    rows: &[ResultRow],
    keys: &[&str],
    counted: &str,
) -> Vec<(Vec<BoundValue>, usize)> {
    let mut groups: BTreeMap<Vec<String>, (Vec<BoundValue>, BTreeSet<String>)> = BTreeMap::new();
    for row in rows {
        let key_values: Vec<BoundValue> = keys
            .iter()
            .filter_map(|k| row.get(*k).cloned())
            .collect();
        if key_values.len() != keys.len() {
            continue;
        }
        let sort_key: Vec<String> = key_values.iter().map(|v| v.display_string()).collect();
        let entry = groups
            .entry(sort_key)
            .or_insert_with(|| (key_values, BTreeSet::new()));
        if let Some(value) = row.get(counted) {
            entry.1.insert(value.display_string());
        }
    }
    groups
        .into_values()
        .map(|(key_values, distinct)| (key_values, distinct.len()))
        .collect()
}

// ============================================================================
// Catalog listing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub identifier: String,
    pub title: String,
    pub distributions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub catalog: String,
    pub datasets: Vec<DatasetSummary>,
}

/// The nested catalog → dataset → distribution-count view.
pub fn catalog_listing(
    graph: &Graph,
    evaluator: &dyn PatternEvaluator,
) -> Result<Vec<CatalogSummary>, QueryError> {
    let listing_query = PatternQuery::new(
        vec![
            "catalog".into(),
            "identifier".into(),
            "title".into(),
            "distribution".into(),
        ],
        vec![
            TriplePattern::new(
                PatternTerm::var("catalog"),
                PatternTerm::iri(vocab::RDF_TYPE),
                PatternTerm::iri(vocab::DCAT_CATALOG),
            ),
            TriplePattern::new(
                PatternTerm::var("catalog"),
                PatternTerm::iri(vocab::DCTERMS_TITLE),
                PatternTerm::var("catalog_title"),
            ),
            TriplePattern::new(
                PatternTerm::var("catalog"),
                PatternTerm::iri(vocab::DCAT_DATASET),
                PatternTerm::var("dataset"),
            ),
            TriplePattern::new(
                PatternTerm::var("dataset"),
                PatternTerm::iri(vocab::DCTERMS_IDENTIFIER),
                PatternTerm::var("identifier"),
            ),
            TriplePattern::new(
                PatternTerm::var("dataset"),
                PatternTerm::iri(vocab::DCTERMS_TITLE),
                PatternTerm::var("title"),
            ),
            TriplePattern::new(
                PatternTerm::var("dataset"),
                PatternTerm::iri(vocab::DCAT_DISTRIBUTION),
                PatternTerm::var("distribution"),
            ),
        ],
    );

    let mut select = listing_query;
    select.select.push("catalog_title".into());
    let rows = query(graph, evaluator, &select)?;

    let mut catalogs: BTreeMap<String, BTreeMap<(String, String), BTreeSet<String>>> =
        BTreeMap::new();
    for row in &rows {
        let (Some(catalog_title), Some(identifier), Some(title), Some(distribution)) = (
            row.get("catalog_title"),
            row.get("identifier"),
            row.get("title"),
            row.get("distribution"),
        ) else {
            continue;
        };
        catalogs
            .entry(catalog_title.display_string())
            .or_default()
            .entry((identifier.display_string(), title.display_string()))
            .or_default()
            .insert(distribution.display_string());
    }

    Ok(catalogs
        .into_iter()
        .map(|(catalog, datasets)| CatalogSummary {
            catalog,
            datasets: datasets
                .into_iter()
                .map(|((identifier, title), distributions)| DatasetSummary {
                    identifier,
                    title,
                    distributions: distributions.len(),
                })
                .collect(),
        })
        .collect())
}
