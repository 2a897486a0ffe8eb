//! Pattern evaluation.
//!
//! [`PatternEvaluator`] is the external contract: given a graph and a basic
//! graph pattern, produce variable bindings. [`BasicEvaluator`] is the
//! built-in engine, a straightforward nested-loop join: evaluate patterns
//! left to right, substituting bindings accumulated so far and scanning the
//! fact set for each candidate. Fine for the catalog-sized graphs this
//! pipeline produces; a smarter engine can be dropped in behind the trait
//! without touching the facade.

use crate::pattern::{PatternQuery, PatternTerm, TriplePattern};
use crate::QueryError;
use radiograph_graph::{Fact, FactObject, Graph, GraphNode};
use std::collections::BTreeMap;
use tracing::debug;

/// One bound value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Binding {
    Node(GraphNode),
    Literal(radiograph_graph::TypedLiteral),
}

impl Binding {
    fn from_object(object: &FactObject) -> Self {
        match object {
            FactObject::Node(node) => Binding::Node(node.clone()),
            FactObject::Literal(lit) => Binding::Literal(lit.clone()),
        }
    }
}

/// A solution: variable name → bound value.
pub type Solution = BTreeMap<String, Binding>;

/// The evaluation contract: match the query's basic graph pattern against
/// the graph and return every solution. Implementations must not mutate the
/// graph and must report malformed queries as errors rather than guessing.
pub trait PatternEvaluator {
    fn evaluate(&self, graph: &Graph, query: &PatternQuery) -> Result<Vec<Solution>, QueryError>;
}

/// The built-in nested-loop evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicEvaluator;

impl PatternEvaluator for BasicEvaluator {
    fn evaluate(&self, graph: &Graph, query: &PatternQuery) -> Result<Vec<Solution>, QueryError> {
        if query.patterns.is_empty() {
            return Err(QueryError::Malformed(
                "query has no triple patterns".to_string(),
            ));
        }
        for var in &query.select {
            if !query.mentioned_variables().contains(var) {
                return Err(QueryError::Malformed(format!(
                    "selected variable ?{var} does not occur in any pattern"
                )));
            }
        }

        let mut solutions: Vec<Solution> = vec![Solution::new()];
        for pattern in &query.patterns {
            let mut next = Vec::new();
            for solution in &solutions {
                extend_solutions(graph, pattern, solution, &mut next);
            }
            solutions = next;
            if solutions.is_empty() {
                break;
            }
        }
        debug!(
            patterns = query.patterns.len(),
            solutions = solutions.len(),
            "evaluated pattern query"
        );
        Ok(solutions)
    }
}

fn extend_solutions(
    graph: &Graph,
    pattern: &TriplePattern,
    solution: &Solution,
    out: &mut Vec<Solution>,
) {
    for fact in graph.facts() {
        if let Some(extended) = match_fact(pattern, solution, fact) {
            out.push(extended);
        }
    }
}

fn match_fact(pattern: &TriplePattern, solution: &Solution, fact: &Fact) -> Option<Solution> {
    let mut extended = solution.clone();

    let subject = Binding::Node(fact.subject.clone());
    bind(&pattern.subject, subject, &mut extended)?;

    let predicate = Binding::Node(GraphNode::Iri(fact.predicate.clone()));
    bind(&pattern.predicate, predicate, &mut extended)?;

    let object = Binding::from_object(&fact.object);
    bind(&pattern.object, object, &mut extended)?;

    Some(extended)
}

/// Match one term against one value under the current solution; `None` means
/// the fact doesn't satisfy the pattern.
fn bind(term: &PatternTerm, value: Binding, solution: &mut Solution) -> Option<()> {
    match term {
        PatternTerm::Var(name) => match solution.get(name) {
            Some(existing) if existing == &value => Some(()),
            Some(_) => None,
            None => {
                solution.insert(name.clone(), value);
                Some(())
            }
        },
        PatternTerm::Iri(iri) => match &value {
            Binding::Node(GraphNode::Iri(candidate)) if candidate == iri => Some(()),
            _ => None,
        },
        PatternTerm::Literal(text) => match &value {
            Binding::Literal(lit) if lit.lexical_form() == *text => Some(()),
            _ => None,
        },
    }
}
