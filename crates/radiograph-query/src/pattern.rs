//! The pattern-query model.
//!
//! A query is a basic graph pattern (a conjunction of triple patterns over
//! variables, IRIs, and literals) plus the variables to project. No
//! filters, no optional blocks, no property paths: richer query languages
//! are an evaluator concern, not part of this contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One position of a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternTerm {
    /// `?name`: binds or joins.
    Var(String),
    /// `<iri>`: matches that node exactly.
    Iri(String),
    /// `"text"`: matches a literal by its lexical form.
    Literal(String),
}

impl PatternTerm {
    pub fn var(name: impl Into<String>) -> Self {
        PatternTerm::Var(name.into())
    }

    pub fn iri(value: impl Into<String>) -> Self {
        PatternTerm::Iri(value.into())
    }

    pub fn as_var(&self) -> Option<&str> {
        match self {
            PatternTerm::Var(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for PatternTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTerm::Var(name) => write!(f, "?{name}"),
            PatternTerm::Iri(iri) => write!(f, "<{iri}>"),
            PatternTerm::Literal(text) => write!(f, "{text:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: PatternTerm,
    pub predicate: PatternTerm,
    pub object: PatternTerm,
}

impl TriplePattern {
    pub fn new(subject: PatternTerm, predicate: PatternTerm, object: PatternTerm) -> Self {
        TriplePattern {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A full pattern query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternQuery {
    /// Projected variables, in output-column order. Empty means "all
    /// variables, sorted by name".
    pub select: Vec<String>,
    pub patterns: Vec<TriplePattern>,
}

impl PatternQuery {
    pub fn new(select: Vec<String>, patterns: Vec<TriplePattern>) -> Self {
        PatternQuery { select, patterns }
    }

    /// Every variable mentioned anywhere in the patterns, sorted.
    pub fn mentioned_variables(&self) -> Vec<String> {
        let mut vars: Vec<String> = self
            .patterns
            .iter()
            .flat_map(|p| [&p.subject, &p.predicate, &p.object])
            .filter_map(|t| t.as_var().map(str::to_string))
            .collect();
        vars.sort();
        vars.dedup();
        vars
    }

    /// The effective projection: `select` when present, else all mentioned
    /// variables.
    pub fn projection(&self) -> Vec<String> {
        if self.select.is_empty() {
            self.mentioned_variables()
        } else {
            self.select.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_defaults_to_all_variables() {
        let query = PatternQuery::new(
            vec![],
            vec![TriplePattern::new(
                PatternTerm::var("d"),
                PatternTerm::iri("http://x/p"),
                PatternTerm::var("title"),
            )],
        );
        assert_eq!(query.projection(), vec!["d".to_string(), "title".to_string()]);
    }

    #[test]
    fn explicit_select_wins_and_keeps_order() {
        let query = PatternQuery::new(
            vec!["title".into(), "d".into()],
            vec![TriplePattern::new(
                PatternTerm::var("d"),
                PatternTerm::iri("http://x/p"),
                PatternTerm::var("title"),
            )],
        );
        assert_eq!(query.projection(), vec!["title".to_string(), "d".to_string()]);
    }

    #[test]
    fn patterns_render_readably() {
        let p = TriplePattern::new(
            PatternTerm::var("d"),
            PatternTerm::iri("http://x/p"),
            PatternTerm::Literal("CT".into()),
        );
        assert_eq!(p.to_string(), "?d <http://x/p> \"CT\" .");
    }
}
