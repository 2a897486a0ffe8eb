//! The fact model: typed literals, graph nodes, facts, and the graph itself.
//!
//! A [`Graph`] is a set of [`Fact`]s plus a prefix → namespace binding table.
//! Set semantics are load-bearing: inserting the same fact twice changes
//! nothing, which is what makes per-file assembly idempotent and the parallel
//! merge commutative. Facts are kept in a `BTreeSet` so iteration (and
//! therefore serialization) is deterministic across runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// Typed literals
// ============================================================================

/// A coerced, strongly-typed value. Immutable once created.
#[derive(Debug, Clone)]
pub enum TypedLiteral {
    Integer(i64),
    Decimal(f64),
    Date { year: u16, month: u8, day: u8 },
    Time(String),
    Text(String),
}

impl TypedLiteral {
    pub fn date(year: u16, month: u8, day: u8) -> Self {
        TypedLiteral::Date { year, month, day }
    }

    /// The lexical form used in RDF output and query results.
    pub fn lexical_form(&self) -> String {
        match self {
            TypedLiteral::Integer(v) => v.to_string(),
            TypedLiteral::Decimal(v) => v.to_string(),
            TypedLiteral::Date { year, month, day } => {
                format!("{year:04}-{month:02}-{day:02}")
            }
            TypedLiteral::Time(s) | TypedLiteral::Text(s) => s.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedLiteral::Integer(v) => Some(*v as f64),
            TypedLiteral::Decimal(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical_form())
    }
}

// Decimal carries an f64, so equality/ordering/hashing go through the bit
// pattern (`total_cmp`). NaN never reaches here (coercion only produces
// parsed finite values), but the impls stay total regardless.
impl PartialEq for TypedLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for TypedLiteral {}

impl PartialOrd for TypedLiteral {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypedLiteral {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use TypedLiteral::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.total_cmp(b),
            (Date { year: y1, month: m1, day: d1 }, Date { year: y2, month: m2, day: d2 }) => {
                (y1, m1, d1).cmp(&(y2, m2, d2))
            }
            (Time(a), Time(b)) | (Text(a), Text(b)) => a.cmp(b),
            _ => self.discriminant().cmp(&other.discriminant()),
        }
    }
}

impl Hash for TypedLiteral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant().hash(state);
        match self {
            TypedLiteral::Integer(v) => v.hash(state),
            TypedLiteral::Decimal(v) => v.to_bits().hash(state),
            TypedLiteral::Date { year, month, day } => (year, month, day).hash(state),
            TypedLiteral::Time(s) | TypedLiteral::Text(s) => s.hash(state),
        }
    }
}

impl TypedLiteral {
    fn discriminant(&self) -> u8 {
        match self {
            TypedLiteral::Integer(_) => 0,
            TypedLiteral::Decimal(_) => 1,
            TypedLiteral::Date { .. } => 2,
            TypedLiteral::Time(_) => 3,
            TypedLiteral::Text(_) => 4,
        }
    }
}

// ============================================================================
// Nodes and facts
// ============================================================================

/// A graph node: an IRI, or (only when round-tripping foreign documents) a
/// blank node. The assembler itself never emits blank nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphNode {
    Iri(String),
    Blank(String),
}

impl GraphNode {
    pub fn iri(value: impl Into<String>) -> Self {
        GraphNode::Iri(value.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            GraphNode::Iri(iri) => Some(iri),
            GraphNode::Blank(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, GraphNode::Blank(_))
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphNode::Iri(iri) => write!(f, "<{iri}>"),
            GraphNode::Blank(id) => write!(f, "_:{id}"),
        }
    }
}

/// The object position of a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactObject {
    Node(GraphNode),
    Literal(TypedLiteral),
}

impl FactObject {
    pub fn iri(value: impl Into<String>) -> Self {
        FactObject::Node(GraphNode::iri(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        FactObject::Literal(TypedLiteral::Text(value.into()))
    }

    pub fn as_node(&self) -> Option<&GraphNode> {
        match self {
            FactObject::Node(node) => Some(node),
            FactObject::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&TypedLiteral> {
        match self {
            FactObject::Literal(lit) => Some(lit),
            FactObject::Node(_) => None,
        }
    }
}

/// One subject–predicate–object statement. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fact {
    pub subject: GraphNode,
    /// Predicate IRI (predicates are never blank).
    pub predicate: String,
    pub object: FactObject,
}

impl Fact {
    pub fn new(subject: GraphNode, predicate: impl Into<String>, object: FactObject) -> Self {
        Fact {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// The accumulated fact set for one processing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    facts: BTreeSet<Fact>,
    /// prefix → namespace IRI. Cosmetic: consulted only at serialization.
    prefixes: BTreeMap<String, String>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Insert one fact. Idempotent; returns whether the graph changed.
    pub fn insert(&mut self, fact: Fact) -> bool {
        self.facts.insert(fact)
    }

    /// Merge another graph's facts and prefixes into this one.
    pub fn merge(&mut self, other: Graph) {
        self.facts.extend(other.facts);
        self.prefixes.extend(other.prefixes);
    }

    pub fn bind_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    /// All facts, in deterministic (subject, predicate, object) order.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// All facts with the given subject.
    pub fn facts_with_subject<'a>(
        &'a self,
        subject: &'a GraphNode,
    ) -> impl Iterator<Item = &'a Fact> + 'a {
        self.facts.iter().filter(move |f| &f.subject == subject)
    }

    /// Whether any fact has this node as its subject.
    pub fn has_subject(&self, subject: &GraphNode) -> bool {
        self.facts_with_subject(subject).next().is_some()
    }

    /// Object nodes reachable from `subject` via `predicate`.
    pub fn objects_of<'a>(
        &'a self,
        subject: &'a GraphNode,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a GraphNode> + 'a {
        self.facts_with_subject(subject)
            .filter(move |f| f.predicate == predicate)
            .filter_map(|f| f.object.as_node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(s: &str, p: &str, o: &str) -> Fact {
        Fact::new(GraphNode::iri(s), p, FactObject::text(o))
    }

    #[test]
    fn duplicate_insertion_is_idempotent() {
        let mut g = Graph::new();
        assert!(g.insert(fact("http://x/a", "http://x/p", "v")));
        assert!(!g.insert(fact("http://x/a", "http://x/p", "v")));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn merge_is_commutative_on_fact_sets() {
        let mut left = Graph::new();
        left.insert(fact("http://x/a", "http://x/p", "1"));
        let mut right = Graph::new();
        right.insert(fact("http://x/b", "http://x/p", "2"));

        let mut ab = left.clone();
        ab.merge(right.clone());
        let mut ba = right;
        ba.merge(left);
        assert_eq!(ab, ba);
    }

    #[test]
    fn decimal_literals_are_set_safe() {
        let mut g = Graph::new();
        let make = || {
            Fact::new(
                GraphNode::iri("http://x/a"),
                "http://x/kvp",
                FactObject::Literal(TypedLiteral::Decimal(120.5)),
            )
        };
        g.insert(make());
        assert!(!g.insert(make()));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn facts_iterate_in_stable_order() {
        let mut g = Graph::new();
        g.insert(fact("http://x/b", "http://x/p", "2"));
        g.insert(fact("http://x/a", "http://x/p", "1"));
        let subjects: Vec<String> = g.facts().map(|f| f.subject.to_string()).collect();
        assert_eq!(subjects, vec!["<http://x/a>", "<http://x/b>"]);
    }

    #[test]
    fn date_literal_renders_iso() {
        let lit = TypedLiteral::date(2023, 4, 7);
        assert_eq!(lit.lexical_form(), "2023-04-07");
    }
}
