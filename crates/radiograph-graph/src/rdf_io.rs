//! RDF serialization boundary.
//!
//! The graph's own fact model stays free of any serializer types; this
//! module converts facts to `oxrdf` terms at the edge and drives `oxttl`
//! for the concrete syntaxes:
//!
//! - Turtle (`.ttl`): carries the graph's prefix bindings.
//! - N-Triples (`.nt`): prefix-free; deserializing binds the default
//!   prefix set so downstream serialization stays presentable.
//!
//! Round-trip preserves every fact; typed literals map onto the XSD
//! datatypes and back.

use crate::model::{Fact, FactObject, Graph, GraphNode, TypedLiteral};
use crate::vocab;
use crate::GraphError;
use oxrdf::vocab::xsd;
use oxrdf::{BlankNode, Literal, NamedNode, Subject, Term, Triple};
use oxttl::{NTriplesParser, NTriplesSerializer, TurtleParser, TurtleSerializer};

/// A concrete triple-interchange syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfSyntax {
    Turtle,
    NTriples,
}

impl RdfSyntax {
    pub fn extension(self) -> &'static str {
        match self {
            RdfSyntax::Turtle => "ttl",
            RdfSyntax::NTriples => "nt",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            RdfSyntax::Turtle => "text/turtle",
            RdfSyntax::NTriples => "application/n-triples",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Some(RdfSyntax::Turtle),
            "nt" | "ntriples" => Some(RdfSyntax::NTriples),
            _ => None,
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Serialize the graph. Output order follows the graph's deterministic fact
/// order, so equal graphs produce byte-identical documents.
pub fn serialize_graph(graph: &Graph, syntax: RdfSyntax) -> Result<Vec<u8>, GraphError> {
    match syntax {
        RdfSyntax::Turtle => {
            let mut serializer = TurtleSerializer::new();
            for (prefix, namespace) in graph.prefixes() {
                serializer = serializer
                    .with_prefix(prefix, namespace)
                    .map_err(|e| GraphError::Serialize(e.to_string()))?;
            }
            let mut writer = serializer.for_writer(Vec::new());
            for fact in graph.facts() {
                writer.serialize_triple(&to_oxrdf(fact)?)?;
            }
            Ok(writer.finish()?)
        }
        RdfSyntax::NTriples => {
            let mut writer = NTriplesSerializer::new().for_writer(Vec::new());
            for fact in graph.facts() {
                writer.serialize_triple(&to_oxrdf(fact)?)?;
            }
            Ok(writer.finish())
        }
    }
}

/// Deserialize a document back into a graph.
pub fn deserialize_graph(bytes: &[u8], syntax: RdfSyntax) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    match syntax {
        RdfSyntax::Turtle => {
            let mut parser = TurtleParser::new().for_reader(bytes);
            for result in &mut parser {
                let triple = result.map_err(|e| GraphError::Parse(e.to_string()))?;
                graph.insert(from_oxrdf(&triple));
            }
            for (prefix, iri) in parser.prefixes() {
                graph.bind_prefix(prefix, iri);
            }
        }
        RdfSyntax::NTriples => {
            for result in NTriplesParser::new().for_reader(bytes) {
                let triple = result.map_err(|e| GraphError::Parse(e.to_string()))?;
                graph.insert(from_oxrdf(&triple));
            }
            for (prefix, namespace) in vocab::default_prefixes() {
                graph.bind_prefix(prefix, namespace);
            }
        }
    }
    Ok(graph)
}

// ============================================================================
// Term conversion
// ============================================================================

fn to_oxrdf(fact: &Fact) -> Result<Triple, GraphError> {
    let subject: Subject = match &fact.subject {
        GraphNode::Iri(iri) => named_node(iri)?.into(),
        GraphNode::Blank(id) => blank_node(id)?.into(),
    };
    let predicate = named_node(&fact.predicate)?;
    let object: Term = match &fact.object {
        FactObject::Node(GraphNode::Iri(iri)) => named_node(iri)?.into(),
        FactObject::Node(GraphNode::Blank(id)) => blank_node(id)?.into(),
        FactObject::Literal(literal) => literal_to_oxrdf(literal).into(),
    };
    Ok(Triple::new(subject, predicate, object))
}

fn named_node(iri: &str) -> Result<NamedNode, GraphError> {
    NamedNode::new(iri).map_err(|e| GraphError::InvalidIri {
        iri: iri.to_string(),
        message: e.to_string(),
    })
}

fn blank_node(id: &str) -> Result<BlankNode, GraphError> {
    BlankNode::new(id).map_err(|e| GraphError::InvalidIri {
        iri: format!("_:{id}"),
        message: e.to_string(),
    })
}

fn literal_to_oxrdf(literal: &TypedLiteral) -> Literal {
    match literal {
        TypedLiteral::Integer(_) => {
            Literal::new_typed_literal(literal.lexical_form(), xsd::INTEGER)
        }
        TypedLiteral::Decimal(_) => {
            Literal::new_typed_literal(literal.lexical_form(), xsd::DECIMAL)
        }
        TypedLiteral::Date { .. } => Literal::new_typed_literal(literal.lexical_form(), xsd::DATE),
        TypedLiteral::Time(value) => Literal::new_typed_literal(value.clone(), xsd::TIME),
        TypedLiteral::Text(value) => Literal::new_simple_literal(value.clone()),
    }
}

fn from_oxrdf(triple: &Triple) -> Fact {
    let subject = match &triple.subject {
        Subject::NamedNode(n) => GraphNode::Iri(n.as_str().to_string()),
        Subject::BlankNode(b) => GraphNode::Blank(b.as_str().to_string()),
    };
    let object = match &triple.object {
        Term::NamedNode(n) => FactObject::Node(GraphNode::Iri(n.as_str().to_string())),
        Term::BlankNode(b) => FactObject::Node(GraphNode::Blank(b.as_str().to_string())),
        Term::Literal(l) => FactObject::Literal(literal_from_oxrdf(l)),
    };
    Fact::new(subject, triple.predicate.as_str(), object)
}

fn literal_from_oxrdf(literal: &Literal) -> TypedLiteral {
    let value = literal.value();
    let datatype = literal.datatype();
    if datatype == xsd::INTEGER {
        if let Ok(v) = value.parse::<i64>() {
            return TypedLiteral::Integer(v);
        }
    } else if datatype == xsd::DECIMAL || datatype == xsd::DOUBLE || datatype == xsd::FLOAT {
        if let Ok(v) = value.parse::<f64>() {
            return TypedLiteral::Decimal(v);
        }
    } else if datatype == xsd::DATE {
        if let Some(date) = parse_date_lexical(value) {
            return date;
        }
    } else if datatype == xsd::TIME {
        return TypedLiteral::Time(value.to_string());
    }
    TypedLiteral::Text(value.to_string())
}

fn parse_date_lexical(value: &str) -> Option<TypedLiteral> {
    let mut parts = value.splitn(3, '-');
    let year: u16 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    Some(TypedLiteral::date(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fact, FactObject, GraphNode};

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        for (prefix, namespace) in vocab::default_prefixes() {
            graph.bind_prefix(prefix, namespace);
        }
        let dist = GraphNode::iri("http://example.org/dicom/data_catA_s1_a.dcm");
        graph.insert(Fact::new(
            dist.clone(),
            vocab::RDF_TYPE,
            FactObject::iri(vocab::DCAT_DISTRIBUTION_CLASS),
        ));
        graph.insert(Fact::new(
            dist.clone(),
            "http://dicom.nema.org/resources/ontology/DCM#Rows",
            FactObject::Literal(TypedLiteral::Integer(512)),
        ));
        graph.insert(Fact::new(
            dist.clone(),
            "http://dicom.nema.org/resources/ontology/DCM#SliceThickness",
            FactObject::Literal(TypedLiteral::Decimal(2.5)),
        ));
        graph.insert(Fact::new(
            dist.clone(),
            "http://purl.org/dc/terms/created",
            FactObject::Literal(TypedLiteral::date(2023, 4, 7)),
        ));
        graph.insert(Fact::new(
            dist.clone(),
            "http://dicom.nema.org/resources/ontology/DCM#StudyTime",
            FactObject::Literal(TypedLiteral::Time("120000.00".into())),
        ));
        graph.insert(Fact::new(
            dist,
            "http://purl.org/dc/terms/title",
            FactObject::text("a.dcm"),
        ));
        graph
    }

    #[test]
    fn turtle_round_trip_preserves_facts_and_prefixes() {
        let graph = sample_graph();
        let bytes = serialize_graph(&graph, RdfSyntax::Turtle).expect("serialize");
        let back = deserialize_graph(&bytes, RdfSyntax::Turtle).expect("deserialize");
        assert_eq!(back, graph);
    }

    #[test]
    fn ntriples_round_trip_preserves_facts() {
        let graph = sample_graph();
        let bytes = serialize_graph(&graph, RdfSyntax::NTriples).expect("serialize");
        let back = deserialize_graph(&bytes, RdfSyntax::NTriples).expect("deserialize");
        let original: Vec<_> = graph.facts().collect();
        let returned: Vec<_> = back.facts().collect();
        assert_eq!(original, returned);
    }

    #[test]
    fn equal_graphs_serialize_identically() {
        let a = serialize_graph(&sample_graph(), RdfSyntax::Turtle).expect("serialize");
        let b = serialize_graph(&sample_graph(), RdfSyntax::Turtle).expect("serialize");
        assert_eq!(a, b);
    }

    #[test]
    fn typed_literals_carry_xsd_datatypes() {
        let bytes = serialize_graph(&sample_graph(), RdfSyntax::NTriples).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"512\"^^<http://www.w3.org/2001/XMLSchema#integer>"));
        assert!(text.contains("\"2.5\"^^<http://www.w3.org/2001/XMLSchema#decimal>"));
        assert!(text.contains("\"2023-04-07\"^^<http://www.w3.org/2001/XMLSchema#date>"));
    }

    #[test]
    fn syntax_extensions_resolve_both_ways() {
        assert_eq!(RdfSyntax::Turtle.extension(), "ttl");
        assert_eq!(RdfSyntax::from_extension("NT"), Some(RdfSyntax::NTriples));
        assert_eq!(RdfSyntax::from_extension("pdf"), None);
    }
}
