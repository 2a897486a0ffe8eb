//! Subgraph extraction: a closed, exportable slice rooted at one catalog.
//!
//! Breadth-first and depth-bounded: catalog facts, then each linked
//! dataset's facts, then each linked distribution's facts, then one extra
//! hop from distributions to sub-resources that have facts of their own.
//! Nothing past that bound is followed; in particular, anonymous (blank)
//! intermediaries are never expanded a second level, so cyclic or unbounded
//! structures cannot drag the whole graph in.
//!
//! The result keeps the source graph's prefix bindings and satisfies the
//! closure invariant: every dataset/distribution referenced by a structural
//! link inside the subgraph also has its subject facts inside the subgraph.

use crate::assemble::catalog_iri;
use crate::model::{Graph, GraphNode};
use crate::vocab;
use crate::GraphError;
use tracing::debug;

/// Extract the subgraph for `catalog_name`.
///
/// The catalog subject is constructed from `base_uri` the same way assembly
/// constructs it. A name that resolves to no subject is a not-found
/// condition, never an empty document.
pub fn extract_catalog_subgraph(
    graph: &Graph,
    catalog_name: &str,
    base_uri: &str,
) -> Result<Graph, GraphError> {
    let catalog = GraphNode::iri(catalog_iri(base_uri, catalog_name));
    if !graph.has_subject(&catalog) {
        return Err(GraphError::CatalogNotFound(catalog_name.to_string()));
    }

    let mut out = Graph::new();
    for (prefix, namespace) in graph.prefixes() {
        out.bind_prefix(prefix, namespace);
    }

    copy_subject_facts(graph, &catalog, &mut out);

    let datasets: Vec<GraphNode> = graph
        .objects_of(&catalog, vocab::DCAT_DATASET)
        .cloned()
        .collect();
    for dataset in &datasets {
        copy_subject_facts(graph, dataset, &mut out);

        let distributions: Vec<GraphNode> = graph
            .objects_of(dataset, vocab::DCAT_DISTRIBUTION)
            .cloned()
            .collect();
        for distribution in &distributions {
            copy_subject_facts(graph, distribution, &mut out);

            // One extra hop: sub-resources a distribution points at, copied
            // but never recursed into.
            let hops: Vec<GraphNode> = graph
                .facts_with_subject(distribution)
                .filter_map(|f| f.object.as_node())
                .cloned()
                .collect();
            for hop in &hops {
                if graph.has_subject(hop) {
                    copy_subject_facts(graph, hop, &mut out);
                }
            }
        }
    }

    debug!(
        catalog = catalog_name,
        facts = out.len(),
        "extracted catalog subgraph"
    );
    Ok(out)
}

fn copy_subject_facts(source: &Graph, subject: &GraphNode, out: &mut Graph) {
    for fact in source.facts_with_subject(subject) {
        out.insert(fact.clone());
    }
}
