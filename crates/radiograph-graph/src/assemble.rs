//! Graph assembly: structural and descriptive fact emission.
//!
//! Subject IRIs follow a fixed scheme (interoperability contract: exact
//! forms matter to downstream consumers):
//!
//! - catalog:      `<base>/catalog/<catalog_key>`
//! - dataset:      `<base>/dataset/<catalog_key>/<dataset_key>`
//! - distribution: `<base>/dicom/<path with separators replaced by `_`>`
//!
//! Distribution subjects use the *full* normalized path, so two files with
//! the same basename in different directories never collide. Dataset
//! subjects are namespaced by catalog so the same study identifier under two
//! catalogs stays two distinct nodes.
//!
//! Every emission function is a plain set insertion: emitting the same
//! file's facts twice leaves the graph unchanged.

use crate::grouping::{path_segments, GroupKey};
use crate::mapping::map_record;
use crate::model::{Fact, FactObject, Graph, GraphNode, TypedLiteral};
use crate::pipeline::{CatalogMetadata, DistributionUriScheme};
use crate::vocab;
use radiograph_ingest_dicom::ExtractedRecord;

// ============================================================================
// Subject IRIs
// ============================================================================

pub fn catalog_iri(base_uri: &str, catalog_key: &str) -> String {
    format!("{base_uri}/catalog/{catalog_key}")
}

pub fn dataset_iri(base_uri: &str, key: &GroupKey) -> String {
    format!("{base_uri}/dataset/{}/{}", key.catalog, key.dataset)
}

pub fn distribution_iri(base_uri: &str, file_path: &str, scheme: DistributionUriScheme) -> String {
    let segments = path_segments(file_path);
    let leaf = match scheme {
        DistributionUriScheme::FullPath => segments.join("_"),
        DistributionUriScheme::Basename => segments.last().copied().unwrap_or("").to_string(),
    };
    format!("{base_uri}/dicom/{leaf}")
}

pub fn basename(file_path: &str) -> String {
    path_segments(file_path)
        .last()
        .copied()
        .unwrap_or(file_path)
        .to_string()
}

// ============================================================================
// Structural facts
// ============================================================================

/// Emit the per-catalog structural fact set.
pub fn emit_catalog(graph: &mut Graph, base_uri: &str, catalog_key: &str, meta: &CatalogMetadata) {
    let subject = GraphNode::iri(catalog_iri(base_uri, catalog_key));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::RDF_TYPE,
        FactObject::iri(vocab::DCAT_CATALOG),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::DCTERMS_TITLE,
        FactObject::text(catalog_key),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::DCTERMS_PUBLISHER,
        FactObject::text(&meta.publisher),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::DCTERMS_ISSUED,
        FactObject::Literal(meta.issued_literal()),
    ));
    graph.insert(Fact::new(
        subject,
        vocab::DCTERMS_LANGUAGE,
        FactObject::text(&meta.language),
    ));
}

/// Emit the per-dataset structural fact set plus the owning catalog link.
pub fn emit_dataset(graph: &mut Graph, base_uri: &str, key: &GroupKey, title: Option<&str>) {
    let catalog = GraphNode::iri(catalog_iri(base_uri, &key.catalog));
    let subject = GraphNode::iri(dataset_iri(base_uri, key));

    graph.insert(Fact::new(
        catalog,
        vocab::DCAT_DATASET,
        FactObject::Node(subject.clone()),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::RDF_TYPE,
        FactObject::iri(vocab::DCAT_DATASET_CLASS),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::DCTERMS_IDENTIFIER,
        FactObject::text(&key.dataset),
    ));
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| format!("DICOM study {}", key.dataset));
    graph.insert(Fact::new(
        subject,
        vocab::DCTERMS_TITLE,
        FactObject::Literal(TypedLiteral::Text(title)),
    ));
}

/// Emit one file's distribution: the dataset link, the structural set, and
/// every mapped descriptive fact. Single pass; each record is mapped once.
pub fn emit_distribution(
    graph: &mut Graph,
    base_uri: &str,
    key: &GroupKey,
    file_path: &str,
    records: &[ExtractedRecord],
    scheme: DistributionUriScheme,
) {
    let dataset = GraphNode::iri(dataset_iri(base_uri, key));
    let subject = GraphNode::iri(distribution_iri(base_uri, file_path, scheme));

    graph.insert(Fact::new(
        dataset,
        vocab::DCAT_DISTRIBUTION,
        FactObject::Node(subject.clone()),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::RDF_TYPE,
        FactObject::iri(vocab::DCAT_DISTRIBUTION_CLASS),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::RDF_TYPE,
        FactObject::iri(vocab::DICOM_FILE_CLASS),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::DCTERMS_TITLE,
        FactObject::text(basename(file_path)),
    ));
    graph.insert(Fact::new(
        subject.clone(),
        vocab::DCAT_MEDIA_TYPE,
        FactObject::text(vocab::DICOM_MEDIA_TYPE),
    ));

    for record in records {
        for (predicate, object) in map_record(record) {
            graph.insert(Fact::new(subject.clone(), predicate, object));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radiograph_dicom::{ScalarValue, Tag, Vr};

    const BASE: &str = "http://example.org";

    fn key() -> GroupKey {
        GroupKey {
            catalog: "catA".into(),
            dataset: "S1".into(),
        }
    }

    fn modality() -> ExtractedRecord {
        ExtractedRecord {
            tag: Tag(0x0008, 0x0060),
            vr: Vr::Cs,
            name: "Modality".into(),
            value: ScalarValue::Text("CT".into()),
        }
    }

    #[test]
    fn distribution_iri_uses_full_path_by_default() {
        let a = distribution_iri(BASE, "data/catA/s1/scan.dcm", DistributionUriScheme::FullPath);
        let b = distribution_iri(BASE, "data/catB/s2/scan.dcm", DistributionUriScheme::FullPath);
        assert_eq!(a, "http://example.org/dicom/data_catA_s1_scan.dcm");
        assert_ne!(a, b);
    }

    #[test]
    fn basename_scheme_collides_by_design() {
        let a = distribution_iri(BASE, "data/catA/s1/scan.dcm", DistributionUriScheme::Basename);
        let b = distribution_iri(BASE, "data/catB/s2/scan.dcm", DistributionUriScheme::Basename);
        assert_eq!(a, b);
    }

    #[test]
    fn dataset_iri_is_namespaced_by_catalog() {
        let k1 = GroupKey {
            catalog: "catA".into(),
            dataset: "S1".into(),
        };
        let k2 = GroupKey {
            catalog: "catB".into(),
            dataset: "S1".into(),
        };
        assert_ne!(dataset_iri(BASE, &k1), dataset_iri(BASE, &k2));
    }

    #[test]
    fn emitting_a_file_twice_changes_nothing() {
        let mut graph = Graph::new();
        emit_dataset(&mut graph, BASE, &key(), None);
        emit_distribution(
            &mut graph,
            BASE,
            &key(),
            "data/catA/s1/a.dcm",
            &[modality()],
            DistributionUriScheme::FullPath,
        );
        let before = graph.len();
        emit_distribution(
            &mut graph,
            BASE,
            &key(),
            "data/catA/s1/a.dcm",
            &[modality()],
            DistributionUriScheme::FullPath,
        );
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn distribution_carries_type_title_and_media_type() {
        let mut graph = Graph::new();
        emit_distribution(
            &mut graph,
            BASE,
            &key(),
            "data/catA/s1/a.dcm",
            &[],
            DistributionUriScheme::FullPath,
        );
        let subject = GraphNode::iri("http://example.org/dicom/data_catA_s1_a.dcm");
        let predicates: Vec<&str> = graph
            .facts_with_subject(&subject)
            .map(|f| f.predicate.as_str())
            .collect();
        assert!(predicates.contains(&vocab::RDF_TYPE));
        assert!(predicates.contains(&vocab::DCTERMS_TITLE));
        assert!(predicates.contains(&vocab::DCAT_MEDIA_TYPE));
        let title: Vec<_> = graph
            .facts_with_subject(&subject)
            .filter(|f| f.predicate == vocab::DCTERMS_TITLE)
            .collect();
        assert_eq!(
            title[0].object,
            FactObject::text("a.dcm")
        );
    }
}
