//! The batch build pipeline: interchange entries → knowledge graph.
//!
//! One configurable pipeline replaces the forked variants this design grew
//! out of: grouping granularity and the distribution subject scheme are
//! explicit configuration, not parallel code paths.
//!
//! Files are independent, so per-file mapping runs on the rayon pool; the
//! only shared state is the accumulating graph, guarded by a single mutex.
//! Insertion is commutative and idempotent (set semantics), so scheduling
//! order cannot change the result. Cancellation is fail-soft: setting the
//! flag stops further files from being processed and the graph built so far
//! is returned as a valid partial result.

use crate::assemble::{emit_catalog, emit_dataset, emit_distribution};
use crate::grouping::{group, GroupKey};
use crate::model::{Graph, TypedLiteral};
use crate::vocab;
use parking_lot::Mutex;
use radiograph_ingest_dicom::{ExtractedRecord, ExtractionEntryV1};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// How files bucket into datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingMode {
    /// One dataset per (catalog, study identifier) pair.
    PerStudy,
    /// Everything under one catalog and one dataset with a fixed key.
    SingleDataset { dataset: String },
}

/// How distribution subjects are derived from file paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionUriScheme {
    /// Full normalized path, separators replaced. Globally unique.
    FullPath,
    /// Basename only. Collides across directories; kept for compatibility
    /// with older exports.
    Basename,
}

/// Static catalog-level metadata.
#[derive(Debug, Clone)]
pub struct CatalogMetadata {
    pub publisher: String,
    pub language: String,
    /// Issue date as `YYYY-MM-DD`; today's date when unset.
    pub issued: Option<String>,
}

impl Default for CatalogMetadata {
    fn default() -> Self {
        CatalogMetadata {
            publisher: "Radiograph".to_string(),
            language: "en".to_string(),
            issued: None,
        }
    }
}

impl CatalogMetadata {
    pub(crate) fn issued_literal(&self) -> TypedLiteral {
        let raw = match &self.issued {
            Some(date) => date.clone(),
            None => chrono::Utc::now().date_naive().to_string(),
        };
        parse_iso_date(&raw).unwrap_or(TypedLiteral::Text(raw))
    }
}

fn parse_iso_date(raw: &str) -> Option<TypedLiteral> {
    let mut parts = raw.splitn(3, '-');
    let year: u16 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    Some(TypedLiteral::date(year, month, day))
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base for every subject IRI (no trailing slash).
    pub base_uri: String,
    pub grouping: GroupingMode,
    pub distribution_uri: DistributionUriScheme,
    /// Which normalized path segment names the catalog (0-based).
    pub catalog_path_index: usize,
    /// Supplied catalog name; overrides path derivation for every file.
    pub catalog_name: Option<String>,
    pub catalog_metadata: CatalogMetadata,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            base_uri: "http://example.org".to_string(),
            grouping: GroupingMode::PerStudy,
            distribution_uri: DistributionUriScheme::FullPath,
            catalog_path_index: 1,
            catalog_name: None,
            catalog_metadata: CatalogMetadata::default(),
        }
    }
}

/// Counters for one build run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub files_total: usize,
    pub files_mapped: usize,
    /// Parse-error entries carried through from extraction.
    pub files_errored: usize,
    /// Files whose path was too shallow to name a catalog.
    pub files_skipped: usize,
    pub cancelled: bool,
}

struct FileInput<'a> {
    file_path: &'a str,
    records: &'a [ExtractedRecord],
}

/// Build a graph from interchange entries.
pub fn build_graph(entries: &[ExtractionEntryV1], config: &PipelineConfig) -> (Graph, BuildReport) {
    let cancel = AtomicBool::new(false);
    build_graph_with_cancel(entries, config, &cancel)
}

/// Build with a caller-owned cancellation flag. When the flag is raised no
/// further files are dispatched; facts accumulated so far remain valid.
pub fn build_graph_with_cancel(
    entries: &[ExtractionEntryV1],
    config: &PipelineConfig,
    cancel: &AtomicBool,
) -> (Graph, BuildReport) {
    let mut report = BuildReport {
        files_total: entries.len(),
        ..BuildReport::default()
    };

    // Bucket files by grouping key. BTreeMap + path-sorted buckets keep the
    // "first file of the dataset" (title representative) stable across runs.
    let mut groups: BTreeMap<GroupKey, Vec<FileInput<'_>>> = BTreeMap::new();
    for entry in entries {
        let ExtractionEntryV1::Ok {
            file_path, dataset, ..
        } = entry
        else {
            report.files_errored += 1;
            continue;
        };
        let key = match &config.grouping {
            GroupingMode::PerStudy => {
                match derive_key(file_path, dataset, config) {
                    Some(key) => key,
                    None => {
                        debug!(file = %file_path, "path too shallow for catalog grouping, skipping");
                        report.files_skipped += 1;
                        continue;
                    }
                }
            }
            GroupingMode::SingleDataset { dataset: fixed } => GroupKey {
                catalog: config
                    .catalog_name
                    .clone()
                    .unwrap_or_else(|| "catalog".to_string()),
                dataset: fixed.clone(),
            },
        };
        groups.entry(key).or_default().push(FileInput {
            file_path: file_path.as_str(),
            records: dataset.as_slice(),
        });
    }
    for bucket in groups.values_mut() {
        bucket.sort_by_key(|f| f.file_path);
    }

    let mut graph = Graph::new();
    for (prefix, namespace) in vocab::default_prefixes() {
        graph.bind_prefix(prefix, namespace);
    }

    // Structural facts first (cheap, sequential, deterministic order), then
    // the per-file mapping in parallel.
    for (key, files) in &groups {
        emit_catalog(
            &mut graph,
            &config.base_uri,
            &key.catalog,
            &config.catalog_metadata,
        );
        emit_dataset(
            &mut graph,
            &config.base_uri,
            key,
            representative_title(files),
        );
    }

    let shared = Mutex::new(graph);
    let mapped = groups
        .par_iter()
        .map(|(key, files)| {
            let mut count = 0usize;
            for file in files {
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                let mut local = Graph::new();
                emit_distribution(
                    &mut local,
                    &config.base_uri,
                    key,
                    file.file_path,
                    file.records,
                    config.distribution_uri,
                );
                shared.lock().merge(local);
                count += 1;
            }
            count
        })
        .sum::<usize>();

    report.files_mapped = mapped;
    report.cancelled = cancel.load(Ordering::Relaxed);
    let graph = shared.into_inner();

    if report.files_errored > 0 {
        warn!(
            errored = report.files_errored,
            "carried parse-error entries through the build"
        );
    }
    info!(
        facts = graph.len(),
        mapped = report.files_mapped,
        skipped = report.files_skipped,
        cancelled = report.cancelled,
        "graph build finished"
    );

    (graph, report)
}

fn derive_key(
    file_path: &str,
    records: &[ExtractedRecord],
    config: &PipelineConfig,
) -> Option<GroupKey> {
    match &config.catalog_name {
        Some(name) => Some(GroupKey {
            catalog: name.clone(),
            dataset: crate::grouping::dataset_key(records),
        }),
        None => group(file_path, records, config.catalog_path_index),
    }
}

/// Study Description of the group's first file, if any.
fn representative_title<'a>(files: &'a [FileInput<'_>]) -> Option<&'a str> {
    let first = files.first()?;
    first
        .records
        .iter()
        .find(|r| r.name == "Study Description" && !r.value.is_null())
        .and_then(|r| match &r.value {
            radiograph_dicom::ScalarValue::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use radiograph_dicom::{ScalarValue, Tag, Vr};

    fn record(name: &str, vr: Vr, value: &str) -> ExtractedRecord {
        ExtractedRecord {
            tag: Tag(0, 0),
            vr,
            name: name.into(),
            value: ScalarValue::Text(value.into()),
        }
    }

    fn ok_entry(path: &str, records: Vec<ExtractedRecord>) -> ExtractionEntryV1 {
        ExtractionEntryV1::Ok {
            file_path: path.into(),
            file_meta: vec![],
            dataset: records,
        }
    }

    fn study(path: &str, uid: &str) -> ExtractionEntryV1 {
        ok_entry(
            path,
            vec![
                record("Study Instance UID", Vr::Ui, uid),
                record("Modality", Vr::Cs, "CT"),
            ],
        )
    }

    #[test]
    fn two_files_one_study_share_catalog_and_dataset() {
        let entries = vec![
            study("data/catalogA/study1/a.dcm", "S1"),
            study("data/catalogA/study1/b.dcm", "S1"),
        ];
        let (graph, report) = build_graph(&entries, &PipelineConfig::default());

        assert_eq!(report.files_mapped, 2);
        let catalogs: Vec<_> = graph
            .facts()
            .filter(|f| {
                f.predicate == vocab::RDF_TYPE
                    && f.object == crate::model::FactObject::iri(vocab::DCAT_CATALOG)
            })
            .collect();
        assert_eq!(catalogs.len(), 1);

        let datasets: Vec<_> = graph
            .facts()
            .filter(|f| f.predicate == vocab::DCAT_DATASET)
            .collect();
        assert_eq!(datasets.len(), 1);

        let distributions: Vec<_> = graph
            .facts()
            .filter(|f| f.predicate == vocab::DCAT_DISTRIBUTION)
            .collect();
        assert_eq!(distributions.len(), 2);
    }

    #[test]
    fn missing_study_identifier_groups_under_sentinel() {
        let entries = vec![ok_entry(
            "data/catalogB/study2/c.dcm",
            vec![record("Modality", Vr::Cs, "MR")],
        )];
        let (graph, _) = build_graph(&entries, &PipelineConfig::default());
        let dataset = crate::model::GraphNode::iri(
            "http://example.org/dataset/catalogB/unknown_study",
        );
        assert!(graph.has_subject(&dataset));
    }

    #[test]
    fn rebuilding_yields_identical_graphs() {
        let entries = vec![
            study("data/catA/s1/a.dcm", "S1"),
            study("data/catB/s2/b.dcm", "S2"),
            ExtractionEntryV1::Err {
                file_path: "data/catA/s1/broken.dcm".into(),
                error: "unreadable".into(),
            },
        ];
        let config = PipelineConfig {
            catalog_metadata: CatalogMetadata {
                issued: Some("2024-01-01".into()),
                ..CatalogMetadata::default()
            },
            ..PipelineConfig::default()
        };
        let (g1, r1) = build_graph(&entries, &config);
        let (g2, r2) = build_graph(&entries, &config);
        assert_eq!(g1, g2);
        assert_eq!(r1, r2);
        assert_eq!(r1.files_errored, 1);
    }

    #[test]
    fn shallow_paths_are_counted_not_fatal() {
        let entries = vec![study("orphan.dcm", "S9"), study("data/catA/s1/a.dcm", "S1")];
        let (graph, report) = build_graph(&entries, &PipelineConfig::default());
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.files_mapped, 1);
        assert!(!graph.is_empty());
    }

    #[test]
    fn single_dataset_mode_uses_supplied_names() {
        let entries = vec![
            study("a.dcm", "S1"),
            study("b.dcm", "S2"),
        ];
        let config = PipelineConfig {
            grouping: GroupingMode::SingleDataset {
                dataset: "dicom_dataset".into(),
            },
            catalog_name: Some("archive".into()),
            ..PipelineConfig::default()
        };
        let (graph, report) = build_graph(&entries, &config);
        assert_eq!(report.files_skipped, 0);
        assert_eq!(report.files_mapped, 2);
        assert!(graph.has_subject(&crate::model::GraphNode::iri(
            "http://example.org/dataset/archive/dicom_dataset"
        )));
    }

    #[test]
    fn pre_raised_cancel_flag_yields_structural_partial_graph() {
        let entries = vec![study("data/catA/s1/a.dcm", "S1")];
        let cancel = AtomicBool::new(true);
        let (graph, report) =
            build_graph_with_cancel(&entries, &PipelineConfig::default(), &cancel);
        assert!(report.cancelled);
        assert_eq!(report.files_mapped, 0);
        // Catalog/dataset structure is still a valid partial graph.
        assert!(graph.has_subject(&crate::model::GraphNode::iri(
            "http://example.org/catalog/catA"
        )));
    }
}
