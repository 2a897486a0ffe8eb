//! Hierarchical grouping: file path + records → (catalog key, dataset key).
//!
//! Catalog keys come from a positional path segment (index 1, the second
//! segment, by default; the walk root is segment 0). The index is
//! configuration, not a constant, because the positional rule is known to be
//! fragile across archive layouts. Dataset keys come from the study
//! identifier record, with a fixed sentinel when absent.
//!
//! Grouping is a pure function of its inputs; the same `(path, records)`
//! always yields the same keys, which is what makes regeneration
//! reproducible.

use radiograph_ingest_dicom::ExtractedRecord;

/// Dataset key for files whose records carry no study identifier.
pub const UNKNOWN_STUDY: &str = "unknown_study";

/// Element name carrying the study identifier.
const STUDY_IDENTIFIER_NAME: &str = "Study Instance UID";

/// The two-level grouping key. Identity is the *pair*: the same study
/// identifier under two catalogs is two distinct datasets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub catalog: String,
    pub dataset: String,
}

/// Separator-normalized path segments (empty segments dropped, so leading
/// slashes and doubled separators don't shift the index).
pub fn path_segments(file_path: &str) -> Vec<&str> {
    file_path
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect()
}

/// Catalog key: the path segment at `catalog_index`. Paths too shallow to
/// have that segment are skipped (`None`): excluded from every catalog,
/// counted but not an error. The rule is positional and deliberately naive;
/// whatever sits at the index names the catalog.
pub fn catalog_key(file_path: &str, catalog_index: usize) -> Option<String> {
    let segments = path_segments(file_path);
    segments.get(catalog_index).map(|s| s.to_string())
}

/// Dataset key: the study identifier record's value, else the sentinel.
pub fn dataset_key(records: &[ExtractedRecord]) -> String {
    records
        .iter()
        .find(|r| r.name == STUDY_IDENTIFIER_NAME && !r.value.is_null())
        .map(|r| r.value.to_display_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN_STUDY.to_string())
}

/// Derive the full grouping key for one file.
pub fn group(
    file_path: &str,
    records: &[ExtractedRecord],
    catalog_index: usize,
) -> Option<GroupKey> {
    let catalog = catalog_key(file_path, catalog_index)?;
    Some(GroupKey {
        catalog,
        dataset: dataset_key(records),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use radiograph_dicom::{ScalarValue, Tag, Vr};

    fn study_uid(value: &str) -> ExtractedRecord {
        ExtractedRecord {
            tag: Tag(0x0020, 0x000D),
            vr: Vr::Ui,
            name: "Study Instance UID".into(),
            value: ScalarValue::Text(value.into()),
        }
    }

    #[test]
    fn catalog_is_the_second_segment_by_default() {
        assert_eq!(
            catalog_key("data/catalogA/study1/a.dcm", 1),
            Some("catalogA".into())
        );
    }

    #[test]
    fn shallow_paths_are_skipped() {
        assert_eq!(catalog_key("a.dcm", 1), None);
        assert_eq!(catalog_key("", 1), None);
        // The positional rule takes whatever sits at the index, even a
        // two-segment path where that is the file itself.
        assert_eq!(catalog_key("data/a.dcm", 1), Some("a.dcm".into()));
    }

    #[test]
    fn separators_and_duplicates_normalize() {
        assert_eq!(
            catalog_key("data\\catalogA\\study1\\a.dcm", 1),
            Some("catalogA".into())
        );
        assert_eq!(
            catalog_key("/data//catalogA/a.dcm", 1),
            Some("catalogA".into())
        );
    }

    #[test]
    fn missing_study_identifier_uses_sentinel() {
        assert_eq!(dataset_key(&[]), UNKNOWN_STUDY);
        let mut r = study_uid("");
        r.value = ScalarValue::Null;
        assert_eq!(dataset_key(&[r]), UNKNOWN_STUDY);
    }

    #[test]
    fn study_identifier_wins_when_present() {
        assert_eq!(dataset_key(&[study_uid("1.2.3.4")]), "1.2.3.4");
    }

    #[test]
    fn grouping_is_deterministic() {
        let records = vec![study_uid("1.2.3.4")];
        let a = group("data/catA/s/f.dcm", &records, 1);
        let b = group("data/catA/s/f.dcm", &records, 1);
        assert_eq!(a, b);
        assert_eq!(
            a,
            Some(GroupKey {
                catalog: "catA".into(),
                dataset: "1.2.3.4".into()
            })
        );
    }
}
