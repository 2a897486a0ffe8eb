//! Batch extraction runner.
//!
//! Walks an input directory, parses each element dump through the parser
//! seam, flattens, and collects interchange entries. A file that fails to
//! parse is recorded as an error entry and the batch continues; there is no
//! retry and no batch-level abort.

use crate::flatten::flatten_tree;
use crate::interchange::ExtractionEntryV1;
use anyhow::{Context, Result};
use radiograph_dicom::{json_dump, SourceFile};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// File extension of element dumps in the input directory.
    pub extension: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            extension: "json".to_string(),
        }
    }
}

/// Flatten one parsed source file into an interchange entry.
pub fn extract_source_file(file_path: &str, source: &SourceFile) -> ExtractionEntryV1 {
    ExtractionEntryV1::Ok {
        file_path: file_path.to_string(),
        file_meta: flatten_tree(&source.file_meta),
        dataset: flatten_tree(&source.dataset),
    }
}

/// Walk `root` and extract every matching file, in path order.
///
/// Paths in the resulting entries are relative to the walk root's parent so
/// the root directory name itself stays part of the path (it participates in
/// catalog grouping downstream).
pub fn extract_directory(root: &Path, options: &ExtractOptions) -> Result<Vec<ExtractionEntryV1>> {
    let mut entries = Vec::new();
    let base = root.parent().unwrap_or(root);

    let mut paths: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&options.extension))
        })
        .collect();
    paths.sort();

    for path in paths {
        let display_path = path
            .strip_prefix(base)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        debug!(file = %display_path, "extracting");

        let entry = match std::fs::read(&path)
            .with_context(|| format!("read {}", path.display()))
        {
            Ok(bytes) => match json_dump::parse_source_file(&bytes) {
                Ok(source) => extract_source_file(&display_path, &source),
                Err(err) => {
                    warn!(file = %display_path, error = %err, "parse failed, recording error entry");
                    ExtractionEntryV1::Err {
                        file_path: display_path,
                        error: err.to_string(),
                    }
                }
            },
            Err(err) => {
                warn!(file = %display_path, error = %err, "read failed, recording error entry");
                ExtractionEntryV1::Err {
                    file_path: display_path,
                    error: err.to_string(),
                }
            }
        };
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const GOOD: &str = r#"{"Dataset": [
        {"Tag": "(0008,0060)", "VR": "CS", "Name": "Modality", "Value": "CT"}
    ]}"#;

    #[test]
    fn records_errors_and_continues() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("scans");
        fs::create_dir_all(root.join("catA/s1")).expect("mkdirs");
        fs::write(root.join("catA/s1/a.json"), GOOD).expect("write good");
        fs::write(root.join("catA/s1/b.json"), "not json").expect("write bad");
        fs::write(root.join("catA/s1/notes.txt"), "ignored").expect("write other");

        let entries = extract_directory(&root, &ExtractOptions::default()).expect("extract");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_ok());
        assert!(!entries[1].is_ok());
        assert!(entries[0].file_path().starts_with("scans/catA/s1/"));
    }

    #[test]
    fn walks_in_stable_path_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("scans");
        fs::create_dir_all(root.join("catB")).expect("mkdirs");
        fs::create_dir_all(root.join("catA")).expect("mkdirs");
        fs::write(root.join("catB/z.json"), GOOD).expect("write");
        fs::write(root.join("catA/a.json"), GOOD).expect("write");

        let entries = extract_directory(&root, &ExtractOptions::default()).expect("extract");
        let paths: Vec<&str> = entries.iter().map(|e| e.file_path()).collect();
        assert_eq!(paths, vec!["scans/catA/a.json", "scans/catB/z.json"]);
    }
}
