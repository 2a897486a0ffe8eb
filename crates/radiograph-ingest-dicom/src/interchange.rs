//! The per-run interchange artifact.
//!
//! Extraction and graph assembly communicate through a JSON array of
//! per-file entries:
//!
//! ```json
//! [
//!   {"FilePath": "data/catA/s1/a.dcm", "FileMeta": [...], "Dataset": [...]},
//!   {"FilePath": "data/catA/s1/broken.dcm", "Error": "malformed element dump: ..."}
//! ]
//! ```
//!
//! The two stages may run as separate processes, so the field names and the
//! ok/error entry shapes are frozen. New fields may be added, existing ones
//! never renamed.

use crate::flatten::ExtractedRecord;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One file's extraction result.
///
/// Variant order matters: untagged deserialization tries `Err` first, since
/// an `Ok` with both record lists defaulted would otherwise swallow error
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionEntryV1 {
    Err {
        #[serde(rename = "FilePath")]
        file_path: String,
        #[serde(rename = "Error")]
        error: String,
    },
    Ok {
        #[serde(rename = "FilePath")]
        file_path: String,
        #[serde(rename = "FileMeta", default)]
        file_meta: Vec<ExtractedRecord>,
        #[serde(rename = "Dataset", default)]
        dataset: Vec<ExtractedRecord>,
    },
}

impl ExtractionEntryV1 {
    pub fn file_path(&self) -> &str {
        match self {
            ExtractionEntryV1::Ok { file_path, .. } => file_path,
            ExtractionEntryV1::Err { file_path, .. } => file_path,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ExtractionEntryV1::Ok { .. })
    }
}

/// Write the artifact (pretty-printed, matching the reference extractor).
pub fn write_interchange<W: Write>(
    writer: W,
    entries: &[ExtractionEntryV1],
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, entries)
}

/// Read an artifact produced by [`write_interchange`] or any compatible
/// external extractor.
pub fn read_interchange<R: Read>(reader: R) -> serde_json::Result<Vec<ExtractionEntryV1>> {
    serde_json::from_reader(reader)
}
