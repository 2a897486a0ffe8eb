//! DICOM metadata extraction for Radiograph (first pipeline stage).
//!
//! This crate turns parsed element trees into the flat, allow-list-filtered
//! extraction artifact consumed by graph assembly:
//!
//! - [`tags`]: the fixed include set (patient / study / series / instance /
//!   acquisition-parameter attributes) and the unconditional pixel-data
//!   exclusion.
//! - [`flatten`]: the recursive filter-and-flatten walk producing ordered
//!   [`ExtractedRecord`]s.
//! - [`interchange`]: the stable per-run JSON artifact
//!   (`[{FilePath, FileMeta, Dataset} | {FilePath, Error}]`) that lets
//!   extraction and graph assembly run as separate processes.
//! - [`extract`]: the batch runner: walk a directory, parse each dump,
//!   flatten, and record per-file failures without aborting the batch.

pub mod extract;
pub mod flatten;
pub mod interchange;
pub mod tags;

pub use extract::{extract_directory, extract_source_file, ExtractOptions};
pub use flatten::{flatten_tree, ExtractedRecord};
pub use interchange::{read_interchange, write_interchange, ExtractionEntryV1};
