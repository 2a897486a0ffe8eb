//! DICOM element-tree model for Radiograph (boundary types).
//!
//! This crate defines the in-memory representation of one source record (an
//! ordered sequence of named, typed elements, where sequence-typed elements
//! recursively contain nested sub-trees) together with the contract every
//! metadata parser must satisfy:
//!
//! ```text
//! parse(file_bytes) -> SourceFile | SourceParseError
//! ```
//!
//! The actual binary DICOM decoder lives outside this repository. What ships
//! here is the typed model plus a JSON element-dump adapter
//! ([`json_dump`]) that reads the documented `{Tag, VR, Name, Value}` dump
//! shape emitted by external extractors.

pub mod element;
pub mod json_dump;
pub mod tag;
pub mod vr;

pub use element::{Element, ElementTree, ElementValue, ScalarValue, SourceFile};
pub use tag::Tag;
pub use vr::Vr;

use thiserror::Error;

/// Failure to turn raw file bytes into an element tree.
///
/// Per-file and non-fatal: the batch runner records the message next to the
/// file path and moves on to the next file.
#[derive(Debug, Error)]
pub enum SourceParseError {
    #[error("malformed element dump: {0}")]
    MalformedDump(String),

    #[error("element {tag} declares VR {vr} but carries an incompatible value")]
    ValueShape { tag: Tag, vr: Vr },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
