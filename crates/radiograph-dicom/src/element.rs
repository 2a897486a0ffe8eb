//! The element tree: one named, typed unit of source metadata per element,
//! nesting via sequence-typed elements.
//!
//! Invariant: `ElementValue::Sequence` appears exactly when the element's VR
//! is `SQ`; all other VRs carry a scalar or a byte blob. Consumers pattern-
//! match on the value and fall back to lossy stringification for shapes they
//! don't handle.

use crate::{Tag, Vr};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar element value as it appears in metadata dumps.
///
/// Multi-valued attributes (value multiplicity > 1) surface as `List`; the
/// flattener renders them into a single bracketed string, which downstream
/// coercion deliberately leaves untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ScalarValue>),
}

impl ScalarValue {
    /// Lossy display form, mirroring how list and null values are
    /// stringified in extraction output.
    pub fn to_display_string(&self) -> String {
        match self {
            ScalarValue::Null => String::new(),
            ScalarValue::Int(v) => v.to_string(),
            ScalarValue::Float(v) => v.to_string(),
            ScalarValue::Text(s) => s.clone(),
            ScalarValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_display_string()).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

/// The payload of one element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Scalar(ScalarValue),
    /// Raw bytes (OB/OW/UN payloads). Decoded permissively when flattened:
    /// undecodable bytes are replaced, never fatal.
    Blob(Vec<u8>),
    /// Nested item trees (VR `SQ`).
    Sequence(Vec<ElementTree>),
}

/// One named, typed element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub vr: Vr,
    pub name: String,
    pub value: ElementValue,
}

impl Element {
    pub fn scalar(tag: Tag, vr: Vr, name: impl Into<String>, value: ScalarValue) -> Self {
        Element {
            tag,
            vr,
            name: name.into(),
            value: ElementValue::Scalar(value),
        }
    }

    pub fn text(tag: Tag, vr: Vr, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::scalar(tag, vr, name, ScalarValue::Text(value.into()))
    }

    pub fn sequence(tag: Tag, name: impl Into<String>, items: Vec<ElementTree>) -> Self {
        Element {
            tag,
            vr: Vr::Sq,
            name: name.into(),
            value: ElementValue::Sequence(items),
        }
    }
}

/// An ordered sequence of elements: one source record, or one sequence item.
pub type ElementTree = Vec<Element>;

/// One parsed source file: the file-meta group and the main dataset, kept
/// separate the way the interchange artifact expects them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    pub file_meta: ElementTree,
    pub dataset: ElementTree,
}
