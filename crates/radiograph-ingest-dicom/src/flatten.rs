//! Tag filtering and tree flattening.
//!
//! Walks an element tree in source order, keeps allow-listed elements, and
//! expands sequences recursively by splicing each item's flattened records
//! inline. The output is a flat list: records that came from different
//! sequence items are ordinary siblings with no structural marker. That loss
//! of nesting is deliberate and relied upon downstream; do not "fix" it here.

use crate::tags::is_included;
use radiograph_dicom::{ElementTree, ElementValue, ScalarValue, Tag, Vr};
use serde::{Deserialize, Serialize};

/// One flattened, allow-list-filtered metadata record.
///
/// Field names are part of the interchange contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "Tag")]
    pub tag: Tag,
    #[serde(rename = "VR")]
    pub vr: Vr,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: ScalarValue,
}

/// Flatten one element tree into ordered extracted records.
pub fn flatten_tree(tree: &ElementTree) -> Vec<ExtractedRecord> {
    let mut out = Vec::new();
    flatten_into(tree, &mut out);
    out
}

fn flatten_into(tree: &ElementTree, out: &mut Vec<ExtractedRecord>) {
    for element in tree {
        if !is_included(element.tag) {
            continue;
        }
        match &element.value {
            ElementValue::Sequence(items) => {
                for item in items {
                    flatten_into(item, out);
                }
            }
            ElementValue::Scalar(scalar) => {
                out.push(record(element.tag, &element.vr, &element.name, flatten_scalar(scalar)));
            }
            ElementValue::Blob(bytes) => {
                // Permissive decode: undecodable bytes are replaced, never fatal.
                let text = String::from_utf8_lossy(bytes).into_owned();
                out.push(record(element.tag, &element.vr, &element.name, ScalarValue::Text(text)));
            }
        }
    }
}

fn record(tag: Tag, vr: &Vr, name: &str, value: ScalarValue) -> ExtractedRecord {
    ExtractedRecord {
        tag,
        vr: vr.clone(),
        name: name.to_string(),
        value,
    }
}

/// Multi-valued scalars are rendered to one bracketed string; everything else
/// passes through unchanged.
fn flatten_scalar(scalar: &ScalarValue) -> ScalarValue {
    match scalar {
        ScalarValue::List(_) => ScalarValue::Text(scalar.to_display_string()),
        other => other.clone(),
    }
}
