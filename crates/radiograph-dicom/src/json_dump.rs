//! JSON element-dump adapter (default parser-seam implementation).
//!
//! External extractors dump one file's metadata as nested
//! `{Tag, VR, Name, Value}` objects, where `Value` is a scalar for ordinary
//! elements and an array of item arrays for sequences:
//!
//! ```json
//! {
//!   "FileMeta": [ {"Tag": "(0002,0010)", "VR": "UI", "Name": "...", "Value": "..."} ],
//!   "Dataset": [
//!     {"Tag": "(0008,0060)", "VR": "CS", "Name": "Modality", "Value": "CT"},
//!     {"Tag": "(0008,1032)", "VR": "SQ", "Name": "Procedure Code Sequence",
//!      "Value": [[ {"Tag": "(0008,0100)", "VR": "SH", "Name": "Code Value", "Value": "X"} ]]}
//!   ]
//! }
//! ```
//!
//! This module converts that untrusted shape into the typed element model.
//! It never guesses: a `SQ` element whose value is not an item array is a
//! `ValueShape` error, everything else follows the declared JSON type.

use crate::{Element, ElementTree, ElementValue, ScalarValue, SourceFile, SourceParseError, Tag, Vr};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawDump {
    #[serde(rename = "FileMeta", default)]
    file_meta: Vec<RawElement>,
    #[serde(rename = "Dataset", default)]
    dataset: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "Tag")]
    tag: Tag,
    #[serde(rename = "VR")]
    vr: Vr,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value", default)]
    value: Value,
}

/// Parse one file's element dump.
pub fn parse_source_file(bytes: &[u8]) -> Result<SourceFile, SourceParseError> {
    let raw: RawDump = serde_json::from_slice(bytes)
        .map_err(|e| SourceParseError::MalformedDump(e.to_string()))?;
    Ok(SourceFile {
        file_meta: convert_tree(raw.file_meta)?,
        dataset: convert_tree(raw.dataset)?,
    })
}

fn convert_tree(raw: Vec<RawElement>) -> Result<ElementTree, SourceParseError> {
    raw.into_iter().map(convert_element).collect()
}

fn convert_element(raw: RawElement) -> Result<Element, SourceParseError> {
    let value = if raw.vr.is_sequence() {
        let Value::Array(items) = raw.value else {
            return Err(SourceParseError::ValueShape {
                tag: raw.tag,
                vr: raw.vr,
            });
        };
        let mut trees: Vec<ElementTree> = Vec::with_capacity(items.len());
        for item in items {
            let Value::Array(elems) = item else {
                return Err(SourceParseError::ValueShape {
                    tag: raw.tag,
                    vr: raw.vr,
                });
            };
            let raw_elems: Vec<RawElement> = elems
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()
                .map_err(|e| SourceParseError::MalformedDump(e.to_string()))?;
            trees.push(convert_tree(raw_elems)?);
        }
        ElementValue::Sequence(trees)
    } else {
        ElementValue::Scalar(convert_scalar(raw.value))
    };

    Ok(Element {
        tag: raw.tag,
        vr: raw.vr,
        name: raw.name,
        value,
    })
}

fn convert_scalar(value: Value) -> ScalarValue {
    match value {
        Value::Null => ScalarValue::Null,
        Value::Bool(b) => ScalarValue::Text(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ScalarValue::Int(i)
            } else {
                ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => ScalarValue::Text(s),
        Value::Array(items) => ScalarValue::List(items.into_iter().map(convert_scalar).collect()),
        // Objects have no scalar reading; keep a lossy rendering rather than fail.
        other @ Value::Object(_) => ScalarValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "FileMeta": [
            {"Tag": "(0002,0010)", "VR": "UI", "Name": "Transfer Syntax UID", "Value": "1.2.840.10008.1.2"}
        ],
        "Dataset": [
            {"Tag": "(0008,0060)", "VR": "CS", "Name": "Modality", "Value": "CT"},
            {"Tag": "(0028,0010)", "VR": "US", "Name": "Rows", "Value": 512},
            {"Tag": "(0020,0032)", "VR": "DS", "Name": "Image Position (Patient)",
             "Value": ["-158.1", "-179.7", "70.5"]},
            {"Tag": "(0008,1032)", "VR": "SQ", "Name": "Procedure Code Sequence",
             "Value": [[{"Tag": "(0008,0100)", "VR": "SH", "Name": "Code Value", "Value": "X123"}]]}
        ]
    }"#;

    #[test]
    fn parses_scalars_lists_and_sequences() {
        let file = parse_source_file(DUMP.as_bytes()).expect("parse dump");
        assert_eq!(file.file_meta.len(), 1);
        assert_eq!(file.dataset.len(), 4);

        assert_eq!(
            file.dataset[0].value,
            ElementValue::Scalar(ScalarValue::Text("CT".into()))
        );
        assert_eq!(
            file.dataset[1].value,
            ElementValue::Scalar(ScalarValue::Int(512))
        );
        assert!(matches!(
            file.dataset[2].value,
            ElementValue::Scalar(ScalarValue::List(ref items)) if items.len() == 3
        ));
        let ElementValue::Sequence(ref items) = file.dataset[3].value else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0][0].name, "Code Value");
    }

    #[test]
    fn sequence_with_scalar_value_is_a_shape_error() {
        let dump = r#"{"Dataset": [
            {"Tag": "(0008,1032)", "VR": "SQ", "Name": "Procedure Code Sequence", "Value": "oops"}
        ]}"#;
        let err = parse_source_file(dump.as_bytes()).expect_err("shape error");
        assert!(matches!(err, SourceParseError::ValueShape { .. }));
    }

    #[test]
    fn invalid_json_is_a_malformed_dump() {
        let err = parse_source_file(b"not json").expect_err("malformed");
        assert!(matches!(err, SourceParseError::MalformedDump(_)));
    }
}
