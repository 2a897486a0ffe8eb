//! Value coercion: raw record value + VR → [`TypedLiteral`].
//!
//! Coercion is total. Medical-image metadata is irregular enough that a
//! strict parser would reject half of real-world archives, so every failure
//! path degrades to `Text` holding the original string form and the pipeline
//! keeps going.

use crate::model::TypedLiteral;
use radiograph_dicom::{ScalarValue, Vr};

/// Coerce one extracted value under its declared VR.
pub fn coerce(value: &ScalarValue, vr: &Vr) -> TypedLiteral {
    if vr.is_numeric() {
        return coerce_numeric(value);
    }
    match vr {
        Vr::Da => coerce_date(value),
        Vr::Tm => TypedLiteral::Time(value.to_display_string()),
        _ => TypedLiteral::Text(value.to_display_string()),
    }
}

/// Numeric VRs: already-typed dump values pass straight through; strings are
/// parsed, except bracketed list renderings which stay text (lists are never
/// decomposed into multiple literals).
fn coerce_numeric(value: &ScalarValue) -> TypedLiteral {
    match value {
        ScalarValue::Int(v) => TypedLiteral::Integer(*v),
        ScalarValue::Float(v) if v.is_finite() => TypedLiteral::Decimal(*v),
        _ => {
            let text = value.to_display_string();
            let trimmed = text.trim();
            if trimmed.starts_with('[') {
                return TypedLiteral::Text(text);
            }
            if trimmed.contains('.') {
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => TypedLiteral::Decimal(v),
                    _ => TypedLiteral::Text(text),
                }
            } else {
                match trimmed.parse::<i64>() {
                    Ok(v) => TypedLiteral::Integer(v),
                    Err(_) => TypedLiteral::Text(text),
                }
            }
        }
    }
}

/// `DA` values: exactly eight digits reformat `YYYYMMDD` → `YYYY-MM-DD`;
/// anything else passes through unchanged as text.
fn coerce_date(value: &ScalarValue) -> TypedLiteral {
    let text = value.to_display_string();
    let trimmed = text.trim();
    if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let year: u16 = trimmed[0..4].parse().unwrap_or(0);
        let month: u8 = trimmed[4..6].parse().unwrap_or(0);
        let day: u8 = trimmed[6..8].parse().unwrap_or(0);
        return TypedLiteral::date(year, month, day);
    }
    TypedLiteral::Text(text)
}
