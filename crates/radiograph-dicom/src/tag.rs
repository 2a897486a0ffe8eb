//! DICOM attribute tags.
//!
//! A tag is a 32-bit code split into a 16-bit group and a 16-bit element
//! sub-code, rendered `(GGGG,EEEE)` in uppercase hex for diagnostics and for
//! the JSON dump format.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A DICOM attribute tag: `(group, element)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u16, pub u16);

impl Tag {
    pub const fn group(self) -> u16 {
        self.0
    }

    pub const fn element(self) -> u16 {
        self.1
    }

    /// The packed 32-bit form (`GGGGEEEE`).
    pub const fn as_u32(self) -> u32 {
        ((self.0 as u32) << 16) | self.1 as u32
    }

    pub const fn from_u32(code: u32) -> Self {
        Tag((code >> 16) as u16, (code & 0xFFFF) as u16)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

#[derive(Debug, Error)]
#[error("invalid tag literal `{0}`, expected `(GGGG,EEEE)`")]
pub struct TagParseError(pub String);

impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .ok_or_else(|| TagParseError(s.to_string()))?;
        let (group, element) = inner
            .split_once(',')
            .ok_or_else(|| TagParseError(s.to_string()))?;
        let group =
            u16::from_str_radix(group.trim(), 16).map_err(|_| TagParseError(s.to_string()))?;
        let element =
            u16::from_str_radix(element.trim(), 16).map_err(|_| TagParseError(s.to_string()))?;
        Ok(Tag(group, element))
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// Well-known tags
// ============================================================================

/// Pixel Data, excluded from extraction unconditionally to keep output
/// size bounded.
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Study Instance UID: the study identifier used as the dataset grouping key.
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);

/// Study Description: used as the representative dataset title.
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_group_element_hex() {
        assert_eq!(Tag(0x0008, 0x0060).to_string(), "(0008,0060)");
        assert_eq!(PIXEL_DATA.to_string(), "(7FE0,0010)");
    }

    #[test]
    fn parses_rendered_form() {
        let tag: Tag = "(0020,000D)".parse().expect("parse tag");
        assert_eq!(tag, STUDY_INSTANCE_UID);
        assert_eq!(tag.group(), 0x0020);
        assert_eq!(tag.element(), 0x000D);
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!("0020,000D".parse::<Tag>().is_err());
        assert!("(0020000D)".parse::<Tag>().is_err());
        assert!("(00GG,000D)".parse::<Tag>().is_err());
    }

    #[test]
    fn packs_and_unpacks_32_bit_code() {
        let tag = Tag(0x0018, 0x1151);
        assert_eq!(Tag::from_u32(tag.as_u32()), tag);
        assert_eq!(tag.as_u32(), 0x0018_1151);
    }
}
