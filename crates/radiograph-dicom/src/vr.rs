//! Value representations (the DICOM type codes).
//!
//! The coercion pipeline only distinguishes a handful of categories (numeric,
//! date, time, sequence, everything-else), but we keep the full two-letter
//! code so the interchange artifact round-trips what the parser saw.
//! Codes outside the standard set are preserved verbatim in `Unknown`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vr {
    /// Application Entity
    Ae,
    /// Age String
    As,
    /// Attribute Tag
    At,
    /// Code String
    Cs,
    /// Date (`YYYYMMDD`)
    Da,
    /// Decimal String
    Ds,
    /// Date Time
    Dt,
    /// Floating Point Double
    Fd,
    /// Floating Point Single
    Fl,
    /// Integer String
    Is,
    /// Long String
    Lo,
    /// Long Text
    Lt,
    /// Other Byte
    Ob,
    /// Other Double
    Od,
    /// Other Float
    Of,
    /// Other Word
    Ow,
    /// Person Name
    Pn,
    /// Short String
    Sh,
    /// Signed Long
    Sl,
    /// Sequence of Items
    Sq,
    /// Signed Short
    Ss,
    /// Short Text
    St,
    /// Time (`HHMMSS[.FFFFFF]`)
    Tm,
    /// Unique Identifier
    Ui,
    /// Unsigned Long
    Ul,
    /// Unknown (DICOM UN)
    Un,
    /// Unsigned Short
    Us,
    /// Unlimited Text
    Ut,
    /// Any code outside the standard set, preserved verbatim.
    Unknown(String),
}

impl Vr {
    pub fn as_str(&self) -> &str {
        match self {
            Vr::Ae => "AE",
            Vr::As => "AS",
            Vr::At => "AT",
            Vr::Cs => "CS",
            Vr::Da => "DA",
            Vr::Ds => "DS",
            Vr::Dt => "DT",
            Vr::Fd => "FD",
            Vr::Fl => "FL",
            Vr::Is => "IS",
            Vr::Lo => "LO",
            Vr::Lt => "LT",
            Vr::Ob => "OB",
            Vr::Od => "OD",
            Vr::Of => "OF",
            Vr::Ow => "OW",
            Vr::Pn => "PN",
            Vr::Sh => "SH",
            Vr::Sl => "SL",
            Vr::Sq => "SQ",
            Vr::Ss => "SS",
            Vr::St => "ST",
            Vr::Tm => "TM",
            Vr::Ui => "UI",
            Vr::Ul => "UL",
            Vr::Un => "UN",
            Vr::Us => "US",
            Vr::Ut => "UT",
            Vr::Unknown(code) => code,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "AE" => Vr::Ae,
            "AS" => Vr::As,
            "AT" => Vr::At,
            "CS" => Vr::Cs,
            "DA" => Vr::Da,
            "DS" => Vr::Ds,
            "DT" => Vr::Dt,
            "FD" => Vr::Fd,
            "FL" => Vr::Fl,
            "IS" => Vr::Is,
            "LO" => Vr::Lo,
            "LT" => Vr::Lt,
            "OB" => Vr::Ob,
            "OD" => Vr::Od,
            "OF" => Vr::Of,
            "OW" => Vr::Ow,
            "PN" => Vr::Pn,
            "SH" => Vr::Sh,
            "SL" => Vr::Sl,
            "SQ" => Vr::Sq,
            "SS" => Vr::Ss,
            "ST" => Vr::St,
            "TM" => Vr::Tm,
            "UI" => Vr::Ui,
            "UL" => Vr::Ul,
            "UN" => Vr::Un,
            "US" => Vr::Us,
            "UT" => Vr::Ut,
            other => Vr::Unknown(other.to_string()),
        }
    }

    /// Whether values under this VR are attempted as numbers by the coercer.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Vr::Ds | Vr::Is | Vr::Fl | Vr::Fd | Vr::Sl | Vr::Ss | Vr::Ul | Vr::Us
        )
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Vr::Sq)
    }
}

impl fmt::Display for Vr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Vr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Vr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Vr::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_standard_codes() {
        for code in ["DS", "IS", "DA", "TM", "SQ", "PN", "UI"] {
            assert_eq!(Vr::from_code(code).as_str(), code);
        }
    }

    #[test]
    fn preserves_unrecognized_codes() {
        let vr = Vr::from_code("ZZ");
        assert_eq!(vr, Vr::Unknown("ZZ".to_string()));
        assert_eq!(vr.as_str(), "ZZ");
    }

    #[test]
    fn numeric_category_covers_decimal_and_integer_strings() {
        assert!(Vr::Ds.is_numeric());
        assert!(Vr::Is.is_numeric());
        assert!(Vr::Us.is_numeric());
        assert!(!Vr::Da.is_numeric());
        assert!(!Vr::Sq.is_numeric());
    }
}
