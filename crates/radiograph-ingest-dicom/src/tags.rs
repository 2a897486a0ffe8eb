//! The extraction allow-list.
//!
//! Only attributes in this set survive flattening; everything else is dropped
//! at the gate, including sequences whose own tag is not listed. Pixel Data
//! is excluded unconditionally regardless of list membership.

use radiograph_dicom::tag::PIXEL_DATA;
use radiograph_dicom::Tag;

/// Attributes retained by extraction, grouped by level.
pub const INCLUDE_TAGS: &[Tag] = &[
    // ----------------- Patient level -----------------
    Tag(0x0010, 0x0010), // Patient's Name
    Tag(0x0010, 0x0020), // Patient ID
    Tag(0x0010, 0x0040), // Patient's Sex
    Tag(0x0010, 0x1010), // Patient's Age
    Tag(0x0010, 0x2160), // Ethnic Group
    Tag(0x0010, 0x4000), // Patient Comments
    Tag(0x0010, 0x21B0), // Additional Patient History
    // ----------------- Study level -----------------
    Tag(0x0020, 0x000D), // Study Instance UID
    Tag(0x0008, 0x0020), // Study Date
    Tag(0x0008, 0x0030), // Study Time
    Tag(0x0008, 0x0050), // Accession Number
    Tag(0x0008, 0x1030), // Study Description
    Tag(0x0008, 0x1040), // Institutional Department Name
    Tag(0x0008, 0x0080), // Institution Name
    Tag(0x0008, 0x0060), // Modality
    Tag(0x0008, 0x0070), // Manufacturer
    Tag(0x0008, 0x1090), // Manufacturer's Model Name
    // ----------------- Series level -----------------
    Tag(0x0020, 0x000E), // Series Instance UID
    Tag(0x0008, 0x0021), // Series Date
    Tag(0x0008, 0x0031), // Series Time
    Tag(0x0020, 0x0011), // Series Number
    Tag(0x0008, 0x103E), // Series Description
    // ----------------- Instance level -----------------
    Tag(0x0008, 0x0018), // SOP Instance UID
    Tag(0x0020, 0x0013), // Instance Number
    Tag(0x0008, 0x0022), // Acquisition Date
    Tag(0x0008, 0x0032), // Acquisition Time
    Tag(0x0020, 0x0032), // Image Position (Patient)
    Tag(0x0020, 0x0037), // Image Orientation (Patient)
    Tag(0x0028, 0x0010), // Rows
    Tag(0x0028, 0x0011), // Columns
    // ----------------- Acquisition parameters -----------------
    Tag(0x0018, 0x0010), // Contrast/Bolus Agent
    Tag(0x0018, 0x0015), // Body Part Examined
    Tag(0x0018, 0x0022), // Scan Options
    Tag(0x0018, 0x0050), // Slice Thickness
    Tag(0x0018, 0x0060), // KVP
    Tag(0x0018, 0x0090), // Data Collection Diameter
    Tag(0x0018, 0x1020), // Software Versions
    Tag(0x0018, 0x1030), // Protocol Name
    Tag(0x0018, 0x1040), // Contrast/Bolus Route
    Tag(0x0018, 0x1100), // Reconstruction Diameter
    Tag(0x0018, 0x1110), // Distance Source to Detector
    Tag(0x0018, 0x1111), // Distance Source to Patient
    Tag(0x0018, 0x1120), // Gantry/Detector Tilt
    Tag(0x0018, 0x1130), // Table Height
    Tag(0x0018, 0x1140), // Rotation Direction
    Tag(0x0018, 0x1150), // Exposure Time
    Tag(0x0018, 0x1151), // X-Ray Tube Current
    Tag(0x0018, 0x1152), // Exposure
    Tag(0x0018, 0x1160), // Filter Type
    Tag(0x0018, 0x1170), // Generator Power
    Tag(0x0018, 0x1190), // Focal Spot(s)
    Tag(0x0018, 0x1210), // Convolution Kernel
    Tag(0x0018, 0x5100), // Patient Position
    Tag(0x0018, 0x9305), // Revolution Time
    Tag(0x0018, 0x9306), // Single Collimation Width
    Tag(0x0018, 0x9307), // Total Collimation Width
    Tag(0x0018, 0x9309), // Table Speed
    Tag(0x0018, 0x9310), // Table Feed per Rotation
    Tag(0x0018, 0x9311), // Spiral Pitch Factor
    // ----------------- Others -----------------
    Tag(0x0032, 0x1030), // Reason for Study
    Tag(0x0032, 0x4000), // Study Comments
];

/// The allow-list gate: listed and not Pixel Data.
pub fn is_included(tag: Tag) -> bool {
    tag != PIXEL_DATA && INCLUDE_TAGS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pixel_data_is_always_excluded() {
        assert!(!is_included(PIXEL_DATA));
    }

    #[test]
    fn include_set_has_no_duplicates() {
        let unique: HashSet<Tag> = INCLUDE_TAGS.iter().copied().collect();
        assert_eq!(unique.len(), INCLUDE_TAGS.len());
    }

    #[test]
    fn gates_known_and_unknown_tags() {
        assert!(is_included(Tag(0x0008, 0x0060))); // Modality
        assert!(is_included(Tag(0x0020, 0x000D))); // Study Instance UID
        assert!(!is_included(Tag(0x0008, 0x0008))); // Image Type, not listed
    }
}
