//! Ontology mapping: element name → output predicates.
//!
//! A static table keyed by element *name* (not tag) maps each known record
//! onto one or more predicates. Names absent from the table produce no facts
//! (silence, not an error); the archives carry far more attributes than the
//! ontologies model.
//!
//! One predicate (`roo:hasAnatomicSite`) routes through a secondary
//! controlled-vocabulary lookup: the record text, uppercased, against a small
//! SNOMED CT body-part table. On a hit the object is the coded concept IRI;
//! on a miss the original text is kept as a literal. All other
//! multi-predicate entries emit the same coerced literal under every listed
//! predicate.

use crate::coerce::coerce;
use crate::model::{FactObject, TypedLiteral};
use crate::vocab;
use radiograph_ingest_dicom::ExtractedRecord;

/// `(namespace, local name)` pairs; joined at emission time.
type PredicateRef = (&'static str, &'static str);

/// Element name → predicates, mirroring the reference mapping table.
const NAME_PREDICATES: &[(&str, &[PredicateRef])] = &[
    ("SOP Instance UID", &[(vocab::DICOM, "SOPInstanceUID")]),
    ("Study Date", &[(vocab::DCTERMS, "created")]),
    ("Series Date", &[(vocab::DICOM, "SeriesDate")]),
    ("Acquisition Date", &[(vocab::DICOM, "AcquisitionDate")]),
    ("Study Time", &[(vocab::DICOM, "StudyTime")]),
    ("Series Time", &[(vocab::DICOM, "SeriesTime")]),
    ("Acquisition Time", &[(vocab::DICOM, "AcquisitionTime")]),
    ("Accession Number", &[(vocab::DICOM, "AccessionNumber")]),
    ("Modality", &[(vocab::DICOM, "Modality")]),
    ("Manufacturer", &[(vocab::DICOM, "Manufacturer")]),
    ("Study Description", &[(vocab::DCTERMS, "description")]),
    ("Series Description", &[(vocab::DICOM, "SeriesDescription")]),
    (
        "Manufacturer's Model Name",
        &[(vocab::DICOM, "ManufacturerModelName")],
    ),
    ("Patient's Name", &[(vocab::FOAF, "name")]),
    ("Patient ID", &[(vocab::DICOM, "PatientID")]),
    ("Patient's Sex", &[(vocab::ROO, "hasSex")]),
    ("Patient's Age", &[(vocab::ROO, "hasAge")]),
    (
        "Additional Patient History",
        &[(vocab::ROO, "hasPatientHistory")],
    ),
    (
        "Body Part Examined",
        &[
            (vocab::ROO, "hasAnatomicSite"),
            (vocab::DICOM, "BodyPartExamined"),
        ],
    ),
    ("Scan Options", &[(vocab::DICOM, "ScanOptions")]),
    ("Slice Thickness", &[(vocab::DICOM, "SliceThickness")]),
    ("KVP", &[(vocab::DICOM, "KVP")]),
    (
        "Data Collection Diameter",
        &[(vocab::DICOM, "DataCollectionDiameter")],
    ),
    ("Software Versions", &[(vocab::DICOM, "SoftwareVersions")]),
    ("Protocol Name", &[(vocab::DICOM, "ProtocolName")]),
    (
        "Distance Source to Detector",
        &[(vocab::DICOM, "DistanceSourceToDetector")],
    ),
    (
        "Distance Source to Patient",
        &[(vocab::DICOM, "DistanceSourceToPatient")],
    ),
    (
        "Gantry/Detector Tilt",
        &[(vocab::DICOM, "GantryDetectorTilt")],
    ),
    ("Table Height", &[(vocab::DICOM, "TableHeight")]),
    ("Rotation Direction", &[(vocab::DICOM, "RotationDirection")]),
    ("Exposure Time", &[(vocab::DICOM, "ExposureTime")]),
    ("X-Ray Tube Current", &[(vocab::DICOM, "XRayTubeCurrent")]),
    ("Exposure", &[(vocab::DICOM, "Exposure")]),
    ("Filter Type", &[(vocab::DICOM, "FilterType")]),
    ("Generator Power", &[(vocab::DICOM, "GeneratorPower")]),
    ("Focal Spot(s)", &[(vocab::DICOM, "FocalSpots")]),
    ("Convolution Kernel", &[(vocab::DICOM, "ConvolutionKernel")]),
    ("Patient Position", &[(vocab::DICOM, "PatientPosition")]),
    ("Study Instance UID", &[(vocab::DICOM, "StudyInstanceUID")]),
    ("Series Instance UID", &[(vocab::DICOM, "SeriesInstanceUID")]),
    ("Series Number", &[(vocab::DICOM, "SeriesNumber")]),
    ("Instance Number", &[(vocab::DICOM, "InstanceNumber")]),
    (
        "Image Position (Patient)",
        &[(vocab::DICOM, "ImagePositionPatient")],
    ),
    (
        "Image Orientation (Patient)",
        &[(vocab::DICOM, "ImageOrientationPatient")],
    ),
    ("Rows", &[(vocab::DICOM, "Rows")]),
    ("Columns", &[(vocab::DICOM, "Columns")]),
    ("Reason for Study", &[(vocab::ROO, "hasReasonForStudy")]),
    ("Study Comments", &[(vocab::ROO, "hasStudyComment")]),
];

/// Uppercased body-part text → SNOMED CT concept id.
const SNOMED_BODY_PARTS: &[(&str, &str)] = &[
    ("THYROID", "111160001"),
    ("HEAD", "69536005"),
    ("NECK", "45048000"),
    ("CHEST", "51185008"),
    ("ABDOMEN", "113345001"),
    ("PELVIS", "12921003"),
    ("BRAIN", "12738006"),
    ("HEART", "80891009"),
    ("LUNG", "39607008"),
    ("LIVER", "10200004"),
    ("KNEE", "72696002"),
    ("SKULL", "89546000"),
];

/// Look up the SNOMED concept IRI for a body-part text, if coded.
pub fn snomed_body_part(text: &str) -> Option<String> {
    let key = text.trim().to_uppercase();
    SNOMED_BODY_PARTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| format!("{}{}", vocab::SNOMED, code))
}

/// Map one record onto `(predicate, object)` pairs.
///
/// Pure and order-independent: the same record always yields the same pairs,
/// so re-mapping is idempotent under the graph's set semantics. Null values
/// and unknown names yield nothing.
pub fn map_record(record: &ExtractedRecord) -> Vec<(String, FactObject)> {
    if record.value.is_null() {
        return Vec::new();
    }
    let Some((_, predicates)) = NAME_PREDICATES
        .iter()
        .find(|(name, _)| *name == record.name)
    else {
        return Vec::new();
    };

    let literal = coerce(&record.value, &record.vr);
    let mut out = Vec::with_capacity(predicates.len());
    for (namespace, local) in *predicates {
        let predicate = format!("{namespace}{local}");
        let object = if predicate == vocab::ROO_HAS_ANATOMIC_SITE {
            match &literal {
                TypedLiteral::Text(text) => match snomed_body_part(text) {
                    Some(concept) => FactObject::iri(concept),
                    None => FactObject::Literal(literal.clone()),
                },
                other => FactObject::Literal(other.clone()),
            }
        } else {
            FactObject::Literal(literal.clone())
        };
        out.push((predicate, object));
    }
    out
}
