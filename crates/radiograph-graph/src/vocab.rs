//! Namespace IRIs and well-known terms.
//!
//! The prefix set mirrors what the reference mapping binds on every graph;
//! bindings are cosmetic (serialization only) but preserved through
//! subgraph extraction and Turtle round-trips.

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const LDP: &str = "http://www.w3.org/ns/ldp#";
pub const ROO: &str = "http://www.cancerdata.org/roo/";
pub const SNOMED: &str = "http://snomed.info/sct/";
pub const NCIT: &str = "http://ncicb.nci.nih.gov/xml/owl/EVS/Thesaurus.owl#";
pub const DICOM: &str = "http://dicom.nema.org/resources/ontology/DCM#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

pub const DCAT_CATALOG: &str = "http://www.w3.org/ns/dcat#Catalog";
pub const DCAT_DATASET_CLASS: &str = "http://www.w3.org/ns/dcat#Dataset";
pub const DCAT_DISTRIBUTION_CLASS: &str = "http://www.w3.org/ns/dcat#Distribution";
pub const DCAT_DATASET: &str = "http://www.w3.org/ns/dcat#dataset";
pub const DCAT_DISTRIBUTION: &str = "http://www.w3.org/ns/dcat#distribution";
pub const DCAT_MEDIA_TYPE: &str = "http://www.w3.org/ns/dcat#mediaType";

pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
pub const DCTERMS_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
pub const DCTERMS_IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
pub const DCTERMS_PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
pub const DCTERMS_ISSUED: &str = "http://purl.org/dc/terms/issued";
pub const DCTERMS_LANGUAGE: &str = "http://purl.org/dc/terms/language";

pub const DICOM_FILE_CLASS: &str = "http://dicom.nema.org/resources/ontology/DCM#DICOMFile";
pub const ROO_HAS_ANATOMIC_SITE: &str = "http://www.cancerdata.org/roo/hasAnatomicSite";

pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const XSD_TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Media type asserted on every distribution.
pub const DICOM_MEDIA_TYPE: &str = "application/dicom";

/// Prefix bindings installed on every graph the pipeline builds.
pub fn default_prefixes() -> Vec<(&'static str, &'static str)> {
    vec![
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("xsd", XSD),
        ("owl", OWL),
        ("dcterms", DCTERMS),
        ("dcat", DCAT),
        ("foaf", FOAF),
        ("ldp", LDP),
        ("roo", ROO),
        ("snomed", SNOMED),
        ("ncit", NCIT),
        ("dicom", DICOM),
    ]
}
