//! Standard vocabulary IRIs.
//!
//! Organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDF Schema (http://www.w3.org/2000/01/rdf-schema#)
//! - `owl` - OWL 2 (http://www.w3.org/2002/07/owl#)
//! - `skos` - SKOS thesaurus vocabulary (http://www.w3.org/2004/02/skos/core#)
//! - `dct` - DCMI metadata terms (http://purl.org/dc/terms/)
//! - `xsd` - XML Schema datatypes (http://www.w3.org/2001/XMLSchema#)

/// RDF vocabulary constants
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// RDFS vocabulary constants
pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
}

/// OWL vocabulary constants
pub mod owl {
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";

    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
}

/// SKOS vocabulary constants
pub mod skos {
    pub const NS: &str = "http://www.w3.org/2004/02/skos/core#";

    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
    pub const CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
    pub const IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
}

/// DCMI metadata terms
pub mod dct {
    pub const NS: &str = "http://purl.org/dc/terms/";

    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
    pub const SOURCE: &str = "http://purl.org/dc/terms/source";
    pub const REFERENCES: &str = "http://purl.org/dc/terms/references";
}

/// XSD datatype constants
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

/// The six standard prefix → namespace pairs registered on every output graph.
pub const STANDARD_PREFIXES: [(&str, &str); 6] = [
    ("dct", dct::NS),
    ("owl", owl::NS),
    ("rdf", rdf::NS),
    ("rdfs", rdfs::NS),
    ("skos", skos::NS),
    ("xsd", xsd::NS),
];

/// Local part of an IRI: the text after the last `#` or `/`.
pub fn local_name(iri: &str) -> &str {
    iri.rfind(['#', '/'])
        .map_or(iri, |idx| &iri[idx + 1..])
}
