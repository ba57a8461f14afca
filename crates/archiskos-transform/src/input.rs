//! Model document input.
//!
//! A JSON rendering of what the model parser hands the engine: the model's
//! display name, its metadata properties, and the raw triples.
//!
//! ```json
//! {
//!   "name": "Registr osob",
//!   "properties": { "popis": "Slovník pojmů registru osob" },
//!   "triples": [
//!     { "subject": "https://ex.org/osoba",
//!       "predicate": "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
//!       "object": { "iri": "https://slovník.gov.cz/typ-pojmu" } },
//!     { "subject": "https://ex.org/osoba",
//!       "predicate": "http://www.w3.org/2000/01/rdf-schema#label",
//!       "object": { "value": "Osoba", "lang": "cs" } }
//!   ]
//! }
//! ```

use std::path::Path;

use archiskos_core::graph::{require_iri, Graph, Node, Triple, TripleStore};
use archiskos_core::ModelProperties;
use archiskos_datatype::add_typed_property;
use serde::Deserialize;

use crate::error::InputError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: ModelProperties,
    #[serde(default)]
    pub triples: Vec<TripleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripleEntry {
    pub subject: String,
    pub predicate: String,
    pub object: ObjectEntry,
}

/// Untyped values without a datatype get one inferred on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ObjectEntry {
    Iri {
        iri: String,
    },
    Typed {
        value: String,
        datatype: String,
    },
    Literal {
        value: String,
        #[serde(default)]
        lang: Option<String>,
    },
}

impl ModelDocument {
    pub fn parse(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), bytes = raw.len(), "Read model document");
        Self::parse(&raw)
    }

    /// Build the source graph. Blank untyped values are skipped.
    pub fn to_graph(&self) -> Result<Graph, InputError> {
        let mut graph = Graph::new();

        for (index, entry) in self.triples.iter().enumerate() {
            let subject = checked_iri(&entry.subject, index)?;
            let predicate = checked_iri(&entry.predicate, index)?;

            match &entry.object {
                ObjectEntry::Iri { iri } => {
                    let object = checked_iri(iri, index)?;
                    graph.add(Triple::new(subject, predicate, Node::resource(object)));
                }
                ObjectEntry::Typed { value, datatype } => {
                    let datatype = checked_iri(datatype, index)?;
                    graph.add(Triple::new(subject, predicate, Node::typed(value, datatype)));
                }
                ObjectEntry::Literal { value, lang } => {
                    add_typed_property(&mut graph, subject, predicate, value, lang.as_deref());
                }
            }
        }

        tracing::debug!(
            entries = self.triples.len(),
            triples = graph.len(),
            "Built source graph from model document"
        );
        Ok(graph)
    }
}

fn checked_iri(value: &str, index: usize) -> Result<&str, InputError> {
    require_iri(value).map_err(|_| InputError::InvalidIri {
        index,
        iri: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use archiskos_core::vocab::{rdfs, xsd};
    use std::io::Write;

    const DOC: &str = r#"{
        "name": "Registr osob",
        "properties": { "adresa lokálního katalogu dat": "https://data.example.org" },
        "triples": [
            { "subject": "https://ex.org/osoba",
              "predicate": "http://www.w3.org/2000/01/rdf-schema#label",
              "object": { "value": "Osoba", "lang": "cs" } },
            { "subject": "https://ex.org/osoba", "predicate": "https://ex.org/pocet",
              "object": { "value": "12" } },
            { "subject": "https://ex.org/osoba", "predicate": "https://ex.org/vztah",
              "object": { "iri": "https://ex.org/adresa" } },
            { "subject": "https://ex.org/osoba", "predicate": "https://ex.org/kod",
              "object": { "value": "007", "datatype": "http://www.w3.org/2001/XMLSchema#string" } },
            { "subject": "https://ex.org/osoba", "predicate": "https://ex.org/prazdny",
              "object": { "value": "  " } }
        ]
    }"#;

    #[test]
    fn test_parse_and_build_graph() {
        let doc = ModelDocument::parse(DOC).unwrap();
        assert_eq!(doc.name, "Registr osob");
        assert_eq!(doc.properties.len(), 1);

        let graph = doc.to_graph().unwrap();
        let s = "https://ex.org/osoba";
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.objects(s, rdfs::LABEL), vec![Node::lang("Osoba", "cs")]);
        assert_eq!(graph.objects(s, "https://ex.org/pocet"), vec![Node::typed("12", xsd::INTEGER)]);
        assert_eq!(graph.objects(s, "https://ex.org/kod"), vec![Node::typed("007", xsd::STRING)]);
        assert!(graph.objects(s, "https://ex.org/prazdny").is_empty());
    }

    #[test]
    fn test_relative_iri_is_rejected() {
        let doc = ModelDocument::parse(
            r#"{ "triples": [ { "subject": "osoba", "predicate": "https://ex.org/p",
                               "object": { "iri": "https://ex.org/o" } } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            doc.to_graph(),
            Err(InputError::InvalidIri { index: 0, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let doc = ModelDocument::load(file.path()).unwrap();
        assert_eq!(doc.triples.len(), 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelDocument::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(ModelDocument::parse("{"), Err(InputError::Parse(_))));
    }
}
