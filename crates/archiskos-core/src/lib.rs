//! archiskos-core: Triple graph, vocabularies, and configuration for the archiskos converter.
//!
//! This crate provides the foundational pieces shared by every archiskos component:
//! - The in-memory triple graph (`Node`, `Triple`, `TripleStore`, `Graph`)
//! - Standard vocabulary IRIs (RDF, RDFS, OWL, SKOS, DCTerms, XSD)
//! - Model metadata properties supplied by the model parser
//! - Immutable configuration tables (namespace constants, domain local names)
//! - Common error types

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod vocab;

pub use config::{DomainVocabulary, Settings, TransformConfig};
pub use error::{CoreError, Result};
pub use graph::{Graph, Node, Triple, TriplePattern, TripleStore};
pub use model::ModelProperties;
