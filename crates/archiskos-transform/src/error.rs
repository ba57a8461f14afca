//! Error types for the archiskos-transform crate.

use thiserror::Error;

use crate::pipeline::PassId;

/// Fatal failure of a transformation run. No partial graph is ever returned.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Transformation failed in pass {pass}: {source}")]
    TransformationFailed {
        pass: PassId,
        #[source]
        source: PassError,
    },
}

/// A structural problem detected inside a single pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassError {
    #[error("Cannot mint a resource from '{iri}': not an absolute IRI")]
    InvalidIri { iri: String },

    #[error("Invariant violated: {0}")]
    InvariantViolated(String),
}

/// Why the model's catalog address could not serve as the namespace.
///
/// Never fatal: resolution falls back to the default namespace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("Catalog address is empty")]
    Empty,

    #[error("Catalog address '{value}' is not a valid absolute URL: {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// A model document that cannot be turned into a source graph.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Triple {index}: invalid IRI '{iri}'")]
    InvalidIri { index: usize, iri: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
