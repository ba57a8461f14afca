//! Error types for the archiskos-datatype crate.

use thiserror::Error;

use crate::DatatypeTag;

/// A value could not be represented under the datatype chosen for it.
///
/// Always recovered by the caller into a plain literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatatypeError {
    #[error("'{value}' is not a valid {tag} lexical form")]
    InvalidLexical { value: String, tag: DatatypeTag },

    #[error("'{value}' is out of range for {tag}")]
    OutOfRange { value: String, tag: DatatypeTag },
}

pub type Result<T> = std::result::Result<T, DatatypeError>;
