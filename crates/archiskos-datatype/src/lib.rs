//! archiskos-datatype: Datatype inference for untyped literal values.
//!
//! Classifies a raw string (optionally aided by the local name of the
//! property it is attached to) into an XSD datatype and builds a correctly
//! typed literal. Detection is total; materialization falls back to a plain
//! literal when the chosen datatype cannot represent the value. Values that
//! already carry a language tag are never type-detected.

pub mod detect;
pub mod error;
pub mod literal;

pub use detect::classify;
pub use error::DatatypeError;
pub use literal::{
    add_typed_property, boolean_literal, coerce_boolean, materialize, try_materialize,
    typed_literal,
};

use archiskos_core::vocab::xsd;

/// The semantic datatype assigned to a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatatypeTag {
    Boolean,
    AnyUri,
    Date,
    Time,
    DateTime,
    Integer,
    Double,
    String,
}

impl DatatypeTag {
    /// The XSD datatype IRI for this tag.
    pub fn iri(&self) -> &'static str {
        match self {
            Self::Boolean => xsd::BOOLEAN,
            Self::AnyUri => xsd::ANY_URI,
            Self::Date => xsd::DATE,
            Self::Time => xsd::TIME,
            Self::DateTime => xsd::DATE_TIME,
            Self::Integer => xsd::INTEGER,
            Self::Double => xsd::DOUBLE,
            Self::String => xsd::STRING,
        }
    }
}

impl std::fmt::Display for DatatypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "xsd:boolean",
            Self::AnyUri => "xsd:anyURI",
            Self::Date => "xsd:date",
            Self::Time => "xsd:time",
            Self::DateTime => "xsd:dateTime",
            Self::Integer => "xsd:integer",
            Self::Double => "xsd:double",
            Self::String => "xsd:string",
        };
        f.write_str(name)
    }
}
