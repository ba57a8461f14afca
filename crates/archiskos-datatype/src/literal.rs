//! Typed literal construction.

use archiskos_core::graph::{Node, Triple, TripleStore};
use archiskos_core::vocab::{local_name, xsd};
use url::Url;

use crate::detect::{self, parse_date, parse_date_time, parse_time};
use crate::error::{DatatypeError, Result};
use crate::{classify, DatatypeTag};

const TRUTHY_WORDS: [&str; 3] = ["true", "ano", "yes"];

/// Whether a boolean word reads as true (`true`, `ano`, `yes`, any case).
pub fn coerce_boolean(value: &str) -> bool {
    let value = value.trim();
    TRUTHY_WORDS.iter().any(|w| w.eq_ignore_ascii_case(value))
}

/// An `xsd:boolean` literal; every non-truthy value reads as `false`.
pub fn boolean_literal(value: &str) -> Node {
    Node::typed(coerce_boolean(value).to_string(), xsd::BOOLEAN)
}

/// Build a literal of the given datatype, normalizing to the canonical lexical form.
pub fn try_materialize(value: &str, tag: DatatypeTag) -> Result<Node> {
    let invalid = || DatatypeError::InvalidLexical {
        value: value.to_string(),
        tag,
    };

    let lexical = match tag {
        DatatypeTag::Boolean => {
            if !detect::is_boolean(value) {
                return Err(invalid());
            }
            coerce_boolean(value).to_string()
        }
        DatatypeTag::AnyUri => {
            Url::parse(value).map_err(|_| invalid())?;
            value.to_string()
        }
        DatatypeTag::Date => parse_date(value)
            .ok_or_else(invalid)?
            .format("%Y-%m-%d")
            .to_string(),
        DatatypeTag::Time => parse_time(value)
            .ok_or_else(invalid)?
            .format("%H:%M:%S%.f")
            .to_string(),
        DatatypeTag::DateTime => parse_date_time(value)
            .ok_or_else(invalid)?
            .format("%Y-%m-%dT%H:%M:%S%.f")
            .to_string(),
        DatatypeTag::Integer => {
            if !detect::is_integer(value) {
                return Err(invalid());
            }
            value
                .parse::<i64>()
                .map_err(|_| DatatypeError::OutOfRange {
                    value: value.to_string(),
                    tag,
                })?
                .to_string()
        }
        DatatypeTag::Double => {
            if !detect::is_double(value) {
                return Err(invalid());
            }
            let parsed: f64 = value.parse().map_err(|_| invalid())?;
            if !parsed.is_finite() {
                return Err(DatatypeError::OutOfRange {
                    value: value.to_string(),
                    tag,
                });
            }
            format!("{parsed:?}")
        }
        DatatypeTag::String => value.to_string(),
    };

    Ok(Node::typed(lexical, tag.iri()))
}

/// Build a literal of the given datatype, or a plain literal if the value does not fit.
pub fn materialize(value: &str, tag: DatatypeTag) -> Node {
    try_materialize(value, tag).unwrap_or_else(|e| {
        if tag == DatatypeTag::Boolean {
            tracing::warn!(
                value = %value,
                error = %e,
                "Property name suggests a boolean but the value is not a boolean word, \
                 keeping plain literal instead of coercing to false"
            );
        } else {
            tracing::warn!(
                value = %value,
                datatype = %tag,
                error = %e,
                "Datatype detection failed, using plain literal"
            );
        }
        Node::plain(value)
    })
}

/// The literal for a raw model value.
///
/// Language-tagged values stay plain language-tagged strings; everything
/// else is classified with the help of the property's local name.
pub fn typed_literal(value: &str, language: Option<&str>, property_local_name: &str) -> Node {
    if let Some(lang) = language.filter(|l| !l.is_empty()) {
        return Node::lang(value, lang);
    }
    materialize(value, classify(value, property_local_name))
}

/// Add `subject predicate value` with an inferred datatype.
///
/// Blank values are skipped. Returns whether a triple was added.
pub fn add_typed_property<S: TripleStore>(
    store: &mut S,
    subject: &str,
    predicate: &str,
    value: &str,
    language: Option<&str>,
) -> bool {
    if value.trim().is_empty() {
        return false;
    }

    let object = typed_literal(value, language, local_name(predicate));
    tracing::debug!(
        property = local_name(predicate),
        value = %value,
        datatype = object.datatype().unwrap_or("plain"),
        "Added typed property"
    );
    store.add(Triple::new(subject, predicate, object))
}
