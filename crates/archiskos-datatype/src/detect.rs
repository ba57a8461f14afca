//! Datatype detection.
//!
//! Rules are tried in a fixed order and the first match wins:
//! boolean word, absolute URI, date, time, date-time, integer, decimal,
//! then a guess from the property's local name, then `xsd:string`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::DatatypeTag;

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());
static DOUBLE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap());

// chrono accepts short fields (`%Y` takes "3", `%H` takes "1"), so digit widths
// are checked up front.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4})$").unwrap()
});
static TIME_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]+)?)?$").unwrap());
static DATE_TIME_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]+)?)?",
        r"|[0-9]{2}\.[0-9]{2}\.[0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2})$",
    ))
    .unwrap()
});

const BOOLEAN_WORDS: [&str; 6] = ["true", "false", "ano", "ne", "yes", "no"];

/// ISO calendar date, `dd.MM.yyyy`, `d.M.yyyy`.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%-d.%-m.%Y"];

/// ISO local time (with optional fraction), `HH:mm:ss`, `HH:mm`.
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// ISO local date-time, `dd.MM.yyyy HH:mm:ss`, `yyyy-MM-ddTHH:mm:ss`.
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Classify a raw value. Never fails; unmatched values are `String`.
pub fn classify(value: &str, property_local_name: &str) -> DatatypeTag {
    if is_boolean(value) {
        DatatypeTag::Boolean
    } else if is_uri(value) {
        DatatypeTag::AnyUri
    } else if parse_date(value).is_some() {
        DatatypeTag::Date
    } else if parse_time(value).is_some() {
        DatatypeTag::Time
    } else if parse_date_time(value).is_some() {
        DatatypeTag::DateTime
    } else if is_integer(value) {
        DatatypeTag::Integer
    } else if is_double(value) {
        DatatypeTag::Double
    } else {
        infer_from_property_name(property_local_name).unwrap_or(DatatypeTag::String)
    }
}

/// One of `true/false/ano/ne/yes/no`, any case.
pub fn is_boolean(value: &str) -> bool {
    BOOLEAN_WORDS.iter().any(|w| w.eq_ignore_ascii_case(value))
}

/// An absolute URI with both a scheme and a host.
pub fn is_uri(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| url.host().is_some())
}

pub fn is_integer(value: &str) -> bool {
    INTEGER_PATTERN.is_match(value)
}

pub fn is_double(value: &str) -> bool {
    DOUBLE_PATTERN.is_match(value)
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(value) {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    if !TIME_SHAPE.is_match(value) {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

pub(crate) fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    if !DATE_TIME_SHAPE.is_match(value) {
        return None;
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Guess a datatype from substrings of the property's local name.
fn infer_from_property_name(property_local_name: &str) -> Option<DatatypeTag> {
    const HINTS: [(&[&str], DatatypeTag); 5] = [
        (&["datum", "date"], DatatypeTag::Date),
        (&["cas", "time"], DatatypeTag::Time),
        (&["url", "uri", "odkaz", "link"], DatatypeTag::AnyUri),
        (
            &["boolean", "flag", "indicator", "is", "has"],
            DatatypeTag::Boolean,
        ),
        (
            &["count", "number", "integer", "quantity"],
            DatatypeTag::Integer,
        ),
    ];

    let name = property_local_name.to_lowercase();
    HINTS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| name.contains(n)))
        .map(|(_, tag)| *tag)
}
