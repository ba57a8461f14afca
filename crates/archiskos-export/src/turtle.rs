//! Pretty-printed Turtle.
//!
//! Subjects are sorted by IRI. Within a subject `rdf:type` comes first as
//! `a`, then the remaining predicates sorted by IRI; objects keep graph order.
//! IRIs are compacted against the graph's prefix table when the local part is
//! a safe prefixed-name local, and written in full otherwise.

use std::collections::BTreeMap;
use std::fmt::Write;

use archiskos_core::graph::{Graph, Node};
use archiskos_core::vocab::rdf;

use crate::error::Result;

pub fn to_turtle(graph: &Graph) -> Result<String> {
    let prefixes = PrefixTable::new(graph.prefixes());
    let mut out = String::new();

    for (prefix, namespace) in graph.prefixes() {
        if is_valid_prefix(prefix) {
            writeln!(out, "@prefix {prefix}: <{}> .", escape_iri(namespace))?;
        }
    }

    let mut subjects: BTreeMap<&str, BTreeMap<&str, Vec<&Node>>> = BTreeMap::new();
    for triple in graph.iter() {
        subjects
            .entry(triple.subject.as_str())
            .or_default()
            .entry(triple.predicate.as_str())
            .or_default()
            .push(&triple.object);
    }

    for (subject, mut predicates) in subjects {
        writeln!(out)?;
        writeln!(out, "{}", prefixes.compact(subject))?;

        let mut lines = Vec::with_capacity(predicates.len());
        if let Some(types) = predicates.remove(rdf::TYPE) {
            lines.push(format!("a {}", render_objects(&types, &prefixes)));
        }
        for (predicate, objects) in &predicates {
            lines.push(format!(
                "{} {}",
                prefixes.compact(predicate),
                render_objects(objects, &prefixes)
            ));
        }

        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let terminator = if i == last { " ." } else { " ;" };
            writeln!(out, "    {line}{terminator}")?;
        }
    }

    Ok(out)
}

fn render_objects(objects: &[&Node], prefixes: &PrefixTable<'_>) -> String {
    objects
        .iter()
        .map(|node| render_node(node, prefixes))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_node(node: &Node, prefixes: &PrefixTable<'_>) -> String {
    match node {
        Node::Resource { iri } => prefixes.compact(iri),
        Node::PlainLiteral {
            value,
            language: Some(lang),
        } => format!("\"{}\"@{lang}", escape_literal(value)),
        Node::PlainLiteral { value, .. } => format!("\"{}\"", escape_literal(value)),
        Node::TypedLiteral { value, datatype } => {
            format!("\"{}\"^^{}", escape_literal(value), prefixes.compact(datatype))
        }
    }
}

/// Namespaces ordered longest first, so the most specific prefix wins.
struct PrefixTable<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> PrefixTable<'a> {
    fn new(prefixes: &'a BTreeMap<String, String>) -> Self {
        let mut entries: Vec<(&str, &str)> = prefixes
            .iter()
            .filter(|(prefix, _)| is_valid_prefix(prefix))
            .map(|(p, ns)| (p.as_str(), ns.as_str()))
            .collect();
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));
        Self { entries }
    }

    fn compact(&self, iri: &str) -> String {
        self.entries
            .iter()
            .find_map(|(prefix, ns)| {
                iri.strip_prefix(ns)
                    .filter(|local| is_safe_local(local))
                    .map(|local| format!("{prefix}:{local}"))
            })
            .unwrap_or_else(|| format!("<{}>", escape_iri(iri)))
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Conservative subset of the Turtle `PN_LOCAL` production.
fn is_safe_local(local: &str) -> bool {
    !local.starts_with('-') && local.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_iri(iri: &str) -> String {
    let mut escaped = String::with_capacity(iri.len());
    for c in iri.chars() {
        if c.is_control() || c == ' ' || "<>\"{}|^`\\".contains(c) {
            escaped.push_str(&format!("\\u{:04X}", c as u32));
        } else {
            escaped.push(c);
        }
    }
    escaped
}
