//! In-memory triple graph.
//!
//! Subjects and predicates are absolute IRIs. Objects are a [`Node`]: either a
//! resource reference or a literal (plain, language-tagged, or datatyped).
//! Graph passes work on the [`TripleStore`] capability so any backing storage
//! can be swapped in; [`Graph`] is the insertion-ordered in-memory default.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

// ── Terms ────────────────────────────────────────────────────────

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A resource identified solely by its IRI.
    Resource { iri: String },
    /// An untyped literal, optionally language-tagged.
    PlainLiteral {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// A literal carrying an explicit datatype IRI.
    TypedLiteral { value: String, datatype: String },
}

impl Node {
    pub fn resource(iri: impl Into<String>) -> Self {
        Self::Resource { iri: iri.into() }
    }

    /// Plain literal without a language tag.
    pub fn plain(value: impl Into<String>) -> Self {
        Self::PlainLiteral {
            value: value.into(),
            language: None,
        }
    }

    /// Language-tagged literal. An empty tag yields a plain literal.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        let language = language.into();
        Self::PlainLiteral {
            value: value.into(),
            language: (!language.is_empty()).then_some(language),
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::TypedLiteral {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    /// The IRI of a resource node.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Resource { iri } => Some(iri),
            _ => None,
        }
    }

    /// The lexical value of a literal node.
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            Self::PlainLiteral { value, .. } | Self::TypedLiteral { value, .. } => Some(value),
            Self::Resource { .. } => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Self::PlainLiteral { language, .. } => language.as_deref(),
            _ => None,
        }
    }

    pub fn datatype(&self) -> Option<&str> {
        match self {
            Self::TypedLiteral { datatype, .. } => Some(datatype),
            _ => None,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource { .. })
    }

    /// A literal whose value is empty once trimmed. Never valid in output graphs.
    pub fn is_empty_literal(&self) -> bool {
        self.literal_value().is_some_and(|v| v.trim().is_empty())
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource { iri } => write!(f, "<{iri}>"),
            Self::PlainLiteral {
                value,
                language: Some(lang),
            } => write!(f, "{value:?}@{lang}"),
            Self::PlainLiteral { value, .. } => write!(f, "{value:?}"),
            Self::TypedLiteral { value, datatype } => write!(f, "{value:?}^^<{datatype}>"),
        }
    }
}

/// Reject IRIs that cannot name a resource: empty, whitespace-bearing, or without a scheme.
pub fn require_iri(iri: &str) -> Result<&str> {
    let has_scheme = iri
        .split_once(':')
        .is_some_and(|(scheme, rest)| !scheme.is_empty() && !rest.is_empty());
    if !has_scheme || iri.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidTerm(iri.to_string()));
    }
    Ok(iri)
}

// ── Triples ──────────────────────────────────────────────────────

/// A (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Node,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Node) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}> <{}> {}", self.subject, self.predicate, self.object)
    }
}

/// A triple pattern; unbound positions match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<Node>,
}

impl TriplePattern {
    /// Pattern matching every triple.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn exact(triple: &Triple) -> Self {
        Self {
            subject: Some(triple.subject.clone()),
            predicate: Some(triple.predicate.clone()),
            object: Some(triple.object.clone()),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, object: Node) -> Self {
        self.object = Some(object);
        self
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == triple.subject)
            && self.predicate.as_ref().map_or(true, |p| *p == triple.predicate)
            && self.object.as_ref().map_or(true, |o| *o == triple.object)
    }
}

// ── Store capability ─────────────────────────────────────────────

/// Pattern-addressable triple storage.
///
/// `matching` returns owned triples so callers can collect first and mutate
/// afterwards without holding a borrow on the store.
pub trait TripleStore {
    /// Add a triple. Returns `false` if it was already present.
    fn add(&mut self, triple: Triple) -> bool;

    /// Remove an exact triple. Returns `false` if it was absent.
    fn remove(&mut self, triple: &Triple) -> bool;

    /// All triples matching the pattern, in storage order.
    fn matching(&self, pattern: &TriplePattern) -> Vec<Triple>;

    /// Number of stored triples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, triple: &Triple) -> bool {
        !self.matching(&TriplePattern::exact(triple)).is_empty()
    }

    fn triples(&self) -> Vec<Triple> {
        self.matching(&TriplePattern::any())
    }

    fn add_all(&mut self, triples: Vec<Triple>) -> usize {
        triples.into_iter().filter(|t| self.add(t.clone())).count()
    }

    fn remove_all(&mut self, triples: &[Triple]) -> usize {
        triples.iter().filter(|t| self.remove(t)).count()
    }

    /// Remove every triple matching the pattern; returns how many went.
    fn remove_matching(&mut self, pattern: &TriplePattern) -> usize {
        let found = self.matching(pattern);
        self.remove_all(&found)
    }
}

// ── In-memory graph ──────────────────────────────────────────────

/// Insertion-ordered triple set with a prefix table.
///
/// Adding a triple that is already present is a no-op, so iteration order is
/// the order in which distinct triples were first observed. Removal leaves a
/// tombstone in `slots`; the slots are compacted once tombstones outnumber
/// live triples.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    slots: Vec<Option<Triple>>,
    /// Triple → slot index.
    positions: HashMap<Triple, usize>,
    /// Subject → slot indices, ascending.
    by_subject: HashMap<String, BTreeSet<usize>>,
    prefixes: BTreeMap<String, String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefix for serialization. Re-registering replaces the namespace.
    pub fn set_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.slots.iter().flatten()
    }

    /// Shorthand for an exact triple membership test.
    pub fn has(&self, subject: &str, predicate: &str, object: &Node) -> bool {
        self.positions
            .contains_key(&Triple::new(subject, predicate, object.clone()))
    }

    /// Distinct subjects carrying `predicate object`, in first-seen order.
    pub fn subjects_with(&self, predicate: &str, object: &Node) -> Vec<String> {
        let mut seen = HashSet::new();
        self.iter()
            .filter(|t| t.predicate == predicate && t.object == *object)
            .filter(|t| seen.insert(t.subject.as_str()))
            .map(|t| t.subject.clone())
            .collect()
    }

    /// Objects of `subject predicate ?o`, in insertion order.
    pub fn objects(&self, subject: &str, predicate: &str) -> Vec<Node> {
        self.about(subject)
            .filter(|t| t.predicate == predicate)
            .map(|t| t.object.clone())
            .collect()
    }

    /// Whether both graphs hold the same triple set, ignoring order and prefixes.
    pub fn same_triples(&self, other: &Graph) -> bool {
        self.positions.len() == other.positions.len()
            && self.positions.keys().all(|t| other.positions.contains_key(t))
    }

    /// BLAKE3 hex digest of the sorted triple set.
    ///
    /// Two graphs with equal triple sets share a fingerprint regardless of
    /// insertion order.
    pub fn fingerprint(&self) -> String {
        let mut lines: Vec<String> = self.iter().map(|t| t.to_string()).collect();
        lines.sort();
        let mut hasher = blake3::Hasher::new();
        for line in &lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Triples with the given subject, in insertion order.
    fn about<'a>(&'a self, subject: &str) -> impl Iterator<Item = &'a Triple> + 'a {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.slots[slot].as_ref())
    }

    fn compact_if_sparse(&mut self) {
        let live = self.positions.len();
        if self.slots.len() <= 2 * live + 16 {
            return;
        }
        let live_triples: Vec<Triple> = self.slots.drain(..).flatten().collect();
        self.positions.clear();
        self.by_subject.clear();
        for triple in live_triples {
            self.push(triple);
        }
    }

    fn push(&mut self, triple: Triple) {
        let slot = self.slots.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .insert(slot);
        self.positions.insert(triple.clone(), slot);
        self.slots.push(Some(triple));
    }
}

impl TripleStore for Graph {
    fn add(&mut self, triple: Triple) -> bool {
        if self.positions.contains_key(&triple) {
            return false;
        }
        self.push(triple);
        true
    }

    fn remove(&mut self, triple: &Triple) -> bool {
        let Some(slot) = self.positions.remove(triple) else {
            return false;
        };
        self.slots[slot] = None;
        if let Some(slots) = self.by_subject.get_mut(&triple.subject) {
            slots.remove(&slot);
            if slots.is_empty() {
                self.by_subject.remove(&triple.subject);
            }
        }
        self.compact_if_sparse();
        true
    }

    fn matching(&self, pattern: &TriplePattern) -> Vec<Triple> {
        match &pattern.subject {
            Some(subject) => self
                .about(subject)
                .filter(|t| pattern.matches(t))
                .cloned()
                .collect(),
            None => self.iter().filter(|t| pattern.matches(t)).cloned().collect(),
        }
    }

    fn len(&self) -> usize {
        self.positions.len()
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.positions.contains_key(triple)
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut graph = Graph::new();
        for triple in iter {
            graph.add(triple);
        }
        graph
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Option<Triple>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EX: &str = "http://example.org/";

    fn iri(local: &str) -> String {
        format!("{EX}{local}")
    }

    #[test]
    fn add_is_set_semantic() {
        let mut g = Graph::new();
        let t = Triple::new(iri("a"), iri("p"), Node::plain("x"));
        assert!(g.add(t.clone()));
        assert!(!g.add(t));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn matching_respects_unbound_positions() {
        let mut g = Graph::new();
        g.add(Triple::new(iri("a"), iri("p"), Node::plain("x")));
        g.add(Triple::new(iri("a"), iri("q"), Node::resource(iri("b"))));
        g.add(Triple::new(iri("c"), iri("p"), Node::plain("y")));

        assert_eq!(g.matching(&TriplePattern::any()).len(), 3);
        assert_eq!(g.matching(&TriplePattern::any().subject(iri("a"))).len(), 2);
        assert_eq!(g.matching(&TriplePattern::any().predicate(iri("p"))).len(), 2);
        let by_object = g.matching(&TriplePattern::any().object(Node::resource(iri("b"))));
        assert_eq!(by_object.len(), 1);
        assert_eq!(by_object[0].predicate, iri("q"));
    }

    #[test]
    fn remove_matching_keeps_order_of_survivors() {
        let mut g = Graph::new();
        for (s, v) in [("a", "1"), ("b", "2"), ("a", "3"), ("c", "4")] {
            g.add(Triple::new(iri(s), iri("p"), Node::plain(v)));
        }
        let removed = g.remove_matching(&TriplePattern::any().subject(iri("a")));
        assert_eq!(removed, 2);
        let subjects: Vec<_> = g.iter().map(|t| t.subject.clone()).collect();
        assert_eq!(subjects, vec![iri("b"), iri("c")]);
    }

    #[test]
    fn heavy_removal_compacts_and_keeps_lookups() {
        let mut g = Graph::new();
        for i in 0..100 {
            g.add(Triple::new(iri(&format!("s{i}")), iri("p"), Node::plain(i.to_string())));
        }
        for i in (0..100).filter(|i| i % 10 != 0) {
            let doomed = Triple::new(iri(&format!("s{i}")), iri("p"), Node::plain(i.to_string()));
            assert!(g.remove(&doomed));
        }
        assert_eq!(g.len(), 10);
        assert_eq!(g.iter().count(), 10);
        assert_eq!(g.objects(&iri("s50"), &iri("p")), vec![Node::plain("50")]);
        assert!(g.objects(&iri("s51"), &iri("p")).is_empty());

        g.add(Triple::new(iri("s0"), iri("q"), Node::plain("late")));
        let about_s0 = g.matching(&TriplePattern::any().subject(iri("s0")));
        assert_eq!(about_s0.len(), 2);
        assert_eq!(about_s0[1].object, Node::plain("late"));
        let order: Vec<_> = g.iter().map(|t| t.subject.clone()).collect();
        assert_eq!(order.first(), Some(&iri("s0")));
        assert_eq!(order.last(), Some(&iri("s0")));
    }

    #[test]
    fn empty_literal_detection_trims() {
        assert!(Node::plain("   ").is_empty_literal());
        assert!(Node::lang("\t\n", "cs").is_empty_literal());
        assert!(Node::typed("", crate::vocab::xsd::STRING).is_empty_literal());
        assert!(!Node::plain(" x ").is_empty_literal());
        assert!(!Node::resource(iri("a")).is_empty_literal());
    }

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let t1 = Triple::new(iri("a"), iri("p"), Node::plain("x"));
        let t2 = Triple::new(iri("b"), iri("p"), Node::lang("y", "en"));
        let g1: Graph = vec![t1.clone(), t2.clone()].into_iter().collect();
        let g2: Graph = vec![t2, t1].into_iter().collect();
        assert_eq!(g1.fingerprint(), g2.fingerprint());
        assert!(g1.same_triples(&g2));
    }

    #[test]
    fn subjects_with_is_distinct() {
        let mut g = Graph::new();
        let ty = Node::resource(iri("T"));
        g.add(Triple::new(iri("a"), iri("type"), ty.clone()));
        g.add(Triple::new(iri("b"), iri("type"), ty.clone()));
        g.add(Triple::new(iri("a"), iri("other"), ty.clone()));
        assert_eq!(g.subjects_with(&iri("type"), &ty), vec![iri("a"), iri("b")]);
    }

    #[test]
    fn require_iri_rejects_relative_names() {
        assert!(require_iri("http://example.org/a").is_ok());
        assert!(require_iri("urn:x").is_ok());
        assert!(require_iri("plain").is_err());
        assert!(require_iri("http://exa mple.org").is_err());
        assert!(require_iri(":x").is_err());
    }

    #[test]
    fn lang_with_empty_tag_is_untagged() {
        assert_eq!(Node::lang("x", ""), Node::plain("x"));
    }
}
