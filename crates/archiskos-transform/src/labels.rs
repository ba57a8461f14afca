//! Passes 5 and 6: labels become SKOS preferred labels, domain definitions
//! become SKOS definitions.

use std::collections::BTreeMap;

use archiskos_core::graph::{Graph, Node, Triple, TriplePattern, TripleStore};
use archiskos_core::vocab::{rdfs, skos};

use crate::pipeline::{PassOutcome, Rewrite};
use crate::terms::Terms;

type LabelKey = (String, String);

/// Pass 5: exactly one `skos:prefLabel` per (subject, language).
///
/// Among `rdfs:label` values the later one wins. A preferred label already
/// present for the pair is kept over any `rdfs:label`, so the scheme title set
/// in pass 3 and labels unified by an earlier run are stable.
pub fn unify_labels(graph: &mut Graph, default_language: &str) -> PassOutcome {
    let mut rewrite = Rewrite::new();
    let mut labels: BTreeMap<LabelKey, String> = BTreeMap::new();
    let mut preferred: BTreeMap<LabelKey, String> = BTreeMap::new();

    for triple in graph.matching(&TriplePattern::any().predicate(rdfs::LABEL)) {
        if let Some((key, value)) = label_entry(&triple, default_language) {
            labels.insert(key, value);
        }
        rewrite.remove(triple);
    }

    for triple in graph.matching(&TriplePattern::any().predicate(skos::PREF_LABEL)) {
        if let Some((key, value)) = label_entry(&triple, default_language) {
            preferred.insert(key, value);
            rewrite.remove(triple);
        }
    }

    let from_labels = labels.len();
    for (key, value) in preferred {
        if let Some(dropped) = labels.get(&key).filter(|label| **label != value) {
            tracing::debug!(
                subject = %key.0,
                language = %key.1,
                kept = %value,
                dropped = %dropped,
                "Existing preferred label wins over rdfs:label"
            );
        }
        labels.insert(key, value);
    }
    for ((subject, language), value) in labels {
        rewrite.add(Triple::new(subject, skos::PREF_LABEL, Node::lang(value, language)));
    }

    let outcome = rewrite.apply(graph);
    tracing::debug!(labels = from_labels, "Unified labels into preferred labels");
    outcome
}

fn label_entry(triple: &Triple, default_language: &str) -> Option<(LabelKey, String)> {
    let value = triple.object.literal_value()?;
    if value.trim().is_empty() {
        return None;
    }
    let language = triple
        .object
        .language()
        .filter(|l| !l.is_empty())
        .unwrap_or(default_language);
    Some(((triple.subject.clone(), language.to_string()), value.to_string()))
}

/// Pass 6: domain definitions move onto `skos:definition`; empty ones are dropped.
pub fn migrate_definitions(
    graph: &mut Graph,
    terms: &Terms,
    default_language: &str,
) -> PassOutcome {
    let mut rewrite = Rewrite::new();

    for triple in graph.matching(&TriplePattern::any().predicate(&terms.definition)) {
        if let Some(value) = triple.object.literal_value() {
            if value.trim().is_empty() {
                tracing::debug!(subject = %triple.subject, "Dropping empty definition");
            } else {
                let language = triple.object.language().unwrap_or(default_language);
                rewrite.add(Triple::new(
                    triple.subject.clone(),
                    skos::DEFINITION,
                    Node::lang(value, language),
                ));
            }
        }
        rewrite.remove(triple);
    }

    rewrite.apply(graph)
}
