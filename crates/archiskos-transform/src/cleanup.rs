//! Copy, prefix registration, and the final empty-literal sweep.

use archiskos_core::graph::{Graph, Node, TriplePattern, TripleStore};
use archiskos_core::vocab::{rdf, skos, STANDARD_PREFIXES};

use crate::error::PassError;
use crate::namespace::ResolvedNamespace;
use crate::pipeline::{PassOutcome, Rewrite};
use crate::terms::Terms;

/// Pass 1: copy every source triple except those with an empty literal object.
pub fn copy_filtered<S: TripleStore>(source: &S, graph: &mut Graph) -> PassOutcome {
    let mut outcome = PassOutcome::default();
    let mut filtered = 0usize;

    for triple in source.triples() {
        if triple.object.is_empty_literal() {
            tracing::debug!(triple = %triple, "Filtering out empty literal statement");
            filtered += 1;
            continue;
        }
        outcome.add(graph, triple);
    }

    if filtered > 0 {
        tracing::debug!(filtered, "Dropped empty literals while copying source");
    }
    outcome
}

/// Pass 2: standard vocabulary prefixes plus the domain prefix.
pub fn register_prefixes(graph: &mut Graph, namespace: &ResolvedNamespace) -> PassOutcome {
    for (prefix, ns) in STANDARD_PREFIXES {
        graph.set_prefix(prefix, ns);
    }
    graph.set_prefix(namespace.prefix.clone(), namespace.namespace.clone());
    PassOutcome::default()
}

/// Pass 10: drop empty literals on the label-bearing predicates, then everywhere,
/// and verify the output invariants.
pub fn final_cleanup(
    graph: &mut Graph,
    terms: &Terms,
    scheme: Option<&str>,
) -> Result<PassOutcome, PassError> {
    let mut outcome = remove_empty_values(graph, skos::DEFINITION)
        .merge(remove_empty_values(graph, skos::PREF_LABEL));
    for predicate in &terms.label_predicates {
        outcome = outcome.merge(remove_empty_values(graph, predicate));
    }
    outcome = outcome.merge(remove_empty_literals(graph));

    verify(graph, scheme)?;
    Ok(outcome)
}

fn remove_empty_values(graph: &mut Graph, predicate: &str) -> PassOutcome {
    let mut rewrite = Rewrite::new();
    for triple in graph.matching(&TriplePattern::any().predicate(predicate)) {
        if triple.object.is_empty_literal() {
            tracing::debug!(triple = %triple, "Removing empty statement");
            rewrite.remove(triple);
        }
    }
    rewrite.apply(graph)
}

fn remove_empty_literals(graph: &mut Graph) -> PassOutcome {
    let mut rewrite = Rewrite::new();
    for triple in graph.iter().filter(|t| t.object.is_empty_literal()) {
        tracing::debug!(triple = %triple, "Post-processing: removing empty literal statement");
        rewrite.remove(triple.clone());
    }
    rewrite.apply(graph)
}

/// No empty literal remains, at most one resource is a concept scheme, and
/// every Concept sits in exactly that scheme.
fn verify(graph: &Graph, scheme: Option<&str>) -> Result<(), PassError> {
    if let Some(triple) = graph.iter().find(|t| t.object.is_empty_literal()) {
        return Err(PassError::InvariantViolated(format!(
            "empty literal survived cleanup: {triple}"
        )));
    }

    let schemes = graph.subjects_with(rdf::TYPE, &Node::resource(skos::CONCEPT_SCHEME));
    if schemes.len() > 1 {
        return Err(PassError::InvariantViolated(format!(
            "{} concept schemes in output: {}",
            schemes.len(),
            schemes.join(", ")
        )));
    }

    let Some(scheme) = scheme else {
        return Ok(());
    };
    let expected = Node::resource(scheme);
    for concept in graph.subjects_with(rdf::TYPE, &Node::resource(skos::CONCEPT)) {
        let memberships = graph.objects(&concept, skos::IN_SCHEME);
        if memberships.len() != 1 || memberships[0] != expected {
            return Err(PassError::InvariantViolated(format!(
                "concept <{concept}> has {} scheme memberships, expected exactly <{scheme}>",
                memberships.len()
            )));
        }
    }
    Ok(())
}
