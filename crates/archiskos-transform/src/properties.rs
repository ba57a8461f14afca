//! Passes 7 and 8: domain/range materialization and standard property remapping.

use archiskos_core::graph::{Graph, Triple, TriplePattern, TripleStore};
use archiskos_core::vocab::{dct, rdfs};
use archiskos_datatype::boolean_literal;

use crate::pipeline::{PassOutcome, Rewrite};
use crate::terms::Terms;

/// Pass 7: resource-valued "defined over" and "range of values" statements
/// become `rdfs:domain` and `rdfs:range`. Literal objects are left alone.
pub fn materialize_domain_range(graph: &mut Graph, terms: &Terms) -> PassOutcome {
    let domain = move_resource_values(graph, &terms.defined_over, rdfs::DOMAIN);
    let range = move_resource_values(graph, &terms.range_of_values, rdfs::RANGE);
    domain.merge(range)
}

fn move_resource_values(graph: &mut Graph, from: &str, to: &str) -> PassOutcome {
    let mut rewrite = Rewrite::new();
    for triple in graph.matching(&TriplePattern::any().predicate(from)) {
        if triple.object.is_resource() {
            rewrite.replace_predicate(triple, to);
        }
    }
    rewrite.apply(graph)
}

/// Pass 8: move the fixed domain predicates onto their standard counterparts.
pub fn remap_standard_properties(graph: &mut Graph, terms: &Terms) -> PassOutcome {
    let outcome = map_property(graph, &terms.source, dct::SOURCE)
        .merge(map_property(graph, &terms.legal_basis, dct::REFERENCES))
        .merge(map_boolean_property(
            graph,
            &terms.public_service_flag,
            &terms.public_service_flag_long,
        ))
        .merge(map_property(graph, &terms.supersedes, &terms.supersedes_long))
        .merge(map_property(graph, &terms.broader_type, rdfs::SUB_CLASS_OF))
        .merge(map_property(
            graph,
            &terms.information_system,
            &terms.information_system_long,
        ))
        .merge(map_property(graph, &terms.agenda, &terms.agenda_long));

    let mut rewrite = Rewrite::new();
    for triple in graph.matching(&TriplePattern::any().predicate(&terms.description)) {
        if triple.object.is_empty_literal() {
            rewrite.remove(triple);
        }
    }
    outcome.merge(rewrite.apply(graph))
}

/// Empty literals are dropped; everything else moves to `to` unchanged.
fn map_property(graph: &mut Graph, from: &str, to: &str) -> PassOutcome {
    let mut rewrite = Rewrite::new();
    for triple in graph.matching(&TriplePattern::any().predicate(from)) {
        if triple.object.is_empty_literal() {
            tracing::debug!(triple = %triple, "Dropping empty statement instead of remapping");
            rewrite.remove(triple);
        } else {
            rewrite.replace_predicate(triple, to);
        }
    }
    rewrite.apply(graph)
}

/// Like [`map_property`], with the value coerced to `xsd:boolean`.
/// Non-literal values are dropped.
fn map_boolean_property(graph: &mut Graph, from: &str, to: &str) -> PassOutcome {
    let mut rewrite = Rewrite::new();
    for triple in graph.matching(&TriplePattern::any().predicate(from)) {
        match triple.object.literal_value() {
            Some(value) if !value.trim().is_empty() => {
                rewrite.add(Triple::new(
                    triple.subject.clone(),
                    to,
                    boolean_literal(value),
                ));
            }
            _ => tracing::debug!(triple = %triple, "Dropping flag without a usable value"),
        }
        rewrite.remove(triple);
    }
    rewrite.apply(graph)
}
