//! Pass 4: concept typing.

use archiskos_core::graph::{Graph, Node, Triple};
use archiskos_core::vocab::{owl, rdf, rdfs, skos, xsd};

use crate::pipeline::{PassOutcome, Rewrite};
use crate::terms::Terms;

/// Type every concept candidate as a SKOS concept and map its domain kind
/// onto the matching OWL and public-sector types.
pub fn type_concepts(graph: &mut Graph, terms: &Terms) -> PassOutcome {
    let mut rewrite = Rewrite::new();
    let candidates = graph.subjects_with(rdf::TYPE, &Node::resource(&terms.concept_type));

    for resource in &candidates {
        let has_type = |type_iri: &str| graph.has(resource, rdf::TYPE, &Node::resource(type_iri));
        let mut add_type = |type_iri: &str| {
            rewrite.add(Triple::new(resource.as_str(), rdf::TYPE, Node::resource(type_iri)));
        };

        add_type(skos::CONCEPT);

        if has_type(&terms.class_type) {
            add_type(owl::CLASS);
            if has_type(&terms.subject_role_type) {
                add_type(&terms.subject_role_marker);
            } else if has_type(&terms.object_role_type) {
                add_type(&terms.object_role_marker);
            }
        } else if has_type(&terms.property_type) {
            add_type(property_kind(graph, resource, terms));
        } else if has_type(&terms.relationship_type) {
            add_type(owl::OBJECT_PROPERTY);
        }

        if has_type(&terms.public_data_type) {
            add_type(&terms.public_data_marker);
        } else if has_type(&terms.non_public_data_type) {
            add_type(&terms.non_public_data_marker);
        }
    }

    let outcome = rewrite.apply(graph);
    tracing::debug!(concepts = candidates.len(), "Typed concept candidates");
    outcome
}

/// An XSD-valued range makes a datatype property; any other resource range an
/// object property. Without a resource range the property defaults to datatype.
///
/// An OWL property type already on the resource stands. Pass 7 moves the range
/// onto `rdfs:range`, where it may sit next to older ranges, so the output of a
/// run is classified from its own typing rather than from the ranges again.
fn property_kind(graph: &Graph, resource: &str, terms: &Terms) -> &'static str {
    for kind in [owl::DATATYPE_PROPERTY, owl::OBJECT_PROPERTY] {
        if graph.has(resource, rdf::TYPE, &Node::resource(kind)) {
            return kind;
        }
    }

    let range = graph
        .objects(resource, &terms.range_of_values)
        .into_iter()
        .chain(graph.objects(resource, rdfs::RANGE))
        .find_map(|node| node.as_iri().map(str::to_string));

    match range {
        Some(iri) if !iri.starts_with(xsd::NS) => owl::OBJECT_PROPERTY,
        _ => owl::DATATYPE_PROPERTY,
    }
}
