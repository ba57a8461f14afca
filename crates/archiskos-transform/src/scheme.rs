//! The concept scheme: its creation and the membership of every concept.

use archiskos_core::graph::{require_iri, Graph, Node, Triple, TriplePattern, TripleStore};
use archiskos_core::vocab::{dct, owl, rdf, skos};

use crate::error::PassError;
use crate::pipeline::{PassContext, PassOutcome, Rewrite};

/// Pass 3: find or mint the ontology resource and make it the concept scheme.
///
/// Returns the scheme IRI for pass 9.
pub fn create_concept_scheme(
    graph: &mut Graph,
    ctx: &PassContext<'_>,
) -> Result<(String, PassOutcome), PassError> {
    let mut outcome = PassOutcome::default();
    let ontology = Node::resource(owl::ONTOLOGY);

    let scheme = match graph.subjects_with(rdf::TYPE, &ontology).into_iter().next() {
        Some(existing) => {
            tracing::debug!(scheme = %existing, "Reusing existing ontology resource");
            existing
        }
        None => {
            let root = ctx.namespace.root_iri();
            require_iri(root).map_err(|_| PassError::InvalidIri {
                iri: root.to_string(),
            })?;
            outcome.add(graph, Triple::new(root, rdf::TYPE, ontology));
            root.to_string()
        }
    };

    let concept_scheme = Node::resource(skos::CONCEPT_SCHEME);
    let mut demoted = Rewrite::new();
    for other in graph.subjects_with(rdf::TYPE, &concept_scheme) {
        if other != scheme {
            tracing::debug!(resource = %other, "Demoting source concept scheme");
            demoted.remove(Triple::new(other, rdf::TYPE, concept_scheme.clone()));
        }
    }
    outcome = outcome.merge(demoted.apply(graph));
    outcome.add(graph, Triple::new(scheme.clone(), rdf::TYPE, concept_scheme));

    let lang = ctx.config.default_language.as_str();
    if !ctx.model_name.trim().is_empty() {
        outcome = outcome.merge(replace_value(
            graph,
            &scheme,
            skos::PREF_LABEL,
            Node::lang(ctx.model_name, lang),
        ));
    }

    if let Some(description) = ctx.properties.non_empty(&ctx.config.description_label) {
        outcome = outcome.merge(replace_value(
            graph,
            &scheme,
            dct::DESCRIPTION,
            Node::lang(description, lang),
        ));
    }

    Ok((scheme, outcome))
}

fn replace_value(graph: &mut Graph, subject: &str, predicate: &str, value: Node) -> PassOutcome {
    let removed =
        graph.remove_matching(&TriplePattern::any().subject(subject).predicate(predicate));
    let added = usize::from(graph.add(Triple::new(subject, predicate, value)));
    PassOutcome { added, removed }
}

/// Pass 9: point every concept at the scheme, replacing prior memberships.
pub fn assign_scheme_membership(graph: &mut Graph, scheme: Option<&str>) -> PassOutcome {
    let scheme = match scheme {
        Some(iri) => iri.to_string(),
        None => match graph
            .subjects_with(rdf::TYPE, &Node::resource(skos::CONCEPT_SCHEME))
            .into_iter()
            .next()
        {
            Some(iri) => iri,
            None => {
                tracing::warn!("No concept scheme found, skipping scheme membership");
                return PassOutcome::default();
            }
        },
    };

    let mut rewrite = Rewrite::new();
    for concept in graph.subjects_with(rdf::TYPE, &Node::resource(skos::CONCEPT)) {
        let memberships = TriplePattern::any()
            .subject(&concept)
            .predicate(skos::IN_SCHEME);
        for prior in graph.matching(&memberships) {
            rewrite.remove(prior);
        }
        rewrite.add(Triple::new(concept, skos::IN_SCHEME, Node::resource(&scheme)));
    }
    rewrite.apply(graph)
}
