//! End-to-end tests of the transformation pipeline through the public API.
//!
//! Run with: cargo test --package archiskos-transform --test pipeline

use archiskos_core::graph::{Graph, Node, Triple, TriplePattern, TripleStore};
use archiskos_core::vocab::{dct, owl, rdf, rdfs, skos, xsd};
use archiskos_core::ModelProperties;
use archiskos_transform::{ModelDocument, NamespaceSource, PassId, TransformEngine};

const NS: &str = "https://slovník.gov.cz/";
const SCHEME: &str = "https://slovník.gov.cz";
const PERSON: &str = "https://ex.org/Person";

fn domain(local: &str) -> String {
    format!("{NS}{local}")
}

fn type_triple(subject: &str, type_iri: &str) -> Triple {
    Triple::new(subject, rdf::TYPE, Node::resource(type_iri))
}

fn person_source() -> Graph {
    [
        type_triple(PERSON, &domain("typ-pojmu")),
        type_triple(PERSON, &domain("typ-třídy")),
        Triple::new(PERSON, rdfs::LABEL, Node::lang("Person", "cs")),
    ]
    .into_iter()
    .collect()
}

/// A model touching every pass, with a few blank values sprinkled in.
fn rich_source() -> Graph {
    let address = "https://ex.org/Adresa";
    let name = "https://ex.org/jméno";
    let lives_at = "https://ex.org/bydlí-na";

    let mut g = person_source();
    g.add(Triple::new(PERSON, rdfs::LABEL, Node::lang("Person", "en")));
    g.add(Triple::new(PERSON, &domain("definice"), Node::plain("Fyzická osoba")));
    g.add(Triple::new(PERSON, &domain("definice"), Node::plain(" ")));
    g.add(Triple::new(PERSON, &domain("popis"), Node::plain("")));
    let law = Node::typed("https://e-sbirka.cz/sb/2000/111", xsd::ANY_URI);
    g.add(Triple::new(PERSON, &domain("zdroj"), law));
    g.add(Triple::new(PERSON, &domain("je-pojem-sdílen-v-ppdf"), Node::plain("ano")));
    let parent = Node::resource("https://ex.org/Subjekt");
    g.add(Triple::new(PERSON, &domain("nadřazená-třída"), parent));
    g.add(type_triple(PERSON, &domain("veřejný-údaj")));
    let old_scheme = Node::resource("https://old.example.org/scheme");
    g.add(Triple::new(PERSON, skos::IN_SCHEME, old_scheme));

    g.add(type_triple(address, &domain("typ-pojmu")));
    g.add(type_triple(address, &domain("typ-třídy")));
    g.add(Triple::new(address, rdfs::LABEL, Node::plain("Adresa")));

    g.add(type_triple(name, &domain("typ-pojmu")));
    g.add(type_triple(name, &domain("typ-vlastnosti")));
    g.add(Triple::new(name, &domain("definiční-obor"), Node::resource(PERSON)));
    g.add(Triple::new(name, &domain("obor-hodnot"), Node::resource(xsd::STRING)));
    g.add(Triple::new(name, rdfs::LABEL, Node::lang("", "cs")));

    g.add(type_triple(lives_at, &domain("typ-pojmu")));
    g.add(type_triple(lives_at, &domain("typ-vlastnosti")));
    g.add(Triple::new(lives_at, &domain("obor-hodnot"), Node::resource(address)));
    g.add(Triple::new(lives_at, &domain("definiční-obor"), Node::plain("Osoba")));
    g
}

fn properties() -> ModelProperties {
    [("popis", "Slovník pojmů registru osob")].into_iter().collect()
}

#[test]
fn test_person_scenario() {
    let engine = TransformEngine::new();
    let out = engine
        .transform(&person_source(), "Registr osob", &ModelProperties::new())
        .unwrap();

    assert!(out.contains(&type_triple(PERSON, skos::CONCEPT)));
    assert!(out.contains(&type_triple(PERSON, owl::CLASS)));
    assert!(out.has(PERSON, skos::PREF_LABEL, &Node::lang("Person", "cs")));
    assert!(out.has(PERSON, skos::IN_SCHEME, &Node::resource(SCHEME)));
    assert!(out.matching(&TriplePattern::any().predicate(rdfs::LABEL)).is_empty());

    assert!(out.contains(&type_triple(SCHEME, skos::CONCEPT_SCHEME)));
    assert!(out.has(SCHEME, skos::PREF_LABEL, &Node::lang("Registr osob", "cs")));
    assert_eq!(out.prefixes().get("slovník").map(String::as_str), Some(NS));
}

#[test]
fn test_transform_is_idempotent() {
    let engine = TransformEngine::new();
    let once = engine
        .transform(&rich_source(), "Registr osob", &properties())
        .unwrap();
    let twice = engine.transform(&once, "Registr osob", &properties()).unwrap();

    assert!(once.same_triples(&twice));
    assert_eq!(once.fingerprint(), twice.fingerprint());
}

#[test]
fn test_property_with_both_range_forms_is_idempotent() {
    let property = "https://ex.org/p";
    let source: Graph = [
        type_triple(property, &domain("typ-pojmu")),
        type_triple(property, &domain("typ-vlastnosti")),
        Triple::new(property, rdfs::RANGE, Node::resource("https://ex.org/Foo")),
        Triple::new(property, &domain("obor-hodnot"), Node::resource(xsd::STRING)),
    ]
    .into_iter()
    .collect();

    let engine = TransformEngine::new();
    let once = engine.transform(&source, "Model", &ModelProperties::new()).unwrap();
    let twice = engine.transform(&once, "Model", &ModelProperties::new()).unwrap();

    for out in [&once, &twice] {
        assert!(out.contains(&type_triple(property, owl::DATATYPE_PROPERTY)));
        assert!(!out.contains(&type_triple(property, owl::OBJECT_PROPERTY)));
    }
    assert!(once.same_triples(&twice));
}

#[test]
fn test_source_concept_scheme_is_not_kept() {
    let mut source = person_source();
    source.add(type_triple("https://ex.org/OldScheme", skos::CONCEPT_SCHEME));

    let engine = TransformEngine::new();
    let once = engine.transform(&source, "Model", &ModelProperties::new()).unwrap();
    let schemes = once.subjects_with(rdf::TYPE, &Node::resource(skos::CONCEPT_SCHEME));
    assert_eq!(schemes, vec![SCHEME.to_string()]);
    assert_eq!(once.objects(PERSON, skos::IN_SCHEME), vec![Node::resource(SCHEME)]);

    let twice = engine.transform(&once, "Model", &ModelProperties::new()).unwrap();
    assert!(once.same_triples(&twice));
}

#[test]
fn test_language_tagged_values_pass_through_untyped() {
    let doc = ModelDocument::parse(
        r#"{
            "name": "Registr osob",
            "properties": {},
            "triples": [
                { "subject": "https://ex.org/Person",
                  "predicate": "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
                  "object": { "iri": "https://slovník.gov.cz/typ-pojmu" } },
                { "subject": "https://ex.org/Person",
                  "predicate": "https://ex.org/aktivní",
                  "object": { "value": "ano", "lang": "cs" } },
                { "subject": "https://ex.org/Person",
                  "predicate": "https://ex.org/datum-vzniku",
                  "object": { "value": "15.01.2024", "lang": "cs" } },
                { "subject": "https://ex.org/Person",
                  "predicate": "https://ex.org/verze",
                  "object": { "value": "1.2.3" } }
            ]
        }"#,
    )
    .unwrap();

    let out = TransformEngine::new()
        .transform(&doc.to_graph().unwrap(), &doc.name, &doc.properties)
        .unwrap();

    assert_eq!(
        out.objects(PERSON, "https://ex.org/aktivní"),
        vec![Node::lang("ano", "cs")]
    );
    assert_eq!(
        out.objects(PERSON, "https://ex.org/datum-vzniku"),
        vec![Node::lang("15.01.2024", "cs")]
    );
    assert_eq!(
        out.objects(PERSON, "https://ex.org/verze"),
        vec![Node::typed("1.2.3", xsd::STRING)]
    );
}

#[test]
fn test_transform_is_deterministic() {
    let engine = TransformEngine::new();
    let a = engine.transform(&rich_source(), "Registr osob", &properties()).unwrap();
    let b = engine.transform(&rich_source(), "Registr osob", &properties()).unwrap();
    assert_eq!(a.triples(), b.triples());
}

#[test]
fn test_no_empty_literals_survive() {
    let engine = TransformEngine::new();
    let out = engine
        .transform(&rich_source(), "Registr osob", &properties())
        .unwrap();
    assert!(out.iter().all(|t| !t.object.is_empty_literal()));
}

#[test]
fn test_every_concept_in_exactly_one_scheme() {
    let engine = TransformEngine::new();
    let out = engine
        .transform(&rich_source(), "Registr osob", &properties())
        .unwrap();

    let schemes = out.subjects_with(rdf::TYPE, &Node::resource(skos::CONCEPT_SCHEME));
    assert_eq!(schemes, vec![SCHEME.to_string()]);

    let concepts = out.subjects_with(rdf::TYPE, &Node::resource(skos::CONCEPT));
    assert_eq!(concepts.len(), 4);
    for concept in concepts {
        assert_eq!(
            out.objects(&concept, skos::IN_SCHEME),
            vec![Node::resource(SCHEME)],
            "{concept}"
        );
    }
}

#[test]
fn test_later_label_wins() {
    let mut source = person_source();
    source.add(Triple::new(PERSON, rdfs::LABEL, Node::lang("Human", "cs")));

    let out = TransformEngine::new()
        .transform(&source, "Model", &ModelProperties::new())
        .unwrap();
    assert_eq!(
        out.objects(PERSON, skos::PREF_LABEL),
        vec![Node::lang("Human", "cs")]
    );
}

#[test]
fn test_rich_model_mapping() {
    let out = TransformEngine::new()
        .transform(&rich_source(), "Registr osob", &properties())
        .unwrap();
    let name = "https://ex.org/jméno";
    let lives_at = "https://ex.org/bydlí-na";

    assert_eq!(
        out.objects(PERSON, skos::DEFINITION),
        vec![Node::lang("Fyzická osoba", "cs")]
    );
    assert_eq!(
        out.objects(PERSON, dct::SOURCE),
        vec![Node::typed("https://e-sbirka.cz/sb/2000/111", xsd::ANY_URI)]
    );
    assert_eq!(
        out.objects(
            PERSON,
            "https://slovník.gov.cz/agendový/104/pojem/je-sdílen-v-propojeném-datovém-fondu"
        ),
        vec![Node::typed("true", xsd::BOOLEAN)]
    );
    assert_eq!(
        out.objects(PERSON, rdfs::SUB_CLASS_OF),
        vec![Node::resource("https://ex.org/Subjekt")]
    );
    assert!(out.contains(&type_triple(
        PERSON,
        "https://slovník.gov.cz/legislativní/sbírka/111/2009/pojem/veřejný-údaj"
    )));
    assert!(out.has(
        SCHEME,
        dct::DESCRIPTION,
        &Node::lang("Slovník pojmů registru osob", "cs")
    ));

    assert!(out.contains(&type_triple(name, owl::DATATYPE_PROPERTY)));
    assert_eq!(out.objects(name, rdfs::DOMAIN), vec![Node::resource(PERSON)]);
    assert_eq!(out.objects(name, rdfs::RANGE), vec![Node::resource(xsd::STRING)]);
    assert!(out.objects(name, skos::PREF_LABEL).is_empty());

    assert!(out.contains(&type_triple(lives_at, owl::OBJECT_PROPERTY)));
    assert!(!out.contains(&type_triple(lives_at, owl::DATATYPE_PROPERTY)));
    assert_eq!(
        out.objects(lives_at, rdfs::RANGE),
        vec![Node::resource("https://ex.org/Adresa")]
    );
    assert_eq!(
        out.objects(lives_at, &domain("definiční-obor")),
        vec![Node::plain("Osoba")]
    );
}

#[test]
fn test_source_is_not_mutated() {
    let source = rich_source();
    let snapshot = source.clone();

    TransformEngine::new()
        .transform(&source, "Registr osob", &properties())
        .unwrap();

    assert_eq!(source.triples(), snapshot.triples());
}

#[test]
fn test_catalog_namespace_drives_domain_terms() {
    let catalog = "https://data.example.org/slovník/";
    let subject = "https://data.example.org/slovník/osoba";
    let source: Graph = [
        type_triple(subject, &format!("{catalog}typ-pojmu")),
        type_triple(subject, &format!("{catalog}typ-třídy")),
        type_triple(subject, &format!("{catalog}typ-subjektu")),
        // Domain types under the default namespace do not apply here.
        type_triple(subject, &domain("veřejný-údaj")),
    ]
    .into_iter()
    .collect();
    let props: ModelProperties = [(
        "adresa lokálního katalogu dat",
        "https://data.example.org/slovník",
    )]
    .into_iter()
    .collect();

    let (out, report) = TransformEngine::new()
        .transform_with_report(&source, "Katalog", &props)
        .unwrap();

    assert_eq!(report.namespace, catalog);
    assert_eq!(report.prefix, "data");
    assert_eq!(report.namespace_source, NamespaceSource::Catalog);

    let scheme = "https://data.example.org/slovník";
    assert!(out.contains(&type_triple(scheme, skos::CONCEPT_SCHEME)));
    assert!(out.has(subject, skos::IN_SCHEME, &Node::resource(scheme)));
    assert!(out.contains(&type_triple(
        subject,
        "https://slovník.gov.cz/veřejný-sektor/pojem/subjekt-práva"
    )));
    assert!(!out.contains(&type_triple(
        subject,
        "https://slovník.gov.cz/legislativní/sbírka/111/2009/pojem/veřejný-údaj"
    )));
}

#[test]
fn test_report_covers_every_pass() {
    let (out, report) = TransformEngine::new()
        .transform_with_report(&rich_source(), "Registr osob", &properties())
        .unwrap();

    let order: Vec<PassId> = report.passes.iter().map(|p| p.pass).collect();
    assert_eq!(order, PassId::ORDER.to_vec());
    assert_eq!(report.input_triples, rich_source().len());
    assert_eq!(report.output_triples, out.len());
    assert_eq!(report.fingerprint, out.fingerprint());
    assert!(report.completed_at >= report.started_at);

    let labels = report.pass(PassId::LabelUnification).unwrap();
    assert!(labels.removed >= 3);
}

#[test]
fn test_model_document_round_trip_through_engine() {
    let doc = ModelDocument::parse(
        r#"{
            "name": "Registr osob",
            "properties": { "popis": "Pojmy" },
            "triples": [
                { "subject": "https://ex.org/Person",
                  "predicate": "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
                  "object": { "iri": "https://slovník.gov.cz/typ-pojmu" } },
                { "subject": "https://ex.org/Person",
                  "predicate": "http://www.w3.org/2000/01/rdf-schema#label",
                  "object": { "value": "Osoba" } },
                { "subject": "https://ex.org/Person",
                  "predicate": "https://slovník.gov.cz/definice",
                  "object": { "value": "" } }
            ]
        }"#,
    )
    .unwrap();

    let source = doc.to_graph().unwrap();
    let out = TransformEngine::new()
        .transform(&source, &doc.name, &doc.properties)
        .unwrap();

    assert!(out.has(PERSON, skos::PREF_LABEL, &Node::lang("Osoba", "cs")));
    assert!(out.objects(PERSON, skos::DEFINITION).is_empty());
    assert!(out.has(SCHEME, dct::DESCRIPTION, &Node::lang("Pojmy", "cs")));
}
