//! Domain IRIs resolved for one run.

use archiskos_core::DomainVocabulary;

/// Every domain type and predicate IRI a pipeline run touches.
///
/// Domain names live under the effective namespace; the long-form public
/// vocabulary terms live under the default namespace.
#[derive(Debug, Clone)]
pub struct Terms {
    pub concept_type: String,
    pub class_type: String,
    pub property_type: String,
    pub relationship_type: String,
    pub subject_role_type: String,
    pub object_role_type: String,
    pub public_data_type: String,
    pub non_public_data_type: String,

    pub definition: String,
    pub description: String,
    pub defined_over: String,
    pub range_of_values: String,
    pub source: String,
    pub legal_basis: String,
    pub public_service_flag: String,
    pub supersedes: String,
    pub broader_type: String,
    pub agenda: String,
    pub information_system: String,
    pub label_predicates: Vec<String>,

    pub subject_role_marker: String,
    pub object_role_marker: String,
    pub public_data_marker: String,
    pub non_public_data_marker: String,
    pub supersedes_long: String,
    pub public_service_flag_long: String,
    pub information_system_long: String,
    pub agenda_long: String,
}

impl Terms {
    pub fn resolve(namespace: &str, public_base: &str, vocab: &DomainVocabulary) -> Self {
        let ns = |local: &str| format!("{namespace}{local}");
        let public_sector =
            |local: &str| format!("{public_base}{}{local}", vocab.public_sector_path);
        let legislative = |local: &str| format!("{public_base}{}{local}", vocab.legislative_path);
        let agenda = |local: &str| format!("{public_base}{}{local}", vocab.agenda_path);

        Self {
            concept_type: ns(&vocab.concept_type),
            class_type: ns(&vocab.class_type),
            property_type: ns(&vocab.property_type),
            relationship_type: ns(&vocab.relationship_type),
            subject_role_type: ns(&vocab.subject_role_type),
            object_role_type: ns(&vocab.object_role_type),
            public_data_type: ns(&vocab.public_data_type),
            non_public_data_type: ns(&vocab.non_public_data_type),

            definition: ns(&vocab.definition),
            description: ns(&vocab.description),
            defined_over: ns(&vocab.defined_over),
            range_of_values: ns(&vocab.range_of_values),
            source: ns(&vocab.source),
            legal_basis: ns(&vocab.legal_basis),
            public_service_flag: ns(&vocab.public_service_flag),
            supersedes: ns(&vocab.supersedes),
            broader_type: ns(&vocab.broader_type),
            agenda: ns(&vocab.agenda),
            information_system: ns(&vocab.information_system),
            label_predicates: vocab.label_predicates.iter().map(|l| ns(l)).collect(),

            subject_role_marker: public_sector(&vocab.subject_role_marker),
            object_role_marker: public_sector(&vocab.object_role_marker),
            public_data_marker: legislative(&vocab.public_data_marker),
            non_public_data_marker: legislative(&vocab.non_public_data_marker),
            supersedes_long: legislative(&vocab.supersedes_long),
            public_service_flag_long: agenda(&vocab.public_service_flag_long),
            information_system_long: agenda(&vocab.information_system_long),
            agenda_long: agenda(&vocab.agenda_long),
        }
    }
}
