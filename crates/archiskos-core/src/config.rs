//! Configuration tables for archiskos.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (ARCHISKOS prefix, `__` separating nested keys)
//! 2. Config file (archiskos.toml)
//! 3. Defaults
//!
//! The defaults are the closed tables the transformation relies on: the
//! default namespace, the domain local names resolved against the effective
//! namespace, and the long-form public vocabulary paths. Once loaded the
//! settings are never mutated.

use serde::Deserialize;

use crate::error::Result;

/// Everything a transformation run consults besides its inputs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub vocabulary: DomainVocabulary,
}

/// Namespace and language defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    /// Namespace used when the model names no valid local data catalog.
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Language assigned to labels and definitions that carry none.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Fragment identifying the catalog-address model property.
    #[serde(default = "default_catalog_label")]
    pub catalog_address_label: String,

    /// Model property holding the concept-scheme description.
    #[serde(default = "default_description_label")]
    pub description_label: String,

    /// Prefix used when none can be derived from the namespace.
    #[serde(default = "default_fallback_prefix")]
    pub fallback_prefix: String,
}

fn default_namespace() -> String {
    "https://slovník.gov.cz/".to_string()
}

fn default_language() -> String {
    "cs".to_string()
}

fn default_catalog_label() -> String {
    "adresa lokálního katalogu dat".to_string()
}

fn default_description_label() -> String {
    "popis".to_string()
}

fn default_fallback_prefix() -> String {
    "domain".to_string()
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            default_language: default_language(),
            catalog_address_label: default_catalog_label(),
            description_label: default_description_label(),
            fallback_prefix: default_fallback_prefix(),
        }
    }
}

/// Domain local names.
///
/// Type and predicate names are appended to the effective namespace of a run.
/// The `*_path` entries and the markers under them are appended to the
/// default namespace, where the shared public vocabularies live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DomainVocabulary {
    // Types
    pub concept_type: String,
    pub class_type: String,
    pub property_type: String,
    pub relationship_type: String,
    pub subject_role_type: String,
    pub object_role_type: String,
    pub public_data_type: String,
    pub non_public_data_type: String,

    // Predicates
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

    /// Predicates whose empty values are swept in the final cleanup.
    pub label_predicates: Vec<String>,

    // Public-sector vocabulary
    pub public_sector_path: String,
    pub subject_role_marker: String,
    pub object_role_marker: String,

    // Legislative vocabulary (Act 111/2009)
    pub legislative_path: String,
    pub public_data_marker: String,
    pub non_public_data_marker: String,
    pub supersedes_long: String,

    // Agenda vocabulary
    pub agenda_path: String,
    pub public_service_flag_long: String,
    pub information_system_long: String,
    pub agenda_long: String,
}

impl Default for DomainVocabulary {
    fn default() -> Self {
        Self {
            concept_type: "typ-pojmu".to_string(),
            class_type: "typ-třídy".to_string(),
            property_type: "typ-vlastnosti".to_string(),
            relationship_type: "typ-vztahu".to_string(),
            subject_role_type: "typ-subjektu".to_string(),
            object_role_type: "typ-objektu".to_string(),
            public_data_type: "veřejný-údaj".to_string(),
            non_public_data_type: "neveřejný-údaj".to_string(),

            definition: "definice".to_string(),
            description: "popis".to_string(),
            defined_over: "definiční-obor".to_string(),
            range_of_values: "obor-hodnot".to_string(),
            source: "zdroj".to_string(),
            legal_basis: "související-zdroj".to_string(),
            public_service_flag: "je-pojem-sdílen-v-ppdf".to_string(),
            supersedes: "ustanovení-dokládající-neveřejnost".to_string(),
            broader_type: "nadřazená-třída".to_string(),
            agenda: "agenda".to_string(),
            information_system: "agendový-informační-systém".to_string(),

            label_predicates: vec![
                "název".to_string(),
                "alternativní-název".to_string(),
                "definice".to_string(),
                "popis".to_string(),
                "zdroj".to_string(),
                "související-zdroj".to_string(),
                "ekvivalentní-pojem".to_string(),
            ],

            public_sector_path: "veřejný-sektor/pojem/".to_string(),
            subject_role_marker: "subjekt-práva".to_string(),
            object_role_marker: "objekt-práva".to_string(),

            legislative_path: "legislativní/sbírka/111/2009/pojem/".to_string(),
            public_data_marker: "veřejný-údaj".to_string(),
            non_public_data_marker: "neveřejný-údaj".to_string(),
            supersedes_long: "je-vymezen-ustanovením-stanovujícím-jeho-neveřejnost".to_string(),

            agenda_path: "agendový/104/pojem/".to_string(),
            public_service_flag_long: "je-sdílen-v-propojeném-datovém-fondu".to_string(),
            information_system_long: "je-veden-v-agendovém-informačním-systému".to_string(),
            agenda_long: "sdílí-se-v-agendě".to_string(),
        }
    }
}

/// Load settings from `<file_prefix>.toml` (optional) and the environment.
///
/// Missing sections fall back to their defaults; malformed ones are errors.
pub fn load_settings(file_prefix: &str) -> Result<Settings> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("ARCHISKOS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = Settings {
        transform: section_or_default(&cfg, "transform")?,
        vocabulary: section_or_default(&cfg, "vocabulary")?,
    };

    tracing::debug!(
        default_namespace = %settings.transform.default_namespace,
        default_language = %settings.transform.default_language,
        "Settings loaded"
    );

    Ok(settings)
}

fn section_or_default<T>(cfg: &config::Config, key: &str) -> Result<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    match cfg.get::<T>(key) {
        Ok(section) => Ok(section),
        Err(config::ConfigError::NotFound(_)) => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}
