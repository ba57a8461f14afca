//! Effective namespace resolution.
//!
//! A run publishes every domain IRI under one namespace: the model's local
//! data catalog address when it names a valid URL, the configured default
//! otherwise. The namespace also yields the short prefix used in output.

use archiskos_core::{ModelProperties, TransformConfig};
use serde::Serialize;
use url::Url;

use crate::error::NamespaceError;

/// Where the effective namespace came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceSource {
    Catalog,
    Default,
}

/// The namespace and prefix fixed for one transformation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNamespace {
    /// Absolute IRI ending in `/` or `#`.
    pub namespace: String,
    pub prefix: String,
    pub source: NamespaceSource,
}

impl ResolvedNamespace {
    /// The namespace without its trailing delimiter; names the ontology itself.
    pub fn root_iri(&self) -> &str {
        strip_delimiter(&self.namespace)
    }
}

/// Resolve the effective namespace from the model properties. Never fails.
pub fn resolve(properties: &ModelProperties, config: &TransformConfig) -> ResolvedNamespace {
    for (label, value) in properties.containing(&config.catalog_address_label) {
        match catalog_namespace(value) {
            Ok(namespace) => {
                let prefix = derive_prefix(&namespace, &config.fallback_prefix);
                tracing::debug!(
                    label,
                    namespace = %namespace,
                    prefix = %prefix,
                    "Using catalog namespace"
                );
                return ResolvedNamespace {
                    namespace,
                    prefix,
                    source: NamespaceSource::Catalog,
                };
            }
            Err(e) => {
                tracing::warn!(
                    label,
                    error = %e,
                    "Ignoring catalog address, falling back to default namespace"
                );
            }
        }
    }

    let namespace = ensure_delimiter(&config.default_namespace);
    let prefix = derive_prefix(&namespace, &config.fallback_prefix);
    ResolvedNamespace {
        namespace,
        prefix,
        source: NamespaceSource::Default,
    }
}

/// Validate a catalog address and normalize it into a namespace.
pub fn catalog_namespace(value: &str) -> Result<String, NamespaceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(NamespaceError::Empty);
    }

    let url = Url::parse(value).map_err(|e| NamespaceError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if url.host().is_none() {
        return Err(NamespaceError::InvalidUrl {
            value: value.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(ensure_delimiter(value))
}

/// Append `/` unless the namespace already ends in `/` or `#`.
pub fn ensure_delimiter(namespace: &str) -> String {
    if namespace.ends_with('/') || namespace.ends_with('#') {
        namespace.to_string()
    } else {
        format!("{namespace}/")
    }
}

fn strip_delimiter(namespace: &str) -> &str {
    namespace
        .strip_suffix('/')
        .or_else(|| namespace.strip_suffix('#'))
        .unwrap_or(namespace)
}

/// Short prefix name: first host label after dropping the scheme and `www.`.
pub fn derive_prefix(namespace: &str, fallback: &str) -> String {
    let without_scheme = namespace
        .split_once("://")
        .map_or(namespace, |(_, rest)| rest);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);

    without_www
        .split(['.', '/'])
        .find(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(label: &str, value: &str) -> ModelProperties {
        [(label, value)].into_iter().collect()
    }

    #[test]
    fn test_catalog_address_wins() {
        let config = TransformConfig::default();
        let resolved = resolve(
            &props("adresa lokálního katalogu dat", "https://data.dia.gov.cz"),
            &config,
        );
        assert_eq!(resolved.namespace, "https://data.dia.gov.cz/");
        assert_eq!(resolved.prefix, "data");
        assert_eq!(resolved.source, NamespaceSource::Catalog);
    }

    #[test]
    fn test_label_is_matched_by_substring() {
        let config = TransformConfig::default();
        let label = "Adresa: adresa lokálního katalogu dat (povinné)";
        let resolved = resolve(&props(label, "https://www.Example.org/ns#"), &config);
        assert_eq!(resolved.namespace, "https://www.Example.org/ns#");
        assert_eq!(resolved.prefix, "example");
    }

    #[test]
    fn test_invalid_address_falls_back() {
        let config = TransformConfig::default();
        for bad in ["", "   ", "not a url", "mailto:someone@example.org"] {
            let resolved = resolve(&props("adresa lokálního katalogu dat", bad), &config);
            assert_eq!(resolved.namespace, "https://slovník.gov.cz/", "{bad:?}");
            assert_eq!(resolved.prefix, "slovník");
            assert_eq!(resolved.source, NamespaceSource::Default);
        }
    }

    #[test]
    fn test_missing_property_uses_default() {
        let resolved = resolve(&ModelProperties::new(), &TransformConfig::default());
        assert_eq!(resolved.source, NamespaceSource::Default);
        assert_eq!(resolved.root_iri(), "https://slovník.gov.cz");
    }

    #[test]
    fn test_catalog_namespace_errors() {
        assert_eq!(catalog_namespace("  "), Err(NamespaceError::Empty));
        assert!(matches!(
            catalog_namespace("relative/path"),
            Err(NamespaceError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_derive_prefix_fallback() {
        assert_eq!(derive_prefix("https:///", "domain"), "domain");
        assert_eq!(derive_prefix("", "domain"), "domain");
        assert_eq!(derive_prefix("http://localhost/ns/", "domain"), "localhost");
    }

    #[test]
    fn test_root_iri_strips_hash() {
        let resolved = ResolvedNamespace {
            namespace: "https://example.org/ns#".to_string(),
            prefix: "example".to_string(),
            source: NamespaceSource::Catalog,
        };
        assert_eq!(resolved.root_iri(), "https://example.org/ns");
    }
}
