//! archiskos-transform: Ontology transformation engine for architecture models.
//!
//! Takes the raw graph produced by the model parser, together with the
//! model's display name and metadata properties, and rewrites it into a
//! SKOS/OWL thesaurus under a single effective namespace. The work happens
//! in ten ordered passes over a private working graph; the source graph is
//! never mutated and a failing pass never leaks a partial result.

pub mod cleanup;
pub mod concepts;
pub mod error;
pub mod input;
pub mod labels;
pub mod namespace;
pub mod pipeline;
pub mod properties;
pub mod report;
pub mod scheme;
pub mod terms;

pub use error::{InputError, NamespaceError, PassError, TransformError};
pub use input::ModelDocument;
pub use namespace::{NamespaceSource, ResolvedNamespace};
pub use pipeline::PassId;
pub use report::{PassRecord, RunId, TransformReport};

use archiskos_core::graph::{Graph, TripleStore};
use archiskos_core::{ModelProperties, Settings};
use chrono::Utc;

use crate::namespace::ensure_delimiter;
use crate::pipeline::PassContext;
use crate::terms::Terms;

/// The main transformation engine.
///
/// Holds only immutable settings, so one engine can serve any number of
/// concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    settings: Settings,
}

impl TransformEngine {
    /// Create an engine with the built-in namespace and vocabulary tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use loaded settings instead of the defaults.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve the effective namespace a run over these properties would use.
    pub fn resolve_namespace(&self, properties: &ModelProperties) -> ResolvedNamespace {
        namespace::resolve(properties, &self.settings.transform)
    }

    /// Transform `source` into the target vocabulary.
    pub fn transform<S: TripleStore>(
        &self,
        source: &S,
        model_name: &str,
        properties: &ModelProperties,
    ) -> error::Result<Graph> {
        self.transform_with_report(source, model_name, properties)
            .map(|(graph, _)| graph)
    }

    /// Transform `source` and report what each pass did.
    ///
    /// Orchestrates: resolve namespace → resolve domain terms → run passes →
    /// fingerprint the output.
    pub fn transform_with_report<S: TripleStore>(
        &self,
        source: &S,
        model_name: &str,
        properties: &ModelProperties,
    ) -> error::Result<(Graph, TransformReport)> {
        let run_id = RunId::new();
        let span = tracing::info_span!("transform", run_id = %run_id, model = model_name);
        let _guard = span.enter();

        let started_at = Utc::now();
        let config = &self.settings.transform;
        let namespace = self.resolve_namespace(properties);
        let terms = Terms::resolve(
            &namespace.namespace,
            &ensure_delimiter(&config.default_namespace),
            &self.settings.vocabulary,
        );

        tracing::info!(
            namespace = %namespace.namespace,
            prefix = %namespace.prefix,
            triples = source.len(),
            "Starting transformation"
        );

        let ctx = PassContext {
            terms: &terms,
            namespace: &namespace,
            model_name,
            properties,
            config,
        };
        let output = pipeline::run(source, &ctx)?;

        let mut report = TransformReport::new(run_id, &namespace, source.len(), started_at);
        report.output_triples = output.graph.len();
        report.passes = output.passes;
        report.fingerprint = output.graph.fingerprint();
        report.completed_at = Utc::now();

        tracing::info!(
            input_triples = report.input_triples,
            output_triples = report.output_triples,
            elapsed_us = report.elapsed_us(),
            "Transformation completed"
        );

        Ok((output.graph, report))
    }
}
