//! The ordered pass pipeline.
//!
//! Copies the source into a private working graph and applies ten rewrite
//! passes strictly in order. Passes that rewrite statements collect their
//! additions and removals first and apply them afterwards, never mutating
//! the graph while scanning it. The working graph is only handed out once
//! every pass has succeeded.

use std::time::Instant;

use archiskos_core::graph::{Graph, Triple, TripleStore};
use archiskos_core::{ModelProperties, TransformConfig};
use serde::Serialize;

use crate::cleanup;
use crate::concepts;
use crate::error::{PassError, Result, TransformError};
use crate::labels;
use crate::namespace::ResolvedNamespace;
use crate::properties;
use crate::report::PassRecord;
use crate::scheme;
use crate::terms::Terms;

/// Identifies a pass in logs, reports, and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassId {
    CopyFilter,
    Prefixes,
    ConceptScheme,
    ConceptTyping,
    LabelUnification,
    DefinitionMigration,
    DomainRange,
    PropertyRemap,
    SchemeMembership,
    Cleanup,
}

impl PassId {
    /// All passes in execution order.
    pub const ORDER: [PassId; 10] = [
        PassId::CopyFilter,
        PassId::Prefixes,
        PassId::ConceptScheme,
        PassId::ConceptTyping,
        PassId::LabelUnification,
        PassId::DefinitionMigration,
        PassId::DomainRange,
        PassId::PropertyRemap,
        PassId::SchemeMembership,
        PassId::Cleanup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CopyFilter => "copy_filter",
            Self::Prefixes => "prefixes",
            Self::ConceptScheme => "concept_scheme",
            Self::ConceptTyping => "concept_typing",
            Self::LabelUnification => "label_unification",
            Self::DefinitionMigration => "definition_migration",
            Self::DomainRange => "domain_range",
            Self::PropertyRemap => "property_remap",
            Self::SchemeMembership => "scheme_membership",
            Self::Cleanup => "cleanup",
        }
    }
}

impl std::fmt::Display for PassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Net effect of one pass on the working graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassOutcome {
    pub added: usize,
    pub removed: usize,
}

impl PassOutcome {
    pub fn merge(self, other: PassOutcome) -> PassOutcome {
        PassOutcome {
            added: self.added + other.added,
            removed: self.removed + other.removed,
        }
    }

    /// Add a triple, counting it only if it was new.
    pub fn add(&mut self, graph: &mut Graph, triple: Triple) {
        if graph.add(triple) {
            self.added += 1;
        }
    }
}

/// Statements collected during a scan, applied in one step afterwards.
#[derive(Debug, Default)]
pub struct Rewrite {
    to_add: Vec<Triple>,
    to_remove: Vec<Triple>,
}

impl Rewrite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, triple: Triple) {
        self.to_add.push(triple);
    }

    pub fn remove(&mut self, triple: Triple) {
        self.to_remove.push(triple);
    }

    /// Replace `old` with a statement on `predicate` for the same subject and object.
    pub fn replace_predicate(&mut self, old: Triple, predicate: &str) {
        self.to_add
            .push(Triple::new(old.subject.clone(), predicate, old.object.clone()));
        self.to_remove.push(old);
    }

    /// Removals first, then additions.
    pub fn apply(self, graph: &mut Graph) -> PassOutcome {
        let removed = graph.remove_all(&self.to_remove);
        let added = graph.add_all(self.to_add);
        PassOutcome { added, removed }
    }
}

/// Read-only inputs shared by every pass of one run.
pub struct PassContext<'a> {
    pub terms: &'a Terms,
    pub namespace: &'a ResolvedNamespace,
    pub model_name: &'a str,
    pub properties: &'a ModelProperties,
    pub config: &'a TransformConfig,
}

/// Result of a successful pipeline run.
pub struct PipelineOutput {
    pub graph: Graph,
    pub passes: Vec<PassRecord>,
}

/// Run all passes over a private copy of `source`.
pub fn run<S: TripleStore>(source: &S, ctx: &PassContext<'_>) -> Result<PipelineOutput> {
    let mut graph = Graph::new();
    let mut passes = Vec::with_capacity(PassId::ORDER.len());
    let mut scheme_iri: Option<String> = None;

    for pass in PassId::ORDER {
        let start = Instant::now();
        let outcome = match pass {
            PassId::CopyFilter => Ok(cleanup::copy_filtered(source, &mut graph)),
            PassId::Prefixes => Ok(cleanup::register_prefixes(&mut graph, ctx.namespace)),
            PassId::ConceptScheme => {
                scheme::create_concept_scheme(&mut graph, ctx).map(|(iri, outcome)| {
                    scheme_iri = Some(iri);
                    outcome
                })
            }
            PassId::ConceptTyping => Ok(concepts::type_concepts(&mut graph, ctx.terms)),
            PassId::LabelUnification => Ok(labels::unify_labels(
                &mut graph,
                &ctx.config.default_language,
            )),
            PassId::DefinitionMigration => Ok(labels::migrate_definitions(
                &mut graph,
                ctx.terms,
                &ctx.config.default_language,
            )),
            PassId::DomainRange => Ok(properties::materialize_domain_range(&mut graph, ctx.terms)),
            PassId::PropertyRemap => {
                Ok(properties::remap_standard_properties(&mut graph, ctx.terms))
            }
            PassId::SchemeMembership => {
                Ok(scheme::assign_scheme_membership(&mut graph, scheme_iri.as_deref()))
            }
            PassId::Cleanup => cleanup::final_cleanup(&mut graph, ctx.terms, scheme_iri.as_deref()),
        };

        let outcome = outcome.map_err(|source: PassError| {
            tracing::error!(pass = %pass, error = %source, "Pass failed, discarding working graph");
            TransformError::TransformationFailed { pass, source }
        })?;

        let elapsed_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            pass = %pass,
            added = outcome.added,
            removed = outcome.removed,
            triples = graph.len(),
            elapsed_us,
            "Pass completed"
        );
        passes.push(PassRecord {
            pass,
            added: outcome.added,
            removed: outcome.removed,
            elapsed_us,
        });
    }

    Ok(PipelineOutput { graph, passes })
}
