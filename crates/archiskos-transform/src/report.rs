//! Run report: what one transformation did, pass by pass.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::namespace::{NamespaceSource, ResolvedNamespace};
use crate::pipeline::PassId;

/// Correlates every log line and the report of one run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Effect and timing of one pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassRecord {
    pub pass: PassId,
    pub added: usize,
    pub removed: usize,
    pub elapsed_us: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub run_id: RunId,
    pub namespace: String,
    pub prefix: String,
    pub namespace_source: NamespaceSource,
    pub input_triples: usize,
    pub output_triples: usize,
    pub passes: Vec<PassRecord>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// BLAKE3 fingerprint of the output triple set.
    pub fingerprint: String,
}

impl TransformReport {
    pub(crate) fn new(
        run_id: RunId,
        namespace: &ResolvedNamespace,
        input_triples: usize,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id,
            namespace: namespace.namespace.clone(),
            prefix: namespace.prefix.clone(),
            namespace_source: namespace.source,
            input_triples,
            output_triples: 0,
            passes: Vec::new(),
            started_at,
            completed_at: started_at,
            fingerprint: String::new(),
        }
    }

    /// Total wall time across all passes in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.passes.iter().map(|p| p.elapsed_us).sum()
    }

    pub fn pass(&self, pass: PassId) -> Option<&PassRecord> {
        self.passes.iter().find(|p| p.pass == pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn test_report_serializes_snake_case_passes() {
        let namespace = ResolvedNamespace {
            namespace: "https://ex.org/".to_string(),
            prefix: "ex".to_string(),
            source: NamespaceSource::Default,
        };
        let mut report = TransformReport::new(RunId::new(), &namespace, 3, Utc::now());
        report.passes.push(PassRecord {
            pass: PassId::LabelUnification,
            added: 1,
            removed: 2,
            elapsed_us: 10,
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["namespace_source"], "default");
        assert_eq!(json["passes"][0]["pass"], "label_unification");
        assert_eq!(report.elapsed_us(), 10);
        assert!(report.pass(PassId::Cleanup).is_none());
    }
}
