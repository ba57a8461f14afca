//! archiskos-export: Serializers for transformed thesaurus graphs.
//!
//! The transformation engine hands over a finished graph; this crate turns it
//! into pretty-printed Turtle or a JSON document listing prefixes and triples.

pub mod error;
pub mod json;
pub mod turtle;

pub use error::{ExportError, Result};
pub use json::to_json;
pub use turtle::to_turtle;

use archiskos_core::{Graph, TripleStore};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Turtle,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Turtle => "ttl",
            Self::Json => "json",
        }
    }
}

/// Serialize `graph` in the requested format.
pub fn export(graph: &Graph, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Turtle => to_turtle(graph)?,
        OutputFormat::Json => to_json(graph)?,
    };
    tracing::debug!(
        format = format.extension(),
        triples = graph.len(),
        bytes = output.len(),
        "Serialized graph"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archiskos_core::{Node, Triple};

    #[test]
    fn test_export_dispatches_on_format() {
        let mut graph = Graph::new();
        graph.set_prefix("ex", "https://ex.org/");
        graph.add(Triple::new("https://ex.org/a", "https://ex.org/p", Node::plain("x")));

        let ttl = export(&graph, OutputFormat::Turtle).unwrap();
        assert!(ttl.starts_with("@prefix ex: <https://ex.org/> ."));
        assert!(ttl.contains("ex:a\n    ex:p \"x\" .\n"));

        let json = export(&graph, OutputFormat::Json).unwrap();
        assert!(json.contains("\"prefixes\""));
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
