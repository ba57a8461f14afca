//! JSON rendering: the prefix table plus every triple in graph order.

use std::collections::BTreeMap;

use archiskos_core::graph::{Graph, Triple};
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct JsonGraph<'a> {
    prefixes: &'a BTreeMap<String, String>,
    triples: Vec<&'a Triple>,
}

pub fn to_json(graph: &Graph) -> Result<String> {
    let doc = JsonGraph {
        prefixes: graph.prefixes(),
        triples: graph.iter().collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archiskos_core::graph::{Node, TripleStore};
    use archiskos_core::vocab::{skos, xsd};

    #[test]
    fn test_json_lists_prefixes_and_triples() {
        let mut g = Graph::new();
        g.set_prefix("skos", skos::NS);
        g.add(Triple::new("https://ex.org/a", skos::PREF_LABEL, Node::lang("A", "cs")));
        g.add(Triple::new("https://ex.org/a", "https://ex.org/n", Node::typed("1", xsd::INTEGER)));

        let value: serde_json::Value = serde_json::from_str(&to_json(&g).unwrap()).unwrap();
        assert_eq!(value["prefixes"]["skos"], skos::NS);
        assert_eq!(value["triples"].as_array().unwrap().len(), 2);
        assert_eq!(value["triples"][0]["object"]["kind"], "plain_literal");
        assert_eq!(value["triples"][0]["object"]["language"], "cs");
        assert_eq!(value["triples"][1]["object"]["datatype"], xsd::INTEGER);
    }

    #[test]
    fn test_empty_graph() {
        let json = to_json(&Graph::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["triples"].as_array().unwrap().is_empty());
    }
}
