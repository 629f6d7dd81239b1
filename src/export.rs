// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export a graph snapshot to DOT or JSON

use anyhow::{Context, Result};

use crate::binding::GraphSnapshot;
use crate::types::{Edge, Node};

/// Render the graph in Graphviz DOT format
///
/// Edges are labeled with their relationship type.
#[must_use]
pub fn to_dot(nodes: &[Node], edges: &[Edge]) -> String {
    let mut dot = String::from("digraph datasets {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box, style=rounded];\n\n");

    for node in nodes {
        dot.push_str(&format!(
            "  \"{}\" [label=\"{}\"];\n",
            node.id, node.data.label
        ));
    }

    dot.push('\n');

    for edge in edges {
        dot.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
            edge.source, edge.target, edge.source_handle
        ));
    }

    dot.push_str("}\n");
    dot
}

/// Serialize a snapshot as pretty-printed JSON
pub fn to_json(snapshot: &GraphSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("Failed to serialize graph to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NodeData, Position};

    fn make_snapshot() -> GraphSnapshot {
        GraphSnapshot {
            nodes: vec![Node {
                id: "a".into(),
                position: Position::default(),
                data: NodeData {
                    label: "Dataset A".into(),
                    url: "/datasets/a/".into(),
                    relationship_types: vec!["cites".into()],
                },
                selected: false,
            }],
            edges: vec![Edge {
                id: "u1".into(),
                source: "a".into(),
                target: "b".into(),
                source_handle: "cites".into(),
                selected: false,
            }],
        }
    }

    #[test]
    fn test_to_dot() {
        let snapshot = make_snapshot();

        let dot = to_dot(&snapshot.nodes, &snapshot.edges);

        assert!(dot.contains("digraph datasets"));
        assert!(dot.contains("\"a\" [label=\"Dataset A\"]"));
        assert!(dot.contains("\"a\" -> \"b\" [label=\"cites\"]"));
    }

    #[test]
    fn test_to_json_round_trips() {
        let snapshot = make_snapshot();

        let json = to_json(&snapshot).unwrap();
        let parsed: GraphSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.nodes.len(), 1);
        assert_eq!(parsed.edges[0].source_handle, "cites");
    }
}
