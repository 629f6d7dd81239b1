// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Deterministic layered layout for the relationship graph

use crate::types::{Edge, Node, Position};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Horizontal distance between ranks
const X_SPACING: f64 = 260.0;
/// Vertical distance between rows within a rank
const Y_SPACING: f64 = 110.0;
/// Offset of the first rank/row from the origin
const MARGIN: f64 = 40.0;

/// Compute new positions for the given graph
///
/// Pure function: identifiers and data pass through untouched, only
/// positions are recomputed. Nodes are ranked left-to-right by their
/// longest incoming path, and stacked top-to-bottom within a rank in
/// input order. The same nodes and edges in the same order always
/// produce the same positions.
///
/// Edges whose endpoints are not in `nodes` are ignored for ranking;
/// cycles are broken by treating back edges as rank-neutral. Every node
/// receives a finite position, including in empty and disconnected
/// graphs.
#[must_use]
pub fn layout(nodes: &[Node], edges: &[Edge]) -> Vec<Node> {
    let mut graph: DiGraph<(), ()> = DiGraph::new();
    let mut id_to_idx: HashMap<&str, NodeIndex> = HashMap::new();
    let mut idx_by_input: Vec<NodeIndex> = Vec::with_capacity(nodes.len());

    for node in nodes {
        let idx = graph.add_node(());
        idx_by_input.push(idx);
        id_to_idx.entry(node.id.as_str()).or_insert(idx);
    }

    for edge in edges {
        if let (Some(&src), Some(&tgt)) = (
            id_to_idx.get(edge.source.as_str()),
            id_to_idx.get(edge.target.as_str()),
        ) {
            if src != tgt {
                graph.add_edge(src, tgt, ());
            }
        }
    }

    let mut memo: HashMap<NodeIndex, usize> = HashMap::new();
    let mut on_path: HashSet<NodeIndex> = HashSet::new();
    let mut rows_per_rank: HashMap<usize, usize> = HashMap::new();

    let mut out = nodes.to_vec();
    for (node, &idx) in out.iter_mut().zip(&idx_by_input) {
        let rank = rank_of(&graph, idx, &mut memo, &mut on_path);
        let row = rows_per_rank.entry(rank).or_insert(0);
        node.position = Position {
            x: MARGIN + rank_coord(rank) * X_SPACING,
            y: MARGIN + rank_coord(*row) * Y_SPACING,
        };
        *row += 1;
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn rank_coord(n: usize) -> f64 {
    n as f64
}

/// Longest incoming path length, with back edges contributing rank 0
fn rank_of(
    graph: &DiGraph<(), ()>,
    idx: NodeIndex,
    memo: &mut HashMap<NodeIndex, usize>,
    on_path: &mut HashSet<NodeIndex>,
) -> usize {
    if let Some(&rank) = memo.get(&idx) {
        return rank;
    }
    if !on_path.insert(idx) {
        // back edge: revisiting a node already on the DFS path
        return 0;
    }
    let rank = graph
        .neighbors_directed(idx, Direction::Incoming)
        .map(|pred| rank_of(graph, pred, memo, on_path) + 1)
        .max()
        .unwrap_or(0);
    on_path.remove(&idx);
    memo.insert(idx, rank);
    rank
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeData;

    fn make_node(id: &str) -> Node {
        Node {
            id: id.into(),
            position: Position { x: -1.0, y: -1.0 },
            data: NodeData {
                label: id.into(),
                url: format!("/datasets/{id}/"),
                relationship_types: vec![],
            },
            selected: false,
        }
    }

    fn make_edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: "cites".into(),
            selected: false,
        }
    }

    #[test]
    fn test_empty_graph() {
        assert!(layout(&[], &[]).is_empty());
    }

    #[test]
    fn test_chain_ranks_left_to_right() {
        let nodes = vec![make_node("a"), make_node("b"), make_node("c")];
        let edges = vec![make_edge("e1", "a", "b"), make_edge("e2", "b", "c")];

        let out = layout(&nodes, &edges);

        assert_eq!(out[0].position.x, MARGIN);
        assert_eq!(out[1].position.x, MARGIN + X_SPACING);
        assert_eq!(out[2].position.x, MARGIN + 2.0 * X_SPACING);
        // one node per rank, all in the first row
        assert!(out.iter().all(|n| n.position.y == MARGIN));
    }

    #[test]
    fn test_siblings_stack_in_input_order() {
        let nodes = vec![make_node("root"), make_node("b"), make_node("c")];
        let edges = vec![make_edge("e1", "root", "b"), make_edge("e2", "root", "c")];

        let out = layout(&nodes, &edges);

        assert_eq!(out[1].position.x, out[2].position.x);
        assert_eq!(out[1].position.y, MARGIN);
        assert_eq!(out[2].position.y, MARGIN + Y_SPACING);
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let nodes = vec![make_node("a"), make_node("b"), make_node("c"), make_node("d")];
        let edges = vec![
            make_edge("e1", "a", "b"),
            make_edge("e2", "a", "c"),
            make_edge("e3", "c", "d"),
        ];

        let first = layout(&nodes, &edges);
        let second = layout(&nodes, &edges);

        for (lhs, rhs) in first.iter().zip(&second) {
            assert_eq!(lhs.position, rhs.position);
        }
    }

    #[test]
    fn test_disconnected_components_all_positioned() {
        let nodes = vec![make_node("a"), make_node("b"), make_node("x"), make_node("y")];
        let edges = vec![make_edge("e1", "a", "b"), make_edge("e2", "x", "y")];

        let out = layout(&nodes, &edges);

        assert!(out.iter().all(|n| n.position.x.is_finite() && n.position.y.is_finite()));
        // both components share the same rank columns
        assert_eq!(out[0].position.x, out[2].position.x);
        assert_eq!(out[1].position.x, out[3].position.x);
        assert_ne!(out[0].position.y, out[2].position.y);
    }

    #[test]
    fn test_cycle_terminates_with_finite_positions() {
        let nodes = vec![make_node("a"), make_node("b")];
        let edges = vec![make_edge("e1", "a", "b"), make_edge("e2", "b", "a")];

        let out = layout(&nodes, &edges);

        assert!(out.iter().all(|n| n.position.x.is_finite() && n.position.y.is_finite()));
    }

    #[test]
    fn test_edges_with_unknown_endpoints_ignored() {
        let nodes = vec![make_node("a")];
        let edges = vec![make_edge("e1", "a", "ghost"), make_edge("e2", "ghost", "a")];

        let out = layout(&nodes, &edges);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position, Position { x: MARGIN, y: MARGIN });
    }

    #[test]
    fn test_identity_and_data_untouched() {
        let mut node = make_node("a");
        node.data.relationship_types = vec!["cites".into()];
        let out = layout(&[node], &[]);

        assert_eq!(out[0].id, "a");
        assert_eq!(out[0].data.relationship_types, vec!["cites".to_string()]);
    }
}
