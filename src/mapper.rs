// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Pure translation between remote records and graph primitives

use crate::types::{Dataset, Edge, Node, NodeData, Position, Relationship};

/// Convert a remote relationship into a graph edge
///
/// The relationship type becomes the source anchor, so the edge leaves
/// the source node through the anchor named after its type.
#[must_use]
pub fn relationship_to_edge(relationship: &Relationship) -> Edge {
    Edge {
        id: relationship.uuid.clone(),
        source: relationship.source_id.clone(),
        target: relationship.target_id.clone(),
        source_handle: relationship.rel_type.clone(),
        selected: false,
    }
}

/// Build a graph node for a dataset
///
/// The position starts at the origin; the layout engine assigns the
/// real coordinates when the node is merged into the graph.
#[must_use]
pub fn dataset_to_node(dataset: &Dataset, relationship_types: Vec<String>) -> Node {
    Node {
        id: dataset.id.clone(),
        position: Position::default(),
        data: NodeData {
            label: dataset.title.clone(),
            url: dataset.url.clone(),
            relationship_types,
        },
        selected: false,
    }
}

/// Distinct relationship types for which the dataset is a source,
/// in first-seen order
#[must_use]
pub fn source_relationship_types(dataset_id: &str, relationships: &[Relationship]) -> Vec<String> {
    let mut types = Vec::new();
    for rel in relationships {
        if rel.source_id == dataset_id && !types.contains(&rel.rel_type) {
            types.push(rel.rel_type.clone());
        }
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_relationship(uuid: &str, source: &str, target: &str, rel_type: &str) -> Relationship {
        Relationship {
            uuid: uuid.into(),
            source_id: source.into(),
            target_id: target.into(),
            rel_type: rel_type.into(),
        }
    }

    #[test]
    fn test_relationship_to_edge_mapping() {
        let rel = make_relationship("uuid-1", "ds-a", "ds-b", "cites");

        let edge = relationship_to_edge(&rel);

        assert_eq!(edge.id, "uuid-1");
        assert_eq!(edge.source, "ds-a");
        assert_eq!(edge.target, "ds-b");
        assert_eq!(edge.source_handle, "cites");
        assert!(!edge.selected);
    }

    #[test]
    fn test_dataset_to_node_mapping() {
        let dataset = Dataset {
            id: "ds-a".into(),
            url: "/datasets/a/".into(),
            title: "Dataset A".into(),
        };

        let node = dataset_to_node(&dataset, vec!["cites".into()]);

        assert_eq!(node.id, "ds-a");
        assert_eq!(node.data.label, "Dataset A");
        assert_eq!(node.data.url, "/datasets/a/");
        assert_eq!(node.data.relationship_types, vec!["cites".to_string()]);
        assert_eq!(node.position, Position::default());
    }

    #[test]
    fn test_source_types_are_distinct_and_ordered() {
        let rels = vec![
            make_relationship("u1", "ds-a", "ds-b", "cites"),
            make_relationship("u2", "ds-a", "ds-c", "derives"),
            make_relationship("u3", "ds-a", "ds-d", "cites"),
            make_relationship("u4", "ds-b", "ds-a", "supersedes"),
        ];

        let types = source_relationship_types("ds-a", &rels);

        assert_eq!(types, vec!["cites".to_string(), "derives".to_string()]);
    }

    #[test]
    fn test_source_types_empty_when_only_target() {
        let rels = vec![make_relationship("u1", "ds-b", "ds-a", "cites")];

        assert!(source_relationship_types("ds-a", &rels).is_empty());
    }

    #[test]
    fn test_relationship_type_serde_key() {
        let rel: Relationship = serde_json::from_str(
            r#"{"uuid":"u1","source_id":"a","target_id":"b","type":"cites"}"#,
        )
        .unwrap();

        assert_eq!(rel.rel_type, "cites");

        let json = serde_json::to_string(&rel).unwrap();
        assert!(json.contains(r#""type":"cites""#));
    }
}
