// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! View binding - explicit intent dispatch between the rendering
//! surface and the graph store
//!
//! Every UI action becomes a discrete [`Intent`] consumed synchronously
//! by the store (remote-touching intents are awaited to settlement), so
//! there is no hidden callback ordering between edits.

use serde::{Deserialize, Serialize};

use crate::client::RelationshipClient;
use crate::store::GraphStore;
use crate::types::{
    Connection, Dataset, Edge, EdgeChange, Node, NodeChange, Notification, Relationship,
};

/// One discrete UI action against the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Structural node deltas from the rendering surface
    NodesChanged {
        /// The batch of deltas
        changes: Vec<NodeChange>,
    },
    /// Structural edge deltas from the rendering surface
    EdgesChanged {
        /// The batch of deltas
        changes: Vec<EdgeChange>,
    },
    /// The user drew a new connection
    Connect {
        /// The drawn connection
        connection: Connection,
    },
    /// A dataset and its caller-fetched relationships were loaded
    AddDataset {
        /// The dataset to merge
        dataset: Dataset,
        /// Its known relationships, possibly overlapping existing ones
        relationships: Vec<Relationship>,
    },
    /// The user declared an outgoing relationship type on a node
    AddRelationshipType {
        /// Node identifier
        node_id: String,
        /// Relationship type to declare
        rel_type: String,
    },
    /// Re-run the layout over the current graph
    ApplyLayout,
    /// Replace the node collection wholesale
    SetNodes {
        /// The replacement nodes
        nodes: Vec<Node>,
    },
    /// Replace the edge collection wholesale
    SetEdges {
        /// The replacement edges
        edges: Vec<Edge>,
    },
}

/// Replacement state handed back to the rendering surface
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Current nodes
    pub nodes: Vec<Node>,
    /// Current edges
    pub edges: Vec<Edge>,
}

/// Owns the graph store and bridges it to the rendering surface
pub struct ViewBinding<C> {
    store: GraphStore<C>,
}

impl<C: RelationshipClient> ViewBinding<C> {
    /// Bind a store
    pub fn new(store: GraphStore<C>) -> Self {
        Self { store }
    }

    /// Consume one intent, awaiting any remote confirmation it needs
    pub async fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::NodesChanged { changes } => self.store.apply_node_changes(changes),
            Intent::EdgesChanged { changes } => self.store.apply_edge_changes(changes).await,
            Intent::Connect { connection } => self.store.connect(connection).await,
            Intent::AddDataset {
                dataset,
                relationships,
            } => self.store.add_dataset(&dataset, &relationships),
            Intent::AddRelationshipType { node_id, rel_type } => {
                self.store.add_rel_type_to_node(&node_id, &rel_type);
            }
            Intent::ApplyLayout => self.store.apply_layout(),
            Intent::SetNodes { nodes } => self.store.set_nodes(nodes),
            Intent::SetEdges { edges } => self.store.set_edges(edges),
        }
    }

    /// Current graph state for re-rendering
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.store.nodes().to_vec(),
            edges: self.store.edges().to_vec(),
        }
    }

    /// Pending transient notifications for the user
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.store.take_notifications()
    }

    /// The underlying store
    #[must_use]
    pub fn store(&self) -> &GraphStore<C> {
        &self.store
    }
}
