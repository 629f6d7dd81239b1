// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The graph store - canonical in-memory graph, kept consistent with
//! the remote relationship store
//!
//! Every remote-touching operation is fail-closed: an edge is added
//! only after the store has confirmed the relationship, and a removal
//! is committed only after the store has confirmed the delete. No
//! settled operation can leave an edge that is valid locally but absent
//! remotely.

use futures::future::join_all;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::client::RelationshipClient;
use crate::layout;
use crate::mapper;
use crate::types::{
    Connection, Dataset, Edge, EdgeChange, Node, NodeChange, Notification, Relationship,
};

/// Owner of the canonical graph state
///
/// Holds the node and edge collections plus the relationship-identity
/// index used to deduplicate re-reported relationships. The rendering
/// surface and the network client never mutate the graph directly; they
/// submit intents and read back replacement state.
pub struct GraphStore<C> {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    edge_index: HashSet<String>,
    client: C,
    notifications: Vec<Notification>,
}

impl<C: RelationshipClient> GraphStore<C> {
    /// Create an empty store backed by the given remote client
    pub fn new(client: C) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            edge_index: HashSet::new(),
            client,
            notifications: Vec::new(),
        }
    }

    /// Current nodes
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Current edges
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Relationship identifiers currently represented as edges
    #[must_use]
    pub fn edge_ids(&self) -> &HashSet<String> {
        &self.edge_index
    }

    /// Take the pending user notifications, leaving the queue empty
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Replace the node collection
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    /// Replace the edge collection, rebuilding the identity index
    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edge_index = edges.iter().map(|e| e.id.clone()).collect();
        self.edges = edges;
    }

    /// Apply a batch of node deltas from the rendering surface
    ///
    /// Node changes are purely local; the rendering surface reports edge
    /// removals for any attached edges separately.
    pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) {
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
                        node.position = position;
                    }
                }
                NodeChange::Select { id, selected } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
                        node.selected = selected;
                    }
                }
                NodeChange::Remove { id } => {
                    self.nodes.retain(|n| n.id != id);
                }
            }
        }
    }

    /// Apply a batch of edge deltas from the rendering surface
    ///
    /// Removals are sent to the remote store first, all in flight
    /// concurrently, and the merged result is committed only after every
    /// delete has settled. A removal whose delete fails is dropped from
    /// the batch: its edge stays visible and an error notification is
    /// queued. One failure never blocks or reverts the others, and the
    /// committed set is the same whatever order the deletes complete in.
    pub async fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) {
        let mut removals: Vec<String> = Vec::new();
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
                        edge.selected = selected;
                    }
                }
                EdgeChange::Remove { id } => {
                    // unknown and repeated identifiers are dropped up front
                    if self.edge_index.contains(&id) && !removals.contains(&id) {
                        removals.push(id);
                    }
                }
            }
        }
        if removals.is_empty() {
            return;
        }

        let client = &self.client;
        let results = join_all(
            removals
                .iter()
                .map(|id| async move { client.delete_relationship(id).await }),
        )
        .await;

        let mut confirmed: HashSet<String> = HashSet::new();
        for (id, result) in removals.into_iter().zip(results) {
            match result {
                Ok(()) => {
                    confirmed.insert(id);
                }
                Err(err) => {
                    warn!(edge = %id, error = %err, "relationship delete rejected, keeping edge");
                    self.notifications.push(Notification::error(format!(
                        "Could not remove relationship {id}: {err}"
                    )));
                }
            }
        }
        self.edges.retain(|e| !confirmed.contains(&e.id));
        for id in &confirmed {
            self.edge_index.remove(id);
        }
    }

    /// Create a relationship for a user-drawn connection
    ///
    /// The edge is added only once the store has assigned an identifier;
    /// on failure nothing changes locally, so there is never a phantom
    /// edge to roll back.
    pub async fn connect(&mut self, connection: Connection) {
        let Connection {
            source,
            target,
            rel_type,
        } = connection;
        match self
            .client
            .create_relationship(&source, &target, &rel_type)
            .await
        {
            Ok(uuid) => {
                debug!(%uuid, %source, %target, %rel_type, "relationship confirmed");
                self.edges.push(Edge {
                    id: uuid.clone(),
                    source: source.clone(),
                    target,
                    source_handle: rel_type.clone(),
                    selected: false,
                });
                self.edge_index.insert(uuid);
                self.add_rel_type_to_node(&source, &rel_type);
            }
            Err(err) => {
                warn!(%source, %target, %rel_type, error = %err, "relationship create rejected");
                self.notifications.push(Notification::error(format!(
                    "Could not create {rel_type} relationship: {err}"
                )));
            }
        }
    }

    /// Merge a newly loaded dataset and its known relationships
    ///
    /// Relationships already represented in the graph are dropped, so
    /// overlapping datasets can re-report shared relationships without
    /// duplicating edges. The caller has already fetched (and
    /// error-handled) the relationship list; this operation itself never
    /// fails.
    pub fn add_dataset(&mut self, dataset: &Dataset, relationships: &[Relationship]) {
        let new_edges: Vec<Edge> = relationships
            .iter()
            .filter(|r| !self.edge_index.contains(&r.uuid))
            .map(mapper::relationship_to_edge)
            .collect();
        let types = mapper::source_relationship_types(&dataset.id, relationships);

        if let Some(existing) = self.nodes.iter_mut().find(|n| n.id == dataset.id) {
            // Re-loading a known dataset updates it in place
            existing.data.label = dataset.title.clone();
            existing.data.url = dataset.url.clone();
            for rel_type in types {
                if !existing.data.relationship_types.contains(&rel_type) {
                    existing.data.relationship_types.push(rel_type);
                }
            }
        } else {
            self.nodes.push(mapper::dataset_to_node(dataset, types));
        }

        for edge in &new_edges {
            self.edge_index.insert(edge.id.clone());
        }
        self.edges.extend(new_edges);
        self.apply_layout();
        self.notifications.push(Notification::success(format!(
            "Added {} to the graph",
            dataset.title
        )));
    }

    /// Declare an outgoing relationship type on a node
    ///
    /// Idempotent: declaring a type the node already carries is a no-op.
    pub fn add_rel_type_to_node(&mut self, node_id: &str, rel_type: &str) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) {
            if !node.data.relationship_types.iter().any(|t| t == rel_type) {
                node.data.relationship_types.push(rel_type.to_string());
            }
        }
    }

    /// Recompute positions for the current graph and commit them
    pub fn apply_layout(&mut self) {
        self.nodes = layout::layout(&self.nodes, &self.edges);
    }
}
