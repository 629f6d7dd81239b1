// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Datarel library - graph state and synchronization for dataset relationships
//!
//! This crate owns the in-memory relationship graph (nodes = datasets,
//! edges = typed relationships), keeps it consistent with the remote
//! relationship store under concurrent edits, and drives the automatic
//! layout of the graph.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binding;
pub mod client;
pub mod config;
pub mod export;
pub mod layout;
pub mod mapper;
pub mod store;

/// Core data types for the relationship graph
pub mod types {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    // =========================================================================
    // Graph Primitives
    // =========================================================================

    /// Position in 2D space
    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
    pub struct Position {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
    }

    /// Display payload attached to a node
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct NodeData {
        /// Display title of the dataset
        pub label: String,
        /// Canonical link to the dataset's detail page
        pub url: String,
        /// Distinct relationship types for which this node is a source,
        /// in first-seen order; one connection anchor is rendered per entry
        #[serde(default)]
        pub relationship_types: Vec<String>,
    }

    /// Graph vertex representing one dataset
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Node {
        /// Stable identifier, equal to the dataset's identifier
        pub id: String,
        /// 2D coordinate, assigned by the layout engine or manual drag
        pub position: Position,
        /// Display payload
        pub data: NodeData,
        /// Whether the rendering surface has this node selected
        #[serde(default)]
        pub selected: bool,
    }

    /// Graph connection representing one typed relationship
    ///
    /// The identifier always comes from the remote store; edges never
    /// exist locally before the store has confirmed them.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Edge {
        /// The remote relationship's identifier
        pub id: String,
        /// Source node identifier
        pub source: String,
        /// Target node identifier
        pub target: String,
        /// Relationship type; doubles as the source anchor name
        pub source_handle: String,
        /// Whether the rendering surface has this edge selected
        #[serde(default)]
        pub selected: bool,
    }

    // =========================================================================
    // Remote Records
    // =========================================================================

    /// Dataset record from the catalog (read-only to this crate)
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Dataset {
        /// Dataset identifier
        pub id: String,
        /// Link to the dataset's detail page
        pub url: String,
        /// Display title
        pub title: String,
    }

    /// Relationship record from the remote store
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Relationship {
        /// Store-assigned identifier
        pub uuid: String,
        /// Source dataset identifier
        pub source_id: String,
        /// Target dataset identifier
        pub target_id: String,
        /// Relationship type name (e.g. "cites", "derives")
        #[serde(rename = "type")]
        pub rel_type: String,
    }

    // =========================================================================
    // Change Intents from the Rendering Surface
    // =========================================================================

    /// Structural delta for a node, produced by the rendering surface
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(tag = "op", rename_all = "snake_case")]
    pub enum NodeChange {
        /// Node was dragged to a new position
        Position {
            /// Node identifier
            id: String,
            /// New position
            position: Position,
        },
        /// Selection state changed
        Select {
            /// Node identifier
            id: String,
            /// New selection state
            selected: bool,
        },
        /// Node was removed from the canvas
        Remove {
            /// Node identifier
            id: String,
        },
    }

    /// Structural delta for an edge, produced by the rendering surface
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(tag = "op", rename_all = "snake_case")]
    pub enum EdgeChange {
        /// Selection state changed
        Select {
            /// Edge identifier
            id: String,
            /// New selection state
            selected: bool,
        },
        /// Edge was removed; committed only after the remote delete succeeds
        Remove {
            /// Edge identifier
            id: String,
        },
    }

    /// A user-drawn connection awaiting remote confirmation
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Connection {
        /// Source node identifier
        pub source: String,
        /// Target node identifier
        pub target: String,
        /// Relationship type drawn from the source anchor
        pub rel_type: String,
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Outcome class of a notification
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Severity {
        /// Operation completed
        Success,
        /// Operation failed; the graph was left untouched
        Error,
    }

    /// Transient user-facing notification emitted by the graph store
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Notification {
        /// Outcome class
        pub severity: Severity,
        /// Human-readable message
        pub message: String,
        /// When the notification was emitted
        pub at: DateTime<Utc>,
    }

    impl Notification {
        /// Build a success notification stamped now
        #[must_use]
        pub fn success(message: impl Into<String>) -> Self {
            Self {
                severity: Severity::Success,
                message: message.into(),
                at: Utc::now(),
            }
        }

        /// Build an error notification stamped now
        #[must_use]
        pub fn error(message: impl Into<String>) -> Self {
            Self {
                severity: Severity::Error,
                message: message.into(),
                at: Utc::now(),
            }
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
