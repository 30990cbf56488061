// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adventure container: the node-and-connection arena.
//!
//! The adventure exclusively owns its nodes and connections; all linkage
//! between them is by id, never by reference. Collections keep insertion
//! order so serialized adventures diff cleanly.

use crate::connection::{
    validate_connection, ConnectionError, ConnectionId, NodeConnection,
};
use crate::node::{AdventureNode, NodeId};
use crate::port::ConnectionType;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an adventure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdventureId(pub Uuid);

impl AdventureId {
    /// Create a new random adventure ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AdventureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AdventureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The complete authored graph for one RPG scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adventure {
    /// Unique adventure ID
    pub id: AdventureId,
    /// Title shown in the library
    pub title: String,
    /// Blurb shown in the library
    pub description: String,
    /// Entry node for play; must reference an existing node when set
    pub start_node_id: Option<NodeId>,
    /// Nodes, keyed by id, in insertion order
    nodes: IndexMap<NodeId, AdventureNode>,
    /// Connections, keyed by id, in insertion order
    connections: IndexMap<ConnectionId, NodeConnection>,
    /// Whether the adventure has been published
    pub is_published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-edit timestamp
    pub updated_at: DateTime<Utc>,
}

impl Adventure {
    /// Create a new empty adventure
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AdventureId::new(),
            title: title.into(),
            description: String::new(),
            start_node_id: None,
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a node to the adventure
    pub fn add_node(&mut self, node: AdventureNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        self.touch();
        id
    }

    /// Remove a node, cascade-deleting every connection touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<AdventureNode> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        if self.start_node_id == Some(node_id) {
            self.start_node_id = None;
        }
        let removed = self.nodes.shift_remove(&node_id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&AdventureNode> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut AdventureNode> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &AdventureNode> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Validate and add a connection from a source port to a target node.
    ///
    /// The edge's [`ConnectionType`] is stamped from the source port id.
    pub fn connect(
        &mut self,
        source_node_id: NodeId,
        source_port: &str,
        target_node_id: NodeId,
    ) -> Result<ConnectionId, ConnectionError> {
        validate_connection(source_node_id, source_port, target_node_id, self)?;
        let connection = NodeConnection::new(
            self.id,
            source_node_id,
            source_port,
            target_node_id,
            ConnectionType::classify(source_port),
        );
        Ok(self.add_connection(connection))
    }

    /// Insert an already-validated connection.
    ///
    /// Callers must have run [`validate_connection`]; inserting an
    /// unvalidated edge can break the acyclicity invariant.
    pub fn add_connection(&mut self, connection: NodeConnection) -> ConnectionId {
        let id = connection.id;
        self.connections.insert(id, connection);
        self.touch();
        id
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<NodeConnection> {
        let removed = self.connections.shift_remove(&connection_id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&NodeConnection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &NodeConnection> {
        self.connections.values()
    }

    /// Get connections departing from a node
    pub fn outgoing(&self, node_id: NodeId) -> impl Iterator<Item = &NodeConnection> {
        self.connections
            .values()
            .filter(move |c| c.source_node_id == node_id)
    }

    /// Get connections arriving at a node
    pub fn incoming(&self, node_id: NodeId) -> impl Iterator<Item = &NodeConnection> {
        self.connections
            .values()
            .filter(move |c| c.target_node_id == node_id)
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether any connection references the node as either endpoint
    pub fn references_node(&self, node_id: NodeId) -> bool {
        self.connections.values().any(|c| c.involves_node(node_id))
    }

    /// Serialize to JSON, the format the storage collaborator persists
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
