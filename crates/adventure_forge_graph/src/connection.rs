// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions and structural validation.
//!
//! The graph stays acyclic *by construction*: every prospective edge is
//! checked with a forward traversal from its target before it is added,
//! rather than scanning the whole graph for cycles after the fact.

use crate::adventure::{Adventure, AdventureId};
use crate::node::NodeId;
use crate::port::ConnectionType;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed, typed edge from a source node's port to a target node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConnection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Owning adventure
    pub adventure_id: AdventureId,
    /// Node the edge departs from
    pub source_node_id: NodeId,
    /// Port id on the source node (e.g. `success`, `choice-<id>`)
    pub source_port: String,
    /// Node the edge arrives at
    pub target_node_id: NodeId,
    /// Edge category, stamped from the source port at creation
    pub connection_type: ConnectionType,
}

impl NodeConnection {
    /// Pure construction with a generated id.
    ///
    /// Performs no validation; callers must run [`validate_connection`]
    /// first.
    pub fn new(
        adventure_id: AdventureId,
        source_node_id: NodeId,
        source_port: impl Into<String>,
        target_node_id: NodeId,
        connection_type: ConnectionType,
    ) -> Self {
        Self {
            id: ConnectionId::new(),
            adventure_id,
            source_node_id,
            source_port: source_port.into(),
            target_node_id,
            connection_type,
        }
    }

    /// Check if this connection touches a specific node as either endpoint
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source_node_id == node_id || self.target_node_id == node_id
    }
}

/// Rejection reasons for a prospective connection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// Source and target are the same node
    #[error("a node cannot connect to itself")]
    SelfLoop,

    /// Node id not present in the adventure
    #[error("node not found: {0}")]
    UnknownNode(NodeId),

    /// The source port already carries an outgoing connection
    #[error("port {0:?} already has an outgoing connection")]
    PortOccupied(String),

    /// Adding the edge would close a cycle
    #[error("connection would create a cycle")]
    WouldCycle,

    /// Victory/failure nodes cannot originate connections
    #[error("terminal nodes cannot have outgoing connections")]
    TerminalSource,
}

/// Validate a prospective `source --port--> target` edge against an
/// adventure snapshot.
///
/// Rejections are checked in a fixed order: self-loop, occupied port,
/// cycle introduction, terminal source. The cycle check walks forward
/// from `target` over existing connections; reaching `source` means the
/// new edge would close a loop. O(V+E) per call, which is fine at
/// authoring scale.
pub fn validate_connection(
    source_node_id: NodeId,
    source_port: &str,
    target_node_id: NodeId,
    adventure: &Adventure,
) -> Result<(), ConnectionError> {
    if source_node_id == target_node_id {
        return Err(ConnectionError::SelfLoop);
    }

    let source = adventure
        .node(source_node_id)
        .ok_or(ConnectionError::UnknownNode(source_node_id))?;
    if adventure.node(target_node_id).is_none() {
        return Err(ConnectionError::UnknownNode(target_node_id));
    }

    let occupied = adventure
        .connections()
        .any(|c| c.source_node_id == source_node_id && c.source_port == source_port);
    if occupied {
        return Err(ConnectionError::PortOccupied(source_port.to_string()));
    }

    if reaches(adventure, target_node_id, source_node_id) {
        return Err(ConnectionError::WouldCycle);
    }

    if source.is_terminal() {
        return Err(ConnectionError::TerminalSource);
    }

    Ok(())
}

/// Breadth-first forward walk: is `needle` reachable from `from`?
fn reaches(adventure: &Adventure, from: NodeId, needle: NodeId) -> bool {
    let mut queue = VecDeque::from([from]);
    let mut visited = HashSet::from([from]);

    while let Some(current) = queue.pop_front() {
        if current == needle {
            return true;
        }
        for connection in adventure.outgoing(current) {
            if visited.insert(connection.target_node_id) {
                queue.push_back(connection.target_node_id);
            }
        }
    }
    false
}
