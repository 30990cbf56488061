// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output port definitions.
//!
//! Ports are derived from a node's current data on every call and never
//! stored, so editing a decision's choices can never leave stale ports
//! behind. A port's string id is what serialized connections reference.

use serde::{Deserialize, Serialize};

/// Category of a connection, derived from the source port id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Unconditional continuation (e.g. a story node's `continue` port)
    Default,
    /// Successful outcome branch
    Success,
    /// Failed outcome branch
    Failure,
    /// A decision choice branch
    Choice,
}

impl ConnectionType {
    /// Classify a port id into its connection type.
    ///
    /// `success`/`victory` map to [`Self::Success`], `failure`/`defeat` to
    /// [`Self::Failure`], any `choice-` prefixed id to [`Self::Choice`],
    /// and everything else (e.g. `continue`, `flee`) to [`Self::Default`].
    pub fn classify(port_id: &str) -> Self {
        match port_id {
            "success" | "victory" => Self::Success,
            "failure" | "defeat" => Self::Failure,
            _ if port_id.starts_with("choice-") => Self::Choice,
            _ => Self::Default,
        }
    }
}

/// A named exit point on a node.
///
/// At most one outgoing connection may depart from a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Stable port id referenced by connections (e.g. `success`,
    /// `choice-<id>`, `flee`)
    pub id: String,
    /// Label shown on the node in the editor
    pub label: String,
    /// Connection type stamped on edges departing this port
    pub connection_type: ConnectionType,
}

impl Port {
    /// Create a port, classifying its connection type from the id
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        let connection_type = ConnectionType::classify(&id);
        Self {
            id,
            label: label.into(),
            connection_type,
        }
    }
}
