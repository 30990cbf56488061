// SPDX-License-Identifier: MIT OR Apache-2.0
//! Validation diagnostics and the aggregate report.
//!
//! Every diagnostic carries an enumerated code; message text is for
//! authors, never for program logic. Errors block publishing, warnings
//! are advisory only.

use crate::stats::AdventureStats;
use adventure_forge_graph::NodeId;
use serde::{Deserialize, Serialize};

/// Codes for diagnostics that block publishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No start node is set, or it references a missing node
    NoStartNode,
    /// The graph has no victory node
    NoVictoryPath,
    /// The graph has no failure node
    NoFailurePath,
    /// A victory node is not reachable from the start node
    UnreachableVictory,
    /// A non-start node is referenced by no connection
    OrphanNode,
    /// Node title is blank
    EmptyTitle,
    /// Decision node has no choices
    NoChoices,
    /// Required text is blank (e.g. a choice's text)
    EmptyContent,
    /// Challenge difficulty outside the 3-18 range
    InvalidDifficulty,
    /// Combat node has no enemies
    NoEnemies,
    /// Check node's condition value is blank or out of range
    MissingCheckValue,
}

/// Codes for advisory diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// Estimated play time is below a single-session minimum
    ShortAdventure,
    /// Node content is under the readability minimum
    ShortContent,
    /// Challenge difficulty of 16+ is very hard
    HighDifficulty,
    /// A required output port has no outgoing connection yet
    UnconnectedPort,
}

/// A publish-blocking diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Enumerated code; the primary signal
    pub code: ErrorCode,
    /// Author-facing description
    pub message: String,
    /// Node to navigate to in the editor, when applicable
    pub node_id: Option<NodeId>,
    /// Offending field on that node, when applicable
    pub field: Option<String>,
}

impl ValidationError {
    /// Create an error diagnostic
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node_id: None,
            field: None,
        }
    }

    /// Anchor the diagnostic to a node
    pub fn with_node(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    /// Anchor the diagnostic to a field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// An advisory diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Enumerated code; the primary signal
    pub code: WarningCode,
    /// Author-facing description
    pub message: String,
    /// Node to navigate to in the editor, when applicable
    pub node_id: Option<NodeId>,
    /// Offending field on that node, when applicable
    pub field: Option<String>,
}

impl ValidationWarning {
    /// Create a warning diagnostic
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node_id: None,
            field: None,
        }
    }

    /// Anchor the diagnostic to a node
    pub fn with_node(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    /// Anchor the diagnostic to a field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Diagnostics for a single node, as returned by
/// [`validate_node`](crate::validation::validate_node)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDiagnostics {
    /// Publish-blocking findings
    pub errors: Vec<ValidationError>,
    /// Advisory findings
    pub warnings: Vec<ValidationWarning>,
}

impl NodeDiagnostics {
    /// Whether no errors were found (warnings do not count)
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The complete validation result consumed by the publishing flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the graph has no errors
    pub is_valid: bool,
    /// Whether publishing may proceed; equals [`Self::is_valid`], kept as
    /// a distinct field because the publishing flow gates on it by name
    pub can_publish: bool,
    /// Publish-blocking findings, in check order
    pub errors: Vec<ValidationError>,
    /// Advisory findings, in check order
    pub warnings: Vec<ValidationWarning>,
    /// Aggregate graph statistics
    pub stats: AdventureStats,
}
