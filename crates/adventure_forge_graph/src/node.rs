// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the adventure graph.
//!
//! Every node is a tagged union: common authoring fields plus a
//! [`NodeData`] payload matching the node's kind. All dispatch over node
//! kinds pattern-matches the five variants exhaustively, so a new variant
//! cannot silently skip a rule elsewhere in the crate.

use crate::adventure::AdventureId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a decision choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceId(pub Uuid);

impl ChoiceId {
    /// Create a new random choice ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node kind discriminant
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Narrative beat with optional objectives
    Story,
    /// Player-facing branch point
    Decision,
    /// Attribute check against a difficulty
    Challenge,
    /// Combat encounter
    Combat,
    /// Automatic state check (flag/item/variable/random)
    Check,
}

impl NodeKind {
    /// All kinds, in editor palette order
    pub const ALL: [NodeKind; 5] = [
        Self::Story,
        Self::Decision,
        Self::Challenge,
        Self::Combat,
        Self::Check,
    ];

    /// Display name for editor palettes and diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Story => "Story",
            Self::Decision => "Decision",
            Self::Challenge => "Challenge",
            Self::Combat => "Combat",
            Self::Check => "Check",
        }
    }
}

/// One selectable option on a decision node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Unique choice ID; connections reference it via a `choice-<id>` port
    pub id: ChoiceId,
    /// Text shown to players
    pub text: String,
}

impl Choice {
    /// Create a new choice with a fresh ID
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ChoiceId::new(),
            text: text.into(),
        }
    }
}

/// Condition evaluated by a check node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "check_type", rename_all = "snake_case")]
pub enum CheckCondition {
    /// Session flag must be set
    Flag {
        /// Name of the flag to test
        flag_name: String,
    },
    /// Party must hold an item
    Item {
        /// Name of the required item
        item_name: String,
    },
    /// Session variable must be set
    Variable {
        /// Name of the variable to test
        variable_name: String,
    },
    /// Random roll under a percentage
    Random {
        /// Success chance in percent, valid range 0-100
        random_chance: i32,
    },
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeData {
    /// Narrative beat
    Story {
        /// Objectives surfaced to the GM while running the scene
        objectives: Vec<String>,
    },
    /// Branch point
    Decision {
        /// Selectable options; each derives its own output port
        choices: Vec<Choice>,
    },
    /// Attribute check
    Challenge {
        /// Attribute rolled against (e.g. "strength", "perception")
        attribute: String,
        /// Target number, valid range 3-18
        difficulty: i32,
        /// GM-facing description of the check
        description: String,
        /// Narration on success
        success_text: String,
        /// Narration on failure
        failure_text: String,
        /// Whether players may retry after failing
        allow_retry: bool,
    },
    /// Combat encounter
    Combat {
        /// Enemy names
        enemies: Vec<String>,
        /// Whether the enemies surprise the party
        ambush: bool,
        /// Whether fleeing is an option; derives the `flee` port
        can_flee: bool,
        /// Narration on victory
        victory_text: String,
        /// Narration on defeat
        defeat_text: String,
    },
    /// Automatic state check
    Check {
        /// Condition to evaluate
        condition: CheckCondition,
        /// Narration when the condition holds
        success_text: String,
        /// Narration when it does not
        failure_text: String,
    },
}

impl NodeData {
    /// The kind discriminant for this payload
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Story { .. } => NodeKind::Story,
            Self::Decision { .. } => NodeKind::Decision,
            Self::Challenge { .. } => NodeKind::Challenge,
            Self::Combat { .. } => NodeKind::Combat,
            Self::Check { .. } => NodeKind::Check,
        }
    }
}

/// A node instance in an adventure graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdventureNode {
    /// Unique instance ID
    pub id: NodeId,
    /// Owning adventure
    pub adventure_id: AdventureId,
    /// Position on the editor canvas
    pub position: [f32; 2],
    /// Title shown in the node header
    pub title: String,
    /// Narrative content read to players
    pub content: String,
    /// Whether the node's image is revealed to players
    pub image_visible_to_players: bool,
    /// Marks a winning ending; terminal nodes originate no connections
    pub is_victory_node: bool,
    /// Marks a losing ending; terminal nodes originate no connections
    pub is_failure_node: bool,
    /// Experience awarded when the node resolves
    pub experience_reward: u32,
    /// Items awarded when the node resolves
    pub item_rewards: Vec<String>,
    /// Kind-specific payload
    pub data: NodeData,
}

impl AdventureNode {
    /// The node's kind discriminant
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Whether the node is a victory or failure ending
    pub fn is_terminal(&self) -> bool {
        self.is_victory_node || self.is_failure_node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::create_node;

    #[test]
    fn test_kind_matches_data() {
        for kind in NodeKind::ALL {
            let node = create_node(kind, [0.0, 0.0], AdventureId::new());
            assert_eq!(node.kind(), kind);
        }
    }

    #[test]
    fn test_terminal_flags() {
        let mut node = create_node(NodeKind::Story, [0.0, 0.0], AdventureId::new());
        assert!(!node.is_terminal());
        node.is_victory_node = true;
        assert!(node.is_terminal());
        node.is_victory_node = false;
        node.is_failure_node = true;
        assert!(node.is_terminal());
    }

    #[test]
    fn test_node_data_round_trip() {
        let node = create_node(NodeKind::Check, [0.0, 0.0], AdventureId::new());
        let json = serde_json::to_string(&node).unwrap();
        assert!(
            json.contains("\"type\":\"check\""),
            "payload carries its tag: {json}"
        );
        assert!(json.contains("\"check_type\":\"random\""));
        let back: AdventureNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, node.id);
        assert_eq!(back.kind(), NodeKind::Check);
    }
}
