// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node factories and dynamic port derivation.
//!
//! Nodes are only ever built here; hand-assembled records bypass the
//! defaults that keep a fresh node inside every value-range rule. Ports
//! are recomputed from the node's current data on every call — a decision
//! node's port list tracks its live choice array, and a combat node's
//! `flee` port appears and disappears with `can_flee`.

use crate::adventure::AdventureId;
use crate::node::{AdventureNode, CheckCondition, Choice, ChoiceId, NodeData, NodeId, NodeKind};
use crate::port::Port;

/// Canvas offset applied when duplicating a node
pub const DUPLICATE_OFFSET: [f32; 2] = [50.0, 50.0];

/// Create a fully initialized node of the given kind.
///
/// Defaults are chosen so a freshly created node never fails a
/// value-range check: challenge difficulty starts at 10, a check starts
/// as a 50% random roll, and titles are non-empty.
pub fn create_node(kind: NodeKind, position: [f32; 2], adventure_id: AdventureId) -> AdventureNode {
    AdventureNode {
        id: NodeId::new(),
        adventure_id,
        position,
        title: format!("New {}", kind.display_name()),
        content: String::new(),
        image_visible_to_players: false,
        is_victory_node: false,
        is_failure_node: false,
        experience_reward: 0,
        item_rewards: Vec::new(),
        data: default_data(kind),
    }
}

fn default_data(kind: NodeKind) -> NodeData {
    match kind {
        NodeKind::Story => NodeData::Story {
            objectives: Vec::new(),
        },
        NodeKind::Decision => NodeData::Decision {
            choices: vec![Choice::new("Choice 1"), Choice::new("Choice 2")],
        },
        NodeKind::Challenge => NodeData::Challenge {
            attribute: "strength".to_string(),
            difficulty: 10,
            description: String::new(),
            success_text: String::new(),
            failure_text: String::new(),
            allow_retry: false,
        },
        NodeKind::Combat => NodeData::Combat {
            enemies: Vec::new(),
            ambush: false,
            can_flee: true,
            victory_text: String::new(),
            defeat_text: String::new(),
        },
        NodeKind::Check => NodeData::Check {
            condition: CheckCondition::Random { random_chance: 50 },
            success_text: String::new(),
            failure_text: String::new(),
        },
    }
}

/// Duplicate a node, offsetting its canvas position.
///
/// The clone gets a fresh id, cleared victory/failure flags, and — for
/// decision nodes — regenerated choice ids. Connections reference choices
/// through `choice-<id>` ports, so a clone sharing choice ids with its
/// source would alias the source's edges.
pub fn duplicate_node(node: &AdventureNode, offset: [f32; 2]) -> AdventureNode {
    let mut data = node.data.clone();
    if let NodeData::Decision { choices } = &mut data {
        for choice in choices {
            choice.id = ChoiceId::new();
        }
    }

    AdventureNode {
        id: NodeId::new(),
        adventure_id: node.adventure_id,
        position: [node.position[0] + offset[0], node.position[1] + offset[1]],
        title: node.title.clone(),
        content: node.content.clone(),
        image_visible_to_players: node.image_visible_to_players,
        is_victory_node: false,
        is_failure_node: false,
        experience_reward: node.experience_reward,
        item_rewards: node.item_rewards.clone(),
        data,
    }
}

/// Derive the node's output ports from its current data.
///
/// Recomputed on every call; never cache the result across edits.
pub fn output_ports(node: &AdventureNode) -> Vec<Port> {
    match &node.data {
        NodeData::Story { .. } => vec![Port::new("continue", "Continue")],
        NodeData::Decision { choices } => choices
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                let label = if choice.text.trim().is_empty() {
                    format!("Choice {}", index + 1)
                } else {
                    choice.text.clone()
                };
                Port::new(format!("choice-{}", choice.id), label)
            })
            .collect(),
        NodeData::Challenge { .. } => vec![
            Port::new("success", "Success"),
            Port::new("failure", "Failure"),
        ],
        NodeData::Combat { can_flee, .. } => {
            let mut ports = vec![
                Port::new("victory", "Victory"),
                Port::new("defeat", "Defeat"),
            ];
            if *can_flee {
                ports.push(Port::new("flee", "Flee"));
            }
            ports
        }
        NodeData::Check { .. } => vec![
            Port::new("success", "Success"),
            Port::new("failure", "Failure"),
        ],
    }
}

/// Ports that must eventually carry an outgoing connection.
///
/// Terminal nodes end the adventure and need none.
pub fn required_ports(node: &AdventureNode) -> Vec<Port> {
    if node.is_terminal() {
        Vec::new()
    } else {
        output_ports(node)
    }
}
