// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph validation: structural checks, per-node semantic checks, and
//! aggregate statistics, folded into one report.
//!
//! Validation is a pure function of an adventure snapshot and never
//! short-circuits: every applicable diagnostic is accumulated so authors
//! see the whole picture at once. The publishing flow gates on
//! `can_publish`; warnings never block.

use crate::paths::{enumerate_paths, reachable_nodes};
use crate::report::{
    ErrorCode, NodeDiagnostics, ValidationError, ValidationReport, ValidationWarning,
    WarningCode,
};
use crate::stats::compute_stats;
use adventure_forge_graph::{
    required_ports, Adventure, AdventureNode, CheckCondition, NodeData,
};

/// Content below this many characters draws a readability warning
const SHORT_CONTENT_CHARS: usize = 20;

/// Challenge difficulty bounds
const MIN_DIFFICULTY: i32 = 3;
/// Upper challenge difficulty bound
const MAX_DIFFICULTY: i32 = 18;
/// Difficulty at or above this is flagged as very hard
const HIGH_DIFFICULTY: i32 = 16;

/// Estimated play time under this many minutes draws a warning
const SHORT_ADVENTURE_MINUTES: f32 = 10.0;

/// Validate an adventure snapshot for publishing.
///
/// Checks run in a fixed order — start node, victory/failure existence,
/// victory reachability, orphan detection, per-node rules, required-port
/// coverage, statistics — accumulating every applicable diagnostic.
pub fn validate_adventure(adventure: &Adventure) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // 1. Start node presence and existence
    let start = match adventure.start_node_id {
        None => {
            errors.push(
                ValidationError::new(ErrorCode::NoStartNode, "No start node is set")
                    .with_field("start_node_id"),
            );
            None
        }
        Some(id) if adventure.node(id).is_none() => {
            errors.push(
                ValidationError::new(
                    ErrorCode::NoStartNode,
                    "Start node references a missing node",
                )
                .with_node(id)
                .with_field("start_node_id"),
            );
            None
        }
        Some(id) => Some(id),
    };

    // 2. At least one victory and one failure node exist anywhere
    if !adventure.nodes().any(|n| n.is_victory_node) {
        errors.push(ValidationError::new(
            ErrorCode::NoVictoryPath,
            "The adventure needs at least one victory node",
        ));
    }
    if !adventure.nodes().any(|n| n.is_failure_node) {
        errors.push(ValidationError::new(
            ErrorCode::NoFailurePath,
            "The adventure needs at least one failure node",
        ));
    }

    // 3. Every victory node must be reachable from the start
    if let Some(start) = start {
        let reachable = reachable_nodes(start, adventure);
        for node in adventure.nodes().filter(|n| n.is_victory_node) {
            if !reachable.contains(&node.id) {
                errors.push(
                    ValidationError::new(
                        ErrorCode::UnreachableVictory,
                        format!("Victory node \"{}\" cannot be reached", node.title),
                    )
                    .with_node(node.id),
                );
            }
        }
    }

    // 4. Every node except the start must be referenced by a connection
    for node in adventure.nodes() {
        if Some(node.id) != start && !adventure.references_node(node.id) {
            errors.push(
                ValidationError::new(
                    ErrorCode::OrphanNode,
                    format!("Node \"{}\" is not connected to anything", node.title),
                )
                .with_node(node.id),
            );
        }
    }

    // 5. Per-node semantic checks
    for node in adventure.nodes() {
        let diagnostics = validate_node(node, adventure);
        errors.extend(diagnostics.errors);
        warnings.extend(diagnostics.warnings);
    }

    // 6. Required-port coverage. Advisory only: a node without a path
    // onward yet is normal mid-edit state. The combat rule in
    // `validate_node` owns the flee port, so it is skipped here.
    for node in adventure.nodes() {
        for port in required_ports(node) {
            if port.id == "flee" {
                continue;
            }
            let connected = adventure
                .outgoing(node.id)
                .any(|c| c.source_port == port.id);
            if !connected {
                warnings.push(
                    ValidationWarning::new(
                        WarningCode::UnconnectedPort,
                        format!("Output \"{}\" has no connection yet", port.label),
                    )
                    .with_node(node.id)
                    .with_field(port.id),
                );
            }
        }
    }

    // 7. Aggregate statistics
    let paths = enumerate_paths(adventure);
    let stats = compute_stats(adventure, &paths);
    if stats.node_count > 0 && stats.estimated_play_minutes < SHORT_ADVENTURE_MINUTES {
        warnings.push(ValidationWarning::new(
            WarningCode::ShortAdventure,
            format!(
                "Estimated play time is only {:.0} minutes",
                stats.estimated_play_minutes
            ),
        ));
    }

    let is_valid = errors.is_empty();
    tracing::debug!(
        adventure = %adventure.id,
        errors = errors.len(),
        warnings = warnings.len(),
        "validated adventure"
    );

    ValidationReport {
        is_valid,
        can_publish: is_valid,
        errors,
        warnings,
        stats,
    }
}

/// Validate a single node's fields against its kind's rules.
///
/// The adventure snapshot is needed for rules that look at the node's
/// outgoing connections (a fleeable combat without a flee route).
pub fn validate_node(node: &AdventureNode, adventure: &Adventure) -> NodeDiagnostics {
    let mut diagnostics = NodeDiagnostics::default();

    if node.title.trim().is_empty() {
        diagnostics.errors.push(
            ValidationError::new(ErrorCode::EmptyTitle, "Node title is empty")
                .with_node(node.id)
                .with_field("title"),
        );
    }

    if node.content.trim().chars().count() < SHORT_CONTENT_CHARS {
        diagnostics.warnings.push(
            ValidationWarning::new(
                WarningCode::ShortContent,
                "Content is very short; players may want more to go on",
            )
            .with_node(node.id)
            .with_field("content"),
        );
    }

    match &node.data {
        NodeData::Story { .. } => {}
        NodeData::Decision { choices } => {
            if choices.is_empty() {
                diagnostics.errors.push(
                    ValidationError::new(
                        ErrorCode::NoChoices,
                        "Decision node needs at least one choice",
                    )
                    .with_node(node.id)
                    .with_field("choices"),
                );
            }
            for (index, choice) in choices.iter().enumerate() {
                if choice.text.trim().is_empty() {
                    diagnostics.errors.push(
                        ValidationError::new(
                            ErrorCode::EmptyContent,
                            format!("Choice {} has no text", index + 1),
                        )
                        .with_node(node.id)
                        .with_field("choices"),
                    );
                }
            }
        }
        NodeData::Challenge { difficulty, .. } => {
            if *difficulty < MIN_DIFFICULTY || *difficulty > MAX_DIFFICULTY {
                diagnostics.errors.push(
                    ValidationError::new(
                        ErrorCode::InvalidDifficulty,
                        format!(
                            "Difficulty {difficulty} is outside the {MIN_DIFFICULTY}-{MAX_DIFFICULTY} range"
                        ),
                    )
                    .with_node(node.id)
                    .with_field("difficulty"),
                );
            } else if *difficulty >= HIGH_DIFFICULTY {
                diagnostics.warnings.push(
                    ValidationWarning::new(
                        WarningCode::HighDifficulty,
                        format!("Difficulty {difficulty} is very hard"),
                    )
                    .with_node(node.id)
                    .with_field("difficulty"),
                );
            }
        }
        NodeData::Combat { enemies, can_flee, .. } => {
            if enemies.is_empty() {
                diagnostics.errors.push(
                    ValidationError::new(
                        ErrorCode::NoEnemies,
                        "Combat node needs at least one enemy",
                    )
                    .with_node(node.id)
                    .with_field("enemies"),
                );
            }
            if *can_flee && !node.is_terminal() {
                let has_flee_route = adventure
                    .outgoing(node.id)
                    .any(|c| c.source_port == "flee");
                if !has_flee_route {
                    diagnostics.warnings.push(
                        ValidationWarning::new(
                            WarningCode::UnconnectedPort,
                            "Fleeing is allowed but the flee route goes nowhere",
                        )
                        .with_node(node.id)
                        .with_field("flee"),
                    );
                }
            }
        }
        NodeData::Check { condition, .. } => {
            let missing = match condition {
                CheckCondition::Flag { flag_name } => {
                    flag_name.trim().is_empty().then_some("flag_name")
                }
                CheckCondition::Item { item_name } => {
                    item_name.trim().is_empty().then_some("item_name")
                }
                CheckCondition::Variable { variable_name } => {
                    variable_name.trim().is_empty().then_some("variable_name")
                }
                CheckCondition::Random { random_chance } => {
                    (!(0..=100).contains(random_chance)).then_some("random_chance")
                }
            };
            if let Some(field) = missing {
                diagnostics.errors.push(
                    ValidationError::new(
                        ErrorCode::MissingCheckValue,
                        "Check node is missing a usable condition value",
                    )
                    .with_node(node.id)
                    .with_field(field),
                );
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use adventure_forge_graph::{
        create_node, templates, Adventure, NodeId, NodeKind,
    };

    /// Start story -> decision (2 choices) -> combat victory / check failure
    fn four_node_adventure() -> (Adventure, [NodeId; 4]) {
        let mut adventure = Adventure::new("Four Nodes");
        let id = adventure.id;

        let mut n1 = create_node(NodeKind::Story, [0.0, 0.0], id);
        n1.content = "A long opening scene that sets the stakes for the party.".to_string();
        let n1 = adventure.add_node(n1);

        let mut n2 = create_node(NodeKind::Decision, [200.0, 0.0], id);
        n2.content = "The party must decide which road to take at the fork.".to_string();
        let (left, right) = match &n2.data {
            NodeData::Decision { choices } => (choices[0].id, choices[1].id),
            _ => unreachable!(),
        };
        let n2 = adventure.add_node(n2);

        let mut n3 = create_node(NodeKind::Combat, [400.0, -80.0], id);
        n3.content = "Bandits spring from the rocks, blades already drawn.".to_string();
        n3.is_victory_node = true;
        if let NodeData::Combat { enemies, .. } = &mut n3.data {
            enemies.push("Bandit".to_string());
        }
        let n3 = adventure.add_node(n3);

        let mut n4 = create_node(NodeKind::Check, [400.0, 80.0], id);
        n4.content = "Fate decides whether the bridge holds under your weight.".to_string();
        n4.is_failure_node = true;
        let n4 = adventure.add_node(n4);

        adventure.start_node_id = Some(n1);
        adventure.connect(n1, "continue", n2).unwrap();
        adventure
            .connect(n2, &format!("choice-{left}"), n3)
            .unwrap();
        adventure
            .connect(n2, &format!("choice-{right}"), n4)
            .unwrap();

        (adventure, [n1, n2, n3, n4])
    }

    #[test]
    fn test_valid_four_node_adventure() {
        let (adventure, _) = four_node_adventure();
        let report = validate_adventure(&adventure);
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        assert!(report.can_publish);
        assert!(report.errors.is_empty());
        assert_eq!(report.stats.node_count, 4);
        assert_eq!(report.stats.connection_count, 3);
        assert_eq!(report.stats.path_count, 2);
    }

    #[test]
    fn test_disconnected_node_is_single_orphan() {
        let (mut adventure, _) = four_node_adventure();
        let baseline = validate_adventure(&adventure);

        let stray = adventure.add_node(create_node(NodeKind::Story, [600.0, 0.0], adventure.id));
        let report = validate_adventure(&adventure);

        assert!(!report.is_valid);
        assert!(!report.can_publish);
        let orphans: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.code == ErrorCode::OrphanNode)
            .collect();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].node_id, Some(stray));
        assert_eq!(report.errors.len(), 1);
        // Path statistics are untouched by the disconnected node
        assert_eq!(report.stats.path_count, baseline.stats.path_count);
        assert_eq!(
            report.stats.shortest_path_length,
            baseline.stats.shortest_path_length
        );
    }

    #[test]
    fn test_lone_start_node_missing_endings_only() {
        let mut adventure = Adventure::new("Lone");
        let start = adventure.add_node(create_node(NodeKind::Story, [0.0, 0.0], adventure.id));
        adventure.start_node_id = Some(start);

        let report = validate_adventure(&adventure);
        let codes: Vec<_> = report.errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::NoVictoryPath, ErrorCode::NoFailurePath]);
        assert!(
            !codes.contains(&ErrorCode::OrphanNode),
            "the start node is never an orphan"
        );
    }

    #[test]
    fn test_no_start_node_reported() {
        let adventure = Adventure::new("Empty");
        let report = validate_adventure(&adventure);
        assert!(report
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::NoStartNode));
    }

    #[test]
    fn test_dangling_start_reference_reported() {
        let mut adventure = Adventure::new("Dangling");
        adventure.start_node_id = Some(NodeId::new());
        let report = validate_adventure(&adventure);
        assert!(report
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::NoStartNode));
    }

    #[test]
    fn test_unreachable_victory_reported() {
        let (mut adventure, nodes) = four_node_adventure();
        // A second victory node fed only by the stray pair below
        let mut island = create_node(NodeKind::Story, [600.0, 0.0], adventure.id);
        island.content = "A hidden grotto glitters with treasure beyond counting.".to_string();
        island.is_victory_node = true;
        let island = adventure.add_node(island);
        let feeder = adventure.add_node(create_node(NodeKind::Story, [500.0, 0.0], adventure.id));
        adventure.connect(feeder, "continue", island).unwrap();

        let report = validate_adventure(&adventure);
        let unreachable: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.code == ErrorCode::UnreachableVictory)
            .collect();
        assert_eq!(unreachable.len(), 1);
        assert_eq!(unreachable[0].node_id, Some(island));
        // The connected victory node stays clean
        assert!(!report
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnreachableVictory && e.node_id == Some(nodes[2])));
    }

    #[test]
    fn test_difficulty_boundaries() {
        let mut adventure = Adventure::new("Difficulty");
        let node_id = {
            let node = create_node(NodeKind::Challenge, [0.0, 0.0], adventure.id);
            adventure.add_node(node)
        };

        let set = |adventure: &mut Adventure, value: i32| {
            if let NodeData::Challenge { difficulty, .. } =
                &mut adventure.node_mut(node_id).unwrap().data
            {
                *difficulty = value;
            }
        };

        set(&mut adventure, 2);
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidDifficulty));

        set(&mut adventure, 16);
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics.is_clean());
        assert!(diagnostics
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::HighDifficulty));

        set(&mut adventure, 10);
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics.is_clean());
        assert!(!diagnostics
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::HighDifficulty));
    }

    #[test]
    fn test_decision_choice_rules() {
        let mut adventure = Adventure::new("Choices");
        let node_id =
            adventure.add_node(create_node(NodeKind::Decision, [0.0, 0.0], adventure.id));

        if let NodeData::Decision { choices } = &mut adventure.node_mut(node_id).unwrap().data {
            choices.clear();
        }
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::NoChoices));

        if let NodeData::Decision { choices } = &mut adventure.node_mut(node_id).unwrap().data {
            choices.push(adventure_forge_graph::Choice::new("Take the left path"));
            choices.push(adventure_forge_graph::Choice::new("   "));
        }
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(!diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::NoChoices));
        assert!(diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EmptyContent));
    }

    #[test]
    fn test_combat_rules() {
        let mut adventure = Adventure::new("Combat");
        let combat =
            adventure.add_node(create_node(NodeKind::Combat, [0.0, 0.0], adventure.id));

        // Default combat: no enemies yet, fleeable with no flee route
        let diagnostics = validate_node(adventure.node(combat).unwrap(), &adventure);
        assert!(diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::NoEnemies));
        assert!(diagnostics
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::UnconnectedPort && w.field.as_deref() == Some("flee")));

        // Wiring the flee route clears the warning
        let refuge = adventure.add_node(create_node(NodeKind::Story, [150.0, 0.0], adventure.id));
        adventure.connect(combat, "flee", refuge).unwrap();
        let diagnostics = validate_node(adventure.node(combat).unwrap(), &adventure);
        assert!(!diagnostics
            .warnings
            .iter()
            .any(|w| w.field.as_deref() == Some("flee")));
    }

    #[test]
    fn test_check_value_rules() {
        use adventure_forge_graph::CheckCondition;

        let mut adventure = Adventure::new("Checks");
        let node_id = adventure.add_node(create_node(NodeKind::Check, [0.0, 0.0], adventure.id));

        let set = |adventure: &mut Adventure, value: CheckCondition| {
            if let NodeData::Check { condition, .. } =
                &mut adventure.node_mut(node_id).unwrap().data
            {
                *condition = value;
            }
        };

        // Factory default (50% random) is valid
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics.is_clean());

        set(
            &mut adventure,
            CheckCondition::Flag {
                flag_name: String::new(),
            },
        );
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::MissingCheckValue));

        set(
            &mut adventure,
            CheckCondition::Random { random_chance: 101 },
        );
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::MissingCheckValue
                && e.field.as_deref() == Some("random_chance")));
    }

    #[test]
    fn test_empty_title_reported() {
        let mut adventure = Adventure::new("Titles");
        let node_id = adventure.add_node(create_node(NodeKind::Story, [0.0, 0.0], adventure.id));
        adventure.node_mut(node_id).unwrap().title = "  ".to_string();
        let diagnostics = validate_node(adventure.node(node_id).unwrap(), &adventure);
        assert!(diagnostics
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EmptyTitle));
    }

    #[test]
    fn test_unconnected_port_warned_not_errored() {
        let mut adventure = Adventure::new("Ports");
        let challenge =
            adventure.add_node(create_node(NodeKind::Challenge, [0.0, 0.0], adventure.id));
        let next = adventure.add_node(create_node(NodeKind::Story, [150.0, 0.0], adventure.id));
        adventure.start_node_id = Some(challenge);
        adventure.connect(challenge, "success", next).unwrap();

        let report = validate_adventure(&adventure);
        let port_warnings: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| w.code == WarningCode::UnconnectedPort)
            .collect();
        // failure on the challenge and continue on the story are open
        assert_eq!(port_warnings.len(), 2);
        assert!(!report
            .errors
            .iter()
            .any(|e| e.node_id == Some(challenge) && e.code != ErrorCode::EmptyTitle));
    }

    #[test]
    fn test_template_is_publishable() {
        let adventure = templates::haunted_mill();
        let report = validate_adventure(&adventure);
        assert!(report.can_publish, "unexpected errors: {:?}", report.errors);
        assert_eq!(report.stats.node_count, 7);
        assert!(report.stats.estimated_play_minutes >= SHORT_ADVENTURE_MINUTES);
    }

    #[test]
    fn test_report_is_deterministic() {
        let (adventure, _) = four_node_adventure();
        assert_eq!(validate_adventure(&adventure), validate_adventure(&adventure));
    }
}
