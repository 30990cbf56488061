// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reachability and path enumeration over an adventure graph.

use adventure_forge_graph::{Adventure, NodeId};
use std::collections::{HashSet, VecDeque};

/// Hard bound on path depth during enumeration.
///
/// The graph is acyclic by construction, so this only matters for graphs
/// corrupted outside the connection engine; it is not a normal operating
/// limit.
pub const MAX_PATH_DEPTH: usize = 100;

/// Every node reachable from `start` by forward traversal, including
/// `start` itself.
pub fn reachable_nodes(start: NodeId, adventure: &Adventure) -> HashSet<NodeId> {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for connection in adventure.outgoing(current) {
            if visited.insert(connection.target_node_id) {
                queue.push_back(connection.target_node_id);
            }
        }
    }
    visited
}

/// Enumerate every path from the start node to a terminal node or dead
/// end.
///
/// A branch ends (and its path is recorded) at a victory/failure-flagged
/// node or at a node with no outgoing connections. Nodes already on the
/// current path are never re-entered, and [`MAX_PATH_DEPTH`] bounds the
/// walk against corrupted graphs. Returns an empty list when no start
/// node is set or it references a missing node.
pub fn enumerate_paths(adventure: &Adventure) -> Vec<Vec<NodeId>> {
    let Some(start) = adventure.start_node_id else {
        return Vec::new();
    };
    if adventure.node(start).is_none() {
        return Vec::new();
    }

    let mut paths = Vec::new();
    let mut current = Vec::new();
    walk(adventure, start, &mut current, &mut paths);
    paths
}

fn walk(
    adventure: &Adventure,
    node_id: NodeId,
    current: &mut Vec<NodeId>,
    paths: &mut Vec<Vec<NodeId>>,
) {
    current.push(node_id);

    if current.len() >= MAX_PATH_DEPTH {
        tracing::warn!(
            depth = current.len(),
            "path enumeration hit the depth cap; graph may be corrupted"
        );
        paths.push(current.clone());
        current.pop();
        return;
    }

    let terminal = adventure
        .node(node_id)
        .is_some_and(|node| node.is_terminal());
    let targets: Vec<NodeId> = adventure
        .outgoing(node_id)
        .map(|c| c.target_node_id)
        .collect();

    if terminal || targets.is_empty() {
        paths.push(current.clone());
    } else {
        for target in targets {
            if !current.contains(&target) {
                walk(adventure, target, current, paths);
            }
        }
    }

    current.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use adventure_forge_graph::{
        create_node, Adventure, NodeConnection, NodeId, NodeKind, ConnectionType,
    };

    fn story(adventure: &mut Adventure, x: f32) -> NodeId {
        let node = create_node(NodeKind::Story, [x, 0.0], adventure.id);
        adventure.add_node(node)
    }

    #[test]
    fn test_reachable_includes_start() {
        let mut adventure = Adventure::new("Reach");
        let a = story(&mut adventure, 0.0);
        let reachable = reachable_nodes(a, &adventure);
        assert_eq!(reachable, HashSet::from([a]));
    }

    #[test]
    fn test_reachable_follows_forward_edges_only() {
        let mut adventure = Adventure::new("Reach");
        let a = story(&mut adventure, 0.0);
        let b = story(&mut adventure, 100.0);
        let c = story(&mut adventure, 200.0);
        adventure.connect(a, "continue", b).unwrap();
        adventure.connect(c, "continue", a).unwrap();

        let reachable = reachable_nodes(a, &adventure);
        assert!(reachable.contains(&b));
        assert!(!reachable.contains(&c), "incoming edges are not followed");
    }

    #[test]
    fn test_no_start_yields_no_paths() {
        let mut adventure = Adventure::new("Paths");
        story(&mut adventure, 0.0);
        assert!(enumerate_paths(&adventure).is_empty());
    }

    #[test]
    fn test_single_node_is_one_path() {
        let mut adventure = Adventure::new("Paths");
        let a = story(&mut adventure, 0.0);
        adventure.start_node_id = Some(a);
        assert_eq!(enumerate_paths(&adventure), vec![vec![a]]);
    }

    #[test]
    fn test_two_branch_decision_yields_two_paths() {
        let mut adventure = Adventure::new("Paths");
        let start = story(&mut adventure, 0.0);
        let decision =
            adventure.add_node(create_node(NodeKind::Decision, [100.0, 0.0], adventure.id));
        let mut win = create_node(NodeKind::Combat, [200.0, -50.0], adventure.id);
        win.is_victory_node = true;
        let win = adventure.add_node(win);
        let mut lose = create_node(NodeKind::Check, [200.0, 50.0], adventure.id);
        lose.is_failure_node = true;
        let lose = adventure.add_node(lose);

        adventure.start_node_id = Some(start);
        adventure.connect(start, "continue", decision).unwrap();
        adventure.connect(decision, "choice-a", win).unwrap();
        adventure.connect(decision, "choice-b", lose).unwrap();

        let paths = enumerate_paths(&adventure);
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&vec![start, decision, win]));
        assert!(paths.contains(&vec![start, decision, lose]));
        // Path length (edge count) equals each branch's edge count
        assert!(paths.iter().all(|p| p.len() - 1 == 2));
    }

    #[test]
    fn test_terminal_node_stops_the_walk() {
        let mut adventure = Adventure::new("Paths");
        let a = story(&mut adventure, 0.0);
        let b = story(&mut adventure, 100.0);
        let c = story(&mut adventure, 200.0);
        adventure.start_node_id = Some(a);
        adventure.connect(a, "continue", b).unwrap();
        adventure.connect(b, "continue", c).unwrap();
        adventure.node_mut(b).unwrap().is_victory_node = true;

        assert_eq!(enumerate_paths(&adventure), vec![vec![a, b]]);
    }

    #[test]
    fn test_corrupted_cycle_terminates() {
        // Bypass validation to simulate external corruption; the
        // path-local guard must still terminate the walk.
        let mut adventure = Adventure::new("Corrupt");
        let a = story(&mut adventure, 0.0);
        let b = story(&mut adventure, 100.0);
        adventure.start_node_id = Some(a);
        adventure.connect(a, "continue", b).unwrap();
        adventure.add_connection(NodeConnection::new(
            adventure.id,
            b,
            "continue",
            a,
            ConnectionType::Default,
        ));

        let paths = enumerate_paths(&adventure);
        // b's only exit loops back onto the path, so the branch ends
        // without recording a completed path.
        assert!(paths.is_empty());
    }
}
