// SPDX-License-Identifier: MIT OR Apache-2.0
//! Aggregate statistics over an adventure graph.

use adventure_forge_graph::{Adventure, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate graph statistics reported alongside validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdventureStats {
    /// Total node count
    pub node_count: usize,
    /// Total connection count
    pub connection_count: usize,
    /// Node counts broken down by kind
    pub nodes_by_kind: BTreeMap<NodeKind, usize>,
    /// Number of start-to-terminal (or dead-end) paths
    pub path_count: usize,
    /// Fewest edges on any path; 0 when there are no paths
    pub shortest_path_length: usize,
    /// Most edges on any path; 0 when there are no paths
    pub longest_path_length: usize,
    /// Mean edge count across paths; 0 when there are no paths
    pub average_path_length: f32,
    /// Estimated play time in minutes
    pub estimated_play_minutes: f32,
}

/// Per-kind minute weight used for the play-time estimate
fn minute_weight(kind: NodeKind) -> f32 {
    match kind {
        NodeKind::Story => 2.0,
        NodeKind::Decision => 1.0,
        NodeKind::Challenge => 3.0,
        NodeKind::Combat => 8.0,
        NodeKind::Check => 0.5,
    }
}

/// Compute statistics from an adventure snapshot and its enumerated
/// paths.
///
/// Path lengths are edge counts. The play-time estimate sums each node's
/// per-kind minute weight, then divides by the connection-to-node
/// density when it exceeds 1: a linear chain plays all of its content,
/// while denser branching splits content across mutually exclusive
/// paths, so a single session sees proportionally less of it.
pub fn compute_stats(adventure: &Adventure, paths: &[Vec<NodeId>]) -> AdventureStats {
    let node_count = adventure.node_count();
    let connection_count = adventure.connection_count();

    let mut nodes_by_kind = BTreeMap::new();
    let mut total_minutes = 0.0;
    for node in adventure.nodes() {
        *nodes_by_kind.entry(node.kind()).or_insert(0) += 1;
        total_minutes += minute_weight(node.kind());
    }

    let lengths: Vec<usize> = paths.iter().map(|p| p.len().saturating_sub(1)).collect();
    let (shortest, longest, average) = if lengths.is_empty() {
        (0, 0, 0.0)
    } else {
        let sum: usize = lengths.iter().sum();
        (
            *lengths.iter().min().expect("non-empty"),
            *lengths.iter().max().expect("non-empty"),
            sum as f32 / lengths.len() as f32,
        )
    };

    let density = if node_count == 0 {
        0.0
    } else {
        connection_count as f32 / node_count as f32
    };
    let estimated_play_minutes = total_minutes / density.max(1.0);

    AdventureStats {
        node_count,
        connection_count,
        nodes_by_kind,
        path_count: paths.len(),
        shortest_path_length: shortest,
        longest_path_length: longest,
        average_path_length: average,
        estimated_play_minutes,
    }
}
