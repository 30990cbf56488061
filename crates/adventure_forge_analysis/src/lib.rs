// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path analysis and publish validation for Adventure Forge graphs.
//!
//! Builds on `adventure_forge_graph`:
//! - Reachability and exhaustive path enumeration
//! - Structural and per-node semantic validation
//! - Aggregate statistics (counts, path lengths, play-time estimate)
//!
//! The validator is the only externally consumed surface: the publishing
//! flow calls [`validate_adventure`] and gates publish/update actions on
//! the report's `can_publish`. Everything here is a pure function of an
//! adventure snapshot — deterministic, idempotent, and safe to re-run on
//! every edit.

pub mod paths;
pub mod report;
pub mod stats;
pub mod validation;

pub use paths::{enumerate_paths, reachable_nodes, MAX_PATH_DEPTH};
pub use report::{
    ErrorCode, NodeDiagnostics, ValidationError, ValidationReport, ValidationWarning,
    WarningCode,
};
pub use stats::AdventureStats;
pub use validation::{validate_adventure, validate_node};
