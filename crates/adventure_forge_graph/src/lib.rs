// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adventure graph data model for Adventure Forge.
//!
//! This crate provides the authoring core the node-graph editor is built
//! on:
//! - The adventure/node/connection data model (arena-owned, id-linked)
//! - Node factories and duplication
//! - Dynamic output-port derivation
//! - Connection validation that keeps the graph acyclic by construction
//!
//! ## Architecture
//!
//! Nodes and connections never hold references to one another; all
//! linkage is by id into the owning [`Adventure`]'s collections. The core
//! is synchronous and side-effect-free — every operation is a function of
//! an adventure snapshot, so callers may re-run it on every edit.
//!
//! Path analysis and publish validation live in the companion
//! `adventure_forge_analysis` crate.

pub mod adventure;
pub mod connection;
pub mod node;
pub mod port;
pub mod registry;
pub mod templates;

pub use adventure::{Adventure, AdventureId};
pub use connection::{validate_connection, ConnectionError, ConnectionId, NodeConnection};
pub use node::{AdventureNode, CheckCondition, Choice, ChoiceId, NodeData, NodeId, NodeKind};
pub use port::{ConnectionType, Port};
pub use registry::{
    create_node, duplicate_node, output_ports, required_ports, DUPLICATE_OFFSET,
};
