//! Mixgraph
//!
//! An in-memory, mutable graph store supporting mixed, directed and
//! undirected graphs, each optionally allowing parallel edges, behind one
//! implementation.
//!
//! # Architecture
//!
//! - Entity model: node and edge records in slot arenas, addressed by
//!   string keys
//! - Structural index: per-node `out` / `in` / `undirected` dictionaries,
//!   whose slots hold the head of a chain of parallel edges
//! - Mutation engine: add / merge / update / drop with validation before
//!   any state change, incremental counters and synchronous events
//! - Traversal engine: edge, neighbor, node and adjacency walks as lazy
//!   iterators or callbacks
//! - Serialization: serde snapshots and validated JSON import
//!
//! Mutating a graph while iterating it is rejected at compile time:
//! traversals borrow the graph immutably.
//!
//! ## Example Usage
//!
//! ```rust
//! use mixgraph::{attrs, EdgeRelation, EdgeScope, Graph};
//!
//! let mut graph = Graph::mixed();
//!
//! graph.add_node("alice", attrs! { "age" => 30 }).unwrap();
//! graph.add_node("bob", attrs! {}).unwrap();
//!
//! graph.add_directed_edge("alice", "bob", attrs! { "since" => 2019 }).unwrap();
//! graph.add_undirected_edge("bob", "alice", attrs! {}).unwrap();
//!
//! assert_eq!(graph.order(), 2);
//! assert_eq!(graph.size(), 2);
//! assert_eq!(graph.degree("alice").unwrap(), 2);
//!
//! let outbound = graph.edges(EdgeRelation::Outbound, EdgeScope::Node("alice")).unwrap();
//! assert_eq!(outbound.len(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod serialization;
pub mod traversal;

// Re-export main types for convenience
pub use graph::{
    attributes_from_json, attributes_to_json, AttributeTarget, AttributeUpdate, Attributes,
    EdgeRef, ErrorKind, Graph, GraphError, GraphEvent, GraphOptions, GraphResult, GraphType,
    ListenerId, MergeOutcome, PropertyValue, UpdateHints,
};

pub use traversal::{
    AdjacencyEntries, AdjacencyEntry, EdgeEntries, EdgeEntry, EdgeRelation, EdgeScope,
    NeighborEntries, NeighborRelation, NodeEntries, NodeEntry,
};

pub use serialization::{ImportRecord, SerializedEdge, SerializedGraph, SerializedNode};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
