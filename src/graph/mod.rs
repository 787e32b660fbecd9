//! Core graph store
//!
//! This module implements the mutable graph model:
//! - Nodes and edges keyed by strings, stored in slot arenas
//! - Mixed, directed and undirected graphs, each optionally multi
//! - Per-node adjacency dictionaries with chains of parallel edges
//! - Incrementally maintained counters and synchronous change events

pub(crate) mod arena;
pub mod attributes;
mod degree;
pub(crate) mod edge;
pub mod error;
pub mod event;
pub(crate) mod index;
pub mod mutation;
pub(crate) mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use attributes::{AttributeTarget, EdgeRef};
pub use error::{ErrorKind, GraphError, GraphResult};
pub use event::{AttributeUpdate, EventBus, GraphEvent, Listener, ListenerId, UpdateHints};
pub use mutation::MergeOutcome;
pub use property::{attributes_from_json, attributes_to_json, Attributes, PropertyValue};
pub use store::Graph;
pub use types::{GraphOptions, GraphType};
pub(crate) use types::{EdgeId, NodeId};
