//! Edge records
//!
//! An edge knows its key, whether that key was generated, its directedness,
//! its endpoints (as arena ids, never owning references) and, in multi
//! graphs, its neighbors in the chain of parallel edges.

use super::property::Attributes;
use super::types::{EdgeId, NodeId};

#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord {
    /// Immutable key
    pub key: String,

    /// Whether the store generated `key`
    pub generated_key: bool,

    pub undirected: bool,

    pub source: NodeId,

    pub target: NodeId,

    pub attributes: Attributes,

    /// Previous edge in the parallel-edge chain
    pub previous: Option<EdgeId>,

    /// Next edge in the parallel-edge chain
    pub next: Option<EdgeId>,
}

impl EdgeRecord {
    pub fn new(
        key: String,
        generated_key: bool,
        undirected: bool,
        source: NodeId,
        target: NodeId,
        attributes: Attributes,
    ) -> Self {
        EdgeRecord {
            key,
            generated_key,
            undirected,
            source,
            target,
            attributes,
            previous: None,
            next: None,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint that is not `node`; `node` itself for self-loops.
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn has_extremity(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}
