//! Traversal engine
//!
//! Read-only walks over the structural index. Every family comes in two
//! access modes yielding the same items in the same order:
//! - pull: a lazy, single-pass iterator (`*_entries`)
//! - push: a callback per item (`for_each_*`), with breakable variants
//!   (`find_*`, `some_*`, `every_*`)
//!
//! Order: whole-graph walks follow arena slot order; node walks visit the
//! `in`, `out` then `undirected` dictionaries; each dictionary slot yields
//! its whole chain, most recently added edge first.

pub mod adjacency;
pub mod edges;
pub mod neighbors;
pub mod nodes;
pub(crate) mod walker;

pub use adjacency::AdjacencyEntries;
pub use edges::EdgeEntries;
pub use neighbors::NeighborEntries;
pub use nodes::NodeEntries;
pub(crate) use walker::EdgeIds;

use crate::graph::{Attributes, GraphType};

/// Which incident edges of a node a query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeRelation {
    /// Every edge
    #[default]
    All,
    /// Directed edges pointing to the node
    In,
    /// Directed edges leaving the node
    Out,
    /// `In` plus undirected edges
    Inbound,
    /// `Out` plus undirected edges
    Outbound,
    /// Directed edges either way
    Directed,
    Undirected,
}

/// Neighbor queries project edge relations onto the opposite endpoints
pub type NeighborRelation = EdgeRelation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    In,
    Out,
}

impl EdgeRelation {
    /// Edge type and direction the relation walks
    pub(crate) fn parts(self) -> (GraphType, Option<Direction>) {
        match self {
            EdgeRelation::All => (GraphType::Mixed, None),
            EdgeRelation::In => (GraphType::Directed, Some(Direction::In)),
            EdgeRelation::Out => (GraphType::Directed, Some(Direction::Out)),
            EdgeRelation::Inbound => (GraphType::Mixed, Some(Direction::In)),
            EdgeRelation::Outbound => (GraphType::Mixed, Some(Direction::Out)),
            EdgeRelation::Directed => (GraphType::Directed, None),
            EdgeRelation::Undirected => (GraphType::Undirected, None),
        }
    }
}

/// Which part of the graph an edge query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeScope<'k> {
    Graph,
    /// Edges incident to a node
    Node(&'k str),
    /// Edges linking two nodes. Directional relations are read from the
    /// first node: `Out` means first -> second, `In` means second -> first.
    Pair(&'k str, &'k str),
}

/// An edge as seen by traversals
#[derive(Debug, Clone, Copy)]
pub struct EdgeEntry<'g> {
    pub key: &'g str,
    pub attributes: &'g Attributes,
    pub source: &'g str,
    pub target: &'g str,
    pub source_attributes: &'g Attributes,
    pub target_attributes: &'g Attributes,
    pub undirected: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct NodeEntry<'g> {
    pub key: &'g str,
    pub attributes: &'g Attributes,
}

/// One step of an adjacency walk: `node` reaches `neighbor` through `edge`
#[derive(Debug, Clone, Copy)]
pub struct AdjacencyEntry<'g> {
    pub node: &'g str,
    pub neighbor: &'g str,
    pub node_attributes: &'g Attributes,
    pub neighbor_attributes: &'g Attributes,
    pub edge: &'g str,
    pub edge_attributes: &'g Attributes,
    pub undirected: bool,
}
