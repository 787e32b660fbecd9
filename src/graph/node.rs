//! Node records
//!
//! A node carries its key, its attribute record and one of three adjacency
//! payloads picked once, at graph construction, from the graph type:
//! - `Mixed`: directed side (`out`, `in`) and undirected side
//! - `Directed`: directed side only
//! - `Undirected`: undirected side only

use super::property::Attributes;
use super::types::{EdgeId, GraphType, NodeId};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Neighbor -> edge slot. The edge is the head of the chain of parallel
/// edges for that neighbor; in simple graphs the chain has one member.
pub(crate) type AdjacencyMap = IndexMap<NodeId, EdgeId, FxBuildHasher>;

/// Directed adjacency and counters
#[derive(Debug, Clone, Default)]
pub(crate) struct DirectedSide {
    pub out: AdjacencyMap,
    pub inbound: AdjacencyMap,
    pub in_degree: usize,
    pub out_degree: usize,
    pub loops: usize,
}

/// Undirected adjacency and counters
#[derive(Debug, Clone, Default)]
pub(crate) struct UndirectedSide {
    pub undirected: AdjacencyMap,
    pub degree: usize,
    pub loops: usize,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Mixed(DirectedSide, UndirectedSide),
    Directed(DirectedSide),
    Undirected(UndirectedSide),
}

impl NodeData {
    pub fn for_graph(graph_type: GraphType) -> Self {
        match graph_type {
            GraphType::Mixed => NodeData::Mixed(DirectedSide::default(), UndirectedSide::default()),
            GraphType::Directed => NodeData::Directed(DirectedSide::default()),
            GraphType::Undirected => NodeData::Undirected(UndirectedSide::default()),
        }
    }

    pub fn directed(&self) -> Option<&DirectedSide> {
        match self {
            NodeData::Mixed(d, _) | NodeData::Directed(d) => Some(d),
            NodeData::Undirected(_) => None,
        }
    }

    pub fn directed_mut(&mut self) -> Option<&mut DirectedSide> {
        match self {
            NodeData::Mixed(d, _) | NodeData::Directed(d) => Some(d),
            NodeData::Undirected(_) => None,
        }
    }

    pub fn undirected(&self) -> Option<&UndirectedSide> {
        match self {
            NodeData::Mixed(_, u) | NodeData::Undirected(u) => Some(u),
            NodeData::Directed(_) => None,
        }
    }

    pub fn undirected_mut(&mut self) -> Option<&mut UndirectedSide> {
        match self {
            NodeData::Mixed(_, u) | NodeData::Undirected(u) => Some(u),
            NodeData::Directed(_) => None,
        }
    }

    /// One-way transition to the mixed payload. Existing adjacency is kept.
    pub fn upgrade_to_mixed(&mut self) {
        let current = std::mem::replace(
            self,
            NodeData::Undirected(UndirectedSide::default()),
        );
        *self = match current {
            NodeData::Directed(d) => NodeData::Mixed(d, UndirectedSide::default()),
            NodeData::Undirected(u) => NodeData::Mixed(DirectedSide::default(), u),
            mixed @ NodeData::Mixed(..) => mixed,
        };
    }

    /// Drop every adjacency entry and zero the counters, keeping the variant.
    pub fn clear(&mut self) {
        if let Some(d) = self.directed_mut() {
            *d = DirectedSide::default();
        }
        if let Some(u) = self.undirected_mut() {
            *u = UndirectedSide::default();
        }
    }

    pub fn out_map(&self) -> Option<&AdjacencyMap> {
        self.directed().map(|d| &d.out)
    }

    pub fn in_map(&self) -> Option<&AdjacencyMap> {
        self.directed().map(|d| &d.inbound)
    }

    pub fn undirected_map(&self) -> Option<&AdjacencyMap> {
        self.undirected().map(|u| &u.undirected)
    }
}

/// A node of the graph
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    /// Immutable key
    pub key: String,

    pub attributes: Attributes,

    pub data: NodeData,
}

impl NodeRecord {
    pub fn new(key: String, attributes: Attributes, graph_type: GraphType) -> Self {
        NodeRecord {
            key,
            attributes,
            data: NodeData::for_graph(graph_type),
        }
    }

    pub fn in_degree(&self) -> usize {
        self.data.directed().map_or(0, |d| d.in_degree)
    }

    pub fn out_degree(&self) -> usize {
        self.data.directed().map_or(0, |d| d.out_degree)
    }

    pub fn directed_loops(&self) -> usize {
        self.data.directed().map_or(0, |d| d.loops)
    }

    pub fn undirected_degree(&self) -> usize {
        self.data.undirected().map_or(0, |u| u.degree)
    }

    pub fn undirected_loops(&self) -> usize {
        self.data.undirected().map_or(0, |u| u.loops)
    }
}
