//! Whole-graph adjacency walk
//!
//! For every node, the `out` dictionary then the `undirected` dictionary.
//! Directed edges are reported once, from their source. Undirected edges are
//! reported from both endpoints, self-loops once. The asymmetric walk reports
//! each undirected edge from a single endpoint.

use super::{AdjacencyEntry, EdgeIds};
use crate::graph::arena;
use crate::graph::node::NodeRecord;
use crate::graph::{Graph, NodeId};

impl Graph {
    pub fn adjacency_entries(&self) -> AdjacencyEntries<'_> {
        AdjacencyEntries::new(self, false)
    }

    /// Like [`Graph::adjacency_entries`], but each undirected edge is
    /// reported once
    pub fn asymmetric_adjacency_entries(&self) -> AdjacencyEntries<'_> {
        AdjacencyEntries::new(self, true)
    }

    pub fn for_each_adjacency_entry<F>(&self, mut callback: F)
    where
        F: FnMut(AdjacencyEntry<'_>),
    {
        for entry in self.adjacency_entries() {
            callback(entry);
        }
    }

    pub fn for_each_asymmetric_adjacency_entry<F>(&self, mut callback: F)
    where
        F: FnMut(AdjacencyEntry<'_>),
    {
        for entry in self.asymmetric_adjacency_entries() {
            callback(entry);
        }
    }
}

/// Pull iterator over adjacency entries. Single pass; call again to restart.
pub struct AdjacencyEntries<'g> {
    graph: &'g Graph,
    nodes: arena::Iter<'g, NodeRecord>,
    current: Option<(NodeId, EdgeIds<'g>)>,
    asymmetric: bool,
}

impl<'g> AdjacencyEntries<'g> {
    fn new(graph: &'g Graph, asymmetric: bool) -> Self {
        AdjacencyEntries {
            graph,
            nodes: graph.nodes.iter(),
            current: None,
            asymmetric,
        }
    }
}

impl<'g> Iterator for AdjacencyEntries<'g> {
    type Item = AdjacencyEntry<'g>;

    fn next(&mut self) -> Option<AdjacencyEntry<'g>> {
        let graph = self.graph;
        loop {
            if let Some((node, edges)) = self.current.as_mut() {
                let node = *node;
                for id in edges.by_ref() {
                    let edge = graph.edge(id);
                    let neighbor = if edge.undirected {
                        edge.opposite(node).unwrap_or(node)
                    } else {
                        edge.target
                    };
                    if self.asymmetric && edge.undirected && neighbor.index() < node.index() {
                        continue;
                    }

                    let n = graph.node(node);
                    let m = graph.node(neighbor);
                    return Some(AdjacencyEntry {
                        node: &n.key,
                        neighbor: &m.key,
                        node_attributes: &n.attributes,
                        neighbor_attributes: &m.attributes,
                        edge: &edge.key,
                        edge_attributes: &edge.attributes,
                        undirected: edge.undirected,
                    });
                }
            }

            let (idx, _) = self.nodes.next()?;
            let node = NodeId::from(idx);
            self.current = Some((node, EdgeIds::adjacency_of(graph, node)));
        }
    }
}
