//! Neighbor queries
//!
//! Neighbors are the keys of a node's adjacency dictionaries. A relation
//! reading a single dictionary yields its keys as they are; a relation
//! combining several deduplicates them with a per-call visited set.

use super::{Direction, EdgeRelation, NeighborRelation, NodeEntry};
use crate::graph::node::AdjacencyMap;
use crate::graph::{EdgeId, Graph, GraphResult, GraphType, NodeId};
use rustc_hash::FxHashSet;

impl Graph {
    pub(crate) fn node_entry(&self, id: NodeId) -> NodeEntry<'_> {
        let node = self.node(id);
        NodeEntry {
            key: &node.key,
            attributes: &node.attributes,
        }
    }

    /// Keys of the neighbors of `node` through `relation`
    pub fn neighbors(&self, relation: NeighborRelation, node: &str) -> GraphResult<Vec<&str>> {
        Ok(self.neighbor_entries(relation, node)?.map(|entry| entry.key).collect())
    }

    /// Lazy iterator over the neighbors of `node`
    pub fn neighbor_entries(&self, relation: NeighborRelation, node: &str) -> GraphResult<NeighborEntries<'_>> {
        let id = self.node_id(node)?;
        Ok(NeighborEntries::new(self, relation, id))
    }

    pub fn for_each_neighbor<F>(&self, relation: NeighborRelation, node: &str, mut callback: F) -> GraphResult<()>
    where
        F: FnMut(NodeEntry<'_>),
    {
        for entry in self.neighbor_entries(relation, node)? {
            callback(entry);
        }
        Ok(())
    }

    /// Key of the first neighbor accepted by `predicate`, stopping there
    pub fn find_neighbor<F>(&self, relation: NeighborRelation, node: &str, mut predicate: F) -> GraphResult<Option<&str>>
    where
        F: FnMut(&NodeEntry<'_>) -> bool,
    {
        Ok(self
            .neighbor_entries(relation, node)?
            .find(|entry| predicate(entry))
            .map(|entry| entry.key))
    }

    pub fn some_neighbor<F>(&self, relation: NeighborRelation, node: &str, predicate: F) -> GraphResult<bool>
    where
        F: FnMut(&NodeEntry<'_>) -> bool,
    {
        Ok(self.find_neighbor(relation, node, predicate)?.is_some())
    }

    pub fn every_neighbor<F>(&self, relation: NeighborRelation, node: &str, mut predicate: F) -> GraphResult<bool>
    where
        F: FnMut(&NodeEntry<'_>) -> bool,
    {
        Ok(self.find_neighbor(relation, node, |entry| !predicate(entry))?.is_none())
    }

    /// Whether `neighbor` is adjacent to `node` through `relation`.
    /// `NotFound` if either node is missing.
    pub fn are_neighbors_via(&self, relation: NeighborRelation, node: &str, neighbor: &str) -> GraphResult<bool> {
        let n = self.node_id(node)?;
        let m = self.node_id(neighbor)?;
        let (edge_type, direction) = relation.parts();
        if !edge_type.fits(self.graph_type()) {
            return Ok(false);
        }

        let data = &self.node(n).data;
        let has = |map: Option<&AdjacencyMap>| map.is_some_and(|map| map.contains_key(&m));
        let mut found = false;
        if edge_type != GraphType::Undirected {
            if direction != Some(Direction::Out) {
                found |= has(data.in_map());
            }
            if direction != Some(Direction::In) {
                found |= has(data.out_map());
            }
        }
        if edge_type != GraphType::Directed {
            found |= has(data.undirected_map());
        }
        Ok(found)
    }

    pub fn are_neighbors(&self, node: &str, neighbor: &str) -> GraphResult<bool> {
        self.are_neighbors_via(EdgeRelation::All, node, neighbor)
    }

    pub fn are_in_neighbors(&self, node: &str, neighbor: &str) -> GraphResult<bool> {
        self.are_neighbors_via(EdgeRelation::In, node, neighbor)
    }

    pub fn are_out_neighbors(&self, node: &str, neighbor: &str) -> GraphResult<bool> {
        self.are_neighbors_via(EdgeRelation::Out, node, neighbor)
    }

    pub fn are_inbound_neighbors(&self, node: &str, neighbor: &str) -> GraphResult<bool> {
        self.are_neighbors_via(EdgeRelation::Inbound, node, neighbor)
    }

    pub fn are_outbound_neighbors(&self, node: &str, neighbor: &str) -> GraphResult<bool> {
        self.are_neighbors_via(EdgeRelation::Outbound, node, neighbor)
    }

    pub fn are_directed_neighbors(&self, node: &str, neighbor: &str) -> GraphResult<bool> {
        self.are_neighbors_via(EdgeRelation::Directed, node, neighbor)
    }

    pub fn are_undirected_neighbors(&self, node: &str, neighbor: &str) -> GraphResult<bool> {
        self.are_neighbors_via(EdgeRelation::Undirected, node, neighbor)
    }
}

/// Pull iterator over neighbors. Single pass; call again to restart.
pub struct NeighborEntries<'g> {
    graph: &'g Graph,
    maps: std::vec::IntoIter<&'g AdjacencyMap>,
    keys: Option<indexmap::map::Keys<'g, NodeId, EdgeId>>,
    /// Present when several dictionaries are combined
    visited: Option<FxHashSet<NodeId>>,
}

impl<'g> NeighborEntries<'g> {
    fn new(graph: &'g Graph, relation: NeighborRelation, node: NodeId) -> Self {
        let (edge_type, direction) = relation.parts();
        let data = &graph.node(node).data;
        let mut maps = Vec::with_capacity(3);

        if edge_type.fits(graph.graph_type()) {
            if edge_type != GraphType::Undirected {
                if direction != Some(Direction::Out) {
                    maps.extend(data.in_map());
                }
                if direction != Some(Direction::In) {
                    maps.extend(data.out_map());
                }
            }
            if edge_type != GraphType::Directed {
                maps.extend(data.undirected_map());
            }
        }

        let visited = (maps.len() > 1).then(FxHashSet::default);
        NeighborEntries {
            graph,
            maps: maps.into_iter(),
            keys: None,
            visited,
        }
    }
}

impl<'g> Iterator for NeighborEntries<'g> {
    type Item = NodeEntry<'g>;

    fn next(&mut self) -> Option<NodeEntry<'g>> {
        loop {
            if let Some(keys) = self.keys.as_mut() {
                match keys.next() {
                    Some(&neighbor) => {
                        if let Some(visited) = self.visited.as_mut() {
                            if !visited.insert(neighbor) {
                                continue;
                            }
                        }
                        return Some(self.graph.node_entry(neighbor));
                    }
                    None => self.keys = None,
                }
            }
            self.keys = Some(self.maps.next()?.keys());
        }
    }
}
