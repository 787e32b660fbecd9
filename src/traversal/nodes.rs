//! Whole-graph node iteration, in arena order

use super::NodeEntry;
use crate::graph::arena;
use crate::graph::node::NodeRecord;
use crate::graph::Graph;

impl Graph {
    /// Keys of every node
    pub fn nodes(&self) -> Vec<&str> {
        self.node_entries().map(|entry| entry.key).collect()
    }

    pub fn node_entries(&self) -> NodeEntries<'_> {
        NodeEntries {
            nodes: self.nodes.iter(),
        }
    }

    pub fn for_each_node<F>(&self, mut callback: F)
    where
        F: FnMut(NodeEntry<'_>),
    {
        for entry in self.node_entries() {
            callback(entry);
        }
    }

    /// Key of the first node accepted by `predicate`, stopping there
    pub fn find_node<F>(&self, mut predicate: F) -> Option<&str>
    where
        F: FnMut(&NodeEntry<'_>) -> bool,
    {
        self.node_entries().find(|entry| predicate(entry)).map(|entry| entry.key)
    }

    pub fn some_node<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&NodeEntry<'_>) -> bool,
    {
        self.find_node(predicate).is_some()
    }

    pub fn every_node<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&NodeEntry<'_>) -> bool,
    {
        self.find_node(|entry| !predicate(entry)).is_none()
    }
}

/// Pull iterator over nodes. Single pass; call again to restart.
pub struct NodeEntries<'g> {
    nodes: arena::Iter<'g, NodeRecord>,
}

impl<'g> Iterator for NodeEntries<'g> {
    type Item = NodeEntry<'g>;

    fn next(&mut self) -> Option<NodeEntry<'g>> {
        self.nodes.next().map(|(_, node)| NodeEntry {
            key: &node.key,
            attributes: &node.attributes,
        })
    }
}
