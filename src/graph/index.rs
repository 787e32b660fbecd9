//! Structural index: per-node adjacency dictionaries and parallel-edge chains
//!
//! Every edge occupies the slots dictated by its directedness:
//! - directed `s -> t`: `s.out[t]` and `t.in[s]`
//! - undirected `s -- t`: `s.undirected[t]` and `t.undirected[s]`
//! - undirected self-loop on `n`: `n.undirected[n]` only
//!
//! A slot holds the head of a doubly-linked chain of the edges sharing it.
//! Simple graphs only ever build one-member chains, so both modes share the
//! same read path and switching a graph to multi needs no rewrite.

use super::node::{AdjacencyMap, NodeData};
use super::store::Graph;
use super::types::{EdgeId, NodeId};

/// One of the three adjacency dictionaries of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dict {
    Out,
    In,
    Undirected,
}

impl NodeData {
    pub(crate) fn dict(&self, dict: Dict) -> Option<&AdjacencyMap> {
        match dict {
            Dict::Out => self.out_map(),
            Dict::In => self.in_map(),
            Dict::Undirected => self.undirected_map(),
        }
    }

    pub(crate) fn dict_mut(&mut self, dict: Dict) -> Option<&mut AdjacencyMap> {
        match dict {
            Dict::Out => self.directed_mut().map(|d| &mut d.out),
            Dict::In => self.directed_mut().map(|d| &mut d.inbound),
            Dict::Undirected => self.undirected_mut().map(|u| &mut u.undirected),
        }
    }
}

/// A single adjacency slot: `node.dict[neighbor]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub node: NodeId,
    pub dict: Dict,
    pub neighbor: NodeId,
}

impl Graph {
    /// Slots an edge occupies; the second is absent for undirected self-loops.
    pub(crate) fn slots_of(&self, id: EdgeId) -> (Slot, Option<Slot>) {
        let edge = self.edge(id);
        let (s, t) = (edge.source, edge.target);
        if edge.undirected {
            let first = Slot { node: s, dict: Dict::Undirected, neighbor: t };
            let second = (s != t).then_some(Slot { node: t, dict: Dict::Undirected, neighbor: s });
            (first, second)
        } else {
            (
                Slot { node: s, dict: Dict::Out, neighbor: t },
                Some(Slot { node: t, dict: Dict::In, neighbor: s }),
            )
        }
    }

    fn read_slot(&self, slot: Slot) -> Option<EdgeId> {
        self.node(slot.node)
            .data
            .dict(slot.dict)
            .and_then(|m| m.get(&slot.neighbor))
            .copied()
    }

    fn write_slot(&mut self, slot: Slot, head: EdgeId) {
        if let Some(map) = self.node_mut(slot.node).data.dict_mut(slot.dict) {
            map.insert(slot.neighbor, head);
        }
    }

    fn delete_slot(&mut self, slot: Slot) {
        if let Some(map) = self.node_mut(slot.node).data.dict_mut(slot.dict) {
            map.swap_remove(&slot.neighbor);
        }
    }

    /// Insert a freshly allocated edge into the dictionaries of both
    /// endpoints. In multi mode the edge is prepended to the slot's chain.
    pub(crate) fn attach(&mut self, id: EdgeId) {
        let (first, second) = self.slots_of(id);

        if self.is_multi() {
            if let Some(head) = self.read_slot(first) {
                self.edge_mut(head).previous = Some(id);
                self.edge_mut(id).next = Some(head);
            }
        }

        self.write_slot(first, id);
        if let Some(second) = second {
            self.write_slot(second, id);
        }
    }

    /// Remove an edge from the dictionaries of both endpoints, splicing it
    /// out of its chain. A slot is deleted only once its chain is empty.
    pub(crate) fn detach(&mut self, id: EdgeId) {
        let (first, second) = self.slots_of(id);
        let (previous, next) = {
            let edge = self.edge(id);
            (edge.previous, edge.next)
        };

        match (previous, next) {
            (None, None) => {
                self.delete_slot(first);
                if let Some(second) = second {
                    self.delete_slot(second);
                }
            }
            (None, Some(next)) => {
                self.edge_mut(next).previous = None;
                self.write_slot(first, next);
                if let Some(second) = second {
                    self.write_slot(second, next);
                }
            }
            (Some(previous), next) => {
                self.edge_mut(previous).next = next;
                if let Some(next) = next {
                    self.edge_mut(next).previous = Some(previous);
                }
            }
        }

        let edge = self.edge_mut(id);
        edge.previous = None;
        edge.next = None;
    }

    /// Empty every adjacency dictionary and degree counter at once.
    pub(crate) fn clear_index(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.data.clear();
        }
    }
}
