//! Node degrees, read from the incrementally maintained counters
//!
//! A directed self-loop counts once in the in-degree and once in the
//! out-degree; an undirected self-loop counts twice in the undirected degree.

use super::error::GraphResult;
use super::node::NodeRecord;
use super::store::Graph;

impl NodeRecord {
    fn in_with_loops(&self, loops: bool) -> usize {
        self.in_degree() + if loops { self.directed_loops() } else { 0 }
    }

    fn out_with_loops(&self, loops: bool) -> usize {
        self.out_degree() + if loops { self.directed_loops() } else { 0 }
    }

    fn undirected_with_loops(&self, loops: bool) -> usize {
        self.undirected_degree() + if loops { 2 * self.undirected_loops() } else { 0 }
    }
}

impl Graph {
    fn degree_of(&self, key: &str, f: impl Fn(&NodeRecord) -> usize) -> GraphResult<usize> {
        let id = self.node_id(key)?;
        Ok(f(self.node(id)))
    }

    pub fn in_degree(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.in_with_loops(true))
    }

    pub fn out_degree(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.out_with_loops(true))
    }

    /// In-degree plus undirected degree
    pub fn inbound_degree(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.in_with_loops(true) + n.undirected_with_loops(true))
    }

    /// Out-degree plus undirected degree
    pub fn outbound_degree(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.out_with_loops(true) + n.undirected_with_loops(true))
    }

    pub fn directed_degree(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.in_with_loops(true) + n.out_with_loops(true))
    }

    pub fn undirected_degree(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.undirected_with_loops(true))
    }

    pub fn degree(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| {
            n.in_with_loops(true) + n.out_with_loops(true) + n.undirected_with_loops(true)
        })
    }

    pub fn in_degree_without_self_loops(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.in_with_loops(false))
    }

    pub fn out_degree_without_self_loops(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.out_with_loops(false))
    }

    pub fn inbound_degree_without_self_loops(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.in_with_loops(false) + n.undirected_with_loops(false))
    }

    pub fn outbound_degree_without_self_loops(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.out_with_loops(false) + n.undirected_with_loops(false))
    }

    pub fn directed_degree_without_self_loops(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.in_with_loops(false) + n.out_with_loops(false))
    }

    pub fn undirected_degree_without_self_loops(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| n.undirected_with_loops(false))
    }

    pub fn degree_without_self_loops(&self, key: &str) -> GraphResult<usize> {
        self.degree_of(key, |n| {
            n.in_with_loops(false) + n.out_with_loops(false) + n.undirected_with_loops(false)
        })
    }
}
