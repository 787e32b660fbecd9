//! In-memory graph storage implementation
//!
//! `Graph` owns every node and edge, the key indexes, the counters and the
//! event listeners. Reads go through the traversal engine
//! ([`crate::traversal`]); writes go through the mutation engine
//! ([`super::mutation`]), which keeps the structural index
//! ([`super::index`]) and the counters in step.
//!
//! Callers must not mutate a graph while iterating it. The borrow checker
//! enforces this: every traversal borrows `&Graph` and every mutation needs
//! `&mut Graph`.

use super::arena::Arena;
use super::edge::EdgeRecord;
use super::error::{GraphError, GraphResult};
use super::event::{EventBus, GraphEvent, ListenerId};
use super::node::NodeRecord;
use super::property::Attributes;
use super::types::{EdgeId, GraphOptions, GraphType, NodeId};
use rustc_hash::FxHashMap;
use std::fmt;

/// In-memory graph store
///
/// Uses slot arenas and hash maps for O(1) lookups:
/// - nodes / edges: slot arenas of records
/// - node_index / edge_index: key -> arena slot
/// - per-node adjacency dictionaries: neighbor slot -> head of the chain of
///   edges linking the two nodes
pub struct Graph {
    pub(crate) options: GraphOptions,

    /// Graph-level attributes
    pub(crate) attributes: Attributes,

    pub(crate) nodes: Arena<NodeRecord>,

    pub(crate) edges: Arena<EdgeRecord>,

    pub(crate) node_index: FxHashMap<String, NodeId>,

    pub(crate) edge_index: FxHashMap<String, EdgeId>,

    pub(crate) directed_size: usize,

    pub(crate) undirected_size: usize,

    pub(crate) directed_self_loops: usize,

    pub(crate) undirected_self_loops: usize,

    /// Per-instance prefix of generated edge keys
    key_prefix: String,

    next_generated_key: u64,

    pub(crate) events: EventBus,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(options: GraphOptions) -> Self {
        let mut key_prefix = uuid::Uuid::new_v4().simple().to_string();
        key_prefix.truncate(8);

        Graph {
            options,
            attributes: Attributes::new(),
            nodes: Arena::with_capacity(1024),
            edges: Arena::with_capacity(4096),
            node_index: FxHashMap::default(),
            edge_index: FxHashMap::default(),
            directed_size: 0,
            undirected_size: 0,
            directed_self_loops: 0,
            undirected_self_loops: 0,
            key_prefix,
            next_generated_key: 0,
            events: EventBus::new(),
        }
    }

    pub fn mixed() -> Self {
        Self::new(GraphOptions::new(GraphType::Mixed))
    }

    pub fn directed() -> Self {
        Self::new(GraphOptions::new(GraphType::Directed))
    }

    pub fn undirected() -> Self {
        Self::new(GraphOptions::new(GraphType::Undirected))
    }

    pub fn multi() -> Self {
        Self::new(GraphOptions::new(GraphType::Mixed).multi(true))
    }

    pub fn multi_directed() -> Self {
        Self::new(GraphOptions::new(GraphType::Directed).multi(true))
    }

    pub fn multi_undirected() -> Self {
        Self::new(GraphOptions::new(GraphType::Undirected).multi(true))
    }

    // ============================================================
    // Configuration and counters
    // ============================================================

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn graph_type(&self) -> GraphType {
        self.options.graph_type
    }

    pub fn is_multi(&self) -> bool {
        self.options.multi
    }

    pub fn allows_self_loops(&self) -> bool {
        self.options.allow_self_loops
    }

    /// Number of nodes
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn size(&self) -> usize {
        self.directed_size + self.undirected_size
    }

    pub fn directed_size(&self) -> usize {
        self.directed_size
    }

    pub fn undirected_size(&self) -> usize {
        self.undirected_size
    }

    pub fn self_loop_count(&self) -> usize {
        self.directed_self_loops + self.undirected_self_loops
    }

    pub fn directed_self_loop_count(&self) -> usize {
        self.directed_self_loops
    }

    pub fn undirected_self_loop_count(&self) -> usize {
        self.undirected_self_loops
    }

    // ============================================================
    // Events
    // ============================================================

    /// Register a listener called synchronously for every mutation
    pub fn on<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GraphEvent<'_>) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Unregister a listener. Returns whether it was registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn remove_all_listeners(&mut self) {
        self.events.clear();
    }

    // ============================================================
    // Key resolution
    // ============================================================

    pub fn has_node(&self, key: &str) -> bool {
        self.node_index.contains_key(key)
    }

    pub fn has_edge(&self, key: &str) -> bool {
        self.edge_index.contains_key(key)
    }

    pub(crate) fn node_id(&self, key: &str) -> GraphResult<NodeId> {
        self.node_index
            .get(key)
            .copied()
            .ok_or_else(|| GraphError::node_not_found(key))
    }

    pub(crate) fn edge_id(&self, key: &str) -> GraphResult<EdgeId> {
        self.edge_index
            .get(key)
            .copied()
            .ok_or_else(|| GraphError::edge_not_found(key))
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeRecord {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeRecord {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn edge(&self, id: EdgeId) -> &EdgeRecord {
        &self.edges[id.index()]
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut EdgeRecord {
        &mut self.edges[id.index()]
    }

    pub(crate) fn node_key(&self, id: NodeId) -> &str {
        &self.node(id).key
    }

    pub(crate) fn generate_edge_key(&mut self) -> String {
        loop {
            let key = format!("geid_{}_{}", self.key_prefix, self.next_generated_key);
            self.next_generated_key += 1;
            if !self.edge_index.contains_key(&key) {
                return key;
            }
        }
    }

    /// Resolve the directedness an edge operation asks for against the
    /// graph type. `Mixed` picks the graph's default.
    pub(crate) fn resolve_undirected(&self, edge_type: GraphType, op: &str) -> GraphResult<bool> {
        match (edge_type, self.graph_type()) {
            (GraphType::Mixed, graph_type) => Ok(graph_type == GraphType::Undirected),
            (GraphType::Directed, GraphType::Undirected) => Err(GraphError::Usage(format!(
                "{}: you cannot use a directed edge with an undirected graph",
                op
            ))),
            (GraphType::Undirected, GraphType::Directed) => Err(GraphError::Usage(format!(
                "{}: you cannot use an undirected edge with a directed graph",
                op
            ))),
            (GraphType::Directed, _) => Ok(false),
            (GraphType::Undirected, _) => Ok(true),
        }
    }

    // ============================================================
    // Edge lookups
    // ============================================================

    /// Head of the chain of edges of the requested type going from `source`
    /// to `target`. For `Mixed`, a directed match wins over an undirected
    /// one.
    pub(crate) fn find_edge_head(
        &self,
        edge_type: GraphType,
        source: NodeId,
        target: NodeId,
    ) -> Option<EdgeId> {
        let data = &self.node(source).data;
        let directed = || data.out_map().and_then(|m| m.get(&target)).copied();
        let undirected = || data.undirected_map().and_then(|m| m.get(&target)).copied();
        match edge_type {
            GraphType::Directed => directed(),
            GraphType::Undirected => undirected(),
            GraphType::Mixed => directed().or_else(undirected),
        }
    }

    /// Every edge of the requested type going from `source` to `target`,
    /// chain by chain.
    pub(crate) fn matching_edges(
        &self,
        edge_type: GraphType,
        source: NodeId,
        target: NodeId,
    ) -> Vec<EdgeId> {
        let data = &self.node(source).data;
        let mut heads = Vec::with_capacity(2);
        if edge_type != GraphType::Undirected {
            heads.extend(data.out_map().and_then(|m| m.get(&target)).copied());
        }
        if edge_type != GraphType::Directed {
            heads.extend(data.undirected_map().and_then(|m| m.get(&target)).copied());
        }

        let mut found = Vec::new();
        for head in heads {
            let mut current = Some(head);
            while let Some(id) = current {
                found.push(id);
                current = self.edge(id).next;
            }
        }
        found
    }

    /// Whether an edge of the requested type goes from `source` to `target`.
    /// Missing nodes simply yield `false`.
    pub fn has_edge_between(&self, edge_type: GraphType, source: &str, target: &str) -> bool {
        match (self.node_index.get(source), self.node_index.get(target)) {
            (Some(&s), Some(&t)) => self.find_edge_head(edge_type, s, t).is_some(),
            _ => false,
        }
    }

    pub fn has_directed_edge_between(&self, source: &str, target: &str) -> bool {
        self.has_edge_between(GraphType::Directed, source, target)
    }

    pub fn has_undirected_edge_between(&self, source: &str, target: &str) -> bool {
        self.has_edge_between(GraphType::Undirected, source, target)
    }

    /// Key of the edge of the requested type from `source` to `target`.
    /// On multi graphs this is the head of the chain, i.e. the most recently
    /// added parallel edge.
    pub fn edge_between(
        &self,
        edge_type: GraphType,
        source: &str,
        target: &str,
    ) -> GraphResult<Option<&str>> {
        let s = self.node_id(source)?;
        let t = self.node_id(target)?;
        Ok(self
            .find_edge_head(edge_type, s, t)
            .map(|id| self.edge(id).key.as_str()))
    }

    /// Keys of every edge of the requested type from `source` to `target`
    pub fn edges_between(
        &self,
        edge_type: GraphType,
        source: &str,
        target: &str,
    ) -> GraphResult<Vec<&str>> {
        let s = self.node_id(source)?;
        let t = self.node_id(target)?;
        Ok(self
            .matching_edges(edge_type, s, t)
            .into_iter()
            .map(|id| self.edge(id).key.as_str())
            .collect())
    }

    // ============================================================
    // Edge metadata
    // ============================================================

    pub fn source(&self, edge: &str) -> GraphResult<&str> {
        let e = self.edge(self.edge_id(edge)?);
        Ok(self.node_key(e.source))
    }

    pub fn target(&self, edge: &str) -> GraphResult<&str> {
        let e = self.edge(self.edge_id(edge)?);
        Ok(self.node_key(e.target))
    }

    pub fn extremities(&self, edge: &str) -> GraphResult<(&str, &str)> {
        let e = self.edge(self.edge_id(edge)?);
        Ok((self.node_key(e.source), self.node_key(e.target)))
    }

    /// The endpoint of `edge` that is not `node`
    pub fn opposite(&self, node: &str, edge: &str) -> GraphResult<&str> {
        let n = self.node_id(node)?;
        let e = self.edge(self.edge_id(edge)?);
        e.opposite(n).map(|id| self.node_key(id)).ok_or_else(|| {
            GraphError::NotFound(format!("node \"{}\" is not an extremity of edge \"{}\"", node, edge))
        })
    }

    pub fn has_extremity(&self, edge: &str, node: &str) -> GraphResult<bool> {
        let e = self.edge(self.edge_id(edge)?);
        Ok(self
            .node_index
            .get(node)
            .is_some_and(|&n| e.has_extremity(n)))
    }

    pub fn is_undirected(&self, edge: &str) -> GraphResult<bool> {
        Ok(self.edge(self.edge_id(edge)?).undirected)
    }

    pub fn is_directed(&self, edge: &str) -> GraphResult<bool> {
        Ok(!self.edge(self.edge_id(edge)?).undirected)
    }

    pub fn is_self_loop(&self, edge: &str) -> GraphResult<bool> {
        Ok(self.edge(self.edge_id(edge)?).is_self_loop())
    }

    pub fn was_key_generated(&self, edge: &str) -> GraphResult<bool> {
        Ok(self.edge(self.edge_id(edge)?).generated_key)
    }

    // ============================================================
    // Copies
    // ============================================================

    /// Structural copy with attributes, without listeners
    pub fn copy(&self) -> Graph {
        let mut copy = self.null_copy();
        copy.attributes = self.attributes.clone();
        copy.nodes = self.nodes.clone();
        copy.edges = self.edges.clone();
        copy.node_index = self.node_index.clone();
        copy.edge_index = self.edge_index.clone();
        copy.directed_size = self.directed_size;
        copy.undirected_size = self.undirected_size;
        copy.directed_self_loops = self.directed_self_loops;
        copy.undirected_self_loops = self.undirected_self_loops;
        copy.next_generated_key = self.next_generated_key;
        copy
    }

    /// Copy of the nodes and graph attributes, without any edge
    pub fn empty_copy(&self) -> Graph {
        let mut copy = self.null_copy();
        copy.attributes = self.attributes.clone();
        copy.nodes = self.nodes.clone();
        copy.node_index = self.node_index.clone();
        for (_, node) in copy.nodes.iter_mut() {
            node.data.clear();
        }
        copy
    }

    /// Empty graph with the same options
    pub fn null_copy(&self) -> Graph {
        Graph::new(self.options)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("type", &self.graph_type())
            .field("multi", &self.is_multi())
            .field("allow_self_loops", &self.allows_self_loops())
            .field("order", &self.order())
            .field("size", &self.size())
            .field("listeners", &self.events)
            .finish()
    }
}
