//! Mutation engine: add / merge / update / drop for nodes and edges
//!
//! Every operation validates first and mutates second, so a failed call
//! leaves the graph untouched. Counters are maintained incrementally here
//! and nowhere else.

use super::error::{GraphError, GraphResult};
use super::event::{AttributeUpdate, GraphEvent};
use super::edge::EdgeRecord;
use super::node::NodeRecord;
use super::property::Attributes;
use super::store::Graph;
use super::types::{EdgeId, GraphType, NodeId};
use crate::traversal::{EdgeIds, EdgeRelation};
use tracing::{debug, info, trace};

/// Result of a merge or update of an edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Key of the merged or created edge
    pub key: String,
    pub edge_added: bool,
    pub source_added: bool,
    pub target_added: bool,
}

impl MergeOutcome {
    pub fn as_tuple(&self) -> (&str, bool, bool, bool) {
        (&self.key, self.edge_added, self.source_added, self.target_added)
    }
}

/// How an existing or freshly created edge receives its attributes
enum AttributeChange<F> {
    Merge(Attributes),
    Update(F),
}

type NoUpdater = fn(Attributes) -> Attributes;

impl Graph {
    // ============================================================
    // Nodes
    // ============================================================

    /// Add a node. Fails with `Usage` if the key is taken.
    pub fn add_node(&mut self, key: impl Into<String>, attributes: Attributes) -> GraphResult<String> {
        let key = key.into();
        if self.node_index.contains_key(&key) {
            return Err(GraphError::Usage(format!(
                "add_node: the \"{}\" node already exists in the graph",
                key
            )));
        }
        self.insert_node(key.clone(), attributes);
        Ok(key)
    }

    fn insert_node(&mut self, key: String, attributes: Attributes) -> NodeId {
        let record = NodeRecord::new(key.clone(), attributes, self.graph_type());
        let id = NodeId::from(self.nodes.insert(record));
        self.node_index.insert(key, id);

        let node = &self.nodes[id.index()];
        trace!("Node added: {}", node.key);
        self.events.emit(GraphEvent::NodeAdded {
            key: &node.key,
            attributes: &node.attributes,
        });
        id
    }

    /// Add a node, or shallow-merge `attributes` into the existing one.
    /// Returns the key and whether the node was created.
    pub fn merge_node(&mut self, key: impl Into<String>, attributes: Attributes) -> GraphResult<(String, bool)> {
        let key = key.into();
        match self.node_index.get(&key).copied() {
            Some(id) => {
                let node = &mut self.nodes[id.index()];
                node.attributes.extend(attributes);
                let node = &self.nodes[id.index()];
                self.events.emit(GraphEvent::NodeAttributesUpdated {
                    key: &node.key,
                    kind: AttributeUpdate::Merge,
                    name: None,
                    attributes: &node.attributes,
                });
                Ok((key, false))
            }
            None => {
                self.insert_node(key.clone(), attributes);
                Ok((key, true))
            }
        }
    }

    /// Add a node whose attributes are `updater(empty)`, or replace the
    /// attributes of the existing one with `updater(current)`.
    pub fn update_node<F>(&mut self, key: impl Into<String>, updater: F) -> GraphResult<(String, bool)>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        let key = key.into();
        match self.node_index.get(&key).copied() {
            Some(id) => {
                let node = &mut self.nodes[id.index()];
                let current = std::mem::take(&mut node.attributes);
                node.attributes = updater(current);
                let node = &self.nodes[id.index()];
                self.events.emit(GraphEvent::NodeAttributesUpdated {
                    key: &node.key,
                    kind: AttributeUpdate::Replace,
                    name: None,
                    attributes: &node.attributes,
                });
                Ok((key, false))
            }
            None => {
                self.insert_node(key.clone(), updater(Attributes::new()));
                Ok((key, true))
            }
        }
    }

    /// Drop a node after dropping every edge incident to it.
    pub fn drop_node(&mut self, key: &str) -> GraphResult<()> {
        let id = self.node_id(key)?;

        let incident: Vec<EdgeId> = EdgeIds::for_node(self, EdgeRelation::All, id).collect();
        for edge in incident {
            self.remove_edge(edge);
        }

        if let Some(record) = self.nodes.remove(id.index()) {
            self.node_index.remove(&record.key);
            debug!("Node dropped: {}", record.key);
            self.events.emit(GraphEvent::NodeDropped {
                key: &record.key,
                attributes: &record.attributes,
            });
        }
        Ok(())
    }

    // ============================================================
    // Edge creation
    // ============================================================

    /// Add an edge of the requested type.
    ///
    /// Validation order: type compatibility, self-loop policy, endpoint
    /// existence, key collision, then (simple graphs) pair uniqueness.
    pub fn add_edge_as(
        &mut self,
        edge_type: GraphType,
        key: Option<&str>,
        source: &str,
        target: &str,
        attributes: Attributes,
    ) -> GraphResult<String> {
        let op = "add_edge";
        let undirected = self.resolve_undirected(edge_type, op)?;

        if !self.allows_self_loops() && source == target {
            return Err(GraphError::Usage(format!(
                "{}: source & target are the same (\"{}\"), thus creating a loop explicitly forbidden by this graph",
                op, source
            )));
        }

        let s = self.node_index.get(source).copied().ok_or_else(|| {
            GraphError::NotFound(format!("{}: source node \"{}\" not found", op, source))
        })?;
        let t = self.node_index.get(target).copied().ok_or_else(|| {
            GraphError::NotFound(format!("{}: target node \"{}\" not found", op, target))
        })?;

        if let Some(key) = key {
            if self.edge_index.contains_key(key) {
                return Err(GraphError::Usage(format!(
                    "{}: the \"{}\" edge already exists in the graph",
                    op, key
                )));
            }
        }

        if !self.is_multi() {
            let existing = if undirected {
                self.find_edge_head(GraphType::Undirected, s, t)
            } else {
                self.find_edge_head(GraphType::Directed, s, t)
            };
            if existing.is_some() {
                return Err(GraphError::Usage(format!(
                    "{}: an edge linking \"{}\" to \"{}\" already exists. If you really want to add multiple edges linking those nodes, you should create a multi graph",
                    op, source, target
                )));
            }
        }

        let id = self.insert_edge(key.map(str::to_string), undirected, s, t, attributes);
        Ok(self.edge(id).key.clone())
    }

    /// Allocate, index and count a new edge. Callers have validated it.
    fn insert_edge(
        &mut self,
        key: Option<String>,
        undirected: bool,
        source: NodeId,
        target: NodeId,
        attributes: Attributes,
    ) -> EdgeId {
        let (key, generated) = match key {
            Some(key) => (key, false),
            None => (self.generate_edge_key(), true),
        };

        let record = EdgeRecord::new(key.clone(), generated, undirected, source, target, attributes);
        let id = EdgeId::from(self.edges.insert(record));
        self.edge_index.insert(key, id);

        self.attach(id);
        self.count_edge(source, target, undirected);

        let edge = &self.edges[id.index()];
        let source_key = &self.nodes[source.index()].key;
        let target_key = &self.nodes[target.index()].key;
        trace!("Edge added: {} ({} -> {}, undirected: {})", edge.key, source_key, target_key, undirected);
        self.events.emit(GraphEvent::EdgeAdded {
            key: &edge.key,
            source: source_key,
            target: target_key,
            undirected,
            attributes: &edge.attributes,
        });
        id
    }

    fn count_edge(&mut self, source: NodeId, target: NodeId, undirected: bool) {
        if undirected {
            self.undirected_size += 1;
            if source == target {
                self.undirected_self_loops += 1;
                if let Some(u) = self.node_mut(source).data.undirected_mut() {
                    u.loops += 1;
                }
            } else {
                for node in [source, target] {
                    if let Some(u) = self.node_mut(node).data.undirected_mut() {
                        u.degree += 1;
                    }
                }
            }
        } else {
            self.directed_size += 1;
            if source == target {
                self.directed_self_loops += 1;
                if let Some(d) = self.node_mut(source).data.directed_mut() {
                    d.loops += 1;
                }
            } else {
                if let Some(d) = self.node_mut(source).data.directed_mut() {
                    d.out_degree += 1;
                }
                if let Some(d) = self.node_mut(target).data.directed_mut() {
                    d.in_degree += 1;
                }
            }
        }
    }

    fn uncount_edge(&mut self, source: NodeId, target: NodeId, undirected: bool) {
        if undirected {
            self.undirected_size -= 1;
            if source == target {
                self.undirected_self_loops -= 1;
                if let Some(u) = self.node_mut(source).data.undirected_mut() {
                    u.loops -= 1;
                }
            } else {
                for node in [source, target] {
                    if let Some(u) = self.node_mut(node).data.undirected_mut() {
                        u.degree -= 1;
                    }
                }
            }
        } else {
            self.directed_size -= 1;
            if source == target {
                self.directed_self_loops -= 1;
                if let Some(d) = self.node_mut(source).data.directed_mut() {
                    d.loops -= 1;
                }
            } else {
                if let Some(d) = self.node_mut(source).data.directed_mut() {
                    d.out_degree -= 1;
                }
                if let Some(d) = self.node_mut(target).data.directed_mut() {
                    d.in_degree -= 1;
                }
            }
        }
    }

    pub fn add_edge(&mut self, source: &str, target: &str, attributes: Attributes) -> GraphResult<String> {
        self.add_edge_as(GraphType::Mixed, None, source, target, attributes)
    }

    pub fn add_directed_edge(&mut self, source: &str, target: &str, attributes: Attributes) -> GraphResult<String> {
        self.add_edge_as(GraphType::Directed, None, source, target, attributes)
    }

    pub fn add_undirected_edge(&mut self, source: &str, target: &str, attributes: Attributes) -> GraphResult<String> {
        self.add_edge_as(GraphType::Undirected, None, source, target, attributes)
    }

    pub fn add_edge_with_key(&mut self, key: &str, source: &str, target: &str, attributes: Attributes) -> GraphResult<String> {
        self.add_edge_as(GraphType::Mixed, Some(key), source, target, attributes)
    }

    pub fn add_directed_edge_with_key(&mut self, key: &str, source: &str, target: &str, attributes: Attributes) -> GraphResult<String> {
        self.add_edge_as(GraphType::Directed, Some(key), source, target, attributes)
    }

    pub fn add_undirected_edge_with_key(&mut self, key: &str, source: &str, target: &str, attributes: Attributes) -> GraphResult<String> {
        self.add_edge_as(GraphType::Undirected, Some(key), source, target, attributes)
    }

    // ============================================================
    // Edge merge / update
    // ============================================================

    fn merge_edge_impl<F>(
        &mut self,
        op: &str,
        edge_type: GraphType,
        key: Option<&str>,
        source: &str,
        target: &str,
        change: AttributeChange<F>,
    ) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        let undirected = self.resolve_undirected(edge_type, op)?;

        if !self.allows_self_loops() && source == target {
            return Err(GraphError::Usage(format!(
                "{}: source & target are the same (\"{}\"), thus creating a loop explicitly forbidden by this graph",
                op, source
            )));
        }

        let s = self.node_index.get(source).copied();
        let t = self.node_index.get(target).copied();

        let mut existing = None;
        if let Some(key) = key {
            if let Some(&id) = self.edge_index.get(key) {
                let edge = self.edge(id);
                let same_way = s == Some(edge.source) && t == Some(edge.target);
                let reversed = undirected && s == Some(edge.target) && t == Some(edge.source);
                if edge.undirected != undirected || !(same_way || reversed) {
                    return Err(GraphError::Usage(format!(
                        "{}: inconsistency detected when attempting to merge the \"{}\" edge with \"{}\" source & \"{}\" target vs. (\"{}\", \"{}\")",
                        op,
                        key,
                        self.node_key(edge.source),
                        self.node_key(edge.target),
                        source,
                        target
                    )));
                }
                existing = Some(id);
            }
        }

        if existing.is_none() && !self.is_multi() {
            if let (Some(s), Some(t)) = (s, t) {
                let wanted = if undirected { GraphType::Undirected } else { GraphType::Directed };
                existing = self.find_edge_head(wanted, s, t);
            }
        }

        if let Some(id) = existing {
            let kind = match change {
                AttributeChange::Merge(attributes) => {
                    self.edge_mut(id).attributes.extend(attributes);
                    AttributeUpdate::Merge
                }
                AttributeChange::Update(updater) => {
                    let edge = self.edge_mut(id);
                    let current = std::mem::take(&mut edge.attributes);
                    edge.attributes = updater(current);
                    AttributeUpdate::Replace
                }
            };
            let edge = &self.edges[id.index()];
            self.events.emit(GraphEvent::EdgeAttributesUpdated {
                key: &edge.key,
                kind,
                name: None,
                attributes: &edge.attributes,
            });
            return Ok(MergeOutcome {
                key: edge.key.clone(),
                edge_added: false,
                source_added: false,
                target_added: false,
            });
        }

        let (s, source_added) = match s {
            Some(s) => (s, false),
            None => (self.insert_node(source.to_string(), Attributes::new()), true),
        };
        let (t, target_added) = match t {
            Some(t) => (t, false),
            None if source == target => (s, false),
            None => (self.insert_node(target.to_string(), Attributes::new()), true),
        };

        let attributes = match change {
            AttributeChange::Merge(attributes) => attributes,
            AttributeChange::Update(updater) => updater(Attributes::new()),
        };
        let id = self.insert_edge(key.map(str::to_string), undirected, s, t, attributes);

        Ok(MergeOutcome {
            key: self.edge(id).key.clone(),
            edge_added: true,
            source_added,
            target_added,
        })
    }

    /// Add an edge, or shallow-merge `attributes` into the matching one.
    ///
    /// A match is the edge with the given key or, on simple graphs, the edge
    /// already linking the pair. Missing endpoints are created.
    pub fn merge_edge_as(
        &mut self,
        edge_type: GraphType,
        key: Option<&str>,
        source: &str,
        target: &str,
        attributes: Attributes,
    ) -> GraphResult<MergeOutcome> {
        self.merge_edge_impl::<NoUpdater>(
            "merge_edge",
            edge_type,
            key,
            source,
            target,
            AttributeChange::Merge(attributes),
        )
    }

    /// Like [`Graph::merge_edge_as`], but the attributes become
    /// `updater(current)`, or `updater(empty)` for a new edge.
    pub fn update_edge_as<F>(
        &mut self,
        edge_type: GraphType,
        key: Option<&str>,
        source: &str,
        target: &str,
        updater: F,
    ) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        self.merge_edge_impl(
            "update_edge",
            edge_type,
            key,
            source,
            target,
            AttributeChange::Update(updater),
        )
    }

    pub fn merge_edge(&mut self, source: &str, target: &str, attributes: Attributes) -> GraphResult<MergeOutcome> {
        self.merge_edge_as(GraphType::Mixed, None, source, target, attributes)
    }

    pub fn merge_directed_edge(&mut self, source: &str, target: &str, attributes: Attributes) -> GraphResult<MergeOutcome> {
        self.merge_edge_as(GraphType::Directed, None, source, target, attributes)
    }

    pub fn merge_undirected_edge(&mut self, source: &str, target: &str, attributes: Attributes) -> GraphResult<MergeOutcome> {
        self.merge_edge_as(GraphType::Undirected, None, source, target, attributes)
    }

    pub fn merge_edge_with_key(&mut self, key: &str, source: &str, target: &str, attributes: Attributes) -> GraphResult<MergeOutcome> {
        self.merge_edge_as(GraphType::Mixed, Some(key), source, target, attributes)
    }

    pub fn merge_directed_edge_with_key(&mut self, key: &str, source: &str, target: &str, attributes: Attributes) -> GraphResult<MergeOutcome> {
        self.merge_edge_as(GraphType::Directed, Some(key), source, target, attributes)
    }

    pub fn merge_undirected_edge_with_key(&mut self, key: &str, source: &str, target: &str, attributes: Attributes) -> GraphResult<MergeOutcome> {
        self.merge_edge_as(GraphType::Undirected, Some(key), source, target, attributes)
    }

    pub fn update_edge<F>(&mut self, source: &str, target: &str, updater: F) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        self.update_edge_as(GraphType::Mixed, None, source, target, updater)
    }

    pub fn update_directed_edge<F>(&mut self, source: &str, target: &str, updater: F) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        self.update_edge_as(GraphType::Directed, None, source, target, updater)
    }

    pub fn update_undirected_edge<F>(&mut self, source: &str, target: &str, updater: F) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        self.update_edge_as(GraphType::Undirected, None, source, target, updater)
    }

    pub fn update_edge_with_key<F>(&mut self, key: &str, source: &str, target: &str, updater: F) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        self.update_edge_as(GraphType::Mixed, Some(key), source, target, updater)
    }

    pub fn update_directed_edge_with_key<F>(&mut self, key: &str, source: &str, target: &str, updater: F) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        self.update_edge_as(GraphType::Directed, Some(key), source, target, updater)
    }

    pub fn update_undirected_edge_with_key<F>(&mut self, key: &str, source: &str, target: &str, updater: F) -> GraphResult<MergeOutcome>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        self.update_edge_as(GraphType::Undirected, Some(key), source, target, updater)
    }

    // ============================================================
    // Edge removal
    // ============================================================

    /// Drop the edge with the given key
    pub fn drop_edge(&mut self, key: &str) -> GraphResult<()> {
        let id = self.edge_id(key)?;
        self.remove_edge(id);
        Ok(())
    }

    /// Drop the edge of the requested type going from `source` to `target`.
    ///
    /// On multi graphs the pair must identify a single edge, otherwise the
    /// call is a `Usage` error and the caller has to drop by key.
    pub fn drop_edge_between(&mut self, edge_type: GraphType, source: &str, target: &str) -> GraphResult<()> {
        if !edge_type.fits(self.graph_type()) {
            return Err(GraphError::Usage(format!(
                "drop_edge_between: cannot drop a {} edge from a {} graph",
                edge_type,
                self.graph_type()
            )));
        }
        let s = self.node_id(source)?;
        let t = self.node_id(target)?;

        let id = if self.is_multi() {
            let matching = self.matching_edges(edge_type, s, t);
            if matching.len() > 1 {
                return Err(GraphError::Usage(format!(
                    "drop_edge_between: {} edges link \"{}\" to \"{}\" in this multi graph, drop one by key instead",
                    matching.len(),
                    source,
                    target
                )));
            }
            matching.first().copied()
        } else {
            self.find_edge_head(edge_type, s, t)
        };

        let id = id.ok_or_else(|| {
            GraphError::NotFound(format!(
                "drop_edge_between: could not find an edge from \"{}\" to \"{}\" in the graph",
                source, target
            ))
        })?;
        self.remove_edge(id);
        Ok(())
    }

    pub fn drop_directed_edge(&mut self, source: &str, target: &str) -> GraphResult<()> {
        self.drop_edge_between(GraphType::Directed, source, target)
    }

    pub fn drop_undirected_edge(&mut self, source: &str, target: &str) -> GraphResult<()> {
        self.drop_edge_between(GraphType::Undirected, source, target)
    }

    /// Detach, uncount and free an edge
    fn remove_edge(&mut self, id: EdgeId) {
        self.detach(id);
        let (source, target, undirected) = {
            let edge = self.edge(id);
            (edge.source, edge.target, edge.undirected)
        };
        self.uncount_edge(source, target, undirected);

        if let Some(record) = self.edges.remove(id.index()) {
            self.edge_index.remove(&record.key);
            let source_key = &self.nodes[source.index()].key;
            let target_key = &self.nodes[target.index()].key;
            trace!("Edge dropped: {}", record.key);
            self.events.emit(GraphEvent::EdgeDropped {
                key: &record.key,
                source: source_key,
                target: target_key,
                undirected,
                attributes: &record.attributes,
            });
        }
    }

    // ============================================================
    // Bulk operations
    // ============================================================

    /// Drop every node and edge. Graph attributes are kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.edge_index.clear();
        self.reset_edge_counters();
        debug!("Graph cleared");
        self.events.emit(GraphEvent::Cleared);
    }

    /// Drop every edge, keeping the nodes.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        self.edge_index.clear();
        self.clear_index();
        self.reset_edge_counters();
        debug!("Graph edges cleared");
        self.events.emit(GraphEvent::EdgesCleared);
    }

    fn reset_edge_counters(&mut self) {
        self.directed_size = 0;
        self.undirected_size = 0;
        self.directed_self_loops = 0;
        self.undirected_self_loops = 0;
    }

    // ============================================================
    // Graph transitions
    // ============================================================

    /// Turn a directed or undirected graph into a mixed one. Irreversible.
    pub fn upgrade_to_mixed(&mut self) {
        if self.graph_type() == GraphType::Mixed {
            return;
        }
        for (_, node) in self.nodes.iter_mut() {
            node.data.upgrade_to_mixed();
        }
        info!("Upgrading {} graph to mixed", self.options.graph_type);
        self.options.graph_type = GraphType::Mixed;
    }

    /// Allow parallel edges from now on. Irreversible; existing slots are
    /// already valid one-member chains.
    pub fn upgrade_to_multi(&mut self) {
        if self.is_multi() {
            return;
        }
        info!("Upgrading graph to multi");
        self.options.multi = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::graph::error::ErrorKind;
    use crate::graph::property::PropertyValue;
    use std::sync::{Arc, Mutex};

    fn graph_with(graph: Graph, nodes: &[&str]) -> Graph {
        let mut graph = graph;
        for node in nodes {
            graph.add_node(*node, attrs! {}).unwrap();
        }
        graph
    }

    #[test]
    fn test_add_node() {
        let mut graph = Graph::mixed();
        assert_eq!(graph.add_node("a", attrs! { "x" => 1 }).unwrap(), "a");
        assert_eq!(graph.order(), 1);
        assert!(graph.has_node("a"));

        let err = graph.add_node("a", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(graph.order(), 1);
    }

    #[test]
    fn test_merge_node() {
        let mut graph = Graph::mixed();
        let (key, added) = graph.merge_node("a", attrs! { "x" => 1 }).unwrap();
        assert_eq!(key, "a");
        assert!(added);

        let (_, added) = graph.merge_node("a", attrs! { "y" => 2 }).unwrap();
        assert!(!added);
        let attributes = graph.get_node_attributes("a").unwrap();
        assert_eq!(attributes, &attrs! { "x" => 1, "y" => 2 });
    }

    #[test]
    fn test_update_node() {
        let mut graph = Graph::mixed();
        let (_, added) = graph
            .update_node("a", |mut attr| {
                attr.insert("count".into(), PropertyValue::Integer(1));
                attr
            })
            .unwrap();
        assert!(added);

        let (_, added) = graph
            .update_node("a", |mut attr| {
                let next = attr.get("count").and_then(|v| v.as_integer()).unwrap_or(0) + 1;
                attr.insert("count".into(), PropertyValue::Integer(next));
                attr
            })
            .unwrap();
        assert!(!added);
        assert_eq!(
            graph.get_node_attributes("a").unwrap().get("count"),
            Some(&PropertyValue::Integer(2))
        );
    }

    #[test]
    fn test_add_edge_counts() {
        let mut graph = graph_with(Graph::mixed(), &["a", "b"]);
        graph.add_directed_edge("a", "b", attrs! {}).unwrap();
        graph.add_undirected_edge("a", "b", attrs! {}).unwrap();

        assert_eq!(graph.size(), 2);
        assert_eq!(graph.directed_size(), 1);
        assert_eq!(graph.undirected_size(), 1);
        assert_eq!(graph.out_degree("a").unwrap(), 1);
        assert_eq!(graph.in_degree("b").unwrap(), 1);
        assert_eq!(graph.undirected_degree("a").unwrap(), 1);
        assert_eq!(graph.undirected_degree("b").unwrap(), 1);
    }

    #[test]
    fn test_add_edge_type_enforcement() {
        let mut graph = graph_with(Graph::undirected(), &["a", "b"]);
        let err = graph.add_directed_edge("a", "b", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(graph.size(), 0);

        let mut graph = graph_with(Graph::directed(), &["a", "b"]);
        let err = graph.add_undirected_edge("a", "b", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let key = graph.add_edge("a", "b", attrs! {}).unwrap();
        assert!(graph.is_directed(&key).unwrap());
    }

    #[test]
    fn test_add_edge_validation_order() {
        let mut graph = Graph::new(crate::GraphOptions::default().allow_self_loops(false));
        graph.add_node("a", attrs! {}).unwrap();

        // Self-loop policy is checked before node existence
        let err = graph.add_edge("zzz", "zzz", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err = graph.add_edge("a", "missing", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        graph.add_node("b", attrs! {}).unwrap();
        graph.add_edge_with_key("ab", "a", "b", attrs! {}).unwrap();

        // Endpoint existence is checked before key collision
        let err = graph.add_edge_with_key("ab", "a", "missing", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = graph.add_edge_with_key("ab", "b", "a", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err = graph.add_edge("a", "b", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn test_simple_graph_allows_both_directions() {
        let mut graph = graph_with(Graph::directed(), &["a", "b"]);
        graph.add_edge("a", "b", attrs! {}).unwrap();
        graph.add_edge("b", "a", attrs! {}).unwrap();
        assert_eq!(graph.size(), 2);

        let mut graph = graph_with(Graph::undirected(), &["a", "b"]);
        graph.add_edge("a", "b", attrs! {}).unwrap();
        let err = graph.add_edge("b", "a", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_self_loop_counters() {
        let mut graph = graph_with(Graph::mixed(), &["a"]);
        graph.add_directed_edge_with_key("d", "a", "a", attrs! {}).unwrap();
        graph.add_undirected_edge_with_key("u", "a", "a", attrs! {}).unwrap();

        assert_eq!(graph.directed_self_loop_count(), 1);
        assert_eq!(graph.undirected_self_loop_count(), 1);
        assert_eq!(graph.self_loop_count(), 2);
        assert_eq!(graph.undirected_degree("a").unwrap(), 2);
        assert_eq!(graph.in_degree("a").unwrap(), 1);
        assert_eq!(graph.out_degree("a").unwrap(), 1);
        assert_eq!(graph.degree("a").unwrap(), 4);

        graph.drop_edge("u").unwrap();
        graph.drop_edge("d").unwrap();
        assert_eq!(graph.self_loop_count(), 0);
        assert_eq!(graph.degree("a").unwrap(), 0);
    }

    #[test]
    fn test_merge_edge_is_idempotent() {
        let mut graph = Graph::mixed();
        let first = graph.merge_edge("a", "b", attrs! { "x" => 1 }).unwrap();
        assert!(first.edge_added);
        assert!(first.source_added);
        assert!(first.target_added);

        let second = graph.merge_edge("a", "b", attrs! { "y" => 2 }).unwrap();
        assert_eq!(second.as_tuple(), (first.key.as_str(), false, false, false));
        assert_eq!(graph.size(), 1);
        assert_eq!(
            graph.get_edge_attributes(&first.key).unwrap(),
            &attrs! { "x" => 1, "y" => 2 }
        );
    }

    #[test]
    fn test_merge_edge_self_loop_creates_one_node() {
        let mut graph = Graph::mixed();
        let outcome = graph.merge_edge("a", "a", attrs! {}).unwrap();
        assert!(outcome.edge_added);
        assert!(outcome.source_added);
        assert!(!outcome.target_added);
        assert_eq!(graph.order(), 1);
    }

    #[test]
    fn test_merge_edge_with_key_inconsistency() {
        let mut graph = graph_with(Graph::mixed(), &["a", "b", "c"]);
        graph.add_edge_with_key("e", "a", "b", attrs! {}).unwrap();

        let err = graph.merge_edge_with_key("e", "a", "c", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err = graph.merge_undirected_edge_with_key("e", "a", "b", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let outcome = graph.merge_edge_with_key("e", "a", "b", attrs! { "w" => 3 }).unwrap();
        assert!(!outcome.edge_added);
        assert_eq!(graph.order(), 3);
    }

    #[test]
    fn test_merge_undirected_edge_matches_reversed_pair() {
        let mut graph = Graph::undirected();
        graph.merge_edge_with_key("e", "a", "b", attrs! {}).unwrap();
        let outcome = graph.merge_edge_with_key("e", "b", "a", attrs! { "z" => 1 }).unwrap();
        assert!(!outcome.edge_added);

        let outcome = graph.merge_edge("b", "a", attrs! {}).unwrap();
        assert_eq!(outcome.key, "e");
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn test_merge_edge_multi_always_creates() {
        let mut graph = Graph::multi_directed();
        graph.merge_edge("a", "b", attrs! {}).unwrap();
        let outcome = graph.merge_edge("a", "b", attrs! {}).unwrap();
        assert!(outcome.edge_added);
        assert!(!outcome.source_added);
        assert_eq!(graph.size(), 2);
    }

    #[test]
    fn test_update_edge() {
        let mut graph = Graph::directed();
        let created = graph
            .update_edge("a", "b", |mut attr| {
                attr.insert("weight".into(), 1.into());
                attr
            })
            .unwrap();
        assert!(created.edge_added);

        let updated = graph
            .update_edge("a", "b", |attr| {
                let weight = attr.get("weight").and_then(|w| w.as_integer()).unwrap_or(0);
                attrs! { "weight" => weight * 10 }
            })
            .unwrap();
        assert!(!updated.edge_added);
        assert_eq!(
            graph.get_edge_attribute(&created.key, "weight").unwrap(),
            Some(&PropertyValue::Integer(10))
        );
    }

    #[test]
    fn test_merge_failure_does_not_create_nodes() {
        let mut graph = Graph::directed();
        let err = graph.merge_undirected_edge("a", "b", attrs! {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(graph.order(), 0);
    }

    #[test]
    fn test_drop_edge() {
        let mut graph = graph_with(Graph::mixed(), &["a", "b"]);
        let key = graph.add_edge("a", "b", attrs! {}).unwrap();
        graph.drop_edge(&key).unwrap();

        assert_eq!(graph.size(), 0);
        assert_eq!(graph.out_degree("a").unwrap(), 0);
        assert!(!graph.has_edge(&key));
        assert_eq!(graph.drop_edge(&key).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_drop_edge_between() {
        let mut graph = graph_with(Graph::mixed(), &["a", "b"]);
        graph.add_directed_edge("a", "b", attrs! {}).unwrap();
        graph.add_undirected_edge("a", "b", attrs! {}).unwrap();

        graph.drop_directed_edge("a", "b").unwrap();
        assert_eq!(graph.directed_size(), 0);
        assert_eq!(
            graph.drop_directed_edge("a", "b").unwrap_err().kind(),
            ErrorKind::NotFound
        );

        graph.drop_undirected_edge("b", "a").unwrap();
        assert_eq!(graph.size(), 0);
        assert_eq!(
            graph.drop_undirected_edge("a", "zzz").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_drop_edge_between_type_mismatch() {
        let mut graph = graph_with(Graph::undirected(), &["a", "b"]);
        graph.add_edge("a", "b", attrs! {}).unwrap();
        let err = graph.drop_directed_edge("a", "b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn test_drop_edge_between_ambiguous_on_multi() {
        let mut graph = graph_with(Graph::multi_directed(), &["a", "b"]);
        graph.add_edge("a", "b", attrs! {}).unwrap();
        graph.drop_edge_between(GraphType::Directed, "a", "b").unwrap();

        graph.add_edge("a", "b", attrs! {}).unwrap();
        graph.add_edge("a", "b", attrs! {}).unwrap();
        let err = graph.drop_edge_between(GraphType::Mixed, "a", "b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(graph.size(), 2);
    }

    #[test]
    fn test_drop_node_cascades() {
        let mut graph = graph_with(Graph::mixed(), &["a", "b", "c"]);
        graph.add_directed_edge("a", "b", attrs! {}).unwrap();
        graph.add_directed_edge("c", "a", attrs! {}).unwrap();
        graph.add_undirected_edge("a", "c", attrs! {}).unwrap();
        graph.add_directed_edge("a", "a", attrs! {}).unwrap();
        graph.add_undirected_edge("a", "a", attrs! {}).unwrap();
        graph.add_directed_edge("b", "c", attrs! {}).unwrap();

        graph.drop_node("a").unwrap();

        assert_eq!(graph.order(), 2);
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.self_loop_count(), 0);
        assert_eq!(graph.in_degree("b").unwrap(), 0);
        assert_eq!(graph.out_degree("b").unwrap(), 1);
        assert_eq!(graph.in_degree("c").unwrap(), 1);
        assert_eq!(graph.out_degree("c").unwrap(), 0);
        assert_eq!(graph.undirected_degree("c").unwrap(), 0);
        assert_eq!(graph.drop_node("a").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_drop_node_event_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut graph = graph_with(Graph::directed(), &["a", "b"]);
        graph.add_edge_with_key("ab", "a", "b", attrs! {}).unwrap();

        let sink = Arc::clone(&log);
        graph.on(move |event| {
            let entry = match event {
                GraphEvent::EdgeDropped { key, .. } => format!("edgeDropped:{}", key),
                GraphEvent::NodeDropped { key, .. } => format!("nodeDropped:{}", key),
                other => other.name().to_string(),
            };
            sink.lock().unwrap().push(entry);
        });

        graph.drop_node("a").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["edgeDropped:ab", "nodeDropped:a"]);
    }

    #[test]
    fn test_clear_and_clear_edges() {
        let mut graph = graph_with(Graph::mixed(), &["a", "b"]);
        graph.set_graph_attribute("name", "g").unwrap();
        graph.add_directed_edge("a", "b", attrs! {}).unwrap();
        graph.add_undirected_edge("a", "a", attrs! {}).unwrap();

        graph.clear_edges();
        assert_eq!(graph.order(), 2);
        assert_eq!(graph.size(), 0);
        assert_eq!(graph.self_loop_count(), 0);
        assert_eq!(graph.degree("a").unwrap(), 0);
        graph.add_directed_edge("a", "b", attrs! {}).unwrap();

        graph.clear();
        assert_eq!(graph.order(), 0);
        assert_eq!(graph.size(), 0);
        assert!(graph.has_graph_attribute("name"));
    }

    #[test]
    fn test_upgrade_to_mixed() {
        let mut graph = graph_with(Graph::directed(), &["a", "b"]);
        graph.add_edge("a", "b", attrs! {}).unwrap();
        assert!(graph.add_undirected_edge("a", "b", attrs! {}).is_err());

        graph.upgrade_to_mixed();
        assert_eq!(graph.graph_type(), GraphType::Mixed);
        graph.add_undirected_edge("a", "b", attrs! {}).unwrap();
        assert_eq!(graph.out_degree("a").unwrap(), 1);
        assert_eq!(graph.undirected_degree("a").unwrap(), 1);
    }

    #[test]
    fn test_events_emitted_in_mutation_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut graph = Graph::mixed();
        let sink = Arc::clone(&log);
        graph.on(move |event| sink.lock().unwrap().push(event.name().to_string()));

        graph.merge_edge("a", "b", attrs! {}).unwrap();
        graph.merge_edge("a", "b", attrs! { "x" => 1 }).unwrap();
        graph.clear_edges();
        graph.clear();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "nodeAdded",
                "nodeAdded",
                "edgeAdded",
                "edgeAttributesUpdated",
                "edgesCleared",
                "cleared"
            ]
        );
    }
}
