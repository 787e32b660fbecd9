//! Attribute records of the graph, its nodes and its edges
//!
//! The structural core never looks inside an attribute record. This module
//! is the only place reading or writing them after creation, and every write
//! is reported through the event bus.

use super::error::{GraphError, GraphResult};
use super::event::{AttributeUpdate, GraphEvent, UpdateHints};
use super::property::{Attributes, PropertyValue};
use super::store::Graph;
use super::types::{EdgeId, GraphType, NodeId};
use tracing::trace;

/// Addresses an edge either by key or by its extremities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRef<'a> {
    Key(&'a str),
    /// The edge of `graph_type` from `source` to `target`. Rejected on
    /// multi graphs, where it is ambiguous.
    Between {
        graph_type: GraphType,
        source: &'a str,
        target: &'a str,
    },
}

/// Which attribute record an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget<'a> {
    Graph,
    Node(&'a str),
    Edge(EdgeRef<'a>),
}

impl<'a> AttributeTarget<'a> {
    pub fn edge(key: &'a str) -> Self {
        AttributeTarget::Edge(EdgeRef::Key(key))
    }

    pub fn edge_between(graph_type: GraphType, source: &'a str, target: &'a str) -> Self {
        AttributeTarget::Edge(EdgeRef::Between {
            graph_type,
            source,
            target,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Record {
    Graph,
    Node(NodeId),
    Edge(EdgeId),
}

impl Graph {
    fn resolve(&self, target: AttributeTarget<'_>, op: &str) -> GraphResult<Record> {
        match target {
            AttributeTarget::Graph => Ok(Record::Graph),
            AttributeTarget::Node(key) => self.node_id(key).map(Record::Node),
            AttributeTarget::Edge(EdgeRef::Key(key)) => self.edge_id(key).map(Record::Edge),
            AttributeTarget::Edge(EdgeRef::Between {
                graph_type,
                source,
                target,
            }) => {
                if self.is_multi() {
                    return Err(GraphError::Usage(format!(
                        "{}: cannot address an edge by its extremities on a multi graph",
                        op
                    )));
                }
                let s = self.node_id(source)?;
                let t = self.node_id(target)?;
                self.find_edge_head(graph_type, s, t)
                    .map(Record::Edge)
                    .ok_or_else(|| {
                        GraphError::NotFound(format!(
                            "{}: could not find an edge from \"{}\" to \"{}\"",
                            op, source, target
                        ))
                    })
            }
        }
    }

    fn record(&self, record: Record) -> &Attributes {
        match record {
            Record::Graph => &self.attributes,
            Record::Node(id) => &self.node(id).attributes,
            Record::Edge(id) => &self.edge(id).attributes,
        }
    }

    fn record_mut(&mut self, record: Record) -> &mut Attributes {
        match record {
            Record::Graph => &mut self.attributes,
            Record::Node(id) => &mut self.node_mut(id).attributes,
            Record::Edge(id) => &mut self.edge_mut(id).attributes,
        }
    }

    fn emit_update(&mut self, record: Record, kind: AttributeUpdate, name: Option<&str>) {
        match record {
            Record::Graph => self.events.emit(GraphEvent::GraphAttributesUpdated {
                kind,
                name,
                attributes: &self.attributes,
            }),
            Record::Node(id) => {
                let node = &self.nodes[id.index()];
                self.events.emit(GraphEvent::NodeAttributesUpdated {
                    key: &node.key,
                    kind,
                    name,
                    attributes: &node.attributes,
                });
            }
            Record::Edge(id) => {
                let edge = &self.edges[id.index()];
                self.events.emit(GraphEvent::EdgeAttributesUpdated {
                    key: &edge.key,
                    kind,
                    name,
                    attributes: &edge.attributes,
                });
            }
        }
    }

    // ============================================================
    // Reads
    // ============================================================

    pub fn get_attribute(&self, target: AttributeTarget<'_>, name: &str) -> GraphResult<Option<&PropertyValue>> {
        let record = self.resolve(target, "get_attribute")?;
        Ok(self.record(record).get(name))
    }

    pub fn get_attributes(&self, target: AttributeTarget<'_>) -> GraphResult<&Attributes> {
        let record = self.resolve(target, "get_attributes")?;
        Ok(self.record(record))
    }

    pub fn has_attribute(&self, target: AttributeTarget<'_>, name: &str) -> GraphResult<bool> {
        let record = self.resolve(target, "has_attribute")?;
        Ok(self.record(record).contains_key(name))
    }

    // ============================================================
    // Writes
    // ============================================================

    pub fn set_attribute(
        &mut self,
        target: AttributeTarget<'_>,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let record = self.resolve(target, "set_attribute")?;
        self.record_mut(record).insert(name.to_string(), value.into());
        self.emit_update(record, AttributeUpdate::Set, Some(name));
        Ok(())
    }

    /// Set `name` to `updater(current value)`
    pub fn update_attribute<F>(&mut self, target: AttributeTarget<'_>, name: &str, updater: F) -> GraphResult<()>
    where
        F: FnOnce(Option<&PropertyValue>) -> PropertyValue,
    {
        let record = self.resolve(target, "update_attribute")?;
        let attributes = self.record_mut(record);
        let value = updater(attributes.get(name));
        attributes.insert(name.to_string(), value);
        self.emit_update(record, AttributeUpdate::Set, Some(name));
        Ok(())
    }

    /// Remove `name`, keeping the order of the remaining attributes.
    /// Returns the removed value.
    pub fn remove_attribute(&mut self, target: AttributeTarget<'_>, name: &str) -> GraphResult<Option<PropertyValue>> {
        let record = self.resolve(target, "remove_attribute")?;
        let removed = self.record_mut(record).shift_remove(name);
        self.emit_update(record, AttributeUpdate::Remove, Some(name));
        Ok(removed)
    }

    pub fn replace_attributes(&mut self, target: AttributeTarget<'_>, attributes: Attributes) -> GraphResult<()> {
        let record = self.resolve(target, "replace_attributes")?;
        *self.record_mut(record) = attributes;
        self.emit_update(record, AttributeUpdate::Replace, None);
        Ok(())
    }

    /// Shallow merge: keys of `attributes` overwrite existing ones.
    pub fn merge_attributes(&mut self, target: AttributeTarget<'_>, attributes: Attributes) -> GraphResult<()> {
        let record = self.resolve(target, "merge_attributes")?;
        self.record_mut(record).extend(attributes);
        self.emit_update(record, AttributeUpdate::Merge, None);
        Ok(())
    }

    pub fn update_attributes<F>(&mut self, target: AttributeTarget<'_>, updater: F) -> GraphResult<()>
    where
        F: FnOnce(Attributes) -> Attributes,
    {
        let record = self.resolve(target, "update_attributes")?;
        let attributes = self.record_mut(record);
        let current = std::mem::take(attributes);
        *attributes = updater(current);
        self.emit_update(record, AttributeUpdate::Update, None);
        Ok(())
    }

    // ============================================================
    // Bulk updates
    // ============================================================

    /// Replace the attributes of every node with `updater(key, current)`.
    /// A single `EachNodeAttributesUpdated` event is emitted.
    pub fn update_each_node_attributes<F>(&mut self, mut updater: F, hints: Option<UpdateHints>)
    where
        F: FnMut(&str, Attributes) -> Attributes,
    {
        for (_, node) in self.nodes.iter_mut() {
            let current = std::mem::take(&mut node.attributes);
            node.attributes = updater(&node.key, current);
        }
        trace!("Updated attributes of {} nodes", self.nodes.len());
        self.events.emit(GraphEvent::EachNodeAttributesUpdated {
            hints: hints.as_ref(),
        });
    }

    /// Replace the attributes of every edge with
    /// `updater(key, current, source, target)`.
    pub fn update_each_edge_attributes<F>(&mut self, mut updater: F, hints: Option<UpdateHints>)
    where
        F: FnMut(&str, Attributes, &str, &str) -> Attributes,
    {
        let nodes = &self.nodes;
        for (_, edge) in self.edges.iter_mut() {
            let current = std::mem::take(&mut edge.attributes);
            let source = &nodes[edge.source.index()].key;
            let target = &nodes[edge.target.index()].key;
            edge.attributes = updater(&edge.key, current, source, target);
        }
        trace!("Updated attributes of {} edges", self.edges.len());
        self.events.emit(GraphEvent::EachEdgeAttributesUpdated {
            hints: hints.as_ref(),
        });
    }

    // ============================================================
    // Shortcuts
    // ============================================================

    pub fn get_graph_attribute(&self, name: &str) -> Option<&PropertyValue> {
        self.attributes.get(name)
    }

    pub fn get_graph_attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn has_graph_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_graph_attribute(&mut self, name: &str, value: impl Into<PropertyValue>) -> GraphResult<()> {
        self.set_attribute(AttributeTarget::Graph, name, value)
    }

    pub fn get_node_attribute(&self, key: &str, name: &str) -> GraphResult<Option<&PropertyValue>> {
        self.get_attribute(AttributeTarget::Node(key), name)
    }

    pub fn get_node_attributes(&self, key: &str) -> GraphResult<&Attributes> {
        self.get_attributes(AttributeTarget::Node(key))
    }

    pub fn set_node_attribute(&mut self, key: &str, name: &str, value: impl Into<PropertyValue>) -> GraphResult<()> {
        self.set_attribute(AttributeTarget::Node(key), name, value)
    }

    pub fn get_edge_attribute(&self, key: &str, name: &str) -> GraphResult<Option<&PropertyValue>> {
        self.get_attribute(AttributeTarget::edge(key), name)
    }

    pub fn get_edge_attributes(&self, key: &str) -> GraphResult<&Attributes> {
        self.get_attributes(AttributeTarget::edge(key))
    }

    pub fn set_edge_attribute(&mut self, key: &str, name: &str, value: impl Into<PropertyValue>) -> GraphResult<()> {
        self.set_attribute(AttributeTarget::edge(key), name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::graph::error::ErrorKind;
    use std::sync::{Arc, Mutex};

    fn sample() -> Graph {
        let mut graph = Graph::mixed();
        graph.add_node("a", attrs! { "name" => "Alice" }).unwrap();
        graph.add_node("b", attrs! {}).unwrap();
        graph.add_edge_with_key("ab", "a", "b", attrs! { "weight" => 1 }).unwrap();
        graph
    }

    #[test]
    fn test_get_and_has() {
        let graph = sample();
        assert_eq!(
            graph.get_node_attribute("a", "name").unwrap(),
            Some(&PropertyValue::from("Alice"))
        );
        assert!(graph.has_attribute(AttributeTarget::edge("ab"), "weight").unwrap());
        assert!(!graph.has_attribute(AttributeTarget::Node("b"), "weight").unwrap());
        assert_eq!(
            graph.get_attribute(AttributeTarget::Node("zzz"), "x").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_set_update_remove() {
        let mut graph = sample();
        graph.set_edge_attribute("ab", "color", "red").unwrap();
        graph
            .update_attribute(AttributeTarget::edge("ab"), "weight", |w| {
                PropertyValue::Integer(w.and_then(|v| v.as_integer()).unwrap_or(0) + 1)
            })
            .unwrap();
        assert_eq!(graph.get_edge_attribute("ab", "weight").unwrap(), Some(&PropertyValue::Integer(2)));

        let removed = graph.remove_attribute(AttributeTarget::edge("ab"), "weight").unwrap();
        assert_eq!(removed, Some(PropertyValue::Integer(2)));
        assert_eq!(graph.get_edge_attributes("ab").unwrap(), &attrs! { "color" => "red" });
    }

    #[test]
    fn test_replace_merge_update() {
        let mut graph = sample();
        graph.replace_attributes(AttributeTarget::Node("a"), attrs! { "x" => 1 }).unwrap();
        graph.merge_attributes(AttributeTarget::Node("a"), attrs! { "y" => 2, "x" => 3 }).unwrap();
        assert_eq!(graph.get_node_attributes("a").unwrap(), &attrs! { "x" => 3, "y" => 2 });

        graph
            .update_attributes(AttributeTarget::Node("a"), |mut attr| {
                attr.shift_remove("x");
                attr
            })
            .unwrap();
        assert_eq!(graph.get_node_attributes("a").unwrap(), &attrs! { "y" => 2 });
    }

    #[test]
    fn test_graph_attributes() {
        let mut graph = Graph::mixed();
        graph.set_graph_attribute("name", "karate").unwrap();
        assert!(graph.has_graph_attribute("name"));
        assert_eq!(graph.get_graph_attribute("name"), Some(&PropertyValue::from("karate")));
        assert_eq!(graph.get_attributes(AttributeTarget::Graph).unwrap().len(), 1);
    }

    #[test]
    fn test_path_addressing() {
        let mut graph = sample();
        let target = AttributeTarget::edge_between(GraphType::Directed, "a", "b");
        graph.set_attribute(target, "via", "path").unwrap();
        assert_eq!(graph.get_edge_attribute("ab", "via").unwrap(), Some(&PropertyValue::from("path")));

        let reversed = AttributeTarget::edge_between(GraphType::Directed, "b", "a");
        assert_eq!(graph.get_attributes(reversed).unwrap_err().kind(), ErrorKind::NotFound);

        let mut multi = Graph::multi();
        multi.merge_edge("a", "b", attrs! {}).unwrap();
        let err = multi
            .get_attributes(AttributeTarget::edge_between(GraphType::Mixed, "a", "b"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_undirected_path_matches_both_orientations() {
        let mut graph = Graph::undirected();
        graph.merge_edge_with_key("e", "a", "b", attrs! { "w" => 1 }).unwrap();
        let target = AttributeTarget::edge_between(GraphType::Mixed, "b", "a");
        assert!(graph.has_attribute(target, "w").unwrap());
    }

    #[test]
    fn test_update_each() {
        let mut graph = sample();
        graph.update_each_node_attributes(
            |key, mut attr| {
                attr.insert("id".into(), key.into());
                attr
            },
            Some(UpdateHints { attributes: vec!["id".into()] }),
        );
        assert_eq!(graph.get_node_attribute("b", "id").unwrap(), Some(&PropertyValue::from("b")));

        graph.update_each_edge_attributes(
            |_, mut attr, source, target| {
                attr.insert("label".into(), format!("{}->{}", source, target).into());
                attr
            },
            None,
        );
        assert_eq!(
            graph.get_edge_attribute("ab", "label").unwrap(),
            Some(&PropertyValue::from("a->b"))
        );
    }

    #[test]
    fn test_attribute_events() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut graph = sample();
        let sink = Arc::clone(&log);
        graph.on(move |event| {
            let entry = match event {
                GraphEvent::NodeAttributesUpdated { key, kind, name, .. } => {
                    format!("node:{}:{}:{}", key, kind.as_str(), name.unwrap_or("-"))
                }
                GraphEvent::EdgeAttributesUpdated { key, kind, .. } => format!("edge:{}:{}", key, kind.as_str()),
                GraphEvent::GraphAttributesUpdated { kind, .. } => format!("graph:{}", kind.as_str()),
                GraphEvent::EachNodeAttributesUpdated { hints } => {
                    format!("each:{}", hints.map_or(0, |h| h.attributes.len()))
                }
                other => other.name().to_string(),
            };
            sink.lock().unwrap().push(entry);
        });

        graph.set_node_attribute("a", "x", 1).unwrap();
        graph.merge_attributes(AttributeTarget::edge("ab"), attrs! {}).unwrap();
        graph.remove_attribute(AttributeTarget::Graph, "nothing").unwrap();
        graph.update_each_node_attributes(|_, attr| attr, Some(UpdateHints::default()));

        assert_eq!(
            *log.lock().unwrap(),
            vec!["node:a:set:x", "edge:ab:merge", "graph:remove", "each:0"]
        );
    }
}
