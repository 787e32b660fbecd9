//! Graph snapshots
//!
//! `export` produces a serde-serializable snapshot:
//! `{attributes, nodes: [{key, attributes}], edges: [{key, source, target,
//! attributes, undirected}], options: {type, multi, allowSelfLoops}}`, with
//! empty attribute records omitted. `import` is its inverse and also accepts
//! single node or edge records.
//!
//! Untyped JSON input is validated in full before anything is mutated.

use crate::graph::property::json_type_name;
use crate::graph::{
    attributes_from_json, AttributeTarget, Attributes, Graph, GraphError, GraphOptions, GraphResult,
    GraphType,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNode {
    pub key: String,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedEdge {
    /// Absent keys are generated on import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    pub source: String,

    pub target: String,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,

    /// Written for every undirected edge. Absent means the importing graph's
    /// default directedness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undirected: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerializedGraph {
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,

    #[serde(default)]
    pub nodes: Vec<SerializedNode>,

    #[serde(default)]
    pub edges: Vec<SerializedEdge>,

    #[serde(default)]
    pub options: GraphOptions,
}

/// Anything `import_json` accepts
#[derive(Debug, Clone, PartialEq)]
pub enum ImportRecord {
    Graph(SerializedGraph),
    Node(SerializedNode),
    Edge(SerializedEdge),
}

fn as_object<'v>(value: &'v Value, what: &str) -> GraphResult<&'v serde_json::Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        GraphError::InvalidArguments(format!(
            "{} must be an object, got {}",
            what,
            json_type_name(value)
        ))
    })
}

/// Keys are strings; numbers are accepted and stringified.
fn key_field(record: &serde_json::Map<String, Value>, field: &str, what: &str) -> GraphResult<Option<String>> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(GraphError::InvalidArguments(format!(
            "{}: \"{}\" must be a string, got {}",
            what,
            field,
            json_type_name(other)
        ))),
    }
}

fn required_key(record: &serde_json::Map<String, Value>, field: &str, what: &str) -> GraphResult<String> {
    key_field(record, field, what)?.ok_or_else(|| {
        GraphError::InvalidArguments(format!("{}: missing \"{}\"", what, field))
    })
}

fn attributes_field(record: &serde_json::Map<String, Value>, what: &str) -> GraphResult<Attributes> {
    match record.get("attributes") {
        None => Ok(Attributes::new()),
        Some(value) => attributes_from_json(value).map_err(|e| match e {
            GraphError::InvalidArguments(msg) => GraphError::InvalidArguments(format!("{}: {}", what, msg)),
            other => other,
        }),
    }
}

fn list_field<'v>(record: &'v serde_json::Map<String, Value>, field: &str) -> GraphResult<&'v [Value]> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(GraphError::InvalidArguments(format!(
            "serialized graph: \"{}\" must be an array, got {}",
            field,
            json_type_name(other)
        ))),
    }
}

impl SerializedNode {
    pub fn from_value(value: &Value) -> GraphResult<Self> {
        let record = as_object(value, "serialized node")?;
        Ok(SerializedNode {
            key: required_key(record, "key", "serialized node")?,
            attributes: attributes_field(record, "serialized node")?,
        })
    }
}

impl SerializedEdge {
    pub fn from_value(value: &Value) -> GraphResult<Self> {
        let what = "serialized edge";
        let record = as_object(value, what)?;
        let undirected = match record.get("undirected") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                return Err(GraphError::InvalidArguments(format!(
                    "{}: \"undirected\" must be a boolean, got {}",
                    what,
                    json_type_name(other)
                )))
            }
        };
        Ok(SerializedEdge {
            key: key_field(record, "key", what)?,
            source: required_key(record, "source", what)?,
            target: required_key(record, "target", what)?,
            attributes: attributes_field(record, what)?,
            undirected,
        })
    }

    fn edge_type(&self) -> GraphType {
        match self.undirected {
            Some(true) => GraphType::Undirected,
            Some(false) => GraphType::Directed,
            None => GraphType::Mixed,
        }
    }
}

impl SerializedGraph {
    pub fn from_value(value: &Value) -> GraphResult<Self> {
        let record = as_object(value, "serialized graph")?;

        let attributes = attributes_field(record, "serialized graph")?;

        let options = match record.get("options") {
            None | Some(Value::Null) => GraphOptions::default(),
            Some(options) => GraphOptions::from_value(options)?,
        };

        let nodes = list_field(record, "nodes")?
            .iter()
            .map(SerializedNode::from_value)
            .collect::<GraphResult<Vec<_>>>()?;
        let edges = list_field(record, "edges")?
            .iter()
            .map(SerializedEdge::from_value)
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(SerializedGraph {
            attributes,
            nodes,
            edges,
            options,
        })
    }
}

impl ImportRecord {
    /// Classify and validate an untyped record: anything with a `source` or
    /// `target` is an edge, anything else with a `key` is a node, the rest is
    /// a graph snapshot.
    pub fn from_value(value: &Value) -> GraphResult<Self> {
        let record = as_object(value, "imported data")?;
        if record.contains_key("source") || record.contains_key("target") {
            SerializedEdge::from_value(value).map(ImportRecord::Edge)
        } else if record.contains_key("key") {
            SerializedNode::from_value(value).map(ImportRecord::Node)
        } else {
            SerializedGraph::from_value(value).map(ImportRecord::Graph)
        }
    }
}

impl Graph {
    /// Snapshot of the whole graph, nodes and edges in arena order
    pub fn export(&self) -> SerializedGraph {
        let nodes = self
            .node_entries()
            .map(|node| SerializedNode {
                key: node.key.to_string(),
                attributes: node.attributes.clone(),
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .map(|(_, edge)| SerializedEdge {
                key: Some(edge.key.clone()),
                source: self.node_key(edge.source).to_string(),
                target: self.node_key(edge.target).to_string(),
                attributes: edge.attributes.clone(),
                undirected: edge.undirected.then_some(true),
            })
            .collect();

        SerializedGraph {
            attributes: self.attributes.clone(),
            nodes,
            edges,
            options: self.options(),
        }
    }

    /// Add (or with `merge`, merge) every record of a snapshot.
    ///
    /// Graph attributes are merged, or replaced when the snapshot carries
    /// any.
    ///
    /// Not atomic. Graph attributes are written first and records are
    /// applied in order, so a structural conflict (duplicate key, missing
    /// endpoint, incompatible edge type) returns an error with the new graph
    /// attributes and every record before the failing one already applied.
    pub fn import(&mut self, data: &SerializedGraph, merge: bool) -> GraphResult<()> {
        if merge {
            self.merge_attributes(AttributeTarget::Graph, data.attributes.clone())?;
        } else if !data.attributes.is_empty() {
            self.replace_attributes(AttributeTarget::Graph, data.attributes.clone())?;
        }

        for node in &data.nodes {
            self.import_node(node, merge)?;
        }
        for edge in &data.edges {
            self.import_edge(edge, merge)?;
        }

        info!(
            "Imported {} nodes and {} edges (merge: {})",
            data.nodes.len(),
            data.edges.len(),
            merge
        );
        Ok(())
    }

    pub fn import_node(&mut self, node: &SerializedNode, merge: bool) -> GraphResult<()> {
        if merge {
            self.merge_node(node.key.as_str(), node.attributes.clone())?;
        } else {
            self.add_node(node.key.as_str(), node.attributes.clone())?;
        }
        Ok(())
    }

    pub fn import_edge(&mut self, edge: &SerializedEdge, merge: bool) -> GraphResult<()> {
        let key = edge.key.as_deref();
        let attributes = edge.attributes.clone();
        if merge {
            self.merge_edge_as(edge.edge_type(), key, &edge.source, &edge.target, attributes)?;
        } else {
            self.add_edge_as(edge.edge_type(), key, &edge.source, &edge.target, attributes)?;
        }
        Ok(())
    }

    /// Validate then import an untyped graph snapshot, node or edge record
    pub fn import_json(&mut self, value: &Value, merge: bool) -> GraphResult<()> {
        match ImportRecord::from_value(value)? {
            ImportRecord::Graph(data) => self.import(&data, merge),
            ImportRecord::Node(node) => self.import_node(&node, merge),
            ImportRecord::Edge(edge) => self.import_edge(&edge, merge),
        }
    }

    /// New graph configured with the snapshot's options and holding its data
    pub fn from_serialized(data: &SerializedGraph) -> GraphResult<Graph> {
        let mut graph = Graph::new(data.options);
        graph.import(data, false)?;
        Ok(graph)
    }

    pub fn to_json(&self) -> GraphResult<String> {
        serde_json::to_string(&self.export())
            .map_err(|e| GraphError::InvalidArguments(format!("cannot serialize graph: {}", e)))
    }

    pub fn from_json(input: &str) -> GraphResult<Graph> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidArguments(format!("invalid graph JSON: {}", e)))?;
        let data = SerializedGraph::from_value(&value)?;
        debug!("Parsed snapshot with {} nodes and {} edges", data.nodes.len(), data.edges.len());
        Graph::from_serialized(&data)
    }
}
