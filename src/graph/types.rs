//! Core type definitions for the graph store

use super::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Arena slot of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) u64);

impl NodeId {
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(idx: usize) -> Self {
        NodeId(idx as u64)
    }
}

/// Arena slot of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct EdgeId(pub(crate) u64);

impl EdgeId {
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<usize> for EdgeId {
    fn from(idx: usize) -> Self {
        EdgeId(idx as u64)
    }
}

/// Structural type of a graph, or the directedness requested by an edge
/// operation.
///
/// As an edge type, `Mixed` means "whatever the graph adds by default" for
/// mutations (directed unless the graph is undirected) and "either
/// directedness" for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    #[default]
    Mixed,
    Directed,
    Undirected,
}

impl GraphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphType::Mixed => "mixed",
            GraphType::Directed => "directed",
            GraphType::Undirected => "undirected",
        }
    }

    /// Whether edges of type `self` may exist in a graph of type `graph`.
    pub fn fits(&self, graph: GraphType) -> bool {
        *self == GraphType::Mixed || graph == GraphType::Mixed || *self == graph
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphType {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s {
            "mixed" => Ok(GraphType::Mixed),
            "directed" => Ok(GraphType::Directed),
            "undirected" => Ok(GraphType::Undirected),
            other => Err(GraphError::InvalidArguments(format!(
                "graph type must be one of \"mixed\", \"directed\" or \"undirected\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Construction-time configuration of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GraphOptions {
    #[serde(rename = "type", default)]
    pub graph_type: GraphType,

    #[serde(default)]
    pub multi: bool,

    #[serde(default = "default_allow_self_loops")]
    pub allow_self_loops: bool,
}

fn default_allow_self_loops() -> bool {
    true
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            graph_type: GraphType::Mixed,
            multi: false,
            allow_self_loops: true,
        }
    }
}

impl GraphOptions {
    pub fn new(graph_type: GraphType) -> Self {
        Self {
            graph_type,
            ..Self::default()
        }
    }

    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn allow_self_loops(mut self, allow: bool) -> Self {
        self.allow_self_loops = allow;
        self
    }

    /// Parse options from a JSON object such as
    /// `{"type": "undirected", "multi": true}`.
    pub fn from_json(input: &str) -> GraphResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            GraphError::InvalidArguments(format!("invalid graph options: {}", e))
        })
    }

    pub fn from_value(value: &serde_json::Value) -> GraphResult<Self> {
        if !value.is_object() {
            return Err(GraphError::InvalidArguments(
                "graph options must be an object".to_string(),
            ));
        }
        GraphOptions::deserialize(value).map_err(|e| {
            GraphError::InvalidArguments(format!("invalid graph options: {}", e))
        })
    }
}
