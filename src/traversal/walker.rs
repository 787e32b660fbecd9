//! Edge id walker shared by every traversal family
//!
//! A walk is a short list of stages run in order. Slot stages walk a whole
//! adjacency dictionary, chain stages a single slot, arena stages the whole
//! edge arena. Each slot yields its chain head to tail before the walk moves
//! on to the next neighbor.

use super::{Direction, EdgeRelation};
use crate::graph::arena;
use crate::graph::edge::EdgeRecord;
use crate::graph::node::AdjacencyMap;
use crate::graph::{EdgeId, Graph, GraphType, NodeId};

enum Stage<'g> {
    Slots {
        slots: indexmap::map::Iter<'g, NodeId, EdgeId>,
        skip: Option<NodeId>,
    },
    Chain(Option<EdgeId>),
    Arena {
        edges: arena::Iter<'g, EdgeRecord>,
        undirected: Option<bool>,
    },
}

enum Step {
    Yield(EdgeId),
    Follow(EdgeId),
    Skip,
    Done,
}

/// Lazy sequence of edge ids
pub(crate) struct EdgeIds<'g> {
    graph: &'g Graph,
    stages: std::vec::IntoIter<Stage<'g>>,
    current: Option<Stage<'g>>,
    chain: Option<EdgeId>,
}

impl<'g> EdgeIds<'g> {
    fn new(graph: &'g Graph, stages: Vec<Stage<'g>>) -> Self {
        EdgeIds {
            graph,
            stages: stages.into_iter(),
            current: None,
            chain: None,
        }
    }

    pub fn empty(graph: &'g Graph) -> Self {
        Self::new(graph, Vec::new())
    }

    /// Every edge of the relation's type, in arena order. Graph-wide,
    /// directions collapse: `In`/`Out` cover directed edges and
    /// `Inbound`/`Outbound` cover all edges.
    pub fn for_graph(graph: &'g Graph, relation: EdgeRelation) -> Self {
        let (edge_type, _) = relation.parts();
        if !edge_type.fits(graph.graph_type()) {
            return Self::empty(graph);
        }
        let undirected = if edge_type == GraphType::Mixed || edge_type == graph.graph_type() {
            None
        } else {
            Some(edge_type == GraphType::Undirected)
        };
        Self::new(
            graph,
            vec![Stage::Arena {
                edges: graph.edges.iter(),
                undirected,
            }],
        )
    }

    /// Edges incident to `node`. A directed self-loop sits in both `in` and
    /// `out`; when both are walked the `out` copy is skipped.
    pub(crate) fn for_node(graph: &'g Graph, relation: EdgeRelation, node: NodeId) -> Self {
        let (edge_type, direction) = relation.parts();
        if !edge_type.fits(graph.graph_type()) {
            return Self::empty(graph);
        }
        let data = &graph.node(node).data;
        let mut stages = Vec::with_capacity(3);

        if edge_type != GraphType::Undirected {
            if direction != Some(Direction::Out) {
                push_slots(&mut stages, data.in_map(), None);
            }
            if direction != Some(Direction::In) {
                let skip = direction.is_none().then_some(node);
                push_slots(&mut stages, data.out_map(), skip);
            }
        }
        if edge_type != GraphType::Directed {
            push_slots(&mut stages, data.undirected_map(), None);
        }
        Self::new(graph, stages)
    }

    /// Edges linking `source` to `target`
    pub(crate) fn for_pair(graph: &'g Graph, relation: EdgeRelation, source: NodeId, target: NodeId) -> Self {
        let (edge_type, direction) = relation.parts();
        if !edge_type.fits(graph.graph_type()) {
            return Self::empty(graph);
        }
        let data = &graph.node(source).data;
        let head = |map: Option<&AdjacencyMap>| map.and_then(|m| m.get(&target)).copied();
        let mut stages = Vec::with_capacity(3);

        if edge_type != GraphType::Undirected {
            if direction != Some(Direction::Out) {
                stages.push(Stage::Chain(head(data.in_map())));
            }
            if direction != Some(Direction::In) && (direction.is_some() || source != target) {
                stages.push(Stage::Chain(head(data.out_map())));
            }
        }
        if edge_type != GraphType::Directed {
            stages.push(Stage::Chain(head(data.undirected_map())));
        }
        Self::new(graph, stages)
    }

    /// Outgoing directed edges then undirected edges of `node`
    pub(crate) fn adjacency_of(graph: &'g Graph, node: NodeId) -> Self {
        let data = &graph.node(node).data;
        let mut stages = Vec::with_capacity(2);
        push_slots(&mut stages, data.out_map(), None);
        push_slots(&mut stages, data.undirected_map(), None);
        Self::new(graph, stages)
    }
}

fn push_slots<'g>(stages: &mut Vec<Stage<'g>>, map: Option<&'g AdjacencyMap>, skip: Option<NodeId>) {
    if let Some(map) = map {
        stages.push(Stage::Slots {
            slots: map.iter(),
            skip,
        });
    }
}

impl<'g> Iterator for EdgeIds<'g> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        loop {
            if let Some(id) = self.chain {
                self.chain = self.graph.edge(id).next;
                return Some(id);
            }

            let step = match self.current.as_mut() {
                None => {
                    self.current = Some(self.stages.next()?);
                    continue;
                }
                Some(Stage::Slots { slots, skip }) => match slots.next() {
                    Some((neighbor, _)) if Some(*neighbor) == *skip => Step::Skip,
                    Some((_, head)) => Step::Follow(*head),
                    None => Step::Done,
                },
                Some(Stage::Chain(head)) => match head.take() {
                    Some(head) => Step::Follow(head),
                    None => Step::Done,
                },
                Some(Stage::Arena { edges, undirected }) => match edges.next() {
                    Some((idx, edge)) if undirected.map_or(true, |u| edge.undirected == u) => {
                        Step::Yield(EdgeId::from(idx))
                    }
                    Some(_) => Step::Skip,
                    None => Step::Done,
                },
            };

            match step {
                Step::Yield(id) => return Some(id),
                Step::Follow(head) => self.chain = Some(head),
                Step::Skip => {}
                Step::Done => self.current = None,
            }
        }
    }
}
