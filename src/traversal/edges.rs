//! Edge queries by relation and scope

use super::{EdgeEntry, EdgeIds, EdgeRelation, EdgeScope};
use crate::graph::{EdgeId, Graph, GraphResult};

impl Graph {
    pub(crate) fn edge_entry(&self, id: EdgeId) -> EdgeEntry<'_> {
        let edge = self.edge(id);
        let source = self.node(edge.source);
        let target = self.node(edge.target);
        EdgeEntry {
            key: &edge.key,
            attributes: &edge.attributes,
            source: &source.key,
            target: &target.key,
            source_attributes: &source.attributes,
            target_attributes: &target.attributes,
            undirected: edge.undirected,
        }
    }

    fn edge_ids(&self, relation: EdgeRelation, scope: EdgeScope<'_>) -> GraphResult<EdgeIds<'_>> {
        Ok(match scope {
            EdgeScope::Graph => EdgeIds::for_graph(self, relation),
            EdgeScope::Node(key) => EdgeIds::for_node(self, relation, self.node_id(key)?),
            EdgeScope::Pair(source, target) => {
                let s = self.node_id(source)?;
                let t = self.node_id(target)?;
                EdgeIds::for_pair(self, relation, s, t)
            }
        })
    }

    /// Keys of the matching edges
    pub fn edges(&self, relation: EdgeRelation, scope: EdgeScope<'_>) -> GraphResult<Vec<&str>> {
        Ok(self
            .edge_ids(relation, scope)?
            .map(|id| self.edge(id).key.as_str())
            .collect())
    }

    /// Lazy iterator over the matching edges
    pub fn edge_entries(&self, relation: EdgeRelation, scope: EdgeScope<'_>) -> GraphResult<EdgeEntries<'_>> {
        Ok(EdgeEntries {
            graph: self,
            ids: self.edge_ids(relation, scope)?,
        })
    }

    pub fn for_each_edge<F>(&self, relation: EdgeRelation, scope: EdgeScope<'_>, mut callback: F) -> GraphResult<()>
    where
        F: FnMut(EdgeEntry<'_>),
    {
        for id in self.edge_ids(relation, scope)? {
            callback(self.edge_entry(id));
        }
        Ok(())
    }

    /// Key of the first edge accepted by `predicate`, stopping there
    pub fn find_edge<F>(&self, relation: EdgeRelation, scope: EdgeScope<'_>, mut predicate: F) -> GraphResult<Option<&str>>
    where
        F: FnMut(&EdgeEntry<'_>) -> bool,
    {
        Ok(self
            .edge_entries(relation, scope)?
            .find(|entry| predicate(entry))
            .map(|entry| entry.key))
    }

    pub fn some_edge<F>(&self, relation: EdgeRelation, scope: EdgeScope<'_>, predicate: F) -> GraphResult<bool>
    where
        F: FnMut(&EdgeEntry<'_>) -> bool,
    {
        Ok(self.find_edge(relation, scope, predicate)?.is_some())
    }

    pub fn every_edge<F>(&self, relation: EdgeRelation, scope: EdgeScope<'_>, mut predicate: F) -> GraphResult<bool>
    where
        F: FnMut(&EdgeEntry<'_>) -> bool,
    {
        Ok(self.find_edge(relation, scope, |entry| !predicate(entry))?.is_none())
    }
}

/// Pull iterator over edges. Single pass; call again to restart.
pub struct EdgeEntries<'g> {
    graph: &'g Graph,
    ids: EdgeIds<'g>,
}

impl<'g> Iterator for EdgeEntries<'g> {
    type Item = EdgeEntry<'g>;

    fn next(&mut self) -> Option<EdgeEntry<'g>> {
        self.ids.next().map(|id| self.graph.edge_entry(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::graph::ErrorKind;

    fn mixed() -> Graph {
        let mut graph = Graph::mixed();
        for key in ["a", "b", "c"] {
            graph.add_node(key, attrs! {}).unwrap();
        }
        graph.add_directed_edge_with_key("ab", "a", "b", attrs! { "w" => 1 }).unwrap();
        graph.add_directed_edge_with_key("ca", "c", "a", attrs! {}).unwrap();
        graph.add_undirected_edge_with_key("ac", "a", "c", attrs! {}).unwrap();
        graph.add_directed_edge_with_key("aa", "a", "a", attrs! {}).unwrap();
        graph.add_undirected_edge_with_key("uaa", "a", "a", attrs! {}).unwrap();
        graph
    }

    #[test]
    fn test_node_scope_relations() {
        let graph = mixed();
        let node = EdgeScope::Node("a");
        assert_eq!(graph.edges(EdgeRelation::All, node).unwrap(), vec!["ca", "aa", "ab", "ac", "uaa"]);
        assert_eq!(graph.edges(EdgeRelation::In, node).unwrap(), vec!["ca", "aa"]);
        assert_eq!(graph.edges(EdgeRelation::Out, node).unwrap(), vec!["ab", "aa"]);
        assert_eq!(graph.edges(EdgeRelation::Inbound, node).unwrap(), vec!["ca", "aa", "ac", "uaa"]);
        assert_eq!(graph.edges(EdgeRelation::Outbound, node).unwrap(), vec!["ab", "aa", "ac", "uaa"]);
        assert_eq!(graph.edges(EdgeRelation::Directed, node).unwrap(), vec!["ca", "aa", "ab"]);
        assert_eq!(graph.edges(EdgeRelation::Undirected, node).unwrap(), vec!["ac", "uaa"]);
    }

    #[test]
    fn test_pair_scope() {
        let graph = mixed();
        assert_eq!(graph.edges(EdgeRelation::All, EdgeScope::Pair("a", "c")).unwrap(), vec!["ca", "ac"]);
        assert_eq!(graph.edges(EdgeRelation::Out, EdgeScope::Pair("a", "c")).unwrap(), Vec::<&str>::new());
        assert_eq!(graph.edges(EdgeRelation::In, EdgeScope::Pair("a", "c")).unwrap(), vec!["ca"]);
        assert_eq!(graph.edges(EdgeRelation::All, EdgeScope::Pair("a", "a")).unwrap(), vec!["aa", "uaa"]);
        assert_eq!(
            graph.edges(EdgeRelation::All, EdgeScope::Pair("a", "zzz")).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_graph_scope() {
        let graph = mixed();
        assert_eq!(graph.edges(EdgeRelation::All, EdgeScope::Graph).unwrap().len(), graph.size());
        assert_eq!(
            graph.edges(EdgeRelation::Directed, EdgeScope::Graph).unwrap().len(),
            graph.directed_size()
        );
        assert_eq!(graph.edges(EdgeRelation::Undirected, EdgeScope::Graph).unwrap(), vec!["ac", "uaa"]);
    }

    #[test]
    fn test_entries_carry_endpoints() {
        let graph = mixed();
        let entry = graph
            .edge_entries(EdgeRelation::Out, EdgeScope::Node("a"))
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(entry.key, "ab");
        assert_eq!((entry.source, entry.target), ("a", "b"));
        assert!(!entry.undirected);
        assert_eq!(entry.attributes, &attrs! { "w" => 1 });
    }

    #[test]
    fn test_push_and_pull_agree() {
        let graph = mixed();
        let mut pushed = Vec::new();
        graph
            .for_each_edge(EdgeRelation::All, EdgeScope::Node("a"), |e| pushed.push(e.key.to_string()))
            .unwrap();
        let pulled: Vec<String> = graph
            .edge_entries(EdgeRelation::All, EdgeScope::Node("a"))
            .unwrap()
            .map(|e| e.key.to_string())
            .collect();
        assert_eq!(pushed, pulled);
    }

    #[test]
    fn test_find_some_every() {
        let graph = mixed();
        let scope = EdgeScope::Node("a");
        assert_eq!(graph.find_edge(EdgeRelation::All, scope, |e| e.undirected).unwrap(), Some("ac"));

        let mut visited = 0;
        graph
            .find_edge(EdgeRelation::All, scope, |_| {
                visited += 1;
                true
            })
            .unwrap();
        assert_eq!(visited, 1);

        assert!(graph.some_edge(EdgeRelation::All, scope, |e| e.source == e.target).unwrap());
        assert!(!graph.every_edge(EdgeRelation::All, scope, |e| e.undirected).unwrap());
        assert!(graph.every_edge(EdgeRelation::Undirected, scope, |e| e.undirected).unwrap());
    }

    #[test]
    fn test_unfit_relation_yields_nothing() {
        let mut graph = Graph::undirected();
        graph.add_node("a", attrs! {}).unwrap();
        graph.add_node("b", attrs! {}).unwrap();
        graph.add_edge("a", "b", attrs! {}).unwrap();
        assert!(graph.edges(EdgeRelation::In, EdgeScope::Node("a")).unwrap().is_empty());
        assert!(graph.edges(EdgeRelation::Out, EdgeScope::Graph).unwrap().is_empty());
        assert_eq!(
            graph.edges(EdgeRelation::In, EdgeScope::Node("zzz")).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
