use mixgraph::{attrs, EdgeRelation, EdgeScope, ErrorKind, Graph, GraphType};
use std::collections::HashMap;

fn social() -> Graph {
    let mut graph = Graph::mixed();
    for key in ["alice", "bob", "carol", "dave"] {
        graph.add_node(key, attrs! { "name" => key }).unwrap();
    }
    graph.add_directed_edge_with_key("ab", "alice", "bob", attrs! { "weight" => 1 }).unwrap();
    graph.add_directed_edge_with_key("bc", "bob", "carol", attrs! { "weight" => 2 }).unwrap();
    graph.add_directed_edge_with_key("ca", "carol", "alice", attrs! { "weight" => 3 }).unwrap();
    graph.add_directed_edge_with_key("aa", "alice", "alice", attrs! {}).unwrap();
    graph.add_undirected_edge_with_key("ad", "alice", "dave", attrs! {}).unwrap();
    graph.add_undirected_edge_with_key("dd", "dave", "dave", attrs! {}).unwrap();
    graph
}

#[test]
fn test_out_edges_cover_directed_size() {
    let graph = social();
    let total: usize = graph
        .nodes()
        .iter()
        .map(|n| graph.edges(EdgeRelation::Out, EdgeScope::Node(n)).unwrap().len())
        .sum();
    assert_eq!(total, graph.directed_size());

    let total_in: usize = graph
        .nodes()
        .iter()
        .map(|n| graph.edges(EdgeRelation::In, EdgeScope::Node(n)).unwrap().len())
        .sum();
    assert_eq!(total_in, graph.directed_size());
}

#[test]
fn test_undirected_edges_seen_from_both_endpoints() {
    let graph = social();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for node in graph.nodes() {
        for edge in graph.edges(EdgeRelation::Undirected, EdgeScope::Node(node)).unwrap() {
            *seen.entry(edge.to_string()).or_default() += 1;
        }
    }
    assert_eq!(seen.get("ad"), Some(&2));
    assert_eq!(seen.get("dd"), Some(&1));
    assert_eq!(seen.len(), graph.undirected_size());
}

#[test]
fn test_node_edges_report_self_loops_once() {
    let graph = social();
    let mut edges = graph.edges(EdgeRelation::All, EdgeScope::Node("alice")).unwrap();
    edges.sort();
    assert_eq!(edges, vec!["aa", "ab", "ad", "ca"]);

    assert_eq!(graph.edges(EdgeRelation::In, EdgeScope::Node("alice")).unwrap(), vec!["ca", "aa"]);
    assert_eq!(graph.edges(EdgeRelation::Out, EdgeScope::Node("alice")).unwrap(), vec!["ab", "aa"]);
}

#[test]
fn test_neighbors_are_deduplicated() {
    let mut graph = Graph::multi();
    graph.merge_edge("a", "b", attrs! {}).unwrap();
    graph.merge_edge("a", "b", attrs! {}).unwrap();
    graph.merge_edge("b", "a", attrs! {}).unwrap();
    graph.merge_undirected_edge("a", "b", attrs! {}).unwrap();

    assert_eq!(graph.neighbors(EdgeRelation::All, "a").unwrap(), vec!["b"]);
    assert_eq!(graph.neighbors(EdgeRelation::Out, "a").unwrap(), vec!["b"]);
    assert_eq!(graph.edges(EdgeRelation::All, EdgeScope::Node("a")).unwrap().len(), 4);
    assert!(graph.are_undirected_neighbors("b", "a").unwrap());
}

#[test]
fn test_pair_scope_directions() {
    let graph = social();
    assert_eq!(graph.edges(EdgeRelation::Out, EdgeScope::Pair("alice", "bob")).unwrap(), vec!["ab"]);
    assert!(graph.edges(EdgeRelation::In, EdgeScope::Pair("alice", "bob")).unwrap().is_empty());
    assert_eq!(graph.edges(EdgeRelation::In, EdgeScope::Pair("bob", "alice")).unwrap(), vec!["ab"]);
    assert_eq!(graph.edges(EdgeRelation::All, EdgeScope::Pair("dave", "alice")).unwrap(), vec!["ad"]);
    assert_eq!(graph.edges(EdgeRelation::All, EdgeScope::Pair("alice", "alice")).unwrap(), vec!["aa"]);

    let err = graph.edges(EdgeRelation::All, EdgeScope::Pair("alice", "zoe")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_relation_mismatch_yields_nothing() {
    let mut graph = Graph::undirected();
    graph.merge_edge("a", "b", attrs! {}).unwrap();

    assert!(graph.edges(EdgeRelation::Out, EdgeScope::Node("a")).unwrap().is_empty());
    assert!(graph.neighbors(EdgeRelation::Directed, "a").unwrap().is_empty());
    assert_eq!(graph.neighbors(EdgeRelation::Outbound, "a").unwrap(), vec!["b"]);
    assert_eq!(
        graph.edges(EdgeRelation::Out, EdgeScope::Node("zoe")).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_entries_carry_attributes() {
    let graph = social();
    let heaviest = graph
        .edge_entries(EdgeRelation::Directed, EdgeScope::Graph)
        .unwrap()
        .filter_map(|e| e.attributes.get("weight").and_then(|w| w.as_integer()).map(|w| (w, e.key)))
        .max();
    assert_eq!(heaviest, Some((3, "ca")));

    let found = graph
        .find_edge(EdgeRelation::Out, EdgeScope::Node("bob"), |e| e.target == "carol")
        .unwrap();
    assert_eq!(found, Some("bc"));

    assert!(graph.every_edge(EdgeRelation::Undirected, EdgeScope::Graph, |e| e.undirected).unwrap());
    assert!(graph.some_neighbor(EdgeRelation::Inbound, "alice", |n| n.key == "dave").unwrap());
}

#[test]
fn test_adjacency_matches_degrees() {
    let graph = social();
    let mut directed = 0;
    let mut undirected = 0;
    graph.for_each_adjacency_entry(|entry| {
        if entry.undirected {
            undirected += 1;
        } else {
            directed += 1;
        }
    });
    assert_eq!(directed, graph.directed_size());
    // "ad" from both endpoints, "dd" once
    assert_eq!(undirected, 3);

    let asymmetric = graph.asymmetric_adjacency_entries().count();
    assert_eq!(asymmetric, graph.size());
}

#[test]
fn test_edges_between_types() {
    let mut graph = Graph::multi();
    graph.merge_directed_edge_with_key("d1", "a", "b", attrs! {}).unwrap();
    graph.merge_directed_edge_with_key("d2", "a", "b", attrs! {}).unwrap();
    graph.merge_undirected_edge_with_key("u", "b", "a", attrs! {}).unwrap();

    assert_eq!(graph.edges_between(GraphType::Directed, "a", "b").unwrap(), vec!["d2", "d1"]);
    assert_eq!(graph.edges_between(GraphType::Undirected, "a", "b").unwrap(), vec!["u"]);
    assert!(graph.edges_between(GraphType::Directed, "b", "a").unwrap().is_empty());
    assert_eq!(graph.edge_between(GraphType::Undirected, "a", "b").unwrap(), Some("u"));
}
