use mixgraph::{attrs, EdgeRelation, EdgeScope, Graph, GraphEvent, GraphOptions};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Mixgraph v{}", mixgraph::version());
    println!("==========================================");
    println!();

    // Demo 1: Mixed graph
    demo_mixed_graph()?;

    // Demo 2: Multi graph
    demo_multi_graph()?;

    // Demo 3: Snapshots
    demo_snapshot()?;

    Ok(())
}

fn demo_mixed_graph() -> anyhow::Result<()> {
    println!("=== Demo 1: Mixed Graph ===");
    let mut graph = Graph::mixed();

    graph.on(|event| {
        if let GraphEvent::EdgeAdded { source, target, undirected, .. } = event {
            let arrow = if *undirected { "--" } else { "->" };
            println!("  event: {} {} {}", source, arrow, target);
        }
    });

    graph.add_node("alice", attrs! { "age" => 30, "city" => "New York" })?;
    println!("✓ Created node: alice (age 30, New York)");
    graph.add_node("bob", attrs! { "age" => 25, "city" => "San Francisco" })?;
    println!("✓ Created node: bob (age 25, San Francisco)");
    graph.add_node("charlie", attrs! { "age" => 35, "city" => "New York" })?;
    println!("✓ Created node: charlie (age 35, New York)");

    graph.add_directed_edge_with_key("follows", "alice", "bob", attrs! { "since" => 2020 })?;
    graph.add_undirected_edge_with_key("knows", "bob", "charlie", attrs! { "strength" => 0.8 })?;
    graph.add_undirected_edge_with_key("self", "charlie", "charlie", attrs! {})?;

    println!("\nGraph Statistics:");
    println!("  Total nodes: {}", graph.order());
    println!("  Total edges: {} ({} directed, {} undirected)", graph.size(), graph.directed_size(), graph.undirected_size());
    println!("  Self loops: {}", graph.self_loop_count());
    println!("  Degree of charlie: {}", graph.degree("charlie")?);

    println!("\nOutbound edges of bob:");
    for edge in graph.edge_entries(EdgeRelation::Outbound, EdgeScope::Node("bob"))? {
        println!("  → {} ({} -> {})", edge.key, edge.source, edge.target);
    }

    println!("\nAdjacency:");
    graph.for_each_adjacency_entry(|entry| {
        println!("  {} via {} reaches {}", entry.node, entry.edge, entry.neighbor);
    });

    Ok(())
}

fn demo_multi_graph() -> anyhow::Result<()> {
    println!("\n=== Demo 2: Multi Graph ===");
    let mut graph = Graph::new(GraphOptions::default().multi(true));

    for (i, day) in ["mon", "tue", "wed"].iter().enumerate() {
        let outcome = graph.merge_edge("paris", "berlin", attrs! { "day" => *day, "train" => i as i64 })?;
        println!(
            "✓ Merged {} (edge added: {}, source added: {}, target added: {})",
            outcome.key, outcome.edge_added, outcome.source_added, outcome.target_added
        );
    }

    let trains = graph.edges(EdgeRelation::Out, EdgeScope::Pair("paris", "berlin"))?;
    println!("  → {} parallel edges, newest first: {:?}", trains.len(), trains);

    let first = trains[0].to_string();
    graph.drop_edge(&first)?;
    println!("✓ Dropped {}; {} edges left", first, graph.size());

    Ok(())
}

fn demo_snapshot() -> anyhow::Result<()> {
    println!("\n=== Demo 3: Snapshots ===");
    let mut graph = Graph::undirected();
    graph.set_graph_attribute("name", "triangle")?;
    graph.merge_edge("a", "b", attrs! {})?;
    graph.merge_edge("b", "c", attrs! {})?;
    graph.merge_edge("c", "a", attrs! {})?;

    let json = graph.to_json()?;
    println!("  {}", json);

    let restored = Graph::from_json(&json)?;
    println!(
        "✓ Restored {} graph with {} nodes and {} edges",
        restored.graph_type(),
        restored.order(),
        restored.size()
    );

    Ok(())
}
