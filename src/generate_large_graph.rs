use crate::{GraphError, GraphMut};

/// Fills `graph` with an irregular graph over nodes `0..510`, using
/// `new_label` for the labels and deterministic weights between 1 and 5.
///
/// The graph structure includes:
/// - Cluster 1: Dense cluster (50 nodes, ~60% connectivity)
/// - Cluster 2: Medium cluster (80 nodes, ~30% connectivity)
/// - Cluster 3: Large sparse cluster (150 nodes, ~8% connectivity)
/// - Hub nodes (20 nodes with many connections)
/// - Scattered nodes (100 nodes with few connections)
/// - Bridge nodes connecting clusters (10 nodes)
/// - Isolated nodes (100 nodes)
/// - Long-range connections and self loops
///
/// Edges the graph variant rejects (self loops and relabeled pairs in simple
/// graphs) are skipped.
pub fn generate_large_graph<G, FL>(graph: &mut G, mut new_label: FL)
where
    G: GraphMut<Node = u32>,
    FL: FnMut(usize) -> G::Label,
{
    let mut edge_counter = 0;
    let mut link = |graph: &mut G, from: u32, to: u32| {
        let weight = (edge_counter % 5) as u32 + 1;
        match graph.set_weighted(from, to, new_label(edge_counter), weight) {
            Ok(()) | Err(GraphError::Unsupported(_)) => {}
            Err(e) => panic!("unexpected error generating graph: {e}"),
        }
        edge_counter += 1;
    };

    let mut add_cluster = |graph: &mut G, start: u32, len: u32, a: u32, b: u32, pct: u32| {
        for i in start..start + len {
            graph.add(i);
        }
        for i in start..start + len {
            for j in (i + 1)..start + len {
                if (i * a + j * b) % 100 < pct {
                    link(graph, i, j);
                }
            }
        }
    };

    // Cluster 1: 0..50, cluster 2: 50..130, cluster 3: 130..280
    add_cluster(graph, 0, 50, 7, 11, 60);
    add_cluster(graph, 50, 80, 13, 17, 30);
    add_cluster(graph, 130, 150, 19, 23, 8);

    // Hubs: 280..300
    for hub in 280..300 {
        for i in 0..hub {
            if (280 * 29 + i * 31) % 7 < 4 {
                link(graph, hub, i);
            }
        }
    }

    // Scattered: 300..400
    for node in 300..400 {
        let num_connections = (300 + node + 1) % 3 + 1;
        for c in 0..num_connections {
            let target = (300 * 37 + (node + 1) * 41 + c * 43) % node;
            link(graph, node, target);
        }
    }

    // Bridges: 400..410
    for i in 0..10 {
        let bridge = 400 + i;
        link(graph, bridge, (i * 47) % 50);
        link(graph, bridge, (i * 53) % 80 + 50);
        link(graph, bridge, (i * 59) % 150 + 130);
    }

    // Isolated: 410..510
    for node in 410..510 {
        graph.add(node);
    }

    // Long-range connections, then self loops
    for i in 0..200 {
        let a = (i * 61) % 410;
        let b = (i * 67 + 100) % 410;
        if a != b {
            link(graph, a, b);
        }
    }
    for i in 0..50 {
        let a = (i * 71) % 410;
        link(graph, a, a);
    }
}
