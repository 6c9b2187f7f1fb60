use multigraph::{
    Graph, GraphMut, MultiDiGraph, MultiGraph, SimpleGraph,
    kshell::kshell,
    metrics::degree_distribution,
    position::{PlacedNode, PositionableNode, Vector2D},
    rewire::{
        CartesianRewire, LatticeRewire, MMode, MultiClassScaleFreeRewire, RandomRewire, Rewire,
        RewireKind, ScaleFreeRewire,
    },
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn nodes<G: GraphMut<Node = u32>>(graph: &mut G, n: u32) {
    for i in 0..n {
        graph.add(i);
    }
}

fn always(_: &u32, _: &u32) -> Option<()> {
    Some(())
}

#[test]
fn scale_free_ten_nodes_m1_strict() {
    let mut g = MultiGraph::<u32, ()>::new();
    nodes(&mut g, 10);
    ScaleFreeRewire::with_rng(&mut g, always, StdRng::seed_from_u64(2024))
        .with_m(1)
        .unwrap()
        .with_m_mode(MMode::Strict)
        .rewire()
        .unwrap();
    assert_eq!(g.link_count(), 9);
    assert_eq!(degree_distribution(&g).get(&0), None);
}

#[test]
fn scale_free_every_mode_terminates_and_links() {
    for mode in [MMode::Strict, MMode::Min, MMode::Max] {
        for seed in 0..5 {
            let mut g = MultiGraph::<u32, ()>::new();
            nodes(&mut g, 60);
            ScaleFreeRewire::with_rng(&mut g, always, StdRng::seed_from_u64(seed))
                .with_m(3)
                .unwrap()
                .with_a(1)
                .with_m_mode(mode)
                .rewire()
                .unwrap();
            assert_eq!(g.len(), 60);
            assert!(g.link_count() >= 3, "{mode} with seed {seed}");
        }
    }
}

#[test]
fn scale_free_builds_hubs() {
    let mut g = SimpleGraph::<u32, ()>::new();
    nodes(&mut g, 400);
    ScaleFreeRewire::with_rng(&mut g, always, StdRng::seed_from_u64(11))
        .with_m(2)
        .unwrap()
        .rewire()
        .unwrap();
    // Preferential attachment concentrates links far above the average.
    let max = g.max_nodal_degree() as f64;
    assert!(max > 3.0 * g.avg_nodal_degree(), "max {max}");
    assert!(kshell(&g).degeneracy() >= 1);
}

#[test]
fn scale_free_rejects_m_too_large() {
    let mut g = MultiGraph::<u32, ()>::new();
    nodes(&mut g, 3);
    assert!(ScaleFreeRewire::new(&mut g, always).with_m(3).is_err());
}

#[test]
fn multi_class_adds_peering_links() {
    let mut plain = SimpleGraph::<u32, ()>::new();
    nodes(&mut plain, 40);
    ScaleFreeRewire::with_rng(&mut plain, always, StdRng::seed_from_u64(5))
        .with_a(1_000)
        .rewire()
        .unwrap();

    let mut peered = SimpleGraph::<u32, ()>::new();
    nodes(&mut peered, 40);
    MultiClassScaleFreeRewire::with_rng(&mut peered, always, StdRng::seed_from_u64(5))
        .with_a(1_000)
        .with_p(2)
        .unwrap()
        .with_p_mode(MMode::Min)
        .with_peering_divisor(1e-6)
        .unwrap()
        .rewire()
        .unwrap();
    assert_eq!(plain.link_count(), 39);
    assert!(peered.link_count() > plain.link_count());
}

#[test]
fn random_rewire_meets_min_degree() {
    let mut g = MultiDiGraph::<u32, ()>::new();
    nodes(&mut g, 30);
    RandomRewire::with_rng(&mut g, always, StdRng::seed_from_u64(1))
        .with_min_degree(4)
        .unwrap()
        .rewire()
        .unwrap();
    assert!(g.nodes().all(|n| g.nodal_outdegree(n) >= 4));
}

#[test]
fn lattice_rewire_grid() {
    let mut g = SimpleGraph::<u32, ()>::new();
    nodes(&mut g, 16);
    LatticeRewire::new(&mut g, always).rewire().unwrap();
    // 4x4 grid: 12 horizontal and 12 vertical links.
    assert_eq!(g.link_count(), 24);
    assert_eq!(kshell(&g).degeneracy(), 2);
}

#[test]
fn registry_builds_by_name() {
    for name in ["random", "Lattice", "scale_free", "MULTI-CLASS-SCALE-FREE"] {
        let kind: RewireKind = name.parse().unwrap();
        let mut g = MultiGraph::<u32, ()>::new();
        nodes(&mut g, 25);
        kind.build(&mut g, always, StdRng::seed_from_u64(3))
            .rewire()
            .unwrap();
        assert!(g.link_count() > 0, "{kind}");
    }
}

#[test]
fn incremental_growth_where_supported() {
    let mut g = MultiGraph::<u32, ()>::new();
    nodes(&mut g, 10);
    let mut lattice = LatticeRewire::new(&mut g, always);
    assert!(lattice.add(10).unwrap_err().is_unsupported());

    let mut sf = ScaleFreeRewire::with_rng(&mut g, always, StdRng::seed_from_u64(9)).with_a(1_000);
    sf.rewire().unwrap();
    for n in 10..20 {
        assert_eq!(sf.add(n).unwrap(), 1);
    }
    assert_eq!(g.len(), 20);
    assert_eq!(g.link_count(), 19);
}

#[test]
fn cartesian_matches_distance_rule_after_moves() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut g = SimpleGraph::<PlacedNode<u32>, ()>::new();
    let placed: Vec<_> = (0..80)
        .map(|i| {
            let node = PlacedNode::new(
                i,
                Vector2D::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)),
            );
            g.add(node.clone());
            node
        })
        .collect();
    let labeler = |_: &PlacedNode<u32>, _: &PlacedNode<u32>| Some(());
    let check = |g: &SimpleGraph<PlacedNode<u32>, ()>| {
        for a in &placed {
            for b in &placed {
                if a != b {
                    let near = a.position().distance(&b.position()) <= 25.0;
                    assert_eq!(g.is_linked(a, b), near, "{a:?} {b:?}");
                }
            }
        }
    };

    for round in 0..3 {
        CartesianRewire::new(&mut g, labeler)
            .with_range(25.0)
            .with_bound(200.0, 200.0)
            .unwrap()
            .rewire()
            .unwrap();
        check(&g);
        if round < 2 {
            for node in &placed {
                let p = node.position();
                node.set_position(Vector2D::new(
                    p.x() + rng.gen_range(-30.0..30.0),
                    p.y() + rng.gen_range(-30.0..30.0),
                ));
            }
        }
    }
}
