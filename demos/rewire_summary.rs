//! Generates a graph with one of the rewiring engines and prints a summary
//! of its structure.

use std::io;

use clap::Parser;
use multigraph::{
    Graph, GraphMut, MultiGraph, ShortestPathFirst,
    kshell::kshell,
    matrix::write_sparse,
    metrics::degree_distribution,
    rewire::{MMode, MultiClassScaleFreeRewire, Rewire, RewireKind, ScaleFreeRewire},
    tracing_support::{init_tracing, span_timings},
};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser)]
#[command(name = "rewire_summary", about = "Generate a graph and summarise it")]
struct Cli {
    /// Number of nodes
    #[arg(long, default_value_t = 200)]
    nodes: u32,

    /// Generator: random, lattice, scale-free or multi-class-scale-free
    #[arg(long, default_value = "scale-free")]
    kind: RewireKind,

    /// Links per attached node (scale-free generators)
    #[arg(long, default_value_t = 2)]
    m: usize,

    /// Attractiveness of low-degree nodes (scale-free generators)
    #[arg(long, default_value_t = 0)]
    a: u32,

    /// Attachment mode: strict, min or max
    #[arg(long, default_value = "strict")]
    mode: MMode,

    /// Seed for a reproducible graph
    #[arg(long)]
    seed: Option<u64>,

    /// Also print the sparse adjacency matrix
    #[arg(long)]
    matrix: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = MultiGraph::<u32, ()>::new();
    for n in 0..cli.nodes {
        graph.add(n);
    }
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let labeler = |_: &u32, _: &u32| Some(());

    let mut rewire: Box<dyn Rewire<Node = u32> + '_> = match cli.kind {
        RewireKind::ScaleFree => Box::new(
            ScaleFreeRewire::with_rng(&mut graph, labeler, rng)
                .with_m(cli.m)?
                .with_a(cli.a)
                .with_m_mode(cli.mode),
        ),
        RewireKind::MultiClassScaleFree => Box::new(
            MultiClassScaleFreeRewire::with_rng(&mut graph, labeler, rng)
                .with_m(cli.m)?
                .with_a(cli.a)
                .with_m_mode(cli.mode),
        ),
        kind => kind.build(&mut graph, labeler, rng),
    };
    rewire.rewire()?;
    drop(rewire);

    println!("generator:  {}", cli.kind);
    println!("nodes:      {}", graph.len());
    println!("links:      {}", graph.link_count());
    println!("avg degree: {:.2}", graph.avg_nodal_degree());
    println!("max degree: {}", graph.max_nodal_degree());
    println!("degeneracy: {}", kshell(&graph).degeneracy());

    println!("degree distribution:");
    for (degree, count) in degree_distribution(&graph) {
        println!("  {degree:>4} {count:>6}");
    }

    if let Some(root) = graph.nodes().next() {
        let mut spf = ShortestPathFirst::new(&graph);
        spf.run(root);
        let reached: Vec<u64> = graph.nodes().filter_map(|n| spf.cost(n)).collect();
        let farthest = reached.iter().copied().max().unwrap_or(0);
        println!(
            "from {root}: {} of {} nodes reachable, farthest {farthest} hops",
            reached.len(),
            graph.len()
        );
    }

    if cli.matrix {
        write_sparse(&graph, &mut io::stdout().lock())?;
    }

    for (name, total, count) in span_timings() {
        println!("span {name:<20} {count:>4} x {total:?}");
    }
    Ok(())
}
