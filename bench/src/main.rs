use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use neuronet_core::{
    bfs_neighborhood, degree_ranking, max_degree_node, CsrBuilder, CsrEngine, CsrGraph,
    LoadOptions, NodeId,
};
use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::process::ExitCode;
use std::time::Instant;

type EdgeVec = Vec<(NodeId, NodeId)>;

/// Time CSR construction and bounded BFS on synthetic graphs.
#[derive(Parser, Debug)]
#[command(name = "neuronet-bench")]
struct Args {
    /// Graph generator to run
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Nodes per generated graph
    #[arg(default_value_t = 5_000_000)]
    node_count: u32,

    /// Render the edges as an edge-list file in memory and load it through
    /// the parser, timing the full load path
    #[arg(long)]
    text: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Run all generators and benchmark each
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense clusters connected by a thin bridge
    Barbell,
    /// Diffusion-limited aggregation (organic branching)
    Dla,
}

type Generator = (&'static str, fn(u32) -> EdgeVec);

const GENERATORS: [(Mode, Generator); 6] = [
    (Mode::Lsystem, ("L-system tree", gen_lsystem)),
    (Mode::Scalefree, ("Scale-free (edge sampling)", gen_scale_free)),
    (Mode::Smallworld, ("Small-world (Watts-Strogatz)", gen_small_world)),
    (Mode::Random, ("Erdos-Renyi random", gen_random)),
    (Mode::Barbell, ("Barbell (cluster-bridge-cluster)", gen_barbell)),
    (Mode::Dla, ("DLA (organic branching)", gen_dla)),
];

fn generators_for(mode: Mode) -> Vec<Generator> {
    GENERATORS
        .iter()
        .filter(|(m, _)| mode == Mode::All || *m == mode)
        .map(|&(_, generator)| generator)
        .collect()
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("neuronet-bench");
    println!("==============");
    println!();

    let mut failed = false;
    for (name, generator) in generators_for(args.mode) {
        if let Err(e) = run_benchmark(name, generator, args.node_count, args.text) {
            eprintln!("error: {:#}", e);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_benchmark(
    name: &str,
    generator: fn(u32) -> EdgeVec,
    node_count: u32,
    from_text: bool,
) -> Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    println!(
        "Generated {} edges in {:.2}s",
        edges.len(),
        t.elapsed().as_secs_f64()
    );

    if from_text {
        let text = render_edge_list(&edges)?;
        drop(edges);
        let mut engine = CsrEngine::new(LoadOptions::unlimited());
        let report = engine
            .load_reader(Cursor::new(text), "generated")
            .with_context(|| format!("{}: loading rendered edge list failed", name))?;
        println!(
            "Parsed + built in {:.2}s ({} malformed, {} skipped)",
            report.elapsed.as_secs_f64(),
            report.malformed_lines,
            report.skipped_lines
        );
        bench_queries(engine.graph())
    } else {
        let t = Instant::now();
        let graph = CsrBuilder::new(node_count as usize)
            .with_edges(edges)
            .build()
            .with_context(|| format!("{}: CSR build failed", name))?;
        println!("Built CSR in {:.2}s", t.elapsed().as_secs_f64());
        bench_queries(&graph)
    }
}

fn bench_queries(graph: &CsrGraph) -> Result<()> {
    println!(
        "{} nodes, {} edges, ~{:.0}MB",
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // BFS from node 0 (typically a hub or root)
    println!();
    println!("{:>8} {:>12} {:>12} {:>10}", "depth", "found", "max dist", "time");
    println!("{:->8} {:->12} {:->12} {:->10}", "", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = bfs_neighborhood(graph, 0, depth);
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms",
            depth,
            result.len(),
            result.max_distance().unwrap_or(0),
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop if we already found everything
        if result.len() >= graph.node_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    let t = Instant::now();
    let top = degree_ranking(graph, 5);
    let elapsed = t.elapsed();
    println!("Top {} by out-degree ({:.1}ms):", top.len(), elapsed.as_secs_f64() * 1000.0);
    for d in &top {
        println!("  node {:>10}  degree {}", d.node_id, d.degree);
    }
    if let Some(hub) = max_degree_node(graph) {
        let t = Instant::now();
        let result = bfs_neighborhood(graph, hub.node_id, 2);
        println!(
            "BFS depth 2 from hub {}: {} nodes in {:.1}ms",
            hub.node_id,
            result.len(),
            t.elapsed().as_secs_f64() * 1000.0
        );
    }
    println!();
    Ok(())
}

fn render_edge_list(edges: &[(NodeId, NodeId)]) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(edges.len() * 16);
    writeln!(buf, "# generated by neuronet-bench")?;
    for (src, dst) in edges {
        writeln!(buf, "{}\t{}", src, dst)?;
    }
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// L-system fractal tree: each node spawns three children.
///
/// Deep paths (log depth) with exponential width.
fn gen_lsystem(node_count: u32) -> EdgeVec {
    let mut edges = Vec::with_capacity(node_count as usize);
    let branching = 3;

    let mut next_id: NodeId = 1;
    let mut frontier: Vec<NodeId> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                edges.push((parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Scale-free via edge-list sampling (O(edges), not O(n^2)).
///
/// Preferential attachment by picking a random existing edge endpoint, so
/// nodes with more edges are more likely to be picked.
fn gen_scale_free(node_count: u32) -> EdgeVec {
    let edges_per_node = 10u32;
    let cap = node_count as usize * edges_per_node as usize;
    let mut edges = Vec::with_capacity(cap);
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<NodeId> = Vec::with_capacity(cap * 2);

    // Seed: small clique
    let seed = 5u32.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push((i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                edges.push((new_node, target));
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    edges
}

/// Small-world (Watts-Strogatz): ring lattice with random rewiring.
///
/// High clustering with short path lengths.
fn gen_small_world(node_count: u32) -> EdgeVec {
    let k = 10u32;
    let p = 0.05f64;
    let n = node_count as u64;
    let mut edges = Vec::with_capacity(node_count as usize * k as usize);
    let mut rng = FastRng::new(67890);

    // Forward direction only to avoid double edges
    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = ((i as u64 + j as u64) % n) as NodeId;
            if rng.next_f64() < p {
                let rewired = rng.next(n) as NodeId;
                edges.push((i, if rewired != i { rewired } else { neighbor }));
            } else {
                edges.push((i, neighbor));
            }
        }
    }

    edges
}

/// Erdos-Renyi: about ten uniform random edges per node, no structure.
fn gen_random(node_count: u32) -> EdgeVec {
    let n = node_count as u64;
    let target_edges = n * 10;
    let mut edges = Vec::with_capacity(target_edges as usize);
    let mut rng = FastRng::new(54321);

    if n == 0 {
        return edges;
    }
    for _ in 0..target_edges {
        let from = rng.next(n) as NodeId;
        let to = rng.next(n) as NodeId;
        if from != to {
            edges.push((from, to));
        }
    }

    edges
}

/// Barbell: two dense clusters joined by a chain of ten bridge nodes.
///
/// Worst case for BFS that must squeeze through a bottleneck.
fn gen_barbell(node_count: u32) -> EdgeVec {
    let bridge_len = 10u32;
    let cluster = node_count.saturating_sub(bridge_len) / 2;
    let fan = 20u32.min(cluster.saturating_sub(1));
    let mut edges = Vec::with_capacity(cluster as usize * 40 + bridge_len as usize);
    let mut rng = FastRng::new(99999);

    if cluster == 0 {
        return gen_lsystem(node_count);
    }

    for i in 0..cluster {
        for _ in 0..fan {
            let target = rng.next(cluster as u64) as NodeId;
            if target != i {
                edges.push((i, target));
            }
        }
    }

    let bridge_start = cluster;
    edges.push((cluster - 1, bridge_start));
    for id in bridge_start + 1..bridge_start + bridge_len {
        edges.push((id - 1, id));
    }

    let b_start = bridge_start + bridge_len;
    edges.push((b_start - 1, b_start));
    for i in 0..cluster {
        for _ in 0..fan {
            let target = rng.next(cluster as u64) as NodeId;
            if target != i {
                edges.push((b_start + i, b_start + target));
            }
        }
    }

    edges
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a random node on a bounded "surface" of recent
/// additions, with occasional long-range jumps.
fn gen_dla(node_count: u32) -> EdgeVec {
    let mut edges = Vec::with_capacity(node_count as usize * 2);
    let mut rng = FastRng::new(77777);

    let surface_max = 10000usize;
    let mut surface: VecDeque<NodeId> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        edges.push((new_node, attach_to));

        // 10% chance of a second connection (loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node as u64) as NodeId;
            if other != attach_to {
                edges.push((new_node, other));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}
