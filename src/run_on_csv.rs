use anyhow::{Context, Result};
use aoc_sssp::edge_list::{read_edge_list_path, write_distances};
use aoc_sssp::graph::edge_count;
use aoc_sssp::{dijkstra, dijkstra_to, dijkstra_with_limit};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "csv")]
#[command(about = "Build a graph from a CSV with from,to,weight rows and run Dijkstra from a source node id.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: String,

    /// Source node id to run from
    #[arg(short, long)]
    source: String,

    /// Only report the shortest path to this node
    #[arg(short, long)]
    target: Option<String>,

    /// Output CSV (node_id, distance, predecessor). If omitted, writes to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Treat every row as an edge in both directions
    #[arg(long, default_value_t = false)]
    undirected: bool,

    /// Include unreachable nodes in output with infinite distance
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,

    /// Give up after finalizing this many nodes
    #[arg(long)]
    max_expansions: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init();

    let graph = read_edge_list_path(&cli.csv, cli.undirected)
        .with_context(|| format!("reading {}", &cli.csv))?;
    info!("Graph: {} nodes, {} directed edges", graph.len(), edge_count(&graph));

    let now = Instant::now();
    if let Some(target) = &cli.target {
        let path = dijkstra_to(&graph, &cli.source, target)?;
        info!("search took {:.3} ms", now.elapsed().as_secs_f64() * 1000.0);
        match path {
            Some(path) => println!("{} ({})", path.cost, path.nodes.join(" -> ")),
            None => println!("{} is unreachable from {}", target, cli.source),
        }
        return Ok(());
    }

    let paths = match cli.max_expansions {
        Some(max) => dijkstra_with_limit(&graph, &cli.source, max)?,
        None => dijkstra(&graph, &cli.source)?,
    };
    info!("search took {:.3} ms", now.elapsed().as_secs_f64() * 1000.0);
    info!("Reachable from {}: {}", cli.source, paths.distances().len());

    let written = match &cli.out {
        Some(out_path) => {
            let file =
                File::create(out_path).with_context(|| format!("creating CSV {}", out_path))?;
            write_distances(file, &graph, &paths, cli.include_unreachable)?
        }
        None => write_distances(io::stdout().lock(), &graph, &paths, cli.include_unreachable)?,
    };
    info!("Wrote distances for {} nodes", written);

    Ok(())
}
