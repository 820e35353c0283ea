use anyhow::{Context, Result};
use aoc_sssp::grid::Grid;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "grid")]
#[command(about = "Find the cheapest route across a grid of digit costs, from the top-left to the bottom-right cell.", long_about = None)]
struct Cli {
    /// Text file with one row of digits per line
    input: PathBuf,

    /// Repeat the grid this many times in each direction, raising costs by one per tile
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    tiles: u64,

    /// Also print the cells along the route
    #[arg(long, default_value_t = false)]
    show_path: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let mut grid: Grid = text
        .parse()
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    if cli.tiles > 1 {
        grid = grid.tile(cli.tiles as usize)?;
    }
    info!("Grid: {} x {} cells", grid.width(), grid.height());

    let now = Instant::now();
    let path = grid.cheapest_crossing()?;
    info!("search took {:.3} ms", now.elapsed().as_secs_f64() * 1000.0);

    match path {
        Some(path) => {
            println!("{}", path.cost);
            if cli.show_path {
                for (x, y) in &path.nodes {
                    println!("{},{}", x, y);
                }
            }
        }
        // Every cell of a rectangular grid is reachable.
        None => anyhow::bail!("bottom-right cell is unreachable"),
    }

    Ok(())
}
