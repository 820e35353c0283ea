//! Single-source shortest paths (Dijkstra with a lazily-pruned binary heap) over
//! graphs keyed by any hashable node type, plus builders that turn digit grids
//! and CSV edge lists into such graphs.

pub mod cost;
pub mod dijkstra;
pub mod edge_list;
pub mod error;
pub mod graph;
pub mod grid;

pub use cost::Cost;
pub use dijkstra::{dijkstra, dijkstra_checked, dijkstra_to, dijkstra_with_limit, Path, ShortestPaths};
pub use error::{Error, Result};
pub use graph::Graph;
