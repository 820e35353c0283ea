//! Error type shared by the search, the graph builders and the loaders.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The source node is not a key of the graph
    #[error("node {0} not found in graph")]
    NodeNotFound(String),
    /// An edge weight below zero was found by an eager check
    #[error("negative weight on edge {from} -> {to}")]
    NegativeWeight { from: String, to: String },
    /// The caller-imposed cap on finalized nodes was hit
    #[error("search stopped after finalizing {0} nodes")]
    ExpansionLimit(usize),
    #[error("grid is empty")]
    EmptyGrid,
    /// A grid can only be repeated a positive number of times
    #[error("tile factor must be at least 1")]
    ZeroTileFactor,
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column {column}: {found:?} is not a digit")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },
    #[error("line {line}: expected from,to,weight fields, found {found}")]
    MissingFields { line: u64, found: usize },
    #[error("line {line}: invalid weight {value:?}")]
    InvalidWeight { line: u64, value: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
