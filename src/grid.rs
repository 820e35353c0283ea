//! Rectangular grids of single-digit traversal costs and their graph form.
//!
//! Each cell is connected to its up/down/left/right neighbours; stepping onto a
//! cell costs that cell's digit.

use crate::dijkstra::{dijkstra_to, Path};
use crate::error::{Error, Result};
use crate::graph::Graph;
use std::str::FromStr;

/// `(x, y)`, with `(0, 0)` the top-left cell.
pub type Coord = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

/// Costs above 9 wrap around to 1, so every cost stays in `1..=9`.
fn wrap_around_nine(cost: u32) -> u32 {
    if cost > 9 {
        (cost - 1) % 9 + 1
    } else {
        cost
    }
}

impl Grid {
    pub fn parse(text: &str) -> Result<Self> {
        let mut width = 0;
        let mut cells = Vec::new();
        let mut height = 0;
        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let mut found = 0;
            for (column, ch) in line.chars().enumerate() {
                let digit = ch.to_digit(10).ok_or(Error::InvalidCell {
                    line: i + 1,
                    column: column + 1,
                    found: ch,
                })?;
                cells.push(digit);
                found += 1;
            }
            if height == 0 {
                width = found;
            } else if found != width {
                return Err(Error::RaggedRow {
                    line: i + 1,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }
        if height == 0 {
            return Err(Error::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, (x, y): Coord) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn bottom_right(&self) -> Coord {
        (self.width - 1, self.height - 1)
    }

    /// Repeat the grid `factor` times to the right and downwards. Every tile
    /// step right or down raises all costs by one, wrapping past 9 back to 1.
    pub fn tile(&self, factor: usize) -> Result<Self> {
        if factor == 0 {
            return Err(Error::ZeroTileFactor);
        }
        let width = self.width * factor;
        let height = self.height * factor;
        let mut cells = Vec::with_capacity(width * height);
        for tile_y in 0..factor {
            for y in 0..self.height {
                for tile_x in 0..factor {
                    for x in 0..self.width {
                        let cost = self.cells[y * self.width + x];
                        cells.push(wrap_around_nine(cost + (tile_x + tile_y) as u32));
                    }
                }
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    fn neighbors(&self, (x, y): Coord) -> impl Iterator<Item = Coord> + '_ {
        let left = x.checked_sub(1).map(|x| (x, y));
        let right = (x + 1 < self.width).then_some((x + 1, y));
        let up = y.checked_sub(1).map(|y| (x, y));
        let down = (y + 1 < self.height).then_some((x, y + 1));
        [left, right, up, down].into_iter().flatten()
    }

    /// Graph over all cells; the edge into a cell weighs that cell's cost.
    pub fn to_graph(&self) -> Graph<Coord, u32> {
        let mut graph = Graph::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let adjacent = self
                    .neighbors((x, y))
                    .map(|(nx, ny)| ((nx, ny), self.cells[ny * self.width + nx]))
                    .collect();
                graph.insert((x, y), adjacent);
            }
        }
        graph
    }

    /// Cheapest route from the top-left to the bottom-right cell. The start
    /// cell's own cost is never paid.
    pub fn cheapest_crossing(&self) -> Result<Option<Path<Coord, u32>>> {
        dijkstra_to(&self.to_graph(), &(0, 0), &self.bottom_right())
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
