//! Candidate edge set for a rectangular grid, optionally wrapping at the borders.

use crate::config::{MAX_DIMENSION, MIN_DIMENSION, check_range};
use crate::error::ConfigError;
use crate::types::NodeId;

/// Undirected connection between two grid cells. `source` is always the lower id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub dest: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { source: a.min(b), dest: a.max(b) }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.dest == node
    }
}

/// Every edge the spanning tree may choose from.
///
/// Order is significant for reproducibility: horizontal edges row by row, then vertical edges
/// row by row, then (with wrapping) one border edge per row followed by one per column.
pub(super) fn candidate_edges(
    rows: u32,
    columns: u32,
    wrapping: bool,
) -> Result<Vec<Edge>, ConfigError> {
    check_range("rows", rows, MIN_DIMENSION, MAX_DIMENSION)?;
    check_range("columns", columns, MIN_DIMENSION, MAX_DIMENSION)?;

    let rows = rows as usize;
    let columns = columns as usize;
    let mut edges = Vec::with_capacity(expected_edge_count(rows, columns, wrapping));

    for row in 0..rows {
        for col in 0..(columns - 1) {
            let id = row * columns + col;
            edges.push(Edge::new(id, id + 1));
        }
    }
    for row in 0..(rows - 1) {
        for col in 0..columns {
            let id = row * columns + col;
            edges.push(Edge::new(id, id + columns));
        }
    }

    if wrapping {
        for row in 0..rows {
            edges.push(Edge::new(row * columns, row * columns + columns - 1));
        }
        for col in 0..columns {
            edges.push(Edge::new(col, (rows - 1) * columns + col));
        }
    }

    Ok(edges)
}

pub(super) fn expected_edge_count(rows: usize, columns: usize, wrapping: bool) -> usize {
    let interior = rows * (columns - 1) + columns * (rows - 1);
    if wrapping { interior + rows + columns } else { interior }
}
