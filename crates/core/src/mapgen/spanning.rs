//! Randomized Kruskal construction plus re-admission of extra edges.

use std::mem;

use tracing::debug;

use crate::error::ConfigError;
use crate::random::{RandomSource, take_random};
use crate::types::NodeId;

use super::grid::Edge;

/// Disjoint-set forest over node ids with path halving and union by size.
pub(super) struct UnionFind {
    parent: Vec<NodeId>,
    size: Vec<usize>,
}

impl UnionFind {
    pub(super) fn new(count: usize) -> Self {
        Self { parent: (0..count).collect(), size: vec![1; count] }
    }

    pub(super) fn find(&mut self, mut node: NodeId) -> NodeId {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Merges the two sets; returns `false` when they were already joined.
    pub(super) fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if self.size[root_a] < self.size[root_b] {
            mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct SpanningTree {
    pub(super) edges: Vec<Edge>,
    pub(super) remaining: Vec<Edge>,
}

/// Draws candidates uniformly at random (not by weight) until the pool is empty.
pub(super) fn build_spanning_tree(
    mut candidates: Vec<Edge>,
    node_count: usize,
    random: &mut dyn RandomSource,
) -> SpanningTree {
    let mut sets = UnionFind::new(node_count);
    let mut edges = Vec::with_capacity(node_count.saturating_sub(1));
    let mut remaining = Vec::with_capacity(candidates.len().saturating_sub(node_count));

    while let Some(edge) = take_random(random, &mut candidates) {
        if sets.union(edge.source, edge.dest) {
            edges.push(edge);
        } else {
            remaining.push(edge);
        }
    }

    debug!(tree_edges = edges.len(), remaining_edges = remaining.len(), "spanning tree built");
    SpanningTree { edges, remaining }
}

/// Moves exactly `interconnectivity` random leftover edges into the tree.
pub(super) fn promote_extra_edges(
    tree: &mut SpanningTree,
    interconnectivity: u32,
    random: &mut dyn RandomSource,
) -> Result<(), ConfigError> {
    let requested = interconnectivity as usize;
    if requested > tree.remaining.len() {
        return Err(ConfigError::InterconnectivityTooHigh {
            requested: interconnectivity,
            available: tree.remaining.len(),
        });
    }

    for _ in 0..requested {
        if let Some(edge) = take_random(random, &mut tree.remaining) {
            tree.edges.push(edge);
        }
    }
    Ok(())
}
