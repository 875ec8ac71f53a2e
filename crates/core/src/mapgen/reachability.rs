//! Distance queries over the realized graph: start/end candidates and hazard proximity.
//! Searches are iterative and keep their frontier and depth bookkeeping local.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::types::{NodeId, NodeKind};

use super::grid::Edge;

/// Minimum number of moves between the start and end caves.
pub const MIN_START_END_DISTANCE: usize = 5;

pub(super) fn adjacency(node_count: usize, edges: &[Edge]) -> Vec<Vec<NodeId>> {
    let mut adjacency = vec![Vec::new(); node_count];
    for edge in edges {
        adjacency[edge.source].push(edge.dest);
        adjacency[edge.dest].push(edge.source);
    }
    for neighbors in &mut adjacency {
        neighbors.sort_unstable();
    }
    adjacency
}

/// Breadth-first distances from `origin` to every node no more than `max_depth` moves away,
/// `origin` itself included at distance zero.
pub(super) fn distances_within(
    adjacency: &[Vec<NodeId>],
    origin: NodeId,
    max_depth: usize,
) -> BTreeMap<NodeId, usize> {
    let mut distances = BTreeMap::from([(origin, 0)]);
    let mut open = VecDeque::from([origin]);

    while let Some(current) = open.pop_front() {
        let depth = distances[&current];
        if depth == max_depth {
            continue;
        }
        for &next in &adjacency[current] {
            if !distances.contains_key(&next) {
                distances.insert(next, depth + 1);
                open.push_back(next);
            }
        }
    }

    distances
}

/// Shortest path length, or `None` when `to` is more than `max_depth` moves away.
pub(super) fn bounded_distance(
    adjacency: &[Vec<NodeId>],
    from: NodeId,
    to: NodeId,
    max_depth: usize,
) -> Option<usize> {
    distances_within(adjacency, from, max_depth).get(&to).copied()
}

/// Every ordered pair of distinct caves at least `MIN_START_END_DISTANCE` moves apart.
///
/// Pairs are ordered by first cave id, then second cave id. Only the caves close to each cave
/// are stored, so large grids never materialize the full pair list.
#[derive(Clone, Debug)]
pub struct StartEndCandidates {
    caves: Vec<NodeId>,
    near: Vec<BTreeSet<NodeId>>,
    counts: Vec<usize>,
}

impl StartEndCandidates {
    pub(super) fn find(adjacency: &[Vec<NodeId>], kinds: &[NodeKind]) -> Self {
        let caves: Vec<NodeId> = kinds
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == NodeKind::Cave)
            .map(|(id, _)| id)
            .collect();

        let near: Vec<BTreeSet<NodeId>> = caves
            .iter()
            .map(|&cave| {
                distances_within(adjacency, cave, MIN_START_END_DISTANCE - 1)
                    .into_keys()
                    .filter(|id| kinds[*id] == NodeKind::Cave)
                    .collect()
            })
            .collect();

        let counts = near.iter().map(|close| caves.len() - close.len()).collect();
        Self { caves, near, counts }
    }

    pub fn len(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th pair in (start, end) order.
    pub fn pair_at(&self, mut index: usize) -> Option<(NodeId, NodeId)> {
        for (position, &count) in self.counts.iter().enumerate() {
            if index < count {
                let start = self.caves[position];
                let end = self
                    .caves
                    .iter()
                    .copied()
                    .filter(|cave| !self.near[position].contains(cave))
                    .nth(index)?;
                return Some((start, end));
            }
            index -= count;
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.caves.iter().enumerate().flat_map(move |(position, &start)| {
            self.caves
                .iter()
                .copied()
                .filter(move |cave| !self.near[position].contains(cave))
                .map(move |end| (start, end))
        })
    }
}

/// For each hazard node, the nodes exactly one and exactly two moves away.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Proximity {
    one_hop: BTreeMap<NodeId, BTreeSet<NodeId>>,
    two_hop: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Proximity {
    pub(super) fn compute(
        adjacency: &[Vec<NodeId>],
        hazards: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        let mut proximity = Self::default();
        for hazard in hazards {
            let mut one_hop = BTreeSet::new();
            let mut two_hop = BTreeSet::new();
            for (node, distance) in distances_within(adjacency, hazard, 2) {
                match distance {
                    1 => {
                        one_hop.insert(node);
                    }
                    2 => {
                        two_hop.insert(node);
                    }
                    _ => {}
                }
            }
            proximity.one_hop.insert(hazard, one_hop);
            proximity.two_hop.insert(hazard, two_hop);
        }
        proximity
    }

    pub fn one_hop(&self, hazard: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.one_hop.get(&hazard)
    }

    pub fn two_hop(&self, hazard: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.two_hop.get(&hazard)
    }

    /// Hazard nodes exactly one move from `node`.
    pub fn hazards_one_hop_from(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.one_hop.iter().filter(move |(_, near)| near.contains(&node)).map(|(hazard, _)| *hazard)
    }

    /// Hazard nodes exactly two moves from `node`.
    pub fn hazards_two_hops_from(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.two_hop.iter().filter(move |(_, near)| near.contains(&node)).map(|(hazard, _)| *hazard)
    }
}
