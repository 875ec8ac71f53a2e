//! High-level dungeon generation that composes topology, spanning tree, classification,
//! start/end selection and entity placement.

use tracing::info;

use crate::config::DungeonConfig;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::types::NodeKind;

use super::classify::classify_nodes;
use super::grid::candidate_edges;
use super::model::Dungeon;
use super::reachability::{Proximity, StartEndCandidates, adjacency};
use super::spanning::{build_spanning_tree, promote_extra_edges};
use super::spawns::{SpawnContext, place_entities};

pub struct DungeonGenerator {
    config: DungeonConfig,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn generate(&self, random: &mut dyn RandomSource) -> Result<Dungeon, ConfigError> {
        let config = &self.config;
        config.validate()?;

        let rows = config.rows as usize;
        let columns = config.columns as usize;
        let node_count = config.node_count();

        let candidates = candidate_edges(config.rows, config.columns, config.wrapping)?;
        let mut tree = build_spanning_tree(candidates, node_count, random);
        promote_extra_edges(&mut tree, config.interconnectivity, random)?;

        let mut nodes = classify_nodes(&tree.edges, rows, columns);
        let graph = adjacency(node_count, &tree.edges);
        let kinds: Vec<NodeKind> = nodes.iter().map(|node| node.kind).collect();

        let too_small = ConfigError::DungeonTooSmall { rows: config.rows, columns: config.columns };
        let pairs = StartEndCandidates::find(&graph, &kinds);
        if pairs.is_empty() {
            return Err(too_small);
        }
        let (start, end) = pairs.pair_at(random.next_below(pairs.len())).ok_or(too_small)?;

        let context = SpawnContext { config, start, end };
        let summary = place_entities(&context, &mut nodes, random);

        info!(
            rows,
            columns,
            wrapping = config.wrapping,
            edges = tree.edges.len(),
            start,
            end,
            candidate_pairs = pairs.len(),
            monsters = summary.monsters,
            pits = summary.pits,
            "dungeon generated"
        );

        let mut dungeon = Dungeon {
            rows,
            columns,
            wrapping: config.wrapping,
            nodes,
            edges: tree.edges,
            start,
            end,
            proximity: Proximity::default(),
        };
        dungeon.refresh_proximity();
        Ok(dungeon)
    }
}
