//! Procedural dungeon generation split into coherent submodules.

pub mod model;

mod classify;
mod generator;
mod grid;
mod reachability;
mod spanning;
mod spawns;

pub use generator::DungeonGenerator;
pub use grid::Edge;
pub use model::{Dungeon, Monster, Node};
pub use reachability::{MIN_START_END_DISTANCE, Proximity, StartEndCandidates};
pub use spawns::PlacementSummary;

use crate::config::DungeonConfig;
use crate::error::ConfigError;
use crate::random::RandomSource;

pub fn generate_dungeon(
    config: &DungeonConfig,
    random: &mut dyn RandomSource,
) -> Result<Dungeon, ConfigError> {
    DungeonGenerator::new(config.clone()).generate(random)
}
