//! Dungeon build parameters and their validation bounds.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_DIMENSION: u32 = 5;
pub const MAX_DIMENSION: u32 = 100;
pub const MAX_PERCENTAGE: u32 = 100;
pub const MIN_MONSTERS: u32 = 1;
pub const MAX_MONSTERS: u32 = 20;
pub const MAX_THIEVES: u32 = 10;
pub const MAX_PITS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DungeonConfig {
    pub rows: u32,
    pub columns: u32,
    pub wrapping: bool,
    pub interconnectivity: u32,
    pub treasure_percentage: u32,
    pub monsters: u32,
    pub thieves: u32,
    pub pits: u32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            columns: 8,
            wrapping: false,
            interconnectivity: 0,
            treasure_percentage: 20,
            monsters: 1,
            thieves: 1,
            pits: 1,
        }
    }
}

impl DungeonConfig {
    pub fn node_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Checks every numeric bound; the first violation is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("rows", self.rows, MIN_DIMENSION, MAX_DIMENSION)?;
        check_range("columns", self.columns, MIN_DIMENSION, MAX_DIMENSION)?;
        check_range("treasure_percentage", self.treasure_percentage, 0, MAX_PERCENTAGE)?;
        check_range("monsters", self.monsters, MIN_MONSTERS, MAX_MONSTERS)?;
        check_range("thieves", self.thieves, 0, MAX_THIEVES)?;
        check_range("pits", self.pits, 0, MAX_PITS)?;
        Ok(())
    }
}

pub(crate) fn check_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}
