use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::types::{Direction, Treasure};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionJournal {
    pub format_version: u16,
    pub seed: u64,
    pub config: DungeonConfig,
    pub actions: Vec<ActionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seq: u64,
    pub action: Action,
}

/// Every state-changing request a session accepts, including the random status roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move { direction: Direction },
    PickTreasure { treasure: Treasure },
    PickArrow,
    Shoot { distance: u32, direction: Direction },
    CheckTreasureStolen { elapsed_ms: u64 },
    CheckStatus,
}

impl Action {
    pub fn elapsed(elapsed_ms: u64) -> Duration {
        Duration::from_millis(elapsed_ms)
    }

    pub fn check_treasure_stolen(elapsed: Duration) -> Self {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        Self::CheckTreasureStolen { elapsed_ms }
    }
}

impl ActionJournal {
    pub fn new(seed: u64, config: DungeonConfig) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, config, actions: Vec::new() }
    }

    pub fn next_seq(&self) -> u64 {
        self.actions.len() as u64
    }

    pub fn append(&mut self, action: Action) {
        let seq = self.next_seq();
        self.actions.push(ActionRecord { seq, action });
    }
}
