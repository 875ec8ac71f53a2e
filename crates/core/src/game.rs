//! Player-facing session over one generated dungeon.
//! This module exists to own the single mutable playthrough state and its action API.
//! It does not own generation, rendering or journal persistence.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DungeonConfig;
use crate::error::{ActionError, ConfigError};
use crate::journal::Action;
use crate::mapgen::{Dungeon, generate_dungeon};
use crate::random::{RandomSource, SeededRandom};
use crate::types::*;

mod combat;
mod hash;
mod items;
mod movement;
mod senses;
mod snapshot;

pub use combat::ShotOutcome;
pub use snapshot::SessionSnapshot;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub location: NodeId,
    pub previous_location: NodeId,
    pub health: u8,
    pub treasure: Vec<Treasure>,
    pub arrows: usize,
}

impl Player {
    fn at(location: NodeId) -> Self {
        Self {
            location,
            previous_location: location,
            health: PLAYER_FULL_HEALTH,
            treasure: Vec::new(),
            arrows: STARTING_ARROWS,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn treasure_count(&self, treasure: Treasure) -> usize {
        self.treasure.iter().filter(|&&unit| unit == treasure).count()
    }
}

/// Result of one successfully applied [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Moved { from: NodeId, to: NodeId },
    PickedTreasure(Treasure),
    PickedArrow,
    Shot(ShotOutcome),
    Robbery { stolen: bool },
    Status(SessionStatus),
}

pub struct GameSession {
    dungeon: Dungeon,
    player: Player,
    random: Box<dyn RandomSource>,
    moves_made: u64,
    terminal: Option<SessionStatus>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("player", &self.player)
            .field("moves_made", &self.moves_made)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Generates a dungeon from `config` and places the player at its start cave.
    /// The same source keeps driving in-play randomness afterwards.
    pub fn build<R: RandomSource + 'static>(
        config: &DungeonConfig,
        random: R,
    ) -> Result<Self, ConfigError> {
        let mut random: Box<dyn RandomSource> = Box::new(random);
        let dungeon = generate_dungeon(config, random.as_mut())?;
        Ok(Self::from_dungeon(dungeon, random))
    }

    pub fn new_seeded(config: &DungeonConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, SeededRandom::new(seed))
    }

    pub(crate) fn from_dungeon(dungeon: Dungeon, random: Box<dyn RandomSource>) -> Self {
        let player = Player::at(dungeon.start());
        Self { dungeon, player, random, moves_made: 0, terminal: None }
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn location(&self) -> NodeId {
        self.player.location
    }

    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    /// Resolves the terminal predicates in a fixed order: killed, fallen, reached end.
    /// Once a terminal status is reported it sticks, so the injured-monster roll happens at
    /// most once per call and never after the session is over.
    pub fn status(&mut self) -> SessionStatus {
        if let Some(terminal) = self.terminal {
            return terminal;
        }

        let status = if !self.player.is_alive() || self.is_killed() {
            SessionStatus::Killed
        } else if self.is_fallen() {
            SessionStatus::Fallen
        } else if self.is_reached_end() {
            SessionStatus::ReachedEnd
        } else {
            SessionStatus::InProgress
        };

        if status != SessionStatus::InProgress {
            debug!(?status, location = self.player.location, "session finished");
            self.terminal = Some(status);
        }
        status
    }

    pub fn is_over(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn apply(&mut self, action: &Action) -> Result<ActionOutcome, ActionError> {
        let outcome = match *action {
            Action::Move { direction } => {
                let from = self.player.location;
                let to = self.move_player(direction)?;
                ActionOutcome::Moved { from, to }
            }
            Action::PickTreasure { treasure } => {
                self.pick_treasure(treasure)?;
                ActionOutcome::PickedTreasure(treasure)
            }
            Action::PickArrow => {
                self.pick_arrow()?;
                ActionOutcome::PickedArrow
            }
            Action::Shoot { distance, direction } => {
                ActionOutcome::Shot(self.shoot_arrow(distance, direction)?)
            }
            Action::CheckTreasureStolen { elapsed_ms } => ActionOutcome::Robbery {
                stolen: self.check_treasure_stolen(Action::elapsed(elapsed_ms)),
            },
            Action::CheckStatus => ActionOutcome::Status(self.status()),
        };
        debug!(?action, ?outcome, "action applied");
        Ok(outcome)
    }
}

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests;
