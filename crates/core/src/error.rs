//! Error types for dungeon construction and per-action failures.

use thiserror::Error;

use crate::game::ActionOutcome;
use crate::types::{Direction, NodeId, Treasure};

/// Fatal problems detected while building a dungeon. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange { field: &'static str, value: u32, min: u32, max: u32 },

    #[error("interconnectivity {requested} exceeds the {available} spare edges")]
    InterconnectivityTooHigh { requested: u32, available: usize },

    #[error("a {rows}x{columns} dungeon has no pair of caves at least 5 moves apart")]
    DungeonTooSmall { rows: u32, columns: u32 },
}

/// Recoverable action failures. The session is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("cannot move {direction} from location {location}")]
    IllegalMove { location: NodeId, direction: Direction },

    #[error("no {treasure} at location {location}")]
    TreasureNotFound { location: NodeId, treasure: Treasure },

    #[error("no arrows at location {location}")]
    NoArrowsHere { location: NodeId },

    #[error("out of arrows")]
    OutOfArrows,

    #[error("shot distance must be at least 1, got {distance}")]
    InvalidShotDistance { distance: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("journal format version {found} is not supported (expected {expected})")]
    UnsupportedFormat { found: u16, expected: u16 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("action {seq} was rejected")]
    Action {
        seq: u64,
        #[source]
        source: ActionError,
    },

    #[error("action {seq} produced {replayed:?} but the journal recorded {recorded:?}")]
    Diverged { seq: u64, recorded: ActionOutcome, replayed: ActionOutcome },
}
