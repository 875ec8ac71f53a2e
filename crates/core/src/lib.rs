pub mod config;
pub mod error;
pub mod game;
pub mod journal;
pub mod journal_file;
pub mod mapgen;
pub mod random;
pub mod render;
pub mod replay;
pub mod types;

pub use config::DungeonConfig;
pub use error::{ActionError, ConfigError, ReplayError};
pub use game::{ActionOutcome, GameSession, Player, SessionSnapshot, ShotOutcome};
pub use journal::{Action, ActionJournal, ActionRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use mapgen::{Dungeon, DungeonGenerator, generate_dungeon};
pub use random::{FixedRandom, RandomSource, ScriptedRandom, SeededRandom};
pub use render::{render_dungeon, render_with_player};
pub use replay::*;
pub use types::*;
