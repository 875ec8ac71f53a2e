//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from action handling.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl GameSession {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(&self.dungeon.canonical_bytes());
        hasher.write_u64(self.player.location as u64);
        hasher.write_u64(self.player.previous_location as u64);
        hasher.write_u8(self.player.health);
        hasher.write_u64(self.player.arrows as u64);
        hasher.write_u64(self.player.treasure.len() as u64);
        for unit in &self.player.treasure {
            hasher.write_u8(*unit as u8);
        }
        hasher.write_u64(self.moves_made);
        hasher.write_u8(match self.terminal {
            None | Some(SessionStatus::InProgress) => 0,
            Some(SessionStatus::ReachedEnd) => 1,
            Some(SessionStatus::Killed) => 2,
            Some(SessionStatus::Fallen) => 3,
        });
        hasher.finish()
    }
}
