//! Pickups and the thief check.

use std::time::Duration;

use super::*;

/// Time the player may linger after leaving a thief's tunnel before being robbed.
pub const ROBBERY_GRACE: Duration = Duration::from_millis(5_000);

impl GameSession {
    pub fn pick_treasure(&mut self, treasure: Treasure) -> Result<(), ActionError> {
        let location = self.player.location;
        let node = self.dungeon.node_mut(location);
        let Some(index) = node.treasure.iter().position(|&unit| unit == treasure) else {
            return Err(ActionError::TreasureNotFound { location, treasure });
        };
        node.treasure.remove(index);
        self.player.treasure.push(treasure);
        Ok(())
    }

    pub fn pick_arrow(&mut self) -> Result<(), ActionError> {
        let location = self.player.location;
        let node = self.dungeon.node_mut(location);
        if node.arrows == 0 {
            return Err(ActionError::NoArrowsHere { location });
        }
        node.arrows -= 1;
        self.player.arrows += 1;
        Ok(())
    }

    /// Robs the player of all treasure and arrows when more than [`ROBBERY_GRACE`] has passed
    /// since the last move and the node they came from hosts a thief.
    pub fn check_treasure_stolen(&mut self, elapsed: Duration) -> bool {
        let previous = self.player.previous_location;
        if elapsed <= ROBBERY_GRACE || !self.dungeon.node(previous).thief {
            return false;
        }

        debug!(
            previous,
            treasure = self.player.treasure.len(),
            arrows = self.player.arrows,
            "player robbed"
        );
        self.player.treasure.clear();
        self.player.arrows = 0;
        true
    }
}
