//! Player movement along realized edges.

use super::*;

impl GameSession {
    /// Moves one node in `direction`, wrapping at the grid borders, and returns the new location.
    pub fn move_player(&mut self, direction: Direction) -> Result<NodeId, ActionError> {
        let location = self.player.location;
        if !self.dungeon.node(location).exits().has(direction) {
            return Err(ActionError::IllegalMove { location, direction });
        }

        let destination = self.dungeon.step(location, direction);
        self.player.previous_location = location;
        self.player.location = destination;
        self.moves_made += 1;
        Ok(destination)
    }

    /// Directions the player can currently move in.
    pub fn available_moves(&self) -> Vec<Direction> {
        self.dungeon.node(self.player.location).exits().directions()
    }
}
