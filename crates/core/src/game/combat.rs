//! Arrow flight and monster encounters.
//! This module exists to keep ballistic tracing and the kill roll apart from inventory code.
//! It does not own hazard sensing or terminal status ordering.

use std::collections::BTreeMap;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// The arrow came to rest in a cave holding a living monster.
    Hit { location: NodeId, monster_health: u8 },
    /// The arrow stopped at `location` without striking anything.
    Missed { location: NodeId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flight {
    Landed(NodeId),
    Blocked(NodeId),
}

impl GameSession {
    /// Fires one arrow that must pass through `distance` caves. Tunnels are traversed for free
    /// and bend the flight along their other exit.
    pub fn shoot_arrow(
        &mut self,
        distance: u32,
        direction: Direction,
    ) -> Result<ShotOutcome, ActionError> {
        if distance == 0 {
            return Err(ActionError::InvalidShotDistance { distance });
        }
        if self.player.arrows == 0 {
            return Err(ActionError::OutOfArrows);
        }
        self.player.arrows -= 1;

        let outcome = match self.trace_arrow(distance, direction) {
            Flight::Landed(location) => match self.dungeon.node_mut(location).monster.as_mut() {
                Some(monster) if monster.is_alive() => {
                    monster.take_hit();
                    ShotOutcome::Hit { location, monster_health: monster.health() }
                }
                _ => ShotOutcome::Missed { location },
            },
            Flight::Blocked(location) => ShotOutcome::Missed { location },
        };
        debug!(distance, %direction, ?outcome, "arrow resolved");
        Ok(outcome)
    }

    fn trace_arrow(&self, distance: u32, direction: Direction) -> Flight {
        let mut current = self.player.location;
        let mut heading = direction;
        let mut remaining = distance;
        // Remaining distance on first entry to each (node, heading) state.
        let mut seen: BTreeMap<(NodeId, Direction), u32> = BTreeMap::new();

        loop {
            if !self.dungeon.node(current).exits.has(heading) {
                return Flight::Blocked(current);
            }
            current = self.dungeon.step(current, heading);

            if let Some(&before) = seen.get(&(current, heading)) {
                let caves_per_lap = before - remaining;
                if caves_per_lap == 0 {
                    // Closed loop of tunnels.
                    return Flight::Blocked(current);
                }
                remaining = match remaining % caves_per_lap {
                    0 => caves_per_lap,
                    rest => rest,
                };
                seen.clear();
            }
            seen.insert((current, heading), remaining);

            let node = self.dungeon.node(current);
            if node.is_cave() {
                remaining -= 1;
                if remaining == 0 {
                    return Flight::Landed(current);
                }
            } else if let Some(exit) =
                node.exits.directions().into_iter().find(|&exit| exit != heading.opposite())
            {
                heading = exit;
            }
        }
    }

    /// Resolves an encounter with the monster at the player's node.
    ///
    /// A healthy monster always kills. An injured one kills on a fair coin flip that leaves the
    /// player's health untouched, so the check can be rolled again.
    pub fn is_killed(&mut self) -> bool {
        let Some(monster) = self.dungeon.node(self.player.location).living_monster().copied()
        else {
            return false;
        };

        if monster.is_injured() {
            self.random.next_below(2) == 0
        } else {
            self.player.health = 0;
            true
        }
    }
}
