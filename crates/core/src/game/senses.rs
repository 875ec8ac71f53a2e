//! Hazard clues and the non-random terminal predicates.

use strum::IntoEnumIterator;

use super::*;

impl GameSession {
    pub fn smell(&self) -> Option<Smell> {
        let location = self.player.location;
        let proximity = self.dungeon.proximity();
        let has_living_monster = |id: &NodeId| self.dungeon.node(*id).living_monster().is_some();

        if proximity.hazards_one_hop_from(location).any(|id| has_living_monster(&id)) {
            return Some(Smell::MorePungent);
        }
        match proximity.hazards_two_hops_from(location).filter(has_living_monster).count() {
            0 => None,
            1 => Some(Smell::Pungent),
            _ => Some(Smell::MorePungent),
        }
    }

    pub fn sound(&self) -> Option<Sound> {
        self.dungeon
            .proximity()
            .hazards_one_hop_from(self.player.location)
            .any(|id| self.dungeon.node(id).pit)
            .then_some(Sound::Crackling)
    }

    /// A pit swallows the player unless they carry at least one of every treasure type.
    pub fn is_fallen(&self) -> bool {
        self.dungeon.node(self.player.location).pit
            && Treasure::iter().any(|treasure| self.player.treasure_count(treasure) == 0)
    }

    pub fn is_reached_end(&self) -> bool {
        self.player.location == self.dungeon.end() && self.player.is_alive()
    }
}
