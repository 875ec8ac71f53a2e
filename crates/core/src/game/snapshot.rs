//! Immutable read-only view of the session for presentation layers.

use super::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub location: NodeId,
    pub kind: NodeKind,
    pub position: Pos,
    pub exits: Vec<Direction>,
    pub treasure_here: Vec<Treasure>,
    pub arrows_here: usize,
    /// Health of the monster at this node, dead ones included.
    pub monster_health: Option<u8>,
    pub thief: bool,
    pub pit: bool,
    pub smell: Option<Smell>,
    pub sound: Option<Sound>,
    pub player_treasure: Vec<Treasure>,
    pub player_arrows: usize,
    pub player_health: u8,
    pub moves_made: u64,
    pub start: NodeId,
    pub end: NodeId,
    /// Last terminal status reported by [`GameSession::status`], if any.
    pub status: SessionStatus,
}

impl GameSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        let location = self.player.location;
        let node = self.dungeon.node(location);
        SessionSnapshot {
            location,
            kind: node.kind,
            position: self.dungeon.position(location),
            exits: node.exits.directions(),
            treasure_here: node.treasure.clone(),
            arrows_here: node.arrows,
            monster_health: node.monster.map(|monster| monster.health()),
            thief: node.thief,
            pit: node.pit,
            smell: self.smell(),
            sound: self.sound(),
            player_treasure: self.player.treasure.clone(),
            player_arrows: self.player.arrows,
            player_health: self.player.health,
            moves_made: self.moves_made,
            start: self.dungeon.start(),
            end: self.dungeon.end(),
            status: self.terminal.unwrap_or(SessionStatus::InProgress),
        }
    }
}
