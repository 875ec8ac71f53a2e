//! Shared fixtures for the `game` test suite.
//! This module exists to avoid repeating hand-built dungeon layouts across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::mapgen::{Edge, Monster};
use crate::random::{FixedRandom, ScriptedRandom};

pub(super) fn session_over(
    rows: usize,
    columns: usize,
    wrapping: bool,
    edges: &[(NodeId, NodeId)],
) -> GameSession {
    session_with_random(rows, columns, wrapping, edges, Box::new(FixedRandom(0)))
}

pub(super) fn session_with_random(
    rows: usize,
    columns: usize,
    wrapping: bool,
    edges: &[(NodeId, NodeId)],
    random: Box<dyn RandomSource>,
) -> GameSession {
    let edges = edges.iter().map(|&(a, b)| Edge::new(a, b)).collect();
    let dungeon = Dungeon::from_edges(rows, columns, wrapping, edges, 0, rows * columns - 1);
    GameSession::from_dungeon(dungeon, random)
}

/// 0 -> 1 (straight tunnel) -> 2 (cave with exits west, east and south).
pub(super) fn straight_corridor() -> GameSession {
    session_over(5, 5, false, &[(0, 1), (1, 2), (2, 3), (2, 7)])
}

/// 0 -> 1 (tunnel bending south) -> 6 (straight tunnel) -> 11 (cave) -> 16 (dead-end cave).
pub(super) fn bending_corridor() -> GameSession {
    session_over(5, 5, false, &[(0, 1), (1, 6), (6, 11), (11, 12), (11, 16)])
}

/// Row 0 wraps into a ring of five tunnels.
pub(super) fn tunnel_ring() -> GameSession {
    session_over(5, 5, true, &[(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)])
}

/// Row 0 wraps into a ring of five caves, each with an extra exit south.
pub(super) fn cave_ring() -> GameSession {
    let mut edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)];
    edges.extend((0..5).map(|id| (id, id + 5)));
    session_over(5, 5, true, &edges)
}

pub(super) fn injured_monster() -> Monster {
    let mut monster = Monster::default();
    monster.take_hit();
    monster
}

pub(super) fn place_monster(session: &mut GameSession, at: NodeId, monster: Monster) {
    session.dungeon.node_mut(at).monster = Some(monster);
    session.dungeon.refresh_proximity();
}

pub(super) fn place_pit(session: &mut GameSession, at: NodeId) {
    session.dungeon.node_mut(at).pit = true;
    session.dungeon.refresh_proximity();
}

pub(super) fn scripted(values: &[usize]) -> Box<dyn RandomSource> {
    Box::new(ScriptedRandom::new(values.to_vec()))
}
