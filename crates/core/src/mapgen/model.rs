//! Public data model for a generated dungeon: the node arena and its realized edges.

use crate::types::{
    Direction, Exits, MONSTER_FULL_HEALTH, MONSTER_INJURED_HEALTH, NodeId, NodeKind, Pos, Treasure,
};

use super::grid::Edge;
use super::reachability::{Proximity, adjacency};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Monster {
    health: u8,
}

impl Default for Monster {
    fn default() -> Self {
        Self { health: MONSTER_FULL_HEALTH }
    }
}

impl Monster {
    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_injured(&self) -> bool {
        self.health == MONSTER_INJURED_HEALTH
    }

    /// 100 -> 50 -> 0. Further hits on a dead monster change nothing.
    pub(crate) fn take_hit(&mut self) {
        self.health = match self.health {
            MONSTER_FULL_HEALTH => MONSTER_INJURED_HEALTH,
            _ => 0,
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub exits: Exits,
    pub kind: NodeKind,
    pub treasure: Vec<Treasure>,
    pub monster: Option<Monster>,
    pub thief: bool,
    pub pit: bool,
    pub arrows: usize,
}

impl Node {
    pub(super) fn new(id: NodeId, exits: Exits) -> Self {
        let kind = if exits.degree() == 2 { NodeKind::Tunnel } else { NodeKind::Cave };
        Self {
            id,
            exits,
            kind,
            treasure: Vec::new(),
            monster: None,
            thief: false,
            pit: false,
            arrows: 0,
        }
    }

    pub fn exits(&self) -> Exits {
        self.exits
    }

    pub fn is_cave(&self) -> bool {
        self.kind == NodeKind::Cave
    }

    pub fn is_tunnel(&self) -> bool {
        self.kind == NodeKind::Tunnel
    }

    pub fn living_monster(&self) -> Option<&Monster> {
        self.monster.as_ref().filter(|monster| monster.is_alive())
    }

    pub fn treasure_count(&self, treasure: Treasure) -> usize {
        self.treasure.iter().filter(|&&unit| unit == treasure).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    pub(crate) wrapping: bool,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) start: NodeId,
    pub(crate) end: NodeId,
    pub(crate) proximity: Proximity,
}

impl Dungeon {
    /// Assembles a dungeon over hand-picked edges with empty node contents.
    #[cfg(test)]
    pub(crate) fn from_edges(
        rows: usize,
        columns: usize,
        wrapping: bool,
        edges: Vec<Edge>,
        start: NodeId,
        end: NodeId,
    ) -> Self {
        use super::classify::classify_nodes;

        let nodes = classify_nodes(&edges, rows, columns);
        Self { rows, columns, wrapping, nodes, edges, start, end, proximity: Proximity::default() }
    }

    /// Recomputes the hazard rings from the nodes currently holding a monster or a pit.
    pub(crate) fn refresh_proximity(&mut self) {
        let graph = adjacency(self.nodes.len(), &self.edges);
        let hazards = self
            .nodes
            .iter()
            .filter(|node| node.monster.is_some() || node.pit)
            .map(|node| node.id);
        self.proximity = Proximity::compute(&graph, hazards);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_wrapping(&self) -> bool {
        self.wrapping
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn proximity(&self) -> &Proximity {
        &self.proximity
    }

    pub fn position(&self, id: NodeId) -> Pos {
        Pos { row: id / self.columns, col: id % self.columns }
    }

    /// Cell one step away in `direction`, wrapping indices at the grid borders.
    /// Does not check whether an edge actually exists.
    pub fn step(&self, id: NodeId, direction: Direction) -> NodeId {
        let Pos { row, col } = self.position(id);
        let (row, col) = match direction {
            Direction::North => ((row + self.rows - 1) % self.rows, col),
            Direction::South => ((row + 1) % self.rows, col),
            Direction::East => (row, (col + 1) % self.columns),
            Direction::West => (row, (col + self.columns - 1) % self.columns),
        };
        row * self.columns + col
    }

    /// Nodes reachable in one move, in North, South, East, West order.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id]
            .exits
            .directions()
            .into_iter()
            .map(|direction| self.step(id, direction))
            .collect()
    }

    pub fn cave_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_cave()).count()
    }

    pub fn tunnel_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_tunnel()).count()
    }

    /// Stable byte encoding of the layout and every node's contents.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.rows as u32).to_le_bytes());
        bytes.extend((self.columns as u32).to_le_bytes());
        bytes.push(u8::from(self.wrapping));
        bytes.extend((self.start as u32).to_le_bytes());
        bytes.extend((self.end as u32).to_le_bytes());

        for node in &self.nodes {
            bytes.push(node.exits.bits());
            bytes.push(match node.kind {
                NodeKind::Cave => 0,
                NodeKind::Tunnel => 1,
            });
            bytes.extend((node.treasure.len() as u32).to_le_bytes());
            for unit in &node.treasure {
                bytes.push(match unit {
                    Treasure::Diamond => 0,
                    Treasure::Ruby => 1,
                    Treasure::Sapphire => 2,
                });
            }
            bytes.push(node.monster.map_or(u8::MAX, |monster| monster.health));
            bytes.push(u8::from(node.thief));
            bytes.push(u8::from(node.pit));
            bytes.extend((node.arrows as u32).to_le_bytes());
        }

        bytes
    }
}
