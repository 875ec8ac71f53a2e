use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Index of a node in the dungeon arena, `row * columns + column`.
pub type NodeId = usize;

pub const PLAYER_FULL_HEALTH: u8 = 100;
pub const MONSTER_FULL_HEALTH: u8 = 100;
pub const MONSTER_INJURED_HEALTH: u8 = 50;
pub const STARTING_ARROWS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum NodeKind {
    Cave,
    Tunnel,
}

impl NodeKind {
    pub fn glyph(self) -> char {
        match self {
            Self::Cave => 'C',
            Self::Tunnel => 'T',
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Treasure {
    Diamond,
    Ruby,
    Sapphire,
}

impl Treasure {
    pub const COUNT: usize = 3;

    pub fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Self::Diamond,
            1 => Self::Ruby,
            _ => Self::Sapphire,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Smell {
    Pungent,
    MorePungent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Sound {
    Crackling,
}

bitflags! {
    /// Realized edges leaving a node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Exits: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const EAST = 0b0100;
        const WEST = 0b1000;
    }
}

impl From<Direction> for Exits {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => Exits::NORTH,
            Direction::South => Exits::SOUTH,
            Direction::East => Exits::EAST,
            Direction::West => Exits::WEST,
        }
    }
}

impl Exits {
    pub fn has(self, direction: Direction) -> bool {
        self.contains(Exits::from(direction))
    }

    pub fn open(&mut self, direction: Direction) {
        self.insert(Exits::from(direction));
    }

    pub fn degree(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Open directions in North, South, East, West order.
    pub fn directions(self) -> Vec<Direction> {
        Direction::iter().filter(|&direction| self.has(direction)).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress,
    ReachedEnd,
    Killed,
    Fallen,
}
