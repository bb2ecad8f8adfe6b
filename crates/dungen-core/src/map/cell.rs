//! Grid cell classification

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Room identifier, numbered from 1 in placement order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cardinal direction on the grid (north is decreasing y)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit step `(dx, dy)`
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// True for east/west, whose shared walls run vertically
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "room", rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Blank,
    Wall,
    CornerWall,
    Room(RoomId),
    /// Valid connection marker (debug overlay only)
    Connection,
}

impl Cell {
    pub const fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall | Cell::CornerWall)
    }

    pub const fn room(&self) -> Option<RoomId> {
        match self {
            Cell::Room(id) => Some(*id),
            _ => None,
        }
    }

    /// Display character for text maps
    pub const fn symbol(&self) -> char {
        match self {
            Cell::Blank => ' ',
            Cell::Wall => '#',
            Cell::CornerWall => '+',
            Cell::Room(_) => '.',
            Cell::Connection => 'c',
        }
    }
}
