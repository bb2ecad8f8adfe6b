//! Placed rooms

use serde::{Deserialize, Serialize};

use crate::consts::WALL_SIZE;

use super::cell::{Direction, RoomId};
use super::grid::{Bounds, Rect, Size, is_room_corner};

/// A stamped room; `x`/`y`/`width`/`height` describe the interior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// A non-corner cell of a room's wall ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeWall {
    pub x: i32,
    pub y: i32,
    /// Direction pointing away from the room interior
    pub outward: Direction,
}

impl EdgeWall {
    /// The cell just beyond this wall
    pub fn beyond(&self) -> (i32, i32) {
        let (dx, dy) = self.outward.delta();
        (self.x + dx, self.y + dy)
    }
}

impl Room {
    pub fn new(id: RoomId, rect: Rect) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Interior plus wall ring
    pub fn footprint(&self) -> Rect {
        Rect::new(
            self.x - WALL_SIZE,
            self.y - WALL_SIZE,
            self.width + 2 * WALL_SIZE,
            self.height + 2 * WALL_SIZE,
        )
    }

    /// Corner cells of the wall ring: top-left, top-right, bottom-right, bottom-left
    pub fn ring_corners(&self) -> [(usize, usize); 4] {
        let f = self.footprint();
        let (l, t, r, b) = (f.x, f.y, f.right() - 1, f.bottom() - 1);
        [(l, t), (r, t), (r, b), (l, b)]
    }

    /// Every cell of the wall ring, column by column
    pub fn ring(&self) -> Vec<(usize, usize)> {
        let interior = self.rect();
        self.footprint()
            .cells()
            .filter(|&(x, y)| !interior.contains(x, y))
            .collect()
    }

    /// Edge-wall cells of the ring with their outward direction
    ///
    /// Walks the full ring in `x`-then-`y` order and skips the four corners.
    pub fn edge_walls(&self) -> Vec<EdgeWall> {
        let bounds = Bounds::around_ring(&self.rect());
        let (left, top) = (self.x as i32 - 1, self.y as i32 - 1);
        let (right, bottom) = (self.x as i32 + self.width as i32, self.y as i32 + self.height as i32);

        let mut walls = Vec::new();
        for x in left..=right {
            for y in top..=bottom {
                if is_room_corner(x, y, bounds) {
                    continue;
                }
                let outward = if y == top {
                    Direction::North
                } else if y == bottom {
                    Direction::South
                } else if x == left {
                    Direction::West
                } else if x == right {
                    Direction::East
                } else {
                    continue;
                };
                walls.push(EdgeWall { x, y, outward });
            }
        }
        walls
    }

    /// Center cell of the interior
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}
