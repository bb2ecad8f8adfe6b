//! Room placement
//!
//! New rooms attach to an existing room through one of its edge walls. The
//! cell just beyond that wall becomes the anchor: the new room's interior cell
//! that touches the shared wall. From the anchor the room grows away from the
//! previous room and toward increasing `x`/`y` along the wall.

use super::cell::{Cell, Direction, RoomId};
use super::grid::{Bounds, Grid, Rect, Size, is_room_corner};
use super::room::Room;

/// A validated attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Anchor cell of the new room
    pub anchor: (usize, usize),
    /// Direction from the previous room toward the new one
    pub direction: Direction,
    /// Shared wall cell where the connecting door goes
    pub door: (usize, usize),
    /// Interior of the new room
    pub rect: Rect,
}

/// A door site between two rooms that already share a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedWall {
    pub x: usize,
    pub y: usize,
    /// Direction from the scanned room toward `other`
    pub direction: Direction,
    pub other: RoomId,
}

/// Interior rectangle of a room of `size` anchored at `anchor` on side `direction`
fn anchored_rect(anchor: (i32, i32), direction: Direction, size: Size) -> Option<Rect> {
    let (ax, ay) = anchor;
    let (w, h) = (size.width as i32, size.height as i32);
    let (x, y) = match direction {
        Direction::North => (ax, ay - h + 1),
        Direction::West => (ax - w + 1, ay),
        Direction::South | Direction::East => (ax, ay),
    };
    if x < 0 || y < 0 {
        return None;
    }
    Some(Rect::new(x as usize, y as usize, size.width, size.height))
}

/// True if no cell of the wall ring around `rect` belongs to a room interior
fn ring_is_clear(grid: &Grid, rect: &Rect) -> bool {
    let (left, top) = (rect.x as i32 - 1, rect.y as i32 - 1);
    let (right, bottom) = (rect.right() as i32, rect.bottom() as i32);

    for x in left..=right {
        for y in top..=bottom {
            if x >= 0 && y >= 0 && rect.contains(x as usize, y as usize) {
                continue;
            }
            match grid.get_signed(x, y) {
                Some(Cell::Room(_)) | None => return false,
                _ => {}
            }
        }
    }
    true
}

/// All places a room of `size` can attach to `prev`, sorted by `x` then `y`
pub fn room_candidates(grid: &Grid, prev: &Room, size: Size) -> Vec<Candidate> {
    if size.width == 0 || size.height == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Candidate> = prev
        .edge_walls()
        .into_iter()
        .filter(|wall| grid.get_signed(wall.x, wall.y) == Some(Cell::Wall))
        .filter_map(|wall| {
            let anchor = wall.beyond();
            if !grid.in_bounds(anchor.0, anchor.1) {
                return None;
            }
            let rect = anchored_rect(anchor, wall.outward, size)?;
            if !grid.check_area(&rect) || !ring_is_clear(grid, &rect) {
                return None;
            }
            Some(Candidate {
                anchor: (anchor.0 as usize, anchor.1 as usize),
                direction: wall.outward,
                door: (wall.x as usize, wall.y as usize),
                rect,
            })
        })
        .collect();

    candidates.sort_by_key(|c| c.anchor);
    candidates.dedup_by_key(|c| c.anchor);
    candidates
}

/// Anchor coordinates for attaching a room of `size` to `prev`
///
/// Sorted ascending by `x`, then `y`. An empty result means this room has no
/// space left for that size.
pub fn valid_room_cords(grid: &Grid, prev: &Room, size: Size) -> Vec<(usize, usize)> {
    room_candidates(grid, prev, size)
        .into_iter()
        .map(|c| c.anchor)
        .collect()
}

/// Stamp a validated room onto the grid
///
/// Ring cells become walls, the four ring corners become corner walls, and
/// the interior is tagged with the room id. Walls shared with earlier rooms
/// are kept; a shared wall cell landing on a corner is promoted.
pub fn stamp_room(grid: &mut Grid, room: &Room) {
    let bounds = Bounds::around_ring(&room.rect());

    for (x, y) in room.ring() {
        let corner = is_room_corner(x as i32, y as i32, bounds);
        let next = match (grid.get(x, y), corner) {
            (Some(Cell::Room(_)), _) | (None, _) => continue,
            (Some(_), true) => Cell::CornerWall,
            (Some(Cell::CornerWall), false) => Cell::CornerWall,
            (Some(_), false) => Cell::Wall,
        };
        grid.set(x, y, next);
    }

    for (x, y) in room.rect().cells() {
        grid.set(x, y, Cell::Room(room.id));
    }
}

/// Wall cells of `room` that separate it from a neighbouring room interior
pub fn shared_walls(grid: &Grid, room: &Room) -> Vec<SharedWall> {
    room.edge_walls()
        .into_iter()
        .filter(|wall| grid.get_signed(wall.x, wall.y) == Some(Cell::Wall))
        .filter_map(|wall| {
            let (bx, by) = wall.beyond();
            match grid.get_signed(bx, by) {
                Some(Cell::Room(other)) if other != room.id => Some(SharedWall {
                    x: wall.x as usize,
                    y: wall.y as usize,
                    direction: wall.outward,
                    other,
                }),
                _ => None,
            }
        })
        .collect()
}
