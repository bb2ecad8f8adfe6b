//! Grid model and room placement
//!
//! Contains the occupancy grid, cell classification, placed rooms and the
//! perimeter scan used to attach new rooms.

mod cell;
mod grid;
mod placement;
mod room;

pub use cell::{Cell, Direction, RoomId};
pub use grid::{Bounds, Grid, Rect, Size, get_starting_point, is_room_corner};
pub use placement::{
    Candidate, SharedWall, room_candidates, shared_walls, stamp_room, valid_room_cords,
};
pub use room::{EdgeWall, Room};
