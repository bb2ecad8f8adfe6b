//! Layout constants

/// Thickness of the wall ring around every room interior
pub const WALL_SIZE: usize = 1;

/// Default grid dimensions
pub const DEFAULT_GRID_WIDTH: usize = 30;
pub const DEFAULT_GRID_HEIGHT: usize = 30;

/// Default room interior bounds
pub const DEFAULT_MIN_ROOM: usize = 2;
pub const DEFAULT_MAX_ROOM: usize = 6;

/// Room/complexity limits
pub const MAX_ROOMS: usize = 100;
pub const MIN_COMPLEXITY: u8 = 1;
pub const MAX_COMPLEXITY: u8 = 10;

/// Failed placements tolerated per anchor room before it is exhausted
pub const DEFAULT_ATTEMPTS_PER_ROOM: u32 = 6;

/// Default chance (percent) that a lockable door is locked
pub const DEFAULT_LOCK_CHANCE: u32 = 25;

/// Size of one grid cell in rendered units
pub const CELL_PX: u32 = 24;
