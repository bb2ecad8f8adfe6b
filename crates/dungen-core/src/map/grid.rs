//! Occupancy grid
//!
//! The grid is indexed `[x][y]` and owned by the generator for the whole run.
//! Cells only move forward: blank cells become walls or room interior, and
//! walls may be promoted to corner walls.

use serde::{Deserialize, Serialize};

use crate::consts::WALL_SIZE;
use crate::error::GenerateError;
use crate::rng::Roll;

use super::cell::{Cell, Direction};

/// Width/height pair for rooms and grids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Iterate all cells, column by column
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.x..self.right()).flat_map(move |x| (self.y..self.bottom()).map(move |y| (x, y)))
    }
}

/// Inclusive bounds used for corner detection
///
/// The four corner cells sit `WALL_SIZE` inside these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Bounds whose corners are the corners of the wall ring around `room`
    pub fn around_ring(room: &Rect) -> Self {
        let wall = WALL_SIZE as i32;
        Self {
            min_x: room.x as i32 - wall - wall,
            min_y: room.y as i32 - wall - wall,
            max_x: room.right() as i32 - 1 + wall + wall,
            max_y: room.bottom() as i32 - 1 + wall + wall,
        }
    }
}

/// Check whether `(x, y)` is one of the four corners `WALL_SIZE` inside `bounds`
pub fn is_room_corner(x: i32, y: i32, bounds: Bounds) -> bool {
    let wall = WALL_SIZE as i32;
    let left = x == bounds.min_x + wall;
    let right = x == bounds.max_x - wall;
    let top = y == bounds.min_y + wall;
    let bottom = y == bounds.max_y - wall;

    (left || right) && (top || bottom)
}

/// The occupancy grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Allocate `width` columns of `height` blank cells
    pub fn blank(width: usize, height: usize) -> Result<Self, GenerateError> {
        if width == 0 || height == 0 {
            return Err(GenerateError::config(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            cells: vec![vec![Cell::Blank; height]; width],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Columns of cells, indexed `[x][y]`
    pub fn columns(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(x)?.get(y).copied()
    }

    /// Signed lookup, `None` off the grid
    pub fn get_signed(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[x as usize][y as usize])
        } else {
            None
        }
    }

    /// Overwrite a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(x).and_then(|col| col.get_mut(y)) {
            *slot = cell;
        }
    }

    /// True if the cell keeps a one-cell margin from every grid edge
    pub fn in_margin(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.width && y + 1 < self.height
    }

    /// Check that every cell of `rect` is blank and inside the grid margin
    ///
    /// A rectangle touching column/row 0 or the last column/row is rejected,
    /// which leaves room for the wall ring of a room interior.
    pub fn check_area(&self, rect: &Rect) -> bool {
        if rect.width == 0 || rect.height == 0 {
            return false;
        }
        if !self.in_margin(rect.x, rect.y) || !self.in_margin(rect.right() - 1, rect.bottom() - 1)
        {
            return false;
        }

        rect.cells()
            .all(|(x, y)| self.cells[x][y].is_blank())
    }

    /// Copy of this grid with connection markers at `cords`
    ///
    /// Only blank cells are marked.
    pub fn with_connections(&self, cords: &[(usize, usize)]) -> Grid {
        let mut marked = self.clone();
        for &(x, y) in cords {
            if marked.get(x, y) == Some(Cell::Blank) {
                marked.set(x, y, Cell::Connection);
            }
        }
        marked
    }

    /// Count cells matching a predicate
    pub fn count(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().flatten().filter(|c| pred(c)).count()
    }
}

/// Pick the top-left interior cell of the first room
///
/// The room is pushed against one randomly chosen edge of the usable area
/// (the grid minus a `WALL_SIZE` inset on every side).
pub fn get_starting_point(
    grid: &Grid,
    room: Size,
    roll: &mut impl Roll,
) -> Result<(usize, usize), GenerateError> {
    if room.width == 0 || room.height == 0 {
        return Err(GenerateError::config("room dimensions must be positive"));
    }

    let wall = WALL_SIZE as i32;
    let min_x = wall;
    let min_y = wall;
    let max_x = grid.width() as i32 - wall - room.width as i32;
    let max_y = grid.height() as i32 - wall - room.height as i32;

    if max_x < min_x {
        return Err(GenerateError::InvalidRange {
            min: min_x,
            max: max_x,
        });
    }
    if max_y < min_y {
        return Err(GenerateError::InvalidRange {
            min: min_y,
            max: max_y,
        });
    }

    let side = Direction::ALL[roll.roll(0, 3) as usize];
    let (x, y) = match side {
        Direction::North => (roll.roll(min_x, max_x), min_y),
        Direction::South => (roll.roll(min_x, max_x), max_y),
        Direction::West => (min_x, roll.roll(min_y, max_y)),
        Direction::East => (max_x, roll.roll(min_y, max_y)),
    };

    Ok((x as usize, y as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DungeonRng;

    #[test]
    fn test_blank_grid_dimensions() {
        let grid = Grid::blank(4, 3).unwrap();
        assert_eq!(grid.columns().len(), 4);
        assert!(grid.columns().iter().all(|col| col.len() == 3));
        assert_eq!(grid.count(Cell::is_blank), 12);
    }

    #[test]
    fn test_blank_grid_rejects_zero() {
        assert!(matches!(Grid::blank(0, 3), Err(GenerateError::Config(_))));
        assert!(matches!(Grid::blank(3, 0), Err(GenerateError::Config(_))));
    }

    #[test]
    fn test_room_corners() {
        let bounds = Bounds {
            min_x: 1,
            min_y: 1,
            max_x: 20,
            max_y: 20,
        };
        assert!(is_room_corner(2, 2, bounds));
        assert!(is_room_corner(19, 2, bounds));
        assert!(is_room_corner(19, 19, bounds));
        assert!(is_room_corner(2, 19, bounds));
        assert!(!is_room_corner(10, 10, bounds));
        assert!(!is_room_corner(2, 10, bounds));
        assert!(!is_room_corner(1, 1, bounds));
    }

    #[test]
    fn test_ring_bounds() {
        // 1x1 interior at (4,4): ring spans 3..=5
        let bounds = Bounds::around_ring(&Rect::new(4, 4, 1, 1));
        assert!(is_room_corner(3, 3, bounds));
        assert!(is_room_corner(5, 5, bounds));
        assert!(!is_room_corner(4, 3, bounds));
    }

    #[test]
    fn test_check_area() {
        let mut grid = Grid::blank(4, 5).unwrap();
        assert!(grid.check_area(&Rect::new(1, 1, 1, 1)));
        assert!(!grid.check_area(&Rect::new(0, 1, 1, 1)));
        assert!(!grid.check_area(&Rect::new(1, 0, 1, 1)));

        grid.set(1, 1, Cell::Wall);
        assert!(!grid.check_area(&Rect::new(1, 1, 1, 1)));
    }

    #[test]
    fn test_check_area_far_edges() {
        let grid = Grid::blank(4, 5).unwrap();
        assert!(grid.check_area(&Rect::new(1, 1, 2, 3)));
        assert!(!grid.check_area(&Rect::new(1, 1, 3, 3)));
        assert!(!grid.check_area(&Rect::new(1, 1, 2, 4)));
        assert!(!grid.check_area(&Rect::new(1, 1, 0, 1)));
    }

    #[test]
    fn test_with_connections_leaves_original() {
        let mut grid = Grid::blank(5, 5).unwrap();
        grid.set(2, 2, Cell::Wall);
        let marked = grid.with_connections(&[(1, 1), (2, 2)]);
        assert_eq!(marked.get(1, 1), Some(Cell::Connection));
        assert_eq!(marked.get(2, 2), Some(Cell::Wall));
        assert_eq!(grid.get(1, 1), Some(Cell::Blank));
    }

    #[test]
    fn test_starting_point_on_inset_edge() {
        let grid = Grid::blank(12, 10).unwrap();
        let mut rng = DungeonRng::new(3);
        for _ in 0..200 {
            let (x, y) = get_starting_point(&grid, Size::new(3, 2), &mut rng).unwrap();
            assert!((1..=8).contains(&x));
            assert!((1..=7).contains(&y));
            assert!(x == 1 || x == 8 || y == 1 || y == 7);
            assert!(grid.check_area(&Rect::new(x, y, 3, 2)));
        }
    }

    #[test]
    fn test_starting_point_too_large() {
        let grid = Grid::blank(5, 5).unwrap();
        let mut rng = DungeonRng::new(3);
        let err = get_starting_point(&grid, Size::new(4, 1), &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "Invalid min or max");
        assert!(get_starting_point(&grid, Size::new(3, 3), &mut rng).is_ok());
    }
}
