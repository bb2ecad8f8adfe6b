//! ASCII map output

use crate::door::{Door, DoorType};
use crate::generate::Trap;
use crate::map::Grid;

/// Display character for a door
pub fn door_symbol(door: &Door) -> char {
    match door.door_type {
        DoorType::Hole => 'O',
        DoorType::Archway | DoorType::Passageway => ':',
        // looks like wall
        DoorType::Concealed | DoorType::Secret => '#',
        _ if door.locked => 'L',
        _ => 'D',
    }
}

pub const TRAP_SYMBOL: char = '^';

/// Draw the grid one row per line, with doors and traps overlaid
pub fn to_text(grid: &Grid, doors: &[Door], traps: &[Trap]) -> String {
    let mut rows: Vec<Vec<char>> = (0..grid.height())
        .map(|y| {
            grid.columns()
                .iter()
                .map(|column| column[y].symbol())
                .collect()
        })
        .collect();

    for door in doors {
        if let Some(cell) = rows.get_mut(door.y).and_then(|row| row.get_mut(door.x)) {
            *cell = door_symbol(door);
        }
    }
    for trap in traps {
        if let Some(cell) = rows.get_mut(trap.y).and_then(|row| row.get_mut(trap.x)) {
            *cell = TRAP_SYMBOL;
        }
    }

    let mut out = String::with_capacity(rows.len() * (grid.width() + 1));
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
