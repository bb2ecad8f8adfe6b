//! Map rendering
//!
//! [`render`] turns a [`Dungeon`] into a flat list of drawing primitives in
//! pixel space plus a legend. The primitives are backend-neutral; see
//! [`svg`] and [`text`] for concrete output.

pub mod svg;
pub mod text;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::CELL_PX;
use crate::door::{Door, DoorType, describe};
use crate::generate::Dungeon;
use crate::map::RoomId;

/// What a shape depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeClass {
    Room { id: RoomId },
    RoomLabel { id: RoomId },
    Wall,
    Door {
        index: usize,
        door_type: DoorType,
        locked: bool,
    },
    Trap,
}

/// A drawing primitive, coordinates in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        class: ShapeClass,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        class: ShapeClass,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        class: ShapeClass,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        class: ShapeClass,
    },
}

impl Shape {
    pub fn class(&self) -> ShapeClass {
        match self {
            Shape::Rect { class, .. }
            | Shape::Line { class, .. }
            | Shape::Circle { class, .. }
            | Shape::Text { class, .. } => *class,
        }
    }
}

/// Legend item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegendKind {
    Door { door_type: DoorType, locked: bool },
    Trap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub kind: LegendKind,
    pub label: String,
}

/// Render output: canvas size, shapes, legend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendering {
    pub width: f32,
    pub height: f32,
    pub shapes: Vec<Shape>,
    pub legend: Vec<LegendEntry>,
}

impl Rendering {
    /// Number of room interiors drawn
    pub fn room_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { class: ShapeClass::Room { .. }, .. }))
            .count()
    }

    /// Number of distinct doors drawn
    pub fn door_count(&self) -> usize {
        self.shapes
            .iter()
            .filter_map(|s| match s.class() {
                ShapeClass::Door { index, .. } => Some(index),
                _ => None,
            })
            .collect::<BTreeSet<_>>()
            .len()
    }
}

const CELL: f32 = CELL_PX as f32;

fn cell_origin(x: usize, y: usize) -> (f32, f32) {
    (x as f32 * CELL, y as f32 * CELL)
}

fn cell_center(x: usize, y: usize) -> (f32, f32) {
    let (px, py) = cell_origin(x, y);
    (px + CELL / 2.0, py + CELL / 2.0)
}

fn door_shape(index: usize, door: &Door) -> Shape {
    let class = ShapeClass::Door {
        index,
        door_type: door.door_type,
        locked: door.locked,
    };
    let (cx, cy) = cell_center(door.x, door.y);

    if door.door_type == DoorType::Hole {
        return Shape::Circle {
            cx,
            cy,
            r: CELL / 3.0,
            class,
        };
    }

    // Drawn along the wall, so perpendicular to the passage direction
    let horizontal = door
        .connections
        .values()
        .next()
        .is_some_and(|c| c.direction.is_horizontal());
    let half = CELL / 2.0;
    if horizontal {
        Shape::Line {
            x1: cx,
            y1: cy - half,
            x2: cx,
            y2: cy + half,
            class,
        }
    } else {
        Shape::Line {
            x1: cx - half,
            y1: cy,
            x2: cx + half,
            y2: cy,
            class,
        }
    }
}

/// Build the legend for a set of doors and traps
pub fn legend(doors: &[Door], has_traps: bool) -> Vec<LegendEntry> {
    let kinds: BTreeSet<(DoorType, bool)> =
        doors.iter().map(|d| (d.door_type, d.locked)).collect();

    let mut entries: Vec<LegendEntry> = kinds
        .into_iter()
        .map(|(door_type, locked)| LegendEntry {
            kind: LegendKind::Door { door_type, locked },
            label: describe(door_type, locked),
        })
        .collect();

    if has_traps {
        entries.push(LegendEntry {
            kind: LegendKind::Trap,
            label: "Trap".to_string(),
        });
    }
    entries
}

/// Turn a dungeon into drawing primitives and a legend
pub fn render(dungeon: &Dungeon) -> Rendering {
    let mut shapes = Vec::new();

    for room in &dungeon.rooms {
        let (x, y) = cell_origin(room.x, room.y);
        shapes.push(Shape::Rect {
            x,
            y,
            width: room.width as f32 * CELL,
            height: room.height as f32 * CELL,
            class: ShapeClass::Room { id: room.id },
        });

        let corners = room.ring_corners();
        for (i, &(x1, y1)) in corners.iter().enumerate() {
            let (x2, y2) = corners[(i + 1) % corners.len()];
            let (x1, y1) = cell_center(x1, y1);
            let (x2, y2) = cell_center(x2, y2);
            shapes.push(Shape::Line {
                x1,
                y1,
                x2,
                y2,
                class: ShapeClass::Wall,
            });
        }

        let (cx, cy) = room.center();
        let (tx, ty) = cell_center(cx, cy);
        shapes.push(Shape::Text {
            x: tx,
            y: ty,
            text: room.id.to_string(),
            class: ShapeClass::RoomLabel { id: room.id },
        });
    }

    for (index, door) in dungeon.doors.iter().enumerate() {
        shapes.push(door_shape(index, door));
    }

    for trap in &dungeon.traps {
        let (cx, cy) = cell_center(trap.x, trap.y);
        shapes.push(Shape::Circle {
            cx,
            cy,
            r: CELL / 4.0,
            class: ShapeClass::Trap,
        });
    }

    Rendering {
        width: dungeon.grid.width() as f32 * CELL,
        height: dungeon.grid.height() as f32 * CELL,
        shapes,
        legend: legend(&dungeon.doors, !dungeon.traps.is_empty()),
    }
}
