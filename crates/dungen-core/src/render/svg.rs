//! SVG output

use svg::Document;
use svg::node::Text as TextNode;
use svg::node::element::{Circle, Group, Line, Rectangle, Text};

use crate::door::DoorType;

use super::{LegendEntry, LegendKind, Rendering, Shape, ShapeClass};

const LEGEND_ROW: f32 = 20.0;
const LEGEND_PAD: f32 = 10.0;

const ROOM_FILL: &str = "#f4ecd8";
const WALL_STROKE: &str = "#333333";
const TRAP_FILL: &str = "#b03030";
const LOCK_STROKE: &str = "#c02020";

fn door_color(door_type: DoorType) -> &'static str {
    match door_type {
        DoorType::Archway | DoorType::Passageway => "#8aa0b0",
        DoorType::Brass => "#b5a642",
        DoorType::Concealed | DoorType::Secret => WALL_STROKE,
        DoorType::Hole => "#202020",
        DoorType::Iron | DoorType::Portcullis => "#6e6e6e",
        DoorType::Mechanical => "#4a7a8c",
        DoorType::Stone => "#a09a90",
        DoorType::Wooden => "#8b5a2b",
    }
}

fn style_line(line: Line, door_type: DoorType, locked: bool) -> Line {
    let line = line
        .set("stroke", if locked { LOCK_STROKE } else { door_color(door_type) })
        .set("stroke-width", 6);
    if door_type.is_secret() {
        line.set("stroke-dasharray", "3,3")
    } else {
        line
    }
}

fn shape_node(shape: &Shape) -> Group {
    let group = Group::new();
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            ..
        } => group.add(
            Rectangle::new()
                .set("x", *x)
                .set("y", *y)
                .set("width", *width)
                .set("height", *height)
                .set("fill", ROOM_FILL),
        ),
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            class,
        } => {
            let line = Line::new()
                .set("x1", *x1)
                .set("y1", *y1)
                .set("x2", *x2)
                .set("y2", *y2);
            let line = match class {
                ShapeClass::Door {
                    door_type, locked, ..
                } => style_line(line, *door_type, *locked),
                _ => line
                    .set("stroke", WALL_STROKE)
                    .set("stroke-width", 3)
                    .set("stroke-linecap", "square"),
            };
            group.add(line)
        }
        Shape::Circle { cx, cy, r, class } => {
            let fill = match class {
                ShapeClass::Door { door_type, .. } => door_color(*door_type),
                _ => TRAP_FILL,
            };
            group.add(
                Circle::new()
                    .set("cx", *cx)
                    .set("cy", *cy)
                    .set("r", *r)
                    .set("fill", fill),
            )
        }
        Shape::Text { x, y, text, .. } => group.add(
            Text::new()
                .set("x", *x)
                .set("y", *y)
                .set("font-family", "monospace")
                .set("font-size", 12)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "central")
                .add(TextNode::new(text.as_str())),
        ),
    }
}

fn legend_row(entry: &LegendEntry, top: f32) -> Group {
    let y = top + LEGEND_ROW / 2.0;
    let sample = match entry.kind {
        LegendKind::Door { door_type, locked } => {
            let line = Line::new()
                .set("x1", LEGEND_PAD)
                .set("y1", y)
                .set("x2", LEGEND_PAD + 20.0)
                .set("y2", y);
            Group::new().add(style_line(line, door_type, locked))
        }
        LegendKind::Trap => Group::new().add(
            Circle::new()
                .set("cx", LEGEND_PAD + 10.0)
                .set("cy", y)
                .set("r", 5)
                .set("fill", TRAP_FILL),
        ),
    };

    sample.add(
        Text::new()
            .set("x", LEGEND_PAD + 30.0)
            .set("y", y)
            .set("font-family", "sans-serif")
            .set("font-size", 12)
            .set("dominant-baseline", "central")
            .add(TextNode::new(entry.label.as_str())),
    )
}

/// Render to an SVG document; the legend is drawn under the map
pub fn to_svg(rendering: &Rendering) -> String {
    let legend_height = if rendering.legend.is_empty() {
        0.0
    } else {
        rendering.legend.len() as f32 * LEGEND_ROW + 2.0 * LEGEND_PAD
    };
    let height = rendering.height + legend_height;

    let mut map = Group::new().set("class", "map");
    for shape in &rendering.shapes {
        map = map.add(shape_node(shape));
    }

    let mut legend = Group::new().set("class", "legend");
    for (i, entry) in rendering.legend.iter().enumerate() {
        let top = rendering.height + LEGEND_PAD + i as f32 * LEGEND_ROW;
        legend = legend.add(legend_row(entry, top));
    }

    Document::new()
        .set("viewBox", (0.0, 0.0, rendering.width, height))
        .set("width", rendering.width)
        .set("height", height)
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "white"),
        )
        .add(map)
        .add(legend)
        .to_string()
}
