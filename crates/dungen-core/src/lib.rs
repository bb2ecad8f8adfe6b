//! dungen-core: room placement, door assignment and map rendering
//!
//! Layouts are built on an occupancy grid. Rooms attach to one another
//! through shared walls, every connection gets a door, and the finished
//! [`Dungeon`] can be rendered to shapes, SVG or ASCII.
//!
//! All randomness flows through the [`Roll`] trait, so a layout is fully
//! determined by its configuration and seed.

pub mod config;
pub mod consts;
pub mod door;
pub mod error;
pub mod generate;
pub mod map;
pub mod render;
pub mod rng;

pub use config::{AnchorStrategy, CandidatePolicy, DungeonConfig, RoomSizeRange};
pub use door::{Door, DoorSettings, DoorType, Key, RoomDoors, room_doors};
pub use error::GenerateError;
pub use generate::{Dungeon, Phase, Trap, generate, generate_maps, generate_seeded};
pub use map::{Cell, Direction, Grid, Room, RoomId, Size};
pub use render::{Rendering, Shape, ShapeClass, render};
pub use rng::{DungeonRng, Roll};
