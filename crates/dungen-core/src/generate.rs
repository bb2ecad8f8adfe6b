//! Dungeon assembly
//!
//! Runs room placement and door assignment until the target room count is
//! reached or every room has run out of space, then adds extra connections
//! between neighbouring rooms and scatters traps.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::Level;

use crate::config::{AnchorStrategy, CandidatePolicy, DungeonConfig, RoomSizeRange};
use crate::consts::WALL_SIZE;
use crate::door::{Door, RoomDoors, roll_door, room_doors};
use crate::error::GenerateError;
use crate::map::{
    Cell, Grid, Rect, Room, RoomId, Size, get_starting_point, room_candidates, shared_walls,
    stamp_room, valid_room_cords,
};
use crate::rng::{DungeonRng, Roll, map_seed};

/// A trapped interior cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub room: RoomId,
    pub x: usize,
    pub y: usize,
}

/// A finished layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    /// Seed the layout was generated from, if known
    pub seed: Option<u64>,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub traps: Vec<Trap>,
}

impl Dungeon {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// Per-room door lookup and keys
    pub fn room_doors(&self) -> RoomDoors {
        room_doors(&self.doors)
    }

    /// Every place a room of `size` could still attach
    pub fn connection_points(&self, size: Size) -> Vec<(usize, usize)> {
        let cords: BTreeSet<(usize, usize)> = self
            .rooms
            .iter()
            .flat_map(|room| valid_room_cords(&self.grid, room, size))
            .collect();
        cords.into_iter().collect()
    }
}

/// Assembler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Init,
    Placing,
    Done,
}

/// A placed room that may still take neighbours
#[derive(Debug, Clone, Copy)]
struct OpenRoom {
    index: usize,
    failures: u32,
}

struct Assembler<'a, R: Roll> {
    config: &'a DungeonConfig,
    roll: &'a mut R,
    phase: Phase,
    grid: Grid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    open: Vec<OpenRoom>,
}

impl<'a, R: Roll> Assembler<'a, R> {
    fn new(config: &'a DungeonConfig, roll: &'a mut R) -> Result<Self, GenerateError> {
        config.validate()?;
        let grid = Grid::blank(config.grid_width, config.grid_height)?;
        Ok(Self {
            config,
            roll,
            phase: Phase::Init,
            grid,
            rooms: Vec::new(),
            doors: Vec::new(),
            open: Vec::new(),
        })
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!("assembler phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn roll_span(&mut self, min: usize, max: usize) -> usize {
        self.roll.roll(min as i32, max as i32) as usize
    }

    fn roll_size(&mut self, range: RoomSizeRange) -> Size {
        Size::new(
            self.roll_span(range.min, range.max),
            self.roll_span(range.min, range.max),
        )
    }

    fn push_room(&mut self, rect: Rect) -> RoomId {
        let id = RoomId(self.rooms.len() as u32 + 1);
        let room = Room::new(id, rect);
        stamp_room(&mut self.grid, &room);
        tracing::debug!(
            "placed room {} at ({}, {}) size {}x{}",
            id,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        self.open.push(OpenRoom {
            index: self.rooms.len(),
            failures: 0,
        });
        self.rooms.push(room);
        id
    }

    fn place_first(&mut self) -> Result<(), GenerateError> {
        // Clamp so any validated config can seat its first room
        let wall = 2 * WALL_SIZE;
        let range = self.config.room_size;
        let size = Size::new(
            self.roll_span(range.min, range.max.min(self.grid.width() - wall)),
            self.roll_span(range.min, range.max.min(self.grid.height() - wall)),
        );

        let (x, y) = get_starting_point(&self.grid, size, &mut *self.roll)?;
        self.push_room(Rect::new(x, y, size.width, size.height));
        Ok(())
    }

    fn pick_anchor(&mut self) -> usize {
        match self.config.anchor_strategy {
            AnchorStrategy::MostRecent => self.open.len() - 1,
            AnchorStrategy::Random => self.roll.roll(0, self.open.len() as i32 - 1) as usize,
        }
    }

    fn place_rooms(&mut self) {
        while self.rooms.len() < self.config.room_count && !self.open.is_empty() {
            let slot = self.pick_anchor();
            let anchor = self.rooms[self.open[slot].index];
            let size = self.roll_size(self.config.room_size);

            let candidates = room_candidates(&self.grid, &anchor, size);
            let chosen = match self.config.candidate_policy {
                CandidatePolicy::First => candidates.first(),
                CandidatePolicy::Random => self.roll.choose(&candidates),
            };
            let Some(candidate) = chosen.copied() else {
                let open = &mut self.open[slot];
                open.failures += 1;
                tracing::trace!(
                    "no space for {}x{} next to room {} (failure {})",
                    size.width,
                    size.height,
                    anchor.id,
                    open.failures
                );
                if open.failures >= self.config.attempts_per_room {
                    tracing::debug!("room {} exhausted", anchor.id);
                    self.open.remove(slot);
                }
                continue;
            };

            let id = self.push_room(candidate.rect);
            let (door_type, locked) = roll_door(&mut *self.roll, &self.config.doors);
            tracing::debug!(
                "door {} {} -> {} at ({}, {}) {}",
                door_type,
                anchor.id,
                id,
                candidate.door.0,
                candidate.door.1,
                if locked { "locked" } else { "open" }
            );
            self.doors.push(Door::between(
                anchor.id,
                id,
                candidate.direction,
                candidate.door,
                door_type,
                locked,
            ));
        }
    }

    fn add_connections(&mut self) {
        if self.config.connection_count == 0 {
            return;
        }

        let mut linked: BTreeSet<(RoomId, RoomId)> = self
            .doors
            .iter()
            .filter_map(|door| {
                let mut rooms = door.rooms();
                Some((rooms.next()?, rooms.next()?))
            })
            .collect();

        let mut sites: Vec<_> = self
            .rooms
            .iter()
            .flat_map(|room| {
                shared_walls(&self.grid, room)
                    .into_iter()
                    .filter(move |wall| room.id < wall.other)
                    .map(move |wall| (room.id, wall))
            })
            .filter(|(room, wall)| !linked.contains(&(*room, wall.other)))
            .collect();

        let mut added = 0;
        while added < self.config.connection_count && !sites.is_empty() {
            let pick = self.roll.roll(0, sites.len() as i32 - 1) as usize;
            let (room, wall) = sites.swap_remove(pick);
            if !linked.insert((room, wall.other)) {
                continue;
            }

            let (door_type, locked) = roll_door(&mut *self.roll, &self.config.doors);
            tracing::debug!(
                "extra door {} {} -> {} at ({}, {})",
                door_type,
                room,
                wall.other,
                wall.x,
                wall.y
            );
            self.doors.push(Door::between(
                room,
                wall.other,
                wall.direction,
                (wall.x, wall.y),
                door_type,
                locked,
            ));
            added += 1;
        }
    }

    fn place_traps(&mut self) -> Vec<Trap> {
        let mut cells: Vec<Trap> = self
            .rooms
            .iter()
            .flat_map(|room| {
                room.rect()
                    .cells()
                    .map(move |(x, y)| Trap { room: room.id, x, y })
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut traps = Vec::new();
        while traps.len() < self.config.trap_count && !cells.is_empty() {
            let pick = self.roll.roll(0, cells.len() as i32 - 1) as usize;
            let trap = cells.swap_remove(pick);
            tracing::trace!("trap in room {} at ({}, {})", trap.room, trap.x, trap.y);
            traps.push(trap);
        }
        traps
    }

    fn run(mut self) -> Result<Dungeon, GenerateError> {
        self.place_first()?;

        self.enter(Phase::Placing);
        self.place_rooms();
        self.add_connections();
        let traps = self.place_traps();

        self.enter(Phase::Done);
        if self.rooms.len() < self.config.room_count {
            tracing::debug!(
                "stopped at {} of {} rooms",
                self.rooms.len(),
                self.config.room_count
            );
        }
        debug_assert!(
            self.grid.count(|c| *c == Cell::Connection) == 0,
            "generation grid must not carry connection markers"
        );

        Ok(Dungeon {
            seed: None,
            grid: self.grid,
            rooms: self.rooms,
            doors: self.doors,
            traps,
        })
    }
}

/// Generate one dungeon, drawing every decision from `roll`
pub fn generate(config: &DungeonConfig, roll: &mut impl Roll) -> Result<Dungeon, GenerateError> {
    let span = tracing::span!(Level::DEBUG, "generate", rooms = config.room_count);
    let _guard = span.enter();

    let dungeon = Assembler::new(config, roll)?.run()?;
    tracing::info!(
        "generated dungeon: {} rooms, {} doors, {} traps",
        dungeon.rooms.len(),
        dungeon.doors.len(),
        dungeon.traps.len()
    );
    Ok(dungeon)
}

/// Generate one dungeon from a seed
pub fn generate_seeded(config: &DungeonConfig, seed: u64) -> Result<Dungeon, GenerateError> {
    let mut rng = DungeonRng::new(seed);
    let mut dungeon = generate(config, &mut rng)?;
    dungeon.seed = Some(seed);
    Ok(dungeon)
}

/// Generate `count` dungeons
///
/// Map `i` uses `map_seed(base, i)`, where the base seed comes from the
/// config or from entropy. Map 0 therefore matches `generate_seeded(base)`.
pub fn generate_maps(config: &DungeonConfig, count: usize) -> Result<Vec<Dungeon>, GenerateError> {
    let base = config
        .seed
        .unwrap_or_else(|| DungeonRng::from_entropy().seed());

    (0..count)
        .map(|index| generate_seeded(config, map_seed(base, index as u32)))
        .collect()
}
