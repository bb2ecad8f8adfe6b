//! Doors, locks and keys
//!
//! Every door joins exactly two rooms. The door keeps both sides of the
//! connection; the per-room view in [`RoomDoors`] is derived from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::DEFAULT_LOCK_CHANCE;
use crate::map::{Direction, RoomId};
use crate::rng::Roll;

/// Door archetypes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum DoorType {
    Archway,
    Brass,
    Concealed,
    Hole,
    Iron,
    Mechanical,
    Passageway,
    Portcullis,
    Secret,
    Stone,
    Wooden,
}

impl DoorType {
    /// Archetypes described as "<material> doorway"
    pub const fn appends_doorway(self) -> bool {
        matches!(
            self,
            DoorType::Brass
                | DoorType::Iron
                | DoorType::Mechanical
                | DoorType::Stone
                | DoorType::Wooden
        )
    }

    /// Archetypes that may be generated locked
    pub const fn is_lockable(self) -> bool {
        matches!(
            self,
            DoorType::Brass
                | DoorType::Iron
                | DoorType::Mechanical
                | DoorType::Portcullis
                | DoorType::Stone
                | DoorType::Wooden
        )
    }

    /// Hidden doors
    pub const fn is_secret(self) -> bool {
        matches!(self, DoorType::Concealed | DoorType::Secret)
    }

    /// Open gaps that never block passage
    pub const fn is_opening(self) -> bool {
        matches!(
            self,
            DoorType::Archway | DoorType::Hole | DoorType::Passageway
        )
    }

    /// Human-readable name, e.g. "Wooden doorway"
    pub fn label(self) -> String {
        let name = self.to_string();
        let mut label: String = name
            .chars()
            .take(1)
            .flat_map(char::to_uppercase)
            .chain(name.chars().skip(1))
            .collect();
        if self.appends_doorway() {
            label.push_str(" doorway");
        }
        label
    }
}

/// Archetype weights, rolled once per connection
pub const DOOR_PROBABILITY: [(DoorType, u32); 9] = [
    (DoorType::Archway, 12),
    (DoorType::Brass, 4),
    (DoorType::Hole, 3),
    (DoorType::Iron, 8),
    (DoorType::Mechanical, 2),
    (DoorType::Passageway, 14),
    (DoorType::Portcullis, 5),
    (DoorType::Stone, 10),
    (DoorType::Wooden, 42),
];

/// Secret door weights, rolled independently and overriding the archetype
pub const SECRET_PROBABILITY: [(Option<DoorType>, u32); 3] = [
    (None, 88),
    (Some(DoorType::Concealed), 6),
    (Some(DoorType::Secret), 6),
];

/// Door generation knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorSettings {
    /// Chance (percent) that a lockable door is locked
    pub lock_chance: u32,
}

impl Default for DoorSettings {
    fn default() -> Self {
        Self {
            lock_chance: DEFAULT_LOCK_CHANCE,
        }
    }
}

/// Roll a door archetype and lock state
///
/// The lock roll is only made for lockable archetypes.
pub fn roll_door(roll: &mut impl Roll, settings: &DoorSettings) -> (DoorType, bool) {
    let mut door_type = roll.roll_weighted(&DOOR_PROBABILITY);
    if let Some(secret) = roll.roll_weighted(&SECRET_PROBABILITY) {
        door_type = secret;
    }

    let locked = door_type.is_lockable() && roll.roll_percent(settings.lock_chance);
    (door_type, locked)
}

/// Name of a door of `door_type`, prefixed with "Locked" when locked
pub fn describe(door_type: DoorType, locked: bool) -> String {
    if locked {
        format!("Locked {}", door_type.label().to_lowercase())
    } else {
        door_type.label()
    }
}

/// One side of a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Direction from this room through the door
    pub direction: Direction,
    pub to: RoomId,
}

/// A door joining two rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub door_type: DoorType,
    pub locked: bool,
    /// Width of the opening in cells
    pub size: usize,
    /// Wall cell holding the door
    pub x: usize,
    pub y: usize,
    pub connections: BTreeMap<RoomId, Connection>,
}

impl Door {
    /// Door in wall cell `at`, leading from `from` toward `to` in `direction`
    ///
    /// Panics on a self-connection or on a locked non-lockable archetype.
    pub fn between(
        from: RoomId,
        to: RoomId,
        direction: Direction,
        at: (usize, usize),
        door_type: DoorType,
        locked: bool,
    ) -> Self {
        assert_ne!(from, to, "door must join two different rooms");
        assert!(
            !locked || door_type.is_lockable(),
            "{} doors cannot be locked",
            door_type
        );

        let mut connections = BTreeMap::new();
        connections.insert(from, Connection { direction, to });
        connections.insert(
            to,
            Connection {
                direction: direction.opposite(),
                to: from,
            },
        );

        Self {
            door_type,
            locked,
            size: 1,
            x: at.0,
            y: at.1,
            connections,
        }
    }

    /// This room's side of the door
    pub fn connection(&self, room: RoomId) -> Option<&Connection> {
        self.connections.get(&room)
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.connections.keys().copied()
    }

    pub fn connects(&self, a: RoomId, b: RoomId) -> bool {
        self.connection(a).is_some_and(|c| c.to == b)
    }

    /// Two entries pointing at each other with opposite directions
    pub fn is_symmetric(&self) -> bool {
        if self.connections.len() != 2 {
            return false;
        }
        self.connections.iter().all(|(room, side)| {
            self.connection(side.to)
                .is_some_and(|back| back.to == *room && back.direction == side.direction.opposite())
        })
    }

    /// Legend/description name, e.g. "Locked iron doorway"
    pub fn description(&self) -> String {
        describe(self.door_type, self.locked)
    }
}

/// The means to open a locked door
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub door_type: DoorType,
    pub connections: BTreeMap<RoomId, Connection>,
}

impl Key {
    pub fn opens(&self, door: &Door) -> bool {
        door.locked && door.door_type == self.door_type && door.connections == self.connections
    }
}

/// A door seen from one of its rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDoor {
    pub door: Door,
    pub connection: Connection,
}

/// Per-room door index plus keys for every locked door
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDoors {
    pub doors: BTreeMap<RoomId, Vec<RoomDoor>>,
    pub keys: Vec<Key>,
}

impl RoomDoors {
    pub fn for_room(&self, room: RoomId) -> &[RoomDoor] {
        self.doors.get(&room).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Build the per-room door lookup
///
/// Input order is preserved within each room. Panics if a door does not have
/// exactly two connections.
pub fn room_doors(doors: &[Door]) -> RoomDoors {
    let mut lookup = RoomDoors::default();

    for door in doors {
        assert_eq!(
            door.connections.len(),
            2,
            "door at ({}, {}) must connect exactly two rooms",
            door.x,
            door.y
        );

        for (room, connection) in &door.connections {
            lookup.doors.entry(*room).or_default().push(RoomDoor {
                door: door.clone(),
                connection: *connection,
            });
        }

        if door.locked {
            lookup.keys.push(Key {
                door_type: door.door_type,
                connections: door.connections.clone(),
            });
        }
    }

    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DungeonRng;
    use strum::IntoEnumIterator;

    /// Replays a fixed list of rolls, clamped into range
    struct Scripted(Vec<i32>);

    impl Roll for Scripted {
        fn roll(&mut self, min: i32, max: i32) -> i32 {
            let next = if self.0.is_empty() { min } else { self.0.remove(0) };
            next.clamp(min, max.max(min))
        }
    }

    fn door(a: u32, b: u32, dir: Direction, door_type: DoorType, locked: bool) -> Door {
        Door::between(RoomId(a), RoomId(b), dir, (0, 0), door_type, locked)
    }

    #[test]
    fn test_between_is_symmetric() {
        let d = door(1, 2, Direction::North, DoorType::Wooden, false);
        assert!(d.is_symmetric());
        assert_eq!(d.connection(RoomId(1)).unwrap().direction, Direction::North);
        assert_eq!(d.connection(RoomId(2)).unwrap().direction, Direction::South);
        assert_eq!(d.connection(RoomId(2)).unwrap().to, RoomId(1));
        assert!(d.connects(RoomId(2), RoomId(1)));
    }

    #[test]
    #[should_panic(expected = "cannot be locked")]
    fn test_locked_archway_panics() {
        door(1, 2, Direction::East, DoorType::Archway, true);
    }

    #[test]
    #[should_panic(expected = "two different rooms")]
    fn test_self_connection_panics() {
        door(1, 1, Direction::East, DoorType::Wooden, false);
    }

    #[test]
    fn test_lockable_sets() {
        for door_type in DoorType::iter() {
            if door_type.is_opening() || door_type.is_secret() {
                assert!(!door_type.is_lockable(), "{door_type}");
            }
            if door_type.appends_doorway() {
                assert!(door_type.is_lockable(), "{door_type}");
            }
        }
        assert!(DoorType::Portcullis.is_lockable());
    }

    #[test]
    fn test_labels() {
        assert_eq!(DoorType::Wooden.label(), "Wooden doorway");
        assert_eq!(DoorType::Archway.label(), "Archway");
        let d = door(1, 2, Direction::West, DoorType::Iron, true);
        assert_eq!(d.description(), "Locked iron doorway");
    }

    #[test]
    fn test_roll_door_secret_override() {
        // archetype roll 1 -> Archway, secret roll 100 -> Secret
        let mut roll = Scripted(vec![1, 100]);
        let (door_type, locked) = roll_door(&mut roll, &DoorSettings { lock_chance: 100 });
        assert_eq!(door_type, DoorType::Secret);
        assert!(!locked);
    }

    #[test]
    fn test_roll_door_lock_gated() {
        // 100 -> last archetype (Wooden), 1 -> not secret, 1 -> locked
        let mut roll = Scripted(vec![100, 1, 1]);
        let (door_type, locked) = roll_door(&mut roll, &DoorSettings { lock_chance: 50 });
        assert_eq!(door_type, DoorType::Wooden);
        assert!(locked);

        // Archway never consumes a lock roll
        let mut roll = Scripted(vec![1, 1]);
        let (door_type, locked) = roll_door(&mut roll, &DoorSettings { lock_chance: 100 });
        assert_eq!(door_type, DoorType::Archway);
        assert!(!locked);
    }

    #[test]
    fn test_rolled_doors_never_lock_unlockable() {
        let mut rng = DungeonRng::new(11);
        let settings = DoorSettings { lock_chance: 100 };
        for _ in 0..500 {
            let (door_type, locked) = roll_door(&mut rng, &settings);
            assert_eq!(locked, door_type.is_lockable());
        }
    }

    #[test]
    fn test_room_doors_index() {
        let doors = vec![
            door(1, 2, Direction::East, DoorType::Wooden, false),
            door(2, 3, Direction::South, DoorType::Iron, true),
            door(1, 3, Direction::South, DoorType::Archway, false),
        ];
        let lookup = room_doors(&doors);

        assert_eq!(lookup.doors.len(), 3);
        let first = lookup.for_room(RoomId(1));
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].connection.to, RoomId(2));
        assert_eq!(first[1].connection.to, RoomId(3));

        let second = lookup.for_room(RoomId(2));
        assert_eq!(second[0].connection.direction, Direction::West);
        assert_eq!(second[1].connection.direction, Direction::South);
        assert!(lookup.for_room(RoomId(9)).is_empty());
    }

    #[test]
    fn test_room_doors_keys() {
        let doors = vec![
            door(1, 2, Direction::East, DoorType::Wooden, false),
            door(2, 3, Direction::South, DoorType::Iron, true),
        ];
        let lookup = room_doors(&doors);

        assert_eq!(lookup.keys.len(), 1);
        assert_eq!(lookup.keys[0].door_type, DoorType::Iron);
        assert_eq!(lookup.keys[0].connections, doors[1].connections);
        assert!(lookup.keys[0].opens(&doors[1]));
        assert!(!lookup.keys[0].opens(&doors[0]));
    }

    #[test]
    #[should_panic(expected = "exactly two rooms")]
    fn test_room_doors_rejects_one_sided_door() {
        let mut d = door(1, 2, Direction::East, DoorType::Wooden, false);
        d.connections.remove(&RoomId(2));
        room_doors(&[d]);
    }

    #[test]
    fn test_door_json_keys() {
        let d = door(1, 2, Direction::East, DoorType::Wooden, false);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["connections"]["2"]["direction"], "west");
        assert_eq!(json["door_type"], "wooden");
    }
}
