//! Property tests over seeded generation

use std::collections::BTreeSet;

use proptest::prelude::*;

use dungen_core::map::Cell;
use dungen_core::{
    AnchorStrategy, CandidatePolicy, Dungeon, DungeonConfig, RoomSizeRange, generate_seeded,
    render,
};

fn arb_config() -> impl Strategy<Value = DungeonConfig> {
    (
        1u8..=10,
        1usize..=3,
        0usize..=3,
        prop_oneof![Just(AnchorStrategy::MostRecent), Just(AnchorStrategy::Random)],
        prop_oneof![Just(CandidatePolicy::First), Just(CandidatePolicy::Random)],
        0u32..=100,
    )
        .prop_map(|(complexity, min, extra, anchor, policy, lock_chance)| {
            let mut config = DungeonConfig::from_complexity(complexity);
            config.room_size = RoomSizeRange {
                min,
                max: min + extra,
            };
            config.anchor_strategy = anchor;
            config.candidate_policy = policy;
            config.doors.lock_chance = lock_chance;
            config.trap_count = complexity as usize;
            config
        })
}

fn room_pairs(dungeon: &Dungeon) -> Vec<(u32, u32)> {
    dungeon
        .doors
        .iter()
        .map(|door| {
            let rooms: Vec<_> = door.rooms().map(|r| r.0).collect();
            (rooms[0], rooms[1])
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_generation_invariants(config in arb_config(), seed in any::<u64>()) {
        let dungeon = generate_seeded(&config, seed).unwrap();

        prop_assert!(!dungeon.rooms.is_empty());
        prop_assert!(dungeon.rooms.len() <= config.room_count);
        prop_assert_eq!(dungeon.grid.count(|c| *c == Cell::Connection), 0);

        for room in &dungeon.rooms {
            prop_assert!(room.width >= config.room_size.min);
            prop_assert!(room.height >= config.room_size.min);
            prop_assert!(room.width <= config.room_size.max);
            prop_assert!(room.height <= config.room_size.max);
            for (x, y) in room.ring() {
                prop_assert!(dungeon.grid.get(x, y).is_some_and(|c| c.is_wall()));
            }
        }

        for door in &dungeon.doors {
            prop_assert!(door.is_symmetric());
            prop_assert!(!door.locked || door.door_type.is_lockable());
            prop_assert_eq!(dungeon.grid.get(door.x, door.y), Some(Cell::Wall));
        }

        let pairs = room_pairs(&dungeon);
        let unique: BTreeSet<_> = pairs.iter().collect();
        prop_assert_eq!(unique.len(), pairs.len());

        let locked = dungeon.doors.iter().filter(|d| d.locked).count();
        prop_assert_eq!(dungeon.room_doors().keys.len(), locked);
    }

    #[test]
    fn test_seed_determines_layout(config in arb_config(), seed in any::<u64>()) {
        let a = generate_seeded(&config, seed).unwrap();
        let b = generate_seeded(&config, seed).unwrap();
        prop_assert_eq!(&a, &b);

        let rendering = render(&a);
        prop_assert_eq!(rendering.room_count(), a.rooms.len());
        prop_assert_eq!(rendering.door_count(), a.doors.len());
    }
}
