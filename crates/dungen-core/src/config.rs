//! Generation knobs
//!
//! Configs are plain serde structs; every field has a default so partial
//! JSON files work.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::consts::{
    DEFAULT_ATTEMPTS_PER_ROOM, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_ROOM,
    DEFAULT_MIN_ROOM, MAX_COMPLEXITY, MAX_ROOMS, MIN_COMPLEXITY, WALL_SIZE,
};
use crate::door::DoorSettings;
use crate::error::GenerateError;

/// Inclusive bounds for room interior width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSizeRange {
    pub min: usize,
    pub max: usize,
}

impl Default for RoomSizeRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ROOM,
            max: DEFAULT_MAX_ROOM,
        }
    }
}

/// Which placed room the next room attaches to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnchorStrategy {
    /// The most recently placed room that still has space
    MostRecent,
    /// Any room that still has space
    #[default]
    Random,
}

/// How one attachment point is chosen among the valid ones
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CandidatePolicy {
    /// Lowest `(x, y)` candidate
    First,
    /// Uniform among candidates
    #[default]
    Random,
}

/// Full generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Target number of rooms
    pub room_count: usize,
    pub room_size: RoomSizeRange,
    /// Extra doors between rooms that already share a wall
    pub connection_count: usize,
    pub trap_count: usize,
    /// Number of maps generated per batch
    pub map_count: usize,
    /// Failed placements tolerated per anchor room
    pub attempts_per_room: u32,
    pub anchor_strategy: AnchorStrategy,
    pub candidate_policy: CandidatePolicy,
    pub doors: DoorSettings,
    /// Base seed; `None` picks one from entropy
    pub seed: Option<u64>,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            room_count: 10,
            room_size: RoomSizeRange::default(),
            connection_count: 2,
            trap_count: 0,
            map_count: 1,
            attempts_per_room: DEFAULT_ATTEMPTS_PER_ROOM,
            anchor_strategy: AnchorStrategy::default(),
            candidate_policy: CandidatePolicy::default(),
            doors: DoorSettings::default(),
            seed: None,
        }
    }
}

impl DungeonConfig {
    /// Derive grid size and counts from a complexity knob
    ///
    /// Complexity is clamped to `1..=10`; each step adds room and grid space.
    pub fn from_complexity(complexity: u8) -> Self {
        let c = complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY) as usize;
        Self {
            grid_width: 14 + c * 6,
            grid_height: 14 + c * 6,
            room_count: 2 + c * 3,
            connection_count: c / 2,
            trap_count: c / 3,
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        let config: DungeonConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GenerateError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Reject dimensions and bounds no layout can satisfy
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GenerateError::config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.room_size.min == 0 {
            return Err(GenerateError::config("minimum room size must be positive"));
        }
        if self.room_size.min > self.room_size.max {
            return Err(GenerateError::config(format!(
                "room size range {}..={} is empty",
                self.room_size.min, self.room_size.max
            )));
        }
        let usable = self.grid_width.min(self.grid_height);
        if self.room_size.min + 2 * WALL_SIZE > usable {
            return Err(GenerateError::config(format!(
                "rooms of size {} cannot fit a {}x{} grid",
                self.room_size.min, self.grid_width, self.grid_height
            )));
        }
        if self.room_count == 0 || self.room_count > MAX_ROOMS {
            return Err(GenerateError::config(format!(
                "room count must be in 1..={}, got {}",
                MAX_ROOMS, self.room_count
            )));
        }
        if self.map_count == 0 {
            return Err(GenerateError::config("map count must be positive"));
        }
        if self.doors.lock_chance > 100 {
            return Err(GenerateError::config(format!(
                "lock chance must be a percentage, got {}",
                self.doors.lock_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DungeonConfig::default().validate().is_ok());
    }

    #[test]
    fn test_complexity_scales() {
        let small = DungeonConfig::from_complexity(1);
        let large = DungeonConfig::from_complexity(10);
        assert!(small.grid_width < large.grid_width);
        assert!(small.room_count < large.room_count);
        assert!(small.validate().is_ok());
        assert!(large.validate().is_ok());
        assert_eq!(DungeonConfig::from_complexity(0), small);
        assert_eq!(DungeonConfig::from_complexity(200), large);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = DungeonConfig {
            grid_width: 0,
            ..DungeonConfig::default()
        };
        assert!(matches!(config.validate(), Err(GenerateError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_room_sizes() {
        let inverted = DungeonConfig {
            room_size: RoomSizeRange { min: 5, max: 3 },
            ..DungeonConfig::default()
        };
        assert!(inverted.validate().is_err());

        let too_big = DungeonConfig {
            grid_width: 6,
            grid_height: 6,
            room_size: RoomSizeRange { min: 5, max: 5 },
            ..DungeonConfig::default()
        };
        assert!(too_big.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config = DungeonConfig::from_json(
            r#"{ "grid_width": 40, "room_size": { "min": 1, "max": 3 }, "anchor_strategy": "most_recent" }"#,
        )
        .unwrap();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, DEFAULT_GRID_HEIGHT);
        assert_eq!(config.room_size.max, 3);
        assert_eq!(config.anchor_strategy, AnchorStrategy::MostRecent);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            DungeonConfig::from_json("{ not json"),
            Err(GenerateError::Json(_))
        ));
        assert!(matches!(
            DungeonConfig::from_json(r#"{ "room_count": 0 }"#),
            Err(GenerateError::Config(_))
        ));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(AnchorStrategy::MostRecent.to_string(), "most_recent");
        assert_eq!("first".parse::<CandidatePolicy>().unwrap(), CandidatePolicy::First);
    }
}
