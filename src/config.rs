//! Simulation Configuration
//!
//! Constants the host may set once, before a session starts. Every section
//! is `#[serde(default)]`, so a JSON file only has to name what it changes.
//!
//! ```json
//! { "world": { "width": 64 }, "physics": { "jump_speed": 9.5 } }
//! ```

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::game::tile::ItemKind;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    /// Grid has a zero dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Configured width in tiles
        width: u32,
        /// Configured height in tiles
        height: u32,
    },

    /// Ground row does not fall inside the grid.
    #[error("ground row {ground_row} outside grid height {height}")]
    GroundRowOutOfRange {
        /// Configured ground row
        ground_row: u32,
        /// Configured height in tiles
        height: u32,
    },

    /// Tile size too small to hold a body.
    #[error("tile size must be at least 2 pixels, got {0}")]
    InvalidTileSize(u32),

    /// A per-frame speed would let a body skip a whole tile.
    #[error("{name} = {speed} must be below the tile size ({tile_size} px)")]
    SpeedExceedsTile {
        /// Constant name
        name: &'static str,
        /// Configured speed
        speed: f32,
        /// Tile size in pixels
        tile_size: u32,
    },

    /// A constant is outside its allowed range.
    #[error("{name} = {value} is out of range")]
    OutOfRange {
        /// Constant name
        name: &'static str,
        /// Configured value
        value: f32,
    },

    /// Inventory has no slots.
    #[error("hotbar needs at least one slot")]
    NoHotbarSlots,

    /// More starting stacks than slots.
    #[error("{items} starting stacks do not fit in {slots} slots")]
    TooManyStartingItems {
        /// Number of starting stacks
        items: usize,
        /// Number of slots
        slots: usize,
    },

    /// Player spawn lies outside the grid.
    #[error("spawn tile ({x}, {y}) outside grid")]
    SpawnOutOfBounds {
        /// Spawn column
        x: u32,
        /// Spawn row
        y: u32,
    },

    /// Player spawn row is at or below the ground surface.
    #[error("spawn row {y} is inside the ground (ground row {ground_row})")]
    SpawnInsideGround {
        /// Spawn row
        y: u32,
        /// Configured ground row
        ground_row: u32,
    },
}

/// Starting inventory stack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartingStack {
    /// Item kind
    pub kind: ItemKind,
    /// Amount
    pub count: u32,
}

/// World, reach and inventory configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// First row of solid ground
    pub ground_row: u32,
    /// Chance per surface column to grow a tree
    pub tree_chance: f32,
    /// Tile edge length in world pixels
    pub tile_size: u32,
    /// Mine/place reach in tiles
    pub reach_tiles: f32,
    /// Player spawn column
    pub spawn_tile_x: u32,
    /// Player spawn row
    pub spawn_tile_y: u32,
    /// Number of inventory slots
    pub hotbar_slots: usize,
    /// Stacks written into the first slots at session start
    pub starting_items: Vec<StartingStack>,
    /// Optional per-slot stack cap (`None` = unbounded)
    pub max_stack: Option<u32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 50,
            ground_row: 36,
            tree_chance: 0.06,
            tile_size: 32,
            reach_tiles: 6.0,
            spawn_tile_x: 10,
            spawn_tile_y: 30,
            hotbar_slots: 5,
            starting_items: vec![StartingStack { kind: ItemKind::Dirt, count: 50 }],
            max_stack: None,
        }
    }
}

impl WorldConfig {
    /// Tile edge length as a float.
    #[inline]
    pub fn tile_px(&self) -> f32 {
        self.tile_size as f32
    }
}

/// Player motion constants, in pixels per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Terminal downward speed
    pub max_fall_speed: f32,
    /// Horizontal speed cap
    pub max_run_speed: f32,
    /// Horizontal acceleration while grounded
    pub accel_ground: f32,
    /// Horizontal acceleration while airborne
    pub accel_air: f32,
    /// Fraction of vx removed per grounded frame without input
    pub friction_ground: f32,
    /// Initial upward speed of a jump
    pub jump_speed: f32,
    /// vy multiplier applied when jump is released while rising
    pub jump_cut_multiplier: f32,
    /// Frames a jump stays allowed after leaving ground
    pub coyote_frames: u32,
    /// Frames an early jump press is remembered
    pub jump_buffer_frames: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            max_fall_speed: 12.0,
            max_run_speed: 4.0,
            accel_ground: 0.8,
            accel_air: 0.4,
            friction_ground: 0.2,
            jump_speed: 11.0,
            jump_cut_multiplier: 0.5,
            coyote_frames: 6,
            jump_buffer_frames: 8,
        }
    }
}

/// Drop entity constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Terminal downward speed
    pub max_fall_speed: f32,
    /// Cap on |vx| and |vy|; keeps magnet pull from outrunning the resolver
    pub max_speed: f32,
    /// vx multiplier after an unobstructed horizontal step
    pub friction: f32,
    /// Acceleration toward the player inside the magnet radius
    pub magnet_accel: f32,
    /// Magnet radius in tiles
    pub magnet_radius_tiles: f32,
    /// Pickup radius in tiles
    pub pickup_radius_tiles: f32,
    /// Spawn vx is drawn from [-spread, spread)
    pub spawn_vx_spread: f32,
    /// Spawn vy is drawn from (-lift, 0]
    pub spawn_lift: f32,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            max_fall_speed: 10.0,
            max_speed: 24.0,
            friction: 0.8,
            magnet_accel: 0.7,
            magnet_radius_tiles: 6.0,
            pickup_radius_tiles: 1.0,
            spawn_vx_spread: 1.5,
            spawn_lift: 3.0,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid, reach and inventory
    pub world: WorldConfig,
    /// Player motion
    pub physics: PhysicsConfig,
    /// Drop motion and pickup
    pub drops: DropConfig,
}

impl SimConfig {
    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON (for dumping the effective config).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::InvalidDimensions { width: w.width, height: w.height });
        }
        if w.ground_row >= w.height {
            return Err(ConfigError::GroundRowOutOfRange { ground_row: w.ground_row, height: w.height });
        }
        if w.tile_size < 2 {
            return Err(ConfigError::InvalidTileSize(w.tile_size));
        }
        if w.spawn_tile_x >= w.width || w.spawn_tile_y >= w.height {
            return Err(ConfigError::SpawnOutOfBounds { x: w.spawn_tile_x, y: w.spawn_tile_y });
        }
        // Rows from ground_row down are Dirt, and the push-out above a
        // buried player only climbs one tile
        if w.spawn_tile_y >= w.ground_row {
            return Err(ConfigError::SpawnInsideGround { y: w.spawn_tile_y, ground_row: w.ground_row });
        }
        if w.hotbar_slots == 0 {
            return Err(ConfigError::NoHotbarSlots);
        }
        if w.starting_items.len() > w.hotbar_slots {
            return Err(ConfigError::TooManyStartingItems {
                items: w.starting_items.len(),
                slots: w.hotbar_slots,
            });
        }
        check_range("reach_tiles", w.reach_tiles, 0.0, f32::MAX)?;
        check_range("tree_chance", w.tree_chance, 0.0, 1.0)?;

        // The resolver corrects at most one tile per axis per frame, so no
        // body may move a full tile in one step.
        let p = &self.physics;
        let d = &self.drops;
        let speeds = [
            ("physics.max_fall_speed", p.max_fall_speed),
            ("physics.max_run_speed", p.max_run_speed),
            ("physics.jump_speed", p.jump_speed),
            ("drops.max_fall_speed", d.max_fall_speed),
            ("drops.max_speed", d.max_speed),
        ];
        for (name, speed) in speeds {
            check_range(name, speed, 0.0, f32::MAX)?;
            if speed >= w.tile_px() {
                return Err(ConfigError::SpeedExceedsTile { name, speed, tile_size: w.tile_size });
            }
        }

        check_range("physics.gravity", p.gravity, 0.0, f32::MAX)?;
        check_range("physics.accel_ground", p.accel_ground, 0.0, f32::MAX)?;
        check_range("physics.accel_air", p.accel_air, 0.0, f32::MAX)?;
        check_range("physics.friction_ground", p.friction_ground, 0.0, 1.0)?;
        check_range("physics.jump_cut_multiplier", p.jump_cut_multiplier, 0.0, 1.0)?;
        check_range("drops.gravity", d.gravity, 0.0, f32::MAX)?;
        check_range("drops.friction", d.friction, 0.0, 1.0)?;
        check_range("drops.magnet_accel", d.magnet_accel, 0.0, f32::MAX)?;
        check_range("drops.magnet_radius_tiles", d.magnet_radius_tiles, 0.0, f32::MAX)?;
        check_range("drops.pickup_radius_tiles", d.pickup_radius_tiles, 0.0, f32::MAX)?;
        check_range("drops.spawn_vx_spread", d.spawn_vx_spread, 0.0, d.max_speed)?;
        check_range("drops.spawn_lift", d.spawn_lift, 0.0, d.max_speed)?;

        Ok(())
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    // NaN fails both comparisons and is rejected here too
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = SimConfig::from_json(r#"{ "world": { "width": 64 }, "physics": { "jump_speed": 9.5 } }"#).unwrap();

        assert_eq!(config.world.width, 64);
        assert_eq!(config.world.height, 50);
        assert_eq!(config.physics.jump_speed, 9.5);
        assert_eq!(config.physics.coyote_frames, 6);
        assert_eq!(config.drops, DropConfig::default());
    }

    #[test]
    fn test_starting_items_from_json() {
        let config = SimConfig::from_json(
            r#"{ "world": { "starting_items": [ { "kind": "wood", "count": 3 } ] } }"#,
        )
        .unwrap();

        assert_eq!(config.world.starting_items, vec![StartingStack { kind: ItemKind::Wood, count: 3 }]);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SimConfig::from_json("{ world: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_speed_above_tile() {
        let mut config = SimConfig::default();
        config.physics.max_fall_speed = 32.0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::SpeedExceedsTile { name: "physics.max_fall_speed", .. }));
    }

    #[test]
    fn test_rejects_ground_below_grid() {
        let mut config = SimConfig::default();
        config.world.ground_row = 50;

        assert!(matches!(config.validate(), Err(ConfigError::GroundRowOutOfRange { .. })));
    }

    #[test]
    fn test_rejects_spawn_inside_ground() {
        let mut config = SimConfig::default();
        config.world.spawn_tile_y = 36;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnInsideGround { y: 36, ground_row: 36 })
        ));

        // A grid that is ground all the way up has nowhere to stand
        config.world.ground_row = 0;
        config.world.spawn_tile_y = 0;
        assert!(matches!(config.validate(), Err(ConfigError::SpawnInsideGround { .. })));

        config.world.ground_row = 1;
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_nan_multiplier() {
        let mut config = SimConfig::default();
        config.physics.jump_cut_multiplier = f32::NAN;

        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { name: "physics.jump_cut_multiplier", .. })));
    }

    #[test]
    fn test_rejects_overfull_hotbar() {
        let mut config = SimConfig::default();
        config.world.hotbar_slots = 1;
        config.world.starting_items.push(StartingStack { kind: ItemKind::Wood, count: 1 });

        assert!(matches!(config.validate(), Err(ConfigError::TooManyStartingItems { items: 2, slots: 1 })));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }
}
