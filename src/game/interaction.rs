//! Interaction Gate
//!
//! Validates and applies mining and placing. Every check runs before any
//! mutation, so a rejected action leaves the grid, the drops and the
//! inventory exactly as they were.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::config::DropConfig;
use crate::core::rng::DeterministicRng;
use crate::game::body::Body;
use crate::game::drops::DropSimulation;
use crate::game::grid::TileGrid;
use crate::game::inventory::Inventory;
use crate::game::tile::{ItemKind, Tile};

/// Why a mine or place request was refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    /// Tile center is farther from the player than the reach
    #[error("tile ({x}, {y}) is out of reach")]
    OutOfReach {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
    },

    /// Tile coordinate lies outside the grid
    #[error("tile ({x}, {y}) is outside the world")]
    OutOfBounds {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
    },

    /// Nothing to mine
    #[error("tile ({x}, {y}) is empty")]
    EmptyTile {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
    },

    /// Something is already there
    #[error("tile ({x}, {y}) is occupied")]
    Occupied {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
    },

    /// The tile would overlap the player
    #[error("tile ({x}, {y}) overlaps the player")]
    OverlapsPlayer {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
    },

    /// Selected slot is empty or holds nothing placeable
    #[error("slot {slot} has nothing to place")]
    NothingToPlace {
        /// Slot index
        slot: usize,
    },
}

impl ActionError {
    /// Rejections the player does not need to hear about: clicking with an
    /// empty or non-placeable slot is a no-op, not a failure.
    pub fn is_silent(&self) -> bool {
        matches!(self, ActionError::NothingToPlace { .. })
    }
}

/// Result of a successful mine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mined {
    /// Tile that was removed
    pub tile: Tile,
    /// Kind of the spawned drop
    pub kind: ItemKind,
    /// Id of the spawned drop
    pub drop_id: u32,
}

/// Result of a successful place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placed {
    /// Tile written
    pub tile: Tile,
    /// Item consumed
    pub kind: ItemKind,
    /// Slot it came from
    pub slot: usize,
}

/// Reach-limited mine/place rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionGate {
    /// Reach in tiles, measured center to center
    pub reach_tiles: f32,
}

impl InteractionGate {
    /// Create a gate with the given reach.
    pub fn new(reach_tiles: f32) -> Self {
        Self { reach_tiles }
    }

    /// Is the tile's center within reach of the player's center?
    pub fn within_reach(&self, grid: &TileGrid, player: &Body, x: i32, y: i32) -> bool {
        let tile = grid.tile_px();
        let offset = grid.tile_center_px(x, y) - player.center();
        offset.scale(1.0 / tile).length() <= self.reach_tiles
    }

    /// Placement checks that do not involve the inventory: in bounds, empty,
    /// and clear of the player's box.
    pub fn can_place_at(&self, grid: &TileGrid, player: &Body, x: i32, y: i32) -> Result<(), ActionError> {
        if !grid.in_bounds(x, y) {
            return Err(ActionError::OutOfBounds { x, y });
        }
        if !grid.tile_at(x, y).is_empty() {
            return Err(ActionError::Occupied { x, y });
        }
        let origin = grid.tile_origin_px(x, y);
        let size = grid.tile_px();
        if player.intersects_rect(origin.x, origin.y, size, size) {
            return Err(ActionError::OverlapsPlayer { x, y });
        }
        Ok(())
    }

    /// Remove a tile and spawn one drop of its kind at the tile's center.
    #[allow(clippy::too_many_arguments)]
    pub fn mine(
        &self,
        grid: &mut TileGrid,
        drops: &mut DropSimulation,
        player: &Body,
        x: i32,
        y: i32,
        drop_config: &DropConfig,
        rng: &mut DeterministicRng,
    ) -> Result<Mined, ActionError> {
        if !self.within_reach(grid, player, x, y) {
            return Err(ActionError::OutOfReach { x, y });
        }
        // The Dirt reported outside the grid is a sentinel, not minable ground
        if !grid.in_bounds(x, y) {
            return Err(ActionError::OutOfBounds { x, y });
        }
        let tile = grid.tile_at(x, y);
        let Some(kind) = tile.drop_item() else {
            return Err(ActionError::EmptyTile { x, y });
        };

        let drop_id = drops.spawn(kind, grid.tile_center_px(x, y), grid.tile_size(), drop_config, rng);
        grid.set_tile(x, y, Tile::Empty);

        debug!(x, y, ?tile, drop_id, "tile mined");
        Ok(Mined { tile, kind, drop_id })
    }

    /// Place one item from `slot` at a tile.
    pub fn place(
        &self,
        grid: &mut TileGrid,
        inventory: &mut Inventory,
        player: &Body,
        x: i32,
        y: i32,
        slot: usize,
    ) -> Result<Placed, ActionError> {
        if !self.within_reach(grid, player, x, y) {
            return Err(ActionError::OutOfReach { x, y });
        }
        self.can_place_at(grid, player, x, y)?;

        let nothing = ActionError::NothingToPlace { slot };
        let kind = inventory.slot(slot).and_then(|s| s.item).ok_or(nothing)?;
        let tile = kind.placed_tile().ok_or(nothing)?;
        if !inventory.consume(slot, kind, 1) {
            return Err(nothing);
        }
        grid.set_tile(x, y, tile);

        debug!(x, y, ?tile, slot, "tile placed");
        Ok(Placed { tile, kind, slot })
    }
}
