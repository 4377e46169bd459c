//! World Snapshot
//!
//! Read-only copy of what a rendering host needs for one frame. Tiles are
//! flattened to their raw ids, row-major. Serialized as JSON for debugging
//! ease, with binary (bincode) for hot paths.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::body::Body;
use crate::game::inventory::InventorySlot;
use crate::game::state::SessionState;
use crate::game::tile::{ItemKind, Tile};

/// Drop as seen by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropView {
    /// Drop id
    pub id: u32,
    /// Item carried
    pub kind: ItemKind,
    /// Collision box
    pub body: Body,
}

/// Everything a host draws for a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Frame the snapshot was taken after
    pub frame: u32,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Tile edge in pixels
    pub tile_size: u32,
    /// Raw tile ids, row-major
    pub tiles: Vec<u8>,
    /// Player collision box
    pub player: Body,
    /// Player standing on a solid tile
    pub on_ground: bool,
    /// Live drops
    pub drops: Vec<DropView>,
    /// Hotbar contents
    pub slots: Vec<InventorySlot>,
    /// Selected hotbar index
    pub selected: usize,
}

impl WorldSnapshot {
    /// Copy the drawable parts of `state`.
    pub fn from_state(state: &SessionState) -> Self {
        let grid = &state.grid;
        Self {
            frame: state.frame,
            width: grid.width(),
            height: grid.height(),
            tile_size: grid.tile_size(),
            tiles: grid.tiles().iter().map(|&t| t as u8).collect(),
            player: state.player.body,
            on_ground: state.player.on_ground,
            drops: state
                .drops
                .drops()
                .iter()
                .map(|d| DropView { id: d.id, kind: d.kind, body: d.body })
                .collect(),
            slots: state.inventory.slots().to_vec(),
            selected: state.inventory.selected(),
        }
    }

    /// Tile at a grid coordinate, `None` outside the snapshot.
    pub fn tile_at(&self, x: u32, y: u32) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y * self.width + x) as usize;
        self.tiles.get(index).copied().and_then(Tile::from_index)
    }

    /// Player top-left in pixels.
    pub fn player_position(&self) -> Vec2 {
        self.player.position
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}
