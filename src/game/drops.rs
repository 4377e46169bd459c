//! Drop Simulation
//!
//! Items knocked out of mined tiles. Each drop falls under gravity, slides
//! with friction, and is pulled toward the player inside the magnet radius.
//! Drops close enough to the player are removed and handed back as pickups.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::config::DropConfig;
use crate::core::hash::StateHasher;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::body::Body;
use crate::game::collision::{resolve_axis, Axis};
use crate::game::grid::TileGrid;
use crate::game::tile::ItemKind;

/// Smallest drop edge in pixels.
pub const MIN_DROP_SIZE: f32 = 8.0;

/// Drops are this many pixels narrower than a tile.
pub const DROP_INSET: f32 = 6.0;

/// Centers closer than this are treated as coincident (no magnet direction).
const MAGNET_EPSILON: f32 = 1e-3;

/// A physical item in the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    /// Monotonic id, unique within a session
    pub id: u32,
    /// Item granted on pickup
    pub kind: ItemKind,
    /// Collision box
    pub body: Body,
    /// Frames since spawn
    pub age: u32,
}

/// A drop removed by the player this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pickup {
    /// Id of the removed drop
    pub drop_id: u32,
    /// Item to add to the inventory
    pub kind: ItemKind,
}

/// Owns every live drop.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DropSimulation {
    drops: Vec<Drop>,
    next_id: u32,
}

impl DropSimulation {
    /// No drops.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live drops in spawn order.
    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    /// Number of live drops.
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// True when no drops are live.
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Drop edge length for a tile size.
    #[inline]
    pub fn drop_size(tile_size: u32) -> f32 {
        (tile_size as f32 - DROP_INSET).max(MIN_DROP_SIZE)
    }

    /// Spawn a drop centered on a world point with a small random toss.
    ///
    /// Returns the new drop's id.
    pub fn spawn(
        &mut self,
        kind: ItemKind,
        center: Vec2,
        tile_size: u32,
        config: &DropConfig,
        rng: &mut DeterministicRng,
    ) -> u32 {
        let size = Self::drop_size(tile_size);
        let mut body = Body::centered_at(center, size, size);
        body.velocity = Vec2::new(
            rng.next_f32_range(-config.spawn_vx_spread, config.spawn_vx_spread),
            -rng.next_f32() * config.spawn_lift,
        );

        self.push(kind, body)
    }

    /// Insert a drop with an explicit body and no toss.
    #[cfg(test)]
    pub(crate) fn spawn_at_rest(&mut self, kind: ItemKind, body: Body) -> u32 {
        let mut body = body;
        body.velocity = Vec2::ZERO;
        self.push(kind, body)
    }

    fn push(&mut self, kind: ItemKind, body: Body) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.drops.push(Drop { id, kind, body, age: 0 });
        id
    }

    /// Advance every drop one frame, then remove the ones within pickup
    /// range of `player`.
    ///
    /// Each removed drop yields exactly one pickup.
    pub fn step(&mut self, grid: &TileGrid, player: &Body, config: &DropConfig) -> Vec<Pickup> {
        let tile = grid.tile_px();
        let magnet_radius = config.magnet_radius_tiles * tile;
        let pickup_radius = config.pickup_radius_tiles * tile;
        let target = player.center();

        for drop in &mut self.drops {
            drop.age += 1;
            let body = &mut drop.body;

            let to_player = target - body.center();
            let dist = to_player.length();
            if dist < magnet_radius && dist > MAGNET_EPSILON {
                body.velocity = body.velocity + to_player.normalize().scale(config.magnet_accel);
            }

            body.velocity.y = (body.velocity.y + config.gravity).min(config.max_fall_speed);
            body.velocity.x = body.velocity.x.clamp(-config.max_speed, config.max_speed);
            body.velocity.y = body.velocity.y.max(-config.max_speed);

            if !resolve_axis(grid, body, Axis::X).hit() {
                body.velocity.x *= config.friction;
            }
            resolve_axis(grid, body, Axis::Y);
        }

        let mut pickups = Vec::new();
        self.drops.retain(|drop| {
            if drop.body.center().distance(target) <= pickup_radius {
                pickups.push(Pickup { drop_id: drop.id, kind: drop.kind });
                false
            } else {
                true
            }
        });

        if !pickups.is_empty() {
            debug!(count = pickups.len(), remaining = self.drops.len(), "drops picked up");
        }
        pickups
    }

    /// Hash drop state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.next_id);
        hasher.update_u32(self.drops.len() as u32);
        for drop in &self.drops {
            hasher.update_u32(drop.id);
            hasher.update_u8(drop.kind as u8);
            hasher.update_u32(drop.age);
            drop.body.hash_into(hasher);
        }
    }
}
