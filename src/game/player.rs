//! Player Controller
//!
//! Horizontal acceleration and friction, gravity, and the jump state machine
//! (coyote time, jump buffering, variable jump height) on top of the shared
//! collision resolver.

use serde::{Serialize, Deserialize};

use crate::config::PhysicsConfig;
use crate::core::hash::StateHasher;
use crate::core::vec2::Vec2;
use crate::game::body::Body;
use crate::game::collision::{move_and_collide, MoveResult};
use crate::game::grid::TileGrid;
use crate::game::input::InputFrame;

/// The controllable body and its jump timers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Collision box
    pub body: Body,

    /// Standing on a solid tile after the last move
    pub on_ground: bool,

    /// Frames left in which a jump is still allowed after leaving ground
    pub coyote: u32,

    /// Frames left in which an early jump press is remembered
    pub jump_buffer: u32,

    /// Jump held during the previous frame (for press/release edges)
    pub jump_held: bool,

    /// Consecutive frames ended airborne
    pub air_frames: u32,
}

/// What a player step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerStep {
    /// A jump started this frame
    pub jumped: bool,
    /// Touched ground after more than one airborne frame. The pixel
    /// push-out can leave the body hovering a fraction above the floor for a
    /// single frame; those lift-offs are not landings.
    pub landed: bool,
    /// Resolver outcome
    pub movement: MoveResult,
}

impl Player {
    /// Create a player at a top-left position.
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            body: Body::new(position, width, height),
            on_ground: false,
            coyote: 0,
            jump_buffer: 0,
            jump_held: false,
            air_frames: 0,
        }
    }

    /// Create a one-tile player whose top-left sits on a tile's origin.
    pub fn spawn_at_tile(grid: &TileGrid, tile_x: i32, tile_y: i32) -> Self {
        let size = grid.tile_px();
        Self::new(grid.tile_origin_px(tile_x, tile_y), size, size)
    }

    /// Center of the player's box.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Advance one frame.
    pub fn step(&mut self, grid: &TileGrid, input: &InputFrame, physics: &PhysicsConfig) -> PlayerStep {
        let was_on_ground = self.on_ground;
        let jump_now = input.jump();
        let pressed = jump_now && !self.jump_held;
        let released = self.jump_held && !jump_now;

        // Horizontal
        let accel = if was_on_ground { physics.accel_ground } else { physics.accel_air };
        let vx = &mut self.body.velocity.x;
        match input.move_dir() {
            -1 => *vx = (*vx - accel).max(-physics.max_run_speed),
            1 => *vx = (*vx + accel).min(physics.max_run_speed),
            _ if was_on_ground => *vx *= 1.0 - physics.friction_ground,
            _ => {}
        }

        // Timers
        if was_on_ground {
            self.coyote = physics.coyote_frames;
        } else {
            self.coyote = self.coyote.saturating_sub(1);
        }
        if pressed {
            self.jump_buffer = physics.jump_buffer_frames;
        } else {
            self.jump_buffer = self.jump_buffer.saturating_sub(1);
        }

        let mut jumped = false;
        if self.jump_buffer > 0 && self.coyote > 0 {
            self.body.velocity.y = -physics.jump_speed;
            self.on_ground = false;
            self.jump_buffer = 0;
            jumped = true;
        }

        // Variable height
        if released && self.body.velocity.y < 0.0 {
            self.body.velocity.y *= physics.jump_cut_multiplier;
        }

        self.body.velocity.y = (self.body.velocity.y + physics.gravity).min(physics.max_fall_speed);

        let movement = move_and_collide(grid, &mut self.body);
        self.on_ground = movement.grounded();
        self.jump_held = jump_now;

        let landed = self.on_ground && self.air_frames > 1;
        if self.on_ground {
            self.air_frames = 0;
        } else {
            self.air_frames = self.air_frames.saturating_add(1);
        }

        PlayerStep {
            jumped,
            landed,
            movement,
        }
    }

    /// Hash player state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        self.body.hash_into(hasher);
        hasher.update_bool(self.on_ground);
        hasher.update_u32(self.coyote);
        hasher.update_u32(self.jump_buffer);
        hasher.update_bool(self.jump_held);
        hasher.update_u32(self.air_frames);
    }
}
