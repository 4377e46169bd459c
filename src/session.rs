//! Session
//!
//! The host-facing entry point. Owns the configuration, the session state
//! and the input recording, and exposes the operations a host drives a
//! world with: frame steps, direct mine/place, slot selection and drop
//! spawning.
//!
//! Only `advance_frame` inputs are recorded. Direct `mine`, `place`,
//! `select_slot`, `scroll_slot` and `spawn_drop` calls change the world
//! outside the recording, so a replay of a session that used them will
//! diverge.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, SimConfig};
use crate::core::hash::StateHash;
use crate::core::vec2::Vec2;
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputRecording};
use crate::game::interaction::{ActionError, Mined, Placed};
use crate::game::snapshot::WorldSnapshot;
use crate::game::state::SessionState;
use crate::game::tick::{self, FrameResult};
use crate::game::tile::ItemKind;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Slot index outside the hotbar.
    #[error("slot {index} out of range (hotbar has {slots} slots)")]
    InvalidSlot {
        /// Requested index
        index: usize,
        /// Hotbar size
        slots: usize,
    },

    /// Configuration rejected at startup.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A running world.
pub struct Session {
    config: SimConfig,
    state: SessionState,
    recording: InputRecording,
}

impl Session {
    /// Validate `config` and generate a world from `seed`.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SessionError> {
        config.validate()?;

        let state = SessionState::new(&config, seed);
        info!(
            seed,
            slots = state.inventory.len(),
            reach = config.world.reach_tiles,
            "session created"
        );

        Ok(Self {
            config,
            state,
            recording: InputRecording::new(seed),
        })
    }

    /// Advance one frame with `input`, recording it.
    pub fn advance_frame(&mut self, input: InputFrame) -> FrameResult {
        self.recording.record(self.state.frame + 1, input);
        tick::advance_frame(&mut self.state, &input, &self.config)
    }

    /// Mine the tile at `(x, y)` now.
    pub fn mine(&mut self, x: i32, y: i32) -> Result<Mined, ActionError> {
        let result = tick::apply_mine(&mut self.state, x, y, &self.config);
        if let Err(reason) = result {
            tick::report_rejection(&mut self.state, reason);
        }
        result
    }

    /// Place from `slot` at `(x, y)` now.
    pub fn place(&mut self, x: i32, y: i32, slot: usize) -> Result<Placed, ActionError> {
        let result = tick::apply_place(&mut self.state, x, y, slot);
        if let Err(reason) = result {
            tick::report_rejection(&mut self.state, reason);
        }
        result
    }

    /// Select a hotbar slot.
    pub fn select_slot(&mut self, index: usize) -> Result<(), SessionError> {
        if tick::select_slot(&mut self.state, index) {
            Ok(())
        } else {
            Err(SessionError::InvalidSlot {
                index,
                slots: self.state.inventory.len(),
            })
        }
    }

    /// Move the selection by `delta` slots, wrapping around.
    pub fn scroll_slot(&mut self, delta: i32) {
        self.state.inventory.scroll(delta);
        let frame = self.state.frame;
        let slot = self.state.inventory.selected();
        self.state.push_event(GameEvent::slot_selected(frame, slot));
    }

    /// Spawn a drop centered at pixel `(x, y)` with the same random toss a
    /// mined tile gets. Returns its id.
    pub fn spawn_drop(&mut self, kind: ItemKind, x: f32, y: f32) -> u32 {
        let center = Vec2::new(x, y);
        let tile_size = self.state.grid.tile_size();
        let id = self
            .state
            .drops
            .spawn(kind, center, tile_size, &self.config.drops, &mut self.state.rng);

        debug!(id, kind = kind.name(), x, y, "drop spawned");
        let frame = self.state.frame;
        self.state.push_event(GameEvent::drop_spawned(frame, id, kind, center));
        id
    }

    /// Events raised by direct calls since the last frame step.
    ///
    /// `advance_frame` returns these together with its own.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        let mut events = self.state.take_events();
        events.sort();
        events
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::from_state(&self.state)
    }

    /// Hash of the current state.
    pub fn compute_hash(&self) -> StateHash {
        self.state.compute_hash()
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u32 {
        self.state.frame
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Inputs recorded so far.
    pub fn recording(&self) -> &InputRecording {
        &self.recording
    }
}
