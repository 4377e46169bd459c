//! Input Capture and Recording
//!
//! One `InputFrame` per simulation frame: held buttons as bit flags plus an
//! optional one-shot tile action and slot selection. `InputRecording` keeps
//! only the frames where input changed, which is enough to replay a session.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Mine or place request targeting a tile coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileAction {
    /// Remove the tile and spawn its drop
    Mine {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
    },
    /// Place from the selected inventory slot
    Place {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
    },
}

/// Input state for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Held buttons (packed bits):
    /// - Bit 0: left
    /// - Bit 1: right
    /// - Bit 2: jump
    pub flags: u8,

    /// Tile action applied after bodies move this frame
    pub action: Option<TileAction>,

    /// Hotbar slot chosen this frame
    pub select_slot: Option<u8>,
}

impl InputFrame {
    /// Left held
    pub const FLAG_LEFT: u8 = 0x01;

    /// Right held
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Jump held
    pub const FLAG_JUMP: u8 = 0x04;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            flags: 0,
            action: None,
            select_slot: None,
        }
    }

    /// Create a frame from held buttons.
    pub const fn held(left: bool, right: bool, jump: bool) -> Self {
        let mut flags = 0;
        if left {
            flags |= Self::FLAG_LEFT;
        }
        if right {
            flags |= Self::FLAG_RIGHT;
        }
        if jump {
            flags |= Self::FLAG_JUMP;
        }
        Self {
            flags,
            action: None,
            select_slot: None,
        }
    }

    /// Attach a tile action.
    pub fn with_action(mut self, action: TileAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Attach a slot selection.
    pub fn with_slot(mut self, slot: u8) -> Self {
        self.select_slot = Some(slot);
        self
    }

    /// Left held.
    #[inline]
    pub fn left(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Right held.
    #[inline]
    pub fn right(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Jump held.
    #[inline]
    pub fn jump(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Horizontal intent: -1, 0 or +1. Both held cancels out.
    #[inline]
    pub fn move_dir(&self) -> i8 {
        match (self.left(), self.right()) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.flags);
        match self.action {
            None => hasher.update_u8(0),
            Some(TileAction::Mine { x, y }) => {
                hasher.update_u8(1);
                hasher.update_u32(x as u32);
                hasher.update_u32(y as u32);
            }
            Some(TileAction::Place { x, y }) => {
                hasher.update_u8(2);
                hasher.update_u32(x as u32);
                hasher.update_u32(y as u32);
            }
        }
        hasher.update_u8(self.select_slot.map_or(0, |s| s.wrapping_add(1)));
    }
}

/// Input change at a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Frame when this input state began
    pub frame: u32,
    /// The new input state
    pub input: InputFrame,
}

// =============================================================================
// RECORDING
// =============================================================================

/// Delta-compressed input log for one session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed the session was created with
    pub rng_seed: u64,

    /// Last recorded frame
    pub end_frame: u32,

    /// Only frames where input changed
    deltas: Vec<InputDelta>,

    #[serde(skip)]
    last_input: InputFrame,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            end_frame: 0,
            deltas: Vec::with_capacity(256),
            last_input: InputFrame::new(),
        }
    }

    /// Record input for a frame. Only stored if it differs from the last one.
    pub fn record(&mut self, frame: u32, input: InputFrame) {
        self.end_frame = frame;

        if input != self.last_input {
            self.deltas.push(InputDelta { frame, input });
            self.last_input = input;
        }
    }

    /// Input in effect at a frame.
    pub fn get_input_at(&self, frame: u32) -> InputFrame {
        // Last delta at or before this frame
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].input
        }
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Hash of the recorded inputs, for pairing a recording with a result.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u64(self.rng_seed);
        hasher.update_u32(self.end_frame);
        for delta in &self.deltas {
            hasher.update_u32(delta.frame);
            delta.input.hash_into(&mut hasher);
        }
        hasher.finalize()
    }
}

// =============================================================================
// TESTS
// =============================================================================
