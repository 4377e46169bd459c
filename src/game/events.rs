//! Game Events
//!
//! What happened during a frame, for hosts (sound, particles, UI) and for
//! replay comparison. Events never feed back into the simulation.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::interaction::ActionError;
use crate::game::tile::{ItemKind, Tile};

/// Ordering of events within a frame.
///
/// Lower value = earlier, matching the order the frame applies its phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Hotbar changes, applied before movement
    Selection = 0,
    /// Player jumps and landings
    Movement = 1,
    /// Drops collected
    Pickup = 2,
    /// Mining and placing
    Action = 3,
    /// Lowest priority
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Selected hotbar slot changed
    SlotSelected {
        /// New selected index
        slot: usize,
    },

    /// Player left the ground with a jump
    Jumped {
        /// Player top-left after the jump frame
        position: Vec2,
    },

    /// Player touched down after falling
    Landed {
        /// Player top-left on landing
        position: Vec2,
    },

    /// Drop entered the world
    DropSpawned {
        /// Drop id
        drop_id: u32,
        /// Item carried
        kind: ItemKind,
        /// Spawn center
        position: Vec2,
    },

    /// Drop reached the player and was removed
    DropCollected {
        /// Drop id
        drop_id: u32,
        /// Item carried
        kind: ItemKind,
        /// False when the inventory had no room and the item was lost
        stored: bool,
    },

    /// Tile removed
    TileMined {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
        /// What was there
        tile: Tile,
    },

    /// Tile placed from the inventory
    TilePlaced {
        /// Tile column
        x: i32,
        /// Tile row
        y: i32,
        /// What was written
        tile: Tile,
        /// Slot the item came from
        slot: usize,
    },

    /// A mine/place request was refused
    ActionRejected {
        /// Why
        reason: ActionError,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Emission order within the session (tie-breaking)
    pub seq: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event. `seq` is assigned when the event is pushed.
    pub fn new(frame: u32, priority: EventPriority, data: GameEventData) -> Self {
        Self {
            frame,
            priority,
            seq: 0,
            data,
        }
    }

    /// Create slot selected event.
    pub fn slot_selected(frame: u32, slot: usize) -> Self {
        Self::new(frame, EventPriority::Selection, GameEventData::SlotSelected { slot })
    }

    /// Create jumped event.
    pub fn jumped(frame: u32, position: Vec2) -> Self {
        Self::new(frame, EventPriority::Movement, GameEventData::Jumped { position })
    }

    /// Create landed event.
    pub fn landed(frame: u32, position: Vec2) -> Self {
        Self::new(frame, EventPriority::Movement, GameEventData::Landed { position })
    }

    /// Create drop collected event.
    pub fn drop_collected(frame: u32, drop_id: u32, kind: ItemKind, stored: bool) -> Self {
        Self::new(
            frame,
            EventPriority::Pickup,
            GameEventData::DropCollected { drop_id, kind, stored },
        )
    }

    /// Create drop spawned event.
    pub fn drop_spawned(frame: u32, drop_id: u32, kind: ItemKind, position: Vec2) -> Self {
        Self::new(
            frame,
            EventPriority::Action,
            GameEventData::DropSpawned { drop_id, kind, position },
        )
    }

    /// Create tile mined event.
    pub fn tile_mined(frame: u32, x: i32, y: i32, tile: Tile) -> Self {
        Self::new(frame, EventPriority::Action, GameEventData::TileMined { x, y, tile })
    }

    /// Create tile placed event.
    pub fn tile_placed(frame: u32, x: i32, y: i32, tile: Tile, slot: usize) -> Self {
        Self::new(
            frame,
            EventPriority::Action,
            GameEventData::TilePlaced { x, y, tile, slot },
        )
    }

    /// Create action rejected event.
    pub fn action_rejected(frame: u32, reason: ActionError) -> Self {
        Self::new(frame, EventPriority::Other, GameEventData::ActionRejected { reason })
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.priority == other.priority
            && self.seq == other.seq
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: frame, then priority, then emission order
        self.frame
            .cmp(&other.frame)
            .then(self.priority.cmp(&other.priority))
            .then(self.seq.cmp(&other.seq))
    }
}
