//! Game Logic Module
//!
//! All simulation code. Deterministic given a seed and an input stream.
//!
//! ## Module Structure
//!
//! - `tile`, `grid`, `terrain`: Block storage and world generation
//! - `body`, `collision`: Shared AABB and the axis-separated resolver
//! - `input`: Input frames and delta-compressed recording
//! - `player`: Run, jump, coyote time and jump buffering
//! - `drops`: Item drops with magnet and pickup
//! - `inventory`: Hotbar slots and stacks
//! - `interaction`: Reach-limited mine and place
//! - `events`: Game events for hosts and replay comparison
//! - `state`, `tick`: Session state and the per-frame loop
//! - `snapshot`: Read-only view handed to rendering hosts

pub mod tile;
pub mod grid;
pub mod terrain;
pub mod body;
pub mod collision;
pub mod input;
pub mod player;
pub mod drops;
pub mod inventory;
pub mod interaction;
pub mod events;
pub mod state;
pub mod tick;
pub mod snapshot;

// Re-export key types
pub use tile::{ItemKind, Tile};
pub use grid::TileGrid;
pub use body::Body;
pub use input::{InputFrame, InputRecording, TileAction};
pub use player::Player;
pub use drops::{Drop, DropSimulation};
pub use inventory::{Inventory, InventorySlot};
pub use interaction::{ActionError, InteractionGate};
pub use events::{GameEvent, GameEventData};
pub use state::SessionState;
pub use tick::FrameResult;
pub use snapshot::WorldSnapshot;
