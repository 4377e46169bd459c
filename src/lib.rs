//! # Tilecraft Simulation Core
//!
//! Deterministic 2D tile-grid sandbox: a platforming player, mineable and
//! placeable terrain, item drops pulled in by a magnet, and a hotbar.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TILECRAFT CORE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Deterministic primitives                │
//! │  ├── vec2.rs       - 2D pixel-space vector                   │
//! │  ├── rng.rs        - Deterministic Xorshift128+ PRNG         │
//! │  └── hash.rs       - State hashing for verification          │
//! │                                                              │
//! │  config.rs         - Tuning constants, JSON overrides        │
//! │                                                              │
//! │  game/             - Simulation (deterministic)              │
//! │  ├── grid.rs       - Tile storage, bounds sentinel           │
//! │  ├── terrain.rs    - Ground fill and tree scattering         │
//! │  ├── collision.rs  - Axis-separated AABB resolver            │
//! │  ├── player.rs     - Run, jump, coyote time, jump buffer     │
//! │  ├── drops.rs      - Item drops, magnet, pickup              │
//! │  ├── interaction.rs- Reach-limited mine and place            │
//! │  ├── inventory.rs  - Hotbar slots                            │
//! │  ├── tick.rs       - Per-frame loop, replay                  │
//! │  └── snapshot.rs   - Read-only view for hosts                │
//! │                                                              │
//! │  session.rs        - Host-facing entry point                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! One frame runs to completion before the next, always in the same phase
//! order (selection, player, drops, tile action). All randomness comes from
//! a seeded Xorshift128+, and live drops are kept in spawn order.
//!
//! Given identical configuration, seed and inputs, the simulation produces
//! **identical state hashes** run after run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigError, SimConfig};
pub use core::rng::DeterministicRng;
pub use core::vec2::Vec2;
pub use game::input::{InputFrame, InputRecording, TileAction};
pub use game::snapshot::WorldSnapshot;
pub use game::tile::{ItemKind, Tile};
pub use session::{Session, SessionError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frame rate the physics constants are tuned for (Hz)
pub const FRAME_RATE: u32 = 60;
