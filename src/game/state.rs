//! Session State
//!
//! Everything one frame reads and writes: the grid, the player, the drops,
//! the inventory and the RNG that feeds drop tosses. One owner, one writer.

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::config::SimConfig;
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::DeterministicRng;
use crate::game::drops::DropSimulation;
use crate::game::events::GameEvent;
use crate::game::grid::TileGrid;
use crate::game::interaction::InteractionGate;
use crate::game::inventory::Inventory;
use crate::game::player::Player;
use crate::game::terrain::TreeParams;
use crate::game::tile::Tile;

/// Complete state of a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// Frames advanced so far
    pub frame: u32,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state, shared by terrain and drop spawning
    pub rng: DeterministicRng,

    /// Block storage
    pub grid: TileGrid,

    /// The controllable body
    pub player: Player,

    /// Live drops
    pub drops: DropSimulation,

    /// Hotbar
    pub inventory: Inventory,

    /// Reach rules
    pub gate: InteractionGate,

    /// Events generated since the last `take_events`
    #[serde(skip)]
    pending_events: Vec<GameEvent>,

    /// Next event sequence number
    next_event_seq: u32,
}

impl SessionState {
    /// Generate a world from `seed` and place the player at the spawn tile.
    ///
    /// `config` is assumed valid; `Session::new` validates before calling.
    pub fn new(config: &SimConfig, seed: u64) -> Self {
        let w = &config.world;
        let mut rng = DeterministicRng::new(seed);
        let trees = TreeParams { chance: w.tree_chance, ..TreeParams::default() };
        let grid = TileGrid::generate(w.width, w.height, w.ground_row, w.tile_size, &trees, &mut rng);
        let player = Player::spawn_at_tile(&grid, w.spawn_tile_x as i32, w.spawn_tile_y as i32);
        let inventory = Inventory::with_starting_items(w.hotbar_slots, w.max_stack, &w.starting_items);

        info!(
            seed,
            width = w.width,
            height = w.height,
            wood = grid.count(Tile::Wood),
            leaves = grid.count(Tile::Leaves),
            "world generated"
        );

        Self {
            frame: 0,
            rng_seed: seed,
            rng,
            grid,
            player,
            drops: DropSimulation::new(),
            inventory,
            gate: InteractionGate::new(w.reach_tiles),
            pending_events: Vec::new(),
            next_event_seq: 0,
        }
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.rng_seed, |hasher| {
            let [s0, s1] = self.rng.state();
            hasher.update_u64(s0);
            hasher.update_u64(s1);

            self.grid.hash_into(hasher);
            self.player.hash_into(hasher);
            self.drops.hash_into(hasher);
            self.inventory.hash_into(hasher);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event, stamping its emission order.
    pub fn push_event(&mut self, mut event: GameEvent) {
        event.seq = self.next_event_seq;
        self.next_event_seq = self.next_event_seq.wrapping_add(1);
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
