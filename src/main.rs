//! Tilecraft headless driver
//!
//! Runs a scripted session against the simulation core and verifies that
//! replaying its recording reproduces the same state hash.
//!
//! Usage: `tilecraft-sim [config.json]`

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tilecraft::{
    FRAME_RATE, VERSION,
    InputFrame, ItemKind, Session, SimConfig, Tile, TileAction,
    game::{events::GameEventData, tick::{replay_session, FrameResult}},
};

const DEMO_SEED: u64 = 12345;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    info!("Tilecraft Sim v{}", VERSION);
    info!("Frame Rate: {} Hz", FRAME_RATE);

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            SimConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => SimConfig::default(),
    };

    demo_session(config)
}

/// Drive a session through every kind of interaction.
fn demo_session(config: SimConfig) -> Result<()> {
    info!("=== Starting Demo Session ===");
    let mut session = Session::new(config.clone(), DEMO_SEED)?;
    info!("RNG Seed: {}", DEMO_SEED);

    // Fall onto the ground
    run(&mut session, InputFrame::new(), 60);

    // Walk right, hopping now and then
    for f in 0..120 {
        let input = InputFrame::held(false, true, f % 30 < 8);
        report(&session.advance_frame(input));
    }
    run(&mut session, InputFrame::new(), 30);

    // Chop whatever tree is in reach, otherwise dig beside the player
    let mut targets = reachable_tiles(&session, Tile::Wood);
    if targets.is_empty() {
        info!("No tree in reach, digging instead");
        targets = reachable_tiles(&session, Tile::Dirt).into_iter().take(3).collect();
    }
    for (x, y) in targets {
        report(&session.advance_frame(InputFrame::new().with_action(TileAction::Mine { x, y })));
    }

    // Let the drops come in
    run(&mut session, InputFrame::new(), 120);

    // Build with whatever wood was gathered, dirt otherwise
    let slot = session
        .state()
        .inventory
        .slots()
        .iter()
        .position(|s| s.holds(ItemKind::Wood))
        .unwrap_or(0);
    let spots: Vec<_> = reachable_tiles(&session, Tile::Empty).into_iter().take(4).collect();
    for (i, (x, y)) in spots.into_iter().enumerate() {
        let mut input = InputFrame::new().with_action(TileAction::Place { x, y });
        if i == 0 {
            input = input.with_slot(slot as u8);
        }
        report(&session.advance_frame(input));
    }
    run(&mut session, InputFrame::new(), 30);

    // Print final results
    info!("=== Session Results ===");
    let state = session.state();
    for (i, s) in state.inventory.slots().iter().enumerate() {
        if let Some(kind) = s.item {
            info!("Slot {}: {} x{}", i, kind.name(), s.count);
        }
    }
    let hash = session.compute_hash();
    info!("Frames: {}", session.frame());
    info!("Recorded deltas: {}", session.recording().delta_count());
    info!("Final State Hash: {}", hex::encode(hash));

    let snapshot = session.snapshot().to_bytes().context("encoding snapshot")?;
    info!("Snapshot size: {} bytes", snapshot.len());

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay_session(&config, session.recording(), session.frame());
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        anyhow::bail!("DETERMINISM FAILURE: Hashes differ!")
    }
}

fn run(session: &mut Session, input: InputFrame, frames: u32) {
    for _ in 0..frames {
        report(&session.advance_frame(input));
    }
}

/// Tiles of `kind` within reach of the player, nearest rows first.
fn reachable_tiles(session: &Session, kind: Tile) -> Vec<(i32, i32)> {
    let state = session.state();
    let grid = &state.grid;
    let body = &state.player.body;
    let center = state.player.center();
    let (px, py) = grid.pixel_to_tile(center.x, center.y);
    let reach = state.gate.reach_tiles.ceil() as i32;

    let mut found = Vec::new();
    for y in (py - reach)..=(py + reach) {
        for x in (px - reach)..=(px + reach) {
            if grid.in_bounds(x, y)
                && grid.tile_at(x, y) == kind
                && state.gate.within_reach(grid, body, x, y)
                && (kind != Tile::Empty || state.gate.can_place_at(grid, body, x, y).is_ok())
            {
                found.push((x, y));
            }
        }
    }
    // Trees top down; everything else closest to the player's row first
    if kind != Tile::Wood {
        found.sort_by_key(|&(x, y)| ((y - py).abs(), (x - px).abs()));
    }
    found
}

fn report(result: &FrameResult) {
    for event in &result.events {
        match &event.data {
            GameEventData::TileMined { x, y, tile } => {
                info!("Frame {}: mined {:?} at ({}, {})", result.frame, tile, x, y);
            }
            GameEventData::TilePlaced { x, y, tile, slot } => {
                info!("Frame {}: placed {:?} at ({}, {}) from slot {}", result.frame, tile, x, y, slot);
            }
            GameEventData::DropCollected { kind, stored, .. } => {
                info!("Frame {}: picked up {} (stored: {})", result.frame, kind.name(), stored);
            }
            GameEventData::ActionRejected { reason } => {
                info!("Frame {}: rejected: {}", result.frame, reason);
            }
            _ => {}
        }
    }
}
