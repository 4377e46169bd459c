//! Frame Step
//!
//! The per-frame loop. Phases run in a fixed order: slot selection, player,
//! drops, then the frame's tile action. Given the same config, seed and
//! inputs, every run produces the same states and the same events.

use tracing::{debug, trace};

use crate::config::SimConfig;
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputRecording, TileAction};
use crate::game::interaction::{ActionError, Mined, Placed};
use crate::game::state::SessionState;

/// Result of a frame.
#[derive(Debug, Default)]
pub struct FrameResult {
    /// Frame number just completed
    pub frame: u32,
    /// Events generated this frame, sorted
    pub events: Vec<GameEvent>,
}

/// Run one simulation frame.
///
/// # Arguments
///
/// * `state` - The session state (will be mutated)
/// * `input` - Input held/requested this frame
/// * `config` - Simulation configuration
pub fn advance_frame(state: &mut SessionState, input: &InputFrame, config: &SimConfig) -> FrameResult {
    // 0. Advance frame counter
    state.frame += 1;
    let frame = state.frame;

    // 1. Hotbar selection
    if let Some(slot) = input.select_slot {
        select_slot(state, slot as usize);
    }

    // 2. Player
    let step = state.player.step(&state.grid, input, &config.physics);
    if step.jumped {
        trace!(frame, "jumped");
        state.push_event(GameEvent::jumped(frame, state.player.body.position));
    }
    if step.landed {
        trace!(frame, "landed");
        state.push_event(GameEvent::landed(frame, state.player.body.position));
    }

    // 3. Drops
    let pickups = state.drops.step(&state.grid, &state.player.body, &config.drops);
    for pickup in pickups {
        let leftover = state.inventory.add(pickup.kind, 1);
        if leftover > 0 {
            debug!(frame, kind = pickup.kind.name(), "inventory full, pickup lost");
        }
        state.push_event(GameEvent::drop_collected(frame, pickup.drop_id, pickup.kind, leftover == 0));
    }

    // 4. Tile action
    if let Some(action) = input.action {
        let result = match action {
            TileAction::Mine { x, y } => apply_mine(state, x, y, config).map(|_| ()),
            TileAction::Place { x, y } => {
                let slot = state.inventory.selected();
                apply_place(state, x, y, slot).map(|_| ())
            }
        };
        if let Err(reason) = result {
            report_rejection(state, reason);
        }
    }

    let mut events = state.take_events();
    events.sort();

    FrameResult { frame, events }
}

/// Select a hotbar slot. Out-of-range indices are ignored.
///
/// Returns whether the selection was applied.
pub fn select_slot(state: &mut SessionState, slot: usize) -> bool {
    if !state.inventory.select(slot) {
        debug!(slot, slots = state.inventory.len(), "slot selection out of range");
        return false;
    }
    let frame = state.frame;
    state.push_event(GameEvent::slot_selected(frame, slot));
    true
}

/// Mine a tile and record the resulting events.
pub fn apply_mine(state: &mut SessionState, x: i32, y: i32, config: &SimConfig) -> Result<Mined, ActionError> {
    let mined = state.gate.mine(
        &mut state.grid,
        &mut state.drops,
        &state.player.body,
        x,
        y,
        &config.drops,
        &mut state.rng,
    )?;

    let frame = state.frame;
    let center = state.grid.tile_center_px(x, y);
    state.push_event(GameEvent::tile_mined(frame, x, y, mined.tile));
    state.push_event(GameEvent::drop_spawned(frame, mined.drop_id, mined.kind, center));
    Ok(mined)
}

/// Place from `slot` and record the resulting event.
pub fn apply_place(state: &mut SessionState, x: i32, y: i32, slot: usize) -> Result<Placed, ActionError> {
    let placed = state.gate.place(
        &mut state.grid,
        &mut state.inventory,
        &state.player.body,
        x,
        y,
        slot,
    )?;

    let frame = state.frame;
    state.push_event(GameEvent::tile_placed(frame, x, y, placed.tile, slot));
    Ok(placed)
}

/// Record a refused action. Silent refusals produce no event.
pub fn report_rejection(state: &mut SessionState, reason: ActionError) {
    if reason.is_silent() {
        return;
    }
    debug!(frame = state.frame, %reason, "action rejected");
    let frame = state.frame;
    state.push_event(GameEvent::action_rejected(frame, reason));
}

/// Replay a session from recorded inputs.
///
/// Rebuilds the world from the recording's seed and drives frames
/// `1..=frame_count` with the input in effect at each frame.
pub fn replay_session(
    config: &SimConfig,
    recording: &InputRecording,
    frame_count: u32,
) -> (SessionState, Vec<GameEvent>) {
    let mut state = SessionState::new(config, recording.rng_seed);
    let mut all_events = Vec::new();

    for frame in 1..=frame_count {
        let input = recording.get_input_at(frame);
        let result = advance_frame(&mut state, &input, config);
        all_events.extend(result.events);
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::{EventPriority, GameEventData};
    use crate::game::tile::{ItemKind, Tile};

    /// Flat world with no trees, so tile positions near spawn are known.
    fn flat_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.world.tree_chance = 0.0;
        config
    }

    /// Settle the player onto the ground.
    fn settled(config: &SimConfig, seed: u64) -> SessionState {
        let mut state = SessionState::new(config, seed);
        for _ in 0..120 {
            advance_frame(&mut state, &InputFrame::new(), config);
        }
        state
    }

    /// Column the player stands in and the ground row below it.
    fn feet(state: &SessionState) -> (i32, i32) {
        let c = state.player.center();
        let (tx, ty) = state.grid.pixel_to_tile(c.x, c.y);
        (tx, ty + 1)
    }

    #[test]
    fn test_frame_determinism() {
        let config = SimConfig::default();
        let mut a = SessionState::new(&config, 12345);
        let mut b = SessionState::new(&config, 12345);
        let walk = InputFrame::held(false, true, false);
        let hop = InputFrame::held(false, true, true);

        for f in 0..300 {
            let input = if f % 40 < 5 { hop } else { walk };
            advance_frame(&mut a, &input, &config);
            advance_frame(&mut b, &input, &config);
        }

        assert_eq!(a.frame, 300);
        assert_eq!(a.compute_hash(), b.compute_hash());
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_player_falls_to_ground_on_start() {
        let config = flat_config();
        let state = settled(&config, 5);

        let (x, below) = feet(&state);
        assert_eq!(x, config.world.spawn_tile_x as i32);
        assert_eq!(below, config.world.ground_row as i32);
        assert!(state.player.coyote > 0);
    }

    #[test]
    fn test_mined_block_drops_and_returns() {
        let config = flat_config();
        let mut state = settled(&config, 5);
        let (x, ground) = feet(&state);
        let (tx, ty) = (x + 2, ground - 1);

        let place = InputFrame::new().with_action(TileAction::Place { x: tx, y: ty });
        advance_frame(&mut state, &place, &config);
        assert_eq!(state.grid.tile_at(tx, ty), Tile::Dirt);
        assert_eq!(state.inventory.count_of(ItemKind::Dirt), 49);

        let mine = InputFrame::new().with_action(TileAction::Mine { x: tx, y: ty });
        let result = advance_frame(&mut state, &mine, &config);

        assert_eq!(state.grid.tile_at(tx, ty), Tile::Empty);
        assert!(result.events.iter().any(|e| matches!(e.data, GameEventData::TileMined { tile: Tile::Dirt, .. })));
        assert!(result.events.iter().any(|e| matches!(e.data, GameEventData::DropSpawned { kind: ItemKind::Dirt, .. })));
        assert_eq!(state.drops.len(), 1);

        // The drop lands two tiles away; the magnet brings it in
        let mut collected = false;
        for _ in 0..120 {
            let result = advance_frame(&mut state, &InputFrame::new(), &config);
            if result.events.iter().any(|e| matches!(e.data, GameEventData::DropCollected { stored: true, .. })) {
                collected = true;
                break;
            }
        }
        assert!(collected);
        assert!(state.drops.is_empty());
        assert_eq!(state.inventory.count_of(ItemKind::Dirt), 50);
    }

    #[test]
    fn test_place_uses_selected_slot_and_silent_when_empty() {
        let config = flat_config();
        let mut state = settled(&config, 5);
        let (x, ground) = feet(&state);
        let target = (x + 2, ground - 1);

        // Slot 1 is empty: nothing happens and nothing is reported
        let place_empty = InputFrame::new()
            .with_slot(1)
            .with_action(TileAction::Place { x: target.0, y: target.1 });
        let result = advance_frame(&mut state, &place_empty, &config);
        assert_eq!(state.inventory.selected(), 1);
        assert_eq!(state.grid.tile_at(target.0, target.1), Tile::Empty);
        assert!(!result.events.iter().any(|e| matches!(e.data, GameEventData::ActionRejected { .. })));

        let place_dirt = InputFrame::new()
            .with_slot(0)
            .with_action(TileAction::Place { x: target.0, y: target.1 });
        let result = advance_frame(&mut state, &place_dirt, &config);
        assert_eq!(state.grid.tile_at(target.0, target.1), Tile::Dirt);
        assert_eq!(state.inventory.slot(0).unwrap().count, 49);

        // Selection is reported before the placement
        let first = result.events.first().unwrap();
        let last = result.events.last().unwrap();
        assert_eq!(first.priority, EventPriority::Selection);
        assert!(matches!(last.data, GameEventData::TilePlaced { slot: 0, tile: Tile::Dirt, .. }));
    }

    #[test]
    fn test_invalid_slot_ignored() {
        let config = flat_config();
        let mut state = settled(&config, 5);

        let result = advance_frame(&mut state, &InputFrame::new().with_slot(9), &config);
        assert_eq!(state.inventory.selected(), 0);
        assert!(!result.events.iter().any(|e| matches!(e.data, GameEventData::SlotSelected { .. })));
    }

    #[test]
    fn test_rejected_action_reported() {
        let config = flat_config();
        let mut state = settled(&config, 5);

        let far = InputFrame::new().with_action(TileAction::Mine { x: 90, y: 40 });
        let result = advance_frame(&mut state, &far, &config);

        assert!(result.events.iter().any(|e| matches!(
            e.data,
            GameEventData::ActionRejected { reason: ActionError::OutOfReach { x: 90, y: 40 } }
        )));
        assert_eq!(state.grid.tile_at(90, 40), Tile::Dirt);
    }

    #[test]
    fn test_replay_determinism() {
        let config = SimConfig::default();
        let mut state = SessionState::new(&config, 99999);
        let mut recording = InputRecording::new(99999);
        let mut live_events = Vec::new();

        for f in 1..=200u32 {
            let mut input = InputFrame::held(f % 60 > 30, f % 60 <= 30, f % 25 == 0);
            if f == 150 {
                let (x, y) = feet(&state);
                input = input.with_action(TileAction::Mine { x, y });
            }
            recording.record(f, input);
            live_events.extend(advance_frame(&mut state, &input, &config).events);
        }

        let (replayed, events) = replay_session(&config, &recording, 200);
        assert_eq!(replayed.frame, 200);
        assert_eq!(replayed.compute_hash(), state.compute_hash());
        assert_eq!(events.len(), live_events.len());
        assert!(events.iter().zip(&live_events).all(|(a, b)| a.data == b.data));
    }
}
