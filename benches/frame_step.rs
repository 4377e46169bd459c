//! # Frame Step Benchmark
//!
//! Throughput of the per-frame loop with an idle player and with many
//! live drops being pulled in.
//!
//! Run with: `cargo bench --bench frame_step`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tilecraft::game::state::SessionState;
use tilecraft::game::tick::advance_frame;
use tilecraft::{InputFrame, ItemKind, Session, SimConfig};

/// Benchmark: world generation.
fn bench_world_generation(c: &mut Criterion) {
    let config = SimConfig::default();
    c.bench_function("world_generation", |b| {
        b.iter(|| black_box(SessionState::new(&config, black_box(12345))));
    });
}

/// Benchmark: one frame with the player running and hopping.
fn bench_single_frame(c: &mut Criterion) {
    let config = SimConfig::default();
    let mut state = SessionState::new(&config, 12345);
    let inputs = [
        InputFrame::held(false, true, false),
        InputFrame::held(false, true, true),
        InputFrame::held(true, false, false),
    ];
    let mut i = 0;

    c.bench_function("single_frame", |b| {
        b.iter(|| {
            i = (i + 1) % inputs.len();
            black_box(advance_frame(&mut state, &inputs[i], &config))
        });
    });
}

/// Benchmark: 60 frames (one second) with many drops in the air.
fn bench_drops(c: &mut Criterion) {
    let mut group = c.benchmark_group("second_with_drops");

    for count in [10u32, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut session = Session::new(SimConfig::default(), 7).expect("default config is valid");
                let center = session.state().player.center();
                for n in 0..count {
                    let dx = (n % 40) as f32 * 8.0 - 160.0;
                    let dy = -((n / 40) as f32) * 8.0 - 40.0;
                    session.spawn_drop(ItemKind::Dirt, center.x + dx, center.y + dy);
                }
                for _ in 0..60 {
                    black_box(session.advance_frame(InputFrame::new()));
                }
                session.state().drops.len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_world_generation, bench_single_frame, bench_drops);
criterion_main!(benches);
