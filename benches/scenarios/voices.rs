//! Benchmarks for the ambient drone and the cue chime.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonance::graph::{GraphNode, RenderCtx};
use resonance::voices;

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Five oscillators and an LFO, always running
        let ctx = RenderCtx::new(48_000.0, 0.0);
        let mut drone = voices::ambient();
        group.bench_with_input(BenchmarkId::new("ambient", size), &size, |b, _| {
            b.iter(|| {
                drone.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Retriggered so it never falls silent
        let ctx = RenderCtx::new(48_000.0, 880.0);
        let mut chime = voices::chime();
        group.bench_with_input(BenchmarkId::new("chime", size), &size, |b, _| {
            b.iter(|| {
                chime.trigger(&ctx);
                chime.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
