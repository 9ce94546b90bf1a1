//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonance::dsp::oscillator::OscillatorBlock;
use resonance::graph::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = RenderCtx::new(48_000.0, 880.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - chimes and the drone's upper layer
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Triangle - the drone's root pair
        let mut osc = OscillatorBlock::triangle();
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
