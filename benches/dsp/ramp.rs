//! Benchmarks for the ambient gain ramp.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonance::dsp::ramp::GainRamp;

use crate::BLOCK_SIZES;

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.5f32; size];

        // Mid-fade: every sample gets a new gain
        let mut ramp = GainRamp::new(0.0);
        group.bench_with_input(BenchmarkId::new("fading", size), &size, |b, _| {
            b.iter(|| {
                ramp.ramp_to(0.18, 2.5, 48_000.0);
                ramp.apply(black_box(&mut buffer));
            })
        });

        // Settled: constant gain
        let mut ramp = GainRamp::new(0.18);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, _| {
            b.iter(|| {
                ramp.apply(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
