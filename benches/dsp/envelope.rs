//! Benchmarks for the envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonance::dsp::envelope::Envelope;
use resonance::graph::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::new(48_000.0, 880.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Percussive chime shape, mostly in decay
        let mut env = Envelope::percussive(0.004, 0.35);
        env.trigger();
        group.bench_with_input(BenchmarkId::new("percussive", size), &size, |b, _| {
            b.iter(|| {
                env.trigger();
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::adsr(0.001, 0.001, 0.7, 0.3);
        env.trigger();
        for _ in 0..200 {
            env.next_sample(&ctx);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
