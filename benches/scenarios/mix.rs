//! Benchmarks for whole mixer blocks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonance::audio::{Mixer, MixerCommand};
use resonance::config::AudioSettings;

use crate::BLOCK_SIZES;

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mixer");
    let settings = AudioSettings::default();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === AMBIENT ONLY ===
        let (mut mixer, mut link) = Mixer::new(48_000.0, &settings);
        link.send(MixerCommand::AmbientLevel {
            level: settings.ambient_level,
            seconds: 0.0,
        });
        group.bench_with_input(BenchmarkId::new("ambient", size), &size, |b, _| {
            b.iter(|| {
                mixer.render(black_box(&mut buffer));
            })
        });

        // === EVERY CUE VOICE SOUNDING ===
        let (mut mixer, mut link) = Mixer::new(48_000.0, &settings);
        group.bench_with_input(BenchmarkId::new("all_cues", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..settings.cue_voices {
                    link.send(MixerCommand::Cue { frequency: 880.0 });
                }
                mixer.render(black_box(&mut buffer));
            })
        });

        // === NARRATION OVER DUCKED AMBIENT, STEREO DEVICE ===
        let (mut mixer, mut link) = Mixer::new(48_000.0, &settings);
        link.send(MixerCommand::AmbientLevel {
            level: settings.duck_level,
            seconds: 0.0,
        });
        link.send(MixerCommand::PlayNarration {
            generation: 1,
            clip: vec![0.1; 48_000 * 30],
        });
        let mut interleaved = vec![0.0f32; size * 2];
        group.bench_with_input(BenchmarkId::new("narration_stereo", size), &size, |b, _| {
            b.iter(|| {
                mixer.render_interleaved(black_box(&mut interleaved), 2);
            })
        });
    }

    group.finish();
}
