use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/*
Phase-Accumulating Oscillator
=============================

Every periodic waveform here is computed from a single phase value in
[0, 1). Each sample the phase advances by frequency / sample_rate and wraps.
That keeps pitch exact over long runs (the ambient drone never stops) and
lets a frequency change take effect on the next sample without a click.

    phase:    0.0 ──────────────→ 1.0 (wrap)
    sine:     sin(2π · phase)
    triangle: 1 - 4·|phase - 0.5|            (peaks at ±1)
    saw:      2·phase - 1
    square:   +1 for phase < 0.5, -1 after

Noise ignores phase and draws from a xorshift32 generator. It is not
cryptographic; it only needs to be cheap and allocation-free.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
    Square,
    Noise,
}

pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
    rng_state: u32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            rng_state: 0x9E37_79B9,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    /// Start the waveform at a given point in its cycle (0.0 - 1.0).
    ///
    /// Layered drones use different start phases so their peaks don't line up.
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase.rem_euclid(1.0);
        self
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    #[inline]
    fn next_noise(&mut self) -> f32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            Waveform::Sine => (TAU * self.phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            Waveform::Saw => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Noise => self.next_noise(),
        };

        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        value
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(ctx.frequency, ctx.sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
