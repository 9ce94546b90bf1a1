use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator Node
=====================

The sound source for both the ambient drone and the cue chimes.

Two ways to pick a pitch:

  - follow the context: `OscNode::sine()` plays whatever `ctx.frequency`
    says, so one chime voice can ring at the Next, Prev or Tap pitch.
  - fixed: `.with_frequency(110.0)` ignores the context. The drone layers
    use this since they never change note.

Detune is in cents (100 cents = 1 semitone) and multiplies the pitch by
2^(cents/1200). A few cents between two otherwise identical layers gives a
slow beating that keeps a drone from sounding static:

  OscNode::triangle().with_frequency(110.0)
      .mix(OscNode::triangle().with_frequency(110.0).with_detune(7.0), 0.5)

`.with_ratio(2.0)` multiplies the followed pitch instead, for adding an
octave partial to a chime.
*/

pub struct OscNode {
    osc: OscillatorBlock,
    fixed_frequency: Option<f32>,
    ratio: f32,
    detune_cents: f32,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            fixed_frequency: None,
            ratio: 1.0,
            detune_cents: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorBlock::sawtooth())
    }

    pub fn square() -> Self {
        Self::new(OscillatorBlock::square())
    }

    pub fn noise() -> Self {
        Self::new(OscillatorBlock::noise())
    }

    /// Play a fixed frequency regardless of the context pitch.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.fixed_frequency = Some(freq);
        self
    }

    /// Multiply the context pitch (2.0 = one octave up).
    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self
    }

    /// Start partway through the cycle (0.0 - 1.0).
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.osc = self.osc.with_phase(phase);
        self
    }

    fn frequency(&self, ctx: &RenderCtx) -> f32 {
        let base = self.fixed_frequency.unwrap_or(ctx.frequency * self.ratio);
        if self.detune_cents != 0.0 {
            base * 2.0_f32.powf(self.detune_cents / 1200.0)
        } else {
            base
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let osc_ctx = RenderCtx::new(ctx.sample_rate, self.frequency(ctx));
        self.osc.render(out, &osc_ctx);
    }

    fn trigger(&mut self, _ctx: &RenderCtx) {
        // Chimes start on a zero crossing.
        if self.fixed_frequency.is_none() {
            self.osc.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn follows_context_pitch() {
        let ctx = RenderCtx::new(48_000.0, 880.0);
        let mut osc = OscNode::sine();
        let mut buffer = vec![0.0f32; 128];
        osc.render_block(&mut buffer, &ctx);

        let n = 12;
        let expected = (TAU * 880.0 * n as f32 / 48_000.0).sin();
        assert!((buffer[n] - expected).abs() < 1e-4);
    }

    #[test]
    fn fixed_frequency_ignores_context() {
        let osc = OscNode::sine().with_frequency(110.0);
        assert_eq!(osc.frequency(&RenderCtx::new(48_000.0, 880.0)), 110.0);
    }

    #[test]
    fn detune_and_ratio_scale_pitch() {
        let ctx = RenderCtx::new(48_000.0, 440.0);
        let octave = OscNode::sine().with_ratio(2.0);
        assert_eq!(octave.frequency(&ctx), 880.0);

        let semitone = OscNode::sine().with_detune(100.0);
        assert!((semitone.frequency(&ctx) - 466.16).abs() < 0.01);
    }
}
