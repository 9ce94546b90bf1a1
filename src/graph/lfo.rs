use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, RenderCtx},
};

/*
LFO (Low Frequency Oscillator)
==============================

An oscillator below the audible range, used to move something slowly. The
drone uses one at ~0.07 Hz (a 14 second cycle) as a breathing swell.

Bipolar vs unipolar
-------------------

The raw output swings -1.0 .. +1.0. That is right for modulating a pitch up
and down, but multiplying audio by it would invert the signal half the time.
`.unipolar(depth)` remaps to a gain that never goes negative:

    gain = 1 - depth + depth * (raw + 1) / 2

    depth 0.0 -> constant 1.0 (no movement)
    depth 0.4 -> swings between 0.6 and 1.0
    depth 1.0 -> swings between 0.0 and 1.0
*/

pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32,
    unipolar_depth: Option<f32>,
}

impl LfoNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
            unipolar_depth: None,
        }
    }

    pub fn triangle(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::triangle(),
            frequency,
            unipolar_depth: None,
        }
    }

    /// Output a gain in `[1 - depth, 1]` instead of `[-1, 1]`.
    pub fn unipolar(mut self, depth: f32) -> Self {
        self.unipolar_depth = Some(depth.clamp(0.0, 1.0));
        self
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let lfo_ctx = RenderCtx::new(ctx.sample_rate, self.frequency);
        self.osc.render(out, &lfo_ctx);

        if let Some(depth) = self.unipolar_depth {
            for sample in out.iter_mut() {
                *sample = 1.0 - depth + depth * (*sample + 1.0) * 0.5;
            }
        }
    }
}
