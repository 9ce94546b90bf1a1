use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Sample-by-sample product of a signal and a modulator.
///
/// With an envelope as modulator this is a gated voice; with a unipolar LFO
/// it is tremolo.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    scratch: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        let gain = &mut self.scratch[..out.len()];
        gain.fill(0.0);
        self.modulator.render_block(gain, ctx);

        for (o, g) in out.iter_mut().zip(gain.iter()) {
            *o *= *g;
        }
    }

    fn trigger(&mut self, ctx: &RenderCtx) {
        self.signal.trigger(ctx);
        self.modulator.trigger(ctx);
    }

    fn release(&mut self, ctx: &RenderCtx) {
        self.signal.release(ctx);
        self.modulator.release(ctx);
    }

    // The modulator gates the sound: an idle envelope means silence even
    // though the oscillator underneath is still "active".
    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    #[test]
    fn idle_envelope_silences_signal() {
        let mut voice = OscNode::square().amplify(EnvNode::percussive(0.001, 0.01));
        let mut buffer = vec![1.0; 256];
        voice.render_block(&mut buffer, &RenderCtx::new(48_000.0, 440.0));

        assert!(buffer.iter().all(|&s| s == 0.0));
        assert!(!voice.is_active());
    }

    #[test]
    fn triggered_envelope_lets_signal_through() {
        let ctx = RenderCtx::new(48_000.0, 440.0);
        let mut voice = OscNode::square().amplify(EnvNode::percussive(0.001, 0.05));
        voice.trigger(&ctx);

        let mut buffer = vec![0.0; 256];
        voice.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().any(|s| s.abs() > 0.5));
        assert!(voice.is_active());
    }
}
