use crate::{
    dsp::envelope::Envelope,
    graph::node::{GraphNode, RenderCtx},
};

/// Envelope generator as a graph node, usually the modulator of an
/// [`Amplify`](crate::graph::amplify::Amplify).
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            env: Envelope::adsr(attack, decay, sustain, release),
        }
    }

    /// Attack then decay to silence; the node goes inactive on its own.
    pub fn percussive(attack: f32, decay: f32) -> Self {
        Self {
            env: Envelope::percussive(attack, decay),
        }
    }

    pub fn level(&self) -> f32 {
        self.env.level()
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
    }

    fn trigger(&mut self, _ctx: &RenderCtx) {
        self.env.trigger();
    }

    fn release(&mut self, ctx: &RenderCtx) {
        self.env.release(ctx);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
