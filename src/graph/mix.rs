use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Linear Mix
==========

    out = a * (1 - balance) + b * balance

balance 0.0 is all `a`, 1.0 is all `b`. Linear rather than equal-power: a
50/50 blend sits a little quieter than either source alone, which is fine
for stacking drone layers that are all turned down anyway.

Both sources get trigger/release. Gate after mixing if both layers should
share one envelope:

  OscNode::sine().mix(OscNode::sine().with_ratio(2.0), 0.3).amplify(env)
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    pub balance: f32,
    scratch: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, balance: f32) -> Self {
        Self {
            source_a,
            source_b,
            balance: balance.clamp(0.0, 1.0),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        let frames = &mut self.scratch[..out.len()];
        frames.fill(0.0);
        self.source_b.render_block(frames, ctx);

        let weight_a = 1.0 - self.balance;
        let weight_b = self.balance;
        for (o, b) in out.iter_mut().zip(frames.iter()) {
            *o = *o * weight_a + *b * weight_b;
        }
    }

    fn trigger(&mut self, ctx: &RenderCtx) {
        self.source_a.trigger(ctx);
        self.source_b.trigger(ctx);
    }

    fn release(&mut self, ctx: &RenderCtx) {
        self.source_a.release(ctx);
        self.source_b.release(ctx);
    }

    fn is_active(&self) -> bool {
        self.source_a.is_active() || self.source_b.is_active()
    }
}
