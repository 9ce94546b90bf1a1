/// Context passed to graph nodes during rendering.
///
/// - sample_rate: device sample rate (e.g. 48000.0)
/// - frequency: pitch for nodes that follow the played note (Hz)
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32, frequency: f32) -> Self {
        Self {
            sample_rate,
            frequency,
        }
    }
}

/// Core trait for audio processing graph nodes.
///
/// Nodes render blocks of samples and react to a gate: `trigger` when a
/// sound starts, `release` when it should fade out. Drones never see either.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    fn trigger(&mut self, _ctx: &RenderCtx) {}

    fn release(&mut self, _ctx: &RenderCtx) {}

    /// Whether the node is still producing sound.
    ///
    /// The mixer uses this to hand finished cue voices back to the pool.
    fn is_active(&self) -> bool {
        true
    }
}

impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn trigger(&mut self, ctx: &RenderCtx) {
        (**self).trigger(ctx)
    }

    fn release(&mut self, ctx: &RenderCtx) {
        (**self).release(ctx)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
