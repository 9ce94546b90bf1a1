//! Chime voice - the short cue played on navigation and taps.
//!
//! A sine fundamental with a quieter octave partial, 4 ms attack and a
//! 350 ms decay to silence. Pitch comes from the render context, so one pool
//! of chime voices serves every [`Cue`](crate::audio::Cue).

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub fn chime() -> impl GraphNode {
    OscNode::sine()
        .mix(OscNode::sine().with_ratio(2.0), 0.25)
        .amplify(EnvNode::percussive(0.004, 0.35))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;

    #[test]
    fn chime_rings_then_stops() {
        let ctx = RenderCtx::new(48_000.0, 880.0);
        let mut voice = chime();
        voice.trigger(&ctx);

        let mut buffer = vec![0.0; 1024];
        voice.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().any(|s| s.abs() > 0.3));

        // 0.354 s total at 48 kHz is ~17k samples
        for _ in 0..20 {
            voice.render_block(&mut buffer, &ctx);
        }
        assert!(!voice.is_active());
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
