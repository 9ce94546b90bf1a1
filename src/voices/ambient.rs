//! Ambient drone - the background bed under every card.
//!
//! # How It Works
//!
//! 1. A low triangle on A2 with a copy detuned by 7 cents; the pair beats
//!    slowly against each other
//! 2. A soft sine fifth (E3) and octave (A3) for warmth
//! 3. A very slow unipolar LFO (~14 s cycle) swells the whole bed
//!
//! The drone has no envelope. It starts with the audio engine and is only
//! ever faded by the mixer's ambient gain ramp, which is what makes unmuting
//! instant: nothing has to be rebuilt.

use crate::graph::{extensions::NodeExt, lfo::LfoNode, oscillator::OscNode, GraphNode};

const ROOT_HZ: f32 = 110.0;

pub fn ambient() -> impl GraphNode {
    let root = OscNode::triangle()
        .with_frequency(ROOT_HZ)
        .mix(OscNode::triangle().with_frequency(ROOT_HZ).with_detune(7.0).with_phase(0.37), 0.5);

    let upper = OscNode::sine()
        .with_frequency(ROOT_HZ * 1.5)
        .mix(OscNode::sine().with_frequency(ROOT_HZ * 2.0).with_detune(-4.0), 0.4);

    root.mix(upper, 0.35)
        .amplify(LfoNode::sine(0.07).unipolar(0.45))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;

    #[test]
    fn drone_is_continuous_and_bounded() {
        let mut drone = ambient();
        let ctx = RenderCtx::new(48_000.0, 0.0);
        let mut buffer = vec![0.0; 2048];

        for _ in 0..8 {
            drone.render_block(&mut buffer, &ctx);
            assert!(buffer.iter().all(|s| s.abs() <= 1.0 && s.is_finite()));
        }
        assert!(buffer.iter().any(|s| s.abs() > 0.05));
        assert!(drone.is_active());
    }
}
