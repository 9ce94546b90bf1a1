use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Linear ADSR Envelope
====================

Shapes the amplitude of a cue from silence up to full level and back.

  Level
    1.0 ┐  ╱╲
        │ ╱  ╲________
    S   │╱            ╲
    0.0 └──────────────╲──→ Time
        A   D    S      R

Stages advance one sample at a time. Each stage converts its duration into a
per-sample increment:

    increment = change / (seconds * sample_rate)

Percussive mode: a sustain level of 0.0 means the sound is over once decay
finishes, so the envelope drops straight back to Idle instead of holding at
zero forever. That is what lets a one-shot chime free its voice without a
matching release call.

Release always starts from the current level, whatever stage the gate
dropped in, so releasing mid-attack never clicks.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    stage: EnvelopeState,
    level: f32,
    /// Per-sample fall while releasing, fixed when the gate drops.
    release_step: f32,
}

impl Envelope {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),
            stage: EnvelopeState::Idle,
            level: 0.0,
            release_step: 0.0,
        }
    }

    /// One-shot attack/decay shape that ends on its own.
    pub fn percussive(attack: f32, decay: f32) -> Self {
        Self::adsr(attack, decay, 0.0, MIN_TIME)
    }

    /// Gate high: restart from zero.
    pub fn trigger(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
    }

    /// Gate low: fade from the current level to zero.
    pub fn release(&mut self, ctx: &RenderCtx) {
        if self.stage == EnvelopeState::Idle {
            return;
        }
        let samples = (self.release_time * ctx.sample_rate).max(1.0);
        self.release_step = self.level / samples;
        self.stage = EnvelopeState::Release;
    }

    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        let sr = ctx.sample_rate;
        self.stage = match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
                EnvelopeState::Idle
            }
            EnvelopeState::Attack => {
                self.level = (self.level + 1.0 / (self.attack_time * sr)).min(1.0);
                if self.level < 1.0 {
                    EnvelopeState::Attack
                } else {
                    EnvelopeState::Decay
                }
            }
            EnvelopeState::Decay => {
                let fall = (1.0 - self.sustain_level) / (self.decay_time * sr);
                self.level = (self.level - fall).max(self.sustain_level);
                match self.level > self.sustain_level {
                    true => EnvelopeState::Decay,
                    // Zero sustain: nothing left to hold.
                    false if self.sustain_level <= 0.0 => EnvelopeState::Idle,
                    false => EnvelopeState::Sustain,
                }
            }
            EnvelopeState::Sustain => EnvelopeState::Sustain,
            EnvelopeState::Release => {
                self.level = (self.level - self.release_step).max(0.0);
                if self.level > 0.0 {
                    EnvelopeState::Release
                } else {
                    EnvelopeState::Idle
                }
            }
        };

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn run(env: &mut Envelope, samples: usize) {
        let ctx = RenderCtx::new(SAMPLE_RATE, 440.0);
        for _ in 0..samples {
            env.next_sample(&ctx);
        }
    }

    #[test]
    fn attack_reaches_full_level() {
        let mut env = Envelope::adsr(0.01, 0.1, 0.7, 0.2);
        env.trigger();
        run(&mut env, 12);

        assert!(env.level() > 0.99);
        assert_ne!(env.state(), EnvelopeState::Attack);
    }

    #[test]
    fn percussive_envelope_finishes_by_itself() {
        let mut env = Envelope::percussive(0.005, 0.05);
        env.trigger();
        assert!(env.is_active());

        run(&mut env, 5 + 50 + 3);
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn release_falls_back_to_idle() {
        let ctx = RenderCtx::new(SAMPLE_RATE, 440.0);
        let mut env = Envelope::adsr(0.01, 0.05, 0.5, 0.03);
        env.trigger();
        run(&mut env, 20);

        env.release(&ctx);
        run(&mut env, 32);

        assert!(env.level() <= 0.001);
        assert_eq!(env.state(), EnvelopeState::Idle);
    }
}
