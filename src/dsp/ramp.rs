//! Linear gain ramp.

/*
Fades, mutes and ducking all reduce to "move this gain to that value over
this long". The ramp stores a per-sample step and a count of remaining
samples; when the count reaches zero the value snaps exactly onto the
target so float drift never leaves a residual hum.

Retargeting mid-ramp starts from wherever the value currently is. A mute
pressed halfway through a duck therefore continues smoothly downward.
*/

pub struct GainRamp {
    value: f32,
    target: f32,
    step: f32,
    remaining: u32,
}

impl GainRamp {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
            step: 0.0,
            remaining: 0,
        }
    }

    /// Head toward `target`, arriving after `seconds`.
    pub fn ramp_to(&mut self, target: f32, seconds: f32, sample_rate: f32) {
        let samples = (seconds * sample_rate).round().max(0.0) as u32;
        self.target = target;
        if samples == 0 {
            self.value = target;
            self.remaining = 0;
            self.step = 0.0;
        } else {
            self.step = (target - self.value) / samples as f32;
            self.remaining = samples;
        }
    }

    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.value = if self.remaining == 0 {
                self.target
            } else {
                self.value + self.step
            };
        }
        self.value
    }

    /// Multiply a block in place by the ramped gain.
    pub fn apply(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample *= self.next_value();
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }
}
