use async_trait::async_trait;

use crate::error::NarrationError;

/// Decoded speech, mono, at the service's sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SpeechClip {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Something that can speak a piece of text.
#[async_trait]
pub trait SpeechService: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, NarrationError>;
}
