//! Runtime settings.
//!
//! Everything has a sensible default; the only value taken from the
//! environment is the speech-service credential.

use std::time::Duration;

/// Environment variable holding the speech-service credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Timing of navigation and the reveal animations.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Delay between accepting a navigation request and committing it.
    pub transition: Duration,
    /// Minimum horizontal drag distance (pointer units) that counts as a swipe.
    pub swipe_threshold: f32,
    /// Delay between successive list items appearing.
    pub item_stagger: Duration,
    /// Delay between successive prep-time rows appearing.
    pub prep_stagger: Duration,
    /// How long a click ripple stays on screen.
    pub ripple_lifetime: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            transition: Duration::from_millis(700),
            swipe_threshold: 50.0,
            item_stagger: Duration::from_millis(120),
            prep_stagger: Duration::from_millis(200),
            ripple_lifetime: Duration::from_millis(800),
        }
    }
}

/// Levels and fade times for the audio engine.
#[derive(Debug, Clone)]
pub struct AudioSettings {
    /// Ambient gain when unmuted and not narrating.
    pub ambient_level: f32,
    /// Ambient gain while narration plays.
    pub duck_level: f32,
    /// Gain applied to interaction cues.
    pub cue_level: f32,
    /// Gain applied to narration playback.
    pub narration_level: f32,
    /// Ramp time for mute/unmute and the initial fade-in.
    pub mute_fade: Duration,
    /// Ramp time when ducking under narration.
    pub duck_fade: Duration,
    /// Ramp time when narration ends and ambient comes back.
    pub restore_fade: Duration,
    /// Number of preallocated cue voices.
    pub cue_voices: usize,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ambient_level: 0.18,
            duck_level: 0.05,
            cue_level: 0.25,
            narration_level: 0.9,
            mute_fade: Duration::from_millis(2500),
            duck_fade: Duration::from_millis(400),
            restore_fade: Duration::from_millis(1200),
            cue_voices: 6,
        }
    }
}

/// Speech-service endpoint and voice.
#[derive(Debug, Clone)]
pub struct NarrationSettings {
    pub endpoint: String,
    pub model: String,
    pub voice: String,
    /// Sample rate of the PCM the service returns.
    pub sample_rate: u32,
    /// Instruction placed before the card text.
    pub style: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-2.5-flash-preview-tts".into(),
            voice: "Kore".into(),
            sample_rate: 24_000,
            style: "Read this greeting card aloud, slowly, in a warm and gentle voice:".into(),
            timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

impl NarrationSettings {
    /// The credential, if one is set and non-empty.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// All settings for a presentation session.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub timing: Timing,
    pub audio: AudioSettings,
    pub narration: NarrationSettings,
}

impl Settings {
    /// Defaults plus the credential from [`API_KEY_VAR`], if present.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.narration.api_key = std::env::var(API_KEY_VAR).ok();
        settings
    }

    pub fn transition(mut self, transition: Duration) -> Self {
        self.timing.transition = transition;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.narration.api_key = Some(key.into());
        self
    }
}
