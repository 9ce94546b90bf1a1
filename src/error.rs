//! Error types surfaced by the audio engine and the narration client.
//!
//! Navigation never fails, so it has no error type. Every narration error is
//! meant to end up as a dismissible message in the interface.

use thiserror::Error;

/// Failures opening or driving the audio output.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no default output device available")]
    NoDevice,

    #[error("failed to fetch default output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("failed to pause output stream: {0}")]
    Pause(#[from] cpal::PauseStreamError),

    #[error("audio output has not been started")]
    NotStarted,

    #[error("mixer command queue is full")]
    QueueFull,
}

/// Failures requesting or decoding a narrated card.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// No API credential is configured for the speech service.
    #[error("narration is not configured: set API_KEY to enable it")]
    MissingCredential,

    #[error("speech request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("speech service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("speech service returned no audio")]
    EmptyPayload,

    #[error("audio payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("audio payload has an odd byte count ({0}); expected 16-bit samples")]
    InvalidPcm(usize),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

impl NarrationError {
    /// True for errors caused by missing configuration rather than the service.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}
