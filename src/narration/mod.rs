//! Narration: turning a card into speech through a hosted service.
//!
//! The engine never talks HTTP itself. It holds a [`Narrator`], a
//! [`SpeechService`] plus the runtime its requests are spawned on, so tests
//! can swap in a scripted service.

mod gemini;
mod service;

use std::sync::Arc;

use tokio::runtime::Handle;

pub use gemini::GeminiSpeech;
pub use service::{SpeechClip, SpeechService};

use crate::{config::NarrationSettings, error::NarrationError};

/// A speech service and the runtime narration requests run on.
#[derive(Clone)]
pub struct Narrator {
    service: Arc<dyn SpeechService>,
    runtime: Handle,
}

impl Narrator {
    pub fn new(service: Arc<dyn SpeechService>, runtime: Handle) -> Self {
        Self { service, runtime }
    }

    /// Build the hosted-service narrator from settings.
    ///
    /// Fails with [`NarrationError::MissingCredential`] when no key is set;
    /// callers treat that as "narration unavailable", not as fatal.
    pub fn from_settings(
        settings: &NarrationSettings,
        runtime: Handle,
    ) -> Result<Self, NarrationError> {
        let service = GeminiSpeech::new(settings.clone())?;
        Ok(Self::new(Arc::new(service), runtime))
    }

    pub fn service(&self) -> Arc<dyn SpeechService> {
        Arc::clone(&self.service)
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }
}
