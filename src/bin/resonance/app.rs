//! Resonance - application builder and runner

use std::{io::stdout, time::Duration};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use tracing::{info, warn};

use resonance::{
    audio::{AudioEngine, CpalBackend},
    narration::Narrator,
    nav::Navigator,
    NarrationError, Settings, CARDS,
};

use super::ui::UiApp;

/// Main application builder
pub struct Resonance {
    settings: Settings,
}

impl Resonance {
    /// Defaults, with the narration credential taken from the environment
    pub fn new() -> Self {
        Self {
            settings: Settings::from_env(),
        }
    }

    /// Replace all settings
    #[allow(dead_code)]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the card transition delay
    #[allow(dead_code)]
    pub fn transition(mut self, transition: Duration) -> Self {
        self.settings = self.settings.transition(transition);
        self
    }

    /// Run the presentation until the user quits
    pub fn run(self) -> EyreResult<()> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .wrap_err("failed to start async runtime")?;

        let narrator = match Narrator::from_settings(&self.settings.narration, runtime.handle().clone())
        {
            Ok(narrator) => Some(narrator),
            Err(NarrationError::MissingCredential) => {
                info!("no speech credential configured; narration disabled");
                None
            }
            Err(err) => {
                warn!(%err, "speech client unavailable; narration disabled");
                None
            }
        };

        // Nothing touches the device until the first interaction.
        let engine = AudioEngine::new(CpalBackend::new(), self.settings.audio.clone())
            .with_narrator(narrator);
        let navigator = Navigator::new(CARDS.len(), self.settings.timing.transition);
        let mut app = UiApp::new(navigator, engine, self.settings.timing.clone());

        let mut terminal = ratatui::init();
        let result = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
            .wrap_err("failed to enable mouse capture")
            .and_then(|()| app.run(&mut terminal));

        let restored = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
        ratatui::restore();
        result?;
        restored.wrap_err("failed to restore terminal")
    }
}

impl Default for Resonance {
    fn default() -> Self {
        Self::new()
    }
}
