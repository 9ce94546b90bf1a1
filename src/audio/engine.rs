//! AudioEngine - control side of the audio subsystem.
//!
//! Owns the backend, the link to the mixer and all session flags. Every
//! method runs on the interface thread; only the speech request itself runs
//! on the tokio runtime, and its result comes back through a channel that
//! [`AudioEngine::poll`] drains.
//!
//! Narration requests carry a generation number. Stopping narration bumps
//! the generation and aborts the request, so a response that still slips
//! through is recognised as stale and dropped instead of playing over the
//! next card.

use std::time::Duration;

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::AbortHandle,
};
use tracing::{debug, info, warn};

use super::{
    backend::AudioBackend,
    cue::Cue,
    mixer::{Mixer, MixerCommand, MixerEvent, MixerLink},
};
use crate::{
    cards::Card,
    config::AudioSettings,
    dsp::resample::resample_linear,
    error::{AudioError, NarrationError},
    narration::{Narrator, SpeechClip},
    nav::{NavigationState, TransitionAudio},
};

/// Narration lifecycle. Loading and playing are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationPhase {
    #[default]
    Idle,
    Loading,
    Playing,
}

/// Snapshot of the engine's session flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSessionState {
    pub muted: bool,
    /// Level the ambient bed is at or heading toward.
    pub ambient_level: f32,
    pub is_narrating: bool,
    pub is_loading_narration: bool,
}

struct NarrationResult {
    generation: u64,
    outcome: Result<SpeechClip, NarrationError>,
}

pub struct AudioEngine<B: AudioBackend> {
    backend: B,
    settings: AudioSettings,
    narrator: Option<Narrator>,
    link: Option<MixerLink>,

    muted: bool,
    phase: NarrationPhase,
    generation: u64,
    task: Option<AbortHandle>,

    results_tx: UnboundedSender<NarrationResult>,
    results_rx: UnboundedReceiver<NarrationResult>,
}

impl<B: AudioBackend> AudioEngine<B> {
    /// An engine that has not touched the output yet.
    pub fn new(backend: B, settings: AudioSettings) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            settings,
            narrator: None,
            link: None,
            muted: false,
            phase: NarrationPhase::Idle,
            generation: 0,
            task: None,
            results_tx,
            results_rx,
        }
    }

    pub fn with_narrator(mut self, narrator: Option<Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_started(&self) -> bool {
        self.link.is_some()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn narration_phase(&self) -> NarrationPhase {
        self.phase
    }

    pub fn session(&self) -> AudioSessionState {
        AudioSessionState {
            muted: self.muted,
            ambient_level: self.ambient_target(),
            is_narrating: self.phase == NarrationPhase::Playing,
            is_loading_narration: self.phase == NarrationPhase::Loading,
        }
    }

    /// Start the output on first use, resume it if suspended, else do nothing.
    pub fn ensure_started(&mut self) -> Result<(), AudioError> {
        if self.link.is_some() {
            if !self.backend.is_running() {
                self.backend.resume()?;
                info!("audio resumed");
            }
            return Ok(());
        }

        let sample_rate = self.backend.sample_rate()?;
        let (mixer, link) = Mixer::new(sample_rate, &self.settings);
        self.backend.start(mixer)?;
        self.link = Some(link);
        info!(sample_rate, "audio engine started");

        self.send_ambient(self.settings.mute_fade);
        Ok(())
    }

    /// Pause the output without losing any state.
    pub fn suspend(&mut self) -> Result<(), AudioError> {
        if self.link.is_some() && self.backend.is_running() {
            self.backend.suspend()?;
            info!("audio suspended");
        }
        Ok(())
    }

    /// Ring a cue. Returns false when muted or not started.
    pub fn play_cue(&mut self, cue: Cue) -> bool {
        if self.muted {
            return false;
        }
        match self.link.as_mut() {
            Some(link) => link.send(MixerCommand::Cue {
                frequency: cue.frequency(),
            }),
            None => false,
        }
    }

    /// Fade the ambient bed out or back in. The drone keeps running.
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        info!(muted, "mute changed");
        self.send_ambient(self.settings.mute_fade);
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    /// Start narrating a card.
    ///
    /// Returns `Ok(false)` without doing anything if narration is already
    /// loading or playing. Fails immediately when no speech service is
    /// configured.
    pub fn narrate(&mut self, card: &Card) -> Result<bool, NarrationError> {
        if self.phase != NarrationPhase::Idle {
            debug!(phase = ?self.phase, "narration already active");
            return Ok(false);
        }
        let Some(narrator) = self.narrator.as_ref() else {
            warn!("narration requested without a configured speech service");
            return Err(NarrationError::MissingCredential);
        };
        let service = narrator.service();
        let runtime = narrator.runtime().clone();

        self.ensure_started()?;

        self.generation += 1;
        let generation = self.generation;
        let results = self.results_tx.clone();
        let text = card.narration_text();

        let handle = runtime.spawn(async move {
            let outcome = service.synthesize(&text).await;
            // Receiver gone means the engine was dropped.
            let _ = results.send(NarrationResult {
                generation,
                outcome,
            });
        });

        self.task = Some(handle.abort_handle());
        self.phase = NarrationPhase::Loading;
        info!(title = card.title, generation, "narration requested");
        Ok(true)
    }

    /// Silence narration now and forget any request in flight.
    pub fn stop_narration(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;

        let was = std::mem::take(&mut self.phase);
        if was == NarrationPhase::Playing {
            if let Some(link) = self.link.as_mut() {
                if !link.send(MixerCommand::StopNarration) {
                    warn!(err = %AudioError::QueueFull, "narration may keep playing");
                }
            }
            self.send_ambient(self.settings.restore_fade);
        }
        if was != NarrationPhase::Idle {
            debug!(phase = ?was, "narration stopped");
        }
    }

    /// Drain finished requests and mixer events.
    ///
    /// Call once per interface frame. Returns the most recent narration
    /// failure so the caller can show it.
    pub fn poll(&mut self) -> Option<NarrationError> {
        let mut surfaced = None;

        while let Ok(result) = self.results_rx.try_recv() {
            if result.generation != self.generation || self.phase != NarrationPhase::Loading {
                debug!(generation = result.generation, current = self.generation, "discarding stale narration");
                continue;
            }
            self.task = None;

            let started = result.outcome.and_then(|clip| self.begin_playback(clip));
            if let Err(err) = started {
                warn!(%err, "narration failed");
                self.phase = NarrationPhase::Idle;
                surfaced = Some(err);
            }
        }

        let mut finished = false;
        if let Some(link) = self.link.as_mut() {
            while let Some(event) = link.next_event() {
                match event {
                    MixerEvent::NarrationEnded {
                        generation,
                        completed,
                        clip,
                    } => {
                        drop(clip);
                        if completed && generation == self.generation {
                            finished = true;
                        }
                    }
                }
            }
        }
        if finished && self.phase == NarrationPhase::Playing {
            self.phase = NarrationPhase::Idle;
            debug!("narration finished");
            self.send_ambient(self.settings.restore_fade);
        }

        surfaced
    }

    /// Stop everything and release the output.
    pub fn shutdown(&mut self) {
        self.stop_narration();
        self.backend.close();
        self.link = None;
        info!("audio engine shut down");
    }

    fn begin_playback(&mut self, clip: SpeechClip) -> Result<(), NarrationError> {
        let generation = self.generation;
        let link = self.link.as_mut().ok_or(AudioError::NotStarted)?;

        let samples = resample_linear(&clip.samples, clip.sample_rate, link.sample_rate() as u32);
        if samples.is_empty() {
            return Err(NarrationError::EmptyPayload);
        }

        if !link.send(MixerCommand::PlayNarration {
            generation,
            clip: samples,
        }) {
            return Err(AudioError::QueueFull.into());
        }

        self.phase = NarrationPhase::Playing;
        info!(seconds = clip.duration_secs(), "narration playing");
        self.send_ambient(self.settings.duck_fade);
        Ok(())
    }

    fn ambient_target(&self) -> f32 {
        if self.muted {
            0.0
        } else if self.phase == NarrationPhase::Playing {
            self.settings.duck_level
        } else {
            self.settings.ambient_level
        }
    }

    fn send_ambient(&mut self, fade: Duration) {
        let level = self.ambient_target();
        if let Some(link) = self.link.as_mut() {
            let sent = link.send(MixerCommand::AmbientLevel {
                level,
                seconds: fade.as_secs_f32(),
            });
            if !sent {
                warn!(err = %AudioError::QueueFull, level, "ambient level change dropped");
            }
        }
    }
}

impl<B: AudioBackend> TransitionAudio for AudioEngine<B> {
    fn stop_narration(&mut self, outgoing: &NavigationState) {
        if self.phase != NarrationPhase::Idle {
            debug!(card = outgoing.current_index, "stopping narration for outgoing card");
        }
        AudioEngine::stop_narration(self);
    }

    fn play_cue(&mut self, cue: Cue) {
        AudioEngine::play_cue(self, cue);
    }
}

impl<B: AudioBackend> Drop for AudioEngine<B> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
