//! Where the mixer's output goes.
//!
//! [`CpalBackend`] drives the default output device. [`OfflineBackend`]
//! holds the mixer and renders on request, which is what tests and benches
//! use.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use crate::{audio::mixer::Mixer, error::AudioError};

/// An output the engine can start a [`Mixer`] on.
pub trait AudioBackend {
    /// Sample rate the mixer must render at. May open the device.
    fn sample_rate(&mut self) -> Result<f32, AudioError>;

    /// Hand the mixer over and begin producing sound.
    fn start(&mut self, mixer: Mixer) -> Result<(), AudioError>;

    fn suspend(&mut self) -> Result<(), AudioError>;

    fn resume(&mut self) -> Result<(), AudioError>;

    /// Started and not suspended.
    fn is_running(&self) -> bool;

    /// Tear down the output. The mixer is dropped.
    fn close(&mut self);
}

/// Default system output via cpal.
pub struct CpalBackend {
    device: Option<cpal::Device>,
    config: Option<cpal::SupportedStreamConfig>,
    stream: Option<cpal::Stream>,
    suspended: bool,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            device: None,
            config: None,
            stream: None,
            suspended: false,
        }
    }

    fn open(&mut self) -> Result<(&cpal::Device, &cpal::SupportedStreamConfig), AudioError> {
        if self.device.is_none() {
            let host = cpal::default_host();
            let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
            let config = device.default_output_config()?;
            info!(
                sample_rate = config.sample_rate().0,
                channels = config.channels(),
                "opened default output device"
            );
            self.device = Some(device);
            self.config = Some(config);
        }

        match (&self.device, &self.config) {
            (Some(device), Some(config)) => Ok((device, config)),
            _ => Err(AudioError::NoDevice),
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn sample_rate(&mut self) -> Result<f32, AudioError> {
        let (_, config) = self.open()?;
        Ok(config.sample_rate().0 as f32)
    }

    fn start(&mut self, mut mixer: Mixer) -> Result<(), AudioError> {
        let (device, config) = self.open()?;
        let channels = config.channels() as usize;

        let stream = device.build_output_stream(
            &config.config(),
            move |data: &mut [f32], _| mixer.render_interleaved(data, channels),
            |err| error!(%err, "audio stream error"),
            None,
        )?;
        stream.play()?;

        self.stream = Some(stream);
        self.suspended = false;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), AudioError> {
        let stream = self.stream.as_ref().ok_or(AudioError::NotStarted)?;
        stream.pause()?;
        self.suspended = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        let stream = self.stream.as_ref().ok_or(AudioError::NotStarted)?;
        stream.play()?;
        self.suspended = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.stream.is_some() && !self.suspended
    }

    fn close(&mut self) {
        self.stream = None;
        self.suspended = false;
    }
}

/// Renders only when asked; no device involved.
pub struct OfflineBackend {
    sample_rate: f32,
    mixer: Option<Mixer>,
    suspended: bool,
    starts: usize,
}

impl OfflineBackend {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            mixer: None,
            suspended: false,
            starts: 0,
        }
    }

    /// Render `frames` mono samples. Silence if not running.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        if !self.suspended {
            if let Some(mixer) = self.mixer.as_mut() {
                mixer.render(&mut out);
            }
        }
        out
    }

    pub fn mixer(&self) -> Option<&Mixer> {
        self.mixer.as_ref()
    }

    /// How many times a mixer has been handed over.
    pub fn starts(&self) -> usize {
        self.starts
    }
}

impl AudioBackend for OfflineBackend {
    fn sample_rate(&mut self) -> Result<f32, AudioError> {
        Ok(self.sample_rate)
    }

    fn start(&mut self, mixer: Mixer) -> Result<(), AudioError> {
        self.mixer = Some(mixer);
        self.suspended = false;
        self.starts += 1;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), AudioError> {
        if self.mixer.is_none() {
            return Err(AudioError::NotStarted);
        }
        self.suspended = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        if self.mixer.is_none() {
            return Err(AudioError::NotStarted);
        }
        self.suspended = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.mixer.is_some() && !self.suspended
    }

    fn close(&mut self) {
        self.mixer = None;
        self.suspended = false;
    }
}
