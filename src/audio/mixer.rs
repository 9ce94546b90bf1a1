//! Mixer - everything that runs inside the audio callback.
//!
//! Realtime rules: no locks, and no allocation after construction. Narration
//! clips are allocated on the control side, moved in through the command
//! ring and moved back out through the event ring once finished, so their
//! memory is also freed off the audio thread.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    config::AudioSettings,
    dsp::ramp::GainRamp,
    graph::{GraphNode, RenderCtx},
    voices, MAX_BLOCK_SIZE,
};

const COMMAND_QUEUE_SIZE: usize = 64;
/// Every event ends a clip that arrived as a `PlayNarration` command, so the
/// event ring never needs to hold more than the command ring can deliver.
const EVENT_QUEUE_SIZE: usize = COMMAND_QUEUE_SIZE;

/// Control -> audio thread.
#[derive(Debug)]
pub enum MixerCommand {
    /// Ring a chime at this pitch.
    Cue { frequency: f32 },
    /// Ramp the ambient bed to `level` over `seconds`.
    AmbientLevel { level: f32, seconds: f32 },
    /// Play a clip already converted to the device sample rate.
    PlayNarration { generation: u64, clip: Vec<f32> },
    /// Cut the current clip short.
    StopNarration,
}

/// Audio thread -> control.
#[derive(Debug)]
pub enum MixerEvent {
    /// A clip stopped playing. `completed` is false when it was cut short.
    NarrationEnded {
        generation: u64,
        completed: bool,
        clip: Vec<f32>,
    },
}

/// Control-side ends of the mixer's queues.
pub struct MixerLink {
    commands: Producer<MixerCommand>,
    events: Consumer<MixerEvent>,
    sample_rate: f32,
}

impl MixerLink {
    /// Queue a command. Returns false if the queue is full.
    pub fn send(&mut self, command: MixerCommand) -> bool {
        self.commands.push(command).is_ok()
    }

    pub fn next_event(&mut self) -> Option<MixerEvent> {
        self.events.pop().ok()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

struct CueVoice {
    graph: Box<dyn GraphNode>,
    frequency: f32,
    started_at: u64,
    sounding: bool,
}

struct PlayingClip {
    generation: u64,
    samples: Vec<f32>,
    position: usize,
}

pub struct Mixer {
    sample_rate: f32,
    commands: Consumer<MixerCommand>,
    events: Producer<MixerEvent>,

    ambient: Box<dyn GraphNode>,
    ambient_gain: GainRamp,

    cues: Vec<CueVoice>,
    cue_level: f32,

    narration: Option<PlayingClip>,
    narration_level: f32,

    scratch: Vec<f32>,
    frame_counter: u64,
}

impl Mixer {
    /// Build a mixer and the link used to control it.
    ///
    /// The ambient bed starts silent; the engine fades it in.
    pub fn new(sample_rate: f32, settings: &AudioSettings) -> (Self, MixerLink) {
        let (command_tx, command_rx) = RingBuffer::<MixerCommand>::new(COMMAND_QUEUE_SIZE);
        let (event_tx, event_rx) = RingBuffer::<MixerEvent>::new(EVENT_QUEUE_SIZE);

        let cues = (0..settings.cue_voices.max(1))
            .map(|_| CueVoice {
                graph: Box::new(voices::chime()),
                frequency: 0.0,
                started_at: 0,
                sounding: false,
            })
            .collect();

        let mixer = Self {
            sample_rate,
            commands: command_rx,
            events: event_tx,
            ambient: Box::new(voices::ambient()),
            ambient_gain: GainRamp::new(0.0),
            cues,
            cue_level: settings.cue_level,
            narration: None,
            narration_level: settings.narration_level,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        };

        let link = MixerLink {
            commands: command_tx,
            events: event_rx,
            sample_rate,
        };

        (mixer, link)
    }

    fn handle_commands(&mut self) {
        while let Ok(command) = self.commands.pop() {
            match command {
                MixerCommand::Cue { frequency } => self.start_cue(frequency),
                MixerCommand::AmbientLevel { level, seconds } => {
                    self.ambient_gain.ramp_to(level, seconds, self.sample_rate);
                }
                MixerCommand::PlayNarration { generation, clip } => {
                    self.end_narration(false);
                    self.narration = Some(PlayingClip {
                        generation,
                        samples: clip,
                        position: 0,
                    });
                }
                MixerCommand::StopNarration => self.end_narration(false),
            }
        }
    }

    fn start_cue(&mut self, frequency: f32) {
        // Free voice first, otherwise steal the oldest.
        let index = self
            .cues
            .iter()
            .position(|v| !v.sounding)
            .or_else(|| {
                self.cues
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.started_at)
                    .map(|(i, _)| i)
            });

        if let Some(index) = index {
            let voice = &mut self.cues[index];
            voice.frequency = frequency;
            voice.started_at = self.frame_counter;
            voice.sounding = true;
            voice
                .graph
                .trigger(&RenderCtx::new(self.sample_rate, frequency));
        }
    }

    fn end_narration(&mut self, completed: bool) {
        if let Some(playing) = self.narration.take() {
            let pushed = self.events.push(MixerEvent::NarrationEnded {
                generation: playing.generation,
                completed,
                clip: playing.samples,
            });
            debug_assert!(pushed.is_ok(), "mixer event ring overflowed");
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let ctx = RenderCtx::new(self.sample_rate, 0.0);

        self.ambient.render_block(out, &ctx);
        self.ambient_gain.apply(out);

        for voice in self.cues.iter_mut().filter(|v| v.sounding) {
            let frames = &mut self.scratch[..out.len()];
            frames.fill(0.0);
            voice
                .graph
                .render_block(frames, &RenderCtx::new(self.sample_rate, voice.frequency));
            for (o, s) in out.iter_mut().zip(frames.iter()) {
                *o += s * self.cue_level;
            }
            if !voice.graph.is_active() {
                voice.sounding = false;
            }
        }

        let mut finished = false;
        if let Some(playing) = self.narration.as_mut() {
            let remaining = &playing.samples[playing.position..];
            let n = remaining.len().min(out.len());
            for (o, s) in out.iter_mut().zip(remaining[..n].iter()) {
                *o += s * self.narration_level;
            }
            playing.position += n;
            finished = playing.position >= playing.samples.len();
        }
        if finished {
            self.end_narration(true);
        }

        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        self.frame_counter += out.len() as u64;
    }

    /// Render mono output of any length.
    pub fn render(&mut self, out: &mut [f32]) {
        self.handle_commands();
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    /// Render into an interleaved device buffer, duplicating mono to every channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        self.handle_commands();

        let mut block = [0.0f32; 256];
        for frame_chunk in data.chunks_mut(block.len() * channels) {
            let frames = frame_chunk.len() / channels;
            let mono = &mut block[..frames];
            self.render_block(mono);
            for (frame, &s) in frame_chunk.chunks_mut(channels).zip(mono.iter()) {
                frame.fill(s);
            }
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn active_cues(&self) -> usize {
        self.cues.iter().filter(|v| v.sounding).count()
    }

    pub fn is_narrating(&self) -> bool {
        self.narration.is_some()
    }

    pub fn ambient_gain(&self) -> f32 {
        self.ambient_gain.value()
    }

    pub fn ambient_target(&self) -> f32 {
        self.ambient_gain.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn mixer() -> (Mixer, MixerLink) {
        Mixer::new(SAMPLE_RATE, &AudioSettings::default())
    }

    #[test]
    fn starts_silent() {
        let (mut mixer, _link) = mixer();
        let mut out = vec![1.0; 512];
        mixer.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn ambient_fades_in_to_target() {
        let (mut mixer, mut link) = mixer();
        assert!(link.send(MixerCommand::AmbientLevel {
            level: 0.2,
            seconds: 0.01
        }));

        let mut out = vec![0.0; 1024];
        mixer.render(&mut out);
        assert_eq!(mixer.ambient_gain(), 0.2);
        assert!(out[900..].iter().any(|s| s.abs() > 0.001));
    }

    #[test]
    fn cue_voice_frees_itself() {
        let (mut mixer, mut link) = mixer();
        link.send(MixerCommand::Cue { frequency: 880.0 });

        let mut out = vec![0.0; 1024];
        mixer.render(&mut out);
        assert_eq!(mixer.active_cues(), 1);
        assert!(out.iter().any(|s| s.abs() > 0.05));

        let mut long = vec![0.0; SAMPLE_RATE as usize];
        mixer.render(&mut long);
        assert_eq!(mixer.active_cues(), 0);
    }

    #[test]
    fn full_pool_steals_oldest_voice() {
        let (mut mixer, mut link) = mixer();
        let voices = AudioSettings::default().cue_voices;
        let mut out = vec![0.0; 64];

        // One cue per block so each voice has a distinct start time.
        for i in 0..voices {
            link.send(MixerCommand::Cue {
                frequency: 400.0 + 10.0 * i as f32,
            });
            mixer.render(&mut out);
        }
        assert_eq!(mixer.active_cues(), voices);

        link.send(MixerCommand::Cue { frequency: 1000.0 });
        mixer.render(&mut out);
        assert_eq!(mixer.cues[0].frequency, 1000.0);

        // Voice 0 is now the newest; the next steal takes voice 1.
        link.send(MixerCommand::Cue { frequency: 1100.0 });
        mixer.render(&mut out);
        assert_eq!(mixer.cues[0].frequency, 1000.0);
        assert_eq!(mixer.cues[1].frequency, 1100.0);
        assert_eq!(mixer.active_cues(), voices);

        let oldest = mixer.cues.iter().map(|v| v.started_at).min();
        assert_eq!(oldest, Some(mixer.cues[2].started_at));
    }

    #[test]
    fn output_is_clamped() {
        let (mut mixer, mut link) = mixer();
        let clip: Vec<f32> = (0..512).map(|i| if i % 2 == 0 { 5.0 } else { -5.0 }).collect();
        link.send(MixerCommand::PlayNarration {
            generation: 1,
            clip,
        });
        link.send(MixerCommand::Cue { frequency: 880.0 });

        let mut out = vec![0.0; 512];
        mixer.render(&mut out);
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], -1.0);
    }

    #[test]
    fn event_ring_holds_every_replaced_clip() {
        let (mut mixer, mut link) = mixer();
        for generation in 0..COMMAND_QUEUE_SIZE as u64 - 1 {
            link.send(MixerCommand::PlayNarration {
                generation,
                clip: vec![0.1; 4_800],
            });
        }
        link.send(MixerCommand::StopNarration);

        let mut out = vec![0.0; 64];
        mixer.render(&mut out);

        let mut ended = 0;
        while let Some(MixerEvent::NarrationEnded { completed, .. }) = link.next_event() {
            assert!(!completed);
            ended += 1;
        }
        assert_eq!(ended, COMMAND_QUEUE_SIZE - 1);
    }

    #[test]
    fn narration_clip_plays_and_reports_completion() {
        let (mut mixer, mut link) = mixer();
        link.send(MixerCommand::PlayNarration {
            generation: 7,
            clip: vec![0.5; 300],
        });

        let mut out = vec![0.0; 256];
        mixer.render(&mut out);
        assert!(mixer.is_narrating());
        assert!(out.iter().all(|&s| (s - 0.45).abs() < 1e-6));
        assert!(link.next_event().is_none());

        mixer.render(&mut out);
        assert!(!mixer.is_narrating());
        match link.next_event() {
            Some(MixerEvent::NarrationEnded {
                generation,
                completed,
                clip,
            }) => {
                assert_eq!(generation, 7);
                assert!(completed);
                assert_eq!(clip.len(), 300);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn stop_cuts_clip_short() {
        let (mut mixer, mut link) = mixer();
        link.send(MixerCommand::PlayNarration {
            generation: 1,
            clip: vec![0.5; 48_000],
        });
        let mut out = vec![0.0; 128];
        mixer.render(&mut out);

        link.send(MixerCommand::StopNarration);
        mixer.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(matches!(
            link.next_event(),
            Some(MixerEvent::NarrationEnded {
                completed: false,
                ..
            })
        ));
    }

    #[test]
    fn interleaved_output_duplicates_channels() {
        let (mut mixer, mut link) = mixer();
        link.send(MixerCommand::PlayNarration {
            generation: 1,
            clip: vec![0.25; 1000],
        });
        let mut data = vec![0.0; 600];
        mixer.render_interleaved(&mut data, 2);
        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(data.iter().all(|&s| s > 0.0));
    }
}
