//! Sound output
//!
//! Every sound is synthesized at startup, so there are no asset files.
//! A machine without a working output device gets a silent mixer and
//! an otherwise unchanged game.

mod synth;

use log::warn;
use rodio::buffer::SamplesBuffer;
use rodio::source::Source;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use synth::{tone_sequence, Note, SAMPLE_RATE};

/// Default volume for the looping melody.
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;
/// Default volume for sound effects.
pub const DEFAULT_EFFECTS_VOLUME: f32 = 0.5;
/// How far one settings keypress moves a volume.
pub const VOLUME_STEP: f32 = 0.1;

const EFFECT_AMPLITUDE: f32 = 0.5;
const MUSIC_AMPLITUDE: f32 = 0.25;

const EAT: [Note; 3] = [(400.0, 0.1), (600.0, 0.1), (800.0, 0.1)];
const LEVEL_UP: [Note; 3] = [(440.0, 0.15), (554.0, 0.15), (659.0, 0.2)];
const GAME_OVER: [Note; 3] = [(400.0, 0.3), (300.0, 0.3), (200.0, 0.4)];
const HIGH_SCORE: [Note; 4] = [
    (523.0, 0.2),
    (659.0, 0.2),
    (784.0, 0.2),
    (1047.0, 0.4),
];
const MELODY: [Note; 14] = [
    (330.0, 0.5),
    (392.0, 0.5),
    (440.0, 0.5),
    (392.0, 0.5),
    (330.0, 0.5),
    (294.0, 0.5),
    (330.0, 1.0),
    (392.0, 0.5),
    (440.0, 0.5),
    (494.0, 0.5),
    (440.0, 0.5),
    (392.0, 0.5),
    (330.0, 0.5),
    (392.0, 1.0),
];

/// Discrete cues the game raises for the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    FoodEaten,
    LevelUp,
    GameOver,
    NewHighScore,
}

impl AudioEvent {
    fn notes(self) -> &'static [Note] {
        match self {
            AudioEvent::FoodEaten => &EAT,
            AudioEvent::LevelUp => &LEVEL_UP,
            AudioEvent::GameOver => &GAME_OVER,
            AudioEvent::NewHighScore => &HIGH_SCORE,
        }
    }
}

struct Backend {
    // Dropping the stream kills every sink, so it rides along here.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
}

/// Owns the output device, the looping melody and the volume settings.
/// When no device can be opened the mixer stays silent and every call
/// becomes a no-op.
pub struct AudioMixer {
    backend: Option<Backend>,
    music_volume: f32,
    effects_volume: f32,
    muted: bool,
}

impl AudioMixer {
    pub fn new(muted: bool) -> Self {
        let mut mixer = Self {
            backend: open_backend(),
            music_volume: DEFAULT_MUSIC_VOLUME,
            effects_volume: DEFAULT_EFFECTS_VOLUME,
            muted,
        };
        mixer.apply_music_volume();
        mixer
    }

    /// Fire-and-forget playback of one cue on its own sink.
    pub fn play(&self, event: AudioEvent) {
        if self.muted {
            return;
        }
        let Some(backend) = &self.backend else { return };

        let sink = match Sink::try_new(&backend.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("effect playback failed: {err}");
                return;
            }
        };
        let samples = tone_sequence(event.notes(), EFFECT_AMPLITUDE);
        sink.set_volume(self.effects_volume);
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach();
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.apply_music_volume();
    }

    pub fn adjust_music_volume(&mut self, delta: f32) {
        self.music_volume = (self.music_volume + delta).clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    pub fn adjust_effects_volume(&mut self, delta: f32) {
        self.effects_volume = (self.effects_volume + delta).clamp(0.0, 1.0);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn effects_volume(&self) -> f32 {
        self.effects_volume
    }

    /// False when the process is running without a sound device.
    pub fn has_device(&self) -> bool {
        self.backend.is_some()
    }

    fn apply_music_volume(&self) {
        if let Some(backend) = &self.backend {
            let volume = if self.muted { 0.0 } else { self.music_volume };
            backend.music.set_volume(volume);
        }
    }

    /// Mixer that never touches a device, so tests stay silent.
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self {
            backend: None,
            music_volume: DEFAULT_MUSIC_VOLUME,
            effects_volume: DEFAULT_EFFECTS_VOLUME,
            muted: false,
        }
    }
}

/// Open the default output device and start the melody loop on it.
fn open_backend() -> Option<Backend> {
    let (stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(err) => {
            warn!("no audio device, running silent: {err}");
            return None;
        }
    };
    let music = match Sink::try_new(&handle) {
        Ok(sink) => sink,
        Err(err) => {
            warn!("could not open music channel: {err}");
            return None;
        }
    };

    let samples = tone_sequence(&MELODY, MUSIC_AMPLITUDE);
    music.append(SamplesBuffer::new(1, SAMPLE_RATE, samples).repeat_infinite());

    Some(Backend {
        _stream: stream,
        handle,
        music,
    })
}
