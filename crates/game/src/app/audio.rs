use std::fmt::Display;
use std::time::Duration;

use lightsout_engine::{GameEvent, GameState};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, StreamError};
use tracing::{debug, info, warn};

const MUSIC_VOLUME: f32 = 0.05;
const CUE_VOLUME: f32 = 0.2;
/// (frequency Hz, length ms) pairs.
const MUSIC_NOTES: [(f32, u64); 4] = [(110.0, 420), (131.0, 420), (147.0, 420), (131.0, 420)];
const FOOTSTEP_NOTES: [(f32, u64); 1] = [(180.0, 60)];
const TASK_COMPLETE_NOTES: [(f32, u64); 2] = [(660.0, 110), (880.0, 180)];
const VENT_NOTES: [(f32, u64); 2] = [(220.0, 90), (147.0, 160)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AudioCue {
    MusicStart,
    MusicStop,
    Footstep,
    TaskComplete,
    Vent,
}

impl AudioCue {
    fn as_token(self) -> &'static str {
        match self {
            AudioCue::MusicStart => "music_start",
            AudioCue::MusicStop => "music_stop",
            AudioCue::Footstep => "footstep",
            AudioCue::TaskComplete => "task_complete",
            AudioCue::Vent => "vent",
        }
    }
}

pub(crate) trait AudioSink {
    fn backend(&self) -> &'static str;
    fn play(&mut self, cue: AudioCue);
}

/// Sink that records cues in the log instead of playing them.
#[derive(Debug, Default)]
pub(crate) struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn backend(&self) -> &'static str {
        "log"
    }

    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Footstep => debug!(cue = cue.as_token(), "audio_cue"),
            _ => info!(cue = cue.as_token(), "audio_cue"),
        }
    }
}

/// Plays synthesized tones on the default output device. Music is one
/// looping sink that is paused and resumed; cues are detached one-shots.
pub(crate) struct RodioAudioSink {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl RodioAudioSink {
    pub(crate) fn open() -> Result<Self, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }

    fn play_notes(&self, notes: &[(f32, u64)]) {
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(error) => {
                warn!(error = %error, "audio_cue_dropped");
                return;
            }
        };
        sink.set_volume(CUE_VOLUME);
        for &(frequency, millis) in notes {
            sink.append(SineWave::new(frequency).take_duration(Duration::from_millis(millis)));
        }
        sink.detach();
    }

    fn start_music(&mut self) {
        if let Some(music) = &self.music {
            music.play();
            return;
        }
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(MUSIC_VOLUME);
                sink.append(music_loop());
                self.music = Some(sink);
            }
            Err(error) => warn!(error = %error, "audio_music_unavailable"),
        }
    }

    fn stop_music(&mut self) {
        if let Some(music) = &self.music {
            music.pause();
        }
    }
}

impl AudioSink for RodioAudioSink {
    fn backend(&self) -> &'static str {
        "rodio"
    }

    fn play(&mut self, cue: AudioCue) {
        debug!(cue = cue.as_token(), "audio_cue");
        match cue {
            AudioCue::MusicStart => self.start_music(),
            AudioCue::MusicStop => self.stop_music(),
            AudioCue::Footstep => self.play_notes(&FOOTSTEP_NOTES),
            AudioCue::TaskComplete => self.play_notes(&TASK_COMPLETE_NOTES),
            AudioCue::Vent => self.play_notes(&VENT_NOTES),
        }
    }
}

fn music_loop() -> impl Source<Item = f32> + Send + 'static {
    let notes: Vec<_> = MUSIC_NOTES
        .iter()
        .map(|&(frequency, millis)| {
            SineWave::new(frequency).take_duration(Duration::from_millis(millis))
        })
        .collect();
    rodio::source::from_iter(notes).repeat_infinite()
}

/// Opens the output device, falling back to the log sink when none is
/// available. Audio failure never reaches the session.
pub(crate) fn open_output_sink() -> Box<dyn AudioSink> {
    select_sink(RodioAudioSink::open())
}

fn select_sink<S, E>(opened: Result<S, E>) -> Box<dyn AudioSink>
where
    S: AudioSink + 'static,
    E: Display,
{
    let sink: Box<dyn AudioSink> = match opened {
        Ok(sink) => Box::new(sink),
        Err(error) => {
            warn!(error = %error, "audio_output_unavailable");
            Box::new(LogAudioSink)
        }
    };
    info!(backend = sink.backend(), "audio_backend_selected");
    sink
}

/// Turns session events into cues. A disabled director forwards nothing.
pub(crate) struct AudioDirector {
    sink: Box<dyn AudioSink>,
    enabled: bool,
    music_playing: bool,
}

impl AudioDirector {
    pub(crate) fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            enabled: false,
            music_playing: false,
        }
    }

    pub(crate) fn begin_session(&mut self, sound_enabled: bool) {
        self.enabled = sound_enabled;
        self.music_playing = false;
        self.set_music(true);
    }

    pub(crate) fn end_session(&mut self) {
        self.set_music(false);
        self.enabled = false;
    }

    pub(crate) fn on_event(&mut self, event: &GameEvent) {
        if !self.enabled {
            return;
        }
        match event {
            GameEvent::TaskCompleted { .. } => self.sink.play(AudioCue::TaskComplete),
            GameEvent::VentUsed { .. } => self.sink.play(AudioCue::Vent),
            GameEvent::MovementStarted => self.sink.play(AudioCue::Footstep),
            GameEvent::MovementStopped => {}
            GameEvent::StateChanged { to, .. } => match to {
                GameState::Playing | GameState::MapView => self.set_music(true),
                GameState::Paused | GameState::GameOver | GameState::GameWon => {
                    self.set_music(false)
                }
            },
            GameEvent::SessionEnded { .. } => self.set_music(false),
        }
    }

    fn set_music(&mut self, playing: bool) {
        if !self.enabled || self.music_playing == playing {
            return;
        }
        self.music_playing = playing;
        self.sink.play(if playing {
            AudioCue::MusicStart
        } else {
            AudioCue::MusicStop
        });
    }
}
