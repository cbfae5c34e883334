//! Blocking sequence playback engine
//!
//! [`PlaybackEngine::play`] opens the output device, runs the transport on its
//! own thread and blocks until the sequence has finished (plus a short decay
//! hold) or until it is cancelled. The output connection is released on every
//! exit path, exactly once.

use crate::audio::cancel::CancelSignal;
use crate::audio::midi::{
    MidiMessage, OutputConnection, OutputDevice, DEFAULT_CHANNEL, DEFAULT_VELOCITY,
};
use crate::audio::transport::{self, TransportEnd, TransportSettings};
use crossbeam_channel::bounded;
use parking_lot::Mutex;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use tunebox_core::types::scheduled_event::tick_duration;
use tunebox_core::{EventKind, EventSequence};

/// Receives "now playing" notifications during playback.
///
/// Called on the transport thread, in tick order. When `is_end` is true the
/// sequence is over and `note` is empty.
pub trait NoteListener: Sync {
    fn note_changed(&self, note: &str, is_end: bool);
}

impl<F> NoteListener for F
where
    F: Fn(&str, bool) + Sync,
{
    fn note_changed(&self, note: &str, is_end: bool) {
        self(note, is_end)
    }
}

/// Configuration for sequence playback
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Tempo in beats per minute
    pub tempo_bpm: f32,
    /// How often the blocking call checks whether the transport has finished
    pub poll_interval: Duration,
    /// Hold after the last event so the sound can die away
    pub decay: Duration,
    /// Output channel (0-15)
    pub channel: u8,
    /// Velocity for every note
    pub velocity: u8,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 120.0,
            poll_interval: Duration::from_millis(100),
            decay: Duration::from_millis(500),
            channel: DEFAULT_CHANNEL,
            velocity: DEFAULT_VELOCITY,
        }
    }
}

impl PlaybackConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tempo
    pub fn with_tempo(mut self, tempo_bpm: f32) -> Self {
        self.tempo_bpm = tempo_bpm;
        self
    }

    /// Set the completion poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the trailing decay hold
    pub fn with_decay(mut self, decay: Duration) -> Self {
        self.decay = decay;
        self
    }
}

/// Lifecycle of the engine. Always returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Opened,
    Playing,
}

/// How a playback call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The whole sequence played
    Finished,
    /// The cancel signal fired first
    Cancelled,
}

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("A sequence is already playing")]
    Busy,

    #[error("The output device is not available: {0:#}")]
    DeviceUnavailable(anyhow::Error),

    #[error("There is an error in the MIDI data: {0}")]
    InvalidSequence(String),

    #[error("Something went wrong with playing the track: {0:#}")]
    Output(anyhow::Error),
}

/// Plays compiled sequences on an injected output device
pub struct PlaybackEngine {
    device: Box<dyn OutputDevice>,
    config: PlaybackConfig,
    state: Mutex<PlaybackState>,
}

impl PlaybackEngine {
    /// Create an engine that opens `device` for each playback
    pub fn new(device: impl OutputDevice + 'static, config: PlaybackConfig) -> Self {
        Self {
            device: Box::new(device),
            config,
            state: Mutex::new(PlaybackState::Idle),
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn state(&self) -> PlaybackState {
        *self.state.lock()
    }

    /// Play `sequence` and block until it finishes.
    pub fn play(
        &self,
        sequence: &EventSequence,
        listener: Option<&dyn NoteListener>,
    ) -> Result<PlaybackOutcome, PlaybackError> {
        self.play_until(sequence, listener, &CancelSignal::never())
    }

    /// Play `sequence` and block until it finishes or `cancel` fires.
    ///
    /// On cancellation the channel is silenced and the output released
    /// straight away, without the decay hold.
    pub fn play_until(
        &self,
        sequence: &EventSequence,
        listener: Option<&dyn NoteListener>,
        cancel: &CancelSignal,
    ) -> Result<PlaybackOutcome, PlaybackError> {
        let lifecycle = Lifecycle::begin(&self.state)?;

        let mut output = self.device.open().map_err(|e| {
            warn!(error = %e, "failed to open output device");
            PlaybackError::DeviceUnavailable(e)
        })?;
        debug!("output opened");

        validate(sequence)?;

        lifecycle.set(PlaybackState::Playing);
        let settings = TransportSettings {
            tick: tick_duration(self.config.tempo_bpm, sequence.ticks_per_beat()),
            channel: self.config.channel,
            velocity: self.config.velocity,
        };
        debug!(
            events = sequence.len(),
            ticks = sequence.length_ticks(),
            tick = ?settings.tick,
            "starting playback"
        );

        let (outcome, result) = thread::scope(|scope| {
            let (stop_tx, stop_rx) = bounded::<()>(0);
            let connection: &mut dyn OutputConnection = output.as_mut();
            let handle = scope.spawn(move || {
                transport::run(sequence, &settings, connection, listener, &stop_rx)
            });

            let outcome = loop {
                if handle.is_finished() {
                    break PlaybackOutcome::Finished;
                }
                if cancel.wait(self.config.poll_interval) {
                    break PlaybackOutcome::Cancelled;
                }
            };

            drop(stop_tx);
            match handle.join() {
                Ok(result) => (outcome, result),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        });

        match result {
            Ok(TransportEnd::Finished) if outcome == PlaybackOutcome::Finished => {
                if cancel.wait(self.config.decay) {
                    silence(output.as_mut(), self.config.channel);
                    debug!("playback cancelled during decay");
                    return Ok(PlaybackOutcome::Cancelled);
                }
                debug!("playback finished");
                Ok(PlaybackOutcome::Finished)
            }
            Ok(_) => {
                silence(output.as_mut(), self.config.channel);
                debug!("playback cancelled");
                Ok(PlaybackOutcome::Cancelled)
            }
            Err(e) => {
                warn!(error = %e, "output failed during playback");
                silence(output.as_mut(), self.config.channel);
                Err(PlaybackError::Output(e))
            }
        }
        // `output` drops here, releasing the device before `lifecycle` resets to Idle
    }
}

/// Moves the engine out of `Idle` and back again when dropped
struct Lifecycle<'a> {
    state: &'a Mutex<PlaybackState>,
}

impl<'a> Lifecycle<'a> {
    fn begin(state: &'a Mutex<PlaybackState>) -> Result<Self, PlaybackError> {
        let mut current = state.lock();
        if *current != PlaybackState::Idle {
            return Err(PlaybackError::Busy);
        }
        *current = PlaybackState::Opened;
        Ok(Self { state })
    }

    fn set(&self, next: PlaybackState) {
        *self.state.lock() = next;
    }
}

impl Drop for Lifecycle<'_> {
    fn drop(&mut self) {
        *self.state.lock() = PlaybackState::Idle;
    }
}

/// Best-effort all-notes-off before the output is released
fn silence(output: &mut dyn OutputConnection, channel: u8) {
    if let Err(e) = output.send(&MidiMessage::AllNotesOff { channel }) {
        warn!(error = %e, "failed to silence output");
    }
}

/// Reject sequences the output could not carry
fn validate(sequence: &EventSequence) -> Result<(), PlaybackError> {
    if sequence.ticks_per_beat() == 0 {
        return Err(PlaybackError::InvalidSequence(
            "tick resolution must be positive".to_string(),
        ));
    }

    let mut last_tick = 0;
    for event in sequence {
        if event.tick < last_tick {
            return Err(PlaybackError::InvalidSequence(format!(
                "event at tick {} follows tick {}",
                event.tick, last_tick
            )));
        }
        last_tick = event.tick;

        let data = match event.kind {
            EventKind::ProgramChange(v)
            | EventKind::NoteOn(v)
            | EventKind::NoteOff(v)
            | EventKind::NowPlaying(v) => v,
            EventKind::EndOfTrack => continue,
        };
        if data > 127 {
            return Err(PlaybackError::InvalidSequence(format!(
                "{:?} at tick {} is out of range",
                event.kind, event.tick
            )));
        }
    }
    Ok(())
}
