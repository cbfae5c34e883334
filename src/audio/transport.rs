//! Real-time transport
//!
//! Walks a compiled sequence against the wall clock, sending sound events to
//! the output and delivering markers to the listener. It runs on its own
//! thread and stops as soon as its stop channel disconnects.

use crate::audio::midi::{MidiMessage, OutputConnection};
use crate::audio::playback_engine::NoteListener;
use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::trace;
use tunebox_core::types::note;
use tunebox_core::types::scheduled_event::ticks_span;
use tunebox_core::{EventKind, EventSequence};

/// How the transport left its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransportEnd {
    /// Every event was delivered
    Finished,
    /// The stop channel disconnected first
    Stopped,
}

/// Fixed per-playback parameters
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransportSettings {
    pub tick: Duration,
    pub channel: u8,
    pub velocity: u8,
}

/// Play `sequence` in real time, blocking the current thread.
pub(crate) fn run(
    sequence: &EventSequence,
    settings: &TransportSettings,
    output: &mut dyn OutputConnection,
    listener: Option<&dyn NoteListener>,
    stop: &Receiver<()>,
) -> Result<TransportEnd> {
    let start = Instant::now();

    for event in sequence {
        let due = ticks_span(settings.tick, event.tick)
            .and_then(|offset| start.checked_add(offset));
        let Some(due) = due else {
            // Unreachable in any real time, so only a stop can end the wait
            let _ = stop.recv();
            return Ok(TransportEnd::Stopped);
        };
        match stop.recv_timeout(due.saturating_duration_since(Instant::now())) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return Ok(TransportEnd::Stopped),
        }

        trace!(tick = event.tick, kind = ?event.kind, "transport event");
        match event.kind {
            EventKind::ProgramChange(program) => output.send(&MidiMessage::ProgramChange {
                channel: settings.channel,
                program,
            })?,
            EventKind::NoteOn(note) => output.send(&MidiMessage::NoteOn {
                channel: settings.channel,
                note,
                velocity: settings.velocity,
            })?,
            EventKind::NoteOff(note) => output.send(&MidiMessage::NoteOff {
                channel: settings.channel,
                note,
                velocity: settings.velocity,
            })?,
            EventKind::NowPlaying(pitch) => {
                if let Some(listener) = listener {
                    listener.note_changed(&note::decode(pitch), false);
                }
            }
            EventKind::EndOfTrack => {
                if let Some(listener) = listener {
                    listener.note_changed("", true);
                }
            }
        }
    }

    Ok(TransportEnd::Finished)
}
