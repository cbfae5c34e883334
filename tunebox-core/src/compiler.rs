//! Tune to event sequence compiler
//!
//! Walks a tune's notes in order, accumulating a tick counter, and emits
//! note-on / note-off pairs plus "now playing" markers for live feedback.
//! Compilation is all-or-nothing: the first unrecognised note aborts it.

use crate::error::CompileError;
use crate::types::instrument::InstrumentCatalog;
use crate::types::note;
use crate::types::scheduled_event::{EventKind, EventSequence, ScheduledEvent, TICKS_PER_BEAT};
use crate::types::tune::Tune;
use tracing::debug;

/// Highest program number a program-change event can carry
const MAX_PROGRAM: usize = 128;

/// Compile a tune into an event sequence ready for playback.
///
/// The instrument is checked against `catalog` and selected with a program
/// change at tick 0.
pub fn compile(tune: &Tune, catalog: &dyn InstrumentCatalog) -> Result<EventSequence, CompileError> {
    if tune.is_empty() {
        return Err(CompileError::EmptyTune);
    }

    let available = catalog.count().min(MAX_PROGRAM);
    let program = u8::try_from(tune.instrument())
        .ok()
        .filter(|p| (*p as usize) < available)
        .ok_or(CompileError::InstrumentOutOfRange {
            instrument: tune.instrument(),
            available,
        })?;

    let mut events = Vec::with_capacity(tune.len() * 3 + 2);
    events.push(ScheduledEvent::new(0, EventKind::ProgramChange(program)));

    let mut tick = 0u64;
    for n in tune.notes() {
        tick = push_note(&mut events, n.name(), n.duration(), tick)?;
    }
    events.push(ScheduledEvent::new(tick, EventKind::EndOfTrack));

    debug!(
        notes = tune.len(),
        events = events.len(),
        ticks = tick,
        program,
        "compiled tune"
    );
    Ok(EventSequence::new(TICKS_PER_BEAT, events))
}

/// Compile a single note starting at tick 0, for previewing it on its own.
///
/// No program change is emitted, so whatever instrument the output device
/// currently has selected is used.
pub fn compile_single_note(name: &str, duration: u32) -> Result<EventSequence, CompileError> {
    let mut events = Vec::with_capacity(4);
    let end = push_note(&mut events, name, duration, 0)?;
    events.push(ScheduledEvent::new(end, EventKind::EndOfTrack));
    Ok(EventSequence::new(TICKS_PER_BEAT, events))
}

/// Emit one note starting at `tick` and return the tick where it ends
fn push_note(
    events: &mut Vec<ScheduledEvent>,
    name: &str,
    duration: u32,
    tick: u64,
) -> Result<u64, CompileError> {
    let pitch = note::encode(name).ok_or_else(|| CompileError::UnrecognizedNote(name.to_string()))?;
    let end = tick + duration as u64;

    events.push(ScheduledEvent::new(tick, EventKind::NoteOn(pitch)));
    events.push(ScheduledEvent::new(tick, EventKind::NowPlaying(pitch)));
    events.push(ScheduledEvent::new(end, EventKind::NoteOff(pitch)));
    Ok(end)
}
