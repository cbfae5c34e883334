//! Tune player
//!
//! Ties an instrument catalog to a playback engine: compiles tunes or single
//! notes and plays them, optionally echoing each note to the console as it
//! sounds.

use crate::audio::cancel::CancelSignal;
use crate::audio::playback_engine::{NoteListener, PlaybackEngine, PlaybackOutcome};
use anyhow::Result;
use std::io::Write;
use tracing::{debug, warn};
use tunebox_core::{compile, compile_single_note, GeneralMidi, InstrumentCatalog, Tune};

/// Number of instruments listed when no count is given
pub const NUM_INSTRUMENTS: usize = 16;

/// Prints "now playing" notes on one line, ending it with the sequence
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleListener;

impl NoteListener for ConsoleListener {
    fn note_changed(&self, note: &str, is_end: bool) {
        let mut stdout = std::io::stdout().lock();
        let _ = if is_end {
            writeln!(stdout)
        } else {
            write!(stdout, "{} ", note)
        };
        let _ = stdout.flush();
    }
}

/// Plays tunes and single notes through a [`PlaybackEngine`]
pub struct TunePlayer {
    engine: PlaybackEngine,
    catalog: Box<dyn InstrumentCatalog + Send + Sync>,
    show_notes: bool,
}

impl TunePlayer {
    /// Create a player using the given instrument catalog
    pub fn new(
        engine: PlaybackEngine,
        catalog: impl InstrumentCatalog + Send + Sync + 'static,
    ) -> Self {
        Self {
            engine,
            catalog: Box::new(catalog),
            show_notes: false,
        }
    }

    /// Create a player with the General MIDI instrument set
    pub fn with_general_midi(engine: PlaybackEngine) -> Self {
        Self::new(engine, GeneralMidi)
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &dyn InstrumentCatalog {
        self.catalog.as_ref()
    }

    /// Whether notes are printed as they are played
    pub fn show_notes(&self) -> bool {
        self.show_notes
    }

    pub fn set_show_notes(&mut self, show_notes: bool) {
        self.show_notes = show_notes;
    }

    /// Compile and play a tune, blocking until it has finished
    pub fn play_tune(&self, tune: &Tune) -> Result<PlaybackOutcome> {
        self.play_tune_until(tune, &CancelSignal::never())
    }

    /// Compile and play a tune, stopping early if `cancel` fires
    pub fn play_tune_until(&self, tune: &Tune, cancel: &CancelSignal) -> Result<PlaybackOutcome> {
        let sequence = compile(tune, self.catalog.as_ref()).map_err(|e| {
            warn!(error = %e, "tune rejected");
            e
        })?;
        debug!(instrument = tune.instrument(), notes = tune.len(), "playing tune");
        Ok(self.engine.play_until(&sequence, self.listener(), cancel)?)
    }

    /// Play a single note, e.g. "C", "C#", "Db", "C4" (middle C), "C#5"
    pub fn play_note(&self, name: &str, duration: u32) -> Result<PlaybackOutcome> {
        self.play_note_until(name, duration, &CancelSignal::never())
    }

    /// Play a single note, stopping early if `cancel` fires
    pub fn play_note_until(
        &self,
        name: &str,
        duration: u32,
        cancel: &CancelSignal,
    ) -> Result<PlaybackOutcome> {
        let sequence = compile_single_note(name, duration).map_err(|e| {
            warn!(error = %e, "note rejected");
            e
        })?;
        Ok(self.engine.play_until(&sequence, self.listener(), cancel)?)
    }

    /// The first `how_many` instruments as `(index, name)` pairs
    pub fn instruments(&self, how_many: usize) -> Vec<(usize, &str)> {
        self.catalog.list(how_many)
    }

    fn listener(&self) -> Option<&dyn NoteListener> {
        if self.show_notes {
            Some(&ConsoleListener)
        } else {
            None
        }
    }
}
