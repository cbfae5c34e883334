//! Tune model
//!
//! A [`Tune`] is an instrument number plus an ordered list of [`Note`]s. Note
//! names are kept as written; the compiler decides whether they are valid.

use crate::error::TuneError;
use std::fmt;

/// Duration in ticks used when a note is created without one
pub const DEFAULT_DURATION: u32 = 8;

/// A note within a tune: its name and how long it plays, in ticks.
///
/// The name is stored as written and only checked when the tune is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Note {
    name: String,
    duration: u32,
}

impl Note {
    /// Create a note with the default duration of 8 ticks
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_duration(name, DEFAULT_DURATION)
    }

    /// Create a note with an explicit duration
    pub fn with_duration(name: impl Into<String>, duration: u32) -> Self {
        Note {
            name: name.into(),
            duration,
        }
    }

    /// Name as written, e.g. "C", "C#", "E5"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in ticks
    pub fn duration(&self) -> u32 {
        self.duration
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.duration)
    }
}

/// A simple tune: a sequence of notes played on one instrument
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tune {
    instrument: u32,
    notes: Vec<Note>,
}

impl Tune {
    /// Create an empty tune on instrument 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note. Names are not validated here.
    pub fn add_note(&mut self, name: impl Into<String>, duration: u32) {
        self.notes.push(Note::with_duration(name, duration));
    }

    /// Append a prepared note
    pub fn add(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Discard all of the notes. The instrument is kept.
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Instrument (program) number used to play the tune
    pub fn instrument(&self) -> u32 {
        self.instrument
    }

    /// Set the instrument. Negative values are rejected and the current
    /// instrument is left unchanged.
    pub fn set_instrument(&mut self, instrument: i32) -> Result<(), TuneError> {
        let instrument =
            u32::try_from(instrument).map_err(|_| TuneError::NegativeInstrument(instrument))?;
        self.instrument = instrument;
        Ok(())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl fmt::Display for Tune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Instrument number: {}", self.instrument)?;
        for note in &self.notes {
            write!(f, "{} ", note)?;
        }
        Ok(())
    }
}
