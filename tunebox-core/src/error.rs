//! # Error Types
//!
//! Named failures for malformed input. Nothing in the core panics on bad
//! data: tunes reject invalid settings and the compiler aborts with one of
//! these instead of returning a partial sequence.

use thiserror::Error;

/// Rejected change to a [`Tune`](crate::types::Tune).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TuneError {
    /// Instrument numbers start at zero.
    #[error("The instrument number must be greater-than or equal-to zero: {0}")]
    NegativeInstrument(i32),
}

/// Failure to turn a tune into an event sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The tune has no notes to play.
    #[error("The tune has no notes. Try using its add_note method.")]
    EmptyTune,

    /// The tune's instrument is not in the catalog.
    ///
    /// ```
    /// # use tunebox_core::CompileError;
    /// let err = CompileError::InstrumentOutOfRange { instrument: 200, available: 128 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Instrument 200 is out of range: the instrument number must be less than 128"
    /// );
    /// ```
    #[error("Instrument {instrument} is out of range: the instrument number must be less than {available}")]
    InstrumentOutOfRange { instrument: u32, available: usize },

    /// A note name could not be encoded.
    #[error("Note {0} is not recognised.")]
    UnrecognizedNote(String),
}
