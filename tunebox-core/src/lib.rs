//! # Tunebox Core
//!
//! Audio-free core of Tunebox: the note name codec, the tune model and the
//! compiler that turns a tune into a tick-stamped event sequence.
//!
//! ## Example
//!
//! ```
//! use tunebox_core::{compile, GeneralMidi, Tune};
//!
//! let mut tune = Tune::new();
//! tune.add_note("C", 8);
//! tune.add_note("E", 4);
//!
//! let sequence = compile(&tune, &GeneralMidi).unwrap();
//! assert_eq!(sequence.length_ticks(), 12);
//! ```

pub mod compiler;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use compiler::{compile, compile_single_note};
pub use error::{CompileError, TuneError};
pub use types::{
    EventKind, EventSequence, GeneralMidi, InstrumentCatalog, Note, PitchClass, ScheduledEvent,
    Tune, DEFAULT_DURATION, TICKS_PER_BEAT,
};
