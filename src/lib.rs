//! # Tunebox
//!
//! Tunebox builds short melodies from note names and plays them on a MIDI
//! output device.
//!
//! The note codec, tune model and compiler live in `tunebox-core`; this crate
//! adds the playback side and an interactive shell.
//!
//! ## Modules
//!
//! - `audio`: MIDI output, the blocking playback engine and cancellation.
//! - `player`: Compiles tunes and single notes and hands them to the engine.
//! - `commands`: The REPL command registry and handlers.
//! - `repl`: The interactive Read-Eval-Print Loop.

pub mod audio;
pub mod commands;
pub mod player;
pub mod repl;

// Re-export commonly used types for convenience
pub use crate::audio::{
    cancellation, CancelSignal, Canceller, MidirDevice, NoteListener, PlaybackConfig,
    PlaybackEngine, PlaybackError, PlaybackOutcome, PlaybackState,
};
pub use crate::player::TunePlayer;
pub use tunebox_core::{GeneralMidi, InstrumentCatalog, Note, Tune};
