pub mod cancel;
pub mod midi;
pub mod playback_engine;
pub(crate) mod transport;

pub use cancel::{cancellation, CancelSignal, Canceller};
pub use midi::{MidiMessage, MidirDevice, OutputConnection, OutputDevice};
pub use playback_engine::{
    NoteListener, PlaybackConfig, PlaybackEngine, PlaybackError, PlaybackOutcome, PlaybackState,
};
