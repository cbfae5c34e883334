// tunebox-core/src/types/mod.rs

pub mod instrument;
pub mod note;
pub mod scheduled_event;
pub mod tune;

pub use instrument::{GeneralMidi, InstrumentCatalog};
pub use note::{decode, encode, PitchClass};
pub use scheduled_event::{EventKind, EventSequence, ScheduledEvent, TICKS_PER_BEAT};
pub use tune::{Note, Tune, DEFAULT_DURATION};
