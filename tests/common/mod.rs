use anyhow::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tunebox::audio::{MidiMessage, OutputConnection, OutputDevice};
use tunebox::{PlaybackConfig, PlaybackEngine, TunePlayer};

/// Output device that records every message it is sent
#[derive(Clone, Default)]
pub struct RecordingDevice {
    pub sent: Arc<Mutex<Vec<MidiMessage>>>,
}

impl OutputDevice for RecordingDevice {
    fn open(&self) -> Result<Box<dyn OutputConnection>> {
        Ok(Box::new(RecordingConnection {
            sent: self.sent.clone(),
        }))
    }
}

struct RecordingConnection {
    sent: Arc<Mutex<Vec<MidiMessage>>>,
}

impl OutputConnection for RecordingConnection {
    fn send(&mut self, message: &MidiMessage) -> Result<()> {
        self.sent.lock().push(*message);
        Ok(())
    }
}

/// A player on a recording device at a tempo fast enough for tests
pub fn fast_player() -> (TunePlayer, Arc<Mutex<Vec<MidiMessage>>>) {
    let device = RecordingDevice::default();
    let sent = device.sent.clone();
    let config = PlaybackConfig::new()
        .with_tempo(6000.0)
        .with_poll_interval(Duration::from_millis(5))
        .with_decay(Duration::from_millis(10));
    let engine = PlaybackEngine::new(device, config);
    (TunePlayer::with_general_midi(engine), sent)
}

/// Counts `WARN` events emitted while it is installed
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` and return its result with the number of warnings it logged
pub fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, count.load(Ordering::SeqCst))
}
