use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tunebox::{MidirDevice, PlaybackConfig, PlaybackEngine, TunePlayer};

/// Environment variable naming the MIDI output port to play through
const PORT_ENV: &str = "TUNEBOX_MIDI_PORT";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let port = std::env::var(PORT_ENV).ok().filter(|p| !p.is_empty());
    let device = MidirDevice::new(port);
    let engine = PlaybackEngine::new(device, PlaybackConfig::default());

    tunebox::repl::start(TunePlayer::with_general_midi(engine))
}
