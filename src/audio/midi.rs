//! MIDI output module for Tunebox
//!
//! The playback engine talks to an [`OutputDevice`], which it opens once per
//! playback and releases by dropping the returned [`OutputConnection`]. The
//! midir-backed [`MidirDevice`] sends to a hardware or virtual MIDI port.

use anyhow::{anyhow, Result};
use midir::{MidiOutput, MidiOutputConnection};
use tracing::{debug, info, warn};

/// Channel every tune is played on (zero-based, so MIDI channel 2)
pub const DEFAULT_CHANNEL: u8 = 1;

/// Velocity used for every note
pub const DEFAULT_VELOCITY: u8 = 90;

/// Client name registered with the MIDI subsystem
const CLIENT_NAME: &str = "Tunebox";

/// A channel message sent to the output device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    /// Select an instrument: channel (0-15), program (0-127)
    ProgramChange { channel: u8, program: u8 },
    /// Start a note: channel, note (0-127), velocity (0-127)
    NoteOn { channel: u8, note: u8, velocity: u8 },
    /// Stop a note: channel, note, release velocity
    NoteOff { channel: u8, note: u8, velocity: u8 },
    /// Silence everything on a channel (CC 123)
    AllNotesOff { channel: u8 },
}

impl MidiMessage {
    /// Raw bytes on the wire
    pub fn to_bytes(&self) -> Vec<u8> {
        match *self {
            // Program Change: 0xC0 + channel, program
            MidiMessage::ProgramChange { channel, program } => {
                vec![0xC0 | (channel & 0x0F), program & 0x7F]
            }
            // Note On: 0x90 + channel, note, velocity
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => vec![0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            // Note Off: 0x80 + channel, note, velocity
            MidiMessage::NoteOff {
                channel,
                note,
                velocity,
            } => vec![0x80 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            // All Notes Off: CC 123, value 0
            MidiMessage::AllNotesOff { channel } => vec![0xB0 | (channel & 0x0F), 123, 0],
        }
    }
}

/// Something that can be opened for exclusive output during one playback
pub trait OutputDevice: Send + Sync {
    /// Acquire the output. The connection is released when dropped.
    fn open(&self) -> Result<Box<dyn OutputConnection>>;
}

/// An open output. Dropping it releases the underlying resource.
pub trait OutputConnection: Send {
    fn send(&mut self, message: &MidiMessage) -> Result<()>;
}

/// MIDI output through midir
#[derive(Debug, Clone, Default)]
pub struct MidirDevice {
    /// Port to connect to (partial match); first available port if `None`
    port_name: Option<String>,
}

impl MidirDevice {
    /// Create a device for the named port, or the first available port
    pub fn new(port_name: Option<String>) -> Self {
        Self { port_name }
    }

    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }

    /// List available MIDI output ports
    /// Note: Creates a temporary MIDI client, which can sometimes fail on macOS.
    /// Retries up to 3 times with a small delay.
    pub fn list_ports() -> Result<Vec<String>> {
        let mut last_err = None;
        for attempt in 0..3 {
            if attempt > 0 {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            match MidiOutput::new(CLIENT_NAME) {
                Ok(midi_out) => {
                    let ports = midi_out.ports();
                    let names: Vec<String> = ports
                        .iter()
                        .filter_map(|p| midi_out.port_name(p).ok())
                        .collect();
                    return Ok(names);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "MIDI initialization failed");
                    last_err = Some(e);
                }
            }
        }
        Err(anyhow!(
            "MIDI initialization failed after 3 attempts: {:?}",
            last_err
        ))
    }
}

impl OutputDevice for MidirDevice {
    fn open(&self) -> Result<Box<dyn OutputConnection>> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        let ports = midi_out.ports();

        let port = match &self.port_name {
            Some(wanted) => ports
                .iter()
                .find(|p| {
                    midi_out
                        .port_name(p)
                        .map(|name| name.contains(wanted.as_str()))
                        .unwrap_or(false)
                })
                .ok_or_else(|| anyhow!("MIDI port '{}' not found", wanted))?,
            None => ports
                .first()
                .ok_or_else(|| anyhow!("No MIDI output ports available"))?,
        };

        let actual_name = midi_out.port_name(port)?;
        let connection = midi_out
            .connect(port, "tunebox-out")
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", actual_name, e))?;

        info!(port = %actual_name, "opened MIDI output");
        Ok(Box::new(MidirConnection {
            connection: Some(connection),
            port_name: actual_name,
        }))
    }
}

/// Open midir connection, closed on drop
struct MidirConnection {
    connection: Option<MidiOutputConnection>,
    port_name: String,
}

impl OutputConnection for MidirConnection {
    fn send(&mut self, message: &MidiMessage) -> Result<()> {
        let conn = self
            .connection
            .as_mut()
            .ok_or_else(|| anyhow!("MIDI port '{}' is closed", self.port_name))?;
        conn.send(&message.to_bytes())
            .map_err(|e| anyhow!("Failed to send {:?}: {}", message, e))
    }
}

impl Drop for MidirConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.connection.take() {
            let _ = conn.close();
            debug!(port = %self.port_name, "closed MIDI output");
        }
    }
}
