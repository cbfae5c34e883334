//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod general;
pub mod midi;
pub mod tune;

use crate::audio::cancel::CancelSignal;
use crate::player::TunePlayer;
use tunebox_core::Tune;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No command matches this input
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub player: TunePlayer,
    /// The tune being edited
    pub tune: Tune,
    /// Fired by Ctrl+C to stop the current playback
    pub cancel: CancelSignal,
}

impl CommandContext {
    pub fn new(player: TunePlayer, cancel: CancelSignal) -> Self {
        Self {
            player,
            tune: Tune::new(),
            cancel,
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "midi devices")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Tune editing and playback
    registry.register("add", tune::cmd_add);
    registry.register("clear", tune::cmd_clear);
    registry.register("notes", tune::cmd_notes);
    registry.register("instrument", tune::cmd_instrument);
    registry.register("instruments", tune::cmd_instruments);
    registry.register("play", tune::cmd_play);
    registry.register("note", tune::cmd_note);
    registry.register("show", tune::cmd_show);

    // MIDI commands
    registry.register("midi devices", midi::cmd_midi_devices);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}
