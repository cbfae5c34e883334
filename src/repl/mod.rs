//! REPL (Read-Eval-Print Loop) for building and playing tunes

use crate::audio::cancel::{cancellation, Canceller};
use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::player::TunePlayer;
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::thread;
use tracing::debug;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive REPL driving a [`TunePlayer`]
pub struct Repl {
    editor: Option<DefaultEditor>,
    registry: CommandRegistry,
    ctx: CommandContext,
    /// Handed to the input thread so Ctrl+C can stop playback
    canceller: Canceller,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
}

impl Repl {
    /// Create a new REPL instance around a player
    pub fn new(player: TunePlayer) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let (canceller, cancel) = cancellation();
        let (tx_input, rx_input) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            registry: create_registry(),
            ctx: CommandContext::new(player, cancel),
            canceller,
            tx_input,
            rx_input,
        })
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{}",
            "Tunebox - build a tune, then play it".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "add C".cyan(),
            "add E5 4".cyan(),
            "play".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit. {} stops playback.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+D".bright_red(),
            "Ctrl+C".bright_yellow()
        );

        let Some(mut editor) = self.editor.take() else {
            anyhow::bail!("REPL is already running");
        };
        let tx_input = self.tx_input.clone();
        let canceller = self.canceller.clone();

        // Playback blocks the main loop, so input is read on its own thread
        thread::spawn(move || loop {
            let prompt = format!("{} ", "tunebox>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("interrupt, cancelling playback");
                    canceller.cancel();
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        while let Ok(event) = self.rx_input.recv() {
            match event {
                ReplEvent::Input(Ok(line)) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                ReplEvent::Input(Err(ReadlineError::Eof)) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                ReplEvent::Input(Err(err)) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                    break;
                }
            }
        }

        Ok(())
    }

    /// Run one line of input, returning false when the REPL should exit
    pub fn handle_line(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }

        match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{}", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::NotACommand => {
                println!(
                    "{} unknown command '{}', type '{}' for a list",
                    "Error:".bright_red().bold(),
                    line,
                    "help".bright_green()
                );
            }
        }
        true
    }
}

/// Convenience function to start the REPL
pub fn start(player: TunePlayer) -> Result<()> {
    let mut repl =
        Repl::new(player).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}
