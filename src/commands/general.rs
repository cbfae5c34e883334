//! General REPL commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "Tunebox Help".bold());
    println!("{}", "============".bold());
    println!();
    println!("{}", "Notes:".green());
    println!("  Names are a letter A-G, an optional {} or {}, and an optional octave 0-8.", "#".cyan(), "b".cyan());
    println!("  Octave 4 is the default, so {} and {} are both middle C.", "C".cyan(), "C4".cyan());
    println!("  Durations are in ticks, four ticks to a beat. The default is 8.");
    println!();
    println!("{}", "Editing:".green());
    println!("  {}  - Append a note to the tune", "add <note> [duration]".cyan());
    println!("  {}                  - List the tune", "notes".cyan());
    println!("  {}                  - Remove every note", "clear".cyan());
    println!("  {}       - Show or set the instrument", "instrument [n]".cyan());
    println!("  {}      - List instruments (default 16)", "instruments [n]".cyan());
    println!();
    println!("{}", "Playback:".green());
    println!("  {}                   - Play the tune", "play".cyan());
    println!("  {} - Play a single note", "note <name> [duration]".cyan());
    println!("  {}       - Print notes as they sound", "show <on|off>".cyan());
    println!("  {}                 - Stop playback", "Ctrl+C".cyan());
    println!();
    println!("{}", "Examples:".green());
    println!("  tunebox> {}", "add C".cyan());
    println!("  tunebox> {}", "add E 4".cyan());
    println!("  tunebox> {}", "add G5 12".cyan());
    println!("  tunebox> {}", "instrument 40".cyan());
    println!("  tunebox> {}", "play".cyan());
    println!();
    println!("{}", "MIDI Commands:".green());
    println!("  {}           - List MIDI output ports", "midi devices".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}                   - Show this help", "help".bright_green());
    println!("  {}                   - Exit the REPL", "quit".bright_red());
}
