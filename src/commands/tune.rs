//! Tune editing and playback REPL commands

use crate::audio::playback_engine::PlaybackOutcome;
use crate::commands::{CommandContext, CommandResult};
use crate::player::NUM_INSTRUMENTS;
use colored::*;
use tracing::warn;
use tunebox_core::DEFAULT_DURATION;

/// Parse an optional duration argument, defaulting to 8 ticks
fn parse_duration(arg: Option<&str>) -> Result<u32, String> {
    match arg {
        None => Ok(DEFAULT_DURATION),
        Some(s) => match s.parse::<u32>() {
            Ok(d) if d > 0 => Ok(d),
            _ => Err(format!("Duration must be a positive number of ticks, got '{}'", s)),
        },
    }
}

/// Handle `add <note> [duration]` - append a note to the tune
pub fn cmd_add(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let Some(&name) = parts.first() else {
        return CommandResult::Error(
            "Usage: add <note> [duration]\n  e.g. add C#5 4".to_string(),
        );
    };

    match parse_duration(parts.get(1).copied()) {
        Ok(duration) => {
            ctx.tune.add_note(name, duration);
            CommandResult::Message(format!(
                "Added {} ({}) - {} notes",
                name.cyan(),
                duration,
                ctx.tune.len()
            ))
        }
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `clear` - discard all notes
pub fn cmd_clear(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.tune.clear();
    CommandResult::Message("Tune cleared".to_string())
}

/// Handle `notes` - list the tune's notes and instrument
pub fn cmd_notes(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(ctx.tune.to_string())
}

/// Handle `instrument [n]` - show or set the tune's instrument
pub fn cmd_instrument(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let n = ctx.tune.instrument();
        let name = ctx
            .player
            .catalog()
            .name_of(n as usize)
            .unwrap_or("unknown");
        return CommandResult::Message(format!("Instrument {}: {}", n, name.cyan()));
    }

    let n = match args.parse::<i32>() {
        Ok(n) => n,
        Err(_) => return CommandResult::Error("Usage: instrument <number>".to_string()),
    };

    match ctx.tune.set_instrument(n) {
        Ok(()) => {
            let count = ctx.player.catalog().count();
            match ctx.player.catalog().name_of(n as usize) {
                Some(name) => CommandResult::Message(format!(
                    "Instrument set to {}: {}",
                    n,
                    name.green()
                )),
                None => CommandResult::Message(
                    format!(
                        "Instrument set to {}, but only {} instruments are available",
                        n, count
                    )
                    .yellow()
                    .to_string(),
                ),
            }
        }
        Err(e) => {
            warn!(error = %e, "instrument rejected");
            CommandResult::Error(e.to_string())
        }
    }
}

/// Handle `instruments [n]` - list the first n instruments (default 16)
pub fn cmd_instruments(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let how_many = if args.is_empty() {
        NUM_INSTRUMENTS
    } else {
        match args.parse::<usize>() {
            Ok(n) => n,
            Err(_) => return CommandResult::Error("Usage: instruments [count]".to_string()),
        }
    };

    let lines: Vec<String> = ctx
        .player
        .instruments(how_many)
        .into_iter()
        .map(|(i, name)| format!("{}: {}", i, name))
        .collect();
    CommandResult::Message(lines.join("\n"))
}

/// Handle `play` - play the whole tune
pub fn cmd_play(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.cancel.reset();
    match ctx.player.play_tune_until(&ctx.tune, &ctx.cancel) {
        Ok(PlaybackOutcome::Finished) => CommandResult::Success,
        Ok(PlaybackOutcome::Cancelled) => CommandResult::Message("Stopped".yellow().to_string()),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `note <name> [duration]` - play a single note
pub fn cmd_note(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let Some(&name) = parts.first() else {
        return CommandResult::Error(
            "Usage: note <name> [duration]\n  e.g. note C4 (middle C), note Db 4".to_string(),
        );
    };

    let duration = match parse_duration(parts.get(1).copied()) {
        Ok(d) => d,
        Err(e) => return CommandResult::Error(e),
    };

    ctx.cancel.reset();
    match ctx.player.play_note_until(name, duration, &ctx.cancel) {
        Ok(PlaybackOutcome::Finished) => CommandResult::Success,
        Ok(PlaybackOutcome::Cancelled) => CommandResult::Message("Stopped".yellow().to_string()),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `show [on|off]` - print notes as they are played
pub fn cmd_show(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let show = match args.to_lowercase().as_str() {
        "" => {
            let state = if ctx.player.show_notes() { "on" } else { "off" };
            return CommandResult::Message(format!("Show notes: {}", state.cyan()));
        }
        "on" | "true" | "yes" => true,
        "off" | "false" | "no" => false,
        _ => return CommandResult::Error("Usage: show <on|off>".to_string()),
    };

    ctx.player.set_show_notes(show);
    CommandResult::Message(format!(
        "Show notes: {}",
        if show { "on".green() } else { "off".yellow() }
    ))
}
