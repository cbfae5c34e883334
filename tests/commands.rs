mod common;

use common::{count_warnings, fast_player};
use tunebox::audio::MidiMessage;
use tunebox::cancellation;
use tunebox::commands::{create_registry, CommandContext, CommandResult};

fn context() -> (CommandContext, std::sync::Arc<parking_lot::Mutex<Vec<MidiMessage>>>) {
    let (player, sent) = fast_player();
    let (_canceller, cancel) = cancellation();
    (CommandContext::new(player, cancel), sent)
}

#[test]
fn test_add_and_list_notes() {
    let registry = create_registry();
    let (mut ctx, _sent) = context();

    assert!(matches!(
        registry.execute("add C", &mut ctx),
        CommandResult::Message(_)
    ));
    assert!(matches!(
        registry.execute("add E5 4", &mut ctx),
        CommandResult::Message(_)
    ));
    assert_eq!(ctx.tune.len(), 2);
    assert_eq!(ctx.tune.notes()[0].duration(), 8);
    assert_eq!(ctx.tune.notes()[1].duration(), 4);

    assert_eq!(
        registry.execute("notes", &mut ctx),
        CommandResult::Message("Instrument number: 0\nC (8) E5 (4) ".to_string())
    );
}

#[test]
fn test_add_rejects_bad_duration() {
    let registry = create_registry();
    let (mut ctx, _sent) = context();

    assert!(matches!(
        registry.execute("add C zero", &mut ctx),
        CommandResult::Error(_)
    ));
    assert!(matches!(
        registry.execute("add", &mut ctx),
        CommandResult::Error(_)
    ));
    assert!(ctx.tune.is_empty());
}

#[test]
fn test_clear() {
    let registry = create_registry();
    let (mut ctx, _sent) = context();
    registry.execute("add C", &mut ctx);
    registry.execute("clear", &mut ctx);
    assert!(ctx.tune.is_empty());
}

#[test]
fn test_instrument_commands_do_not_collide() {
    let registry = create_registry();
    let (mut ctx, _sent) = context();

    registry.execute("instrument 40", &mut ctx);
    assert_eq!(ctx.tune.instrument(), 40);

    match registry.execute("instruments 3", &mut ctx) {
        CommandResult::Message(list) => assert_eq!(list.lines().count(), 3),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(ctx.tune.instrument(), 40);
}

#[test]
fn test_negative_instrument_rejected() {
    let registry = create_registry();
    let (mut ctx, _sent) = context();

    let (result, warnings) = count_warnings(|| registry.execute("instrument -1", &mut ctx));
    assert!(matches!(result, CommandResult::Error(_)));
    assert_eq!(warnings, 1);
    assert_eq!(ctx.tune.instrument(), 0);
}

#[test]
fn test_play_tune() {
    let registry = create_registry();
    let (mut ctx, sent) = context();
    registry.execute("add C 2", &mut ctx);

    assert_eq!(registry.execute("play", &mut ctx), CommandResult::Success);
    assert!(sent
        .lock()
        .iter()
        .any(|m| matches!(m, MidiMessage::NoteOn { note: 60, .. })));
}

#[test]
fn test_play_empty_tune_is_an_error() {
    let registry = create_registry();
    let (mut ctx, sent) = context();
    assert!(matches!(
        registry.execute("play", &mut ctx),
        CommandResult::Error(_)
    ));
    assert!(sent.lock().is_empty());
}

#[test]
fn test_note_command() {
    let registry = create_registry();
    let (mut ctx, sent) = context();

    assert_eq!(registry.execute("note G#3 2", &mut ctx), CommandResult::Success);
    assert!(sent
        .lock()
        .iter()
        .any(|m| matches!(m, MidiMessage::NoteOn { note: 56, .. })));
    assert!(ctx.tune.is_empty());
}

#[test]
fn test_show_toggle() {
    let registry = create_registry();
    let (mut ctx, _sent) = context();

    registry.execute("show on", &mut ctx);
    assert!(ctx.player.show_notes());
    registry.execute("show off", &mut ctx);
    assert!(!ctx.player.show_notes());
    assert!(matches!(
        registry.execute("show maybe", &mut ctx),
        CommandResult::Error(_)
    ));
}

#[test]
fn test_quit_and_unknown() {
    let registry = create_registry();
    let (mut ctx, _sent) = context();
    assert_eq!(registry.execute("quit", &mut ctx), CommandResult::Exit);
    assert_eq!(registry.execute("exit", &mut ctx), CommandResult::Exit);
    assert_eq!(
        registry.execute("frobnicate", &mut ctx),
        CommandResult::NotACommand
    );
}
