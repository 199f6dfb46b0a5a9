use bevy_ecs::system::RunSystemOnce;
use pollo::{
    events::GameCommand,
    systems::{
        debug::{debug_toggle_system, DebugState},
        input::{Bindings, InputFlags, InputProvider, InputState, KeyboardInput, ScriptedInput},
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

#[test]
fn test_default_bindings() {
    let bindings = Bindings::default();

    assert_eq!(bindings.flag("a"), Some(InputFlags::LEFT));
    assert_eq!(bindings.flag("right"), Some(InputFlags::RIGHT));
    assert_eq!(bindings.flag("space"), Some(InputFlags::JUMP));
    assert_eq!(bindings.flag("btn-throw"), Some(InputFlags::THROW));
    assert_eq!(bindings.flag("p"), None);
    assert_eq!(bindings.command("p"), Some(GameCommand::TogglePause));
    assert_eq!(bindings.command("period"), Some(GameCommand::SingleTick));
}

#[test]
fn test_keyboard_press_and_release() {
    let mut keyboard = KeyboardInput::default();

    assert_eq!(keyboard.press("d"), None);
    assert_eq!(keyboard.press("w"), None);
    assert_eq!(keyboard.held(), InputFlags::RIGHT | InputFlags::JUMP);

    keyboard.release("w");
    assert_eq!(keyboard.sample(1), InputFlags::RIGHT);
}

#[test]
fn test_keyboard_returns_commands() {
    let mut keyboard = KeyboardInput::default();

    assert_eq!(keyboard.press("m"), Some(GameCommand::MuteAudio));
    assert_eq!(keyboard.press("r"), Some(GameCommand::ResetLevel));
    assert_eq!(keyboard.held(), InputFlags::empty());
}

#[test]
fn test_aliases_share_a_flag() {
    let mut keyboard = KeyboardInput::default();
    keyboard.press("left");
    keyboard.press("a");
    keyboard.release("a");

    // Flags do not count presses; releasing either key clears the direction
    assert_eq!(keyboard.held(), InputFlags::empty());
}

#[test]
fn test_edge_detection() {
    let mut state = InputState::default();

    state.update(InputFlags::THROW);
    assert_that(&state.just_pressed(InputFlags::THROW)).is_true();

    state.update(InputFlags::THROW);
    assert_that(&state.pressed(InputFlags::THROW)).is_true();
    assert_that(&state.just_pressed(InputFlags::THROW)).is_false();
}

#[test]
fn test_scripted_input_merges_segments() {
    let mut script = ScriptedInput::new()
        .hold(0..10, InputFlags::RIGHT)
        .hold(5..6, InputFlags::JUMP);

    assert_eq!(script.sample(0), InputFlags::RIGHT);
    assert_eq!(script.sample(5), InputFlags::RIGHT | InputFlags::JUMP);
    assert_eq!(script.sample(10), InputFlags::empty());
}

#[test]
fn test_debug_toggle_on_rising_edge() {
    let mut world = common::create_test_world();

    common::set_input(&mut world, InputFlags::DEBUG_TOGGLE);
    world.run_system_once(debug_toggle_system).expect("System should run successfully");
    assert_eq!(*world.resource::<DebugState>(), DebugState::Hitboxes);

    // Held, not pressed again
    common::set_input(&mut world, InputFlags::DEBUG_TOGGLE);
    world.run_system_once(debug_toggle_system).expect("System should run successfully");
    assert_eq!(*world.resource::<DebugState>(), DebugState::Hitboxes);

    common::set_input(&mut world, InputFlags::empty());
    common::set_input(&mut world, InputFlags::DEBUG_TOGGLE);
    world.run_system_once(debug_toggle_system).expect("System should run successfully");
    assert_eq!(*world.resource::<DebugState>(), DebugState::Off);
}
