//! Debug overlay toggling
use bevy_ecs::prelude::*;
use tracing::info;

use crate::systems::input::{InputFlags, InputState};

#[derive(Resource, Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebugState {
    #[default]
    Off,
    /// Renderers outline every hitbox.
    Hitboxes,
}

impl DebugState {
    pub fn next(&self) -> Self {
        match self {
            DebugState::Off => DebugState::Hitboxes,
            DebugState::Hitboxes => DebugState::Off,
        }
    }

    pub fn shows_hitboxes(&self) -> bool {
        *self == DebugState::Hitboxes
    }
}

/// Flips the hitbox overlay on the rising edge of the debug button.
pub fn debug_toggle_system(input: Res<InputState>, mut state: ResMut<DebugState>) {
    if input.just_pressed(InputFlags::DEBUG_TOGGLE) {
        *state = state.next();
        info!(state = ?*state, "Debug overlay toggled");
    }
}
