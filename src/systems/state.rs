use bevy_ecs::{
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use strum_macros::AsRefStr;
use tracing::info;

use crate::{
    constants::physics::LOWER_WORLD_BOUND,
    systems::{
        audio::AudioEvent,
        boss::BossAi,
        components::{Body, PlayerControlled},
        physics::DeathFall,
    },
};

/// How the session stands. Both terminal outcomes are final until the level is reset.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum GameOutcome {
    #[default]
    Playing,
    Victory,
    GameOver,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::Playing
    }
}

/// Whether the level ever had a boss; victory is the boss disappearing.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossTracker {
    pub spawned: bool,
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PauseState {
    #[default]
    Inactive,
    /// Paused; `step_ticks` ticks may still run before freezing again.
    Active { step_ticks: u32 },
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active { .. })
    }

    pub fn toggle(&mut self) {
        *self = match *self {
            PauseState::Active { .. } => {
                info!("Game resumed");
                PauseState::Inactive
            }
            PauseState::Inactive => {
                info!("Game paused");
                PauseState::Active { step_ticks: 0 }
            }
        };
    }

    /// Allow one tick to run while paused. Has no effect while running.
    pub fn single_step(&mut self) {
        if let PauseState::Active { step_ticks } = self {
            *step_ticks += 1;
        }
    }

    /// Consumes a tick: returns true if the simulation may advance.
    pub fn tick(&mut self) -> bool {
        match self {
            PauseState::Inactive => true,
            PauseState::Active { step_ticks: 0 } => false,
            PauseState::Active { step_ticks } => {
                *step_ticks -= 1;
                true
            }
        }
    }
}

/// Decides victory (the boss is gone) and game over (the player fell out of the world).
pub fn outcome_system(
    mut outcome: ResMut<GameOutcome>,
    tracker: Res<BossTracker>,
    bosses: Query<(), With<BossAi>>,
    players: Query<(&Body, Option<&DeathFall>), With<PlayerControlled>>,
    mut audio: EventWriter<AudioEvent>,
) {
    if outcome.is_over() {
        return;
    }

    let fell_out = players
        .iter()
        .any(|(body, fall)| fall.is_some() && body.position.y > LOWER_WORLD_BOUND);

    let new = if fell_out {
        GameOutcome::GameOver
    } else if tracker.spawned && bosses.is_empty() {
        GameOutcome::Victory
    } else {
        return;
    };

    info!(outcome = new.as_ref(), "Game finished");
    audio.write(match new {
        GameOutcome::Victory => AudioEvent::Victory,
        _ => AudioEvent::GameOver,
    });
    *outcome = new;
}
