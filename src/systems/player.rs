use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    constants::player,
    error::{EntityError, GameError},
    systems::{
        components::{Body, Camera, Facing, LevelBounds, PlayerControlled, SimulationTick},
        health::Health,
        input::{InputFlags, InputState},
        physics::{DeathFall, Physics},
    },
};

/// What the player did recently, for locomotion and idle animations.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerActivity {
    /// Tick of the last movement, jump or throw.
    pub last_action_tick: u64,
    /// Walked during the current tick.
    pub moving: bool,
}

impl PlayerActivity {
    pub fn act(&mut self, now: u64) {
        self.last_action_tick = now;
    }
}

/// Turns the sampled input into walking and jumping.
///
/// Walking is suspended while a knockback plays out; jumping is only possible from the ground.
pub fn player_control_system(
    tick: Res<SimulationTick>,
    input: Res<InputState>,
    bounds: Res<LevelBounds>,
    mut players: Query<(&mut Body, &mut Physics, &mut Facing, &mut PlayerActivity), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    // Get the player's components (ensuring there is only one player)
    let (mut body, mut physics, mut facing, mut activity) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player system: {}",
                e
            )));
            return;
        }
    };

    let now = tick.now();
    activity.moving = false;

    if !physics.knocked_back {
        let mut x = body.position.x;
        if input.pressed(InputFlags::RIGHT) && x < bounds.end_x {
            x += player::WALK_SPEED;
            *facing = Facing::Right;
            activity.moving = true;
        }
        if input.pressed(InputFlags::LEFT) && x > bounds.start_x {
            x -= player::WALK_SPEED;
            *facing = Facing::Left;
            activity.moving = true;
        }

        let x = bounds.clamp(x);
        if x != body.position.x {
            body.position.x = x;
        }
    }

    if input.pressed(InputFlags::JUMP) && !physics.is_above_ground(body.position.y) && physics.speed_y <= 0.0 {
        physics.speed_y = player::JUMP_SPEED;
        debug!("Jump");
        activity.act(now);
    }

    if activity.moving || physics.is_above_ground(body.position.y) {
        activity.act(now);
    }
}

/// Keeps the camera a fixed distance behind the player.
pub fn camera_system(
    mut camera: ResMut<Camera>,
    players: Query<&Body, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    match players.single() {
        Ok(body) => camera.x = -body.position.x + player::CAMERA_LEAD,
        Err(_) => {
            errors.write(EntityError::PlayerMissing.into());
        }
    }
}

/// Starts the player's fall off the screen once their energy is gone.
pub fn player_death_system(
    mut commands: Commands,
    players: Query<(Entity, &Health), (With<PlayerControlled>, Without<DeathFall>)>,
) {
    for (entity, health) in players.iter() {
        if health.is_dead() {
            info!(entity = ?entity, "Player died");
            commands.entity(entity).insert(DeathFall::player());
        }
    }
}

/// Run condition: gameplay only runs while the player is alive.
pub fn player_alive(players: Query<&Health, With<PlayerControlled>>) -> bool {
    players.iter().any(|health| !health.is_dead())
}
