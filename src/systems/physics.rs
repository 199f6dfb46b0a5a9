use bevy_ecs::{
    component::Component,
    entity::Entity,
    query::{Has, Without},
    system::{Commands, Query, Res},
};
use tracing::debug;

use crate::{
    constants::{enemy, physics, player},
    systems::{
        components::{Body, EntityKind, LevelBounds, PlayerControlled},
        lifetime::Remove,
    },
};

/// Vertical and knockback motion. Positive `speed_y` moves up (towards smaller y).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub speed_x: f32,
    pub speed_y: f32,
    pub acceleration: f32,
    pub horizontal_friction: f32,
    pub ground_level: f32,
    pub knocked_back: bool,
}

impl Physics {
    pub fn new(ground_level: f32) -> Self {
        Self {
            speed_x: 0.0,
            speed_y: 0.0,
            acceleration: physics::GRAVITY,
            horizontal_friction: physics::HORIZONTAL_FRICTION,
            ground_level,
            knocked_back: false,
        }
    }

    pub fn is_above_ground(&self, y: f32) -> bool {
        y < self.ground_level
    }

    /// Push horizontally; friction brings the entity back to rest.
    pub fn knock(&mut self, speed_x: f32) {
        self.speed_x = speed_x;
        self.knocked_back = true;
    }

    /// One tick of gravity. Returns true when the entity touched down this tick.
    pub fn apply_gravity(&mut self, y: &mut f32) -> bool {
        if !(self.is_above_ground(*y) || self.speed_y > 0.0) {
            return false;
        }

        *y -= self.speed_y;
        self.speed_y -= self.acceleration;

        // NaN positions are treated as being on the ground.
        if *y >= self.ground_level || y.is_nan() {
            *y = self.ground_level;
            self.speed_y = 0.0;
            return true;
        }
        false
    }

    /// One tick of knockback friction on the x axis.
    pub fn apply_knockback(&mut self, x: &mut f32) {
        if self.speed_x == 0.0 {
            return;
        }

        *x += self.speed_x;
        self.speed_x *= self.horizontal_friction;
        if self.speed_x.abs() < physics::KNOCKBACK_REST_THRESHOLD {
            self.speed_x = 0.0;
            self.knocked_back = false;
        }
    }
}

/// Falling-off-the-screen motion of a defeated entity. Replaces [`Physics`] once attached.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DeathFall {
    /// Positive values move down.
    pub fall_speed: f32,
    pub gravity: f32,
}

impl DeathFall {
    pub fn enemy() -> Self {
        Self {
            fall_speed: enemy::DEATH_FALL_INITIAL_SPEED,
            gravity: enemy::DEATH_FALL_GRAVITY,
        }
    }

    pub fn player() -> Self {
        Self {
            fall_speed: player::DEATH_FALL_INITIAL_SPEED,
            gravity: player::DEATH_FALL_GRAVITY,
        }
    }

    pub fn step(&mut self, y: &mut f32) {
        *y += self.fall_speed;
        self.fall_speed += self.gravity;
    }
}

/// Applies gravity and knockback friction to every living body.
pub fn physics_system(
    bounds: Res<LevelBounds>,
    mut query: Query<(&mut Body, &mut Physics, Has<PlayerControlled>), Without<DeathFall>>,
) {
    for (mut body, mut physics, is_player) in query.iter_mut() {
        let mut position = body.position;

        physics.apply_gravity(&mut position.y);
        physics.apply_knockback(&mut position.x);

        if is_player {
            position.x = bounds.clamp(position.x);
        }

        if position != body.position {
            body.position = position;
        }
    }
}

/// Moves defeated entities down until they leave the world, then flags them for removal.
///
/// The player is never removed; the outcome system watches it fall instead.
pub fn death_fall_system(mut commands: Commands, mut query: Query<(Entity, &EntityKind, &mut Body, &mut DeathFall)>) {
    for (entity, kind, mut body, mut fall) in query.iter_mut() {
        if body.position.y > physics::LOWER_WORLD_BOUND {
            continue;
        }

        fall.step(&mut body.position.y);

        if body.position.y > physics::LOWER_WORLD_BOUND && *kind != EntityKind::Player {
            debug!(entity = ?entity, kind = kind.as_ref(), "Fell out of the world");
            commands.entity(entity).insert(Remove);
        }
    }
}
