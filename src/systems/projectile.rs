//! Thrown salsa bottles: a flat throw that turns into a parabola, then a splash and a fade-out.

use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, trace};

use crate::{
    constants::projectile,
    systems::{
        audio::AudioEvent,
        components::{Body, Facing, LevelBounds, PlayerControlled, ProjectileBundle, SimulationTick},
        input::{InputFlags, InputState},
        item::Inventory,
        lifetime::Remove,
        player::PlayerActivity,
    },
};

/// Post-impact state of a bottle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splash {
    pub frame: u8,
    pub elapsed_ticks: u32,
    pub opacity: f32,
}

impl Splash {
    fn new() -> Self {
        Self {
            frame: 0,
            elapsed_ticks: 0,
            opacity: 1.0,
        }
    }

    /// Advance one tick. Returns true once the splash has fully faded.
    pub fn tick(&mut self) -> bool {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks < projectile::SPLASH_FRAME_TICKS {
            return false;
        }
        self.elapsed_ticks = 0;

        if self.frame + 1 < projectile::SPLASH_FRAMES {
            self.frame += 1;
        } else {
            self.opacity -= projectile::FADE_STEP;
            // Snap float residue so the fade ends after exactly `1 / FADE_STEP` steps.
            if self.opacity < projectile::FADE_STEP / 2.0 {
                self.opacity = 0.0;
            }
        }
        self.opacity <= 0.0
    }
}

/// Flight state of a thrown bottle. Positive `velocity.y` moves up.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub velocity: Vec2,
    pub distance_traveled: f32,
    pub splash: Option<Splash>,
}

impl Projectile {
    pub fn thrown(facing: Facing) -> Self {
        Self {
            velocity: Vec2::new(projectile::THROW_SPEED * facing.sign(), 0.0),
            distance_traveled: 0.0,
            splash: None,
        }
    }

    pub fn is_splashing(&self) -> bool {
        self.splash.is_some()
    }

    /// Freeze in place and start splashing. Returns false if already splashing.
    pub fn begin_splash(&mut self) -> bool {
        if self.is_splashing() {
            return false;
        }
        self.velocity = Vec2::ZERO;
        self.splash = Some(Splash::new());
        true
    }

    pub fn opacity(&self) -> f32 {
        self.splash.map(|s| s.opacity).unwrap_or(1.0)
    }

    /// One tick of flight. Returns true when the bottle hit the ground.
    pub fn fly(&mut self, position: &mut Vec2) -> bool {
        if self.is_splashing() {
            return false;
        }

        position.x += self.velocity.x;
        self.distance_traveled += self.velocity.x.abs();

        if self.distance_traveled > projectile::STRAIGHT_DISTANCE {
            position.y -= self.velocity.y;
            self.velocity.y -= projectile::GRAVITY;
        }

        if position.y >= projectile::GROUND_LEVEL {
            position.y = projectile::GROUND_LEVEL;
            return true;
        }
        false
    }
}

/// Tick of the last throw, enforcing the spacing between two throws.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrowCooldown {
    pub last_throw_tick: Option<u64>,
}

impl ThrowCooldown {
    pub fn ready(&self, now: u64) -> bool {
        match self.last_throw_tick {
            Some(last) => now.saturating_sub(last) >= projectile::THROW_COOLDOWN_TICKS as u64,
            None => true,
        }
    }
}

/// Spawns a bottle in front of the player when throw is held, ammo is left and the cooldown allows it.
#[allow(clippy::too_many_arguments)]
pub fn throw_system(
    mut commands: Commands,
    tick: Res<SimulationTick>,
    input: Res<InputState>,
    mut cooldown: ResMut<ThrowCooldown>,
    mut inventory: ResMut<Inventory>,
    mut players: Query<(&Body, &Facing, &mut PlayerActivity), With<PlayerControlled>>,
    mut audio: EventWriter<AudioEvent>,
) {
    let now = tick.now();
    if !input.pressed(InputFlags::THROW) || !cooldown.ready(now) {
        return;
    }

    let Ok((body, facing, mut activity)) = players.single_mut() else {
        return;
    };

    if !inventory.take_bottle() {
        trace!("Throw ignored, no bottles left");
        return;
    }

    let position = body.position + projectile::SPAWN_OFFSET;
    let entity = commands.spawn(ProjectileBundle::new(position, *facing)).id();
    cooldown.last_throw_tick = Some(now);
    activity.act(now);
    audio.write(AudioEvent::BottleThrown);
    debug!(entity = ?entity, x = position.x, y = position.y, facing = ?facing, bottles = inventory.bottles, "Bottle thrown");
}

/// Moves bottles in flight, splashes them on the ground and discards those that left the level.
pub fn projectile_flight_system(
    mut commands: Commands,
    bounds: Res<LevelBounds>,
    mut query: Query<(Entity, &mut Body, &mut Projectile), Without<Remove>>,
) {
    for (entity, mut body, mut projectile) in query.iter_mut() {
        if projectile.is_splashing() {
            continue;
        }

        let mut position = body.position;
        if projectile.fly(&mut position) {
            projectile.begin_splash();
            trace!(entity = ?entity, "Bottle hit the ground");
        }
        body.position = position;

        let x = body.position.x;
        if x < -projectile::OUT_OF_BOUNDS_MARGIN || x > bounds.end_x + projectile::OUT_OF_BOUNDS_MARGIN {
            trace!(entity = ?entity, x, "Bottle left the level");
            commands.entity(entity).insert(Remove);
        }
    }
}

/// Plays the splash and fades the bottle out, flagging it for removal once invisible.
pub fn splash_system(mut commands: Commands, mut query: Query<(Entity, &mut Projectile), Without<Remove>>) {
    for (entity, mut projectile) in query.iter_mut() {
        let Some(splash) = projectile.splash.as_mut() else {
            continue;
        };
        if splash.tick() {
            commands.entity(entity).insert(Remove);
        }
    }
}
