use bevy_ecs::{
    component::Component,
    query::Without,
    system::Query,
};

use crate::{
    constants::enemy,
    systems::{
        components::{Body, Facing},
        health::Health,
        physics::{DeathFall, Physics},
    },
};

/// Walks an enemy left at a constant speed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    pub speed: f32,
}

/// Periodic small jumps, used by small chickens.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub remaining_ticks: u32,
}

impl Default for Hop {
    fn default() -> Self {
        Self {
            remaining_ticks: enemy::SMALL_CHICKEN_HOP_TICKS,
        }
    }
}

impl Hop {
    /// Counts down while grounded; returns true when it is time to jump.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.remaining_ticks = enemy::SMALL_CHICKEN_HOP_TICKS;
            true
        } else {
            false
        }
    }
}

pub fn enemy_patrol_system(mut query: Query<(&mut Body, &mut Facing, &Patrol, &Health), Without<DeathFall>>) {
    for (mut body, mut facing, patrol, health) in query.iter_mut() {
        if health.is_dead() || patrol.speed == 0.0 {
            continue;
        }
        body.position.x -= patrol.speed;
        if *facing != Facing::Left {
            *facing = Facing::Left;
        }
    }
}

pub fn enemy_hop_system(mut query: Query<(&Body, &mut Physics, &mut Hop, &Health), Without<DeathFall>>) {
    for (body, mut physics, mut hop, health) in query.iter_mut() {
        if health.is_dead() || physics.is_above_ground(body.position.y) {
            continue;
        }
        if hop.tick() {
            physics.speed_y = enemy::SMALL_CHICKEN_HOP_SPEED;
        }
    }
}
