use bevy_ecs::component::Component;
use tracing::trace;

use crate::constants::combat::MAX_ENERGY;

/// What a single [`Health::hit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already dead, or inside an invulnerability window.
    Ignored,
    Damaged { remaining: u32 },
    Killed,
}

/// Energy in `0..=100`, plus the bookkeeping for the hurt window that follows a hit.
///
/// Energy never increases after spawn, and reaching zero is permanent.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    energy: u32,
    last_hit_tick: Option<u64>,
    hurt_ticks: u32,
    invulnerable_while_hurt: bool,
}

impl Health {
    pub fn new(energy: u32, hurt_ticks: u32) -> Self {
        Self {
            energy: energy.min(MAX_ENERGY),
            last_hit_tick: None,
            hurt_ticks,
            invulnerable_while_hurt: false,
        }
    }

    /// Health that ignores damage for as long as the hurt window lasts.
    pub fn invulnerable_when_hurt(energy: u32, hurt_ticks: u32) -> Self {
        Self {
            invulnerable_while_hurt: true,
            ..Self::new(energy, hurt_ticks)
        }
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// Energy as a percentage of the maximum, for status bars.
    pub fn percentage(&self) -> f32 {
        self.energy as f32 * 100.0 / MAX_ENERGY as f32
    }

    pub fn is_dead(&self) -> bool {
        self.energy == 0
    }

    /// True while strictly less than the hurt window has passed since the last hit.
    pub fn is_hurt(&self, now: u64) -> bool {
        match self.last_hit_tick {
            Some(tick) => now.saturating_sub(tick) < self.hurt_ticks as u64,
            None => false,
        }
    }

    /// Apply `damage` at tick `now`, saturating at zero.
    pub fn hit(&mut self, damage: u32, now: u64) -> HitOutcome {
        if self.is_dead() || (self.invulnerable_while_hurt && self.is_hurt(now)) {
            return HitOutcome::Ignored;
        }

        self.energy = self.energy.saturating_sub(damage);
        self.last_hit_tick = Some(now);
        trace!(damage, remaining = self.energy, "Hit applied");

        if self.is_dead() {
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged { remaining: self.energy }
        }
    }
}
