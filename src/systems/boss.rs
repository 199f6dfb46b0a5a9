//! The boss: a patrolling hen that winds up and charges at the player.
//!
//! The phase machine is a set of tick countdowns, advanced once per tick:
//! `Patrol` → `Alerting` → `Charging` → `Patrol`. Leaving `Patrol` is random, with odds that
//! grow with every hit the boss has taken. Hurt and dead only change the animation, the phase
//! timers keep running underneath.

use bevy_ecs::{
    component::Component,
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use rand::Rng;
use tracing::debug;

use crate::{
    constants::boss,
    systems::{
        components::{Body, Facing, GameRng, LevelBounds, PlayerControlled},
        health::Health,
        physics::DeathFall,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BossPhase {
    /// Wandering, and walking towards a nearby player.
    #[default]
    Patrol,
    /// Standing still, about to charge.
    Alerting { remaining_ticks: u32 },
    /// Dashing towards where the player was when the charge began.
    Charging { remaining_ticks: u32, target_x: f32 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct BossAi {
    pub phase: BossPhase,
    pub hits_taken: u32,
    /// Walked towards the player during the current tick.
    pub walking: bool,
}

impl BossAi {
    /// Per-tick chance of leaving `Patrol` for `Alerting`.
    pub fn trigger_probability(&self, energy: u32) -> f64 {
        let p = if energy <= boss::ENRAGED_ENERGY {
            boss::ENRAGED_TRIGGER
        } else {
            boss::TRIGGER_BASE + self.hits_taken as f64 * boss::TRIGGER_PER_HIT
        };
        p.clamp(0.0, 1.0)
    }

    pub fn begin_alert(&mut self) {
        self.phase = BossPhase::Alerting {
            remaining_ticks: boss::ALERT_TICKS,
        };
    }

    pub fn register_hit(&mut self) {
        self.hits_taken += 1;
    }

    /// Advance the phase timers by one tick.
    ///
    /// `player_x` is captured as the charge target when alerting ends.
    /// Returns the phases before and after when a transition happened.
    pub fn tick(&mut self, player_x: f32) -> Option<(BossPhase, BossPhase)> {
        let old = self.phase;
        let new = match old {
            BossPhase::Patrol => return None,
            BossPhase::Alerting { remaining_ticks } => {
                if remaining_ticks > 1 {
                    BossPhase::Alerting {
                        remaining_ticks: remaining_ticks - 1,
                    }
                } else {
                    BossPhase::Charging {
                        remaining_ticks: boss::CHARGE_TICKS,
                        target_x: player_x,
                    }
                }
            }
            BossPhase::Charging {
                remaining_ticks,
                target_x,
            } => {
                if remaining_ticks > 1 {
                    BossPhase::Charging {
                        remaining_ticks: remaining_ticks - 1,
                        target_x,
                    }
                } else {
                    BossPhase::Patrol
                }
            }
        };

        self.phase = new;
        if std::mem::discriminant(&old) != std::mem::discriminant(&new) {
            Some((old, new))
        } else {
            None
        }
    }
}

/// Moves `x` towards `target` by at most `speed`, returning the new x and the facing.
fn step_towards(x: f32, target: f32, speed: f32) -> (f32, Facing) {
    let delta = target - x;
    let facing = if delta < 0.0 { Facing::Left } else { Facing::Right };
    (x + delta.clamp(-speed, speed), facing)
}

#[allow(clippy::type_complexity)]
pub fn boss_ai_system(
    mut rng: ResMut<GameRng>,
    bounds: Res<LevelBounds>,
    players: Query<&Body, With<PlayerControlled>>,
    mut bosses: Query<(&mut BossAi, &mut Body, &mut Facing, &Health), (Without<PlayerControlled>, Without<DeathFall>)>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let player_x = player.center().x;

    for (mut ai, mut body, mut facing, health) in bosses.iter_mut() {
        if health.is_dead() {
            continue;
        }

        let half_width = body.size.x / 2.0;
        let center_x = body.center().x;
        let in_range = (player_x - center_x).abs() < boss::DETECTION_RANGE;
        ai.walking = false;

        if let BossPhase::Patrol = ai.phase {
            if in_range && rng.0.random_bool(ai.trigger_probability(health.energy())) {
                debug!(hits = ai.hits_taken, energy = health.energy(), "Boss winding up");
                ai.begin_alert();
                // The alert countdown starts on the next tick
                continue;
            } else if in_range {
                let (x, new_facing) = step_towards(center_x, player_x, boss::PATROL_SPEED);
                body.position.x = x - half_width;
                *facing = new_facing;
                ai.walking = true;
            }
        }

        if let Some((from, to)) = ai.tick(player_x) {
            debug!(from = ?from, to = ?to, "Boss phase transition");
        }

        if let BossPhase::Charging { target_x, .. } = ai.phase {
            let max = (bounds.end_x - half_width).max(half_width);
            let target = target_x.clamp(half_width, max);
            let (x, new_facing) = step_towards(center_x, target, boss::CHARGE_SPEED);
            body.position.x = x - half_width;
            *facing = new_facing;
        }
    }
}
