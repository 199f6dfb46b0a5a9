//! Animation state selection and frame stepping.
//!
//! Each tick every animated entity resolves a single [`AnimationState`] from its gameplay
//! state, by priority. A state change restarts the clip; the same state keeps running.

use bevy_ecs::{
    component::Component,
    query::Has,
    system::{Query, Res},
};
use strum_macros::{AsRefStr, EnumIter};
use tracing::trace;

use crate::{
    constants::{ms_to_ticks, player},
    systems::{
        boss::{BossAi, BossPhase},
        components::{Body, EntityKind, SimulationTick},
        enemy::Patrol,
        health::Health,
        physics::{DeathFall, Physics},
        player::PlayerActivity,
        projectile::Projectile,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum AnimationState {
    Default,
    Walk,
    Jump,
    Hurt,
    Dead,
    IdleShort,
    IdleLong,
    Alert,
    Charge,
    /// A bottle in flight.
    Spin,
    /// A bottle bursting on impact.
    Splash,
    /// Idle glow of coins.
    Pulse,
}

impl AnimationState {
    /// Terminal states can only be followed by themselves.
    pub fn is_terminal(self) -> bool {
        matches!(self, AnimationState::Dead | AnimationState::Splash)
    }

    fn is_projectile_state(self) -> bool {
        matches!(self, AnimationState::Spin | AnimationState::Splash)
    }

    pub fn can_transition_to(self, next: AnimationState) -> bool {
        if self.is_terminal() {
            return next == self;
        }
        match self {
            AnimationState::Spin => next.is_projectile_state(),
            _ => !next.is_projectile_state(),
        }
    }
}

/// Length and speed of one sprite sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub frames: u8,
    pub frame_ticks: u32,
    pub looping: bool,
}

impl Clip {
    pub const STILL: Clip = Clip::looping(1, 1);

    const fn looping(frames: u8, frame_ms: u32) -> Self {
        Self {
            frames,
            frame_ticks: ms_to_ticks(frame_ms),
            looping: true,
        }
    }

    const fn once(frames: u8, frame_ms: u32) -> Self {
        Self {
            frames,
            frame_ticks: ms_to_ticks(frame_ms),
            looping: false,
        }
    }
}

/// The sprite sequence for a kind in a state. Combinations without art fall back to a still frame.
pub fn clip(kind: EntityKind, state: AnimationState) -> Clip {
    use AnimationState as S;
    use EntityKind as K;

    match (kind, state) {
        (K::Player, S::Walk) => Clip::looping(6, 120),
        (K::Player, S::Jump) => Clip::once(9, 120),
        (K::Player, S::Hurt) => Clip::looping(3, 150),
        (K::Player, S::Dead) => Clip::once(7, 150),
        (K::Player, S::IdleShort) => Clip::looping(10, 200),
        (K::Player, S::IdleLong) => Clip::looping(10, 250),

        (K::Chicken, S::Walk) => Clip::looping(3, 100),
        (K::SmallChicken, S::Walk) => Clip::looping(3, 150),

        (K::Boss, S::Walk) => Clip::looping(4, 200),
        (K::Boss, S::Alert) => Clip::looping(8, 150),
        (K::Boss, S::Charge) => Clip::looping(8, 100),
        (K::Boss, S::Hurt) => Clip::looping(3, 200),
        (K::Boss, S::Dead) => Clip::once(3, 200),

        (K::Bottle, S::Spin) => Clip::looping(4, 100),
        (K::Bottle, S::Splash) => Clip::once(6, 100),

        (K::Coin, S::Pulse) => Clip::looping(2, 500),

        _ => Clip::STILL,
    }
}

/// Current clip position of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub state: AnimationState,
    pub frame: u8,
    pub elapsed_ticks: u32,
}

impl Animation {
    pub fn new(state: AnimationState) -> Self {
        Self {
            state,
            frame: 0,
            elapsed_ticks: 0,
        }
    }

    /// Switch to `next`, restarting the clip. Returns false if nothing changed or the
    /// transition is not allowed.
    pub fn transition(&mut self, next: AnimationState) -> bool {
        if next == self.state || !self.state.can_transition_to(next) {
            return false;
        }
        *self = Animation::new(next);
        true
    }

    pub fn advance(&mut self, clip: Clip) {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks < clip.frame_ticks {
            return;
        }
        self.elapsed_ticks = 0;

        let next = self.frame.saturating_add(1);
        self.frame = if next < clip.frames {
            next
        } else if clip.looping {
            0
        } else {
            clip.frames.saturating_sub(1)
        };
    }

    pub fn sprite_key(&self, kind: EntityKind) -> String {
        format!("{}/{}", kind.as_ref(), self.state.as_ref())
    }
}

/// The gameplay facts an animation is chosen from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationContext {
    pub dead: bool,
    pub hurt: bool,
    pub airborne: bool,
    pub alerting: bool,
    pub charging: bool,
    pub moving: bool,
    /// Ticks since the last player action, for entities that idle.
    pub idle_ticks: Option<u64>,
}

/// Resolve the highest priority state for the given context.
pub fn select_state(ctx: &AnimationContext) -> AnimationState {
    if ctx.dead {
        AnimationState::Dead
    } else if ctx.hurt {
        AnimationState::Hurt
    } else if ctx.airborne {
        AnimationState::Jump
    } else if ctx.alerting {
        AnimationState::Alert
    } else if ctx.charging {
        AnimationState::Charge
    } else if ctx.moving {
        AnimationState::Walk
    } else {
        match ctx.idle_ticks {
            Some(idle) if idle >= player::IDLE_LONG_TICKS as u64 => AnimationState::IdleLong,
            Some(idle) if idle >= player::IDLE_SHORT_TICKS as u64 => AnimationState::IdleShort,
            _ => AnimationState::Default,
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn animation_state_system(
    tick: Res<SimulationTick>,
    mut query: Query<(
        &EntityKind,
        &mut Animation,
        Option<&Body>,
        Option<&Health>,
        Option<&Physics>,
        Option<&PlayerActivity>,
        Option<&Patrol>,
        Option<&BossAi>,
        Option<&Projectile>,
        Has<DeathFall>,
    )>,
) {
    let now = tick.now();

    for (kind, mut animation, body, health, physics, activity, patrol, boss, projectile, falling) in query.iter_mut() {
        let next = match kind {
            EntityKind::Bottle => match projectile {
                Some(p) if p.is_splashing() => AnimationState::Splash,
                _ => AnimationState::Spin,
            },
            EntityKind::Coin => AnimationState::Pulse,
            EntityKind::BottlePickup | EntityKind::DroppedBottle => AnimationState::Default,
            EntityKind::Player | EntityKind::Chicken | EntityKind::SmallChicken | EntityKind::Boss => {
                let dead = falling || health.is_some_and(|h| h.is_dead());
                let airborne = *kind == EntityKind::Player
                    && match (physics, body) {
                        (Some(physics), Some(body)) => physics.is_above_ground(body.position.y) || physics.speed_y > 0.0,
                        _ => false,
                    };
                let phase = boss.map(|ai| ai.phase);

                let ctx = AnimationContext {
                    dead,
                    hurt: health.is_some_and(|h| h.is_hurt(now)),
                    airborne,
                    alerting: matches!(phase, Some(BossPhase::Alerting { .. })),
                    charging: matches!(phase, Some(BossPhase::Charging { .. })),
                    moving: activity.map(|a| a.moving).unwrap_or(false)
                        || patrol.is_some_and(|p| p.speed > 0.0)
                        || boss.is_some_and(|ai| ai.walking),
                    idle_ticks: activity.map(|a| now.saturating_sub(a.last_action_tick)),
                };
                select_state(&ctx)
            }
        };

        if animation.transition(next) {
            trace!(kind = kind.as_ref(), state = next.as_ref(), "Animation changed");
        }
    }
}

/// Steps the frame of every animation by one tick.
pub fn animation_advance_system(mut query: Query<(&EntityKind, &mut Animation)>) {
    for (kind, mut animation) in query.iter_mut() {
        let clip = clip(*kind, animation.state);
        animation.advance(clip);
    }
}
