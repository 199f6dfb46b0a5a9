use bevy_ecs::prelude::*;

/// Out-of-band requests from the host, applied between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    ToggleDebug,
    MuteAudio,
    ResetLevel,
    TogglePause,
    /// Advance exactly one tick while paused.
    SingleTick,
}

/// A gameplay interaction found by the detection systems, applied later in the same tick
/// by [`crate::systems::collision::combat_resolution_system`].
///
/// Damage and knockback are decided at detection time, so resolution only has to apply them.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum CombatEvent {
    /// The player landed on top of an enemy.
    Stomp { player: Entity, enemy: Entity },
    /// The player ran into an enemy from the side. `knockback` is signed along x.
    Contact {
        player: Entity,
        enemy: Entity,
        damage: u32,
        knockback: f32,
    },
    /// A flying bottle reached an enemy.
    ProjectileHit { projectile: Entity, enemy: Entity, damage: u32 },
    /// The player touched a collectible.
    Pickup { player: Entity, item: Entity },
}
