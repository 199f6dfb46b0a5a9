//! This module contains all the tunable constants used by the simulation.
//!
//! Every duration is authored in milliseconds and converted to simulation ticks at compile time,
//! so that all gameplay timers advance on the single fixed tick.

use std::time::Duration;

/// The fixed simulation rate.
pub const TICKS_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// Converts a duration in milliseconds to a whole number of simulation ticks, rounding up.
pub const fn ms_to_ticks(ms: u32) -> u32 {
    (ms * TICKS_PER_SECOND).div_ceil(1000)
}

/// Per-side inset of a hitbox relative to the sprite bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitboxOffset {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl HitboxOffset {
    pub const NONE: HitboxOffset = HitboxOffset::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self { top, bottom, left, right }
    }
}

pub mod physics {
    /// Downward acceleration applied to `speed_y` every tick.
    pub const GRAVITY: f32 = 0.5;
    /// Multiplier applied to horizontal (knockback) speed every tick.
    pub const HORIZONTAL_FRICTION: f32 = 0.8;
    /// Horizontal speeds below this magnitude snap to zero.
    pub const KNOCKBACK_REST_THRESHOLD: f32 = 0.1;
    /// Anything falling below this line has left the world.
    pub const LOWER_WORLD_BOUND: f32 = 600.0;
}

pub mod player {
    use super::{ms_to_ticks, HitboxOffset};
    use glam::Vec2;

    pub const SIZE: Vec2 = Vec2::new(100.0, 300.0);
    pub const START: Vec2 = Vec2::new(100.0, 40.0);
    pub const HITBOX: HitboxOffset = HitboxOffset::new(120.0, 15.0, 20.0, 30.0);
    pub const GROUND_LEVEL: f32 = 120.0;
    /// Horizontal walking distance per tick.
    pub const WALK_SPEED: f32 = 4.0;
    pub const JUMP_SPEED: f32 = 10.0;
    /// Upward speed given to the player after stomping an enemy.
    pub const STOMP_BOUNCE: f32 = 5.0;
    pub const HURT_TICKS: u32 = ms_to_ticks(500);
    pub const IDLE_SHORT_TICKS: u32 = ms_to_ticks(500);
    pub const IDLE_LONG_TICKS: u32 = ms_to_ticks(1000);
    /// The death fall starts with a small hop before dropping out of the world.
    pub const DEATH_FALL_INITIAL_SPEED: f32 = -6.0;
    pub const DEATH_FALL_GRAVITY: f32 = 0.3;
    /// Horizontal distance between the left screen edge and the player.
    pub const CAMERA_LEAD: f32 = 100.0;
}

pub mod enemy {
    use super::{ms_to_ticks, HitboxOffset};
    use glam::Vec2;
    use std::ops::Range;

    pub const CHICKEN_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const CHICKEN_HITBOX: HitboxOffset = HitboxOffset::new(5.0, 0.0, 5.0, 5.0);
    pub const CHICKEN_GROUND_LEVEL: f32 = 360.0;
    pub const CHICKEN_SPEED: Range<f32> = 0.3..0.8;

    pub const SMALL_CHICKEN_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    pub const SMALL_CHICKEN_HITBOX: HitboxOffset = HitboxOffset::new(10.0, 5.0, 10.0, 10.0);
    pub const SMALL_CHICKEN_GROUND_LEVEL: f32 = 370.0;
    pub const SMALL_CHICKEN_SPEED: Range<f32> = 0.4..0.9;
    pub const SMALL_CHICKEN_HOP_TICKS: u32 = ms_to_ticks(1500);
    pub const SMALL_CHICKEN_HOP_SPEED: f32 = 6.0;

    /// Initial (upward) speed of the death fall shared by all enemies.
    pub const DEATH_FALL_INITIAL_SPEED: f32 = -8.0;
    pub const DEATH_FALL_GRAVITY: f32 = 0.5;
    /// Chance that a dying non-boss enemy leaves a bottle behind.
    pub const BOTTLE_DROP_CHANCE: f64 = 0.2;
}

pub mod boss {
    use super::{ms_to_ticks, HitboxOffset};
    use glam::Vec2;

    pub const SIZE: Vec2 = Vec2::new(150.0, 150.0);
    pub const HITBOX: HitboxOffset = HitboxOffset::new(30.0, 10.0, 20.0, 20.0);
    pub const GROUND_LEVEL: f32 = 270.0;
    /// Window after a hit in which the boss shows its hurt animation and ignores further damage.
    pub const INVULNERABLE_TICKS: u32 = ms_to_ticks(1000);

    pub const ALERT_TICKS: u32 = ms_to_ticks(1500);
    pub const CHARGE_TICKS: u32 = ms_to_ticks(2000);
    /// The boss only reacts to a player closer than this.
    pub const DETECTION_RANGE: f32 = 800.0;
    pub const PATROL_SPEED: f32 = 1.0;
    pub const CHARGE_SPEED: f32 = 6.0;

    /// Per-tick chance of starting a wind-up, before any hits were taken.
    pub const TRIGGER_BASE: f64 = 0.004;
    /// Added to the wind-up chance for every hit taken.
    pub const TRIGGER_PER_HIT: f64 = 0.004;
    /// At or below this energy the boss is enraged and uses the flat chance below.
    pub const ENRAGED_ENERGY: u32 = 20;
    pub const ENRAGED_TRIGGER: f64 = 0.03;

    /// Offset of the status bar relative to the boss position.
    pub const STATUS_BAR_OFFSET: Vec2 = Vec2::new(-12.0, -80.0);
}

pub mod combat {
    pub const MAX_ENERGY: u32 = 100;
    pub const ENEMY_CONTACT_DAMAGE: u32 = 20;
    pub const BOSS_CONTACT_DAMAGE: u32 = 30;
    pub const ENEMY_KNOCKBACK: f32 = 10.0;
    pub const BOSS_KNOCKBACK: f32 = 15.0;
    /// Minimum spacing between two contacts of the same player and enemy.
    pub const CONTACT_COOLDOWN_TICKS: u32 = super::ms_to_ticks(500);
    /// Vertical slack above an enemy's top within which a falling player counts as stomping.
    pub const STOMP_TOLERANCE: f32 = 20.0;
    /// Fraction of the enemy width added on each side when checking the stomp footprint.
    pub const STOMP_WIDTH_MARGIN: f32 = 0.15;
    /// Damage a bottle (or a stomp) deals to the boss.
    pub const BOSS_HIT_DAMAGE: u32 = 20;
    /// Damage a bottle deals to any other enemy.
    pub const LETHAL_DAMAGE: u32 = MAX_ENERGY;
}

pub mod projectile {
    use super::ms_to_ticks;
    use glam::Vec2;

    pub const SIZE: Vec2 = Vec2::new(40.0, 40.0);
    /// Spawn position relative to the player's top-left corner.
    pub const SPAWN_OFFSET: Vec2 = Vec2::new(50.0, 150.0);
    pub const THROW_SPEED: f32 = 10.0;
    /// The bottle flies flat for this distance before gravity takes over.
    pub const STRAIGHT_DISTANCE: f32 = 200.0;
    pub const GRAVITY: f32 = 0.5;
    pub const GROUND_LEVEL: f32 = 380.0;
    pub const THROW_COOLDOWN_TICKS: u32 = ms_to_ticks(500);

    pub const SPLASH_FRAMES: u8 = 6;
    pub const SPLASH_FRAME_TICKS: u32 = ms_to_ticks(100);
    pub const FADE_STEP: f32 = 0.05;
    /// Bottles this far outside the level are discarded.
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 720.0;
}

pub mod inventory {
    /// Percentage of the bottle bar one bottle is worth.
    pub const BOTTLE_UNIT: u32 = 20;
    pub const BOTTLE_CAPACITY: u32 = 100;
    /// Coins needed to fill the coin bar.
    pub const COINS_PER_BAR: u32 = 15;
}

pub mod collectible {
    use super::HitboxOffset;
    use glam::Vec2;
    use std::ops::Range;

    pub const BOTTLE_SIZE: Vec2 = Vec2::new(60.0, 60.0);
    pub const BOTTLE_HITBOX: HitboxOffset = HitboxOffset::new(10.0, 5.0, 15.0, 15.0);
    pub const BOTTLE_Y: f32 = 370.0;

    pub const DROPPED_BOTTLE_SIZE: Vec2 = Vec2::new(40.0, 50.0);
    pub const DROPPED_BOTTLE_HITBOX: HitboxOffset = HitboxOffset::new(10.0, 5.0, 5.0, 5.0);

    pub const COIN_SIZE: Vec2 = Vec2::new(100.0, 100.0);
    pub const COIN_HITBOX: HitboxOffset = HitboxOffset::new(35.0, 35.0, 35.0, 35.0);
    pub const COIN_Y: Range<f32> = 200.0..350.0;

    pub const SCATTER_X: Range<f32> = 400.0..3600.0;
    pub const BOTTLE_COUNT: u32 = 8;
    pub const COIN_COUNT: u32 = 15;
}

pub mod level {
    /// Width of one background segment; the background repeats every segment.
    pub const SEGMENT_WIDTH: f32 = 720.0;
    pub const LEVEL_END_X: f32 = 4000.0;
}
