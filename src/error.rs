//! Centralized error types for the simulation.
//!
//! Gameplay itself never fails: collisions, damage and transitions are plain state changes.
//! Errors only surface at the boundaries, when a level is loaded or when a system finds the
//! world in a shape it cannot work with.

use bevy_ecs::event::Event;

/// Main error type for the simulation.
///
/// Systems report recoverable problems by writing this as an event; the [`crate::game::Game`]
/// drains and logs them after every tick.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while validating a level description.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LevelError {
    #[error("Level has no enemies")]
    NoEnemies,

    #[error("Level end must lie beyond the player start, got {0}")]
    InvalidEnd(f32),

    #[error("Spawn #{index} is not an enemy: {kind}")]
    NotAnEnemy { index: usize, kind: &'static str },

    #[error("Spawn #{index} at x={x} is outside the level (0..={end})")]
    SpawnOutOfBounds { index: usize, x: f32, end: f32 },

    #[error("Level may contain at most one boss, found {0}")]
    TooManyBosses(usize),

    #[error("Collectible range {start}..{end} is not inside the level")]
    InvalidScatterRange { start: f32, end: f32 },
}

/// Errors related to entity lookups inside the world.
#[derive(thiserror::Error, Debug)]
pub enum EntityError {
    #[error("Player entity is missing")]
    PlayerMissing,
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
