//! Immutable level descriptions.
//!
//! A [`Level`] is validated once, when it is built; [`crate::game::Game::new`] can then spawn it
//! without any further checks.

use std::ops::Range;

use crate::{
    constants::{collectible, level, player},
    error::LevelError,
    systems::components::EntityKind,
};

/// An enemy placed at level load. Enemies always stand on their kind's ground line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub kind: EntityKind,
    pub x: f32,
}

impl EnemySpawn {
    pub fn new(kind: EntityKind, x: f32) -> Self {
        Self { kind, x }
    }
}

/// One background image, repeated per segment.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    pub sprite: String,
    pub x: f32,
}

/// How many collectibles to scatter, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectibleLayout {
    pub bottles: u32,
    pub coins: u32,
    pub x_range: Range<f32>,
}

impl Default for CollectibleLayout {
    fn default() -> Self {
        Self {
            bottles: collectible::BOTTLE_COUNT,
            coins: collectible::COIN_COUNT,
            x_range: collectible::SCATTER_X,
        }
    }
}

impl CollectibleLayout {
    pub fn none() -> Self {
        Self {
            bottles: 0,
            coins: 0,
            x_range: collectible::SCATTER_X,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    enemies: Vec<EnemySpawn>,
    backgrounds: Vec<BackgroundLayer>,
    collectibles: CollectibleLayout,
    end_x: f32,
}

impl Level {
    pub fn new(
        enemies: Vec<EnemySpawn>,
        backgrounds: Vec<BackgroundLayer>,
        collectibles: CollectibleLayout,
        end_x: f32,
    ) -> Result<Self, LevelError> {
        if !end_x.is_finite() || end_x <= player::START.x {
            return Err(LevelError::InvalidEnd(end_x));
        }
        if enemies.is_empty() {
            return Err(LevelError::NoEnemies);
        }

        for (index, spawn) in enemies.iter().enumerate() {
            if !spawn.kind.is_enemy() {
                return Err(LevelError::NotAnEnemy {
                    index,
                    kind: spawn.kind.into(),
                });
            }
            if !spawn.x.is_finite() || spawn.x < 0.0 || spawn.x > end_x {
                return Err(LevelError::SpawnOutOfBounds {
                    index,
                    x: spawn.x,
                    end: end_x,
                });
            }
        }

        let bosses = enemies.iter().filter(|s| s.kind == EntityKind::Boss).count();
        if bosses > 1 {
            return Err(LevelError::TooManyBosses(bosses));
        }

        let range = &collectibles.x_range;
        let scatters = collectibles.bottles + collectibles.coins > 0;
        if scatters && !(range.start.is_finite() && range.end <= end_x && range.start >= 0.0 && range.start < range.end) {
            return Err(LevelError::InvalidScatterRange {
                start: range.start,
                end: range.end,
            });
        }

        Ok(Self {
            enemies,
            backgrounds,
            collectibles,
            end_x,
        })
    }

    /// The first (and only) stock level: chickens, small chickens and the boss at the far end.
    pub fn level_one() -> Result<Self, LevelError> {
        let enemies = vec![
            EnemySpawn::new(EntityKind::Chicken, 700.0),
            EnemySpawn::new(EntityKind::SmallChicken, 1000.0),
            EnemySpawn::new(EntityKind::Chicken, 1300.0),
            EnemySpawn::new(EntityKind::SmallChicken, 1600.0),
            EnemySpawn::new(EntityKind::Chicken, 1900.0),
            EnemySpawn::new(EntityKind::SmallChicken, 2400.0),
            EnemySpawn::new(EntityKind::Boss, 3500.0),
        ];

        Self::new(
            enemies,
            tiled_backgrounds(-1..6),
            CollectibleLayout::default(),
            level::LEVEL_END_X,
        )
    }

    pub fn enemies(&self) -> &[EnemySpawn] {
        &self.enemies
    }

    pub fn backgrounds(&self) -> &[BackgroundLayer] {
        &self.backgrounds
    }

    pub fn collectibles(&self) -> &CollectibleLayout {
        &self.collectibles
    }

    pub fn end_x(&self) -> f32 {
        self.end_x
    }

    pub fn has_boss(&self) -> bool {
        self.enemies.iter().any(|s| s.kind == EntityKind::Boss)
    }
}

/// Sky plus three parallax layers per segment, alternating between the two art variants.
pub fn tiled_backgrounds(segments: Range<i32>) -> Vec<BackgroundLayer> {
    const LAYERS: [&str; 4] = ["air", "third_layer", "second_layer", "first_layer"];

    segments
        .flat_map(|segment| {
            let variant = if segment.rem_euclid(2) == 0 { 1 } else { 2 };
            let x = segment as f32 * level::SEGMENT_WIDTH;
            LAYERS.iter().map(move |layer| BackgroundLayer {
                sprite: if *layer == "air" {
                    "background/air".to_string()
                } else {
                    format!("background/{layer}/{variant}")
                },
                x,
            })
        })
        .collect()
}
