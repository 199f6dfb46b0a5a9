use pollo::{
    constants::level,
    error::LevelError,
    level::{tiled_backgrounds, CollectibleLayout, EnemySpawn, Level},
    systems::components::EntityKind,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn chicken_at(x: f32) -> Vec<EnemySpawn> {
    vec![EnemySpawn::new(EntityKind::Chicken, x)]
}

#[test]
fn test_level_one_is_valid() {
    let level = Level::level_one().expect("stock level should validate");

    assert_that(&level.has_boss()).is_true();
    assert_eq!(level.end_x(), level::LEVEL_END_X);
    assert_that(&level.enemies().iter().all(|s| s.kind.is_enemy())).is_true();
    assert_eq!(level.backgrounds().len(), 7 * 4);
}

#[test]
fn test_rejects_empty_level() {
    let result = Level::new(vec![], vec![], CollectibleLayout::none(), 1000.0);
    assert_eq!(result, Err(LevelError::NoEnemies));
}

#[test]
fn test_rejects_bad_end() {
    let result = Level::new(chicken_at(50.0), vec![], CollectibleLayout::none(), 50.0);
    assert_eq!(result, Err(LevelError::InvalidEnd(50.0)));

    let result = Level::new(chicken_at(50.0), vec![], CollectibleLayout::none(), f32::INFINITY);
    assert_that(&matches!(result, Err(LevelError::InvalidEnd(_)))).is_true();
}

#[test]
fn test_rejects_non_enemy_spawns() {
    let spawns = vec![
        EnemySpawn::new(EntityKind::Chicken, 500.0),
        EnemySpawn::new(EntityKind::Coin, 600.0),
    ];
    let result = Level::new(spawns, vec![], CollectibleLayout::none(), 1000.0);
    assert_eq!(result, Err(LevelError::NotAnEnemy { index: 1, kind: "coin" }));
}

#[test]
fn test_rejects_spawns_outside_level() {
    let result = Level::new(chicken_at(1500.0), vec![], CollectibleLayout::none(), 1000.0);
    assert_eq!(
        result,
        Err(LevelError::SpawnOutOfBounds {
            index: 0,
            x: 1500.0,
            end: 1000.0
        })
    );
}

#[test]
fn test_rejects_two_bosses() {
    let spawns = vec![
        EnemySpawn::new(EntityKind::Boss, 500.0),
        EnemySpawn::new(EntityKind::Boss, 900.0),
    ];
    let result = Level::new(spawns, vec![], CollectibleLayout::none(), 1000.0);
    assert_eq!(result, Err(LevelError::TooManyBosses(2)));
}

#[test]
fn test_rejects_scatter_beyond_end() {
    let layout = CollectibleLayout {
        bottles: 1,
        coins: 0,
        x_range: 400.0..5000.0,
    };
    let result = Level::new(chicken_at(500.0), vec![], layout, 1000.0);
    assert_eq!(
        result,
        Err(LevelError::InvalidScatterRange {
            start: 400.0,
            end: 5000.0
        })
    );
}

#[test]
fn test_empty_scatter_range_ignored_without_items() {
    let layout = CollectibleLayout {
        bottles: 0,
        coins: 0,
        x_range: 900.0..100.0,
    };
    assert_that(&Level::new(chicken_at(500.0), vec![], layout, 1000.0).is_ok()).is_true();
}

#[test]
fn test_tiled_backgrounds_alternate_variants() {
    let layers = tiled_backgrounds(0..2);

    assert_eq!(layers.len(), 8);
    assert_eq!(layers[0].sprite, "background/air");
    assert_eq!(layers[1].sprite, "background/third_layer/1");
    assert_eq!(layers[5].sprite, "background/third_layer/2");
    assert_eq!(layers[5].x, level::SEGMENT_WIDTH);
}

#[test]
fn test_negative_segments_tile_left() {
    let layers = tiled_backgrounds(-1..0);
    assert_eq!(layers[0].x, -level::SEGMENT_WIDTH);
    assert_eq!(layers[1].sprite, "background/third_layer/2");
}

#[test]
fn test_level_errors_lift_into_game_errors() {
    let error: pollo::error::GameError = LevelError::TooManyBosses(3).into();
    assert_eq!(error.to_string(), "Level error: Level may contain at most one boss, found 3");
}
