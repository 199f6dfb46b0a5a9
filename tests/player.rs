use bevy_ecs::{event::Events, system::RunSystemOnce};
use pollo::{
    constants::{enemy, player},
    error::GameError,
    systems::{
        components::{Body, Camera, EntityKind, Facing},
        enemy::{enemy_hop_system, enemy_patrol_system, Hop, Patrol},
        health::Health,
        input::InputFlags,
        physics::{DeathFall, Physics},
        player::{camera_system, player_alive, player_control_system, player_death_system},
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

#[test]
fn test_walk_right_and_left() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 500.0);

    common::set_input(&mut world, InputFlags::RIGHT);
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");
    assert_eq!(world.get::<Body>(player).unwrap().position.x, 500.0 + player::WALK_SPEED);
    assert_eq!(*world.get::<Facing>(player).unwrap(), Facing::Right);

    common::set_input(&mut world, InputFlags::LEFT);
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");
    assert_eq!(world.get::<Body>(player).unwrap().position.x, 500.0);
    assert_eq!(*world.get::<Facing>(player).unwrap(), Facing::Left);
}

#[test]
fn test_cannot_walk_past_level_start() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, player::START.x);

    common::set_input(&mut world, InputFlags::LEFT);
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<Body>(player).unwrap().position.x, player::START.x);
}

#[test]
fn test_knockback_suspends_walking() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 500.0);
    world.get_mut::<Physics>(player).unwrap().knock(-10.0);

    common::set_input(&mut world, InputFlags::RIGHT);
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<Body>(player).unwrap().position.x, 500.0);
}

#[test]
fn test_jump_only_from_ground() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 500.0);

    common::set_input(&mut world, InputFlags::JUMP);
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");
    assert_eq!(world.get::<Physics>(player).unwrap().speed_y, player::JUMP_SPEED);

    // In the air, a second press does nothing
    world.get_mut::<Body>(player).unwrap().position.y = 50.0;
    world.get_mut::<Physics>(player).unwrap().speed_y = -1.0;
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");
    assert_eq!(world.get::<Physics>(player).unwrap().speed_y, -1.0);
}

#[test]
fn test_missing_player_reports_error() {
    let mut world = common::create_test_world();

    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");
    world.run_system_once(camera_system).expect("System should run successfully");

    let errors: Vec<GameError> = world.resource_mut::<Events<GameError>>().drain().collect();
    assert_that(&errors).has_length(2);
}

#[test]
fn test_camera_follows_player() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, 900.0);

    world.run_system_once(camera_system).expect("System should run successfully");

    assert_eq!(world.resource::<Camera>().x, -900.0 + player::CAMERA_LEAD);
}

#[test]
fn test_dead_player_starts_falling() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 500.0);
    let alive = world.run_system_once(player_alive).expect("System should run successfully");
    assert_that(&alive).is_true();

    world.get_mut::<Health>(player).unwrap().hit(100, 1);
    world
        .run_system_once(player_death_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<DeathFall>(player).copied(), Some(DeathFall::player()));
    let alive = world.run_system_once(player_alive).expect("System should run successfully");
    assert_that(&alive).is_false();
}

#[test]
fn test_enemies_patrol_left() {
    let mut world = common::create_test_world();
    let chicken = common::spawn_test_enemy(&mut world, EntityKind::Chicken, 600.0);
    world.get_mut::<Patrol>(chicken).unwrap().speed = 0.5;

    world
        .run_system_once(enemy_patrol_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<Body>(chicken).unwrap().position.x, 599.5);
    assert_eq!(*world.get::<Facing>(chicken).unwrap(), Facing::Left);
}

#[test]
fn test_small_chickens_hop() {
    let mut world = common::create_test_world();
    let chick = common::spawn_test_enemy(&mut world, EntityKind::SmallChicken, 600.0);
    world.entity_mut(chick).insert(Hop { remaining_ticks: 2 });

    world.run_system_once(enemy_hop_system).expect("System should run successfully");
    assert_eq!(world.get::<Physics>(chick).unwrap().speed_y, 0.0);

    world.run_system_once(enemy_hop_system).expect("System should run successfully");
    assert_eq!(world.get::<Physics>(chick).unwrap().speed_y, enemy::SMALL_CHICKEN_HOP_SPEED);
    assert_eq!(world.get::<Hop>(chick).unwrap().remaining_ticks, enemy::SMALL_CHICKEN_HOP_TICKS);
}
