use bevy_ecs::{entity::Entity, system::RunSystemOnce};
use glam::Vec2;
use pollo::{
    constants::{combat, inventory, player},
    events::CombatEvent,
    systems::{
        audio::AudioEvent,
        boss::BossAi,
        collision::{combat_resolution_system, pickup_system, player_enemy_collision_system, projectile_collision_system},
        components::{Body, ContactCooldowns, EntityKind, Facing, ProjectileBundle},
        health::Health,
        item::Inventory,
        lifetime::Remove,
        physics::{DeathFall, Physics},
        projectile::Projectile,
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

/// Places the player so that its feet are just above the enemy's hitbox top, falling.
fn drop_onto(world: &mut bevy_ecs::world::World, player: Entity, enemy: Entity) {
    let enemy_body = *world.get::<Body>(enemy).unwrap();
    let top = enemy_body.position.y + enemy_body.offset.top;
    let center = enemy_body.center().x;

    let mut body = world.get_mut::<Body>(player).unwrap();
    let size = body.size;
    let offset = body.offset;
    body.position = Vec2::new(
        center - (offset.left + (size.x - offset.left - offset.right) / 2.0),
        top + 5.0 - (size.y - offset.bottom),
    );
    world.get_mut::<Physics>(player).unwrap().speed_y = -4.0;
}

#[test]
fn test_side_contact_detected() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 100.0);
    let chicken = common::spawn_test_enemy(&mut world, EntityKind::Chicken, 150.0);

    world
        .run_system_once(player_enemy_collision_system)
        .expect("System should run successfully");

    let events = common::combat_events(&mut world);
    assert_eq!(
        events,
        vec![CombatEvent::Contact {
            player,
            enemy: chicken,
            damage: combat::ENEMY_CONTACT_DAMAGE,
            knockback: -combat::ENEMY_KNOCKBACK,
        }]
    );
}

#[test]
fn test_boss_contact_hits_harder() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, 100.0);
    common::spawn_test_enemy(&mut world, EntityKind::Boss, 60.0);

    world
        .run_system_once(player_enemy_collision_system)
        .expect("System should run successfully");

    let events = common::combat_events(&mut world);
    assert_that(&events).has_length(1);
    match events[0] {
        CombatEvent::Contact { damage, knockback, .. } => {
            assert_eq!(damage, combat::BOSS_CONTACT_DAMAGE);
            assert_eq!(knockback, combat::BOSS_KNOCKBACK);
        }
        other => panic!("Expected a contact, got {other:?}"),
    }
}

#[test]
fn test_stomp_detected() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 100.0);
    let chicken = common::spawn_test_enemy(&mut world, EntityKind::Chicken, 600.0);
    drop_onto(&mut world, player, chicken);

    world
        .run_system_once(player_enemy_collision_system)
        .expect("System should run successfully");

    assert_eq!(
        common::combat_events(&mut world),
        vec![CombatEvent::Stomp { player, enemy: chicken }]
    );
}

#[test]
fn test_contact_cooldown_suppresses_repeat() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 100.0);
    let chicken = common::spawn_test_enemy(&mut world, EntityKind::Chicken, 150.0);
    world.get_mut::<ContactCooldowns>(chicken).unwrap().record(player, 1);

    common::set_tick(&mut world, 10);
    world
        .run_system_once(player_enemy_collision_system)
        .expect("System should run successfully");
    assert_that(&common::combat_events(&mut world)).is_empty();

    common::set_tick(&mut world, 1 + combat::CONTACT_COOLDOWN_TICKS as u64);
    world
        .run_system_once(player_enemy_collision_system)
        .expect("System should run successfully");
    assert_that(&common::combat_events(&mut world)).has_length(1);
}

#[test]
fn test_dead_enemies_are_harmless() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, 100.0);
    let chicken = common::spawn_test_enemy(&mut world, EntityKind::Chicken, 150.0);
    world.get_mut::<Health>(chicken).unwrap().hit(100, 1);

    world
        .run_system_once(player_enemy_collision_system)
        .expect("System should run successfully");

    assert_that(&common::combat_events(&mut world)).is_empty();
}

#[test]
fn test_contact_damages_and_knocks_back_player() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 100.0);
    let chicken = common::spawn_test_enemy(&mut world, EntityKind::Chicken, 150.0);
    common::send_combat_event(
        &mut world,
        CombatEvent::Contact {
            player,
            enemy: chicken,
            damage: 20,
            knockback: -10.0,
        },
    );

    world
        .run_system_once(combat_resolution_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<Health>(player).unwrap().energy(), 80);
    let physics = world.get::<Physics>(player).unwrap();
    assert_eq!(physics.speed_x, -10.0);
    assert_that(&physics.knocked_back).is_true();
    assert_that(&world.get::<ContactCooldowns>(chicken).unwrap().ready(player, 2)).is_false();
    assert_eq!(common::audio_events(&mut world), vec![AudioEvent::PlayerHurt]);
}

#[test]
fn test_stomp_kills_chicken_and_bounces() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 100.0);
    let chicken = common::spawn_test_enemy(&mut world, EntityKind::Chicken, 600.0);
    common::send_combat_event(&mut world, CombatEvent::Stomp { player, enemy: chicken });

    world
        .run_system_once(combat_resolution_system)
        .expect("System should run successfully");

    assert_that(&world.get::<Health>(chicken).unwrap().is_dead()).is_true();
    assert_that(&world.get::<DeathFall>(chicken).is_some()).is_true();
    assert_eq!(world.get::<Physics>(player).unwrap().speed_y, player::STOMP_BOUNCE);
    assert_eq!(world.get::<Health>(player).unwrap().energy(), 100);
    assert_that(&common::audio_events(&mut world).contains(&AudioEvent::EnemyDied)).is_true();
}

#[test]
fn test_stomp_on_boss_counts_as_hit() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 100.0);
    let boss = common::spawn_test_enemy(&mut world, EntityKind::Boss, 600.0);
    common::send_combat_event(&mut world, CombatEvent::Stomp { player, enemy: boss });

    world
        .run_system_once(combat_resolution_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<Health>(boss).unwrap().energy(), 100 - combat::BOSS_HIT_DAMAGE);
    assert_eq!(world.get::<BossAi>(boss).unwrap().hits_taken, 1);
    assert_that(&world.get::<DeathFall>(boss).is_none()).is_true();
    assert_eq!(common::audio_events(&mut world), vec![AudioEvent::BossHit]);
}

#[test]
fn test_bottle_hits_first_enemy_only() {
    let mut world = common::create_test_world();
    common::spawn_test_enemy(&mut world, EntityKind::Chicken, 600.0);
    common::spawn_test_enemy(&mut world, EntityKind::Chicken, 610.0);
    let bottle = world
        .spawn(ProjectileBundle::new(Vec2::new(600.0, 360.0), Facing::Right))
        .id();

    world
        .run_system_once(projectile_collision_system)
        .expect("System should run successfully");

    let events = common::combat_events(&mut world);
    assert_that(&events).has_length(1);
    assert!(matches!(events[0], CombatEvent::ProjectileHit { projectile, damage, .. } if projectile == bottle && damage == combat::LETHAL_DAMAGE));
}

#[test]
fn test_bottle_damage_is_one_shot() {
    let mut world = common::create_test_world();
    let boss = common::spawn_test_enemy(&mut world, EntityKind::Boss, 600.0);
    let bottle = world
        .spawn(ProjectileBundle::new(Vec2::new(650.0, 300.0), Facing::Right))
        .id();

    for tick in [1, 200] {
        common::set_tick(&mut world, tick);
        common::send_combat_event(
            &mut world,
            CombatEvent::ProjectileHit {
                projectile: bottle,
                enemy: boss,
                damage: combat::BOSS_HIT_DAMAGE,
            },
        );
        world
            .run_system_once(combat_resolution_system)
            .expect("System should run successfully");
    }

    assert_eq!(world.get::<Health>(boss).unwrap().energy(), 80);
    let projectile = world.get::<Projectile>(bottle).unwrap();
    assert_that(&projectile.is_splashing()).is_true();
    assert_eq!(projectile.velocity, Vec2::ZERO);
}

#[test]
fn test_splashing_bottles_are_not_detected() {
    let mut world = common::create_test_world();
    common::spawn_test_enemy(&mut world, EntityKind::Chicken, 600.0);
    let bottle = world
        .spawn(ProjectileBundle::new(Vec2::new(600.0, 360.0), Facing::Right))
        .id();
    world.get_mut::<Projectile>(bottle).unwrap().begin_splash();

    world
        .run_system_once(projectile_collision_system)
        .expect("System should run successfully");

    assert_that(&common::combat_events(&mut world)).is_empty();
}

#[test]
fn test_pickup_collects_bottle_and_coin() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, 100.0);
    let bottle = common::spawn_test_item(&mut world, EntityKind::BottlePickup, Vec2::new(110.0, 350.0));
    let coin = common::spawn_test_item(&mut world, EntityKind::Coin, Vec2::new(100.0, 250.0));
    let far = common::spawn_test_item(&mut world, EntityKind::Coin, Vec2::new(1000.0, 250.0));

    world.run_system_once(pickup_system).expect("System should run successfully");
    world
        .run_system_once(combat_resolution_system)
        .expect("System should run successfully");

    assert_eq!(
        *world.resource::<Inventory>(),
        Inventory {
            bottles: inventory::BOTTLE_UNIT,
            coins: 1
        }
    );
    assert_that(&world.get::<Remove>(bottle).is_some()).is_true();
    assert_that(&world.get::<Remove>(coin).is_some()).is_true();
    assert_that(&world.get::<Remove>(far).is_none()).is_true();
}

#[test]
fn test_full_inventory_leaves_bottle() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, 100.0);
    let bottle = common::spawn_test_item(&mut world, EntityKind::BottlePickup, Vec2::new(110.0, 350.0));
    world.resource_mut::<Inventory>().bottles = inventory::BOTTLE_CAPACITY;
    common::send_combat_event(&mut world, CombatEvent::Pickup { player, item: bottle });

    world
        .run_system_once(combat_resolution_system)
        .expect("System should run successfully");

    assert_that(&world.get::<Remove>(bottle).is_none()).is_true();
    assert_that(&common::audio_events(&mut world)).is_empty();
}
