#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::Vec2;
use pollo::{
    constants::player,
    error::GameError,
    events::CombatEvent,
    level::{BackgroundLayer, CollectibleLayout, EnemySpawn, Level},
    systems::{
        audio::{AudioEvent, AudioState},
        components::{
            BossBundle, Camera, EnemyBundle, EntityKind, GameRng, ItemBundle, LevelBounds, PlayerBundle, SimulationTick,
        },
        debug::DebugState,
        input::{InputFlags, InputState},
        item::Inventory,
        projectile::ThrowCooldown,
        render::{Backgrounds, RenderFrame},
        state::{BossTracker, GameOutcome, PauseState},
    },
};

pub const TEST_SEED: u64 = 0x5eed;

/// Creates a basic test world with every resource and event the systems expect
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(Events::<CombatEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(SimulationTick(1));
    world.insert_resource(InputState::default());
    world.insert_resource(GameRng::seeded(TEST_SEED));
    world.insert_resource(LevelBounds {
        start_x: player::START.x,
        end_x: 4000.0,
    });
    world.insert_resource(Camera::default());
    world.insert_resource(Inventory::default());
    world.insert_resource(ThrowCooldown::default());
    world.insert_resource(DebugState::default());
    world.insert_resource(AudioState::default());
    world.insert_resource(PauseState::default());
    world.insert_resource(GameOutcome::default());
    world.insert_resource(BossTracker::default());
    world.insert_resource(Backgrounds::default());
    world.insert_resource(RenderFrame::default());

    world
}

/// Spawns the player standing on the ground at `x`
pub fn spawn_test_player(world: &mut World, x: f32) -> Entity {
    world.spawn(PlayerBundle::new(Vec2::new(x, player::GROUND_LEVEL))).id()
}

/// Spawns a motionless enemy of `kind` at `x`
pub fn spawn_test_enemy(world: &mut World, kind: EntityKind, x: f32) -> Entity {
    match kind {
        EntityKind::Boss => world.spawn(BossBundle::new(x)).id(),
        _ => world.spawn(EnemyBundle::new(kind, x, 0.0)).id(),
    }
}

pub fn spawn_test_item(world: &mut World, kind: EntityKind, position: Vec2) -> Entity {
    world.spawn(ItemBundle::new(kind, position)).id()
}

pub fn send_combat_event(world: &mut World, event: CombatEvent) {
    let mut events = world.resource_mut::<Events<CombatEvent>>();
    events.send(event);
}

pub fn set_input(world: &mut World, flags: InputFlags) {
    world.resource_mut::<InputState>().update(flags);
}

pub fn set_tick(world: &mut World, tick: u64) {
    world.resource_mut::<SimulationTick>().0 = tick;
}

pub fn audio_events(world: &mut World) -> Vec<AudioEvent> {
    world.resource_mut::<Events<AudioEvent>>().drain().collect()
}

pub fn combat_events(world: &mut World) -> Vec<CombatEvent> {
    world.resource_mut::<Events<CombatEvent>>().drain().collect()
}

/// A level with the given enemies, no collectibles and a single background.
pub fn test_level(enemies: Vec<EnemySpawn>, end_x: f32) -> Level {
    let backgrounds = vec![BackgroundLayer {
        sprite: "background/air".to_string(),
        x: 0.0,
    }];
    Level::new(enemies, backgrounds, CollectibleLayout::none(), end_x).expect("test level should be valid")
}
