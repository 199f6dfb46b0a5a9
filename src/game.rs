//! This module contains the simulation session: the world, its schedule, and the fixed tick.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::Vec2;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::constants::{enemy, player};
use crate::error::{GameError, GameResult};
use crate::events::{CombatEvent, GameCommand};
use crate::formatter;
use crate::level::Level;
use crate::systems::{
    self,
    audio::{AudioEvent, AudioState},
    components::{
        BossBundle, Camera, EnemyBundle, EntityKind, GameRng, LevelBounds, PlayerBundle, SimulationTick, SmallChickenBundle,
    },
    debug::DebugState,
    enemy::Hop,
    input::{InputFlags, InputState},
    item::{scatter_collectibles, Inventory},
    player::player_alive,
    projectile::ThrowCooldown,
    render::{Backgrounds, RenderFrame},
    state::{BossTracker, GameOutcome, PauseState},
};

/// The phases of a single tick, run in declaration order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SimulationSet {
    Input,
    /// Collision and input detection, producing [`CombatEvent`]s and projectiles.
    Detect,
    Resolve,
    /// Locomotion, AI and physics of the living.
    Update,
    /// Deaths and splashes, which keep playing after the player died.
    Aftermath,
    Animate,
    Cleanup,
    Snapshot,
}

/// A running level.
///
/// Owns every entity and timer; dropping it stops everything. The host drives it with
/// [`Game::tick`], then reads [`Game::frame`] and drains [`Game::drain_audio`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    level: Level,
    seed: u64,
}

impl Game {
    /// Builds the world for `level`. All randomness derives from `seed`.
    pub fn new(level: Level, seed: u64) -> GameResult<Game> {
        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, &level, seed);
        Self::configure_schedule(&mut schedule);
        Self::spawn_level(&mut world, &level);

        info!(
            seed,
            enemies = level.enemies().len(),
            end_x = level.end_x(),
            boss = level.has_boss(),
            "Level loaded"
        );

        Ok(Game {
            world,
            schedule,
            level,
            seed,
        })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<CombatEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
    }

    fn insert_resources(world: &mut World, level: &Level, seed: u64) {
        world.insert_resource(SimulationTick::default());
        world.insert_resource(InputState::default());
        world.insert_resource(GameRng::seeded(seed));
        world.insert_resource(LevelBounds {
            start_x: player::START.x,
            end_x: level.end_x(),
        });
        world.insert_resource(Camera::default());
        world.insert_resource(Inventory::default());
        world.insert_resource(ThrowCooldown::default());
        world.insert_resource(DebugState::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(GameOutcome::default());
        world.insert_resource(BossTracker {
            spawned: level.has_boss(),
        });
        world.insert_resource(Backgrounds(level.backgrounds().to_vec()));
        world.insert_resource(RenderFrame::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        use systems::{
            animation::{animation_advance_system, animation_state_system},
            boss::boss_ai_system,
            collision::{combat_resolution_system, pickup_system, player_enemy_collision_system, projectile_collision_system},
            debug::debug_toggle_system,
            enemy::{enemy_hop_system, enemy_patrol_system},
            lifetime::removal_system,
            physics::{death_fall_system, physics_system},
            player::{camera_system, player_control_system, player_death_system},
            projectile::{projectile_flight_system, splash_system, throw_system},
            render::render_snapshot_system,
            state::outcome_system,
        };

        schedule
            .add_systems((
                debug_toggle_system.in_set(SimulationSet::Input),
                (
                    player_enemy_collision_system,
                    throw_system,
                    pickup_system,
                    projectile_collision_system,
                )
                    .chain()
                    .in_set(SimulationSet::Detect),
                combat_resolution_system.in_set(SimulationSet::Resolve),
                (
                    player_control_system,
                    enemy_patrol_system,
                    enemy_hop_system,
                    boss_ai_system,
                    physics_system,
                    projectile_flight_system,
                )
                    .chain()
                    .in_set(SimulationSet::Update),
                (player_death_system, death_fall_system, splash_system)
                    .chain()
                    .in_set(SimulationSet::Aftermath),
                (animation_state_system, animation_advance_system, camera_system)
                    .chain()
                    .in_set(SimulationSet::Animate),
                (removal_system, outcome_system).chain().in_set(SimulationSet::Cleanup),
                render_snapshot_system.in_set(SimulationSet::Snapshot),
            ))
            .configure_sets(
                (
                    SimulationSet::Input,
                    SimulationSet::Detect.run_if(player_alive),
                    SimulationSet::Resolve.run_if(player_alive),
                    SimulationSet::Update.run_if(player_alive),
                    SimulationSet::Aftermath,
                    SimulationSet::Animate,
                    SimulationSet::Cleanup,
                    SimulationSet::Snapshot,
                )
                    .chain(),
            );
    }

    fn spawn_level(world: &mut World, level: &Level) {
        world.spawn(PlayerBundle::new(player::START));

        let mut enemies = Vec::with_capacity(level.enemies().len());
        {
            let mut rng = world.resource_mut::<GameRng>();
            for spawn in level.enemies() {
                let speed = match spawn.kind {
                    EntityKind::Chicken => rng.0.random_range(enemy::CHICKEN_SPEED),
                    EntityKind::SmallChicken => rng.0.random_range(enemy::SMALL_CHICKEN_SPEED),
                    _ => 0.0,
                };
                enemies.push((spawn.kind, spawn.x, speed));
            }
        }

        for (kind, x, speed) in enemies {
            let entity = match kind {
                EntityKind::Boss => world.spawn(BossBundle::new(x)).id(),
                EntityKind::SmallChicken => world
                    .spawn(SmallChickenBundle {
                        enemy: EnemyBundle::new(kind, x, speed),
                        hop: Hop::default(),
                    })
                    .id(),
                _ => world.spawn(EnemyBundle::new(kind, x, speed)).id(),
            };
            debug!(entity = ?entity, kind = kind.as_ref(), x, speed, "Spawned enemy");
        }

        let items = {
            let mut rng = world.resource_mut::<GameRng>();
            scatter_collectibles(&mut rng, level.collectibles())
        };
        world.spawn_batch(items);
    }

    /// Advance the simulation by one fixed tick with the given input.
    ///
    /// Does nothing once the session is over, or while paused (unless a single step was requested).
    pub fn tick(&mut self, input: InputFlags) -> GameOutcome {
        let outcome = self.outcome();
        if outcome.is_over() || !self.world.resource_mut::<PauseState>().tick() {
            return outcome;
        }

        self.world.resource_mut::<SimulationTick>().0 += 1;
        formatter::increment_tick();
        self.world.resource_mut::<InputState>().update(input);

        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<CombatEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
        for error in self.world.resource_mut::<Events<GameError>>().drain() {
            warn!(error = %error, "System reported an error");
        }

        self.outcome()
    }

    pub fn outcome(&self) -> GameOutcome {
        *self.world.resource::<GameOutcome>()
    }

    /// The snapshot captured at the end of the last tick.
    pub fn frame(&self) -> &RenderFrame {
        self.world.resource::<RenderFrame>()
    }

    /// Takes the audio cues of the last tick. Muted sessions discard them.
    pub fn drain_audio(&mut self) -> Vec<AudioEvent> {
        let muted = self.world.resource::<AudioState>().muted;
        let events = self.world.resource_mut::<Events<AudioEvent>>().drain().collect::<Vec<_>>();
        if muted {
            Vec::new()
        } else {
            events
        }
    }

    pub fn handle_command(&mut self, command: GameCommand) -> GameResult<()> {
        match command {
            GameCommand::TogglePause => self.world.resource_mut::<PauseState>().toggle(),
            GameCommand::SingleTick => self.world.resource_mut::<PauseState>().single_step(),
            GameCommand::ToggleDebug => {
                let mut debug = self.world.resource_mut::<DebugState>();
                *debug = debug.next();
            }
            GameCommand::MuteAudio => {
                let mut audio = self.world.resource_mut::<AudioState>();
                audio.muted = !audio.muted;
                info!("Audio {}", if audio.muted { "muted" } else { "unmuted" });
            }
            GameCommand::ResetLevel => self.reset()?,
        }
        Ok(())
    }

    /// Freeze or resume the simulation. Returns whether it is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        let mut pause = self.world.resource_mut::<PauseState>();
        pause.toggle();
        pause.active()
    }

    /// Restart the level from scratch with the same seed. Mute and debug settings carry over.
    pub fn reset(&mut self) -> GameResult<()> {
        let audio = self.world.resource::<AudioState>().clone();
        let debug = *self.world.resource::<DebugState>();

        *self = Game::new(self.level.clone(), self.seed)?;
        self.world.insert_resource(audio);
        self.world.insert_resource(debug);
        formatter::reset_tick();

        info!("Level reset");
        Ok(())
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tick_count(&self) -> u64 {
        self.world.resource::<SimulationTick>().now()
    }

    pub fn inventory(&self) -> Inventory {
        *self.world.resource::<Inventory>()
    }

    pub fn camera_x(&self) -> f32 {
        self.world.resource::<Camera>().x
    }

    /// Position of the player's top-left corner.
    pub fn player_position(&mut self) -> Option<Vec2> {
        use crate::systems::components::{Body, PlayerControlled};
        use bevy_ecs::query::With;

        let mut query = self.world.query_filtered::<&Body, With<PlayerControlled>>();
        query.single(&self.world).ok().map(|body| body.position)
    }
}
