use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::constants::{enemy, player};
use crate::events::CombatEvent;
use crate::systems::audio::AudioEvent;
use crate::systems::boss::BossAi;
use crate::systems::components::{
    Body, ContactCooldowns, EnemyCollider, EntityKind, GameRng, ItemCollider, PlayerControlled, SimulationTick,
};
use crate::systems::health::{Health, HitOutcome};
use crate::systems::hitbox::{classify_collision, is_colliding, knockback_direction, CollisionType};
use crate::systems::item::{spawn_dropped_bottle, Inventory};
use crate::systems::lifetime::Remove;
use crate::systems::physics::{DeathFall, Physics};
use crate::systems::projectile::Projectile;

/// Detects the player touching enemies and decides between a stomp and a side contact.
///
/// Dead enemies are ignored, and each (player, enemy) pair is held back by its contact cooldown
/// so a single touch does not drain the player's energy over consecutive ticks.
#[allow(clippy::type_complexity)]
pub fn player_enemy_collision_system(
    tick: Res<SimulationTick>,
    players: Query<(Entity, &Body, &Physics, &Health), With<PlayerControlled>>,
    enemies: Query<(Entity, &EntityKind, &Body, &Health, &ContactCooldowns), (With<EnemyCollider>, Without<Remove>)>,
    mut events: EventWriter<CombatEvent>,
) {
    let now = tick.now();

    for (player, player_body, physics, player_health) in players.iter() {
        if player_health.is_dead() {
            continue;
        }

        for (enemy, kind, enemy_body, enemy_health, cooldowns) in enemies.iter() {
            if enemy_health.is_dead() || !cooldowns.ready(player, now) || !is_colliding(player_body, enemy_body) {
                continue;
            }

            let event = match classify_collision(player_body, physics.speed_y, enemy_body) {
                CollisionType::Top => CombatEvent::Stomp { player, enemy },
                CollisionType::Side => {
                    let Some((damage, knockback)) = kind.contact() else {
                        continue;
                    };
                    CombatEvent::Contact {
                        player,
                        enemy,
                        damage,
                        knockback: knockback * knockback_direction(player_body, enemy_body),
                    }
                }
            };
            trace!(event = ?event, "Player collision");
            events.write(event);
        }
    }
}

/// Detects the player touching collectibles.
pub fn pickup_system(
    players: Query<(Entity, &Body, &Health), With<PlayerControlled>>,
    items: Query<(Entity, &Body), (With<ItemCollider>, Without<Remove>)>,
    mut events: EventWriter<CombatEvent>,
) {
    for (player, player_body, health) in players.iter() {
        if health.is_dead() {
            continue;
        }
        for (item, item_body) in items.iter() {
            if is_colliding(player_body, item_body) {
                events.write(CombatEvent::Pickup { player, item });
            }
        }
    }
}

/// Detects flying bottles reaching living enemies. A bottle hits at most one enemy.
pub fn projectile_collision_system(
    projectiles: Query<(Entity, &Body, &Projectile), Without<Remove>>,
    enemies: Query<(Entity, &EntityKind, &Body, &Health), (With<EnemyCollider>, Without<Remove>)>,
    mut events: EventWriter<CombatEvent>,
) {
    for (projectile, projectile_body, state) in projectiles.iter() {
        if state.is_splashing() {
            continue;
        }

        let target = enemies
            .iter()
            .find(|(_, _, body, health)| !health.is_dead() && is_colliding(projectile_body, body));

        if let Some((enemy, kind, _, _)) = target {
            events.write(CombatEvent::ProjectileHit {
                projectile,
                enemy,
                damage: kind.hit_damage(),
            });
        }
    }
}

/// Applies every combat event of the current tick: damage, knockback, deaths, bounces,
/// bottle drops and inventory changes.
#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn combat_resolution_system(
    mut commands: Commands,
    tick: Res<SimulationTick>,
    mut rng: ResMut<GameRng>,
    mut inventory: ResMut<Inventory>,
    mut combat_events: EventReader<CombatEvent>,
    mut audio: EventWriter<AudioEvent>,
    mut players: Query<(&mut Physics, &mut Health), (With<PlayerControlled>, Without<EnemyCollider>)>,
    mut enemies: Query<
        (
            &EntityKind,
            &Body,
            &mut Health,
            &mut ContactCooldowns,
            Option<&mut BossAi>,
        ),
        (With<EnemyCollider>, Without<PlayerControlled>),
    >,
    mut projectiles: Query<&mut Projectile>,
    items: Query<&EntityKind, (With<ItemCollider>, Without<Remove>)>,
) {
    let now = tick.now();
    let mut deaths: SmallVec<[Entity; 4]> = SmallVec::new();
    let mut collected: SmallVec<[Entity; 4]> = SmallVec::new();

    for event in combat_events.read() {
        match *event {
            CombatEvent::Stomp { player, enemy } => {
                let Ok((mut physics, _)) = players.get_mut(player) else {
                    continue;
                };
                let Ok((kind, _, mut health, mut cooldowns, ai)) = enemies.get_mut(enemy) else {
                    continue;
                };
                cooldowns.record(player, now);

                let outcome = health.hit(kind.hit_damage(), now);
                physics.speed_y = player::STOMP_BOUNCE;
                debug!(enemy = ?enemy, kind = kind.as_ref(), outcome = ?outcome, "Stomp");

                if let (HitOutcome::Damaged { .. }, Some(mut ai)) = (outcome, ai) {
                    ai.register_hit();
                    audio.write(AudioEvent::BossHit);
                }
                if outcome == HitOutcome::Killed {
                    deaths.push(enemy);
                }
            }
            CombatEvent::Contact {
                player,
                enemy,
                damage,
                knockback,
            } => {
                let Ok((mut physics, mut health)) = players.get_mut(player) else {
                    continue;
                };
                let Ok((_, _, enemy_health, mut cooldowns, _)) = enemies.get_mut(enemy) else {
                    continue;
                };
                if enemy_health.is_dead() {
                    continue;
                }
                cooldowns.record(player, now);

                physics.knock(knockback);
                match health.hit(damage, now) {
                    HitOutcome::Ignored => {}
                    HitOutcome::Damaged { remaining } => {
                        debug!(enemy = ?enemy, damage, remaining, "Player hurt");
                        audio.write(AudioEvent::PlayerHurt);
                    }
                    HitOutcome::Killed => {
                        info!(enemy = ?enemy, "Player killed");
                        audio.write(AudioEvent::PlayerHurt);
                    }
                }
            }
            CombatEvent::ProjectileHit {
                projectile,
                enemy,
                damage,
            } => {
                // A bottle only ever bursts once.
                let Ok(mut bottle) = projectiles.get_mut(projectile) else {
                    continue;
                };
                if !bottle.begin_splash() {
                    continue;
                }

                let Ok((kind, _, mut health, _, ai)) = enemies.get_mut(enemy) else {
                    continue;
                };
                let outcome = health.hit(damage, now);
                debug!(enemy = ?enemy, kind = kind.as_ref(), outcome = ?outcome, "Bottle hit");

                match (outcome, ai) {
                    (HitOutcome::Damaged { .. }, Some(mut ai)) => {
                        ai.register_hit();
                        audio.write(AudioEvent::BossHit);
                    }
                    (HitOutcome::Killed, _) => deaths.push(enemy),
                    _ => {}
                }
            }
            CombatEvent::Pickup { item, .. } => {
                if collected.contains(&item) {
                    continue;
                }
                let Ok(kind) = items.get(item) else {
                    continue;
                };
                let taken = match kind {
                    EntityKind::BottlePickup | EntityKind::DroppedBottle => {
                        let taken = inventory.collect_bottle();
                        if taken {
                            audio.write(AudioEvent::BottleCollected);
                        }
                        taken
                    }
                    EntityKind::Coin => {
                        inventory.collect_coin();
                        audio.write(AudioEvent::CoinCollected);
                        true
                    }
                    _ => false,
                };
                if taken {
                    trace!(item = ?item, kind = kind.as_ref(), "Collected");
                    collected.push(item);
                    commands.entity(item).insert(Remove);
                }
            }
        }
    }

    for enemy in deaths {
        let Ok((kind, body, _, _, _)) = enemies.get(enemy) else {
            continue;
        };
        info!(enemy = ?enemy, kind = kind.as_ref(), "Enemy defeated");
        audio.write(if *kind == EntityKind::Boss {
            AudioEvent::BossHit
        } else {
            AudioEvent::EnemyDied
        });
        commands.entity(enemy).insert(DeathFall::enemy());

        if kind.drops_bottles() && rng.0.random_bool(enemy::BOTTLE_DROP_CHANCE) {
            spawn_dropped_bottle(&mut commands, body.center());
        }
    }
}
