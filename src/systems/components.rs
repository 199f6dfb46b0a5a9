use bevy_ecs::{bundle::Bundle, component::Component, entity::Entity, resource::Resource};
use glam::Vec2;
use micromap::Map;
use rand::{rngs::SmallRng, SeedableRng};
use strum_macros::{AsRefStr, EnumIter, IntoStaticStr};

use crate::{
    constants::{boss, collectible, combat, enemy, player, projectile, HitboxOffset},
    systems::{
        animation::{Animation, AnimationState},
        boss::BossAi,
        enemy::{Hop, Patrol},
        health::Health,
        physics::Physics,
        player::PlayerActivity,
        projectile::Projectile,
    },
};

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component denoting the type of entity.
///
/// The string form doubles as the sprite namespace, see [`Animation::sprite_key`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Player,
    Chicken,
    SmallChicken,
    Boss,
    /// A thrown salsa bottle.
    Bottle,
    /// A bottle lying on the ground from the start of the level.
    BottlePickup,
    /// A bottle left behind by a defeated enemy.
    DroppedBottle,
    Coin,
}

impl EntityKind {
    pub fn is_enemy(self) -> bool {
        matches!(self, EntityKind::Chicken | EntityKind::SmallChicken | EntityKind::Boss)
    }

    /// The resting top-y of this kind of entity.
    pub fn ground_level(self) -> f32 {
        match self {
            EntityKind::Player => player::GROUND_LEVEL,
            EntityKind::Chicken => enemy::CHICKEN_GROUND_LEVEL,
            EntityKind::SmallChicken => enemy::SMALL_CHICKEN_GROUND_LEVEL,
            EntityKind::Boss => boss::GROUND_LEVEL,
            EntityKind::Bottle => projectile::GROUND_LEVEL,
            EntityKind::BottlePickup | EntityKind::DroppedBottle => collectible::BOTTLE_Y,
            EntityKind::Coin => collectible::COIN_Y.start,
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            EntityKind::Player => player::SIZE,
            EntityKind::Chicken => enemy::CHICKEN_SIZE,
            EntityKind::SmallChicken => enemy::SMALL_CHICKEN_SIZE,
            EntityKind::Boss => boss::SIZE,
            EntityKind::Bottle => projectile::SIZE,
            EntityKind::BottlePickup => collectible::BOTTLE_SIZE,
            EntityKind::DroppedBottle => collectible::DROPPED_BOTTLE_SIZE,
            EntityKind::Coin => collectible::COIN_SIZE,
        }
    }

    pub fn hitbox_offset(self) -> HitboxOffset {
        match self {
            EntityKind::Player => player::HITBOX,
            EntityKind::Chicken => enemy::CHICKEN_HITBOX,
            EntityKind::SmallChicken => enemy::SMALL_CHICKEN_HITBOX,
            EntityKind::Boss => boss::HITBOX,
            EntityKind::Bottle => HitboxOffset::NONE,
            EntityKind::BottlePickup => collectible::BOTTLE_HITBOX,
            EntityKind::DroppedBottle => collectible::DROPPED_BOTTLE_HITBOX,
            EntityKind::Coin => collectible::COIN_HITBOX,
        }
    }

    /// Damage and knockback magnitude dealt to the player on a side contact.
    pub fn contact(self) -> Option<(u32, f32)> {
        match self {
            EntityKind::Chicken | EntityKind::SmallChicken => Some((combat::ENEMY_CONTACT_DAMAGE, combat::ENEMY_KNOCKBACK)),
            EntityKind::Boss => Some((combat::BOSS_CONTACT_DAMAGE, combat::BOSS_KNOCKBACK)),
            _ => None,
        }
    }

    /// Damage a bottle or a stomp deals to this kind.
    pub fn hit_damage(self) -> u32 {
        match self {
            EntityKind::Boss => combat::BOSS_HIT_DAMAGE,
            _ => combat::LETHAL_DAMAGE,
        }
    }

    /// Whether a defeated entity of this kind may leave a bottle behind.
    pub fn drops_bottles(self) -> bool {
        matches!(self, EntityKind::Chicken | EntityKind::SmallChicken)
    }
}

/// The sprite rectangle of an entity together with its hitbox offset.
///
/// `position` is the top-left corner, y grows downwards.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
    pub offset: HitboxOffset,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2, offset: HitboxOffset) -> Self {
        Self { position, size, offset }
    }

    /// A body with the default size and hitbox of the given kind.
    pub fn of(kind: EntityKind, position: Vec2) -> Self {
        Self::new(position, kind.size(), kind.hitbox_offset())
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

/// Which way an entity is looking. Sprites face right by default.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn is_mirrored(self) -> bool {
        self == Facing::Left
    }
}

/// Marker components for collision filtering
#[derive(Component)]
pub struct EnemyCollider;

#[derive(Component)]
pub struct ItemCollider;

/// Tick of the last contact with each player, used to space out repeated hits.
#[derive(Component)]
pub struct ContactCooldowns(Map<Entity, u64, 4>);

impl Default for ContactCooldowns {
    fn default() -> Self {
        Self(Map::new())
    }
}

impl ContactCooldowns {
    /// Whether `player` may interact with this enemy at tick `now`.
    pub fn ready(&self, player: Entity, now: u64) -> bool {
        match self.0.get(&player) {
            Some(&last) => now.saturating_sub(last) >= combat::CONTACT_COOLDOWN_TICKS as u64,
            None => true,
        }
    }

    pub fn record(&mut self, player: Entity, now: u64) {
        if self.0.len() == 4 && self.0.get(&player).is_none() {
            // Only a handful of players ever exist; forget everyone rather than overflow.
            self.0 = Map::new();
        }
        self.0.insert(player, now);
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub kind: EntityKind,
    pub body: Body,
    pub physics: Physics,
    pub health: Health,
    pub facing: Facing,
    pub activity: PlayerActivity,
    pub animation: Animation,
}

impl PlayerBundle {
    pub fn new(position: Vec2) -> Self {
        Self {
            player: PlayerControlled,
            kind: EntityKind::Player,
            body: Body::of(EntityKind::Player, position),
            physics: Physics::new(EntityKind::Player.ground_level()),
            health: Health::new(combat::MAX_ENERGY, player::HURT_TICKS),
            facing: Facing::Right,
            activity: PlayerActivity::default(),
            animation: Animation::new(AnimationState::Default),
        }
    }
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub kind: EntityKind,
    pub body: Body,
    pub physics: Physics,
    pub health: Health,
    pub facing: Facing,
    pub patrol: Patrol,
    pub cooldowns: ContactCooldowns,
    pub animation: Animation,
    pub collider: EnemyCollider,
}

impl EnemyBundle {
    pub fn new(kind: EntityKind, x: f32, speed: f32) -> Self {
        let ground = kind.ground_level();
        Self {
            kind,
            body: Body::of(kind, Vec2::new(x, ground)),
            physics: Physics::new(ground),
            health: Health::new(combat::MAX_ENERGY, 0),
            facing: Facing::Left,
            patrol: Patrol { speed },
            cooldowns: ContactCooldowns::default(),
            animation: Animation::new(AnimationState::Walk),
            collider: EnemyCollider,
        }
    }
}

#[derive(Bundle)]
pub struct SmallChickenBundle {
    pub enemy: EnemyBundle,
    pub hop: Hop,
}

#[derive(Bundle)]
pub struct BossBundle {
    pub kind: EntityKind,
    pub body: Body,
    pub physics: Physics,
    pub health: Health,
    pub facing: Facing,
    pub ai: BossAi,
    pub cooldowns: ContactCooldowns,
    pub animation: Animation,
    pub collider: EnemyCollider,
}

impl BossBundle {
    pub fn new(x: f32) -> Self {
        Self {
            kind: EntityKind::Boss,
            body: Body::of(EntityKind::Boss, Vec2::new(x, boss::GROUND_LEVEL)),
            physics: Physics::new(boss::GROUND_LEVEL),
            health: Health::invulnerable_when_hurt(combat::MAX_ENERGY, boss::INVULNERABLE_TICKS),
            facing: Facing::Left,
            ai: BossAi::default(),
            cooldowns: ContactCooldowns::default(),
            animation: Animation::new(AnimationState::Default),
            collider: EnemyCollider,
        }
    }
}

#[derive(Bundle)]
pub struct ItemBundle {
    pub kind: EntityKind,
    pub body: Body,
    pub animation: Animation,
    pub item_collider: ItemCollider,
}

impl ItemBundle {
    pub fn new(kind: EntityKind, position: Vec2) -> Self {
        let state = match kind {
            EntityKind::Coin => AnimationState::Pulse,
            _ => AnimationState::Default,
        };
        Self {
            kind,
            body: Body::of(kind, position),
            animation: Animation::new(state),
            item_collider: ItemCollider,
        }
    }
}

#[derive(Bundle)]
pub struct ProjectileBundle {
    pub kind: EntityKind,
    pub body: Body,
    pub projectile: Projectile,
    pub facing: Facing,
    pub animation: Animation,
}

impl ProjectileBundle {
    pub fn new(position: Vec2, facing: Facing) -> Self {
        Self {
            kind: EntityKind::Bottle,
            body: Body::of(EntityKind::Bottle, position),
            projectile: Projectile::thrown(facing),
            facing,
            animation: Animation::new(AnimationState::Spin),
        }
    }
}

/// The monotonic simulation clock, advanced once per tick by the [`crate::game::Game`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationTick(pub u64);

impl SimulationTick {
    pub fn now(&self) -> u64 {
        self.0
    }
}

/// Horizontal extent the player may walk in.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelBounds {
    pub start_x: f32,
    pub end_x: f32,
}

impl LevelBounds {
    /// NaN lands on the start of the level.
    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return self.start_x;
        }
        x.clamp(self.start_x, self.end_x)
    }
}

/// Horizontal camera offset; sprites are drawn at `position.x + camera_x`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
}

/// The single seeded source of randomness for a session.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
