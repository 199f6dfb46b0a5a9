//! Read-only snapshots for renderers.
//!
//! The simulation never draws. At the end of every tick [`render_snapshot_system`] captures the
//! visible state into the [`RenderFrame`] resource, which the host hands to its [`Renderer`].

use bevy_ecs::{
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::Vec2;

use crate::{
    constants::boss,
    level::BackgroundLayer,
    systems::{
        animation::Animation,
        components::{Body, Camera, EntityKind, Facing, PlayerControlled},
        debug::DebugState,
        health::Health,
        hitbox::Hitbox,
        item::Inventory,
        projectile::Projectile,
    },
};

/// Anything that can draw a frame.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame);
}

/// Draw ordering; lower layers are drawn first.
pub fn layer(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::BottlePickup | EntityKind::DroppedBottle | EntityKind::Coin => 1,
        EntityKind::Chicken | EntityKind::SmallChicken => 2,
        EntityKind::Boss => 3,
        EntityKind::Player => 4,
        EntityKind::Bottle => 5,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    /// `kind/state`, e.g. `player/walk`.
    pub sprite_key: String,
    pub frame: u8,
    pub mirrored: bool,
    pub opacity: f32,
    /// Present only while the hitbox overlay is enabled.
    pub hitbox: Option<Hitbox>,
}

/// A status bar image chosen by fill level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBar {
    pub percentage: f32,
}

impl StatusBar {
    pub fn new(percentage: f32) -> Self {
        Self {
            percentage: percentage.clamp(0.0, 100.0),
        }
    }

    /// Index of the bar image, 0 (empty) to 5 (full).
    pub fn image_index(&self) -> usize {
        let p = self.percentage;
        if p >= 100.0 {
            5
        } else if p > 80.0 {
            4
        } else if p > 60.0 {
            3
        } else if p > 40.0 {
            2
        } else if p > 20.0 {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossBar {
    pub position: Vec2,
    pub bar: StatusBar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub health: StatusBar,
    pub bottles: StatusBar,
    pub coins: StatusBar,
    /// Hidden once the boss is dead, or when there is no boss.
    pub boss: Option<BossBar>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            health: StatusBar::new(100.0),
            bottles: StatusBar::new(0.0),
            coins: StatusBar::new(0.0),
            boss: None,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub camera_x: f32,
    pub backgrounds: Vec<BackgroundLayer>,
    /// Sorted by draw layer.
    pub sprites: Vec<SpriteView>,
    pub hud: Hud,
    pub show_hitboxes: bool,
}

/// The static background of the level, copied into every frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct Backgrounds(pub Vec<BackgroundLayer>);

#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn render_snapshot_system(
    mut frame: ResMut<RenderFrame>,
    camera: Res<Camera>,
    debug: Res<DebugState>,
    inventory: Res<Inventory>,
    backgrounds: Res<Backgrounds>,
    sprites: Query<(&EntityKind, &Body, &Animation, Option<&Facing>, Option<&Projectile>)>,
    players: Query<&Health, With<PlayerControlled>>,
    bosses: Query<(&EntityKind, &Body, &Health)>,
) {
    let show_hitboxes = debug.shows_hitboxes();

    let mut views: Vec<SpriteView> = sprites
        .iter()
        .map(|(kind, body, animation, facing, projectile)| SpriteView {
            kind: *kind,
            position: body.position,
            size: body.size,
            sprite_key: animation.sprite_key(*kind),
            frame: animation.frame,
            mirrored: facing.is_some_and(|f| f.is_mirrored()),
            opacity: projectile.map(|p| p.opacity()).unwrap_or(1.0),
            hitbox: show_hitboxes.then(|| Hitbox::of(body)),
        })
        .collect();
    views.sort_by_key(|view| layer(view.kind));

    let health = players.iter().next().map(|h| h.percentage()).unwrap_or(0.0);
    let boss = bosses
        .iter()
        .find(|(kind, _, health)| **kind == EntityKind::Boss && !health.is_dead())
        .map(|(_, body, health)| BossBar {
            position: body.position + boss::STATUS_BAR_OFFSET,
            bar: StatusBar::new(health.percentage()),
        });

    *frame = RenderFrame {
        camera_x: camera.x,
        backgrounds: backgrounds.0.clone(),
        sprites: views,
        hud: Hud {
            health: StatusBar::new(health),
            bottles: StatusBar::new(inventory.bottles as f32),
            coins: StatusBar::new(inventory.coin_percentage()),
            boss,
        },
        show_hitboxes,
    };
}
