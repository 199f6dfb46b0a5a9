//! Offset-aware axis-aligned bounding boxes and the stomp/side classification.

use glam::Vec2;

use crate::{
    constants::combat::{STOMP_TOLERANCE, STOMP_WIDTH_MARGIN},
    systems::components::Body,
};

/// The effective collision rectangle of a [`Body`], after its per-side offset is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Hitbox {
    pub fn of(body: &Body) -> Self {
        let offset = body.offset;
        Self {
            left: body.position.x + offset.left,
            right: body.position.x + body.size.x - offset.right,
            top: body.position.y + offset.top,
            bottom: body.position.y + body.size.y - offset.bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Strict interval overlap on both axes; touching edges do not collide.
    pub fn intersects(&self, other: &Hitbox) -> bool {
        self.left < other.right && other.left < self.right && self.top < other.bottom && other.top < self.bottom
    }
}

/// Whether the hitboxes of two bodies overlap.
pub fn is_colliding(a: &Body, b: &Body) -> bool {
    Hitbox::of(a).intersects(&Hitbox::of(b))
}

/// How the player met an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Landed on the enemy from above.
    Top,
    Side,
}

/// Classify an (already overlapping) player/enemy contact.
///
/// A stomp needs the player to be descending, their feet to be no deeper than
/// [`STOMP_TOLERANCE`] below the enemy's top, and their centre to be above the enemy's
/// footprint (widened a little on both sides).
pub fn classify_collision(player: &Body, player_speed_y: f32, enemy: &Body) -> CollisionType {
    let p = Hitbox::of(player);
    let e = Hitbox::of(enemy);

    let falling = player_speed_y < 0.0;
    let feet_on_top = p.bottom < e.top + STOMP_TOLERANCE;
    let margin = e.width() * STOMP_WIDTH_MARGIN;
    let center = p.center_x();
    let above = center >= e.left - margin && center <= e.right + margin;

    if falling && feet_on_top && above {
        CollisionType::Top
    } else {
        CollisionType::Side
    }
}

/// Signed knockback for a player pushed away from an enemy.
pub fn knockback_direction(player: &Body, enemy: &Body) -> f32 {
    if player.center().x < enemy.center().x {
        -1.0
    } else {
        1.0
    }
}
