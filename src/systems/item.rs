use bevy_ecs::{resource::Resource, system::Commands};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::{
    constants::{collectible, inventory},
    level::CollectibleLayout,
    systems::components::{EntityKind, GameRng, ItemBundle},
};

/// Collected bottles and coins.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Bottle bar percentage: a multiple of [`inventory::BOTTLE_UNIT`], at most [`inventory::BOTTLE_CAPACITY`].
    pub bottles: u32,
    /// Coins collected, at most [`inventory::COINS_PER_BAR`].
    pub coins: u32,
}

impl Inventory {
    pub fn can_collect_bottle(&self) -> bool {
        self.bottles < inventory::BOTTLE_CAPACITY
    }

    /// Add one bottle. Returns false (and leaves the bottle on the ground) when full.
    pub fn collect_bottle(&mut self) -> bool {
        if !self.can_collect_bottle() {
            return false;
        }
        self.bottles = (self.bottles + inventory::BOTTLE_UNIT).min(inventory::BOTTLE_CAPACITY);
        true
    }

    /// Remove one bottle for a throw. Returns false when there is none.
    pub fn take_bottle(&mut self) -> bool {
        if self.bottles < inventory::BOTTLE_UNIT {
            return false;
        }
        self.bottles -= inventory::BOTTLE_UNIT;
        true
    }

    pub fn bottle_count(&self) -> u32 {
        self.bottles / inventory::BOTTLE_UNIT
    }

    pub fn collect_coin(&mut self) {
        self.coins = (self.coins + 1).min(inventory::COINS_PER_BAR);
    }

    /// Coin bar percentage, each coin worth `100 / COINS_PER_BAR`.
    pub fn coin_percentage(&self) -> f32 {
        self.coins as f32 * 100.0 / inventory::COINS_PER_BAR as f32
    }
}

/// Picks random positions inside the scatter range for the level's bottles and coins.
pub fn scatter_collectibles(rng: &mut GameRng, layout: &CollectibleLayout) -> Vec<ItemBundle> {
    let mut items = Vec::with_capacity((layout.bottles + layout.coins) as usize);

    for _ in 0..layout.bottles {
        let x = rng.0.random_range(layout.x_range.clone());
        items.push(ItemBundle::new(EntityKind::BottlePickup, Vec2::new(x, collectible::BOTTLE_Y)));
    }

    for _ in 0..layout.coins {
        let x = rng.0.random_range(layout.x_range.clone());
        let y = rng.0.random_range(collectible::COIN_Y);
        items.push(ItemBundle::new(EntityKind::Coin, Vec2::new(x, y)));
    }

    debug!(bottles = layout.bottles, coins = layout.coins, "Collectibles scattered");
    items
}

/// Leaves a bottle centred on where an enemy died.
pub fn spawn_dropped_bottle(commands: &mut Commands, center: Vec2) {
    let size = EntityKind::DroppedBottle.size();
    let position = center - size / 2.0;
    let entity = commands.spawn(ItemBundle::new(EntityKind::DroppedBottle, position)).id();
    trace!(entity = ?entity, x = position.x, y = position.y, "Dropped bottle");
}
