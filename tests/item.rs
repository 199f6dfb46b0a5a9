use pollo::{
    constants::{collectible, inventory},
    level::CollectibleLayout,
    systems::{
        components::{EntityKind, GameRng},
        item::{scatter_collectibles, Inventory},
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_collect_bottle_fills_in_units() {
    let mut inv = Inventory::default();

    assert_that(&inv.collect_bottle()).is_true();
    assert_that(&inv.collect_bottle()).is_true();
    assert_eq!(inv.bottles, 2 * inventory::BOTTLE_UNIT);
    assert_eq!(inv.bottle_count(), 2);
}

#[test]
fn test_collect_bottle_stops_at_capacity() {
    let mut inv = Inventory::default();
    for _ in 0..5 {
        assert_that(&inv.collect_bottle()).is_true();
    }

    assert_that(&inv.can_collect_bottle()).is_false();
    assert_that(&inv.collect_bottle()).is_false();
    assert_eq!(inv.bottles, inventory::BOTTLE_CAPACITY);
}

#[test]
fn test_take_bottle() {
    let mut inv = Inventory {
        bottles: inventory::BOTTLE_UNIT,
        coins: 0,
    };

    assert_that(&inv.take_bottle()).is_true();
    assert_eq!(inv.bottles, 0);
    assert_that(&inv.take_bottle()).is_false();
    assert_eq!(inv.bottles, 0);
}

#[test]
fn test_coins_fill_the_bar() {
    let mut inv = Inventory::default();

    inv.collect_coin();
    assert_that(&inv.coin_percentage()).is_greater_than(6.0);
    assert_that(&inv.coin_percentage()).is_less_than(7.0);

    for _ in 0..20 {
        inv.collect_coin();
    }
    assert_eq!(inv.coins, inventory::COINS_PER_BAR);
    assert_eq!(inv.coin_percentage(), 100.0);
}

#[test]
fn test_scatter_places_items_inside_range() {
    let mut rng = GameRng::seeded(7);
    let layout = CollectibleLayout::default();

    let items = scatter_collectibles(&mut rng, &layout);

    assert_eq!(items.len(), (collectible::BOTTLE_COUNT + collectible::COIN_COUNT) as usize);
    for item in &items {
        let x = item.body.position.x;
        assert_that(&layout.x_range.contains(&x)).is_true();
        match item.kind {
            EntityKind::BottlePickup => assert_eq!(item.body.position.y, collectible::BOTTLE_Y),
            EntityKind::Coin => assert_that(&collectible::COIN_Y.contains(&item.body.position.y)).is_true(),
            other => panic!("Unexpected collectible {other:?}"),
        }
    }
}

#[test]
fn test_scatter_is_deterministic() {
    let layout = CollectibleLayout::default();
    let a = scatter_collectibles(&mut GameRng::seeded(42), &layout);
    let b = scatter_collectibles(&mut GameRng::seeded(42), &layout);

    let positions = |items: &[pollo::systems::components::ItemBundle]| {
        items.iter().map(|i| i.body.position).collect::<Vec<_>>()
    };
    assert_eq!(positions(&a), positions(&b));
}

#[test]
fn test_scatter_nothing() {
    let items = scatter_collectibles(&mut GameRng::seeded(1), &CollectibleLayout::none());
    assert_that(&items.is_empty()).is_true();
}
