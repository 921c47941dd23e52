use glam::{IVec2, UVec2};
use horde::entity::{Body, Chaser, Entity, Faction};
use horde::occupancy::{OccupancyMap, Owner, OwnerId};
use horde::registry::Registry;
use speculoos::prelude::*;

mod common;

#[test]
fn test_tag_and_probe() {
    let mut map = OccupancyMap::new(UVec2::new(4, 3));
    let owner = OwnerId::from(Owner::Hostile(2));
    map.tag(3, 2, owner);

    assert_that(&map.probe(3, 2)).is_equal_to(owner);
    assert_that(&map.probe(0, 0)).is_equal_to(OwnerId::EMPTY);
    assert_that(&map.occupied()).is_equal_to(1);
}

#[test]
fn test_out_of_bounds_is_ignored() {
    let mut map = OccupancyMap::new(UVec2::new(4, 3));
    map.tag(4, 0, OwnerId::from(Owner::Projectile(0)));
    map.tag(0, 3, OwnerId::from(Owner::Projectile(0)));

    assert_that(&map.occupied()).is_equal_to(0);
    assert_that(&map.probe(100, 100)).is_equal_to(OwnerId::EMPTY);
}

#[test]
fn test_clear_leaves_no_stale_tags() {
    let mut map = OccupancyMap::new(UVec2::new(8, 8));
    for i in 0..8 {
        map.tag(i, i, OwnerId::from(Owner::Pickup(i as usize)));
    }
    map.clear();
    assert_that(&map.occupied()).is_equal_to(0);
}

#[test]
fn test_projectile_zero_is_not_empty() {
    let id = OwnerId::from(Owner::Projectile(0));
    assert_that(&id.is_empty()).is_false();
    assert_that(&id.decode()).is_equal_to(Owner::Projectile(0));
}

#[test]
fn test_draw_tags_union_of_live_sprites() {
    let field = common::field(100, 100);
    let mut registry = Registry::new(30);

    // Nothing overlaps, so every opaque pixel owns exactly one cell.
    registry.add(Chaser::new(Body::new(IVec2::new(20, 20), common::shared_block(6, 6), 5.0, 1, 10), 1.0).into());
    registry.add(Chaser::new(Body::new(IVec2::new(60, 60), common::shared_block(4, 4), 5.0, 1, 10), 1.0).into());
    registry.add_projectile(common::bullet(IVec2::new(80, 20), glam::DVec2::Y, 1.0, Faction::Player));
    registry.spawn(Entity::Buff(horde::entity::Buff::new(
        Body::new(IVec2::new(20, 80), common::shared_block(5, 5), 1.0, 0, 0),
        horde::entity::Reward::Health,
    )));

    let mut surface = common::Surface::new(field.size.x, field.size.y);
    registry.draw(&mut surface.canvas());

    let expected = 6 * 6 + 4 * 4 + 3 * 3 + 5 * 5;
    assert_that(&surface.occupancy.occupied()).is_equal_to(expected);
    assert_that(&surface.occupancy.probe(20, 20).decode()).is_equal_to(Owner::Hostile(0));
    assert_that(&surface.occupancy.probe(60, 60).decode()).is_equal_to(Owner::Hostile(1));
    assert_that(&surface.occupancy.probe(80, 20).decode()).is_equal_to(Owner::Projectile(0));
    assert_that(&surface.occupancy.probe(20, 80).decode()).is_equal_to(Owner::Pickup(0));

    surface.occupancy.clear();
    assert_that(&surface.occupancy.occupied()).is_equal_to(0);
}
