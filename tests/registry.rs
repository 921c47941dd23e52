use glam::{DVec2, IVec2};
use horde::clock::Throttle;
use horde::entity::{AngleShooter, Body, Buff, Chaser, Entity, Faction, Reward};
use horde::registry::{Pool, Registry};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn chaser(position: IVec2, health: f64, score: u64) -> Entity {
    Chaser::new(Body::new(position, common::shared_block(6, 6), health, score, 10), 1.0).into()
}

fn pickup(position: IVec2, reward: Reward) -> Buff {
    Buff::new(Body::new(position, common::shared_block(5, 5), 1.0, 0, 0), reward)
}

#[test]
fn test_pool_free_keeps_indices() {
    let mut pool = Pool::new();
    for value in 0..5 {
        pool.push(value);
    }
    assert_that(&pool.free(1)).is_equal_to(Some(1));
    assert_that(&pool.free(1)).is_none();

    assert_that(&pool.get(3)).is_equal_to(Some(&3));
    assert_that(&pool.capacity()).is_equal_to(5);
    assert_that(&pool.live()).is_equal_to(4);

    pool.compact();
    assert_that(&pool.capacity()).is_equal_to(4);
    assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![0, 2, 3, 4]);
}

#[test]
fn test_spawn_routes_by_variant() {
    let mut registry = Registry::new(30);
    registry.spawn(chaser(IVec2::new(10, 10), 1.0, 1));
    registry.spawn(common::bullet(IVec2::new(10, 10), DVec2::Y, 1.0, Faction::Player).into());
    registry.spawn(pickup(IVec2::new(10, 10), Reward::Health).into());

    assert_that(&registry.hostiles().live()).is_equal_to(1);
    assert_that(&registry.projectiles().live()).is_equal_to(1);
    assert_that(&registry.pickups().live()).is_equal_to(1);
}

#[test]
fn test_update_returns_live_hostiles() {
    let field = common::field(200, 200);
    let mut registry = Registry::new(30);
    for i in 0..4 {
        registry.add(chaser(IVec2::new(20 + i * 30, 50), 1.0, 1));
    }
    let mut rng = common::rng();

    let live = registry.update(&common::tick(0, IVec2::new(100, 100), field), &mut rng);
    assert_that(&live).is_equal_to(4);
}

#[test]
fn test_hit_damages_hostile_and_wears_projectile() {
    let mut registry = Registry::new(30);
    registry.add(chaser(IVec2::new(50, 50), 5.0, 7));
    registry.add_projectile(common::bullet(IVec2::new(50, 50), DVec2::Y, 1.0, Faction::Player));
    let mut surface = common::Surface::new(100, 100);

    let score = registry.draw(&mut surface.canvas());

    assert_that(&score).is_equal_to(0);
    let hostile = registry.hostiles().get(0).unwrap();
    assert_that(&hostile.body().health).is_equal_to(3.0);
    let projectile = registry.projectiles().get(0).unwrap();
    assert_that(&projectile.is_dead()).is_true();
}

#[test]
fn test_kill_scores_and_frees_next_pass() {
    let mut registry = Registry::new(30);
    registry.add(chaser(IVec2::new(50, 50), 2.0, 7));
    registry.add_projectile(common::bullet(IVec2::new(50, 50), DVec2::Y, 1.0, Faction::Player));
    let mut surface = common::Surface::new(100, 100);

    assert_that(&registry.draw(&mut surface.canvas())).is_equal_to(7);
    assert_that(&registry.hostiles().live()).is_equal_to(1);

    surface.occupancy.clear();
    assert_that(&registry.draw(&mut surface.canvas())).is_equal_to(0);
    assert_that(&registry.hostiles().live()).is_equal_to(0);
    assert_that(&registry.projectiles().live()).is_equal_to(0);
    assert_that(&registry.deleted()).is_equal_to(2);
}

#[test]
fn test_hostile_shots_pass_through_hostiles() {
    let mut registry = Registry::new(30);
    registry.add(chaser(IVec2::new(50, 50), 5.0, 7));
    registry.add_projectile(common::bullet(IVec2::new(50, 50), DVec2::Y, 1.0, Faction::Hostile));
    let mut surface = common::Surface::new(100, 100);

    registry.draw(&mut surface.canvas());

    assert_that(&registry.hostiles().get(0).unwrap().body().health).is_equal_to(5.0);
    assert_that(&registry.projectiles().get(0).unwrap().is_dead()).is_false();
}

#[test]
fn test_shooter_attacks_enter_projectile_pool() {
    let field = common::field(200, 200);
    let mut registry = Registry::new(30);
    registry.add(
        AngleShooter::new(
            Body::new(IVec2::new(50, 50), common::shared_block(5, 5), 3.0, 1, 10),
            1.0,
            Throttle::new(1_000),
            common::shot(5.0, 1.0),
        )
        .into(),
    );
    let mut rng = common::rng();

    registry.update(&common::tick(0, IVec2::new(150, 150), field), &mut rng);

    assert_that(&registry.projectiles().live()).is_equal_to(1);
    match registry.projectiles().get(0) {
        Some(Entity::Bullet(bullet)) => assert_that(&bullet.faction()).is_equal_to(Faction::Hostile),
        other => panic!("expected a bullet, got {other:?}"),
    }
}

#[test]
fn test_compaction_preserves_live_set() {
    let mut registry = Registry::new(3);
    for i in 0..10 {
        // Even entities start dead.
        let health = if i % 2 == 0 { 0.0 } else { 1.0 };
        registry.add(chaser(IVec2::new(10 + i * 10, 20), health, i as u64));
    }
    let mut surface = common::Surface::new(200, 100);

    registry.draw(&mut surface.canvas());
    assert_that(&registry.deleted()).is_equal_to(5);
    assert_that(&registry.hostiles().capacity()).is_equal_to(10);

    let before: Vec<u64> = registry.hostiles().iter().map(|e| e.body().score).collect();
    surface.occupancy.clear();
    registry.draw(&mut surface.canvas());

    let after: Vec<u64> = registry.hostiles().iter().map(|e| e.body().score).collect();
    assert_eq!(after, before);
    assert_eq!(after, vec![1, 3, 5, 7, 9]);
    assert_that(&registry.hostiles().capacity()).is_equal_to(5);
    assert_that(&registry.deleted()).is_equal_to(0);
}

#[test]
fn test_no_compaction_below_threshold() {
    let mut registry = Registry::new(30);
    registry.add(chaser(IVec2::new(10, 10), 0.0, 1));
    registry.add(chaser(IVec2::new(30, 10), 1.0, 2));
    let mut surface = common::Surface::new(100, 100);

    registry.draw(&mut surface.canvas());
    registry.draw(&mut surface.canvas());
    assert_that(&registry.hostiles().capacity()).is_equal_to(2);
    assert_that(&registry.deleted()).is_equal_to(1);
}

#[test]
fn test_pickup_reward_reaches_player() {
    let field = common::field(200, 200);
    let mut registry = Registry::new(30);
    let mut player = common::player_at(IVec2::new(100, 100));
    let start = player.health();
    registry.add_pickup(pickup(IVec2::new(101, 99), Reward::Health));
    registry.add_pickup(pickup(IVec2::new(20, 20), Reward::Damage));
    let mut rng = common::rng();

    registry.update(&common::tick(0, player.position(), field), &mut rng);
    assert_eq!(registry.pending_rewards(), &[Reward::Health]);

    registry.collect_reward(&mut player);
    assert_that(&player.health()).is_equal_to(start + 1);
    assert_that(&registry.pending_rewards().is_empty()).is_true();

    // Draining an empty queue changes nothing.
    let damage = player.damage();
    registry.collect_reward(&mut player);
    assert_that(&player.health()).is_equal_to(start + 1);
    assert_that(&player.damage()).is_equal_to(damage);
}

#[test]
fn test_dead_hostiles_are_not_updated() {
    let field = common::field(200, 200);
    let mut registry = Registry::new(30);
    registry.add(chaser(IVec2::new(50, 50), 0.0, 1));
    let mut rng = common::rng();

    let live = registry.update(&common::tick(0, IVec2::new(150, 150), field), &mut rng);

    assert_that(&live).is_equal_to(1);
    assert_that(&registry.hostiles().get(0).unwrap().position()).is_equal_to(IVec2::new(50, 50));
}

#[test]
fn test_shooter_on_player_leaves_no_stationary_shots() {
    let field = common::field(200, 200);
    let target = IVec2::new(100, 100);
    let mut registry = Registry::new(30);
    registry.add(
        AngleShooter::new(
            Body::new(target, common::shared_block(5, 5), 3.0, 1, 10),
            1.0,
            Throttle::new(100),
            common::shot(5.0, 1.0),
        )
        .into(),
    );
    let mut rng = common::rng();

    for now in (0..10_000u64).step_by(10) {
        registry.update(&common::tick(now, target, field), &mut rng);
    }

    assert_that(&registry.projectiles().live()).is_equal_to(0);
}

#[test]
fn test_worn_out_projectile_hits_only_once() {
    let mut registry = Registry::new(30);
    // Each hostile covers one edge column of the bullet.
    registry.add(chaser(IVec2::new(47, 50), 5.0, 1));
    registry.add(chaser(IVec2::new(54, 50), 5.0, 1));
    registry.add_projectile(common::bullet(IVec2::new(50, 50), DVec2::Y, 1.0, Faction::Player));
    let mut surface = common::Surface::new(100, 100);

    registry.draw(&mut surface.canvas());

    assert_that(&registry.hostiles().get(0).unwrap().body().health).is_equal_to(3.0);
    assert_that(&registry.hostiles().get(1).unwrap().body().health).is_equal_to(5.0);
}
