use glam::{DVec2, IVec2, UVec2};
use horde::entity::{Body, Chaser, Entity, Faction};
use horde::game::Game;
use horde::input::{Input, Keys};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const SCREEN: UVec2 = UVec2::new(200, 150);

fn quiet_game() -> Game {
    Game::new(&common::quiet_config(SCREEN), common::assets(SCREEN), 0)
}

fn chaser(position: IVec2, health: f64, score: u64) -> Entity {
    Chaser::new(Body::new(position, common::shared_block(6, 6), health, score, 10), 1.0).into()
}

#[test]
fn test_player_starts_centered_and_moves() {
    let mut game = quiet_game();
    let start = game.player().position();
    assert_eq!(start, IVec2::new(100, 75));

    game.update(0, &Input::new(Keys::RIGHT | Keys::DOWN, start, false));
    assert_eq!(game.player().position(), start + IVec2::new(4, 4));
}

#[test]
fn test_fire_adds_player_projectile() {
    let mut game = quiet_game();

    game.update(0, &Input::new(Keys::empty(), IVec2::new(180, 75), true));

    assert_that(&game.registry().projectiles().live()).is_equal_to(1);
    match game.registry().projectiles().get(0) {
        Some(Entity::Bullet(bullet)) => {
            assert_that(&bullet.faction()).is_equal_to(Faction::Player);
            assert!((bullet.direction() - DVec2::X).length() < 1e-9);
        }
        other => panic!("expected a bullet, got {other:?}"),
    }
}

#[test]
fn test_quit_key_sets_flag() {
    let mut game = quiet_game();
    assert_that(&game.quit_requested()).is_false();

    game.update(0, &Input::new(Keys::QUIT, IVec2::ZERO, false));
    assert_that(&game.quit_requested()).is_true();
}

#[test]
fn test_render_draws_background_and_hud() {
    let mut game = quiet_game();
    let mut frame = game.new_frame();

    game.render(&mut frame);

    // Lower left corner is untouched background.
    assert_that(&frame.get(0, 149)).is_equal_to(Some(0xff00_0000 | common::BACKGROUND_COLOR));
    // First score digit sits inside the one pixel margin of its glyph.
    assert_that(&frame.get(1, 1)).is_equal_to(Some(0xffff_ffff));
    assert_that(&frame.get(0, 0)).is_equal_to(Some(0xff00_0000 | common::BACKGROUND_COLOR));
}

#[test]
fn test_kills_add_to_score() {
    let mut game = quiet_game();
    game.registry_mut().add(chaser(IVec2::new(40, 100), 1.0, 7));
    game.registry_mut()
        .add_projectile(common::bullet(IVec2::new(40, 100), DVec2::Y, 1.0, Faction::Player));
    let mut frame = game.new_frame();

    game.render(&mut frame);
    assert_that(&game.score()).is_equal_to(7);
}

#[test]
fn test_contact_ends_the_run() {
    let mut game = quiet_game();
    let at = game.player().position();
    game.registry_mut().add(chaser(at, 1_000.0, 1));
    let mut frame = game.new_frame();

    for _ in 0..2 {
        game.render(&mut frame);
        assert_that(&game.is_over()).is_false();
    }
    game.render(&mut frame);
    assert_that(&game.is_over()).is_true();

    // The next frame is the death screen over a dimmed background.
    game.render(&mut frame);
    assert_that(&frame.get(0, 0)).is_equal_to(Some(0xff0a_141e));
    assert_that(&frame.get(199, 149)).is_equal_to(Some(0xff0a_141e));
}

#[test]
fn test_simulation_freezes_after_death() {
    let mut game = quiet_game();
    let at = game.player().position();
    game.registry_mut().add(chaser(at, 1_000.0, 1));
    let mut frame = game.new_frame();
    while !game.is_over() {
        game.render(&mut frame);
    }

    game.update(5_000, &Input::new(Keys::LEFT, IVec2::new(0, 0), true));

    assert_eq!(game.player().position(), at);
    assert_that(&game.registry().projectiles().live()).is_equal_to(0);
}

#[test]
fn test_spawner_feeds_registry() {
    let mut config = common::quiet_config(SCREEN);
    config.spawner.initial_spawn_chance = 1.0;
    config.spawner.pickup_chance = 0.0;
    let mut game = Game::new(&config, common::assets(SCREEN), 0);
    let input = Input::default();

    game.update(1_000, &input);
    assert_that(&game.registry().hostiles().live()).is_equal_to(0);
    game.update(1_001, &input);
    assert_that(&game.registry().hostiles().live()).is_equal_to(1);
    assert_that(&game.nearest_hostile()).is_some();
}

#[test]
fn test_nearest_hostile_ignores_the_dead() {
    let mut game = quiet_game();
    game.registry_mut().add(chaser(IVec2::new(110, 75), 0.0, 1));
    game.registry_mut().add(chaser(IVec2::new(150, 75), 1.0, 1));
    game.registry_mut().add(chaser(IVec2::new(10, 10), 1.0, 1));

    assert_that(&game.nearest_hostile()).is_equal_to(Some(IVec2::new(150, 75)));
}
