//! Test-only game aggregate helpers for domain unit tests.

use time::macros::datetime;

use crate::domain::fixtures::CardFixtures;
use crate::domain::game::{CreateGameRequest, Game, GameId, UserId};
use crate::domain::lifecycle::{add_player, create_initial_game, mark_player_as_ready, start_game};

/// Waiting game created by `roster[0]` with the remaining ids joined (not ready).
pub fn waiting_game(roster: &[UserId]) -> Game {
    let request = CreateGameRequest {
        title: "Test table".to_string(),
        rules: String::new(),
        min_players: 2,
        max_players: 10,
    };
    let seed = create_initial_game(
        &request,
        roster[0],
        Some(CardFixtures::one("red:0")),
        datetime!(2024-01-01 12:00 UTC),
    );
    let mut game = seed.into_game(GameId::try_from(1).expect("positive id"));
    for id in &roster[1..] {
        add_player(&mut game, *id);
    }
    game
}

/// Active game with every player ready and the turn on `roster[0]`.
pub fn active_game(roster: &[UserId]) -> Game {
    let mut game = waiting_game(roster);
    for id in roster {
        mark_player_as_ready(&mut game, *id);
    }
    start_game(&mut game);
    game
}

pub fn positions(game: &Game) -> Vec<u32> {
    game.players.iter().map(|p| p.position).collect()
}

pub fn roster(game: &Game) -> Vec<UserId> {
    game.players.iter().map(|p| p.player_id).collect()
}
