use crate::domain::fixtures::CardFixtures;
use crate::domain::game::{CreateGameRequest, GameStatus, TurnDirection};
use crate::domain::lifecycle::{
    abandon_game, add_player, advance_turn, apply_end_game, create_end_game_payload,
    create_initial_game, determine_post_abandonment_action, get_current_player, has_player_won,
    mark_player_as_ready, push_discard, reassign_creator, remove_player_from_game, start_game,
    top_card, AbandonmentAction,
};
use crate::domain::test_state_helpers::{active_game, positions, roster, waiting_game};
use crate::errors::GameError;

#[test]
fn initial_game_admits_creator_ready_at_position_one() {
    let request = CreateGameRequest {
        title: "  Friday night  ".to_string(),
        rules: "house rules".to_string(),
        min_players: 2,
        max_players: 4,
    };
    let seed = create_initial_game(&request, 42, None, time::OffsetDateTime::now_utc());
    assert_eq!(seed.title, "Friday night");
    assert_eq!(seed.creator_id, 42);
    assert_eq!(seed.players.len(), 1);
    assert!(seed.players[0].ready);
    assert_eq!(seed.players[0].position, 1);

    let game = seed.into_game(crate::domain::GameId::try_from(9).unwrap());
    assert_eq!(game.status, GameStatus::Waiting);
    assert_eq!(game.winner_id, None);
    assert!(game.discard_pile.is_empty());
}

#[test]
fn add_player_appends_unready_entry() {
    let mut game = waiting_game(&[1]);
    add_player(&mut game, 2);
    add_player(&mut game, 3);
    assert_eq!(roster(&game), vec![1, 2, 3]);
    assert_eq!(positions(&game), vec![1, 2, 3]);
    assert!(!game.players[1].ready);
}

#[test]
fn mark_ready_is_noop_for_unknown_player() {
    let mut game = waiting_game(&[1, 2]);
    mark_player_as_ready(&mut game, 99);
    assert_eq!(game.ready_count(), 1);
    mark_player_as_ready(&mut game, 2);
    assert!(game.all_ready());
}

#[test]
fn start_resets_turn_state() {
    let mut game = waiting_game(&[5, 6, 7]);
    game.current_player_index = 2;
    game.turn_direction = TurnDirection::Reverse;
    start_game(&mut game);
    assert_eq!(game.status, GameStatus::Active);
    assert_eq!(game.current_player_index, 0);
    assert_eq!(game.turn_direction, TurnDirection::Forward);
    assert_eq!(positions(&game), vec![1, 2, 3]);
}

#[test]
fn current_player_on_empty_roster_is_typed_error() {
    let mut game = active_game(&[1]);
    game.players.clear();
    assert_eq!(
        get_current_player(&game),
        Err(GameError::CouldNotDetermineCurrentPlayer)
    );
    assert_eq!(
        advance_turn(&mut game),
        Err(GameError::CouldNotDetermineCurrentPlayer)
    );
}

#[test]
fn advance_wraps_in_both_directions() {
    let mut game = active_game(&[1, 2, 3]);
    assert_eq!(advance_turn(&mut game), Ok(2));
    assert_eq!(advance_turn(&mut game), Ok(3));
    assert_eq!(advance_turn(&mut game), Ok(1));

    game.turn_direction = TurnDirection::Reverse;
    assert_eq!(advance_turn(&mut game), Ok(3));
    assert_eq!(game.current_player_index, 2);
}

#[test]
fn removing_player_before_current_keeps_same_player_on_turn() {
    let mut game = active_game(&[10, 20, 30, 40]);
    game.current_player_index = 2; // player 30
    remove_player_from_game(&mut game, 10);
    assert_eq!(get_current_player(&game).unwrap().player_id, 30);
    assert_eq!(positions(&game), vec![1, 2, 3]);
}

#[test]
fn removing_current_player_passes_turn_in_direction() {
    let mut game = active_game(&[10, 20, 30, 40]);
    game.current_player_index = 3; // player 40, forward wraps to 10
    remove_player_from_game(&mut game, 40);
    assert_eq!(get_current_player(&game).unwrap().player_id, 10);

    let mut game = active_game(&[10, 20, 30, 40]);
    game.turn_direction = TurnDirection::Reverse;
    game.current_player_index = 1; // player 20, reverse goes to 10
    remove_player_from_game(&mut game, 20);
    assert_eq!(get_current_player(&game).unwrap().player_id, 10);
}

#[test]
fn removing_unknown_player_changes_nothing() {
    let mut game = active_game(&[1, 2, 3]);
    game.current_player_index = 1;
    let before = game.clone();
    remove_player_from_game(&mut game, 77);
    assert_eq!(game, before);
}

#[test]
fn abandonment_classification() {
    let mut game = active_game(&[1, 2, 3]);
    assert_eq!(abandon_game(&mut game, 2), AbandonmentAction::SaveGame);
    assert_eq!(
        abandon_game(&mut game, 1),
        AbandonmentAction::EndGameWithWinner { winner_id: 3 }
    );
    let last = abandon_game(&mut game, 3);
    assert_eq!(last, AbandonmentAction::EndGameNoWinner);
    assert_eq!(last.winner_id(), None);
    assert_eq!(determine_post_abandonment_action(&game), last);
}

#[test]
fn creatorship_moves_to_first_seat_only_after_creator_leaves() {
    let mut game = waiting_game(&[1, 2, 3]);
    remove_player_from_game(&mut game, 2);
    reassign_creator(&mut game);
    assert_eq!(game.creator_id, 1);

    remove_player_from_game(&mut game, 1);
    reassign_creator(&mut game);
    assert_eq!(game.creator_id, 3);

    remove_player_from_game(&mut game, 3);
    reassign_creator(&mut game);
    assert_eq!(game.creator_id, 3);
}

#[test]
fn end_game_payload_applies_terminal_fields() {
    let mut game = active_game(&[1, 2]);
    let payload = create_end_game_payload(Some(2));
    assert_eq!(payload.status, GameStatus::Ended);
    apply_end_game(&mut game, &payload);
    assert_eq!(game.status, GameStatus::Ended);
    assert_eq!(game.winner_id, Some(2));
    assert_eq!(game.ended_at, Some(payload.ended_at));
}

#[test]
fn win_predicate() {
    assert!(has_player_won(0));
    assert!(!has_player_won(1));
}

#[test]
fn discard_pile_orders_and_top() {
    let mut game = active_game(&[1, 2]);
    assert_eq!(top_card(&game), Some(CardFixtures::one("red:0")));

    let now = time::OffsetDateTime::now_utc();
    let first = push_discard(&mut game, CardFixtures::one("red:5"), Some(1), now).clone();
    let second = push_discard(&mut game, CardFixtures::one("blue:5"), None, now).clone();
    assert_eq!(first.order, 1);
    assert_eq!(second.order, 2);
    assert_ne!(first.card_id, second.card_id);
    assert_eq!(second.played_by, None);
    assert_eq!(top_card(&game), Some(CardFixtures::one("blue:5")));
}
