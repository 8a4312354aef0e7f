//! Creation, admission, readiness and start.

use uno_backend::domain::{GameStatus, TurnDirection};
use uno_backend::errors::GameError;
use uno_backend::AppError;

use crate::support::table::{request, table, ALICE, BOB, CAROL, DAVE};

fn game_error(result: Result<impl std::fmt::Debug, AppError>) -> GameError {
    result
        .expect_err("expected a rule rejection")
        .game_error()
        .cloned()
        .expect("expected a game error")
}

#[tokio::test]
async fn test_create_join_ready_start() -> Result<(), AppError> {
    let t = table();
    let created = t
        .service
        .create_game(request("  Friday  ", 2, 4), ALICE)
        .await?;
    assert!(created.success);
    let id = created.game_id.to_string();

    let stored = t.stored(&id).await;
    assert_eq!(stored.title, "Friday");
    assert_eq!(stored.status, GameStatus::Waiting);
    assert_eq!(t.seats(&id).await, vec![(ALICE, 1)]);

    let joined = t.service.join_game(&id, BOB).await?;
    assert_eq!(joined.current_player_count, 2);
    assert_eq!(joined.game_id, created.game_id);

    assert_eq!(
        game_error(t.service.start_game(&id, ALICE).await),
        GameError::NotAllPlayersReady
    );

    let ready = t.service.set_ready(&id, BOB).await?;
    assert!(ready.success);
    assert_eq!(ready.players_ready_count, 2);
    assert_eq!(ready.total_players, 2);

    assert_eq!(
        game_error(t.service.start_game(&id, BOB).await),
        GameError::NotGameCreator
    );

    let started = t.service.start_game(&id, ALICE).await?;
    assert!(started.success);
    assert_eq!(started.current_player_id, ALICE);

    let stored = t.stored(&id).await;
    assert_eq!(stored.status, GameStatus::Active);
    assert_eq!(stored.current_player_index, 0);
    assert_eq!(stored.turn_direction, TurnDirection::Forward);
    assert_eq!(t.seats(&id).await, vec![(ALICE, 1), (BOB, 2)]);
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_bad_limits() {
    let t = table();
    for bad in [
        request("", 2, 4),
        request("t", 1, 4),
        request("t", 6, 4),
        request("t", 2, 11),
    ] {
        assert!(matches!(
            game_error(t.service.create_game(bad, ALICE).await),
            GameError::CannotPerformAction(_)
        ));
    }
    assert!(t.repo.is_empty());
}

#[tokio::test]
async fn test_join_preconditions() -> Result<(), AppError> {
    let t = table();

    assert_eq!(
        game_error(t.service.join_game("999", BOB).await),
        GameError::GameNotFound
    );
    assert_eq!(
        game_error(t.service.join_game("not-a-number", BOB).await),
        GameError::InvalidGameId
    );

    let id = t.create(ALICE, 2).await?;
    assert_eq!(
        game_error(t.service.join_game(&id, ALICE).await),
        GameError::UserAlreadyInGame
    );
    t.service.join_game(&id, BOB).await?;
    assert_eq!(
        game_error(t.service.join_game(&id, CAROL).await),
        GameError::GameFull
    );

    t.service.set_ready(&id, BOB).await?;
    t.service.start_game(&id, ALICE).await?;
    assert_eq!(
        game_error(t.service.join_game(&id, CAROL).await),
        GameError::GameNotAcceptingPlayers
    );
    Ok(())
}

#[tokio::test]
async fn test_start_requires_minimum_players() -> Result<(), AppError> {
    let t = table();
    let id = t.create(ALICE, 4).await?;
    assert_eq!(
        game_error(t.service.start_game(&id, ALICE).await),
        GameError::MinimumPlayersRequired
    );

    let id = t.active_with(&[ALICE, BOB]).await?;
    assert_eq!(
        game_error(t.service.start_game(&id, ALICE).await),
        GameError::GameAlreadyStarted
    );
    Ok(())
}

#[tokio::test]
async fn test_ready_preconditions() -> Result<(), AppError> {
    let t = table();
    let id = t.waiting_with(&[ALICE, BOB]).await?;
    assert_eq!(
        game_error(t.service.set_ready(&id, DAVE).await),
        GameError::UserNotInGame
    );

    t.service.set_ready(&id, BOB).await?;
    t.service.start_game(&id, ALICE).await?;
    assert_eq!(
        game_error(t.service.set_ready(&id, BOB).await),
        GameError::GameAlreadyStarted
    );

    t.service.end_game(&id, ALICE).await?;
    assert_eq!(
        game_error(t.service.set_ready(&id, BOB).await),
        GameError::GameNotActive
    );
    Ok(())
}

#[tokio::test]
async fn test_explicit_end() -> Result<(), AppError> {
    let t = table();
    let id = t.active_with(&[ALICE, BOB]).await?;

    assert_eq!(
        game_error(t.service.end_game(&id, BOB).await),
        GameError::NotGameCreator
    );

    let ended = t.service.end_game(&id, ALICE).await?;
    assert!(ended.success);
    let stored = t.stored(&id).await;
    assert_eq!(stored.status, GameStatus::Ended);
    assert_eq!(stored.winner_id, None);
    assert!(stored.ended_at.is_some());

    assert_eq!(
        game_error(t.service.end_game(&id, ALICE).await),
        GameError::GameNotActive
    );
    Ok(())
}

#[tokio::test]
async fn test_status_resolves_usernames() -> Result<(), AppError> {
    let t = table();
    let id = t.active_with(&[ALICE, DAVE]).await?;

    let status = t.service.game_status(&id).await?;
    assert_eq!(status.status, GameStatus::Active);
    assert_eq!(status.current_player_id, Some(ALICE));
    let names: Vec<_> = status.players.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "Player 4"]);
    assert_eq!(status.discard_pile_size, 0);

    let waiting = t.waiting_with(&[BOB]).await?;
    assert_eq!(t.service.game_status(&waiting).await?.current_player_id, None);
    Ok(())
}
