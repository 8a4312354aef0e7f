//! Game service: fetch, check preconditions, apply a lifecycle transform,
//! persist against the version read, shape the response.
//!
//! Every precondition is checked here before the pure transform runs. Writes
//! that lose an optimistic-lock race are retried from a fresh fetch.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

use crate::config::game::GameServiceConfig;
use crate::domain::cards::{can_play_card, Card};
use crate::domain::game::{CreateGameRequest, Game, GameId, GameStatus, UserId};
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView};
use crate::domain::lifecycle::{
    abandon_game, add_player, advance_turn, apply_end_game, create_end_game_payload,
    create_initial_game, get_current_player, has_player_won, mark_player_as_ready, push_discard,
    reassign_creator, remove_player_from_game, start_game, top_card, AbandonmentAction,
};
use crate::error::AppError;
use crate::errors::GameError;
use crate::outcome::{AsyncOutcome, Outcome};
use crate::repos::games::{require_game, GameRepo, GameUpdate};
use crate::repos::players::{display_name_or_fallback, PlayerDirectory};
use crate::services::responses::{
    ActionResponse, DiscardCardView, DiscardTopResponse, GameCreatedResponse, GameStatusResponse,
    JoinGameResponse, LegacyDiscardTopResponse, PlayCardResponse, PlayerStatusView,
    ReadyResponse, StartGameResponse, EMPTY_DISCARD_MESSAGE,
};

pub const MIN_PLAYERS_LIMIT: u8 = 2;
pub const MAX_PLAYERS_LIMIT: u8 = 10;

/// A transform that was applied and stored.
struct Applied<R> {
    before: Game,
    after: Game,
    result: R,
}

pub struct GameService {
    games: Arc<dyn GameRepo>,
    players: Arc<dyn PlayerDirectory>,
    config: GameServiceConfig,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepo>,
        players: Arc<dyn PlayerDirectory>,
        config: GameServiceConfig,
    ) -> Self {
        Self {
            games,
            players,
            config,
        }
    }

    pub fn config(&self) -> &GameServiceConfig {
        &self.config
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_game(
        &self,
        request: CreateGameRequest,
        creator_id: UserId,
    ) -> Result<GameCreatedResponse, AppError> {
        validate_create_request(&request).map_err(|e| {
            warn!(code = %e.code(), "create rejected");
            e
        })?;

        let seed = create_initial_game(
            &request,
            creator_id,
            self.config.initial_card,
            OffsetDateTime::now_utc(),
        );
        let game = self.games.create(seed).await?;
        info!(game_id = %game.id, creator_id, "game created");

        Ok(GameCreatedResponse {
            success: true,
            message: "Game created successfully".to_string(),
            game_id: game.id,
        })
    }

    #[instrument(skip(self))]
    pub async fn join_game(
        &self,
        game_id: &str,
        user_id: UserId,
    ) -> Result<JoinGameResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let applied = self
            .run_mutation("join_game", id, |game| {
                if game.status != GameStatus::Waiting {
                    return Err(GameError::GameNotAcceptingPlayers.into());
                }
                if game.is_member(user_id) {
                    return Err(GameError::UserAlreadyInGame.into());
                }
                if game.is_full() {
                    return Err(GameError::GameFull.into());
                }
                add_player(game, user_id);
                Ok(())
            })
            .await?;

        Ok(JoinGameResponse {
            message: "Successfully joined the game".to_string(),
            game_id: id,
            current_player_count: applied.after.players.len(),
        })
    }

    #[instrument(skip(self))]
    pub async fn set_ready(
        &self,
        game_id: &str,
        user_id: UserId,
    ) -> Result<ReadyResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let applied = self
            .run_mutation("set_ready", id, |game| {
                match game.status {
                    GameStatus::Waiting => {}
                    GameStatus::Active => return Err(GameError::GameAlreadyStarted.into()),
                    GameStatus::Ended => return Err(GameError::GameNotActive.into()),
                }
                if !game.is_member(user_id) {
                    return Err(GameError::UserNotInGame.into());
                }
                mark_player_as_ready(game, user_id);
                Ok(())
            })
            .await?;

        Ok(ReadyResponse {
            success: true,
            message: "Player marked as ready".to_string(),
            players_ready_count: applied.after.ready_count(),
            total_players: applied.after.players.len(),
        })
    }

    #[instrument(skip(self))]
    pub async fn start_game(
        &self,
        game_id: &str,
        user_id: UserId,
    ) -> Result<StartGameResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let applied = self
            .run_mutation("start_game", id, |game| {
                match game.status {
                    GameStatus::Waiting => {}
                    GameStatus::Active => return Err(GameError::GameAlreadyStarted.into()),
                    GameStatus::Ended => return Err(GameError::GameNotActive.into()),
                }
                if !(game.is_member(user_id) && game.is_creator(user_id)) {
                    return Err(GameError::NotGameCreator.into());
                }
                if !game.has_min_players() {
                    return Err(GameError::MinimumPlayersRequired.into());
                }
                if !game.all_ready() {
                    return Err(GameError::NotAllPlayersReady.into());
                }
                start_game(game);
                Ok(get_current_player(game)?.player_id)
            })
            .await?;

        Ok(StartGameResponse {
            success: true,
            message: "Game started successfully".to_string(),
            current_player_id: applied.result,
        })
    }

    /// Pass the turn on. Returns the id of the new current player.
    #[instrument(skip(self))]
    pub async fn advance_turn(&self, game_id: &str, user_id: UserId) -> Result<UserId, AppError> {
        let id = parse_game_id(game_id)?;
        let applied = self
            .run_mutation("advance_turn", id, |game| {
                ensure_turn_of(game, user_id)?;
                Ok(advance_turn(game)?)
            })
            .await?;
        Ok(applied.result)
    }

    /// Play `card` on the discard pile. `remaining_hand_size` is the size of
    /// the player's hand after the card left it.
    #[instrument(skip(self))]
    pub async fn play_card(
        &self,
        game_id: &str,
        user_id: UserId,
        card: Card,
        remaining_hand_size: usize,
    ) -> Result<PlayCardResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let applied = self
            .run_mutation("play_card", id, |game| {
                ensure_turn_of(game, user_id)?;
                if let Some(top) = top_card(game) {
                    can_play_card(&card, &top)
                        .map_err(|e| GameError::cannot_perform(e.to_string()))?;
                }
                push_discard(game, card, Some(user_id), OffsetDateTime::now_utc());

                if has_player_won(remaining_hand_size) {
                    apply_end_game(game, &create_end_game_payload(Some(user_id)));
                    Ok(None)
                } else {
                    Ok(Some(advance_turn(game)?))
                }
            })
            .await?;

        let response = match applied.result {
            Some(next) => PlayCardResponse {
                success: true,
                message: "Card played successfully".to_string(),
                next_player_id: Some(next),
                winner_id: None,
            },
            None => PlayCardResponse {
                success: true,
                message: "Card played. You have won the game!".to_string(),
                next_player_id: None,
                winner_id: Some(user_id),
            },
        };
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn abandon_game(
        &self,
        game_id: &str,
        user_id: UserId,
    ) -> Result<ActionResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let applied = self
            .run_mutation("abandon_game", id, |game| {
                if game.status == GameStatus::Ended {
                    return Err(GameError::GameNotActive.into());
                }
                if !game.is_member(user_id) {
                    return Err(GameError::UserNotInGame.into());
                }

                let action = match game.status {
                    GameStatus::Active => abandon_game(game, user_id),
                    _ => {
                        remove_player_from_game(game, user_id);
                        if game.players.is_empty() {
                            AbandonmentAction::EndGameNoWinner
                        } else {
                            AbandonmentAction::SaveGame
                        }
                    }
                };
                if action.ends_game() {
                    apply_end_game(game, &create_end_game_payload(action.winner_id()));
                } else {
                    reassign_creator(game);
                }
                Ok(action)
            })
            .await?;

        let message = match applied.result {
            AbandonmentAction::EndGameWithWinner { winner_id } => {
                format!("You have left the game. Player {winner_id} wins by default")
            }
            AbandonmentAction::EndGameNoWinner => {
                "You have left the game. The game has ended".to_string()
            }
            AbandonmentAction::SaveGame => "You have left the game".to_string(),
        };
        Ok(ActionResponse {
            success: true,
            message,
        })
    }

    /// Creator-initiated end with no winner.
    #[instrument(skip(self))]
    pub async fn end_game(
        &self,
        game_id: &str,
        user_id: UserId,
    ) -> Result<ActionResponse, AppError> {
        let id = parse_game_id(game_id)?;
        self.run_mutation("end_game", id, |game| {
            if game.status == GameStatus::Ended {
                return Err(GameError::GameNotActive.into());
            }
            if !(game.is_member(user_id) && game.is_creator(user_id)) {
                return Err(GameError::NotGameCreator.into());
            }
            apply_end_game(game, &create_end_game_payload(None));
            Ok(())
        })
        .await?;

        Ok(ActionResponse {
            success: true,
            message: "Game ended".to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn discard_top(&self, game_id: &str) -> Result<DiscardTopResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let game = self.load(id).await?;

        let recent = recent_views(&game, self.config.recent_window);
        let Some(current_top_card) = recent.first().cloned() else {
            return Ok(DiscardTopResponse::Empty {
                game_id: id,
                top_card: None,
                message: EMPTY_DISCARD_MESSAGE.to_string(),
                discard_pile_size: 0,
                initial_card: game.initial_card.or(self.config.initial_card),
            });
        };

        Ok(DiscardTopResponse::Populated {
            game_id: id,
            current_top_card,
            recent_cards: recent,
            discard_pile_size: game.discard_pile.len(),
        })
    }

    /// Older discard view: `{game_ids:[id], top_cards:["Red Skip"]}`.
    #[instrument(skip(self))]
    pub async fn legacy_discard_top(
        &self,
        game_id: &str,
    ) -> Result<LegacyDiscardTopResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let game = self.load(id).await?;
        let top_cards = game
            .discard_pile
            .last()
            .map(|played| vec![played.card.label()])
            .unwrap_or_default();

        Ok(LegacyDiscardTopResponse {
            game_ids: vec![id],
            top_cards,
        })
    }

    /// Up to `limit` discards, newest first. `limit` is capped at the
    /// configured window.
    #[instrument(skip(self))]
    pub async fn recent_discards(
        &self,
        game_id: &str,
        limit: usize,
    ) -> Result<Vec<DiscardCardView>, AppError> {
        let id = parse_game_id(game_id)?;
        let game = self.load(id).await?;
        Ok(recent_views(&game, limit.min(self.config.recent_window)))
    }

    #[instrument(skip(self))]
    pub async fn game_status(&self, game_id: &str) -> Result<GameStatusResponse, AppError> {
        let id = parse_game_id(game_id)?;
        let game = self.load(id).await?;

        let mut players = Vec::with_capacity(game.players.len());
        for entry in &game.players {
            let username = display_name_or_fallback(self.players.as_ref(), entry.player_id).await?;
            players.push(PlayerStatusView {
                player_id: entry.player_id,
                username,
                ready: entry.ready,
                position: entry.position,
            });
        }

        let current_player_id = match game.status {
            GameStatus::Active => Some(get_current_player(&game)?.player_id),
            GameStatus::Waiting | GameStatus::Ended => None,
        };

        Ok(GameStatusResponse {
            game_id: id,
            title: game.title.clone(),
            status: game.status,
            current_player_id,
            turn_direction: game.turn_direction,
            players,
            winner_id: game.winner_id,
            discard_pile_size: game.discard_pile.len(),
        })
    }

    async fn load(&self, id: GameId) -> Outcome<Game, AppError> {
        Ok(require_game(self.games.as_ref(), id).await?)
    }

    /// Fetch, transform a copy with `step`, and save it against the version
    /// that was read. Conflicting saves are retried from a fresh fetch up to
    /// `max_conflict_retries` times.
    async fn run_mutation<R, F>(
        &self,
        op: &'static str,
        id: GameId,
        step: F,
    ) -> Result<Applied<R>, AppError>
    where
        R: Send,
        F: Fn(&mut Game) -> Outcome<R, AppError> + Send + Sync,
    {
        let step = &step;
        let mut retries = 0;
        loop {
            let attempt = AsyncOutcome::new(self.load(id))
                .chain_sync(move |before| {
                    let mut after = before.clone();
                    step(&mut after).map(|result| (before, after, result))
                })
                .chain(move |(before, after, result)| async move {
                    self.games
                        .save(GameUpdate::from_game(&after))
                        .await
                        .map(|saved| Applied {
                            before,
                            after: saved,
                            result,
                        })
                        .map_err(AppError::from)
                })
                .tap(|applied| log_transitions(op, &applied.before, &applied.after))
                .await;

            match attempt {
                Err(e) if e.is_optimistic_lock() && retries < self.config.max_conflict_retries => {
                    retries += 1;
                    warn!(op, game_id = %id, retries, "version conflict, retrying");
                }
                Err(e) => {
                    if e.game_error().is_some() && !e.status().is_server_error() {
                        warn!(op, game_id = %id, code = %e.code(), "precondition failed");
                    }
                    return Err(e);
                }
                Ok(applied) => return Ok(applied),
            }
        }
    }
}

fn parse_game_id(raw: &str) -> Result<GameId, AppError> {
    raw.parse::<GameId>().map_err(AppError::from)
}

fn validate_create_request(request: &CreateGameRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(GameError::cannot_perform("Game title is required").into());
    }
    let (min, max) = (request.min_players, request.max_players);
    if min < MIN_PLAYERS_LIMIT || max > MAX_PLAYERS_LIMIT || min > max {
        return Err(GameError::cannot_perform(format!(
            "Player limits must satisfy {MIN_PLAYERS_LIMIT} <= min <= max <= {MAX_PLAYERS_LIMIT}"
        ))
        .into());
    }
    Ok(())
}

/// Turn-taking guard shared by advance and play.
fn ensure_turn_of(game: &Game, user_id: UserId) -> Outcome<(), GameError> {
    match game.status {
        GameStatus::Active => {}
        GameStatus::Waiting => return Err(GameError::GameHasNotStarted),
        GameStatus::Ended => return Err(GameError::GameNotActive),
    }
    if !game.is_member(user_id) {
        return Err(GameError::UserNotInGame);
    }
    if get_current_player(game)?.player_id != user_id {
        return Err(GameError::cannot_perform("It is not your turn"));
    }
    Ok(())
}

fn recent_views(game: &Game, limit: usize) -> Vec<DiscardCardView> {
    game.discard_pile
        .iter()
        .rev()
        .take(limit)
        .map(DiscardCardView::from)
        .collect()
}

fn log_transitions(op: &'static str, before: &Game, after: &Game) {
    let before_view = GameLifecycleView::of(before);
    let after_view = GameLifecycleView::of(after);
    debug!(
        op,
        game_id = %after.id,
        from_version = before_view.version,
        to_version = after_view.version,
        "game saved"
    );
    let transitions = derive_game_transitions(&before_view, &after_view, after.winner_id);
    for transition in transitions {
        info!(op, game_id = %after.id, ?transition, "game transition");
    }
}
