//! Pure lifecycle transitions over the game aggregate.
//!
//! Nothing here performs I/O or enforces admission rules; the game service
//! checks preconditions first, after which every transform is safe to apply.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::cards::Card;
use crate::domain::game::{
    CreateGameRequest, Game, GameStatus, NewGame, PlayedCard, PlayerEntry, TurnDirection, UserId,
};
use crate::errors::GameError;
use crate::outcome::Outcome;

/// What the service must do after a player left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonmentAction {
    /// Exactly one player remains and wins by default.
    EndGameWithWinner { winner_id: UserId },
    /// Nobody remains.
    EndGameNoWinner,
    /// Two or more players remain; keep playing.
    SaveGame,
}

impl AbandonmentAction {
    pub const fn winner_id(&self) -> Option<UserId> {
        match self {
            AbandonmentAction::EndGameWithWinner { winner_id } => Some(*winner_id),
            AbandonmentAction::EndGameNoWinner | AbandonmentAction::SaveGame => None,
        }
    }

    pub const fn ends_game(&self) -> bool {
        !matches!(self, AbandonmentAction::SaveGame)
    }
}

/// Fields written when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndGamePayload {
    pub status: GameStatus,
    pub ended_at: OffsetDateTime,
    pub winner_id: Option<UserId>,
}

/// Waiting-status seed with the creator admitted, ready, at position 1.
pub fn create_initial_game(
    request: &CreateGameRequest,
    creator_id: UserId,
    initial_card: Option<Card>,
    now: OffsetDateTime,
) -> NewGame {
    NewGame {
        title: request.title.trim().to_string(),
        rules: request.rules.clone(),
        min_players: request.min_players,
        max_players: request.max_players,
        creator_id,
        players: vec![PlayerEntry {
            player_id: creator_id,
            ready: true,
            position: 1,
        }],
        initial_card,
        created_at: now,
    }
}

pub fn add_player(game: &mut Game, player_id: UserId) {
    game.players.push(PlayerEntry {
        player_id,
        ready: false,
        position: 0,
    });
    renumber_positions(game);
}

pub fn mark_player_as_ready(game: &mut Game, player_id: UserId) {
    if let Some(entry) = game.players.iter_mut().find(|p| p.player_id == player_id) {
        entry.ready = true;
    }
}

pub fn start_game(game: &mut Game) {
    game.status = GameStatus::Active;
    game.current_player_index = 0;
    game.turn_direction = TurnDirection::Forward;
    renumber_positions(game);
}

/// Reassign `position = index + 1` in current list order.
pub fn renumber_positions(game: &mut Game) {
    for (index, entry) in game.players.iter_mut().enumerate() {
        entry.position = index as u32 + 1;
    }
}

pub fn get_current_player(game: &Game) -> Outcome<&PlayerEntry, GameError> {
    game.players
        .get(game.current_player_index)
        .ok_or(GameError::CouldNotDetermineCurrentPlayer)
}

/// Move the turn one step in the current direction and return the new
/// current player's id. Fails instead of dividing by zero on an empty roster.
pub fn advance_turn(game: &mut Game) -> Outcome<UserId, GameError> {
    let n = game.players.len();
    if n == 0 {
        return Err(GameError::CouldNotDetermineCurrentPlayer);
    }
    game.current_player_index = step_index(game.current_player_index, game.turn_direction, n);
    get_current_player(game).map(|p| p.player_id)
}

/// Index one step from `index` in `direction` on a ring of `n` seats.
pub fn step_index(index: usize, direction: TurnDirection, n: usize) -> usize {
    debug_assert!(n > 0, "step_index requires a non-empty ring");
    let n = n as i64;
    (index as i64 + direction.step() + n).rem_euclid(n) as usize
}

/// Remove a player, renumber, and keep the turn anchored to a player
/// identity rather than a stale index.
///
/// If the removed player held the turn, it passes to whoever was next in the
/// current direction; otherwise the current player keeps it.
pub fn remove_player_from_game(game: &mut Game, player_id: UserId) {
    let Some(removed_at) = game.players.iter().position(|p| p.player_id == player_id) else {
        return;
    };
    let anchor = turn_anchor_after_removal(game, removed_at);

    game.players.remove(removed_at);
    renumber_positions(game);

    game.current_player_index = anchor
        .and_then(|id| game.players.iter().position(|p| p.player_id == id))
        .unwrap_or(0);
}

fn turn_anchor_after_removal(game: &Game, removed_at: usize) -> Option<UserId> {
    let n = game.players.len();
    let current = game.current_player_index;
    if n <= 1 || current >= n {
        return None;
    }
    if current != removed_at {
        return Some(game.players[current].player_id);
    }
    let next = step_index(current, game.turn_direction, n);
    Some(game.players[next].player_id)
}

pub fn determine_post_abandonment_action(game: &Game) -> AbandonmentAction {
    match game.players.as_slice() {
        [] => AbandonmentAction::EndGameNoWinner,
        [last] => AbandonmentAction::EndGameWithWinner {
            winner_id: last.player_id,
        },
        _ => AbandonmentAction::SaveGame,
    }
}

pub fn abandon_game(game: &mut Game, player_id: UserId) -> AbandonmentAction {
    remove_player_from_game(game, player_id);
    determine_post_abandonment_action(game)
}

/// Hand creatorship to the first remaining seat once the creator has left.
/// No-op while the creator is still seated or nobody is left.
pub fn reassign_creator(game: &mut Game) {
    if game.is_member(game.creator_id) {
        return;
    }
    if let Some(first) = game.players.first() {
        game.creator_id = first.player_id;
    }
}

pub fn create_end_game_payload(winner_id: Option<UserId>) -> EndGamePayload {
    EndGamePayload {
        status: GameStatus::Ended,
        ended_at: OffsetDateTime::now_utc(),
        winner_id,
    }
}

pub fn apply_end_game(game: &mut Game, payload: &EndGamePayload) {
    game.status = payload.status;
    game.ended_at = Some(payload.ended_at);
    game.winner_id = payload.winner_id;
}

/// Win predicate, checked by the hand tracker after every discard.
pub const fn has_player_won(hand_size: usize) -> bool {
    hand_size == 0
}

/// Append a card to the discard pile with the next order number.
pub fn push_discard(
    game: &mut Game,
    card: Card,
    played_by: Option<UserId>,
    now: OffsetDateTime,
) -> &PlayedCard {
    let order = game.discard_pile.last().map_or(1, |c| c.order + 1);
    game.discard_pile.push(PlayedCard {
        card_id: Uuid::new_v4(),
        card,
        played_by,
        played_at: now,
        order,
    });
    &game.discard_pile[game.discard_pile.len() - 1]
}

/// Card the next play is checked against: the pile top, else the initial card.
pub fn top_card(game: &Game) -> Option<Card> {
    game.discard_pile
        .last()
        .map(|c| c.card)
        .or(game.initial_card)
}
