//! Game storage seam consumed by the game service.

use async_trait::async_trait;

use crate::domain::game::{
    Game, GameId, GameStatus, NewGame, PlayedCard, PlayerEntry, TurnDirection, UserId,
};
use crate::domain::lifecycle::EndGamePayload;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Partial write against a stored game, guarded by the version it was read at.
///
/// Fields left `None` are not touched. A save bumps `lock_version` and
/// `updated_at`; it fails with an optimistic-lock conflict if the stored
/// version no longer equals `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameUpdate {
    pub id: GameId,
    pub expected_version: i32,
    pub status: Option<GameStatus>,
    pub creator_id: Option<UserId>,
    pub players: Option<Vec<PlayerEntry>>,
    pub current_player_index: Option<usize>,
    pub turn_direction: Option<TurnDirection>,
    pub discard_pile: Option<Vec<PlayedCard>>,
    pub end_game: Option<EndGamePayload>,
}

impl GameUpdate {
    pub fn new(id: GameId, expected_version: i32) -> Self {
        Self {
            id,
            expected_version,
            status: None,
            creator_id: None,
            players: None,
            current_player_index: None,
            turn_direction: None,
            discard_pile: None,
            end_game: None,
        }
    }

    /// Full write of every mutable field of a transformed aggregate, expecting
    /// the version it was loaded at.
    pub fn from_game(game: &Game) -> Self {
        let update = Self::new(game.id, game.lock_version)
            .with_status(game.status)
            .with_creator_id(game.creator_id)
            .with_players(game.players.clone())
            .with_current_player_index(game.current_player_index)
            .with_turn_direction(game.turn_direction)
            .with_discard_pile(game.discard_pile.clone());
        match (game.status, game.ended_at) {
            (GameStatus::Ended, Some(ended_at)) => update.with_end_game(EndGamePayload {
                status: GameStatus::Ended,
                ended_at,
                winner_id: game.winner_id,
            }),
            _ => update,
        }
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_creator_id(mut self, creator_id: UserId) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    pub fn with_players(mut self, players: Vec<PlayerEntry>) -> Self {
        self.players = Some(players);
        self
    }

    pub fn with_current_player_index(mut self, index: usize) -> Self {
        self.current_player_index = Some(index);
        self
    }

    pub fn with_turn_direction(mut self, direction: TurnDirection) -> Self {
        self.turn_direction = Some(direction);
        self
    }

    pub fn with_discard_pile(mut self, pile: Vec<PlayedCard>) -> Self {
        self.discard_pile = Some(pile);
        self
    }

    pub fn with_end_game(mut self, payload: EndGamePayload) -> Self {
        self.status = Some(payload.status);
        self.end_game = Some(payload);
        self
    }

    /// Write the carried fields onto `game`. Version bookkeeping is left to
    /// the store.
    pub fn apply_to(self, game: &mut Game) {
        if let Some(status) = self.status {
            game.status = status;
        }
        if let Some(creator_id) = self.creator_id {
            game.creator_id = creator_id;
        }
        if let Some(players) = self.players {
            game.players = players;
        }
        if let Some(index) = self.current_player_index {
            game.current_player_index = index;
        }
        if let Some(direction) = self.turn_direction {
            game.turn_direction = direction;
        }
        if let Some(pile) = self.discard_pile {
            game.discard_pile = pile;
        }
        if let Some(payload) = self.end_game {
            game.status = payload.status;
            game.ended_at = Some(payload.ended_at);
            game.winner_id = payload.winner_id;
        }
    }
}

#[async_trait]
pub trait GameRepo: Send + Sync {
    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, DomainError>;

    /// Store a new game, assigning its id and initial version.
    async fn create(&self, game: NewGame) -> Result<Game, DomainError>;

    /// Apply an update with optimistic locking and return the stored game.
    async fn save(&self, update: GameUpdate) -> Result<Game, DomainError>;
}

/// Find game by ID or return a not-found error.
pub async fn require_game(repo: &dyn GameRepo, id: GameId) -> Result<Game, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found")))
}
