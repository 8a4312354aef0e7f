//! Closed game-rule error taxonomy.
//!
//! Raised by the game service after inspecting state, before any lifecycle
//! transform runs. The lifecycle engine itself only ever produces
//! [`GameError::CouldNotDetermineCurrentPlayer`].

use thiserror::Error;

use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Invalid game ID")]
    InvalidGameId,
    #[error("Game is not active")]
    GameNotActive,
    #[error("Game has not started yet")]
    GameHasNotStarted,
    #[error("Game has already started")]
    GameAlreadyStarted,
    #[error("Only the game creator can perform this action")]
    NotGameCreator,
    #[error("Minimum number of players has not been reached")]
    MinimumPlayersRequired,
    #[error("Not all players are ready")]
    NotAllPlayersReady,
    #[error("Game is full")]
    GameFull,
    #[error("User is already in this game")]
    UserAlreadyInGame,
    #[error("User is not in this game")]
    UserNotInGame,
    #[error("{0}")]
    CannotPerformAction(String),
    #[error("Could not determine the current player")]
    CouldNotDetermineCurrentPlayer,
    #[error("Game is not accepting new players")]
    GameNotAcceptingPlayers,
}

impl GameError {
    pub fn cannot_perform(reason: impl Into<String>) -> Self {
        Self::CannotPerformAction(reason.into())
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            GameError::GameNotFound => ErrorCode::GameNotFound,
            GameError::InvalidGameId => ErrorCode::InvalidGameId,
            GameError::GameNotActive => ErrorCode::GameNotActive,
            GameError::GameHasNotStarted => ErrorCode::GameHasNotStarted,
            GameError::GameAlreadyStarted => ErrorCode::GameAlreadyStarted,
            GameError::NotGameCreator => ErrorCode::NotGameCreator,
            GameError::MinimumPlayersRequired => ErrorCode::MinimumPlayersRequired,
            GameError::NotAllPlayersReady => ErrorCode::NotAllPlayersReady,
            GameError::GameFull => ErrorCode::GameFull,
            GameError::UserAlreadyInGame => ErrorCode::UserAlreadyInGame,
            GameError::UserNotInGame => ErrorCode::UserNotInGame,
            GameError::CannotPerformAction(_) => ErrorCode::CannotPerformAction,
            GameError::CouldNotDetermineCurrentPlayer => {
                ErrorCode::CouldNotDetermineCurrentPlayer
            }
            GameError::GameNotAcceptingPlayers => ErrorCode::GameNotAcceptingPlayers,
        }
    }

    /// Whether this error is an internal invariant violation rather than a
    /// player-facing rule rejection.
    pub const fn is_internal(&self) -> bool {
        matches!(self, GameError::CouldNotDetermineCurrentPlayer)
    }
}
