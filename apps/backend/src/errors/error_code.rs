//! Error codes for the game backend.
//!
//! Every error that can leave the service layer carries one of these codes.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! Codes are SCREAMING_SNAKE_CASE and appear in structured logs.

use core::fmt;

/// Centralized error codes.
///
/// The first block is the closed game taxonomy; the rest cover storage and
/// system failures that never reach players verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Game taxonomy
    GameNotFound,
    InvalidGameId,
    GameNotActive,
    GameHasNotStarted,
    GameAlreadyStarted,
    NotGameCreator,
    MinimumPlayersRequired,
    NotAllPlayersReady,
    GameFull,
    UserAlreadyInGame,
    UserNotInGame,
    CannotPerformAction,
    /// Internal invariant violation surfaced as data
    CouldNotDetermineCurrentPlayer,
    GameNotAcceptingPlayers,

    // Storage
    /// Optimistic lock conflict that survived the retry budget
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,
    /// Record missing in storage terms
    RecordNotFound,
    /// Storage backend unavailable
    StorageUnavailable,
    /// Storage backend timed out
    StorageTimeout,
    /// Stored data failed validation on load
    DataCorruption,

    // System
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::GameHasNotStarted => "GAME_HAS_NOT_STARTED",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::NotGameCreator => "NOT_GAME_CREATOR",
            Self::MinimumPlayersRequired => "MINIMUM_PLAYERS_REQUIRED",
            Self::NotAllPlayersReady => "NOT_ALL_PLAYERS_READY",
            Self::GameFull => "GAME_FULL",
            Self::UserAlreadyInGame => "USER_ALREADY_IN_GAME",
            Self::UserNotInGame => "USER_NOT_IN_GAME",
            Self::CannotPerformAction => "CANNOT_PERFORM_ACTION",
            Self::CouldNotDetermineCurrentPlayer => "COULD_NOT_DETERMINE_CURRENT_PLAYER",
            Self::GameNotAcceptingPlayers => "GAME_NOT_ACCEPTING_PLAYERS",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::StorageTimeout => "STORAGE_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
