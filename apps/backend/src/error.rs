use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::{ErrorCode, GameError};

/// Message shown for every failure that must not leak its detail.
pub const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Message shown when a write kept losing optimistic-lock races.
pub const CONCURRENT_UPDATE_MESSAGE: &str =
    "The game was modified by another request, please try again";

/// `{success:false, message}` envelope used by lifecycle endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

/// `{error}` envelope used by discard and card endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Game(e) => e.code(),
            AppError::Conflict { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Game(e) => match e {
                GameError::GameNotFound | GameError::UserNotInGame => StatusCode::NOT_FOUND,
                GameError::GameHasNotStarted => StatusCode::PRECONDITION_FAILED,
                GameError::GameAlreadyStarted | GameError::UserAlreadyInGame => {
                    StatusCode::CONFLICT
                }
                GameError::NotGameCreator => StatusCode::FORBIDDEN,
                GameError::CouldNotDetermineCurrentPlayer => StatusCode::INTERNAL_SERVER_ERROR,
                GameError::InvalidGameId
                | GameError::GameNotActive
                | GameError::MinimumPlayersRequired
                | GameError::NotAllPlayersReady
                | GameError::GameFull
                | GameError::CannotPerformAction(_)
                | GameError::GameNotAcceptingPlayers => StatusCode::BAD_REQUEST,
            },
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to players. Internal details are replaced with a
    /// generic message.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Game(e) if e.is_internal() => GENERIC_INTERNAL_MESSAGE.to_string(),
            AppError::Game(e) => e.to_string(),
            AppError::Conflict { .. } => CONCURRENT_UPDATE_MESSAGE.to_string(),
            AppError::Internal { .. } | AppError::Config { .. } => {
                GENERIC_INTERNAL_MESSAGE.to_string()
            }
        }
    }

    pub fn failure_body(&self) -> FailureBody {
        FailureBody {
            success: false,
            message: self.public_message(),
        }
    }

    pub fn card_error_body(&self) -> CardErrorBody {
        CardErrorBody {
            error: self.public_message(),
        }
    }

    /// The rule error carried by this failure, if it is one.
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            AppError::Game(e) => Some(e),
            _ => None,
        }
    }

    /// A save lost a version race; the whole use-case may be retried.
    pub fn is_optimistic_lock(&self) -> bool {
        matches!(
            self,
            AppError::Conflict {
                code: ErrorCode::OptimisticLock,
                ..
            }
        )
    }

    pub fn internal(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Internal {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn log_if_server_error(&self) {
        if self.status().is_server_error() {
            tracing::error!(code = %self.code(), error = %self, "request failed");
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
                AppError::conflict(ErrorCode::OptimisticLock, detail)
            }
            DomainError::Conflict(_, detail) => AppError::conflict(ErrorCode::Conflict, detail),
            DomainError::NotFound(NotFoundKind::Game, _) => AppError::Game(GameError::GameNotFound),
            DomainError::NotFound(_, detail) => {
                AppError::internal(ErrorCode::RecordNotFound, detail)
            }
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::Timeout => ErrorCode::StorageTimeout,
                    InfraErrorKind::Unavailable => ErrorCode::StorageUnavailable,
                    InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                    _ => ErrorCode::Internal,
                };
                AppError::internal(code, detail)
            }
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.log_if_server_error();
        HttpResponse::build(self.status()).json(self.failure_body())
    }
}

/// Wrapper selecting the `{error}` envelope for discard/card endpoints.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct CardEndpointError(#[from] pub AppError);

impl ResponseError for CardEndpointError {
    fn status_code(&self) -> StatusCode {
        self.0.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.0.log_if_server_error();
        HttpResponse::build(self.0.status()).json(self.0.card_error_body())
    }
}
