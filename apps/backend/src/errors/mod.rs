//! Error handling for the game backend.

pub mod domain;
pub mod error_code;
pub mod game;


pub use domain::DomainError;
pub use error_code::ErrorCode;
pub use game::GameError;
