//! Repository traits for the domain layer.

pub mod games;
pub mod players;

pub use games::{require_game, GameRepo, GameUpdate};
pub use players::{display_name_or_fallback, PlayerDirectory};
