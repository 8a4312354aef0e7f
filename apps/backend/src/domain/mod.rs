//! Domain layer: pure game logic types and helpers.

pub mod cards;
pub mod fixtures;
pub mod game;
pub mod game_transition;
pub mod lifecycle;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props_lifecycle;

// Re-exports for ergonomics
pub use cards::{can_play_card, format_card_name, Card, CardRuleError, CardType, CardValue, Color};
pub use game::{
    CreateGameRequest, Game, GameId, GameStatus, NewGame, PlayedCard, PlayerEntry, TurnDirection,
    UserId,
};
pub use game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
pub use lifecycle::{AbandonmentAction, EndGamePayload};
