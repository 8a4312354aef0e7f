//! Lifecycle transitions derived from before/after views of a game.

use crate::domain::game::{Game, GameStatus, UserId};
use crate::domain::lifecycle::get_current_player;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub version: i32,
    pub turn: Option<UserId>,
    pub status: GameStatus,
    pub roster: Vec<UserId>,
}

impl GameLifecycleView {
    pub fn of(game: &Game) -> Self {
        let turn = match game.status {
            GameStatus::Active => get_current_player(game).ok().map(|p| p.player_id),
            GameStatus::Waiting | GameStatus::Ended => None,
        };
        Self {
            version: game.lock_version,
            turn,
            status: game.status,
            roster: game.players.iter().map(|p| p.player_id).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: UserId },

    /// Edge-triggered: Waiting -> Active
    GameStarted,

    /// Edge-triggered: !Ended -> Ended
    GameEnded { winner_id: Option<UserId> },

    /// User entered the roster
    PlayerJoined { user_id: UserId },

    /// User left the roster
    PlayerLeft { user_id: UserId },
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
    winner_id: Option<UserId>,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    for user_id in &after.roster {
        if !before.roster.contains(user_id) {
            transitions.push(GameTransition::PlayerJoined { user_id: *user_id });
        }
    }
    for user_id in &before.roster {
        if !after.roster.contains(user_id) {
            transitions.push(GameTransition::PlayerLeft { user_id: *user_id });
        }
    }

    if before.status == GameStatus::Waiting && after.status == GameStatus::Active {
        transitions.push(GameTransition::GameStarted);
    }

    if let Some(player_id) = after.turn {
        if before.turn != Some(player_id) {
            transitions.push(GameTransition::TurnBecame { player_id });
        }
    }

    if before.status != GameStatus::Ended && after.status == GameStatus::Ended {
        transitions.push(GameTransition::GameEnded { winner_id });
    }

    transitions
}
