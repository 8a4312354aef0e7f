//! Game aggregate: the game record plus its embedded roster and discard pile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::cards::Card;
use crate::errors::GameError;

/// External player identity. The aggregate references it, never owns it.
pub type UserId = i64;

/// Positive game identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct GameId(i64);

impl GameId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for GameId {
    type Error = GameError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(GameError::InvalidGameId);
        }
        Ok(GameId(value))
    }
}

impl From<GameId> for i64 {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl FromStr for GameId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| GameError::InvalidGameId)?;
        GameId::try_from(raw)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status. Moves only Waiting -> Active -> Ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Active,
    Ended,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Active => "active",
            GameStatus::Ended => "ended",
        };
        f.write_str(s)
    }
}

/// Turn direction, serialized as `1` / `-1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum TurnDirection {
    #[default]
    Forward,
    Reverse,
}

impl TurnDirection {
    pub const fn step(self) -> i64 {
        match self {
            TurnDirection::Forward => 1,
            TurnDirection::Reverse => -1,
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            TurnDirection::Forward => TurnDirection::Reverse,
            TurnDirection::Reverse => TurnDirection::Forward,
        }
    }
}

impl TryFrom<i8> for TurnDirection {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TurnDirection::Forward),
            -1 => Ok(TurnDirection::Reverse),
            other => Err(format!("turn direction must be 1 or -1, got {other}")),
        }
    }
}

impl From<TurnDirection> for i8 {
    fn from(direction: TurnDirection) -> Self {
        direction.step() as i8
    }
}

/// Roster entry. `position` is 1-based and always matches list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player_id: UserId,
    pub ready: bool,
    pub position: u32,
}

/// A card on the discard pile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card_id: Uuid,
    pub card: Card,
    /// `None` when dealt by the system rather than played.
    pub played_by: Option<UserId>,
    #[serde(with = "time::serde::rfc3339")]
    pub played_at: OffsetDateTime,
    /// 1-based, monotonic within a pile.
    pub order: u32,
}

/// Request payload for creating a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub title: String,
    #[serde(default)]
    pub rules: String,
    pub min_players: u8,
    pub max_players: u8,
}

/// Seed aggregate before storage assigns an id and version.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,
    pub rules: String,
    pub min_players: u8,
    pub max_players: u8,
    pub creator_id: UserId,
    pub players: Vec<PlayerEntry>,
    pub initial_card: Option<Card>,
    pub created_at: OffsetDateTime,
}

impl NewGame {
    /// Materialize the stored aggregate under the id storage assigned.
    pub fn into_game(self, id: GameId) -> Game {
        Game {
            id,
            title: self.title,
            rules: self.rules,
            min_players: self.min_players,
            max_players: self.max_players,
            creator_id: self.creator_id,
            status: GameStatus::Waiting,
            current_player_index: 0,
            turn_direction: TurnDirection::Forward,
            players: self.players,
            discard_pile: Vec::new(),
            initial_card: self.initial_card,
            winner_id: None,
            ended_at: None,
            created_at: self.created_at,
            updated_at: self.created_at,
            lock_version: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub rules: String,
    pub min_players: u8,
    pub max_players: u8,
    pub creator_id: UserId,
    pub status: GameStatus,
    pub current_player_index: usize,
    pub turn_direction: TurnDirection,
    pub players: Vec<PlayerEntry>,
    pub discard_pile: Vec<PlayedCard>,
    pub initial_card: Option<Card>,
    pub winner_id: Option<UserId>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Optimistic concurrency token; bumped by every successful save.
    pub lock_version: i32,
}

impl Game {
    pub fn is_member(&self, player_id: UserId) -> bool {
        self.players.iter().any(|p| p.player_id == player_id)
    }

    pub fn is_creator(&self, player_id: UserId) -> bool {
        self.creator_id == player_id
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= usize::from(self.max_players)
    }

    pub fn ready_count(&self) -> usize {
        self.players.iter().filter(|p| p.ready).count()
    }

    pub fn all_ready(&self) -> bool {
        self.players.iter().all(|p| p.ready)
    }

    pub fn has_min_players(&self) -> bool {
        self.players.len() >= usize::from(self.min_players)
    }
}
