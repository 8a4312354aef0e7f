//! Response shapes produced by the game service. Field names are part of the
//! wire contract: camelCase for lifecycle responses, snake_case for discard
//! and status views.

use serde::{Deserialize, Serialize, Serializer};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::cards::{Card, CardType, CardValue, Color};
use crate::domain::game::{GameId, GameStatus, PlayedCard, TurnDirection, UserId};

/// Rendered in place of a player id for cards nobody played.
pub const SYSTEM_PLAYER: &str = "system";

pub const EMPTY_DISCARD_MESSAGE: &str = "No cards have been played yet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCreatedResponse {
    pub success: bool,
    pub message: String,
    pub game_id: GameId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameResponse {
    pub message: String,
    pub game_id: GameId,
    pub current_player_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub success: bool,
    pub message: String,
    pub players_ready_count: usize,
    pub total_players: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub success: bool,
    pub message: String,
    pub current_player_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayCardResponse {
    pub success: bool,
    pub message: String,
    pub next_player_id: Option<UserId>,
    pub winner_id: Option<UserId>,
}

/// `{success, message}` for abandon and explicit end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Who put a card on the pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayedBy {
    Player(UserId),
    System,
}

impl From<Option<UserId>> for PlayedBy {
    fn from(player: Option<UserId>) -> Self {
        player.map_or(PlayedBy::System, PlayedBy::Player)
    }
}

impl Serialize for PlayedBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlayedBy::Player(id) => serializer.serialize_i64(*id),
            PlayedBy::System => serializer.serialize_str(SYSTEM_PLAYER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscardCardView {
    pub card_id: Uuid,
    pub color: Color,
    pub value: CardValue,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub played_by: PlayedBy,
    #[serde(with = "time::serde::rfc3339")]
    pub played_at: OffsetDateTime,
    pub order: u32,
}

impl From<&PlayedCard> for DiscardCardView {
    fn from(played: &PlayedCard) -> Self {
        Self {
            card_id: played.card_id,
            color: played.card.color(),
            value: played.card.value(),
            card_type: played.card.card_type(),
            played_by: played.played_by.into(),
            played_at: played.played_at,
            order: played.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DiscardTopResponse {
    Populated {
        game_id: GameId,
        current_top_card: DiscardCardView,
        recent_cards: Vec<DiscardCardView>,
        discard_pile_size: usize,
    },
    Empty {
        game_id: GameId,
        /// Always `null`; kept so clients can check one field for both shapes.
        top_card: Option<DiscardCardView>,
        message: String,
        discard_pile_size: usize,
        initial_card: Option<Card>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyDiscardTopResponse {
    pub game_ids: Vec<GameId>,
    pub top_cards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatusView {
    pub player_id: UserId,
    pub username: String,
    pub ready: bool,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatusResponse {
    pub game_id: GameId,
    pub title: String,
    pub status: GameStatus,
    pub current_player_id: Option<UserId>,
    pub turn_direction: TurnDirection,
    pub players: Vec<PlayerStatusView>,
    pub winner_id: Option<UserId>,
    pub discard_pile_size: usize,
}
