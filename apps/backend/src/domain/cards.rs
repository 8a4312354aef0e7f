//! Card types, legality check against the discard top, and display names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outcome::Outcome;

pub const CARD_MISMATCH_MESSAGE: &str =
    "The card does not match the color or value of the top card.";
pub const UNKNOWN_CARD_NAME: &str = "Unknown Card";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardRuleError {
    #[error("{}", CARD_MISMATCH_MESSAGE)]
    Mismatch,
    #[error("invalid card: {0}")]
    Parse(String),
    #[error("invalid card: {color} cannot carry value {value}")]
    InvalidCombination { color: Color, value: CardValue },
}

/// Card color. Stored and compared in lowercase; `black` is accepted as an
/// alias of `wild` on input.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

impl Color {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Wild => "wild",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = CardRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "blue" => Ok(Color::Blue),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "wild" | "black" => Ok(Color::Wild),
            other => Err(CardRuleError::Parse(format!("unknown color '{other}'"))),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = CardRuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CardValue {
    /// Face value 0..=9
    Number(u8),
    Skip,
    Reverse,
    Draw2,
    Wild,
    WildDraw4,
}

impl CardValue {
    pub fn number(n: u8) -> Result<Self, CardRuleError> {
        if n <= 9 {
            Ok(CardValue::Number(n))
        } else {
            Err(CardRuleError::Parse(format!("number card out of range: {n}")))
        }
    }

    pub const fn card_type(&self) -> CardType {
        match self {
            CardValue::Number(_) => CardType::Number,
            CardValue::Skip | CardValue::Reverse | CardValue::Draw2 => CardType::Action,
            CardValue::Wild | CardValue::WildDraw4 => CardType::Wild,
        }
    }

    pub const fn is_wild(&self) -> bool {
        matches!(self, CardValue::Wild | CardValue::WildDraw4)
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Number(n) => write!(f, "{n}"),
            CardValue::Skip => f.write_str("skip"),
            CardValue::Reverse => f.write_str("reverse"),
            CardValue::Draw2 => f.write_str("draw2"),
            CardValue::Wild => f.write_str("wild"),
            CardValue::WildDraw4 => f.write_str("wild_draw4"),
        }
    }
}

impl FromStr for CardValue {
    type Err = CardRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "skip" => Ok(CardValue::Skip),
            "reverse" => Ok(CardValue::Reverse),
            "draw2" => Ok(CardValue::Draw2),
            "wild" => Ok(CardValue::Wild),
            "wild_draw4" => Ok(CardValue::WildDraw4),
            digits => digits
                .parse::<u8>()
                .map_err(|_| CardRuleError::Parse(format!("unknown value '{digits}'")))
                .and_then(CardValue::number),
        }
    }
}

impl TryFrom<String> for CardValue {
    type Error = CardRuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardValue> for String {
    fn from(value: CardValue) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Number,
    Action,
    Wild,
}

/// A card face. The type is derived from the value; color is `wild` exactly
/// when the value is `wild` or `wild_draw4`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRecord", into = "CardRecord")]
pub struct Card {
    color: Color,
    value: CardValue,
}

/// Wire form of a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub color: Color,
    pub value: CardValue,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
}

impl Card {
    pub fn new(color: Color, value: CardValue) -> Result<Self, CardRuleError> {
        if (color == Color::Wild) != value.is_wild() {
            return Err(CardRuleError::InvalidCombination { color, value });
        }
        Ok(Self { color, value })
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn value(&self) -> CardValue {
        self.value
    }

    pub const fn card_type(&self) -> CardType {
        self.value.card_type()
    }

    /// Human label with both parts capitalised, e.g. `"Red Skip"`.
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            capitalize(self.color.as_str()),
            capitalize(&self.value.to_string())
        )
    }
}

impl TryFrom<CardRecord> for Card {
    type Error = CardRuleError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let card = Card::new(record.color, record.value)?;
        match record.card_type {
            Some(declared) if declared != card.card_type() => Err(CardRuleError::Parse(format!(
                "declared type {declared:?} does not match value {}",
                card.value
            ))),
            _ => Ok(card),
        }
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        CardRecord {
            color: card.color,
            value: card.value,
            card_type: Some(card.card_type()),
        }
    }
}

/// Parses `"color:value"`, e.g. `"red:5"` or `"wild:wild_draw4"`.
impl FromStr for Card {
    type Err = CardRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (color, value) = s
            .split_once(':')
            .ok_or_else(|| CardRuleError::Parse(format!("expected color:value, got '{s}'")))?;
        Card::new(color.parse()?, value.parse()?)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.color, self.value)
    }
}

/// Whether `candidate` may be played on `top`.
///
/// Wild cards are always playable; otherwise color or value must match.
pub fn can_play_card(candidate: &Card, top: &Card) -> Outcome<bool, CardRuleError> {
    if candidate.card_type() == CardType::Wild
        || candidate.color == top.color
        || candidate.value == top.value
    {
        Ok(true)
    } else {
        Err(CardRuleError::Mismatch)
    }
}

/// `"{UPPERCASED_COLOR} {value}"`, or `"Unknown Card"` when absent.
pub fn format_card_name(card: Option<&Card>) -> String {
    card.map_or_else(
        || UNKNOWN_CARD_NAME.to_string(),
        |c| format!("{} {}", c.color.as_str().to_uppercase(), c.value),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
