use std::env;
use std::str::FromStr;

use crate::domain::cards::Card;
use crate::error::AppError;

pub const DEFAULT_INITIAL_CARD: &str = "red:0";
pub const DEFAULT_RECENT_DISCARDS: usize = 5;
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Tunables for the game service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameServiceConfig {
    /// Card the first play is checked against; shown by the empty discard view.
    pub initial_card: Option<Card>,
    /// Most recent discards returned by the discard views.
    pub recent_window: usize,
    /// Extra attempts after an optimistic-lock conflict before giving up.
    pub max_conflict_retries: u32,
}

impl Default for GameServiceConfig {
    fn default() -> Self {
        Self {
            initial_card: DEFAULT_INITIAL_CARD.parse().ok(),
            recent_window: DEFAULT_RECENT_DISCARDS,
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl GameServiceConfig {
    /// Read overrides from `GAME_INITIAL_CARD`, `GAME_RECENT_DISCARDS` and
    /// `GAME_MAX_CONFLICT_RETRIES`. `GAME_INITIAL_CARD=none` disables the
    /// initial card.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let initial_card = match optional_var("GAME_INITIAL_CARD")? {
            None => defaults.initial_card,
            Some(raw) if raw.eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(
                raw.parse::<Card>()
                    .map_err(|e| AppError::config(format!("GAME_INITIAL_CARD: {e}")))?,
            ),
        };

        let recent_window = parse_var("GAME_RECENT_DISCARDS")?.unwrap_or(defaults.recent_window);
        if recent_window == 0 {
            return Err(AppError::config("GAME_RECENT_DISCARDS must be at least 1"));
        }

        let max_conflict_retries =
            parse_var("GAME_MAX_CONFLICT_RETRIES")?.unwrap_or(defaults.max_conflict_retries);

        Ok(Self {
            initial_card,
            recent_window,
            max_conflict_retries,
        })
    }
}

/// Trimmed value of `name`, or `None` when unset or blank.
fn optional_var(name: &str) -> Result<Option<String>, AppError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Ok(Some(raw.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_var(name)?
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::config(format!("{name}: invalid value '{raw}': {e}")))
        })
        .transpose()
}
