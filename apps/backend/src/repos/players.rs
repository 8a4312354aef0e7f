//! Player display-name lookup. Used for response enrichment only.

use async_trait::async_trait;

use crate::domain::game::UserId;
use crate::errors::domain::DomainError;

#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Username for a player, or `None` if the account is unknown.
    async fn display_name(&self, player_id: UserId) -> Result<Option<String>, DomainError>;
}

pub fn fallback_display_name(player_id: UserId) -> String {
    format!("Player {player_id}")
}

pub async fn display_name_or_fallback(
    directory: &dyn PlayerDirectory,
    player_id: UserId,
) -> Result<String, DomainError> {
    Ok(directory
        .display_name(player_id)
        .await?
        .unwrap_or_else(|| fallback_display_name(player_id)))
}
