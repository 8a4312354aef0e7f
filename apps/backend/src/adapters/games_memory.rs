use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;
use tracing::debug;

use crate::domain::game::{Game, GameId, NewGame};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::games::{GameRepo, GameUpdate};

/// Game store backed by a `DashMap`.
///
/// The version check and the write in [`GameRepo::save`] run while holding the
/// entry's shard lock, so a save is an atomic compare-and-swap.
#[derive(Debug)]
pub struct InMemoryGameRepo {
    games: DashMap<GameId, Game>,
    next_id: AtomicI64,
}

impl InMemoryGameRepo {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Put a game in place as-is, replacing any game with the same id.
    /// Intended for seeding fixtures.
    pub fn insert(&self, game: Game) {
        self.next_id.fetch_max(game.id.get() + 1, Ordering::SeqCst);
        self.games.insert(game.id, game);
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for InMemoryGameRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepo for InMemoryGameRepo {
    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, game: NewGame) -> Result<Game, DomainError> {
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = GameId::try_from(raw).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("ID_SEQUENCE".into()),
                format!("id sequence produced {raw}: {e}"),
            )
        })?;
        let game = game.into_game(id);
        self.games.insert(id, game.clone());
        debug!(game_id = %id, "game stored");
        Ok(game)
    }

    async fn save(&self, update: GameUpdate) -> Result<Game, DomainError> {
        let mut entry = self.games.get_mut(&update.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {} not found", update.id))
        })?;
        let game = entry.value_mut();

        if game.lock_version != update.expected_version {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Resource was modified concurrently (expected version {}, actual version {})",
                    update.expected_version, game.lock_version
                ),
            ));
        }

        update.apply_to(game);
        game.lock_version += 1;
        game.updated_at = OffsetDateTime::now_utc();
        Ok(game.clone())
    }
}
