use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::game::UserId;
use crate::errors::domain::DomainError;
use crate::repos::players::PlayerDirectory;

/// Username table held in memory.
#[derive(Debug, Default)]
pub struct InMemoryPlayerDirectory {
    names: RwLock<HashMap<UserId, String>>,
}

impl InMemoryPlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = (UserId, S)>,
        S: Into<String>,
    {
        let directory = Self::new();
        for (id, name) in names {
            directory.register(id, name);
        }
        directory
    }

    pub fn register(&self, player_id: UserId, name: impl Into<String>) {
        self.names.write().insert(player_id, name.into());
    }
}

#[async_trait]
impl PlayerDirectory for InMemoryPlayerDirectory {
    async fn display_name(&self, player_id: UserId) -> Result<Option<String>, DomainError> {
        Ok(self.names.read().get(&player_id).cloned())
    }
}
