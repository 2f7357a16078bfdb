use std::sync::Arc;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    player::{Player, PlayerRepository},
};

#[async_trait::async_trait]
pub trait GetPlayerUseCase {
    async fn get_player(&self, id: PlayerId) -> Result<Player, GetPlayerError>;
}

#[derive(Debug)]
pub enum GetPlayerError {
    NotFound,
    RepositoryError,
}

pub struct GetPlayerUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
}

impl<PR: PlayerRepository> GetPlayerUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> GetPlayerUseCase for GetPlayerUseCaseImpl<PR> {
    async fn get_player(&self, id: PlayerId) -> Result<Player, GetPlayerError> {
        match self.player_repository.find_by_id(id).await {
            Ok(player) => Ok(player),
            Err(RepoRetrieveError::NotFound) => Err(GetPlayerError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load player {}: {}", id, e);
                Err(GetPlayerError::RepositoryError)
            }
        }
    }
}
