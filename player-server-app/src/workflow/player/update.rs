use std::sync::Arc;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    player::{Player, PlayerRepository},
    validation::{InvalidPlayer, PlayerPatch},
};

#[async_trait::async_trait]
pub trait UpdatePlayerUseCase {
    async fn update_player(
        &self,
        id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Player, UpdatePlayerError>;
}

#[derive(Debug)]
pub enum UpdatePlayerError {
    NotFound,
    Invalid(InvalidPlayer),
    RepositoryError,
}

pub struct UpdatePlayerUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
}

impl<PR: PlayerRepository> UpdatePlayerUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> UpdatePlayerUseCase
    for UpdatePlayerUseCaseImpl<PR>
{
    async fn update_player(
        &self,
        id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Player, UpdatePlayerError> {
        let current = match self.player_repository.find_by_id(id).await {
            Ok(player) => player,
            Err(RepoRetrieveError::NotFound) => return Err(UpdatePlayerError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load player {} for update: {}", id, e);
                return Err(UpdatePlayerError::RepositoryError);
            }
        };
        let updated = patch
            .apply_to(&current)
            .map_err(UpdatePlayerError::Invalid)?;
        match self.player_repository.update(&updated).await {
            Ok(()) => {
                log::info!("Updated player {}", id);
                Ok(updated)
            }
            // deleted between lookup and write
            Err(RepoRetrieveError::NotFound) => Err(UpdatePlayerError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to update player {}: {}", id, e);
                Err(UpdatePlayerError::RepositoryError)
            }
        }
    }
}
