use std::sync::Arc;

use crate::domain::{
    RepoError,
    player::{Player, PlayerRepository},
    query::{Pagination, PlayerCriteria, PlayerOrder, filter_players, sort_players},
};

#[async_trait::async_trait]
pub trait ListPlayersUseCase {
    async fn list_players(
        &self,
        criteria: PlayerCriteria,
        order: Option<PlayerOrder>,
        pagination: Pagination,
    ) -> Result<Vec<Player>, ListPlayersError>;
}

#[derive(Debug)]
pub enum ListPlayersError {
    RepositoryError,
}

pub struct ListPlayersUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
}

impl<PR: PlayerRepository> ListPlayersUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> ListPlayersUseCase
    for ListPlayersUseCaseImpl<PR>
{
    async fn list_players(
        &self,
        criteria: PlayerCriteria,
        order: Option<PlayerOrder>,
        pagination: Pagination,
    ) -> Result<Vec<Player>, ListPlayersError> {
        let players = match self.player_repository.find_all().await {
            Ok(players) => players,
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to load players: {}", e);
                return Err(ListPlayersError::RepositoryError);
            }
        };
        let mut players = filter_players(players, &criteria);
        sort_players(&mut players, order);
        Ok(pagination.apply(players))
    }
}
