use std::sync::Arc;

use crate::domain::{
    RepoError,
    player::{Player, PlayerRepository},
    validation::{InvalidPlayer, PlayerCandidate},
};

#[async_trait::async_trait]
pub trait CreatePlayerUseCase {
    async fn create_player(&self, candidate: PlayerCandidate) -> Result<Player, CreatePlayerError>;
}

#[derive(Debug)]
pub enum CreatePlayerError {
    Invalid(InvalidPlayer),
    RepositoryError,
}

pub struct CreatePlayerUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
}

impl<PR: PlayerRepository> CreatePlayerUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> CreatePlayerUseCase
    for CreatePlayerUseCaseImpl<PR>
{
    async fn create_player(&self, candidate: PlayerCandidate) -> Result<Player, CreatePlayerError> {
        let record = candidate
            .into_record()
            .map_err(CreatePlayerError::Invalid)?;
        match self.player_repository.insert(record).await {
            Ok(player) => {
                log::info!("Created player {} ({})", player.id, player.name);
                Ok(player)
            }
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to store new player: {}", e);
                Err(CreatePlayerError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{
        PlayerId,
        player::{Profession, Race, tests::MockPlayerRepository},
        validation::PlayerField,
    };

    fn candidate() -> PlayerCandidate {
        PlayerCandidate {
            name: Some("Arwen".to_string()),
            title: Some("Evenstar".to_string()),
            race: Some(Race::Elf),
            profession: Some(Profession::Druid),
            birthday: Some(Utc.with_ymd_and_hms(2020, 2, 2, 0, 0, 0).unwrap()),
            banned: None,
            experience: Some(100),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_progress() {
        let repo = Arc::new(MockPlayerRepository::default());
        let use_case = CreatePlayerUseCaseImpl::new(repo.clone());

        let player = use_case.create_player(candidate()).await.unwrap();
        assert_eq!(player.id, PlayerId(1));
        assert!(!player.banned);
        assert_eq!(player.progress.level(), 1);
        assert_eq!(player.progress.until_next_level(), 200);
        assert_eq!(repo.snapshot(), vec![player.clone()]);

        let second = use_case.create_player(candidate()).await.unwrap();
        assert_eq!(second.id, PlayerId(2));
    }

    #[tokio::test]
    async fn test_invalid_candidate_is_not_stored() {
        let repo = Arc::new(MockPlayerRepository::default());
        let use_case = CreatePlayerUseCaseImpl::new(repo.clone());

        let invalid = PlayerCandidate {
            name: Some("ab".to_string()),
            title: Some("t".repeat(31)),
            ..candidate()
        };
        match use_case.create_player(invalid).await {
            Err(CreatePlayerError::Invalid(err)) => {
                assert_eq!(err.fields, vec![PlayerField::Title])
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let use_case = CreatePlayerUseCaseImpl::new(Arc::new(MockPlayerRepository::failing()));
        assert!(matches!(
            use_case.create_player(candidate()).await,
            Err(CreatePlayerError::RepositoryError)
        ));
    }
}
