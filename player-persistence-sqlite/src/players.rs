use chrono::{DateTime, Utc};
use player_server_app::domain::{
    PlayerId, RepoError, RepoRetrieveError,
    leveling::Progress,
    player::{NewPlayerRecord, Player, PlayerRepository, Profession, Race},
};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::create_player_db_pool;

pub struct SqlitePlayerRepository {
    pool: Pool<Sqlite>,
}

impl SqlitePlayerRepository {
    pub fn new() -> Self {
        let pool = create_player_db_pool();
        Self { pool }
    }

    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    fn player_from_row(row: &SqliteRow) -> Result<Player, String> {
        Self::decode_row(row).map_err(|e| {
            let id = row.try_get::<i64, _>("id").unwrap_or_default();
            log::error!("Stored player row {} is unreadable: {}", id, e);
            e
        })
    }

    fn decode_row(row: &SqliteRow) -> Result<Player, String> {
        let race: String = row.try_get("race").map_err(|e| e.to_string())?;
        let profession: String = row.try_get("profession").map_err(|e| e.to_string())?;
        let birthday: i64 = row.try_get("birthday").map_err(|e| e.to_string())?;
        let experience: i32 = row.try_get("experience").map_err(|e| e.to_string())?;
        Ok(Player {
            id: PlayerId(row.try_get("id").map_err(|e| e.to_string())?),
            name: row.try_get("name").map_err(|e| e.to_string())?,
            title: row.try_get("title").map_err(|e| e.to_string())?,
            race: race.parse::<Race>().map_err(|e| e.to_string())?,
            profession: profession
                .parse::<Profession>()
                .map_err(|e| e.to_string())?,
            birthday: DateTime::<Utc>::from_timestamp_millis(birthday)
                .ok_or_else(|| format!("birthday out of range: {}", birthday))?,
            banned: row.try_get("banned").map_err(|e| e.to_string())?,
            // level and untilNextLevel columns are derived, recompute instead of trusting them
            progress: Progress::from_experience(experience),
        })
    }
}

impl Default for SqlitePlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn find_all(&self) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query("SELECT * FROM player ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        rows.iter()
            .map(|row| Self::player_from_row(row).map_err(RepoError::StorageError))
            .collect()
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Player, RepoRetrieveError> {
        let row = sqlx::query("SELECT * FROM player WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;
        match row {
            Some(row) => Self::player_from_row(&row).map_err(RepoRetrieveError::StorageError),
            None => Err(RepoRetrieveError::NotFound),
        }
    }

    async fn insert(&self, player: NewPlayerRecord) -> Result<Player, RepoError> {
        // Id is auto-incremented
        let res = sqlx::query(
            "INSERT INTO player (name, title, race, profession, birthday, banned, experience, level, untilNextLevel) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race.as_str())
        .bind(player.profession.as_str())
        .bind(player.birthday.timestamp_millis())
        .bind(player.banned)
        .bind(player.progress.experience())
        .bind(player.progress.level())
        .bind(player.progress.until_next_level())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::StorageError(e.to_string()))?;

        Ok(player.into_player(PlayerId(res.last_insert_rowid())))
    }

    async fn update(&self, player: &Player) -> Result<(), RepoRetrieveError> {
        let res = sqlx::query(
            "UPDATE player SET name = ?, title = ?, race = ?, profession = ?, birthday = ?, banned = ?, experience = ?, level = ?, untilNextLevel = ? WHERE id = ?",
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race.as_str())
        .bind(player.profession.as_str())
        .bind(player.birthday.timestamp_millis())
        .bind(player.banned)
        .bind(player.progress.experience())
        .bind(player.progress.level())
        .bind(player.progress.until_next_level())
        .bind(player.id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(RepoRetrieveError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: PlayerId) -> Result<(), RepoRetrieveError> {
        let res = sqlx::query("DELETE FROM player WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(RepoRetrieveError::NotFound);
        }
        Ok(())
    }
}
