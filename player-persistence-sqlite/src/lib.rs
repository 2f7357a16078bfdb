use std::str::FromStr;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub mod players;

const PLAYER_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS player (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(12) NOT NULL,
    title VARCHAR(30) NOT NULL,
    race VARCHAR(20) NOT NULL,
    profession VARCHAR(20) NOT NULL,
    birthday INTEGER NOT NULL,
    banned INTEGER NOT NULL DEFAULT 0,
    experience INTEGER NOT NULL,
    level INTEGER NOT NULL,
    untilNextLevel INTEGER NOT NULL
);";

pub fn create_player_db_pool() -> Pool<Sqlite> {
    let db_path = std::env::var("PLAYER_DB").expect("PLAYER_DB env var not set");

    let conn_options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(conn_options)
}

/// A private database living as long as its single connection.
pub async fn create_in_memory_pool() -> Result<Pool<Sqlite>, sqlx::Error> {
    let conn_options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(conn_options)
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

pub async fn create_schema(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query(PLAYER_TABLE_SQL).execute(pool).await?;
    Ok(())
}
