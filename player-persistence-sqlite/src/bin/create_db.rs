use chrono::{TimeZone, Utc};
use player_persistence_sqlite::{create_schema, players::SqlitePlayerRepository};
use player_server_app::domain::{
    player::{PlayerRepository, Profession, Race},
    validation::PlayerCandidate,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let players_db_path = std::env::var("PLAYER_DB").expect("PLAYER_DB env var not set");

    let parent = std::path::Path::new(&players_db_path).parent();
    if let Some(parent) = parent.filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory for player DB");
        println!(
            "Created parent directory for player DB at {}",
            parent.display()
        );
    }

    if std::path::Path::new(&players_db_path).exists() {
        std::fs::remove_file(&players_db_path).expect("Failed to remove existing player DB");
        println!("Removed existing player DB at {}", players_db_path);
    }

    let conn_options = SqliteConnectOptions::new()
        .filename(&players_db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(conn_options)
        .await
        .expect("Failed to create pool");
    create_schema(&pool)
        .await
        .expect("Failed to create player table");

    println!("Created new player DB at {}", players_db_path);

    let repo = SqlitePlayerRepository::from_pool(pool);
    let seeds = [
        ("Ninelle", "Ancient Elven Queen", Race::Elf, Profession::Sorcerer, (2010, 10, 12), 63986),
        ("Torvald", "Keeper of the Forge", Race::Dwarf, Profession::Warrior, (2004, 3, 8), 15290),
        ("Brunhild", "Shield Maiden", Race::Human, Profession::Knight, (2007, 1, 22), 4800),
        ("Grok", "Breaker of Gates", Race::Orc, Profession::Clans, (2011, 7, 4), 990),
        ("Pim", "Quiet Wanderer", Race::Hobbit, Profession::Rogue, (2015, 5, 30), 120),
    ];
    for (name, title, race, profession, (year, month, day), experience) in seeds {
        let candidate = PlayerCandidate {
            name: Some(name.to_string()),
            title: Some(title.to_string()),
            race: Some(race),
            profession: Some(profession),
            birthday: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single(),
            banned: None,
            experience: Some(experience),
        };
        let record = candidate.into_record().expect("Seed player must be valid");
        let player = repo
            .insert(record)
            .await
            .expect("Failed to insert seed player");
        println!("Created player {} [{}]", player.name, player.id);
    }
}
