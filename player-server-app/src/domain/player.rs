use chrono::{DateTime, Utc};

use crate::domain::{PlayerId, RepoError, RepoRetrieveError, leveling::Progress};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

impl Race {
    pub const ALL: [Race; 7] = [
        Race::Human,
        Race::Elf,
        Race::Dwarf,
        Race::Giant,
        Race::Orc,
        Race::Troll,
        Race::Hobbit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Human => "HUMAN",
            Race::Elf => "ELF",
            Race::Dwarf => "DWARF",
            Race::Giant => "GIANT",
            Race::Orc => "ORC",
            Race::Troll => "TROLL",
            Race::Hobbit => "HOBBIT",
        }
    }
}

impl std::str::FromStr for Race {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Race::ALL
            .into_iter()
            .find(|race| race.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "race",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Clans,
    Paladin,
    Knight,
    Druid,
}

impl Profession {
    pub const ALL: [Profession; 7] = [
        Profession::Warrior,
        Profession::Rogue,
        Profession::Sorcerer,
        Profession::Clans,
        Profession::Paladin,
        Profession::Knight,
        Profession::Druid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profession::Warrior => "WARRIOR",
            Profession::Rogue => "ROGUE",
            Profession::Sorcerer => "SORCERER",
            Profession::Clans => "CLANS",
            Profession::Paladin => "PALADIN",
            Profession::Knight => "KNIGHT",
            Profession::Druid => "DRUID",
        }
    }
}

impl std::str::FromStr for Profession {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profession::ALL
            .into_iter()
            .find(|profession| profession.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "profession",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Profession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// A stored player.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTime<Utc>,
    pub banned: bool,
    pub progress: Progress,
}

/// A validated player that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPlayerRecord {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTime<Utc>,
    pub banned: bool,
    pub progress: Progress,
}

impl NewPlayerRecord {
    pub fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            name: self.name,
            title: self.title,
            race: self.race,
            profession: self.profession,
            birthday: self.birthday,
            banned: self.banned,
            progress: self.progress,
        }
    }
}

#[async_trait::async_trait]
pub trait PlayerRepository {
    /// All players in ascending id order.
    async fn find_all(&self) -> Result<Vec<Player>, RepoError>;
    async fn find_by_id(&self, id: PlayerId) -> Result<Player, RepoRetrieveError>;
    /// Stores a new player and returns it with its assigned id.
    async fn insert(&self, player: NewPlayerRecord) -> Result<Player, RepoError>;
    async fn update(&self, player: &Player) -> Result<(), RepoRetrieveError>;
    async fn delete(&self, id: PlayerId) -> Result<(), RepoRetrieveError>;
}
