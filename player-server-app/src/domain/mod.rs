use std::sync::LazyLock;

use regex::Regex;

pub mod leveling;
pub mod player;
pub mod query;
pub mod validation;

static PLAYER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").expect("player id pattern is valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// Parses an identifier supplied by a client.
    /// Only positive decimal integers without leading zeros are accepted,
    /// surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, InvalidPlayerId> {
        let raw = raw.trim();
        if !PLAYER_ID_PATTERN.is_match(raw) {
            return Err(InvalidPlayerId(raw.to_string()));
        }
        raw.parse()
            .map(PlayerId)
            .map_err(|_| InvalidPlayerId(raw.to_string()))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid player id: '{0}'")]
pub struct InvalidPlayerId(pub String);

#[derive(Debug)]
pub enum RepoError {
    StorageError(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum RepoRetrieveError {
    NotFound,
    StorageError(String),
}

impl std::fmt::Display for RepoRetrieveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoRetrieveError::NotFound => write!(f, "Resource not found"),
            RepoRetrieveError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}
