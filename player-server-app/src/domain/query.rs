use chrono::{DateTime, Utc};

use crate::domain::player::{Player, Profession, Race, UnknownVariant};

pub const DEFAULT_PAGE_NUMBER: usize = 0;
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Optional filters, combined with AND. `None` imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct PlayerCriteria {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Strictly after.
    pub after: Option<DateTime<Utc>>,
    /// Strictly before.
    pub before: Option<DateTime<Utc>>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

impl PlayerCriteria {
    pub fn matches(&self, player: &Player) -> bool {
        let experience = player.progress.experience();
        let level = player.progress.level();

        self.name
            .as_ref()
            .is_none_or(|name| player.name.contains(name.as_str()))
            && self
                .title
                .as_ref()
                .is_none_or(|title| player.title.contains(title.as_str()))
            && self.race.is_none_or(|race| player.race == race)
            && self
                .profession
                .is_none_or(|profession| player.profession == profession)
            && self.after.is_none_or(|after| player.birthday > after)
            && self.before.is_none_or(|before| player.birthday < before)
            && self.banned.is_none_or(|banned| player.banned == banned)
            && self.min_experience.is_none_or(|min| experience >= min)
            && self.max_experience.is_none_or(|max| experience <= max)
            && self.min_level.is_none_or(|min| level >= min)
            && self.max_level.is_none_or(|max| level <= max)
    }
}

pub fn filter_players(players: Vec<Player>, criteria: &PlayerCriteria) -> Vec<Player> {
    players
        .into_iter()
        .filter(|player| criteria.matches(player))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerOrder {
    Id,
    Name,
    Level,
    Birthday,
    Experience,
}

impl std::str::FromStr for PlayerOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ID" => Ok(PlayerOrder::Id),
            "NAME" => Ok(PlayerOrder::Name),
            "LEVEL" => Ok(PlayerOrder::Level),
            "BIRTHDAY" => Ok(PlayerOrder::Birthday),
            "EXPERIENCE" => Ok(PlayerOrder::Experience),
            _ => Err(UnknownVariant {
                kind: "order",
                value: s.to_string(),
            }),
        }
    }
}

/// Ascending, stable. `None` keeps the incoming order.
pub fn sort_players(players: &mut [Player], order: Option<PlayerOrder>) {
    let Some(order) = order else {
        return;
    };
    match order {
        PlayerOrder::Id => players.sort_by_key(|p| p.id),
        PlayerOrder::Name => players.sort_by(|a, b| a.name.cmp(&b.name)),
        PlayerOrder::Level => players.sort_by_key(|p| p.progress.level()),
        PlayerOrder::Birthday => players.sort_by_key(|p| p.birthday),
        PlayerOrder::Experience => players.sort_by_key(|p| p.progress.experience()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
}

impl Pagination {
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    /// Returns the page, empty when it starts past the end.
    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        let page = self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
        let size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let from = page.saturating_mul(size);
        if from >= items.len() {
            return Vec::new();
        }
        let to = from.saturating_add(size).min(items.len());
        items.truncate(to);
        items.split_off(from)
    }
}
