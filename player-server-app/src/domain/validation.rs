use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{
    leveling::Progress,
    player::{NewPlayerRecord, Player, Profession, Race},
};

/// 2000-01-01T00:00:00Z
pub const BIRTHDAY_LOWER_BOUND_MILLIS: i64 = 946_684_800_000;
/// 3000-01-01T00:00:00Z
pub const BIRTHDAY_UPPER_BOUND_MILLIS: i64 = 32_503_680_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlayerField {
    Name,
    Title,
    Race,
    Profession,
    Birthday,
    Experience,
}

impl PlayerField {
    fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(PlayerField::Name),
            "title" => Some(PlayerField::Title),
            "race" => Some(PlayerField::Race),
            "profession" => Some(PlayerField::Profession),
            "birthday" => Some(PlayerField::Birthday),
            "experience" => Some(PlayerField::Experience),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerField::Name => "name",
            PlayerField::Title => "title",
            PlayerField::Race => "race",
            PlayerField::Profession => "profession",
            PlayerField::Birthday => "birthday",
            PlayerField::Experience => "experience",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid player fields: {}", .fields.iter().map(PlayerField::as_str).collect::<Vec<_>>().join(", "))]
pub struct InvalidPlayer {
    pub fields: Vec<PlayerField>,
}

impl From<ValidationErrors> for InvalidPlayer {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<PlayerField> = errors
            .field_errors()
            .keys()
            .filter_map(|field| {
                let field: &str = field.as_ref();
                PlayerField::from_field_name(field)
            })
            .collect();
        fields.sort();
        fields.dedup();
        InvalidPlayer { fields }
    }
}

fn validate_birthday(birthday: &DateTime<Utc>) -> Result<(), ValidationError> {
    let millis = birthday.timestamp_millis();
    if millis > BIRTHDAY_LOWER_BOUND_MILLIS && millis < BIRTHDAY_UPPER_BOUND_MILLIS {
        Ok(())
    } else {
        Err(ValidationError::new("birthday_out_of_range"))
    }
}

/// A player as submitted for creation. Every field except `banned` is required.
#[derive(Debug, Clone, Default, Validate)]
pub struct PlayerCandidate {
    #[validate(required, length(min = 1, max = 12))]
    pub name: Option<String>,
    #[validate(required, length(min = 1, max = 30))]
    pub title: Option<String>,
    #[validate(required)]
    pub race: Option<Race>,
    #[validate(required)]
    pub profession: Option<Profession>,
    #[validate(required, custom(function = "validate_birthday"))]
    pub birthday: Option<DateTime<Utc>>,
    pub banned: Option<bool>,
    #[validate(required, range(min = 0, max = 10_000_000))]
    pub experience: Option<i32>,
}

impl PlayerCandidate {
    pub fn into_record(self) -> Result<NewPlayerRecord, InvalidPlayer> {
        self.validate()?;
        match (
            self.name,
            self.title,
            self.race,
            self.profession,
            self.birthday,
            self.experience,
        ) {
            (
                Some(name),
                Some(title),
                Some(race),
                Some(profession),
                Some(birthday),
                Some(experience),
            ) => Ok(NewPlayerRecord {
                name,
                title,
                race,
                profession,
                birthday,
                banned: self.banned.unwrap_or(false),
                progress: Progress::from_experience(experience),
            }),
            (name, title, race, profession, birthday, experience) => {
                let missing = [
                    (name.is_none(), PlayerField::Name),
                    (title.is_none(), PlayerField::Title),
                    (race.is_none(), PlayerField::Race),
                    (profession.is_none(), PlayerField::Profession),
                    (birthday.is_none(), PlayerField::Birthday),
                    (experience.is_none(), PlayerField::Experience),
                ];
                Err(InvalidPlayer {
                    fields: missing
                        .into_iter()
                        .filter_map(|(is_missing, field)| is_missing.then_some(field))
                        .collect(),
                })
            }
        }
    }
}

/// A partial update. Absent fields leave the target untouched.
#[derive(Debug, Clone, Default, Validate)]
pub struct PlayerPatch {
    #[validate(length(min = 1, max = 12))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    #[validate(custom(function = "validate_birthday"))]
    pub birthday: Option<DateTime<Utc>>,
    pub banned: Option<bool>,
    #[validate(range(min = 0, max = 10_000_000))]
    pub experience: Option<i32>,
}

impl PlayerPatch {
    /// Returns the patched player, or the failing fields without touching
    /// anything if any supplied field is invalid.
    pub fn apply_to(&self, player: &Player) -> Result<Player, InvalidPlayer> {
        self.validate()?;
        let mut patched = player.clone();
        if let Some(name) = &self.name {
            patched.name = name.clone();
        }
        if let Some(title) = &self.title {
            patched.title = title.clone();
        }
        if let Some(race) = self.race {
            patched.race = race;
        }
        if let Some(profession) = self.profession {
            patched.profession = profession;
        }
        if let Some(birthday) = self.birthday {
            patched.birthday = birthday;
        }
        if let Some(banned) = self.banned {
            patched.banned = banned;
        }
        if let Some(experience) = self.experience {
            patched.progress = Progress::from_experience(experience);
        }
        Ok(patched)
    }
}
