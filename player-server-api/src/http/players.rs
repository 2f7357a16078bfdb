use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::{DateTime, Utc};
use player_server_app::{
    domain::{
        PlayerId,
        player::{Player, Profession, Race},
        query::{Pagination, PlayerCriteria, PlayerOrder},
        validation::{PlayerCandidate, PlayerPatch},
    },
    workflow::player::{
        count::CountPlayersError, create::CreatePlayerError, delete::DeletePlayerError,
        get::GetPlayerError, list::ListPlayersError, update::UpdatePlayerError,
    },
};

use crate::{app::ServiceError, http::AppState};

pub async fn get_all(
    State(app_state): State<AppState>,
    filter: Result<Query<JsonPlayerFilter>, QueryRejection>,
    params: Result<Query<JsonListParams>, QueryRejection>,
) -> Result<Json<Vec<JsonPlayer>>, ServiceError> {
    let Query(filter) = filter.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let Query(params) = params.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let order = params
        .order
        .map(|order| {
            order
                .parse::<PlayerOrder>()
                .map_err(|e| ServiceError::BadRequest(e.to_string()))
        })
        .transpose()?;
    let pagination = Pagination {
        page_number: params.page_number,
        page_size: params.page_size,
    };

    let players = app_state
        .app
        .player_list_use_case
        .list_players(filter.into_criteria()?, order, pagination)
        .await
        .map_err(|ListPlayersError::RepositoryError| {
            ServiceError::Internal("Error listing players".to_string())
        })?;

    Ok(Json(players.iter().map(JsonPlayer::from_player).collect()))
}

/// Ordering and paging parameters are not read, whatever their value.
pub async fn get_count(
    State(app_state): State<AppState>,
    filter: Result<Query<JsonPlayerFilter>, QueryRejection>,
) -> Result<Json<usize>, ServiceError> {
    let Query(filter) = filter.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let count = app_state
        .app
        .player_count_use_case
        .count_players(filter.into_criteria()?)
        .await
        .map_err(|CountPlayersError::RepositoryError| {
            ServiceError::Internal("Error counting players".to_string())
        })?;
    Ok(Json(count))
}

pub async fn create(
    State(app_state): State<AppState>,
    payload: Result<Json<JsonPlayerRequest>, JsonRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let Json(request) = payload.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let candidate = request.into_candidate()?;
    match app_state
        .app
        .player_create_use_case
        .create_player(candidate)
        .await
    {
        Ok(player) => Ok(Json(JsonPlayer::from_player(&player))),
        Err(CreatePlayerError::Invalid(e)) => Err(ServiceError::BadRequest(e.to_string())),
        Err(CreatePlayerError::RepositoryError) => {
            Err(ServiceError::Internal("Error creating player".to_string()))
        }
    }
}

pub async fn get_by_id(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let id = parse_player_id(&id)?;
    match app_state.app.player_get_use_case.get_player(id).await {
        Ok(player) => Ok(Json(JsonPlayer::from_player(&player))),
        Err(GetPlayerError::NotFound) => Err(player_not_found(id)),
        Err(GetPlayerError::RepositoryError) => {
            Err(ServiceError::Internal("Error retrieving player".to_string()))
        }
    }
}

pub async fn update(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    payload: Result<Json<JsonPlayerRequest>, JsonRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let id = parse_player_id(&id)?;
    let Json(request) = payload.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let patch = request.into_patch()?;
    match app_state
        .app
        .player_update_use_case
        .update_player(id, patch)
        .await
    {
        Ok(player) => Ok(Json(JsonPlayer::from_player(&player))),
        Err(UpdatePlayerError::NotFound) => Err(player_not_found(id)),
        Err(UpdatePlayerError::Invalid(e)) => Err(ServiceError::BadRequest(e.to_string())),
        Err(UpdatePlayerError::RepositoryError) => {
            Err(ServiceError::Internal("Error updating player".to_string()))
        }
    }
}

pub async fn delete(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<(), ServiceError> {
    let id = parse_player_id(&id)?;
    match app_state.app.player_delete_use_case.delete_player(id).await {
        Ok(()) => Ok(()),
        Err(DeletePlayerError::NotFound) => Err(player_not_found(id)),
        Err(DeletePlayerError::RepositoryError) => {
            Err(ServiceError::Internal("Error deleting player".to_string()))
        }
    }
}

fn parse_player_id(raw: &str) -> Result<PlayerId, ServiceError> {
    PlayerId::parse(raw).map_err(|e| ServiceError::BadRequest(e.to_string()))
}

fn player_not_found(id: PlayerId) -> ServiceError {
    ServiceError::NotFound(format!("Player with ID {} not found", id))
}

fn parse_race(raw: Option<String>) -> Result<Option<Race>, ServiceError> {
    raw.map(|race| {
        race.parse::<Race>()
            .map_err(|e| ServiceError::BadRequest(e.to_string()))
    })
    .transpose()
}

fn parse_profession(raw: Option<String>) -> Result<Option<Profession>, ServiceError> {
    raw.map(|profession| {
        profession
            .parse::<Profession>()
            .map_err(|e| ServiceError::BadRequest(e.to_string()))
    })
    .transpose()
}

fn parse_millis(field: &str, raw: Option<i64>) -> Result<Option<DateTime<Utc>>, ServiceError> {
    raw.map(|millis| {
        DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            ServiceError::BadRequest(format!("Invalid {} timestamp: {}", field, millis))
        })
    })
    .transpose()
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayerFilter {
    name: Option<String>,
    title: Option<String>,
    race: Option<String>,
    profession: Option<String>,
    after: Option<i64>,
    before: Option<i64>,
    banned: Option<bool>,
    min_experience: Option<i32>,
    max_experience: Option<i32>,
    min_level: Option<i32>,
    max_level: Option<i32>,
}

impl JsonPlayerFilter {
    fn into_criteria(self) -> Result<PlayerCriteria, ServiceError> {
        Ok(PlayerCriteria {
            race: parse_race(self.race)?,
            profession: parse_profession(self.profession)?,
            after: parse_millis("after", self.after)?,
            before: parse_millis("before", self.before)?,
            name: self.name,
            title: self.title,
            banned: self.banned,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            min_level: self.min_level,
            max_level: self.max_level,
        })
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonListParams {
    order: Option<String>,
    page_number: Option<usize>,
    page_size: Option<usize>,
}

/// Body of create and update requests. Derived fields and `id` are ignored.
#[derive(serde::Deserialize)]
pub struct JsonPlayerRequest {
    name: Option<String>,
    title: Option<String>,
    race: Option<String>,
    profession: Option<String>,
    birthday: Option<i64>,
    banned: Option<bool>,
    experience: Option<i32>,
}

impl JsonPlayerRequest {
    fn into_candidate(self) -> Result<PlayerCandidate, ServiceError> {
        Ok(PlayerCandidate {
            race: parse_race(self.race)?,
            profession: parse_profession(self.profession)?,
            birthday: parse_millis("birthday", self.birthday)?,
            name: self.name,
            title: self.title,
            banned: self.banned,
            experience: self.experience,
        })
    }

    fn into_patch(self) -> Result<PlayerPatch, ServiceError> {
        Ok(PlayerPatch {
            race: parse_race(self.race)?,
            profession: parse_profession(self.profession)?,
            birthday: parse_millis("birthday", self.birthday)?,
            name: self.name,
            title: self.title,
            banned: self.banned,
            experience: self.experience,
        })
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayer {
    id: i64,
    name: String,
    title: String,
    race: &'static str,
    profession: &'static str,
    birthday: i64,
    banned: bool,
    experience: i32,
    level: i32,
    until_next_level: i32,
}

impl JsonPlayer {
    fn from_player(player: &Player) -> Self {
        Self {
            id: player.id.0,
            name: player.name.clone(),
            title: player.title.clone(),
            race: player.race.as_str(),
            profession: player.profession.as_str(),
            birthday: player.birthday.timestamp_millis(),
            banned: player.banned,
            experience: player.progress.experience(),
            level: player.progress.level(),
            until_next_level: player.progress.until_next_level(),
        }
    }
}
