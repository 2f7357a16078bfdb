use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use player_persistence_sqlite::{create_in_memory_pool, players::SqlitePlayerRepository};
use player_server_app::build_application;
use serde_json::{Value, json};
use tower::ServiceExt;

// 2010-01-01T00:00:00Z
const BIRTHDAY: i64 = 1_262_304_000_000;

async fn setup_app() -> Router {
    let pool = create_in_memory_pool()
        .await
        .expect("Failed to create in-memory DB");
    let repo = Arc::new(SqlitePlayerRepository::from_pool(pool));
    player_server_api::http::router(Arc::new(build_application(repo)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn player_body(name: &str, experience: i64) -> Value {
    json!({
        "name": name,
        "title": "Wanderer",
        "race": "HUMAN",
        "profession": "WARRIOR",
        "birthday": BIRTHDAY,
        "experience": experience,
    })
}

async fn create(app: &Router, name: &str, experience: i64) -> Value {
    let (status, body) = send(app, "POST", "/rest/players", Some(player_body(name, experience))).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("expected an array")
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_and_get_player() {
    let app = setup_app().await;

    let created = create(&app, "Aria", 100).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["level"], 1);
    assert_eq!(created["untilNextLevel"], 200);
    assert_eq!(created["banned"], false);
    assert_eq!(created["birthday"], BIRTHDAY);

    let (status, fetched) = send(&app, "GET", "/rest/players/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_ignores_derived_fields() {
    let app = setup_app().await;
    let mut body = player_body("Aria", 0);
    body["level"] = json!(40);
    body["untilNextLevel"] = json!(1);
    body["id"] = json!(77);

    let (status, created) = send(&app, "POST", "/rest/players", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["level"], 0);
    assert_eq!(created["untilNextLevel"], 100);
}

#[tokio::test]
async fn test_create_rejects_invalid_player() {
    let app = setup_app().await;

    let mut body = player_body("ab", 0);
    body["title"] = json!("x".repeat(31));
    let (status, error) = send(&app, "POST", "/rest/players", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("title"));

    let mut body = player_body("Aria", 0);
    body["race"] = json!("WIZARD");
    let (status, _) = send(&app, "POST", "/rest/players", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = player_body("Aria", 0);
    body.as_object_mut().unwrap().remove("birthday");
    let (status, _) = send(&app, "POST", "/rest/players", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, count) = send(&app, "GET", "/rest/players/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_invalid_and_missing_ids() {
    let app = setup_app().await;
    create(&app, "Aria", 0).await;

    for uri in ["/rest/players/0", "/rest/players/abc", "/rest/players/01", "/rest/players/-3"] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        let (status, _) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }

    let (status, _) = send(&app, "GET", "/rest/players/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/rest/players/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/rest/players/42", Some(json!({"name": "Bo"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_player() {
    let app = setup_app().await;
    create(&app, "Aria", 0).await;

    let (status, updated) = send(
        &app,
        "POST",
        "/rest/players/1",
        Some(json!({"title": "Dragon Slayer", "experience": 300, "banned": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Aria");
    assert_eq!(updated["title"], "Dragon Slayer");
    assert_eq!(updated["banned"], true);
    assert_eq!(updated["level"], 2);
    assert_eq!(updated["untilNextLevel"], 300);

    let (_, fetched) = send(&app, "GET", "/rest/players/1", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_failed_update_changes_nothing() {
    let app = setup_app().await;
    let created = create(&app, "Aria", 0).await;

    let (status, _) = send(
        &app,
        "POST",
        "/rest/players/1",
        Some(json!({"name": "Valid", "experience": 10_000_001})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/rest/players/1",
        Some(json!({"name": "Valid", "birthday": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, "GET", "/rest/players/1", None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_delete_player() {
    let app = setup_app().await;
    create(&app, "Aria", 0).await;

    let (status, body) = send(&app, "DELETE", "/rest/players/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", "/rest/players/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_paging_and_order() {
    let app = setup_app().await;
    for (name, experience) in [("Dora", 500), ("Abe", 50), ("Cid", 5000), ("Bea", 0), ("Eve", 900)] {
        create(&app, name, experience).await;
    }

    let (status, page) = send(&app, "GET", "/rest/players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&page), vec!["Dora", "Abe", "Cid"]);

    let (_, page) = send(&app, "GET", "/rest/players?order=NAME&pageNumber=1&pageSize=2", None).await;
    assert_eq!(names(&page), vec!["Cid", "Dora"]);

    let (_, page) = send(&app, "GET", "/rest/players?order=EXPERIENCE&pageSize=10", None).await;
    assert_eq!(names(&page), vec!["Bea", "Abe", "Dora", "Eve", "Cid"]);

    let (status, page) = send(&app, "GET", "/rest/players?pageNumber=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page, json!([]));

    for uri in [
        "/rest/players?order=RACE",
        "/rest/players?pageNumber=-1",
        "/rest/players?pageSize=abc",
    ] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_list_and_count_filters() {
    let app = setup_app().await;
    for (name, experience) in [("Dora", 500), ("Abe", 50), ("Cid", 5000), ("Bea", 0), ("Eve", 900)] {
        create(&app, name, experience).await;
    }
    send(&app, "POST", "/rest/players/2", Some(json!({"banned": true, "race": "ELF"}))).await;

    let (_, page) = send(&app, "GET", "/rest/players?minLevel=2&maxLevel=3&pageSize=10", None).await;
    assert_eq!(names(&page), vec!["Dora", "Eve"]);

    let (_, count) = send(&app, "GET", "/rest/players/count?banned=true", None).await;
    assert_eq!(count, 1);

    let (_, count) = send(&app, "GET", "/rest/players/count?race=HUMAN", None).await;
    assert_eq!(count, 4);

    let (_, count) = send(&app, "GET", "/rest/players/count?name=e", None).await;
    assert_eq!(count, 3);

    let (_, count) = send(&app, "GET", "/rest/players/count?minExperience=500&maxExperience=900", None).await;
    assert_eq!(count, 2);

    let uri = format!("/rest/players/count?after={}", BIRTHDAY);
    let (_, count) = send(&app, "GET", &uri, None).await;
    assert_eq!(count, 0);

    let uri = format!("/rest/players/count?after={}&before={}", BIRTHDAY - 1, BIRTHDAY + 1);
    let (_, count) = send(&app, "GET", &uri, None).await;
    assert_eq!(count, 5);

    let (status, _) = send(&app, "GET", "/rest/players/count?profession=NINJA", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_count_ignores_paging_and_order() {
    let app = setup_app().await;
    for (name, experience) in [("Dora", 500), ("Abe", 50), ("Cid", 5000), ("Bea", 0)] {
        create(&app, name, experience).await;
    }

    for uri in [
        "/rest/players/count?pageNumber=-1",
        "/rest/players/count?pageSize=abc",
        "/rest/players/count?order=RACE&pageSize=1",
    ] {
        let (status, count) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(count, 4, "{}", uri);
    }

    let (status, _) = send(&app, "GET", "/rest/players/count?minLevel=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_order_is_named_in_error() {
    let app = setup_app().await;

    let (status, error) = send(&app, "GET", "/rest/players?order=RACE", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "unknown order: 'RACE'");
}
