use std::sync::Arc;

use axum::{Router, routing::get};
use log::info;
use player_server_app::Application;

mod players;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

pub fn router(app: Arc<Application>) -> Router {
    Router::new()
        .nest(
            "/rest",
            Router::new()
                .route("/players", get(players::get_all).post(players::create))
                .route("/players/count", get(players::get_count))
                .route(
                    "/players/{id}",
                    get(players::get_by_id)
                        .post(players::update)
                        .delete(players::delete),
                ),
        )
        .with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    let port = std::env::var("PLAYER_HTTP_PORT")
        .expect("PLAYER_HTTP_PORT must be set")
        .parse::<u16>()
        .expect("PLAYER_HTTP_PORT must be a valid u16");
    let host = std::env::var("PLAYER_HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .expect("Failed to bind HTTP listener");

    info!("API server listening on {}:{}", host, port);
    if let Err(e) = axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await
    {
        log::error!("HTTP server error: {}", e);
    }

    info!("HTTP API shut down gracefully");
}
