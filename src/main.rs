use std::sync::Arc;

use log::info;
use player_persistence_sqlite::{create_schema, players::SqlitePlayerRepository};
use player_server_app::build_application;

mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    logs::init_logger();

    let player_repo = Arc::new(SqlitePlayerRepository::new());
    create_schema(player_repo.pool())
        .await
        .expect("Failed to prepare player table");

    let app = Arc::new(build_application(player_repo));

    info!("Starting application");

    let http_app = tokio::spawn(player_server_api::http::run(app, shutdown_signal()));

    if let Err(e) = http_app.await {
        log::error!("HTTP API task failed: {}", e);
    }
}
