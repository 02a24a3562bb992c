use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::question::{FileQuestionStore, QuestionStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{errors::StartupError, metrics, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let addr = cfg.bind_addr();
    addr.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {addr}: {e}")))
}

/// Load the question file and build the router around it.
pub async fn build_app(questions_file: &Path) -> Result<Router, StartupError> {
    let store: Arc<dyn QuestionStore> = FileQuestionStore::open(questions_file).await?;
    metrics::init();
    Ok(routes::build_router(AppState::new(store), build_cors()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(Path::new(&cfg.storage.questions_file)).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, questions_file = %cfg.storage.questions_file, "starting trivia api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
