use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use server_api::{create_room, room_presence, ApiContext};
use shared::{
    domain::RoomDescriptor,
    error::{ApiError, ErrorBody, ErrorCode},
    protocol::{PresenceParticipant, PresenceQuery, CREATE_ROOM_PATH, PRESENCE_PATH},
};
use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

type ApiFailure = (StatusCode, Json<ErrorBody>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    if settings.daily_api_key.trim().is_empty() {
        warn!("DAILY_API_KEY is not set; room endpoints will answer with 500");
    }

    let state = AppState {
        api: ApiContext::new(settings.daily()),
    };
    let app = build_router(Arc::new(state), settings.static_dir.as_deref());

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, static_dir = ?settings.static_dir, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route(CREATE_ROOM_PATH, get(http_create_room))
        .route(PRESENCE_PATH, get(http_room_presence))
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

fn api_failure(err: ApiError) -> ApiFailure {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err.body()))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_create_room(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomDescriptor>, ApiFailure> {
    create_room(&state.api).await.map(Json).map_err(api_failure)
}

async fn http_room_presence(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PresenceQuery>,
) -> Result<Json<Vec<PresenceParticipant>>, ApiFailure> {
    room_presence(&state.api, q.room_name.as_deref())
        .await
        .map(Json)
        .map_err(api_failure)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
