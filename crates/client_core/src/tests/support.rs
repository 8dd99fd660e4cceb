//! Fake room endpoints served over real HTTP.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use shared::protocol::{CREATE_ROOM_PATH, PRESENCE_PATH};
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

#[derive(Clone)]
struct ServerState {
    create: (StatusCode, String),
    presence: (StatusCode, String),
    presence_queries: Arc<Mutex<Vec<Option<String>>>>,
    create_calls: Arc<Mutex<usize>>,
}

pub(crate) struct EndpointServer {
    pub(crate) base_url: Url,
    presence_queries: Arc<Mutex<Vec<Option<String>>>>,
    create_calls: Arc<Mutex<usize>>,
}

impl EndpointServer {
    pub(crate) async fn presence_queries(&self) -> Vec<Option<String>> {
        self.presence_queries.lock().await.clone()
    }

    pub(crate) async fn create_calls(&self) -> usize {
        *self.create_calls.lock().await
    }
}

async fn handle_create(State(state): State<ServerState>) -> (StatusCode, String) {
    *state.create_calls.lock().await += 1;
    state.create.clone()
}

async fn handle_presence(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state
        .presence_queries
        .lock()
        .await
        .push(query.get("roomName").cloned());
    state.presence.clone()
}

pub(crate) async fn spawn_endpoint_server(
    create: (StatusCode, &str),
    presence: (StatusCode, &str),
) -> EndpointServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState {
        create: (create.0, create.1.to_string()),
        presence: (presence.0, presence.1.to_string()),
        presence_queries: Arc::new(Mutex::new(Vec::new())),
        create_calls: Arc::new(Mutex::new(0)),
    };
    let server = EndpointServer {
        base_url: Url::parse(&format!("http://{addr}/")).expect("base url"),
        presence_queries: Arc::clone(&state.presence_queries),
        create_calls: Arc::clone(&state.create_calls),
    };
    let app = Router::new()
        .route(CREATE_ROOM_PATH, get(handle_create))
        .route(PRESENCE_PATH, get(handle_presence))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    server
}

/// A base URL nothing is listening on.
pub(crate) async fn closed_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("base url")
}
