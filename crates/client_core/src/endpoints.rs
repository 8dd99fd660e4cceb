//! HTTP access to the room creation and presence lookup endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use shared::{
    domain::RoomDescriptor,
    protocol::{PresenceParticipant, PresenceQuery, CREATE_ROOM_PATH, PRESENCE_PATH},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::EndpointError;

#[async_trait(?Send)]
pub trait RoomEndpoints {
    async fn create_room(&self) -> Result<RoomDescriptor, EndpointError>;
    async fn fetch_presence(
        &self,
        room_name: &str,
    ) -> Result<Vec<PresenceParticipant>, EndpointError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub create_room_path: String,
    pub presence_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            create_room_path: CREATE_ROOM_PATH.into(),
            presence_path: PRESENCE_PATH.into(),
        }
    }
}

pub struct HttpRoomEndpoints {
    http: Client,
    base_url: Url,
    config: EndpointConfig,
}

impl HttpRoomEndpoints {
    pub fn new(base_url: Url) -> Self {
        Self::with_config(base_url, EndpointConfig::default())
    }

    pub fn with_config(base_url: Url, config: EndpointConfig) -> Self {
        Self {
            http: Client::new(),
            base_url,
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, EndpointError> {
        self.base_url
            .join(path)
            .map_err(|e| EndpointError::InvalidUrl(format!("{path}: {e}")))
    }
}

#[async_trait(?Send)]
impl RoomEndpoints for HttpRoomEndpoints {
    async fn create_room(&self) -> Result<RoomDescriptor, EndpointError> {
        let url = self.endpoint(&self.config.create_room_path)?;
        debug!(%url, "requesting room creation");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        let status = response.status();
        let body = read_json_body(response, "room creation").await;
        if status != StatusCode::OK {
            return Err(EndpointError::Status {
                status: status.as_u16(),
                body,
            });
        }

        room_from_body(body)
    }

    async fn fetch_presence(
        &self,
        room_name: &str,
    ) -> Result<Vec<PresenceParticipant>, EndpointError> {
        let url = self.endpoint(&self.config.presence_path)?;
        debug!(%url, room_name, "requesting room presence");
        let response = self
            .http
            .get(url)
            .query(&PresenceQuery::for_room(room_name))
            .send()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        let status = response.status();
        let body = read_json_body(response, "room presence").await;
        if status != StatusCode::OK {
            return Err(EndpointError::Status {
                status: status.as_u16(),
                body,
            });
        }

        participants_from_body(body)
    }
}

/// Reads the body as JSON, treating anything unreadable as no body at all.
async fn read_json_body(response: Response, what: &str) -> Option<Value> {
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(%error, "no body present in {what} response");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(body) => Some(body),
        Err(error) => {
            warn!(%error, "no body present in {what} response");
            None
        }
    }
}

pub(crate) fn room_from_body(body: Option<Value>) -> Result<RoomDescriptor, EndpointError> {
    let body = body.ok_or_else(|| EndpointError::MalformedBody("missing room body".into()))?;
    let url = body.get("url").and_then(Value::as_str);
    let name = body.get("name").and_then(Value::as_str);
    RoomDescriptor::from_parts(url, name).ok_or_else(|| {
        EndpointError::MalformedBody(format!("room body lacks url or name: {body}"))
    })
}

pub(crate) fn participants_from_body(
    body: Option<Value>,
) -> Result<Vec<PresenceParticipant>, EndpointError> {
    let body =
        body.ok_or_else(|| EndpointError::MalformedBody("missing presence body".into()))?;
    serde_json::from_value(body).map_err(|e| EndpointError::MalformedBody(e.to_string()))
}

#[cfg(test)]
#[path = "tests/endpoints_tests.rs"]
mod tests;
