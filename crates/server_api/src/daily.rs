//! Minimal client for the Daily REST API: room creation and room presence.

use chrono::{DateTime, Duration, Utc};
use rand::{thread_rng, Rng};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::{domain::RoomDescriptor, protocol::PresenceParticipant};
use thiserror::Error;
use url::Url;

pub const DAILY_API_URL: &str = "https://api.daily.co/v1";
pub const ROOM_NAME_PREFIX: &str = "prsnc-";
pub const ROOM_NAME_MAX_LEN: usize = 20;
const ROOM_NAME_CHARS: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

#[derive(Debug, Clone)]
pub struct DailyConfig {
    pub api_key: String,
    pub api_url: String,
    pub room_name_prefix: String,
    pub room_ttl_seconds: i64,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DAILY_API_URL.into(),
            room_name_prefix: ROOM_NAME_PREFIX.into(),
            room_ttl_seconds: 3600,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "prefix is too long ({prefix_len} characters); the room name must be up to {max_len} characters in total"
)]
pub struct RoomNameError {
    pub prefix_len: usize,
    pub max_len: usize,
}

#[derive(Debug, Error)]
pub enum DailyError {
    #[error("invalid Daily API url {0}")]
    InvalidApiUrl(String),
    #[error("room lifetime of {ttl_seconds} seconds is out of range")]
    RoomExpiry { ttl_seconds: i64 },
    #[error("failed to generate room name: {0}")]
    RoomName(#[from] RoomNameError),
    #[error("request to Daily failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed API call to Daily: {status}: {body}")]
    FailedApiCall { status: u16, body: String },
    #[error("failed to decode Daily response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct CreateRoomParams {
    name: String,
    properties: RoomProperties,
}

#[derive(Debug, Serialize)]
struct RoomProperties {
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct PresenceResponse {
    #[serde(default)]
    data: Vec<PresenceParticipant>,
}

/// Generates a room name: the prefix followed by random characters from
/// `0-9A-Za-z-_`, `ROOM_NAME_MAX_LEN` characters in total.
pub fn generate_room_name(prefix: &str) -> Result<String, RoomNameError> {
    let remaining = ROOM_NAME_MAX_LEN.saturating_sub(prefix.len());
    if remaining == 0 {
        return Err(RoomNameError {
            prefix_len: prefix.len(),
            max_len: ROOM_NAME_MAX_LEN,
        });
    }

    let mut rng = thread_rng();
    let mut name = String::with_capacity(ROOM_NAME_MAX_LEN);
    name.push_str(prefix);
    name.extend(
        (0..remaining).map(|_| char::from(ROOM_NAME_CHARS[rng.gen_range(0..ROOM_NAME_CHARS.len())])),
    );
    Ok(name)
}

/// Expiry instant for a room created at `now`, if the lifetime is positive
/// and representable.
pub fn room_expiry(now: DateTime<Utc>, ttl_seconds: i64) -> Option<DateTime<Utc>> {
    if ttl_seconds <= 0 {
        return None;
    }
    Duration::try_seconds(ttl_seconds).and_then(|ttl| now.checked_add_signed(ttl))
}

pub fn is_valid_room_ttl(ttl_seconds: i64) -> bool {
    room_expiry(Utc::now(), ttl_seconds).is_some()
}

fn api_endpoint(api_url: &str, segments: &[&str]) -> Result<Url, DailyError> {
    let mut url = Url::parse(api_url)
        .map_err(|e| DailyError::InvalidApiUrl(format!("{api_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| DailyError::InvalidApiUrl(api_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn read_success_body(response: reqwest::Response) -> Result<String, DailyError> {
    let status = response.status();
    let body = response.text().await?;
    if status != StatusCode::OK {
        return Err(DailyError::FailedApiCall {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Creates a room that expires after the configured TTL.
pub async fn create_room(http: &Client, cfg: &DailyConfig) -> Result<RoomDescriptor, DailyError> {
    let exp = room_expiry(Utc::now(), cfg.room_ttl_seconds).ok_or(DailyError::RoomExpiry {
        ttl_seconds: cfg.room_ttl_seconds,
    })?;
    let params = CreateRoomParams {
        name: generate_room_name(&cfg.room_name_prefix)?,
        properties: RoomProperties {
            exp: exp.timestamp(),
        },
    };

    let response = http
        .post(api_endpoint(&cfg.api_url, &["rooms"])?)
        .bearer_auth(&cfg.api_key)
        .json(&params)
        .send()
        .await?;
    let body = read_success_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Lists the participants currently connected to `room_name`.
pub async fn get_presence(
    http: &Client,
    cfg: &DailyConfig,
    room_name: &str,
) -> Result<Vec<PresenceParticipant>, DailyError> {
    let response = http
        .get(api_endpoint(&cfg.api_url, &["rooms", room_name, "presence"])?)
        .bearer_auth(&cfg.api_key)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .send()
        .await?;
    let body = read_success_body(response).await?;
    let presence: PresenceResponse = serde_json::from_str(&body)?;
    Ok(presence.data)
}

#[cfg(test)]
#[path = "tests/daily_tests.rs"]
mod tests;
