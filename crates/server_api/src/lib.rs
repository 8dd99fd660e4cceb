use reqwest::Client;
use shared::{domain::RoomDescriptor, error::ApiError, protocol::PresenceParticipant};
use tracing::{error, info};

pub mod daily;

use daily::DailyConfig;

pub const MISSING_API_KEY_MESSAGE: &str = "server authentication with Daily failed";
pub const MISSING_ROOM_NAME_MESSAGE: &str = "roomName parameter not found in request";

#[derive(Clone)]
pub struct ApiContext {
    pub http: Client,
    pub daily: DailyConfig,
}

impl ApiContext {
    pub fn new(daily: DailyConfig) -> Self {
        Self {
            http: Client::new(),
            daily,
        }
    }

    fn ensure_api_key(&self) -> Result<(), ApiError> {
        if self.daily.api_key.trim().is_empty() {
            error!("Daily API key is not configured");
            return Err(ApiError::internal(MISSING_API_KEY_MESSAGE));
        }
        Ok(())
    }
}

pub async fn create_room(ctx: &ApiContext) -> Result<RoomDescriptor, ApiError> {
    ctx.ensure_api_key()?;
    let room = daily::create_room(&ctx.http, &ctx.daily)
        .await
        .map_err(|error| {
            error!(%error, "failed to create room");
            ApiError::internal("failed to create room (check server logs)")
        })?;
    info!(room_name = %room.name, room_url = %room.url, "room created");
    Ok(room)
}

pub async fn room_presence(
    ctx: &ApiContext,
    room_name: Option<&str>,
) -> Result<Vec<PresenceParticipant>, ApiError> {
    let room_name = room_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::validation(MISSING_ROOM_NAME_MESSAGE))?;
    ctx.ensure_api_key()?;

    let participants = daily::get_presence(&ctx.http, &ctx.daily, room_name)
        .await
        .map_err(|error| {
            error!(%error, room_name, "failed to get presence");
            ApiError::internal("failed to get presence (check server logs)")
        })?;
    info!(room_name, count = participants.len(), "room presence fetched");
    Ok(participants)
}

#[cfg(test)]
#[path = "tests/fake_daily.rs"]
pub(crate) mod fake_daily;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
