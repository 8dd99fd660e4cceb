use serde::{Deserialize, Serialize};

/// Default path of the room creation endpoint, relative to the page origin.
pub const CREATE_ROOM_PATH: &str = "/.netlify/functions/createRoom";
/// Default path of the presence lookup endpoint, relative to the page origin.
pub const PRESENCE_PATH: &str = "/.netlify/functions/presence";

/// A participant already connected to a room at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceParticipant {
    pub id: String,
    #[serde(
        rename = "userName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_name: Option<String>,
    /// Older records carry the display name here instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PresenceParticipant {
    pub fn new(id: impl Into<String>, user_name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.map(str::to_string),
            name: None,
        }
    }

    /// `userName`, then `name`, then the participant id; empty names are skipped.
    pub fn display_label(&self) -> &str {
        [self.user_name.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresenceQuery {
    #[serde(rename = "roomName", default)]
    pub room_name: Option<String>,
}

impl PresenceQuery {
    pub fn for_room(room_name: impl Into<String>) -> Self {
        Self {
            room_name: Some(room_name.into()),
        }
    }
}
