use serde::{Deserialize, Serialize};

/// Query parameter carrying the room address on a shareable page URL.
pub const ROOM_URL_PARAM: &str = "roomURL";
/// Query parameter carrying the room name on a shareable page URL.
pub const ROOM_NAME_PARAM: &str = "roomName";

/// A call room hosted by the video provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDescriptor {
    pub name: String,
    pub url: String,
}

impl RoomDescriptor {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    /// Builds a descriptor only when both parts are present and non-empty.
    pub fn from_parts(url: Option<&str>, name: Option<&str>) -> Option<Self> {
        let url = url.map(str::trim).filter(|v| !v.is_empty())?;
        let name = name.map(str::trim).filter(|v| !v.is_empty())?;
        Some(Self::new(url, name))
    }

    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_requires_both_fields() {
        assert_eq!(
            RoomDescriptor::from_parts(Some("https://x.test/r2"), Some("r2")),
            Some(RoomDescriptor::new("https://x.test/r2", "r2"))
        );
        assert_eq!(RoomDescriptor::from_parts(Some("https://x.test/r2"), None), None);
        assert_eq!(RoomDescriptor::from_parts(None, Some("r2")), None);
        assert_eq!(RoomDescriptor::from_parts(Some(" "), Some("r2")), None);
    }

    #[test]
    fn incomplete_descriptor_is_detected() {
        assert!(RoomDescriptor::new("https://x.test/a", "a").is_complete());
        assert!(!RoomDescriptor::new("", "a").is_complete());
        assert!(!RoomDescriptor::new("https://x.test/a", "").is_complete());
    }
}
