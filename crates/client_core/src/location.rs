//! Room parameters carried on the page URL.

use shared::domain::{RoomDescriptor, ROOM_NAME_PARAM, ROOM_URL_PARAM};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteLink {
    pub href: String,
    pub label: String,
}

/// Room to join straight away, if the page was opened from an invite link.
pub fn room_from_location(page_url: &Url) -> Option<RoomDescriptor> {
    let mut room_url = None;
    let mut room_name = None;
    for (key, value) in page_url.query_pairs() {
        if key == ROOM_URL_PARAM {
            room_url = Some(value.into_owned());
        } else if key == ROOM_NAME_PARAM {
            room_name = Some(value.into_owned());
        }
    }
    RoomDescriptor::from_parts(room_url.as_deref(), room_name.as_deref())
}

pub fn invite_link(page_url: &Url, room: &RoomDescriptor) -> InviteLink {
    let mut link = page_url.clone();
    link.set_fragment(None);
    link.set_query(None);
    link.query_pairs_mut()
        .append_pair(ROOM_URL_PARAM, &room.url)
        .append_pair(ROOM_NAME_PARAM, &room.name);

    let href = link.to_string();
    InviteLink {
        label: href.clone(),
        href,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(raw: &str) -> Url {
        Url::parse(raw).expect("page url")
    }

    #[test]
    fn reads_room_from_query() {
        let room = room_from_location(&page(
            "https://app.test/?roomURL=https://x.test/r2&roomName=r2",
        ));
        assert_eq!(room, Some(RoomDescriptor::new("https://x.test/r2", "r2")));
    }

    #[test]
    fn ignores_partial_parameters() {
        assert_eq!(room_from_location(&page("https://app.test/")), None);
        assert_eq!(
            room_from_location(&page("https://app.test/?roomName=r2")),
            None
        );
        assert_eq!(
            room_from_location(&page("https://app.test/?roomURL=https://x.test/r2&roomName=")),
            None
        );
    }

    #[test]
    fn invite_link_replaces_existing_query_and_round_trips() {
        let page_url = page("https://app.test/call?foo=bar#frag");
        let room = RoomDescriptor::new("https://x.test/room 1", "room1");
        let link = invite_link(&page_url, &room);

        assert!(link.href.starts_with("https://app.test/call?roomURL="));
        assert!(!link.href.contains("foo=bar"));
        assert!(!link.href.contains("#frag"));
        assert_eq!(link.label, link.href);
        assert_eq!(room_from_location(&page(&link.href)), Some(room));
    }
}
