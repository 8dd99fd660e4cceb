//! Room workflow for the prejoin presence page.
//!
//! The [`ViewController`] sequences room creation, joining through the
//! external call widget, and the one-shot presence lookup. It is generic
//! over three seams so the same workflow drives the browser page, the
//! terminal client, and the tests:
//!
//! - [`RoomEndpoints`] for the two HTTP endpoints,
//! - [`call_widget::CallWidget`] for the embedded call frame,
//! - [`Display`] for rendering the [`ViewState`].

pub mod controller;
pub mod endpoints;
pub mod error;
pub mod location;
pub mod spawn;
pub mod view;

pub use controller::{Startup, ViewController};
pub use endpoints::{EndpointConfig, HttpRoomEndpoints, RoomEndpoints};
pub use error::{EndpointError, FlowError, JoinError};
pub use location::{invite_link, room_from_location, InviteLink};
pub use spawn::Spawn;
pub use view::{ActivePanel, CreateHandler, Display, ViewState, NOBODY_HERE_LABEL};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
