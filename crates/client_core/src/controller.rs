//! Screen-level workflow: entry screen, room creation, join, presence.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use call_widget::{CallFrame, CallFrameConfig, CallWidget, CALL_FRAME_CONTAINER};
use shared::domain::RoomDescriptor;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
    endpoints::RoomEndpoints,
    error::{EndpointError, FlowError, JoinError},
    location::{invite_link, room_from_location},
    spawn::Spawn,
    view::{Display, ViewState, NOBODY_HERE_LABEL},
};

/// Which path page initialization took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// The page carried room parameters and the room was joined directly.
    DirectJoin(RoomDescriptor),
    /// The entry panel is showing and waits for the create action.
    AwaitingCreate,
}

struct Inner<E, W: CallWidget, D, S> {
    endpoints: E,
    widget: W,
    spawner: S,
    page_url: Url,
    frame_config: CallFrameConfig,
    display: RefCell<D>,
    view: RefCell<ViewState>,
    frame: RefCell<Option<W::Frame>>,
    /// Set while a create action is running; further activations are ignored.
    creating: Cell<bool>,
}

/// Cheap handle; clones share the same page state.
pub struct ViewController<E, W: CallWidget, D, S> {
    inner: Rc<Inner<E, W, D, S>>,
}

impl<E, W: CallWidget, D, S> Clone for ViewController<E, W, D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E, W, D, S> ViewController<E, W, D, S>
where
    E: RoomEndpoints + 'static,
    W: CallWidget + 'static,
    D: Display + 'static,
    S: Spawn + 'static,
{
    pub fn new(endpoints: E, widget: W, display: D, spawner: S, page_url: Url) -> Self {
        Self {
            inner: Rc::new(Inner {
                endpoints,
                widget,
                spawner,
                page_url,
                frame_config: CallFrameConfig::default(),
                display: RefCell::new(display),
                view: RefCell::new(ViewState::default()),
                frame: RefCell::new(None),
                creating: Cell::new(false),
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner<E, W, D, S>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Snapshot of the current page model.
    pub fn view(&self) -> ViewState {
        self.inner.view.borrow().clone()
    }

    fn update_view(&self, apply: impl FnOnce(&mut ViewState)) {
        let mut view = self.inner.view.borrow_mut();
        apply(&mut view);
        self.inner.display.borrow_mut().render(&view);
    }

    pub async fn initialize(&self) -> Startup {
        if let Some(room) = room_from_location(&self.inner.page_url) {
            info!(room_name = %room.name, "page opened with room parameters; joining directly");
            if let Err(error) = self.join(room.clone()).await {
                error!(%error, "failed to join room from page parameters");
            }
            return Startup::DirectJoin(room);
        }

        let weak = Rc::downgrade(&self.inner);
        self.inner
            .display
            .borrow_mut()
            .set_create_handler(Box::new(move || {
                let Some(controller) = Self::from_weak(&weak) else {
                    return;
                };
                if controller.inner.creating.replace(true) {
                    debug!("room creation already in progress; ignoring activation");
                    return;
                }
                let task = controller.clone();
                controller.inner.spawner.spawn_local(Box::pin(async move {
                    // Failures are already reported inside create_and_join.
                    let _ = task.create_and_join().await;
                    task.inner.creating.set(false);
                }));
            }));
        self.update_view(ViewState::show_entry);
        Startup::AwaitingCreate
    }

    /// Allocates a room and joins it. Every failure is logged here and
    /// leaves the page as it was.
    pub async fn create_and_join(&self) -> Result<RoomDescriptor, FlowError> {
        let room = match self.inner.endpoints.create_room().await {
            Ok(room) => room,
            Err(error) => {
                log_create_failure(&error);
                return Err(FlowError::CreateRoom(error));
            }
        };

        info!(room_name = %room.name, room_url = %room.url, "room created");
        if let Err(error) = self.join(room.clone()).await {
            error!(%error, room_name = %room.name, "failed to join created room");
            return Err(error.into());
        }
        Ok(room)
    }

    pub async fn join(&self, room: RoomDescriptor) -> Result<(), JoinError> {
        if !room.is_complete() {
            return Err(JoinError::IncompleteRoom {
                url: room.url,
                name: room.name,
            });
        }

        self.update_view(|view| {
            view.reset_for_join();
            view.show_call();
        });

        let frame = self
            .inner
            .widget
            .create_frame(CALL_FRAME_CONTAINER, &self.inner.frame_config)?;
        self.watch_local_join(&frame);
        let joined = frame.join(&room.url);
        // Keep the frame alive for as long as the page is.
        self.inner.frame.replace(Some(frame));
        if let Err(error) = joined {
            error!(%error, room_url = %room.url, "call frame rejected join request");
        }

        let invite = invite_link(&self.inner.page_url, &room);
        debug!(invite = %invite.href, "invite link updated");
        self.update_view(|view| view.set_invite(invite));

        if let Err(error) = self.fetch_participants(&room.name).await {
            log_presence_failure(&error, &room.name);
        }
        Ok(())
    }

    fn watch_local_join(&self, frame: &W::Frame) {
        let signal = frame.on_joined();
        let weak = Rc::downgrade(&self.inner);
        self.inner.spawner.spawn_local(Box::pin(async move {
            if !signal.await {
                debug!("call frame went away before the local participant joined");
                return;
            }
            if let Some(controller) = Self::from_weak(&weak) {
                info!("local participant joined; hiding presence");
                controller.update_view(ViewState::mark_local_joined);
            }
        }));
    }

    /// Looks up who is already in the room and renders one label each.
    /// Returns the number of entries appended.
    pub async fn fetch_participants(&self, room_name: &str) -> Result<usize, EndpointError> {
        let participants = self.inner.endpoints.fetch_presence(room_name).await?;
        let count = participants.len();
        info!(room_name, count, "room presence fetched");

        self.update_view(|view| {
            if participants.is_empty() {
                view.append_participant(NOBODY_HERE_LABEL);
            }
            for participant in &participants {
                view.append_participant(participant.display_label());
            }
            if view.local_joined() {
                debug!("local participant already joined; presence stays hidden");
            } else {
                view.show_presence();
            }
        });
        Ok(count.max(1))
    }
}

fn log_create_failure(error: &EndpointError) {
    match error {
        EndpointError::Transport(reason) => {
            error!(%reason, "failed to make room creation request");
        }
        EndpointError::Status { status, body } => match body {
            Some(body) => error!(status, %body, "failed to create room"),
            None => error!(status, "failed to create room"),
        },
        other => error!(error = %other, "failed to create room"),
    }
}

fn log_presence_failure(error: &EndpointError, room_name: &str) {
    match error {
        EndpointError::Transport(reason) => {
            error!(%reason, room_name, "failed to make room presence request");
        }
        EndpointError::Status { status, body } => match body {
            Some(body) => error!(status, %body, room_name, "failed to fetch room presence"),
            None => error!(status, room_name, "failed to fetch room presence"),
        },
        other => warn!(error = %other, room_name, "unusable room presence response"),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
