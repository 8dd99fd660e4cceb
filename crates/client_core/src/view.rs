//! Page model owned by the controller, and the rendering seam over it.
//!
//! `ViewState` is the single source of truth for what the page shows. The
//! entry and call panels are mutually exclusive by construction: there is
//! one active panel, not two independent flags. Every operation is
//! idempotent except `append_participant`, which appends one entry per call.

use crate::location::InviteLink;

/// Label shown when the presence lookup finds nobody in the room.
pub const NOBODY_HERE_LABEL: &str = "Nobody here yet!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePanel {
    Entry,
    Call,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    active_panel: Option<ActivePanel>,
    presence_visible: bool,
    participants: Vec<String>,
    invite: Option<InviteLink>,
    local_joined: bool,
}

impl ViewState {
    pub fn show_entry(&mut self) {
        self.active_panel = Some(ActivePanel::Entry);
    }

    pub fn show_call(&mut self) {
        self.active_panel = Some(ActivePanel::Call);
    }

    pub fn show_presence(&mut self) {
        self.presence_visible = true;
    }

    pub fn hide_presence(&mut self) {
        self.presence_visible = false;
    }

    pub fn append_participant(&mut self, label: impl Into<String>) {
        self.participants.push(label.into());
    }

    pub fn clear_participants(&mut self) {
        self.participants.clear();
    }

    pub fn set_invite(&mut self, invite: InviteLink) {
        self.invite = Some(invite);
    }

    /// Records that the local participant is in the call; the presence
    /// sidebar has no further use after that.
    pub fn mark_local_joined(&mut self) {
        self.local_joined = true;
        self.presence_visible = false;
    }

    /// Starts a fresh join: empty list, sidebar hidden, not yet joined.
    pub(crate) fn reset_for_join(&mut self) {
        self.participants.clear();
        self.presence_visible = false;
        self.local_joined = false;
    }

    pub fn active_panel(&self) -> Option<ActivePanel> {
        self.active_panel
    }

    pub fn is_entry_visible(&self) -> bool {
        self.active_panel == Some(ActivePanel::Entry)
    }

    pub fn is_call_visible(&self) -> bool {
        self.active_panel == Some(ActivePanel::Call)
    }

    pub fn is_presence_visible(&self) -> bool {
        self.presence_visible
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn invite(&self) -> Option<&InviteLink> {
        self.invite.as_ref()
    }

    pub fn local_joined(&self) -> bool {
        self.local_joined
    }
}

/// Activation handler for the room creation control.
pub type CreateHandler = Box<dyn Fn()>;

/// The only component that touches on-screen elements.
pub trait Display {
    /// Replaces any previously registered handler.
    fn set_create_handler(&mut self, handler: CreateHandler);
    fn render(&mut self, view: &ViewState);
}
