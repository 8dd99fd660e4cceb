//! Terminal stand-ins for the page: a line-based renderer, a call frame
//! that joins when the user confirms, and a `LocalSet` spawner.

use std::{cell::RefCell, rc::Rc};

use call_widget::{
    joined_channel, CallFrame, CallFrameConfig, CallWidget, JoinedNotifier, JoinedSignal,
    WidgetError,
};
use client_core::{ActivePanel, CreateHandler, Display, Spawn, ViewState};
use futures::future::LocalBoxFuture;
use tracing::debug;

/// Where the terminal display parks the create handler for the input loop.
pub type CreateSlot = Rc<RefCell<Option<CreateHandler>>>;

pub struct TerminalDisplay {
    create: CreateSlot,
    last_frame: Vec<String>,
}

impl TerminalDisplay {
    pub fn new(create: CreateSlot) -> Self {
        Self {
            create,
            last_frame: Vec::new(),
        }
    }
}

impl Display for TerminalDisplay {
    fn set_create_handler(&mut self, handler: CreateHandler) {
        self.create.replace(Some(handler));
    }

    fn render(&mut self, view: &ViewState) {
        let lines = render_lines(view);
        if lines == self.last_frame {
            return;
        }
        for line in &lines {
            println!("{line}");
        }
        self.last_frame = lines;
    }
}

pub fn render_lines(view: &ViewState) -> Vec<String> {
    let mut lines = vec![match view.active_panel() {
        Some(ActivePanel::Entry) => "[entry] press Enter to create a room".to_string(),
        Some(ActivePanel::Call) if view.local_joined() => "[call] in the call".to_string(),
        Some(ActivePanel::Call) => "[call] press Enter once you are in the call".to_string(),
        None => "[loading]".to_string(),
    }];

    if view.is_presence_visible() {
        lines.push("already here:".to_string());
        lines.extend(view.participants().iter().map(|label| format!("  - {label}")));
    }
    if let Some(invite) = view.invite() {
        lines.push(format!("invite: {}", invite.href));
    }
    lines
}

/// Clones share the pending join notifications.
#[derive(Clone, Default)]
pub struct TerminalWidget {
    pending: Rc<RefCell<Vec<JoinedNotifier>>>,
}

impl TerminalWidget {
    /// Fires every outstanding joined notification. Returns how many fired.
    pub fn confirm_joined(&self) -> usize {
        self.pending
            .borrow_mut()
            .drain(..)
            .filter_map(|mut notifier| notifier.notify().then_some(()))
            .count()
    }
}

impl CallWidget for TerminalWidget {
    type Frame = TerminalFrame;

    fn create_frame(
        &self,
        container_id: &str,
        config: &CallFrameConfig,
    ) -> Result<TerminalFrame, WidgetError> {
        debug!(container_id, show_leave_button = config.show_leave_button, "call frame created");
        Ok(TerminalFrame {
            pending: Rc::clone(&self.pending),
        })
    }
}

pub struct TerminalFrame {
    pending: Rc<RefCell<Vec<JoinedNotifier>>>,
}

impl CallFrame for TerminalFrame {
    fn join(&self, room_url: &str) -> Result<(), WidgetError> {
        println!("joining call at {room_url}");
        Ok(())
    }

    fn on_joined(&self) -> JoinedSignal {
        let (notifier, signal) = joined_channel();
        self.pending.borrow_mut().push(notifier);
        signal
    }
}

/// Spawns onto the current `LocalSet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl Spawn for TokioSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
