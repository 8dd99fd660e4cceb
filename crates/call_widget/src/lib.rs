//! Contract for the embeddable call widget that owns the actual call.
//!
//! The widget is opaque: it can mount a frame into a container, join a room
//! address, and report when the local participant has joined. Nothing else
//! about it is relied upon.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;
use serde::Serialize;
use thiserror::Error;

/// Element id of the container the call frame is mounted into.
pub const CALL_FRAME_CONTAINER: &str = "callFrame";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameStyle {
    pub position: String,
    pub width: String,
    pub height: String,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            position: "fixed".into(),
            width: "calc(100% - 1rem)".into(),
            height: "calc(100% - 5rem)".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrameConfig {
    pub show_leave_button: bool,
    pub iframe_style: FrameStyle,
}

impl Default for CallFrameConfig {
    fn default() -> Self {
        Self {
            show_leave_button: true,
            iframe_style: FrameStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("call frame container `{0}` not found")]
    MissingContainer(String),
    #[error("failed to create call frame: {0}")]
    Create(String),
    #[error("failed to join call at {url}: {reason}")]
    Join { url: String, reason: String },
}

/// Fires a [`JoinedSignal`] at most once.
#[derive(Debug)]
pub struct JoinedNotifier {
    tx: Option<oneshot::Sender<()>>,
}

impl JoinedNotifier {
    /// Returns `true` only for the call that actually delivered the signal.
    pub fn notify(&mut self) -> bool {
        match self.tx.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.tx.is_none()
    }
}

/// Resolves to `true` once the local participant has joined, or `false` if
/// the notifier went away without firing.
#[derive(Debug)]
pub struct JoinedSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for JoinedSignal {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|res| res.is_ok())
    }
}

pub fn joined_channel() -> (JoinedNotifier, JoinedSignal) {
    let (tx, rx) = oneshot::channel();
    (JoinedNotifier { tx: Some(tx) }, JoinedSignal { rx })
}

pub trait CallFrame {
    fn join(&self, room_url: &str) -> Result<(), WidgetError>;
    /// Registers a one-shot listener for the local participant's join.
    fn on_joined(&self) -> JoinedSignal;
}

pub trait CallWidget {
    type Frame: CallFrame;

    fn create_frame(
        &self,
        container_id: &str,
        config: &CallFrameConfig,
    ) -> Result<Self::Frame, WidgetError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
