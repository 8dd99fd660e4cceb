use call_widget::WidgetError;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single request to one of the room endpoints.
#[derive(Debug, Clone, Error)]
pub enum EndpointError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
    #[error("request could not be completed: {0}")]
    Transport(String),
    #[error("status code {status}{}", describe_body(.body))]
    Status { status: u16, body: Option<Value> },
    #[error("response body missing or unusable: {0}")]
    MalformedBody(String),
}

impl EndpointError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn describe_body(body: &Option<Value>) -> String {
    match body {
        Some(body) => format!("; {body}"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Error)]
pub enum JoinError {
    #[error("room descriptor needs both url and name (url: {url:?}, name: {name:?})")]
    IncompleteRoom { url: String, name: String },
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

/// Why a create-and-join attempt stopped.
#[derive(Debug, Clone, Error)]
pub enum FlowError {
    #[error("failed to create room: {0}")]
    CreateRoom(#[source] EndpointError),
    #[error("failed to join room: {0}")]
    Join(#[from] JoinError),
}
