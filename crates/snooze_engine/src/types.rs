use std::fmt;

use snooze_core::{Story, StoryId, StoryList, User};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure, including timeouts.
    Network,
    /// 5xx, unexpected status, or a body of unexpected shape (`status: None`).
    Server { status: Option<u16> },
    /// Credential missing, rejected, or not allowed to act on the resource.
    Auth { status: u16 },
    /// The server rejected the payload.
    Validation { status: u16 },
    NotFound,
    /// A request url could not be built from the base url.
    InvalidUrl,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Server { status: Some(code) } => write!(f, "server error (http {code})"),
            FailureKind::Server { status: None } => write!(f, "unexpected server response"),
            FailureKind::Auth { status } => write!(f, "not authorized (http {status})"),
            FailureKind::Validation { status } => write!(f, "rejected input (http {status})"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
        }
    }
}

/// Results sent back from the engine thread, one per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    StoriesFetched(Result<StoryList, ApiError>),
    /// `None` when the stored credential no longer works.
    SessionRestored(Option<User>),
    Authenticated(Result<User, ApiError>),
    /// `username` is the account the story was submitted as.
    StoryCreated {
        username: String,
        result: Result<Story, ApiError>,
    },
    StoryDeleted {
        story_id: StoryId,
        result: Result<(), ApiError>,
    },
    FavoriteChanged {
        username: String,
        story: Story,
        favorited: bool,
        result: Result<(), ApiError>,
    },
}
