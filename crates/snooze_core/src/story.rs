use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

pub type StoryId = String;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid story url {url:?}: {reason}")]
pub struct InvalidUrlError {
    pub url: String,
    pub reason: String,
}

/// Returns the host component of `url`, without scheme, port or path.
pub fn hostname_of(url: &str) -> Result<String, InvalidUrlError> {
    let parsed = Url::parse(url.trim()).map_err(|err| InvalidUrlError {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(InvalidUrlError {
            url: url.to_string(),
            reason: "url has no host".to_string(),
        }),
    }
}

/// A single submitted link as the server describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub story_id: StoryId,
    pub title: String,
    pub author: String,
    pub url: String,
    /// Username of the account that submitted the story.
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    pub fn hostname(&self) -> Result<String, InvalidUrlError> {
        hostname_of(&self.url)
    }

    /// Stories are the same when their server ids match, whichever container
    /// they were built for.
    pub fn same_story(&self, other: &Story) -> bool {
        self.story_id == other.story_id
    }
}

/// Fields a user supplies when submitting a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStory {
    pub title: String,
    pub author: String,
    pub url: String,
}
