//! JSON shapes exchanged with the hack-or-snooze API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snooze_core::{AuthToken, NewStory, Story, User};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoryRecord {
    story_id: String,
    title: String,
    author: String,
    url: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Story {
            story_id: record.story_id,
            title: record.title,
            author: record.author,
            url: record.url,
            username: record.username,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRecord {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    favorites: Vec<StoryRecord>,
    #[serde(default)]
    stories: Vec<StoryRecord>,
}

impl UserRecord {
    pub(crate) fn into_user(self, token: AuthToken) -> User {
        User::new(
            self.username,
            self.name,
            self.created_at,
            self.favorites.into_iter().map(Story::from).collect(),
            self.stories.into_iter().map(Story::from).collect(),
            token,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoriesEnvelope {
    pub(crate) stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoryEnvelope {
    pub(crate) story: StoryRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthEnvelope {
    pub(crate) user: UserRecord,
    pub(crate) token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub(crate) user: UserRecord,
}

/// `{"error": {"status": 401, "title": "Unauthorized", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct TokenBody<'a> {
    pub(crate) token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CreateStoryBody<'a> {
    pub(crate) token: &'a str,
    pub(crate) story: NewStoryBody<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewStoryBody<'a> {
    title: &'a str,
    author: &'a str,
    url: &'a str,
}

impl<'a> From<&'a NewStory> for NewStoryBody<'a> {
    fn from(story: &'a NewStory) -> Self {
        Self {
            title: &story.title,
            author: &story.author,
            url: &story.url,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct CredentialsBody<'a> {
    pub(crate) user: Credentials<'a>,
}

#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<&'a str>,
}
