use crate::{SessionState, StoryId, Tab};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub username: Option<String>,
    pub tab: Tab,
    pub rows: Vec<StoryRowView>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRowView {
    pub story_id: StoryId,
    pub title: String,
    pub author: String,
    pub url: String,
    /// `None` when the story url cannot be parsed.
    pub hostname: Option<String>,
    pub username: String,
    pub favorite: bool,
    pub own: bool,
    /// A favorite or delete request for this story is in flight.
    pub pending: bool,
}
