use crate::{NewStory, Story, StoredCredential, StoryId};

/// Side effects requested by `update`; the front-end executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchStories,
    RestoreSession(StoredCredential),
    Login {
        username: String,
        password: String,
    },
    Signup {
        username: String,
        password: String,
        name: String,
    },
    CreateStory {
        credential: StoredCredential,
        story: NewStory,
    },
    DeleteStory {
        credential: StoredCredential,
        story_id: StoryId,
    },
    AddFavorite {
        credential: StoredCredential,
        story: Story,
    },
    RemoveFavorite {
        credential: StoredCredential,
        story: Story,
    },
    PersistCredential(StoredCredential),
    ClearCredential,
}
