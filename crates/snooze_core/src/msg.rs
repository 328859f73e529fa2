use crate::{NewStory, Story, StoredCredential, StoryId, Tab, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Front-end started; carries any credential saved by a previous run.
    AppStarted { stored: Option<StoredCredential> },
    /// User asked for a fresh copy of the story list.
    RefreshClicked,
    /// Engine returned the full story list in server order.
    StoriesLoaded(Vec<Story>),
    StoriesFailed(String),
    LoginSubmitted { username: String, password: String },
    SignupSubmitted {
        username: String,
        password: String,
        name: String,
    },
    /// Signup, login or session restore succeeded.
    SessionEstablished { user: User, restored: bool },
    /// Stored credential was rejected; stay logged out without complaint.
    SessionRestoreFailed,
    AuthFailed(String),
    LogoutClicked,
    StorySubmitted(NewStory),
    /// Server stored a story submitted by `username`.
    StoryCreated { username: String, story: Story },
    /// User clicked the favorite marker on a story.
    FavoriteToggled { story_id: StoryId },
    /// Server accepted a favorite (`favorited == true`) or unfavorite made
    /// on behalf of `username`.
    FavoriteConfirmed {
        username: String,
        story: Story,
        favorited: bool,
    },
    FavoriteFailed {
        username: String,
        story_id: StoryId,
        message: String,
    },
    DeleteClicked { story_id: StoryId },
    StoryDeleted { story_id: StoryId },
    DeleteFailed { story_id: StoryId, message: String },
    /// Any other request failed; surfaced to the user as-is.
    RequestFailed(String),
    TabSelected(Tab),
    /// UI/render tick to coalesce rendering.
    Tick,
    NoOp,
}
