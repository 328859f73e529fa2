//! Snooze core: story/user model and the pure session state machine.
mod effect;
mod msg;
mod state;
mod story;
mod story_list;
mod update;
mod user;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, SessionState, Tab};
pub use story::{hostname_of, InvalidUrlError, NewStory, Story, StoryId};
pub use story_list::StoryList;
pub use update::update;
pub use user::{AuthToken, StoredCredential, User};
pub use view_model::{AppViewModel, StoryRowView};
