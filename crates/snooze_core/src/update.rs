use crate::{AppState, Effect, Msg, SessionState, Tab};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted { stored } => {
            state.begin_loading_stories();
            let mut effects = vec![Effect::FetchStories];
            if let Some(credential) = stored {
                state.begin_authenticating();
                effects.push(Effect::RestoreSession(credential));
            }
            effects
        }
        Msg::RefreshClicked => {
            state.clear_error();
            state.begin_loading_stories();
            vec![Effect::FetchStories]
        }
        Msg::StoriesLoaded(stories) => {
            state.stories_loaded(stories);
            Vec::new()
        }
        Msg::StoriesFailed(message) => {
            state.stories_failed(message);
            Vec::new()
        }
        Msg::LoginSubmitted { username, password } => match state.session() {
            SessionState::LoggedIn => {
                state.set_error("already logged in; log out first");
                Vec::new()
            }
            SessionState::Authenticating => {
                state.set_error("a login is already in progress");
                Vec::new()
            }
            SessionState::LoggedOut => {
                state.clear_error();
                state.begin_authenticating();
                vec![Effect::Login { username, password }]
            }
        },
        Msg::SignupSubmitted {
            username,
            password,
            name,
        } => match state.session() {
            SessionState::LoggedIn => {
                state.set_error("already logged in; log out first");
                Vec::new()
            }
            SessionState::Authenticating => {
                state.set_error("a login is already in progress");
                Vec::new()
            }
            SessionState::LoggedOut => {
                state.clear_error();
                state.begin_authenticating();
                vec![Effect::Signup {
                    username,
                    password,
                    name,
                }]
            }
        },
        Msg::SessionEstablished { user, restored } => {
            // A late restore must not replace an account the user logged into meanwhile.
            if restored && state.user().is_some() {
                state.end_authenticating();
                Vec::new()
            } else {
                let credential = user.credential();
                state.log_in(user);
                if restored {
                    Vec::new()
                } else {
                    vec![Effect::PersistCredential(credential)]
                }
            }
        }
        Msg::SessionRestoreFailed => {
            state.end_authenticating();
            Vec::new()
        }
        Msg::AuthFailed(message) => {
            state.end_authenticating();
            state.set_error(message);
            Vec::new()
        }
        Msg::LogoutClicked => {
            if state.user().is_some() {
                state.clear_error();
                state.log_out();
                vec![Effect::ClearCredential]
            } else {
                Vec::new()
            }
        }
        Msg::StorySubmitted(story) => match state.user() {
            Some(user) => {
                let credential = user.credential();
                state.clear_error();
                vec![Effect::CreateStory { credential, story }]
            }
            None => {
                state.set_error("log in to submit a story");
                Vec::new()
            }
        },
        Msg::StoryCreated { username, story } => {
            state.apply_story_created(&username, story);
            Vec::new()
        }
        Msg::FavoriteToggled { story_id } => toggle_favorite(&mut state, &story_id),
        Msg::FavoriteConfirmed {
            username,
            story,
            favorited,
        } => {
            // Answers for an account that has since logged out belong to nobody here.
            if state.is_current_user(&username) {
                state.finish_favorite(&story.story_id);
                state.apply_favorite(story, favorited);
            }
            Vec::new()
        }
        Msg::FavoriteFailed {
            username,
            story_id,
            message,
        } => {
            if state.is_current_user(&username) {
                state.finish_favorite(&story_id);
                state.set_error(message);
            }
            Vec::new()
        }
        Msg::DeleteClicked { story_id } => delete_story(&mut state, &story_id),
        Msg::StoryDeleted { story_id } => {
            state.finish_delete(&story_id);
            state.apply_story_deleted(&story_id);
            Vec::new()
        }
        Msg::DeleteFailed { story_id, message } => {
            state.finish_delete(&story_id);
            state.set_error(message);
            Vec::new()
        }
        Msg::RequestFailed(message) => {
            state.set_error(message);
            Vec::new()
        }
        Msg::TabSelected(tab) => {
            if tab != Tab::All && state.user().is_none() {
                state.set_error("log in to see your favorites and stories");
            } else if tab != state.tab() {
                state.clear_error();
                state.set_tab(tab);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn toggle_favorite(state: &mut AppState, story_id: &str) -> Vec<Effect> {
    let Some(user) = state.user() else {
        state.set_error("log in to favorite stories");
        return Vec::new();
    };
    let Some(story) = state.find_story(story_id).cloned() else {
        state.set_error(format!("no story with id {story_id}"));
        return Vec::new();
    };
    let credential = user.credential();
    let currently_favorite = user.is_favorite(&story);

    // One request per story at a time; repeated clicks wait for the first.
    if !state.start_favorite(story_id) {
        return Vec::new();
    }
    state.clear_error();
    if currently_favorite {
        vec![Effect::RemoveFavorite { credential, story }]
    } else {
        vec![Effect::AddFavorite { credential, story }]
    }
}

fn delete_story(state: &mut AppState, story_id: &str) -> Vec<Effect> {
    let Some(user) = state.user() else {
        state.set_error("log in to delete stories");
        return Vec::new();
    };
    let Some(story) = state.find_story(story_id) else {
        state.set_error(format!("no story with id {story_id}"));
        return Vec::new();
    };
    if !user.is_own_story(story) {
        state.set_error("only your own stories can be deleted");
        return Vec::new();
    }
    let credential = user.credential();

    if !state.start_delete(story_id) {
        return Vec::new();
    }
    state.clear_error();
    vec![Effect::DeleteStory {
        credential,
        story_id: story_id.to_string(),
    }]
}
