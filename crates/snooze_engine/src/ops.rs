//! Story and user operations: one remote call, then the local bookkeeping.
//!
//! Local collections change only after the server has accepted a request, so
//! a failed call leaves them as they were. Operations that change a user take
//! `&mut User`, which keeps two favorite toggles on the same user from
//! interleaving.
//!
//! The credential-level calls ([`submit_story`], [`remove_story`],
//! [`set_favorite`]) do the remote half only. The engine thread uses them and
//! leaves the bookkeeping to `snooze_core::update`, which applies the same
//! `StoryList`/`User` methods as the functions here.

use snooze_core::{NewStory, StoredCredential, Story, StoryList, User};
use snooze_logging::{snooze_info, snooze_warn};

use crate::{ApiError, StoryApi};

/// Loads every story, in the order the server returns them.
pub async fn fetch_all(api: &dyn StoryApi) -> Result<StoryList, ApiError> {
    let stories = api.list_stories().await?;
    snooze_info!("fetched {} stories", stories.len());
    Ok(StoryList::new(stories))
}

/// Sends a new story as `credential`'s user and returns the stored record.
pub async fn submit_story(
    api: &dyn StoryApi,
    credential: &StoredCredential,
    new_story: &NewStory,
) -> Result<Story, ApiError> {
    let story = api.create_story(&credential.token, new_story).await?;
    snooze_info!(
        "user {} created story {}",
        credential.username,
        story.story_id
    );
    Ok(story)
}

/// Submits a story as `user` and records it at the front of `list` and of
/// the user's own stories.
pub async fn create_story(
    api: &dyn StoryApi,
    list: &mut StoryList,
    user: &mut User,
    new_story: &NewStory,
) -> Result<Story, ApiError> {
    let story = submit_story(api, &user.credential(), new_story).await?;
    list.insert_created(user, story.clone());
    Ok(story)
}

pub async fn remove_story(
    api: &dyn StoryApi,
    credential: &StoredCredential,
    story_id: &str,
) -> Result<(), ApiError> {
    api.delete_story(&credential.token, story_id).await?;
    snooze_info!("user {} deleted story {story_id}", credential.username);
    Ok(())
}

/// Deletes one of `user`'s stories, then drops it from `list` and from the
/// user's favorites and own stories.
pub async fn delete_story(
    api: &dyn StoryApi,
    list: &mut StoryList,
    user: &mut User,
    story_id: &str,
) -> Result<(), ApiError> {
    remove_story(api, &user.credential(), story_id).await?;
    list.forget_deleted(Some(user), story_id);
    Ok(())
}

pub async fn signup(
    api: &dyn StoryApi,
    username: &str,
    password: &str,
    name: &str,
) -> Result<User, ApiError> {
    let user = api.signup(username, password, name).await?;
    snooze_info!("signed up {}", user.username);
    Ok(user)
}

pub async fn login(api: &dyn StoryApi, username: &str, password: &str) -> Result<User, ApiError> {
    let user = api.login(username, password).await?;
    snooze_info!(
        "logged in {} ({} favorites, {} own stories)",
        user.username,
        user.favorites().len(),
        user.own_stories().len()
    );
    Ok(user)
}

/// Re-authenticates with a stored credential.
///
/// Any failure yields `None` so the caller can stay logged out quietly; this
/// is the only operation that does not surface its error.
pub async fn restore_session(api: &dyn StoryApi, credential: &StoredCredential) -> Option<User> {
    match api.get_user(credential).await {
        Ok(user) => {
            snooze_info!("restored session for {}", user.username);
            Some(user)
        }
        Err(err) => {
            snooze_warn!(
                "could not restore session for {}: {err}",
                credential.username
            );
            None
        }
    }
}

/// Adds (`favorited == true`) or removes a favorite on the server.
pub async fn set_favorite(
    api: &dyn StoryApi,
    credential: &StoredCredential,
    story_id: &str,
    favorited: bool,
) -> Result<(), ApiError> {
    if favorited {
        api.add_favorite(&credential.token, &credential.username, story_id)
            .await
    } else {
        api.remove_favorite(&credential.token, &credential.username, story_id)
            .await
    }
}

pub async fn add_favorite(api: &dyn StoryApi, user: &mut User, story: &Story) -> Result<(), ApiError> {
    set_favorite(api, &user.credential(), &story.story_id, true).await?;
    user.favorite_confirmed(story.clone());
    Ok(())
}

/// Unfavorites `story`; removing a story that is not a favorite is harmless.
pub async fn remove_favorite(
    api: &dyn StoryApi,
    user: &mut User,
    story: &Story,
) -> Result<(), ApiError> {
    set_favorite(api, &user.credential(), &story.story_id, false).await?;
    user.unfavorite_confirmed(story);
    Ok(())
}
