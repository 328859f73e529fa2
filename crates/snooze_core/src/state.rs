use std::collections::HashSet;

use crate::view_model::{AppViewModel, StoryRowView};
use crate::{Story, StoryId, StoryList, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    /// Signup, login or session restore is in flight.
    Authenticating,
    LoggedIn,
}

/// Which collection the front-end is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Favorites,
    Mine,
}

/// Everything the front-end knows about the current session.
///
/// Passed explicitly through `update`; there is no global current user or
/// story list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    stories: Option<StoryList>,
    loading_stories: bool,
    user: Option<User>,
    authenticating: bool,
    favorites_in_flight: HashSet<StoryId>,
    deletes_in_flight: HashSet<StoryId>,
    tab: Tab,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        if self.user.is_some() {
            SessionState::LoggedIn
        } else if self.authenticating {
            SessionState::Authenticating
        } else {
            SessionState::LoggedOut
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn stories(&self) -> Option<&StoryList> {
        self.stories.as_ref()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_favorite_in_flight(&self, story_id: &str) -> bool {
        self.favorites_in_flight.contains(story_id)
    }

    pub fn view(&self) -> AppViewModel {
        let source: &[Story] = match (self.tab, self.user.as_ref()) {
            (Tab::Favorites, Some(user)) => user.favorites(),
            (Tab::Mine, Some(user)) => user.own_stories(),
            _ => self.stories.as_ref().map(StoryList::stories).unwrap_or(&[]),
        };
        let rows = source.iter().map(|story| self.row_for(story)).collect();

        AppViewModel {
            session: self.session(),
            username: self.user.as_ref().map(|user| user.username.clone()),
            tab: self.tab,
            rows,
            loading: self.loading_stories,
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn row_for(&self, story: &Story) -> StoryRowView {
        let (favorite, own) = match self.user.as_ref() {
            Some(user) => (user.is_favorite(story), user.is_own_story(story)),
            None => (false, false),
        };
        StoryRowView {
            story_id: story.story_id.clone(),
            title: story.title.clone(),
            author: story.author.clone(),
            url: story.url.clone(),
            hostname: story.hostname().ok(),
            username: story.username.clone(),
            favorite,
            own,
            pending: self.favorites_in_flight.contains(&story.story_id)
                || self.deletes_in_flight.contains(&story.story_id),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.dirty = true;
    }

    pub(crate) fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.dirty = true;
    }

    pub(crate) fn begin_loading_stories(&mut self) {
        self.loading_stories = true;
        self.dirty = true;
    }

    pub(crate) fn stories_loaded(&mut self, stories: Vec<Story>) {
        self.stories = Some(StoryList::new(stories));
        self.loading_stories = false;
        self.dirty = true;
    }

    pub(crate) fn stories_failed(&mut self, message: String) {
        self.loading_stories = false;
        self.set_error(message);
    }

    pub(crate) fn begin_authenticating(&mut self) {
        self.authenticating = true;
        self.dirty = true;
    }

    pub(crate) fn end_authenticating(&mut self) {
        self.authenticating = false;
        self.dirty = true;
    }

    pub(crate) fn log_in(&mut self, user: User) {
        self.user = Some(user);
        self.authenticating = false;
        self.dirty = true;
    }

    pub(crate) fn is_current_user(&self, username: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.username == username)
    }

    pub(crate) fn log_out(&mut self) {
        self.user = None;
        self.favorites_in_flight.clear();
        self.deletes_in_flight.clear();
        self.tab = Tab::All;
        self.dirty = true;
    }

    /// Looks a story up in the list first, then in the user's collections,
    /// which may hold stories the list has not loaded.
    pub(crate) fn find_story(&self, story_id: &str) -> Option<&Story> {
        self.stories
            .as_ref()
            .and_then(|list| list.find(story_id))
            .or_else(|| {
                self.user.as_ref().and_then(|user| {
                    user.favorites()
                        .iter()
                        .chain(user.own_stories())
                        .find(|story| story.story_id == story_id)
                })
            })
    }

    /// Marks a favorite request in flight; false if one already is.
    pub(crate) fn start_favorite(&mut self, story_id: &str) -> bool {
        let started = self.favorites_in_flight.insert(story_id.to_string());
        if started {
            self.dirty = true;
        }
        started
    }

    pub(crate) fn finish_favorite(&mut self, story_id: &str) {
        self.favorites_in_flight.remove(story_id);
        self.dirty = true;
    }

    pub(crate) fn start_delete(&mut self, story_id: &str) -> bool {
        let started = self.deletes_in_flight.insert(story_id.to_string());
        if started {
            self.dirty = true;
        }
        started
    }

    pub(crate) fn finish_delete(&mut self, story_id: &str) {
        self.deletes_in_flight.remove(story_id);
        self.dirty = true;
    }

    pub(crate) fn apply_favorite(&mut self, story: Story, favorited: bool) {
        if let Some(user) = self.user.as_mut() {
            if favorited {
                user.favorite_confirmed(story);
            } else {
                user.unfavorite_confirmed(&story);
            }
        }
        self.dirty = true;
    }

    /// The list always gets the new story; only its submitter's own stories do.
    pub(crate) fn apply_story_created(&mut self, username: &str, story: Story) {
        let list = self.stories.get_or_insert_with(StoryList::default);
        match self.user.as_mut().filter(|user| user.username == username) {
            Some(user) => list.insert_created(user, story),
            None => list.prepend(story),
        }
        self.dirty = true;
    }

    pub(crate) fn apply_story_deleted(&mut self, story_id: &StoryId) {
        match self.stories.as_mut() {
            Some(list) => list.forget_deleted(self.user.as_mut(), story_id),
            None => {
                if let Some(user) = self.user.as_mut() {
                    user.forget_story(story_id);
                }
            }
        }
        self.dirty = true;
    }
}
