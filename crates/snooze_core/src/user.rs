use std::fmt;

use chrono::{DateTime, Utc};

use crate::story::Story;

/// Opaque credential issued by the server at signup or login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// What the front-end keeps between runs to restore a session without a
/// password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub username: String,
    pub token: AuthToken,
}

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    /// Display name.
    pub name: String,
    pub created_at: DateTime<Utc>,
    favorites: Vec<Story>,
    own_stories: Vec<Story>,
    token: AuthToken,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        favorites: Vec<Story>,
        own_stories: Vec<Story>,
        token: AuthToken,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            created_at,
            favorites,
            own_stories,
            token,
        }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn credential(&self) -> StoredCredential {
        StoredCredential {
            username: self.username.clone(),
            token: self.token.clone(),
        }
    }

    pub fn favorites(&self) -> &[Story] {
        &self.favorites
    }

    pub fn own_stories(&self) -> &[Story] {
        &self.own_stories
    }

    pub fn is_favorite(&self, story: &Story) -> bool {
        self.favorites.iter().any(|fav| fav.same_story(story))
    }

    pub fn is_own_story(&self, story: &Story) -> bool {
        self.own_stories.iter().any(|own| own.same_story(story))
    }

    /// Applies a favorite the server has accepted. Already-favorited stories
    /// keep their position.
    pub fn favorite_confirmed(&mut self, story: Story) {
        if !self.is_favorite(&story) {
            self.favorites.insert(0, story);
        }
    }

    /// Applies an unfavorite the server has accepted. Removing an absent
    /// story is a no-op.
    pub fn unfavorite_confirmed(&mut self, story: &Story) {
        self.favorites.retain(|fav| !fav.same_story(story));
    }

    pub fn add_own_story(&mut self, story: Story) {
        self.own_stories.insert(0, story);
    }

    /// Drops a story from both favorites and own stories.
    pub fn forget_story(&mut self, story_id: &str) {
        self.favorites.retain(|story| story.story_id != story_id);
        self.own_stories.retain(|story| story.story_id != story_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("secret-value");
        assert!(!format!("{token:?}").contains("secret-value"));
        assert_eq!(token.as_str(), "secret-value");
    }
}
