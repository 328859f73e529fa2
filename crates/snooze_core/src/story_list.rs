use crate::story::Story;
use crate::user::User;

/// Ordered collection of all known stories, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryList {
    stories: Vec<Story>,
}

impl StoryList {
    /// Wraps stories in the order given, usually the server's order.
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn into_stories(self) -> Vec<Story> {
        self.stories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Story> {
        self.stories.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    pub fn find(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|story| story.story_id == story_id)
    }

    pub fn prepend(&mut self, story: Story) {
        self.stories.insert(0, story);
    }

    /// Removes every story with `story_id`; returns how many were dropped.
    pub fn remove(&mut self, story_id: &str) -> usize {
        let before = self.stories.len();
        self.stories.retain(|story| story.story_id != story_id);
        before - self.stories.len()
    }

    /// Records a story the server just created on behalf of `user`.
    ///
    /// The story goes to the front of this list and of the user's own
    /// stories in one step; callers never observe only one of the two.
    pub fn insert_created(&mut self, user: &mut User, story: Story) {
        user.add_own_story(story.clone());
        self.prepend(story);
    }

    /// Drops a deleted story from this list and from every collection the
    /// user holds.
    pub fn forget_deleted(&mut self, user: Option<&mut User>, story_id: &str) {
        self.remove(story_id);
        if let Some(user) = user {
            user.forget_story(story_id);
        }
    }
}

impl<'a> IntoIterator for &'a StoryList {
    type Item = &'a Story;
    type IntoIter = std::slice::Iter<'a, Story>;

    fn into_iter(self) -> Self::IntoIter {
        self.stories.iter()
    }
}
