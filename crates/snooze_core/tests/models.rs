use chrono::{DateTime, Utc};
use snooze_core::{hostname_of, AuthToken, Story, StoryList, User};

fn story(id: &str) -> Story {
    Story {
        story_id: id.to_string(),
        title: format!("Story {id}"),
        author: "Ada".to_string(),
        url: format!("https://example.com/{id}"),
        username: "ada".to_string(),
        created_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
    }
}

fn user() -> User {
    User::new(
        "ada",
        "Ada Lovelace",
        DateTime::<Utc>::from_timestamp(1_600_000_000, 0).unwrap(),
        Vec::new(),
        Vec::new(),
        AuthToken::new("token-ada"),
    )
}

#[test]
fn hostname_is_the_authority_host() {
    assert_eq!(hostname_of("https://example.com/a").unwrap(), "example.com");
    assert_eq!(story("x").hostname().unwrap(), "example.com");
}

#[test]
fn hostname_of_garbage_is_an_error() {
    let err = hostname_of("not a url").unwrap_err();
    assert_eq!(err.url, "not a url");
}

#[test]
fn membership_uses_story_id_not_instance() {
    let mut user = user();
    let original = story("s1");
    user.favorite_confirmed(original.clone());
    user.add_own_story(original);

    let mut rebuilt = story("s1");
    rebuilt.title = "Same id, different instance".to_string();
    assert!(user.is_favorite(&rebuilt));
    assert!(user.is_own_story(&rebuilt));
    assert!(!user.is_favorite(&story("s2")));
}

#[test]
fn favorite_confirmed_prepends_without_duplicates() {
    let mut user = user();
    user.favorite_confirmed(story("a"));
    user.favorite_confirmed(story("b"));
    user.favorite_confirmed(story("a"));

    let ids: Vec<_> = user.favorites().iter().map(|s| s.story_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn unfavorite_is_idempotent_and_tolerates_absent_story() {
    let mut user = user();
    user.favorite_confirmed(story("a"));
    user.favorite_confirmed(story("b"));

    user.unfavorite_confirmed(&story("a"));
    let after_first = user.favorites().to_vec();
    user.unfavorite_confirmed(&story("a"));
    assert_eq!(user.favorites(), after_first.as_slice());

    user.unfavorite_confirmed(&story("never-favorited"));
    assert_eq!(user.favorites().len(), 1);
}

#[test]
fn insert_created_puts_story_first_in_both_collections() {
    let mut list = StoryList::new(vec![story("old1"), story("old2")]);
    let mut user = user();
    user.add_own_story(story("mine-old"));

    list.insert_created(&mut user, story("new"));

    assert_eq!(list.len(), 3);
    assert_eq!(list.get(0).unwrap().story_id, "new");
    assert_eq!(user.own_stories()[0].story_id, "new");
    assert_eq!(user.own_stories().len(), 2);
}

#[test]
fn containers_do_not_share_membership() {
    let mut list = StoryList::new(vec![story("a")]);
    let mut user = user();
    user.favorite_confirmed(story("a"));

    user.unfavorite_confirmed(&story("a"));
    assert_eq!(list.len(), 1);

    list.remove("a");
    assert!(list.is_empty());
    assert!(user.favorites().is_empty());
}

#[test]
fn forget_deleted_clears_every_local_collection() {
    let mut list = StoryList::new(vec![story("a"), story("b")]);
    let mut user = user();
    user.add_own_story(story("a"));
    user.favorite_confirmed(story("a"));

    list.forget_deleted(Some(&mut user), "a");

    assert!(list.find("a").is_none());
    assert!(list.find("b").is_some());
    assert!(!user.is_own_story(&story("a")));
    assert!(!user.is_favorite(&story("a")));
}
