use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use snooze_core::{AuthToken, NewStory, StoredCredential, Story, User};
use snooze_engine::{
    ApiError, EngineCommand, EngineEvent, EngineHandle, FailureKind, StoryApi,
};

fn story(id: &str) -> Story {
    Story {
        story_id: id.to_string(),
        title: id.to_string(),
        author: "Ada".to_string(),
        url: "https://example.com".to_string(),
        username: "ada".to_string(),
        created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
    }
}

fn user(token: &str) -> User {
    User::new(
        "ada",
        "Ada",
        DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        Vec::new(),
        Vec::new(),
        AuthToken::new(token),
    )
}

fn credential() -> StoredCredential {
    StoredCredential {
        username: "ada".to_string(),
        token: AuthToken::new("tok"),
    }
}

fn denied() -> ApiError {
    ApiError {
        kind: FailureKind::Auth { status: 401 },
        message: "denied".to_string(),
    }
}

/// In-memory API: accepts the password "pw" and the token "tok".
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait::async_trait]
impl StoryApi for FakeApi {
    async fn list_stories(&self) -> Result<Vec<Story>, ApiError> {
        self.record("list");
        Ok(vec![story("one"), story("two")])
    }

    async fn create_story(&self, token: &AuthToken, new: &NewStory) -> Result<Story, ApiError> {
        self.record("create");
        if token.as_str() != "tok" {
            return Err(denied());
        }
        Ok(story(&new.title))
    }

    async fn delete_story(&self, _token: &AuthToken, story_id: &str) -> Result<(), ApiError> {
        self.record("delete");
        if story_id == "missing" {
            return Err(ApiError {
                kind: FailureKind::NotFound,
                message: "no such story".to_string(),
            });
        }
        Ok(())
    }

    async fn signup(&self, _u: &str, _p: &str, _n: &str) -> Result<User, ApiError> {
        self.record("signup");
        Ok(user("tok"))
    }

    async fn login(&self, _username: &str, password: &str) -> Result<User, ApiError> {
        self.record("login");
        if password == "pw" {
            Ok(user("tok"))
        } else {
            Err(denied())
        }
    }

    async fn get_user(&self, credential: &StoredCredential) -> Result<User, ApiError> {
        self.record("get_user");
        if credential.token.as_str() == "tok" {
            Ok(user("tok"))
        } else {
            Err(denied())
        }
    }

    async fn add_favorite(&self, _t: &AuthToken, _u: &str, _id: &str) -> Result<(), ApiError> {
        self.record("add_favorite");
        Ok(())
    }

    async fn remove_favorite(&self, _t: &AuthToken, _u: &str, _id: &str) -> Result<(), ApiError> {
        self.record("remove_favorite");
        Ok(())
    }
}

fn run(engine: &EngineHandle, command: EngineCommand) -> EngineEvent {
    engine.enqueue(command);
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn engine_reports_one_event_per_command() {
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api.clone()).expect("engine");

    match run(&engine, EngineCommand::FetchStories) {
        EngineEvent::StoriesFetched(Ok(list)) => assert_eq!(list.len(), 2),
        other => panic!("unexpected event {other:?}"),
    }

    match run(
        &engine,
        EngineCommand::Login {
            username: "ada".to_string(),
            password: "pw".to_string(),
        },
    ) {
        EngineEvent::Authenticated(Ok(user)) => assert_eq!(user.username, "ada"),
        other => panic!("unexpected event {other:?}"),
    }

    match run(
        &engine,
        EngineCommand::AddFavorite {
            credential: credential(),
            story: story("one"),
        },
    ) {
        EngineEvent::FavoriteChanged {
            username,
            story,
            favorited,
            result,
        } => {
            assert_eq!(username, "ada");
            assert_eq!(story.story_id, "one");
            assert!(favorited);
            assert!(result.is_ok());
        }
        other => panic!("unexpected event {other:?}"),
    }

    assert_eq!(
        *api.calls.lock().unwrap(),
        vec!["list", "login", "add_favorite"]
    );
}

#[test]
fn engine_swallows_failed_restore_but_reports_other_failures() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default())).expect("engine");

    let event = run(
        &engine,
        EngineCommand::RestoreSession(StoredCredential {
            username: "ada".to_string(),
            token: AuthToken::new("expired"),
        }),
    );
    assert_eq!(event, EngineEvent::SessionRestored(None));

    let event = run(
        &engine,
        EngineCommand::DeleteStory {
            credential: credential(),
            story_id: "missing".to_string(),
        },
    );
    match event {
        EngineEvent::StoryDeleted { story_id, result } => {
            assert_eq!(story_id, "missing");
            assert_eq!(result.unwrap_err().kind, FailureKind::NotFound);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let event = run(
        &engine,
        EngineCommand::CreateStory {
            credential: StoredCredential {
                username: "ada".to_string(),
                token: AuthToken::new("stale"),
            },
            story: NewStory {
                title: "x".to_string(),
                author: "a".to_string(),
                url: "https://x.example.com".to_string(),
            },
        },
    );
    assert_eq!(
        event,
        EngineEvent::StoryCreated {
            username: "ada".to_string(),
            result: Err(denied()),
        }
    );
}

#[test]
fn try_recv_is_empty_without_commands() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default())).expect("engine");
    assert!(engine.try_recv().is_none());
}

#[test]
fn engine_events_name_the_requesting_account() {
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api.clone()).expect("engine");
    let bob = StoredCredential {
        username: "bob".to_string(),
        token: AuthToken::new("tok"),
    };

    match run(
        &engine,
        EngineCommand::RemoveFavorite {
            credential: bob.clone(),
            story: story("one"),
        },
    ) {
        EngineEvent::FavoriteChanged {
            username,
            favorited,
            result,
            ..
        } => {
            assert_eq!(username, "bob");
            assert!(!favorited);
            assert!(result.is_ok());
        }
        other => panic!("unexpected event {other:?}"),
    }

    match run(
        &engine,
        EngineCommand::CreateStory {
            credential: bob,
            story: NewStory {
                title: "fresh".to_string(),
                author: "Bob".to_string(),
                url: "https://fresh.example.com".to_string(),
            },
        },
    ) {
        EngineEvent::StoryCreated { username, result } => {
            assert_eq!(username, "bob");
            assert_eq!(result.unwrap().story_id, "fresh");
        }
        other => panic!("unexpected event {other:?}"),
    }

    assert_eq!(*api.calls.lock().unwrap(), vec!["remove_favorite", "create"]);
}
