use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use snooze_core::{NewStory, StoredCredential, Story, StoryId};
use snooze_logging::{snooze_debug, snooze_warn};
use thiserror::Error;

use crate::api::{ApiSettings, ReqwestApi, StoryApi};
use crate::{ops, ApiError, EngineEvent};

/// Work the engine thread performs; each command is one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
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
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error(transparent)]
    Client(#[from] ApiError),
}

/// Runs API calls on a background tokio runtime and hands results back as
/// [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn StoryApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("snooze-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                snooze_debug!("engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn enqueue(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            snooze_warn!("engine thread has stopped; command dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(api: &dyn StoryApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchStories => EngineEvent::StoriesFetched(ops::fetch_all(api).await),
        EngineCommand::RestoreSession(credential) => {
            EngineEvent::SessionRestored(ops::restore_session(api, &credential).await)
        }
        EngineCommand::Login { username, password } => {
            EngineEvent::Authenticated(ops::login(api, &username, &password).await)
        }
        EngineCommand::Signup {
            username,
            password,
            name,
        } => EngineEvent::Authenticated(ops::signup(api, &username, &password, &name).await),
        EngineCommand::CreateStory { credential, story } => {
            let result = ops::submit_story(api, &credential, &story).await;
            EngineEvent::StoryCreated {
                username: credential.username,
                result,
            }
        }
        EngineCommand::DeleteStory {
            credential,
            story_id,
        } => {
            let result = ops::remove_story(api, &credential, &story_id).await;
            EngineEvent::StoryDeleted { story_id, result }
        }
        EngineCommand::AddFavorite { credential, story } => {
            let result = ops::set_favorite(api, &credential, &story.story_id, true).await;
            EngineEvent::FavoriteChanged {
                username: credential.username,
                story,
                favorited: true,
                result,
            }
        }
        EngineCommand::RemoveFavorite { credential, story } => {
            let result = ops::set_favorite(api, &credential, &story.story_id, false).await;
            EngineEvent::FavoriteChanged {
                username: credential.username,
                story,
                favorited: false,
                result,
            }
        }
    }
}
