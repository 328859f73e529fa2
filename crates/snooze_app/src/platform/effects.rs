use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use snooze_core::{Effect, Msg};
use snooze_engine::{EngineCommand, EngineError, EngineEvent, EngineHandle};
use snooze_logging::{snooze_debug, snooze_info, snooze_warn};

use super::config::AppConfig;
use super::persistence::{clear_credential, save_credential};

pub struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, config: &AppConfig) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(config.api.clone())?;
        let runner = Self {
            engine,
            state_dir: config.state_dir.clone(),
        };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchStories => self.engine.enqueue(EngineCommand::FetchStories),
                Effect::RestoreSession(credential) => {
                    snooze_info!("RestoreSession username={}", credential.username);
                    self.engine
                        .enqueue(EngineCommand::RestoreSession(credential));
                }
                Effect::Login { username, password } => {
                    snooze_info!("Login username={}", username);
                    self.engine
                        .enqueue(EngineCommand::Login { username, password });
                }
                Effect::Signup {
                    username,
                    password,
                    name,
                } => {
                    snooze_info!("Signup username={}", username);
                    self.engine.enqueue(EngineCommand::Signup {
                        username,
                        password,
                        name,
                    });
                }
                Effect::CreateStory { credential, story } => {
                    snooze_info!("CreateStory url={}", story.url);
                    self.engine
                        .enqueue(EngineCommand::CreateStory { credential, story });
                }
                Effect::DeleteStory {
                    credential,
                    story_id,
                } => {
                    snooze_info!("DeleteStory story_id={}", story_id);
                    self.engine.enqueue(EngineCommand::DeleteStory {
                        credential,
                        story_id,
                    });
                }
                Effect::AddFavorite { credential, story } => {
                    snooze_debug!("AddFavorite story_id={}", story.story_id);
                    self.engine
                        .enqueue(EngineCommand::AddFavorite { credential, story });
                }
                Effect::RemoveFavorite { credential, story } => {
                    snooze_debug!("RemoveFavorite story_id={}", story.story_id);
                    self.engine
                        .enqueue(EngineCommand::RemoveFavorite { credential, story });
                }
                Effect::PersistCredential(credential) => {
                    save_credential(&self.state_dir, &credential);
                }
                Effect::ClearCredential => clear_credential(&self.state_dir),
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::StoriesFetched(Ok(list)) => Msg::StoriesLoaded(list.into_stories()),
        EngineEvent::StoriesFetched(Err(err)) => {
            Msg::StoriesFailed(format!("could not load stories: {err}"))
        }
        EngineEvent::SessionRestored(Some(user)) => Msg::SessionEstablished {
            user,
            restored: true,
        },
        EngineEvent::SessionRestored(None) => Msg::SessionRestoreFailed,
        EngineEvent::Authenticated(Ok(user)) => Msg::SessionEstablished {
            user,
            restored: false,
        },
        EngineEvent::Authenticated(Err(err)) => Msg::AuthFailed(err.to_string()),
        EngineEvent::StoryCreated {
            username,
            result: Ok(story),
        } => Msg::StoryCreated { username, story },
        EngineEvent::StoryCreated { result: Err(err), .. } => {
            Msg::RequestFailed(format!("could not submit story: {err}"))
        }
        EngineEvent::StoryDeleted {
            story_id,
            result: Ok(()),
        } => Msg::StoryDeleted { story_id },
        EngineEvent::StoryDeleted {
            story_id,
            result: Err(err),
        } => {
            snooze_warn!("Delete of {} failed: {}", story_id, err);
            Msg::DeleteFailed {
                story_id,
                message: format!("could not delete story: {err}"),
            }
        }
        EngineEvent::FavoriteChanged {
            username,
            story,
            favorited,
            result: Ok(()),
        } => Msg::FavoriteConfirmed {
            username,
            story,
            favorited,
        },
        EngineEvent::FavoriteChanged {
            username,
            story,
            result: Err(err),
            ..
        } => {
            snooze_warn!("Favorite toggle of {} failed: {}", story.story_id, err);
            Msg::FavoriteFailed {
                username,
                story_id: story.story_id,
                message: format!("could not update favorites: {err}"),
            }
        }
    }
}
