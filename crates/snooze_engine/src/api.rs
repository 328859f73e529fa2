use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use snooze_core::{AuthToken, NewStory, Story, StoredCredential, User};
use snooze_logging::{snooze_debug, snooze_warn};
use url::Url;

use crate::wire::{
    AuthEnvelope, CreateStoryBody, Credentials, CredentialsBody, ErrorEnvelope, StoriesEnvelope,
    StoryEnvelope, TokenBody, UserEnvelope,
};
use crate::{ApiError, FailureKind};

pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ApiSettings {
    /// Settings for the hosted API at [`DEFAULT_BASE_URL`].
    pub fn hosted() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self {
            base_url,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }
}

/// The remote operations the model layer consumes, one HTTP round trip each.
#[async_trait::async_trait]
pub trait StoryApi: Send + Sync {
    async fn list_stories(&self) -> Result<Vec<Story>, ApiError>;

    async fn create_story(&self, token: &AuthToken, story: &NewStory) -> Result<Story, ApiError>;

    async fn delete_story(&self, token: &AuthToken, story_id: &str) -> Result<(), ApiError>;

    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<User, ApiError>;

    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError>;

    /// Fetches the account behind a stored credential, without a password.
    async fn get_user(&self, credential: &StoredCredential) -> Result<User, ApiError>;

    async fn add_favorite(
        &self,
        token: &AuthToken,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError>;

    async fn remove_favorite(
        &self,
        token: &AuthToken,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::new(
                    FailureKind::InvalidUrl,
                    format!("base url {} cannot take a path", self.settings.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends `request`, maps non-2xx statuses, and returns the raw body.
    async fn send(&self, route: &str, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        snooze_debug!("request {route}");
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let err = map_status_error(status, &body);
            snooze_warn!("request {route} failed: {err}");
            return Err(err);
        }
        snooze_debug!("request {route} -> {status} ({} bytes)", body.len());
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        route: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(route, request).await?;
        serde_json::from_slice(&body).map_err(|err| {
            ApiError::new(
                FailureKind::Server { status: None },
                format!("unexpected response shape from {route}: {err}"),
            )
        })
    }
}

#[async_trait::async_trait]
impl StoryApi for ReqwestApi {
    async fn list_stories(&self) -> Result<Vec<Story>, ApiError> {
        let url = self.endpoint(&["stories"])?;
        let envelope: StoriesEnvelope = self
            .send_json("GET /stories", self.client.get(url))
            .await?;
        Ok(envelope.stories.into_iter().map(Story::from).collect())
    }

    async fn create_story(&self, token: &AuthToken, story: &NewStory) -> Result<Story, ApiError> {
        let url = self.endpoint(&["stories"])?;
        let body = CreateStoryBody {
            token: token.as_str(),
            story: story.into(),
        };
        let envelope: StoryEnvelope = self
            .send_json("POST /stories", self.client.post(url).json(&body))
            .await?;
        Ok(envelope.story.into())
    }

    async fn delete_story(&self, token: &AuthToken, story_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["stories", story_id])?;
        let body = TokenBody {
            token: token.as_str(),
        };
        self.send("DELETE /stories/{id}", self.client.delete(url).json(&body))
            .await?;
        Ok(())
    }

    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<User, ApiError> {
        let url = self.endpoint(&["signup"])?;
        let body = CredentialsBody {
            user: Credentials {
                username,
                password,
                name: Some(name),
            },
        };
        let envelope: AuthEnvelope = self
            .send_json("POST /signup", self.client.post(url).json(&body))
            .await?;
        Ok(envelope.user.into_user(AuthToken::new(envelope.token)))
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let url = self.endpoint(&["login"])?;
        let body = CredentialsBody {
            user: Credentials {
                username,
                password,
                name: None,
            },
        };
        let envelope: AuthEnvelope = self
            .send_json("POST /login", self.client.post(url).json(&body))
            .await
            .map_err(|err| match err.kind {
                // Unknown usernames come back as 404; to the caller that is a bad login.
                FailureKind::NotFound => ApiError::new(FailureKind::Auth { status: 404 }, err.message),
                _ => err,
            })?;
        Ok(envelope.user.into_user(AuthToken::new(envelope.token)))
    }

    async fn get_user(&self, credential: &StoredCredential) -> Result<User, ApiError> {
        let mut url = self.endpoint(&["users", credential.username.as_str()])?;
        url.query_pairs_mut()
            .append_pair("token", credential.token.as_str());
        let envelope: UserEnvelope = self
            .send_json("GET /users/{username}", self.client.get(url))
            .await?;
        Ok(envelope.user.into_user(credential.token.clone()))
    }

    async fn add_favorite(
        &self,
        token: &AuthToken,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username, "favorites", story_id])?;
        let body = TokenBody {
            token: token.as_str(),
        };
        self.send(
            "POST /users/{username}/favorites/{id}",
            self.client.post(url).json(&body),
        )
        .await?;
        Ok(())
    }

    async fn remove_favorite(
        &self,
        token: &AuthToken,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username, "favorites", story_id])?;
        let body = TokenBody {
            token: token.as_str(),
        };
        self.send(
            "DELETE /users/{username}/favorites/{id}",
            self.client.delete(url).json(&body),
        )
        .await?;
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Network, format!("timed out: {err}"));
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let code = status.as_u16();
    let kind = match code {
        400 | 409 => FailureKind::Validation { status: code },
        401 | 403 => FailureKind::Auth { status: code },
        404 => FailureKind::NotFound,
        _ => FailureKind::Server { status: Some(code) },
    };
    ApiError::new(kind, server_message(body).unwrap_or_else(|| status.to_string()))
}

/// Pulls the human-readable message out of an API error body, if there is one.
fn server_message(body: &[u8]) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    envelope.error.message.or(envelope.error.title)
}
