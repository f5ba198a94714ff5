//! JSON-over-HTTP user repository.
//!
//! | op | verb | path |
//! |---|---|---|
//! | list | `GET` | `{base}/users` |
//! | find | `GET` | `{base}/users/{id}` |
//! | add | `POST` | `{base}/users` |
//! | edit | `PUT` | `{base}/users/{id}` |
//! | delete | `DELETE` | `{base}/users/{id}` |
//!
//! Non-2xx responses are read as `{code, message}` when the body allows,
//! falling back to the HTTP status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{RepositoryError, UserRepository};
use crate::config::ApiConfig;
use crate::constants::{APP_NAME, USERS_PATH, VERSION};
use crate::models::{User, UserDraft, UserId, UserList};

/// [`UserRepository`] backed by a REST endpoint.
pub struct HttpUserRepository {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpUserRepository {
    /// Build a repository from the API section of the config.
    pub fn new(config: &ApiConfig) -> Result<Self, RepositoryError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RepositoryError::transport(format!("invalid API base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::transport(format!(
                "invalid API base URL '{}': not a base URL",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("{APP_NAME}/{VERSION}"))
            .build()
            .map_err(|e| RepositoryError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// `{base}/users` or `{base}/users/{id}`, with the id percent-encoded.
    pub fn url(&self, id: Option<&UserId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(USERS_PATH);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &'static str,
    ) -> Result<T, RepositoryError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            debug!(op, error = %e, "request failed before a response");
            RepositoryError::transport(format!("{op} request failed: {e}"))
        })?;

        let status = response.status();
        debug!(op, %status, "response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }

        response.json::<T>().await.map_err(|e| {
            RepositoryError::transport(format!("{op}: unexpected response body: {e}"))
        })
    }
}

/// Error body as servers actually send it: `code` may be any JSON value.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Turn a non-2xx response into a [`RepositoryError`].
fn error_from_response(status: StatusCode, body: &str) -> RepositoryError {
    let reason = status.canonical_reason().unwrap_or("request failed");
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            let code = parsed
                .code
                .as_ref()
                .and_then(serde_json::Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(status.as_u16());
            let message = match parsed.message {
                Some(m) if !m.trim().is_empty() => m,
                _ => reason.to_string(),
            };
            RepositoryError::new(Some(code), message)
        }
        Err(_) => {
            let text = body.trim();
            let message = if text.is_empty() { reason } else { text };
            RepositoryError::new(Some(status.as_u16()), message)
        }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn list_users(&self) -> Result<UserList, RepositoryError> {
        self.send(self.client.get(self.url(None)), "list users").await
    }

    async fn find_user(&self, id: &UserId) -> Result<User, RepositoryError> {
        self.send(self.client.get(self.url(Some(id))), "find user").await
    }

    async fn add_user(&self, draft: &UserDraft) -> Result<User, RepositoryError> {
        self.send(self.client.post(self.url(None)).json(draft), "add user")
            .await
    }

    async fn edit_user(&self, id: &UserId, draft: &UserDraft) -> Result<User, RepositoryError> {
        self.send(self.client.put(self.url(Some(id))).json(draft), "edit user")
            .await
    }

    async fn delete_user(&self, id: &UserId) -> Result<User, RepositoryError> {
        self.send(self.client.delete(self.url(Some(id))), "delete user")
            .await
    }
}
