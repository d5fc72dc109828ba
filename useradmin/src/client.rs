//! REST client for the users API
//!
//! Each operation is a single HTTP call. There is no retry, timeout or
//! backoff: a network failure is returned as [`Error::Transport`] and a
//! non-2xx answer as [`Error::Status`].

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::ids::UserId;
use crate::models::{ListPayload, SavedUser, User, UserInput};

/// Collection path relative to the base URL
pub const USERS_PATH: &str = "api/v1/users";

/// Operations the views need from the backend
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /api/v1/users`
    async fn list_users(&self) -> Result<Vec<User>>;

    /// `GET /api/v1/users/{id}`
    async fn get_user(&self, id: &UserId) -> Result<User>;

    /// `POST /api/v1/users`
    async fn create_user(&self, input: &UserInput) -> Result<SavedUser>;

    /// `PUT /api/v1/users/{id}`
    async fn update_user(&self, id: &UserId, input: &UserInput) -> Result<SavedUser>;

    /// `DELETE /api/v1/users/{id}`
    async fn delete_user(&self, id: &UserId) -> Result<()>;
}

/// HTTP implementation of [`UserApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    users_url: Url,
}

impl ApiClient {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: &Url) -> Result<Self> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let users_url = base
            .join(USERS_PATH)
            .map_err(|e| Error::InvalidBaseUrl(format!("{base}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(concat!("useradmin/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, users_url })
    }

    /// Create a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url()?)
    }

    /// URL of the user collection
    pub fn users_url(&self) -> &Url {
        &self.users_url
    }

    fn user_url(&self, id: &UserId) -> Url {
        let mut url = self.users_url.clone();
        // users_url is always a base URL, so path_segments_mut cannot fail
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    /// Turn a non-2xx response into [`Error::Status`]
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body).ok().and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
        });

        tracing::warn!(
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "Users API returned an error"
        );

        Err(Error::Status { status, message })
    }

    async fn saved(response: Response) -> Result<SavedUser> {
        let body = Self::check(response).await?.text().await?;
        Ok(SavedUser::from_body(&body))
    }
}

#[async_trait]
impl UserApi for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        tracing::debug!(url = %self.users_url, "GET users");

        let response = self.http.get(self.users_url.clone()).send().await?;
        let body = Self::check(response).await?.text().await?;
        let payload: ListPayload = serde_json::from_str(&body)?;
        let users = payload.into_users();

        tracing::debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    async fn get_user(&self, id: &UserId) -> Result<User> {
        let url = self.user_url(id);
        tracing::debug!(url = %url, "GET user");

        let response = self.http.get(url).send().await?;
        let body = Self::check(response).await?.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        let record = match value.get("data") {
            Some(data) if data.is_object() => data,
            Some(data) => {
                return Err(Error::Decode(format!(
                    "expected a user record in `data`, got {data}"
                )))
            }
            None => &value,
        };
        Ok(User::deserialize(record)?)
    }

    async fn create_user(&self, input: &UserInput) -> Result<SavedUser> {
        tracing::debug!(url = %self.users_url, "POST user");

        let response = self
            .http
            .post(self.users_url.clone())
            .json(input)
            .send()
            .await?;
        Self::saved(response).await
    }

    async fn update_user(&self, id: &UserId, input: &UserInput) -> Result<SavedUser> {
        let url = self.user_url(id);
        tracing::debug!(url = %url, "PUT user");

        let response = self.http.put(url).json(input).send().await?;
        Self::saved(response).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<()> {
        let url = self.user_url(id);
        tracing::debug!(url = %url, "DELETE user");

        let response = self.http.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
