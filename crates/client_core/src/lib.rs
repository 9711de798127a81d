use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{User, UserId},
    protocol::{user_path, CreateUserRequest, USERS_PATH},
};
use tracing::debug;
use url::Url;

mod busy;
pub mod controller;
pub mod error;

pub use busy::Activity;
pub use controller::{ControllerState, UserListController};
pub use error::UserListError;

/// The external user API. One call is one attempt; implementations do not retry.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, request: CreateUserRequest) -> Result<User>;
    async fn delete_user(&self, user_id: UserId) -> Result<()>;
}

pub struct HttpUserApi {
    http: Client,
    server_url: String,
}

impl HttpUserApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint(USERS_PATH);
        debug!(%url, "listing users");
        let users = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<User>>()
            .await
            .context("user list response was not a JSON array of users")?;
        Ok(users)
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let url = self.endpoint(USERS_PATH);
        debug!(%url, name = %request.name, "creating user");
        let user = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<User>()
            .await
            .context("create user response was not a user record")?;
        Ok(user)
    }

    async fn delete_user(&self, user_id: UserId) -> Result<()> {
        let url = self.endpoint(&user_path(user_id));
        debug!(%url, "deleting user");
        self.http.delete(url).send().await?.error_for_status()?;
        Ok(())
    }
}

/// Validates a user-supplied base URL and strips trailing slashes so paths can
/// be appended verbatim.
pub fn normalize_server_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).with_context(|| format!("invalid server url '{raw}'"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(anyhow!("unsupported server url scheme '{other}'")),
    }
    if parsed.host_str().is_none() {
        return Err(anyhow!("server url '{raw}' has no host"));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
