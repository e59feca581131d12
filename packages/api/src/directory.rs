//! [`UserDirectory`] over the backend's JSON endpoints.
//!
//! | Call | Route | Success body |
//! |------|-------|--------------|
//! | `list_users` | `GET /api/users?includeApplications=true` | `{ success: true, users }` |
//! | `set_admin` | `POST /api/users/admin` | `{ success: true, user? }` |
//! | `create_user` | `POST /api/users` | `{ user? }` |
//! | `reset_password` | `POST /api/users/reset-password` | `{ success: true }` |
//! | `list_applications` | `GET /api/applicants?id=..&applications=true` | `{ applications? }` |
//!
//! A non-2xx status becomes [`AccessError::Rejected`] carrying the body's `error`
//! or `message` text, as does `success: false`.

use access::{AccessError, ApplicationRecord, SessionUser, UserDirectory, UserDraft, UserRecord};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::join_url;
use crate::session::{fetch_session, SessionError};

#[derive(Clone, Debug)]
pub struct HttpDirectory {
    client: Client,
    base_url: String,
}

impl HttpDirectory {
    /// `base_url` must be absolute (`http://host[:port]`) except when empty on
    /// the web, where the page origin should be passed instead.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// The signed-in user according to the session provider on the same origin.
    pub async fn session(&self) -> Result<Option<SessionUser>, SessionError> {
        fetch_session(&self.client, &self.base_url).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetAdminBody {
    user_id: i64,
    is_admin: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordBody<'a> {
    user_id: i64,
    new_password: &'a str,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    users: Vec<UserRecord>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    success: Option<bool>,
    user: Option<UserRecord>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct StatusEnvelope {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ApplicationsEnvelope {
    applications: Option<Vec<ApplicationRecord>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn unsuccessful(error: Option<String>) -> AccessError {
    AccessError::Rejected(error.unwrap_or_else(|| "Unknown error occurred".to_string()))
}

async fn send(request: RequestBuilder) -> Result<Response, AccessError> {
    #[cfg(target_arch = "wasm32")]
    let request = request.fetch_credentials_include();
    request
        .send()
        .await
        .map_err(|e| AccessError::Transport(e.to_string()))
}

/// Check the status and decode the body as `T`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AccessError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AccessError::Transport(e.to_string()))?;
    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message));
        return Err(AccessError::Rejected(match detail {
            Some(detail) => format!("{status}: {detail}"),
            None => status.to_string(),
        }));
    }
    serde_json::from_str(&text).map_err(|e| AccessError::Decode(e.to_string()))
}

impl UserDirectory for HttpDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, AccessError> {
        let request = self
            .client
            .get(self.url("/api/users"))
            .query(&[("includeApplications", "true")]);
        let body: UsersEnvelope = read_json(send(request).await?).await?;
        if !body.success {
            return Err(unsuccessful(body.error));
        }
        Ok(body.users)
    }

    async fn set_admin(&self, user_id: i64, is_admin: bool) -> Result<Option<UserRecord>, AccessError> {
        let request = self
            .client
            .post(self.url("/api/users/admin"))
            .json(&SetAdminBody { user_id, is_admin });
        let body: UserEnvelope = read_json(send(request).await?).await?;
        if body.success != Some(true) {
            return Err(unsuccessful(body.error));
        }
        tracing::debug!(user_id, is_admin, echoed = body.user.is_some(), "admin flag set");
        Ok(body.user)
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<Option<UserRecord>, AccessError> {
        let request = self.client.post(self.url("/api/users")).json(draft);
        let body: UserEnvelope = read_json(send(request).await?).await?;
        // This route reports failure through the status code only.
        if body.success == Some(false) {
            return Err(unsuccessful(body.error));
        }
        Ok(body.user)
    }

    async fn reset_password(&self, user_id: i64, new_password: &str) -> Result<(), AccessError> {
        let request = self
            .client
            .post(self.url("/api/users/reset-password"))
            .json(&ResetPasswordBody {
                user_id,
                new_password,
            });
        let body: StatusEnvelope = read_json(send(request).await?).await?;
        if !body.success {
            return Err(unsuccessful(body.error));
        }
        Ok(())
    }

    async fn list_applications(&self, applicant_id: i64) -> Result<Vec<ApplicationRecord>, AccessError> {
        let request = self
            .client
            .get(self.url("/api/applicants"))
            .query(&[("id", applicant_id.to_string()), ("applications", "true".to_string())]);
        let body: ApplicationsEnvelope = read_json(send(request).await?).await?;
        Ok(body.applications.unwrap_or_default())
    }
}
