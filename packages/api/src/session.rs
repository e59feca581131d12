//! Session lookup against the auth provider (`GET /api/auth/session`).
//!
//! The provider answers `{ "user": { ... } }` for a signed-in browser and `{}`
//! (or `null`) otherwise.

use access::SessionUser;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::join_url;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session request failed: {0}")]
    Transport(String),
    #[error("session provider returned {0}")]
    Status(u16),
    #[error("malformed session response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct SessionBody {
    user: Option<SessionUser>,
}

/// Fetch the current session. `Ok(None)` means signed out.
pub async fn fetch_session(client: &Client, base_url: &str) -> Result<Option<SessionUser>, SessionError> {
    let request = client.get(join_url(base_url, "/api/auth/session"));
    #[cfg(target_arch = "wasm32")]
    let request = request.fetch_credentials_include();
    let response = request
        .send()
        .await
        .map_err(|e| SessionError::Transport(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(SessionError::Status(status.as_u16()));
    }
    let text = response
        .text()
        .await
        .map_err(|e| SessionError::Transport(e.to_string()))?;
    let body: Option<SessionBody> =
        serde_json::from_str(&text).map_err(|e| SessionError::Decode(e.to_string()))?;
    Ok(body.and_then(|b| b.user))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn session_route(body: Value) -> Router {
        Router::new().route("/api/auth/session", get(move || async move { Json(body) }))
    }

    #[tokio::test]
    async fn test_signed_in_session() {
        let url = spawn(session_route(json!({
            "user": { "id": "17", "email": "lee@launchpad.test", "first_name": "Lee", "last_name": "Chan", "isAdmin": true },
            "expires": "2030-01-01T00:00:00.000Z"
        })))
        .await;
        let user = fetch_session(&Client::new(), &url).await.unwrap().unwrap();
        assert_eq!(user.record_id(), Some(17));
        assert_eq!(user.first_name, "Lee");
        assert!(user.is_admin);
    }

    #[tokio::test]
    async fn test_empty_object_and_null_mean_signed_out() {
        let url = spawn(session_route(json!({}))).await;
        assert!(fetch_session(&Client::new(), &url).await.unwrap().is_none());
        let url = spawn(session_route(Value::Null)).await;
        assert!(fetch_session(&Client::new(), &url).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_error_status() {
        let app = Router::new().route(
            "/api/auth/session",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let url = spawn(app).await;
        let err = fetch_session(&Client::new(), &url).await.unwrap_err();
        assert!(matches!(err, SessionError::Status(500)));
    }
}
