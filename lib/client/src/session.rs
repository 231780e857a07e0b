//! Cookie-based session against the `/v1/session` resource.
//!
//! `GET` returns the current session — a 401 still carries a (not
//! valid) session body, so both decode the same way. `POST` signs in,
//! `DELETE` signs out; the session cookie itself lives in the HTTP
//! client's cookie store. Fetched sessions are published to the state
//! store and snapshotted locally so the next start can render the
//! signed-in chrome before the first round-trip.

use std::sync::Arc;

use ipcman_state::StateStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::storage::{LocalStorage, KEY_AUTH, KEY_SESSION};

/// Store path of the current session.
pub const SESSION_PATH: &str = "session";

/// Server session descriptor. Field names match the server's JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub valid: bool,
    pub username: String,
    pub admin: bool,
    pub user_id: i64,
    pub disabled: bool,
}

/// Last sign-in form state, persisted to prefill the next attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSnapshot {
    pub username_or_email: String,
    pub remember_me: bool,
}

#[derive(Error, Debug)]
pub enum SessionError {
    /// Server rejected the request; the message is shown to the user.
    #[error("{0}")]
    Rejected(String),
    #[error("invalid status code {0}")]
    Status(u16),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInBody<'a> {
    username_or_email: &'a str,
    password: &'a str,
    remember_me: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ErrorBody {
    message: String,
}

pub struct SessionService {
    http: reqwest::Client,
    base_url: String,
    store: Arc<StateStore>,
    storage: Arc<LocalStorage>,
}

impl SessionService {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        store: Arc<StateStore>,
        storage: Arc<LocalStorage>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            storage,
        }
    }

    fn url(&self) -> String {
        format!("{}/v1/session", self.base_url)
    }

    /// Fetch the current session and publish it.
    pub async fn fetch(&self) -> Result<Session, SessionError> {
        let resp = self
            .http
            .get(self.url())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() && status.as_u16() != 401 {
            return Err(SessionError::Status(status.as_u16()));
        }

        let session: Session = resp.json().await?;
        debug!(valid = session.valid, username = %session.username, "session fetched");
        self.publish(&session);
        Ok(session)
    }

    /// Sign in and revalidate the session.
    pub async fn sign_in(
        &self,
        username_or_email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Session, SessionError> {
        let resp = self
            .http
            .post(self.url())
            .json(&SignInBody {
                username_or_email,
                password,
                remember_me,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::rejected(resp).await);
        }

        let _ = self.storage.set(
            KEY_AUTH,
            &AuthSnapshot {
                username_or_email: username_or_email.to_string(),
                remember_me,
            },
        );
        self.fetch().await
    }

    /// Sign out and revalidate (to the signed-out session).
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let resp = self.http.delete(self.url()).send().await?;
        if !resp.status().is_success() {
            return Err(Self::rejected(resp).await);
        }
        self.fetch().await?;
        Ok(())
    }

    /// Last published session: the store's copy, falling back to the
    /// persisted snapshot, falling back to a signed-out session.
    pub fn cached(&self) -> Session {
        self.store
            .get_as::<Session>(SESSION_PATH)
            .or_else(|| self.storage.get::<Session>(KEY_SESSION))
            .unwrap_or_default()
    }

    /// Persisted sign-in form state, if any.
    pub fn last_sign_in(&self) -> Option<AuthSnapshot> {
        self.storage.get::<AuthSnapshot>(KEY_AUTH)
    }

    /// Restore the persisted snapshot into the store without a
    /// round-trip (start-up path).
    pub fn restore(&self) {
        if let Some(session) = self.storage.get::<Session>(KEY_SESSION) {
            self.store.set(SESSION_PATH, session);
        }
    }

    fn publish(&self, session: &Session) {
        self.store.set(SESSION_PATH, session.clone());
        let _ = self.storage.set(KEY_SESSION, session);
    }

    async fn rejected(resp: reqwest::Response) -> SessionError {
        let status = resp.status().as_u16();
        match resp.json::<ErrorBody>().await {
            Ok(body) if !body.message.is_empty() => SessionError::Rejected(body.message),
            _ => SessionError::Status(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_decodes_server_field_names() {
        let session: Session = serde_json::from_str(
            r#"{"admin":true,"disabled":false,"user_id":7,"username":"admin","valid":true}"#,
        )
        .unwrap();
        assert!(session.valid);
        assert!(session.admin);
        assert_eq!(session.user_id, 7);
        assert_eq!(session.username, "admin");
    }

    #[test]
    fn unauthorized_body_decodes_to_invalid_session() {
        // A 401 GET carries an empty session object.
        let session: Session = serde_json::from_str("{}").unwrap();
        assert_eq!(session, Session::default());
        assert!(!session.valid);
    }

    #[test]
    fn sign_in_body_uses_camel_case() {
        let body = SignInBody {
            username_or_email: "admin@example.com",
            password: "hunter2",
            remember_me: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["usernameOrEmail"], "admin@example.com");
        assert_eq!(json["rememberMe"], true);
    }

    #[tokio::test]
    async fn restore_publishes_snapshot_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::open(dir.path().join("s.json")).unwrap());
        storage
            .set(
                KEY_SESSION,
                &Session {
                    valid: true,
                    username: "admin".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        let store = Arc::new(StateStore::new());
        let service = SessionService::new(
            reqwest::Client::new(),
            "http://localhost:8080",
            store.clone(),
            storage,
        );
        service.restore();

        let session = store.get_as::<Session>(SESSION_PATH).unwrap();
        assert!(session.valid);
        assert_eq!(service.cached().username, "admin");
    }
}
