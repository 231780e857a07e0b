//! The assembled client: one object a front end is handed explicitly.

use std::path::PathBuf;
use std::sync::Arc;

use ipcman_rpc::{
    AdminClient, AuthClient, HelloWorldClient, Interceptor, RpcError, TwirpTransport, UserClient,
};
use ipcman_state::{EventBus, StateStore};
use thiserror::Error;
use tracing::debug;

use crate::session::SessionService;
use crate::storage::{LocalStorage, StorageError};
use crate::theme::ThemeStore;
use crate::ws::{ws_url, LiveEvent, WsChannel};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Path of the local snapshot file.
    pub storage_path: PathBuf,
    /// Previously issued session cookie value, for processes that do
    /// not live as long as the session (the CLI).
    pub session_cookie: Option<String>,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Revalidates the cached session whenever a call completes
/// `unauthenticated`, so the front end can react (redirect to sign-in)
/// while the failing call's error still reaches its caller.
struct SessionRevalidator {
    session: Arc<SessionService>,
}

impl Interceptor for SessionRevalidator {
    fn call_done(&self, service: &str, method: &str, error: Option<&RpcError>) {
        if error.is_some_and(RpcError::is_unauthenticated) {
            debug!(service, method, "unauthenticated rpc, revalidating session");
            let session = Arc::clone(&self.session);
            tokio::spawn(async move {
                let _ = session.fetch().await;
            });
        }
    }
}

/// Everything a rendering layer needs, wired together once.
pub struct Client {
    pub store: Arc<StateStore>,
    pub storage: Arc<LocalStorage>,
    pub session: Arc<SessionService>,
    pub theme: ThemeStore,
    pub events: Arc<EventBus<LiveEvent>>,

    pub hello_world: HelloWorldClient,
    pub auth: AuthClient,
    pub user: UserClient,
    pub admin: AdminClient,

    base_url: String,
}

impl Client {
    pub fn connect(config: ClientConfig) -> Result<Arc<Self>, ClientError> {
        let jar = Arc::new(reqwest::cookie::Jar::default());
        if let Some(cookie) = &config.session_cookie {
            let url = reqwest::Url::parse(&config.base_url)
                .map_err(|e| ClientError::BaseUrl(e.to_string()))?;
            jar.add_cookie_str(&format!("session={cookie}"), &url);
        }
        let http = reqwest::Client::builder().cookie_provider(jar).build()?;
        let store = Arc::new(StateStore::new());
        let storage = Arc::new(LocalStorage::open(&config.storage_path)?);

        let session = Arc::new(SessionService::new(
            http.clone(),
            config.base_url.clone(),
            store.clone(),
            storage.clone(),
        ));
        // Let the first render use the snapshot while a fresh fetch is
        // in flight.
        session.restore();

        let theme = ThemeStore::new(store.clone(), storage.clone());

        let transport = Arc::new(
            TwirpTransport::new(http, config.base_url.clone()).with_interceptor(Arc::new(
                SessionRevalidator {
                    session: session.clone(),
                },
            )),
        );

        Ok(Arc::new(Self {
            store,
            storage,
            session,
            theme,
            events: Arc::new(EventBus::new()),
            hello_world: HelloWorldClient::new(transport.clone()),
            auth: AuthClient::new(transport.clone()),
            user: UserClient::new(transport.clone()),
            admin: AdminClient::new(transport),
            base_url: config.base_url,
        }))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the live-event channel; the caller owns the reader task.
    pub fn ws_channel(&self) -> WsChannel {
        WsChannel::new(
            ws_url(&self.base_url),
            self.store.clone(),
            self.events.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SESSION_PATH};
    use crate::storage::KEY_SESSION;
    use crate::theme::THEME_PATH;
    use crate::theme::Theme;

    fn client(dir: &tempfile::TempDir) -> Arc<Client> {
        Client::connect(ClientConfig {
            base_url: "http://localhost:8080".to_string(),
            storage_path: dir.path().join("storage.json"),
            session_cookie: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn connect_restores_persisted_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = LocalStorage::open(dir.path().join("storage.json")).unwrap();
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
        }

        let client = client(&dir);
        let session = client.store.get_as::<Session>(SESSION_PATH).unwrap();
        assert!(session.valid);
        assert_eq!(client.store.get_as::<Theme>(THEME_PATH), Some(Theme::System));
    }

    #[tokio::test]
    async fn ws_channel_targets_the_server() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir);
        let _channel = client.ws_channel();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
