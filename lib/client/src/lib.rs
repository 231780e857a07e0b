//! Client facade for the IPCManView dashboard.
//!
//! Owns everything a rendering layer needs, passed explicitly rather
//! than reached for as a global:
//!
//! - the shared [`ipcman_state::StateStore`]
//! - the Twirp service clients, wired with session revalidation
//! - the `/v1/session` REST client (cookie-based)
//! - theme and menu preferences, persisted locally
//! - the `/v1/ws` live-event channel feeding the [`ipcman_state::EventBus`]
//!
//! Local persistence is a small JSON key file — a cache to avoid
//! blocking first render, never a source of truth.

pub mod client;
pub mod session;
pub mod storage;
pub mod theme;
pub mod ws;

pub use client::{Client, ClientConfig, ClientError};
pub use session::{Session, SessionError, SessionService, SESSION_PATH};
pub use storage::{LocalStorage, StorageError};
pub use theme::{Theme, ThemeStore, THEME_PATH};
pub use ws::{ws_url, LiveEvent, WsChannel, WsState, WS_STATE_PATH};
