pub mod context;
pub mod login;
pub mod prefs;
pub mod resource;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use ipcman_client::{Client, ClientConfig};

use crate::config::{self, CliConfig};

/// Build the client stack for the current context.
pub fn build_client(config_path: &Path) -> Result<Arc<Client>> {
    let config = CliConfig::load(config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `ipcmanview use context <name>`."))?;

    if ctx.server.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `ipcmanview context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }

    let session_cookie = (!ctx.session_cookie.is_empty()).then(|| ctx.session_cookie.clone());
    Ok(Client::connect(ClientConfig {
        base_url: ctx.server.clone(),
        storage_path: config::storage_path(&ctx.name),
        session_cookie,
    })?)
}

/// Like [`build_client`], but without requiring a server URL — for
/// purely local commands (theme preferences).
pub fn build_local_client(config_path: &Path) -> Result<Arc<Client>> {
    let config = CliConfig::load(config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `ipcmanview use context <name>`."))?;

    Ok(Client::connect(ClientConfig {
        base_url: ctx.server.clone(),
        storage_path: config::storage_path(&ctx.name),
        session_cookie: None,
    })?)
}
