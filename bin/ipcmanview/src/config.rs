//! CLI context management.
//!
//! Reads/writes `~/.ipcmanview/config.toml`. A context is one dashboard
//! server plus the session cookie issued by it; per-context client
//! snapshots (theme, cached session) live next to it under
//! `~/.ipcmanview/<context>/`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single context — connection to one IPCManView server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Context name (e.g. "home", "warehouse").
    pub name: String,

    /// Server base URL (e.g. "http://localhost:8080").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Session cookie value (set by `ipcmanview login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session_cookie: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl CliConfig {
    /// Default config file path: ~/.ipcmanview/config.toml.
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from disk, or start empty when the file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn current(&self) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == self.current_context)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Remove a context by name. Returns true when it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < before
    }
}

/// Per-context snapshot file for the client library.
pub fn storage_path(context_name: &str) -> PathBuf {
    config_dir().join(context_name).join("storage.json")
}

fn config_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ipcmanview")
}
