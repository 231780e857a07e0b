//! Context subcommands.

use std::path::Path;

use anyhow::Result;

use crate::config::{CliConfig, Context};

/// Create a context and switch to it.
pub fn create(name: &str, server: &str, config_path: &Path) -> Result<()> {
    let mut config = CliConfig::load(config_path)?;

    if config.get_mut(name).is_some() {
        anyhow::bail!("Context \"{}\" already exists.", name);
    }

    config.contexts.push(Context {
        name: name.to_string(),
        server: server.trim_end_matches('/').to_string(),
        session_cookie: String::new(),
    });
    config.current_context = name.to_string();
    config.save(config_path)?;

    println!("Context \"{}\" created and selected.", name);
    Ok(())
}

pub fn list(config_path: &Path) -> Result<()> {
    let config = CliConfig::load(config_path)?;

    if config.contexts.is_empty() {
        println!("No contexts. Run `ipcmanview context create <name> --server <url>`.");
        return Ok(());
    }

    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context {
            "*"
        } else {
            " "
        };
        let server = if ctx.server.is_empty() { "-" } else { &ctx.server };
        let session = if ctx.session_cookie.is_empty() {
            "signed out"
        } else {
            "signed in"
        };
        println!("{marker} {:<20} {:<32} {session}", ctx.name, server);
    }
    Ok(())
}

pub fn set(name: &str, server: Option<&str>, config_path: &Path) -> Result<()> {
    let mut config = CliConfig::load(config_path)?;
    let ctx = config
        .get_mut(name)
        .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", name))?;

    if let Some(server) = server {
        ctx.server = server.trim_end_matches('/').to_string();
        // A different server invalidates the stored session.
        ctx.session_cookie = String::new();
    }

    config.save(config_path)?;
    println!("Context \"{}\" updated.", name);
    Ok(())
}

pub fn delete(name: &str, config_path: &Path) -> Result<()> {
    let mut config = CliConfig::load(config_path)?;
    if !config.remove(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }
    config.save(config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}

pub fn use_context(name: &str, config_path: &Path) -> Result<()> {
    let mut config = CliConfig::load(config_path)?;
    if config.get_mut(name).is_none() {
        anyhow::bail!("Context \"{}\" not found.", name);
    }
    config.current_context = name.to_string();
    config.save(config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}
