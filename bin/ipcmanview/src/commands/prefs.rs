//! Theme preference commands. Purely local — no server round-trip.

use std::path::Path;

use anyhow::Result;
use ipcman_client::Theme;

use crate::commands::build_local_client;

fn theme_name(theme: Theme) -> &'static str {
    match theme {
        Theme::System => "system",
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

pub fn show(config_path: &Path) -> Result<()> {
    let client = build_local_client(config_path)?;
    println!("{}", theme_name(client.theme.current()));
    Ok(())
}

pub fn set(theme: &str, config_path: &Path) -> Result<()> {
    let theme = match theme {
        "system" => Theme::System,
        "light" => Theme::Light,
        "dark" => Theme::Dark,
        other => anyhow::bail!("Unknown theme \"{}\" (system, light, dark).", other),
    };
    let client = build_local_client(config_path)?;
    client.theme.set(theme)?;
    println!("Theme set to {}.", theme_name(theme));
    Ok(())
}

pub fn toggle(config_path: &Path) -> Result<()> {
    let client = build_local_client(config_path)?;
    let next = client.theme.toggle()?;
    println!("Theme set to {}.", theme_name(next));
    Ok(())
}
