//! Live event stream.

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use ipcman_client::LiveEvent;

use crate::commands::build_client;

/// Stream `/v1/ws` envelopes to stdout until interrupted.
pub async fn watch(config_path: &Path) -> Result<()> {
    let client = build_client(config_path)?;

    client.events.subscribe(|event: &LiveEvent| {
        let stamp = Local::now().format("%H:%M:%S");
        match event.kind.as_str() {
            "dahua-event" => {
                let code = event.data["code"].as_str().unwrap_or("?");
                let index = event.data["index"].as_i64().unwrap_or_default();
                println!("{stamp} dahua-event code={code} index={index}");
            }
            _ => {
                let action = event.data["action"].as_str().unwrap_or("?");
                println!("{stamp} event action={action}");
            }
        }
    });

    let channel = client.ws_channel();
    let reader = tokio::spawn(async move { channel.run().await });

    eprintln!("Watching for events. Press Ctrl-C to stop.");
    tokio::signal::ctrl_c().await?;
    reader.abort();
    Ok(())
}
