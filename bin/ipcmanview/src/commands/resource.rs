//! Resource listing commands.
//!
//! `ipcmanview get devices`, `ipcmanview get events --page 2`, etc.
//! Listings run through the same page view-models the graphical front
//! ends use, so URL-style filters behave identically.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use ipcman_pages::devices::{DevicesPage, DevicesQuery};
use ipcman_pages::emails::{EmailDetailState, EmailsPage, EmailsQuery};
use ipcman_pages::events::{EventsPage, EventsQuery};
use ipcman_pages::files::{FilesPage, FilesQuery};
use ipcman_pages::groups::{GroupDetailState, GroupsPage, GroupsQuery};
use ipcman_pages::profile::ProfilePage;
use ipcman_pages::query::dot_decode;
use ipcman_pages::settings::SettingsPage;
use ipcman_pages::users::{UsersPage, UsersQuery};
use ipcman_rpc::types::{GetDeviceReq, HelloReq};
use ipcman_state::{parse_order, PagePagination, PagePaginationResult, SortState};

use crate::commands::build_client;

/// List flags shared by every `get` invocation; each resource picks
/// the ones it understands.
#[derive(Debug, Default)]
pub struct ListFlags {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub device: Option<String>,
    pub codes: Vec<String>,
    pub actions: Vec<String>,
    pub alarm_events: Vec<String>,
    pub month: Option<String>,
}

impl ListFlags {
    fn page_pagination(&self) -> PagePagination {
        PagePagination::new(self.page.unwrap_or(0), self.per_page.unwrap_or(0))
    }

    fn sort_state(&self) -> SortState {
        SortState::from_query(self.sort.as_deref(), self.order.as_deref())
    }

    fn device_ids(&self) -> Vec<i64> {
        dot_decode(self.device.as_deref())
    }
}

pub async fn get(
    resource: &str,
    id: Option<i64>,
    flags: &ListFlags,
    json_output: bool,
    config_path: &Path,
) -> Result<()> {
    let client = build_client(config_path)?;

    match resource.to_lowercase().as_str() {
        "device" | "devices" => {
            if let Some(id) = id {
                let resp = client.admin.get_device(&GetDeviceReq { id }).await?;
                println!("{}", serde_json::to_string_pretty(&resp.device)?);
                return Ok(());
            }

            let page = DevicesPage::new(client);
            let query = DevicesQuery {
                device_ids: flags.device_ids(),
            };
            page.load(&query).await;
            let state = page.state();
            fail_on(&state.error)?;

            let devices = page.visible(&query);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&devices)?);
                return Ok(());
            }
            println!("{:<6} {:<24} {:<32} {}", "ID", "NAME", "URL", "CREATED");
            for d in devices {
                println!(
                    "{:<6} {:<24} {:<32} {}",
                    d.id,
                    d.name,
                    d.url,
                    fmt_time(d.created_at_time)
                );
            }
        }

        "group" | "groups" => {
            if let Some(id) = id {
                let page = GroupsPage::new(client.clone());
                page.open(id).await?;
                let detail = client
                    .store
                    .get_as::<GroupDetailState>(&GroupDetailState::path(id))
                    .unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&detail.group)?);
                for user in detail.users {
                    println!("member: {} ({})", user.username, user.id);
                }
                return Ok(());
            }

            let page = GroupsPage::new(client);
            let query = GroupsQuery {
                page: flags.page_pagination(),
                sort: flags.sort_state(),
            };
            page.load(&query).await;
            let state = page.state();
            fail_on(&state.error)?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&state.groups)?);
                return Ok(());
            }
            println!("{:<6} {:<24} {:<8} {}", "ID", "NAME", "USERS", "DESCRIPTION");
            for g in state.groups {
                println!("{:<6} {:<24} {:<8} {}", g.id, g.name, g.user_count, g.description);
            }
            print_page_result(&state.page_result);
        }

        "user" | "users" => {
            let page = UsersPage::new(client);
            let query = UsersQuery {
                page: flags.page_pagination(),
                sort: flags.sort_state(),
            };
            page.load(&query).await;
            let state = page.state();
            fail_on(&state.error)?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&state.users)?);
                return Ok(());
            }
            println!(
                "{:<6} {:<20} {:<28} {:<6} {}",
                "ID", "USERNAME", "EMAIL", "ADMIN", "DISABLED"
            );
            for u in state.users {
                println!(
                    "{:<6} {:<20} {:<28} {:<6} {}",
                    u.id, u.username, u.email, u.admin, u.disabled
                );
            }
            print_page_result(&state.page_result);
        }

        "event" | "events" => {
            let page = EventsPage::new(client);
            let query = EventsQuery {
                page: flags.page_pagination(),
                sort: flags.sort_state(),
                device_ids: flags.device_ids(),
                codes: flags.codes.clone(),
                actions: flags.actions.clone(),
            };
            page.load(&query).await;
            let state = page.state();
            fail_on(&state.error)?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&state.events)?);
                return Ok(());
            }
            println!(
                "{:<8} {:<8} {:<24} {:<12} {}",
                "ID", "DEVICE", "CODE", "ACTION", "TIME"
            );
            for e in state.events {
                println!(
                    "{:<8} {:<8} {:<24} {:<12} {}",
                    e.id,
                    e.device_id,
                    e.code,
                    e.action,
                    fmt_time(e.created_at_time)
                );
            }
            print_page_result(&state.page_result);
        }

        "email" | "emails" => {
            if let Some(id) = id {
                let page = EmailsPage::new(client.clone());
                page.open(id).await?;
                let detail = client
                    .store
                    .get_as::<EmailDetailState>(&EmailDetailState::path(id))
                    .unwrap_or_default();
                println!("From:    {}", detail.email.from);
                println!("To:      {}", detail.to.join(", "));
                println!("Subject: {}", detail.email.subject);
                println!("Event:   {}", detail.email.alarm_event);
                println!();
                println!("{}", detail.text);
                for attachment in detail.attachments {
                    println!("attachment: {attachment}");
                }
                return Ok(());
            }

            let page = EmailsPage::new(client);
            let query = EmailsQuery {
                page: flags.page_pagination(),
                device_ids: flags.device_ids(),
                alarm_events: flags.alarm_events.clone(),
            };
            page.load(&query).await;
            let state = page.state();
            fail_on(&state.error)?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&state.emails)?);
                return Ok(());
            }
            println!(
                "{:<8} {:<8} {:<28} {:<20} {}",
                "ID", "DEVICE", "SUBJECT", "EVENT", "TIME"
            );
            for m in state.emails {
                println!(
                    "{:<8} {:<8} {:<28} {:<20} {}",
                    m.id,
                    m.device_id,
                    m.subject,
                    m.alarm_event,
                    fmt_time(m.created_at_time)
                );
            }
            print_page_result(&state.page_result);
        }

        "file" | "files" => {
            let page = FilesPage::new(client);
            let query = FilesQuery {
                page: flags.page_pagination(),
                device_ids: flags.device_ids(),
                month_id: flags.month.clone().unwrap_or_default(),
                order: parse_order(flags.order.as_deref()),
            };
            page.load(&query).await;
            let state = page.state();
            fail_on(&state.error)?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&state.files)?);
                return Ok(());
            }
            println!(
                "{:<8} {:<8} {:<40} {:<10} {}",
                "ID", "DEVICE", "PATH", "SIZE", "START"
            );
            for f in state.files {
                println!(
                    "{:<8} {:<8} {:<40} {:<10} {}",
                    f.id,
                    f.device_id,
                    f.file_path,
                    f.size,
                    fmt_time(f.start_time)
                );
            }
            print_page_result(&state.page_result);
        }

        "profile" => {
            let page = ProfilePage::new(client);
            page.load().await;
            let state = page.state();
            fail_on(&state.error)?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&state.sessions)?);
                return Ok(());
            }
            println!("Username: {}", state.username);
            println!("Email:    {}", state.email);
            println!("Admin:    {}", state.admin);
            println!("Created:  {}", fmt_time(state.created_at_time));
            println!();
            println!("{:<8} {:<20} {:<40} {}", "ID", "IP", "USER AGENT", "LAST USED");
            for s in state.sessions {
                let marker = if s.current { "*" } else { " " };
                println!(
                    "{:<8} {:<20} {:<40} {}{marker}",
                    s.id,
                    s.ip,
                    s.user_agent,
                    fmt_time(s.last_used_at_time)
                );
            }
        }

        "setting" | "settings" => {
            let page = SettingsPage::new(client);
            page.load().await;
            let state = page.state();
            fail_on(&state.error)?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&state.settings)?);
                return Ok(());
            }
            println!("Site name:       {}", state.settings.site_name);
            println!("Sign-up enabled: {}", state.settings.sign_up_enabled);
        }

        _ => anyhow::bail!("Unknown resource type: {}", resource),
    }

    Ok(())
}

/// STATUS — greet the server and show counts.
pub async fn status(config_path: &Path) -> Result<()> {
    let config = crate::config::CliConfig::load(config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context."))?;

    println!("Context:   {}", ctx.name);
    println!(
        "Server:    {}",
        if ctx.server.is_empty() { "-" } else { &ctx.server }
    );
    if ctx.server.is_empty() {
        println!("Status:    no server configured");
        return Ok(());
    }

    let client = build_client(config_path)?;
    match client
        .hello_world
        .hello(&HelloReq {
            subject: "ipcmanview".to_string(),
        })
        .await
    {
        Ok(resp) => println!("Status:    connected ({})", resp.text),
        Err(e) => {
            println!("Status:    disconnected ({e})");
            return Ok(());
        }
    }

    let session = client.session.fetch().await?;
    if !session.valid {
        println!("Session:   not signed in");
        return Ok(());
    }
    println!("Session:   {}", session.username);

    if let Ok(home) = client.user.get_home_page().await {
        println!("Devices:   {}", home.device_count);
        println!("Events:    {}", home.event_count);
        println!("Emails:    {}", home.email_count);
        println!("Files:     {}", home.file_count);
    }
    Ok(())
}

fn fail_on(error: &Option<String>) -> Result<()> {
    match error {
        Some(message) => anyhow::bail!("Error: {}", message),
        None => Ok(()),
    }
}

fn fmt_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_page_result(result: &PagePaginationResult) {
    if result.total_pages == 0 {
        return;
    }
    println!(
        "page {}/{} ({} of {} items)",
        result.page, result.total_pages, result.seen_items, result.total_items
    );
}
