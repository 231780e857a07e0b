//! `ipcmanview` — CLI client for the IPCManView dashboard server.
//!
//! Manages contexts, authentication, and resource listings over the
//! same client stack the graphical front ends use.

mod commands;
mod config;

use clap::{Parser, Subcommand};

/// IPCManView CLI client.
#[derive(Parser, Debug)]
#[command(name = "ipcmanview", about = "IPCManView CLI client")]
struct Cli {
    /// Path to the CLI config file (default: ~/.ipcmanview/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Context management.
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Sign in to the current context's server.
    Login {
        /// Username or email.
        #[arg(long)]
        user: Option<String>,
        /// Password (not recommended — use the interactive prompt).
        #[arg(long)]
        password: Option<String>,
        /// Request a long-lived session.
        #[arg(long = "remember-me")]
        remember_me: bool,
    },

    /// Sign out — invalidate and forget the session.
    Logout,

    /// Create an account on the current context's server.
    Signup {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },

    /// Request a password-recovery email.
    #[command(name = "forgot-password")]
    ForgotPassword {
        #[arg(long)]
        email: Option<String>,
    },

    /// Show the current session.
    Session,

    /// List resource(s): devices, groups, users, events, emails, files,
    /// settings, profile.
    Get {
        /// Resource type.
        resource: String,
        /// Optional resource ID for a single get.
        id: Option<i64>,
        /// Page number.
        #[arg(long)]
        page: Option<i32>,
        /// Rows per page.
        #[arg(long = "per-page")]
        per_page: Option<i32>,
        /// Sort field.
        #[arg(long)]
        sort: Option<String>,
        /// Sort order: asc or desc.
        #[arg(long)]
        order: Option<String>,
        /// Device ID filter, dot-delimited (e.g. 1.2.3).
        #[arg(long)]
        device: Option<String>,
        /// Event code filter (repeatable).
        #[arg(long)]
        code: Vec<String>,
        /// Event action filter (repeatable).
        #[arg(long)]
        action: Vec<String>,
        /// Alarm-event filter for emails (repeatable).
        #[arg(long = "alarm-event")]
        alarm_event: Vec<String>,
        /// Month filter for files (YYYY-MM).
        #[arg(long)]
        month: Option<String>,
    },

    /// Stream live device events.
    Watch,

    /// Check server status.
    Status,

    /// Theme preference.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context and make it current.
    Create {
        /// Context name.
        name: String,
        /// Server base URL.
        #[arg(long)]
        server: String,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    /// Print the current theme.
    Show,
    /// Set the theme: system, light or dark.
    Set { theme: String },
    /// Cycle light -> dark -> system.
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::CliConfig::default_path);
    let json_output = cli.output == "json";

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create { name, server } => {
                commands::context::create(&name, &server, &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login {
            user,
            password,
            remember_me,
        } => {
            let user = match user {
                Some(user) => user,
                None => commands::login::prompt_user(&config_path)?,
            };
            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("Password: ")?,
            };
            commands::login::login(&user, &password, remember_me, &config_path).await?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path).await?;
        }

        Commands::Signup { email, user } => {
            commands::login::signup(email, user, &config_path).await?;
        }

        Commands::ForgotPassword { email } => {
            commands::login::forgot_password(email, &config_path).await?;
        }

        Commands::Session => {
            commands::login::session(json_output, &config_path).await?;
        }

        Commands::Get {
            resource,
            id,
            page,
            per_page,
            sort,
            order,
            device,
            code,
            action,
            alarm_event,
            month,
        } => {
            let flags = commands::resource::ListFlags {
                page,
                per_page,
                sort,
                order,
                device,
                codes: code,
                actions: action,
                alarm_events: alarm_event,
                month,
            };
            commands::resource::get(&resource, id, &flags, json_output, &config_path).await?;
        }

        Commands::Watch => {
            commands::watch::watch(&config_path).await?;
        }

        Commands::Status => {
            commands::resource::status(&config_path).await?;
        }

        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::prefs::show(&config_path)?,
            ThemeAction::Set { theme } => commands::prefs::set(&theme, &config_path)?,
            ThemeAction::Toggle => commands::prefs::toggle(&config_path)?,
        },

        Commands::Version => {
            println!("ipcmanview cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
