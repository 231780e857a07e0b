//! Sign-in / sign-out / sign-up commands.

use std::path::Path;

use anyhow::Result;

use crate::commands::build_client;
use crate::config::CliConfig;

/// Default the username prompt to the last sign-in, if one is cached.
pub fn prompt_user(config_path: &Path) -> Result<String> {
    let prefill = build_client(config_path)
        .ok()
        .and_then(|client| client.session.last_sign_in())
        .map(|auth| auth.username_or_email)
        .unwrap_or_default();

    if prefill.is_empty() {
        eprint!("Username or email: ");
    } else {
        eprint!("Username or email [{prefill}]: ");
    }
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let input = input.trim();
    if input.is_empty() && !prefill.is_empty() {
        return Ok(prefill);
    }
    if input.is_empty() {
        anyhow::bail!("Username cannot be empty.");
    }
    Ok(input.to_string())
}

/// Sign in against `/v1/session` and store the issued cookie in the
/// current context.
pub async fn login(
    user: &str,
    password: &str,
    remember_me: bool,
    config_path: &Path,
) -> Result<()> {
    let mut config = CliConfig::load(config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `ipcmanview use context <name>`."))?
        .clone();

    if ctx.server.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `ipcmanview context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }

    let url = format!("{}/v1/session", ctx.server.trim_end_matches('/'));
    let body = serde_json::json!({
        "usernameOrEmail": user,
        "password": password,
        "rememberMe": remember_me,
    });

    let http = reqwest::Client::new();
    let resp = http
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("failed to connect to server: {}", e))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| "unknown error".to_string());
        anyhow::bail!("Login failed ({}): {}", status, message);
    }

    let cookie = resp
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.value().to_string())
        .ok_or_else(|| anyhow::anyhow!("No session cookie in response"))?;

    let ctx_mut = config
        .get_mut(&ctx.name)
        .ok_or_else(|| anyhow::anyhow!("Context disappeared"))?;
    ctx_mut.session_cookie = cookie;
    config.save(config_path)?;

    println!("Logged in as {}.", user);
    println!("Session saved to context \"{}\".", ctx.name);
    Ok(())
}

/// Invalidate the server session, then forget the cookie.
pub async fn logout(config_path: &Path) -> Result<()> {
    let mut config = CliConfig::load(config_path)?;
    let current_name = config.current_context.clone();
    if current_name.is_empty() {
        anyhow::bail!("No current context.");
    }

    if let Ok(client) = build_client(config_path) {
        if let Err(e) = client.session.sign_out().await {
            // The cookie is forgotten either way; a dead server should
            // not keep us signed in locally.
            eprintln!("Warning: server sign-out failed: {e}");
        }
    }

    let ctx = config
        .get_mut(&current_name)
        .ok_or_else(|| anyhow::anyhow!("Current context not found."))?;
    ctx.session_cookie = String::new();
    config.save(config_path)?;
    println!("Logged out from context \"{}\".", current_name);
    Ok(())
}

/// Create an account via the auth service.
pub async fn signup(email: Option<String>, user: Option<String>, config_path: &Path) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => {
            eprint!("Email: ");
            let mut s = String::new();
            std::io::stdin().read_line(&mut s)?;
            s.trim().to_string()
        }
    };
    let user = match user {
        Some(user) => user,
        None => {
            eprint!("Username: ");
            let mut s = String::new();
            std::io::stdin().read_line(&mut s)?;
            s.trim().to_string()
        }
    };
    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match.");
    }
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty.");
    }

    let client = build_client(config_path)?;
    let resp = client
        .auth
        .sign_up(&ipcman_rpc::types::SignUpReq {
            email,
            username: user.clone(),
            password,
        })
        .await?;

    println!("Account \"{}\" created (user id {}).", user, resp.user_id);
    println!("Run `ipcmanview login --user {}` to sign in.", user);
    Ok(())
}

/// Request a password-recovery email via the auth service.
pub async fn forgot_password(email: Option<String>, config_path: &Path) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => {
            eprint!("Email: ");
            let mut s = String::new();
            std::io::stdin().read_line(&mut s)?;
            s.trim().to_string()
        }
    };
    if email.is_empty() {
        anyhow::bail!("Email cannot be empty.");
    }

    let client = build_client(config_path)?;
    client
        .auth
        .forgot_password(&ipcman_rpc::types::ForgotPasswordReq { email })
        .await?;
    println!("Recovery email requested. Check the inbox.");
    Ok(())
}

/// Show the current session.
pub async fn session(json_output: bool, config_path: &Path) -> Result<()> {
    let client = build_client(config_path)?;
    let session = client.session.fetch().await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    if !session.valid {
        println!("Not signed in.");
        return Ok(());
    }
    println!("Username:  {}", session.username);
    println!("User ID:   {}", session.user_id);
    println!("Admin:     {}", session.admin);
    println!("Disabled:  {}", session.disabled);
    Ok(())
}
