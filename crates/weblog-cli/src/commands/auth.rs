//! `register` and `login` handlers.

use dialoguer::Password;

use weblog_core::auth::{Registration, Session};

use crate::cli::{LoginArgs, RegisterArgs};
use crate::context::AppContext;

pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<()> {
    let password = prompt_new_password()?;
    let user = ctx.store().auth().register(Registration::new(
        &args.firstname,
        &args.lastname,
        &args.alias,
        &args.email,
        password,
    ))?;

    if !ctx.quiet() {
        println!("Registered {} ({})", user.alias, user.id);
        if user.is_admin {
            println!("First account on this site: admin rights granted.");
        }
    }
    Ok(())
}

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let password = prompt_password()?;
    let mut session = Session::default();
    let token = ctx
        .store()
        .auth()
        .login(&mut session, &args.alias, &password, args.remember)?;
    let user = session
        .user()
        .ok_or_else(|| anyhow::anyhow!("Login succeeded but no session was established"))?;

    if args.json {
        let output = serde_json::json!({
            "user_id": user.user_id,
            "alias": user.alias,
            "firstname": user.firstname,
            "lastname": user.lastname,
            "is_admin": user.is_admin,
            "remember_token": token.as_ref().map(|t| t.token.clone()),
            "remember_expires_at": token.as_ref().map(|t| t.expires_at),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !ctx.quiet() {
        println!(
            "Logged in as {} {} (@{})",
            user.firstname, user.lastname, user.alias
        );
        if user.is_admin {
            println!("Admin: yes");
        }
        if let Some(token) = token {
            println!(
                "Remember token (store as cookie, expires at epoch {}):",
                token.expires_at
            );
            println!("{}", token.token);
        }
    }
    Ok(())
}

fn prompt_password() -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("WEBLOG_PASSWORD") {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

fn prompt_new_password() -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("WEBLOG_PASSWORD") {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
    Password::new()
        .with_prompt("Enter password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
