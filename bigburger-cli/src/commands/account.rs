//! Account commands - login, register, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::get_context;
use crate::output::{info, print_json, success, warning};
use bigburger_core::domain::NewUser;
use bigburger_core::{StorefrontContext, User};

/// Environment variable read before prompting for a password
const PASSWORD_ENV: &str = "BIGBURGER_PASSWORD";

fn get_password(prompt: &str, confirm: bool) -> Result<String> {
    if let Ok(p) = std::env::var(PASSWORD_ENV) {
        return Ok(p);
    }

    let p1 = Password::new().with_prompt(prompt).interact()?;
    if confirm {
        let p2 = Password::new().with_prompt("Confirm password").interact()?;
        if p1 != p2 {
            anyhow::bail!("Passwords do not match");
        }
    }
    Ok(p1)
}

fn get_text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

/// Prompt for credentials and log in on `ctx`
pub fn prompt_login(ctx: &StorefrontContext, email: Option<String>) -> Result<User> {
    let email = get_text(email, "Email")?;
    let password = get_password("Password", false)?;
    let response = ctx.auth_service.login(&email, &password)?;
    success(&response.data.message);
    Ok(response.data.user)
}

pub fn login(email: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    prompt_login(&ctx, email)?;
    Ok(())
}

pub fn register(name: Option<String>, email: Option<String>, phone: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let name = get_text(name, "Full name")?;
    let email = get_text(email, "Email")?;
    let phone = match phone {
        Some(p) => Some(p),
        None => {
            let p: String = Input::new()
                .with_prompt("Phone (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(p)
        }
    };
    let password = get_password("Password", true)?;

    let response = ctx.auth_service.register(NewUser {
        name,
        email,
        phone,
        password,
    })?;
    success(&response.data.message);
    Ok(())
}

pub fn logout() -> Result<()> {
    let ctx = get_context()?;
    let response = ctx.auth_service.logout()?;
    success(&response.message);
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let response = ctx.auth_service.current_user()?;

    if json {
        return print_json(&response);
    }

    match response.data {
        Some(user) => {
            println!("{}", user.name.bold());
            println!("  Email: {}", user.email);
            if let Some(phone) = &user.phone {
                println!("  Phone: {}", phone);
            }
            info(&format!("Backend: {}", ctx.backend_name()));
        }
        None => warning("Not logged in. Use 'bb login'."),
    }
    Ok(())
}
