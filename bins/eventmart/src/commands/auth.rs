//! Login, logout, status and signup

use super::{is_json, print_json, Session};
use crate::output::{spinner, Status};
use crate::Cli;
use anyhow::{Context, Result};
use eventmart_core::{Error, Role};
use eventmart_portal::{LoginForm, Sidebar, SignupFlow};
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::{self, BufRead, Write};

pub async fn login(cli: &Cli, role: Role, email: &str, password: &str) -> Result<()> {
    let session = Session::open(cli)?;
    let mut form = LoginForm::new(role, session.ctx.clone());
    form.set_email(email);
    form.set_password(password);

    let pb = spinner(&format!("Logging in to the {role} portal..."));
    let result = form.submit().await;
    pb.finish_and_clear();
    let marker = result?;

    if is_json(cli) {
        print_json(&json!({
            "role": role,
            "id": marker.id,
            "home": session.navigator.last(),
        }))?;
    } else {
        Status::info(&format!(
            "Signed in as {} ({})",
            marker.id.bold(),
            session.navigator.last().unwrap_or_default().dimmed()
        ));
    }
    Ok(())
}

pub fn logout(cli: &Cli, role: Role) -> Result<()> {
    let session = Session::open(cli)?;
    Sidebar::new(role, session.ctx).logout()?;
    Ok(())
}

pub fn status(cli: &Cli) -> Result<()> {
    let session = Session::open(cli)?;
    let markers: Vec<_> = Role::ALL
        .iter()
        .map(|role| (*role, session.ctx.session.marker(*role)))
        .collect();

    if is_json(cli) {
        let entries: Vec<_> = markers
            .iter()
            .map(|(role, marker)| {
                json!({
                    "role": role,
                    "signedIn": marker.is_some(),
                    "id": marker.as_ref().map(|m| m.id.as_str()),
                })
            })
            .collect();
        return print_json(&entries);
    }

    Status::header("Sessions");
    for (role, marker) in markers {
        match marker {
            Some(marker) => println!("  {:<8} {} {}", role.as_str(), "✓".green(), marker.id),
            None => println!("  {:<8} {}", role.as_str(), "not signed in".dimmed()),
        }
    }
    Ok(())
}

/// Signup form values taken from flags
pub struct SignupDetails<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password: &'a str,
    pub address: Option<&'a str>,
}

pub async fn signup(cli: &Cli, role: Role, details: SignupDetails<'_>, otp: Option<&str>) -> Result<()> {
    let session = Session::open(cli)?;
    let mut flow = match role {
        Role::Vendor => SignupFlow::vendor(session.ctx),
        Role::Client => SignupFlow::client(session.ctx),
        Role::Admin => {
            return Err(Error::validation("Admin accounts cannot be registered")
                .with_suggestion("Sign up as vendor or client")
                .into());
        }
    };

    let fields = flow.fields_mut();
    fields.name = details.name.to_string();
    fields.email = details.email.to_string();
    fields.phone = details.phone.to_string();
    fields.password = details.password.to_string();
    fields.confirm_password = details.password.to_string();
    if let Some(address) = details.address {
        flow.set_address(address);
    }

    flow.submit_details().await?;

    let otp = match otp {
        Some(otp) => otp.to_string(),
        None => prompt("Enter the OTP from your email: ")?,
    };
    flow.set_otp(otp);
    flow.submit_otp().await?;

    if is_json(cli) {
        print_json(&json!({ "role": role, "verified": true }))?;
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}
