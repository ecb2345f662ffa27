//! Login, logout, profile and health check commands

use std::io::{self, BufRead, Write};

use clap::Subcommand;

use super::AppContext;
use crate::display::{format_health_status, format_profile};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{AuthService, HealthService};

/// Auth subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and remember the session token
    Login {
        /// Email or username
        username: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long, env = "GLEDGER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Profile,
    /// Report whether a session token is stored
    Status,
}

/// Handle an auth command
pub fn handle_auth_command(ctx: &AppContext, cmd: AuthCommands) -> LedgerResult<()> {
    let service = AuthService::new(&ctx.client);

    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => read_password()?,
            };
            let response = service.login(&username, &password)?;
            let name = if response.user.full_name.is_empty() {
                &response.user.username
            } else {
                &response.user.full_name
            };
            println!("Logged in as {}", name);
            if let Some(expires) = response.expiration {
                println!("  Session expires: {}", expires.format("%Y-%m-%d %H:%M UTC"));
            }
        }

        AuthCommands::Logout => {
            service.logout()?;
            println!("Logged out.");
        }

        AuthCommands::Profile => {
            if !service.is_logged_in() {
                return Err(LedgerError::Unauthorized("no stored session".into()));
            }
            print!("{}", format_profile(&service.profile()?));
        }

        AuthCommands::Status => {
            if service.is_logged_in() {
                println!("Logged in (token at {})", ctx.paths.token_file().display());
            } else {
                println!("Not logged in.");
            }
        }
    }

    Ok(())
}

/// Ping the backend and fail when it never answers
pub fn handle_health_command(ctx: &AppContext, attempts: u32) -> LedgerResult<()> {
    let status = HealthService::new(&ctx.client)
        .with_attempts(attempts)
        .check();
    println!("{}", format_health_status(&status));

    if status.is_healthy {
        Ok(())
    } else {
        Err(LedgerError::Network(
            status.error.unwrap_or_else(|| "health check failed".into()),
        ))
    }
}

fn read_password() -> LedgerResult<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(LedgerError::Validation("Password is required".into()));
    }
    Ok(password)
}
