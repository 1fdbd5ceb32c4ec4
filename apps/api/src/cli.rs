//! Command line entry points. With no subcommand the server starts.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::auth::jwt::{issue_token, JwtConfig};
use crate::auth::Role;

#[derive(Debug, Parser)]
#[command(name = "matchmaker", version)]
#[command(about = "Resume-to-job matching API with streamed auto-apply")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP and WebSocket server (default)
    Serve,
    /// Print a signed access token for an existing user
    IssueToken {
        username: String,
        /// candidate (or student) | employer
        #[arg(value_parser = parse_role)]
        role: Role,
    },
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| format!("unknown role '{raw}' (expected candidate or employer)"))
}

/// Token for `username`. The user must exist in `users` for the token to be accepted.
pub fn issue_token_command(username: &str, role: Role, jwt: &JwtConfig) -> Result<String> {
    Ok(issue_token(username, role, jwt)?)
}
