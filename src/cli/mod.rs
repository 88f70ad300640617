//! CLI module - Command-line interface for Leaguedesk
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Leaguedesk - Sports league administration
#[derive(Parser)]
#[command(name = "leaguedesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Apply pending database migrations and exit
    Migrate,

    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all accounts with their roles
    #[command(alias = "ls")]
    List,
    /// Grant the administrator role
    Promote {
        /// Account email
        email: String,
    },
    /// Revoke the administrator role
    Demote {
        /// Account email
        email: String,
    },
    /// Delete an account
    #[command(alias = "rm")]
    Remove {
        /// Account email
        email: String,
    },
}

pub use commands::*;
