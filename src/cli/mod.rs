//! CLI module - Command-line interface for usergate
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

/// usergate - user registry and bearer token service
#[derive(Parser)]
#[command(name = "usergate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Write a default config.toml if none exists
    Init,

    /// List every live user in the database
    #[command(alias = "ls")]
    Users,

    /// Decode a bearer token with the configured secret
    Verify {
        /// Token to check
        token: String,
    },
}
