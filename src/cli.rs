//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Shortly - a small URL shortener
#[derive(Parser)]
#[command(name = "shortly")]
#[command(version)]
#[command(about = "A small URL shortener with click tracking", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default when no command is given)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Inspect short links
    Links {
        #[command(subcommand)]
        action: LinksCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a sample configuration file
    Generate {
        /// Output path (default: config.toml)
        output_path: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user account
    Add {
        username: String,

        /// Password (if not provided, will prompt interactively)
        #[arg(long, conflicts_with = "stdin")]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },
}

#[derive(Subcommand)]
pub enum LinksCommands {
    /// List all short links with visit counts
    List,
}
