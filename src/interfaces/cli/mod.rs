//! CLI interface module
//!
//! Management commands run directly against the configured database; they do
//! not need a running server.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands, LinksCommands, UserCommands};
use crate::config::get_config;
use crate::storage::StorageFactory;
use commands::{add_user, generate_config, list_links};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InputError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::ShortlyError> for CliError {
    fn from(err: crate::errors::ShortlyError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

/// Run a management command. `Serve` is handled by the caller.
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // Generate doesn't need a database connection
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path },
    } = cmd
    {
        return generate_config(output_path);
    }

    let config = get_config();
    let storage = StorageFactory::create(&config.database).await?;

    let result = match cmd {
        Commands::User {
            action:
                UserCommands::Add {
                    username,
                    password,
                    stdin,
                },
        } => add_user(storage.clone(), &username, password, stdin).await,

        Commands::Links {
            action: LinksCommands::List,
        } => list_links(storage.clone()).await,

        Commands::Config { .. } => unreachable!("handled above"),

        Commands::Serve => Err(CliError::CommandError(
            "serve is not a management command".to_string(),
        )),
    };

    if let Err(e) = storage.close().await {
        tracing::warn!("Failed to close database: {}", e);
    }

    result
}
