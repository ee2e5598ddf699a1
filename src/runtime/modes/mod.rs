//! Mode routing
//!
//! With no subcommand (or `serve`) the binary runs the HTTP server; every
//! other subcommand is a one-shot management command.

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;

use crate::cli::Commands;

#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    Cli,
}

pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve) => Mode::Server,
        Some(_) => Mode::Cli,
    }
}
