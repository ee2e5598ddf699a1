//! CLI command implementations

mod config_gen;
mod links;
mod user;

pub use config_gen::generate_config;
pub use links::{format_link_line, list_links};
pub use user::add_user;
