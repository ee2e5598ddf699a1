use colored::Colorize;

use crate::config::{DEFAULT_CONFIG_PATH, StaticConfig};
use crate::interfaces::cli::CliError;

/// Write the default configuration as TOML
pub fn generate_config(output_path: Option<String>) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default().save_to_file(&path).map_err(|e| {
        CliError::CommandError(format!("Unable to write configuration file: {}", e))
    })?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Set auth.session_secret before exposing the server".yellow()
    );
    Ok(())
}
