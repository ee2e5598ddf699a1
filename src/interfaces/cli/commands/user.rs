//! `user add` command

use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::UserService;
use crate::storage::SeaOrmStorage;

/// Read the password from the flag, stdin, or an interactive prompt
fn get_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    if stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CliError::InputError(format!("Failed to read from stdin: {}", e)))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    } else if let Some(pwd) = password {
        Ok(pwd)
    } else {
        prompt_password_with_confirm()
    }
}

fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or --stdin, or run interactively.".to_string(),
        ));
    }

    let read = |prompt: &str| -> Result<String, CliError> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| CliError::InputError(e.to_string()))?;
        rpassword::read_password()
            .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))
    };

    let password = read("Password: ")?;
    let confirm = read("Confirm password: ")?;

    if password != confirm {
        return Err(CliError::InputError("Passwords do not match".to_string()));
    }
    Ok(password)
}

pub async fn add_user(
    storage: Arc<SeaOrmStorage>,
    username: &str,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let password = get_password(password, stdin)?;

    let users = UserService::new(storage);
    let user = users.register(username, &password).await.map_err(|e| {
        if e.is_conflict() {
            CliError::CommandError(format!("User {} already exists", username.trim()))
        } else {
            CliError::from(e)
        }
    })?;

    println!(
        "{} Created user {} (id {})",
        "✓".green().bold(),
        user.username.cyan(),
        user.id
    );
    Ok(())
}
