//! List links command

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::storage::{Link, LinkStore, SeaOrmStorage};

/// One line of `links list` output
pub fn format_link_line(link: &Link) -> String {
    let mut parts = vec![format!(
        "{} -> {}",
        link.code.cyan(),
        link.url.blue().underline()
    )];

    if let Some(title) = link.title.as_deref().filter(|t| *t != link.url) {
        parts.push(format!("\"{}\"", title).dimmed().to_string());
    }

    parts.push(
        format!("(visits: {})", link.visits)
            .dimmed()
            .cyan()
            .to_string(),
    );

    parts.join(" ")
}

pub async fn list_links(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let links = storage
        .list_links()
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to load links: {}", e)))?;

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        println!("  {}", format_link_line(link));
    }
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
