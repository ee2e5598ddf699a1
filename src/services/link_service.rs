//! Link creation and listing
//!
//! Creation is idempotent by url: submitting a url that already has a link
//! returns that link unchanged. New links get a random code; a code that
//! collides with an existing one is replaced with a fresh code, up to
//! `links.max_code_attempts` times.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::LinksConfig;
use crate::errors::{Result, ShortlyError};
use crate::services::TitleFetcher;
use crate::storage::{Link, LinkStore};
use crate::utils::{MAX_CODE_LENGTH, generate_short_code};
use crate::utils::url_validator::validate_url;

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    titles: Arc<dyn TitleFetcher>,
    code_length: usize,
    max_code_attempts: u32,
}

impl LinkService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        titles: Arc<dyn TitleFetcher>,
        config: &LinksConfig,
    ) -> Self {
        Self {
            store,
            titles,
            code_length: config.code_length.clamp(1, MAX_CODE_LENGTH),
            max_code_attempts: config.max_code_attempts.max(1),
        }
    }

    /// Shorten `url`, returning the existing link if there is one.
    #[instrument(skip(self))]
    pub async fn shorten(&self, url: &str) -> Result<Link> {
        let url = validate_url(url)?;

        if let Some(existing) = self.store.find_by_url(url).await? {
            return Ok(existing);
        }

        let title = self.titles.fetch_title(url).await?;

        for attempt in 1..=self.max_code_attempts {
            let code = generate_short_code(self.code_length);

            match self.store.create(url, Some(&title), &code).await {
                Ok(link) => {
                    info!("Shortened {} as {}", link.url, link.code);
                    return Ok(link);
                }
                Err(ShortlyError::Conflict(msg)) => {
                    // A concurrent request may have stored the same url first
                    if let Some(existing) = self.store.find_by_url(url).await? {
                        return Ok(existing);
                    }
                    warn!(
                        "Short code {} already taken (attempt {}/{}): {}",
                        code, attempt, self.max_code_attempts, msg
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(ShortlyError::code_space_exhausted(format!(
            "No free short code after {} attempts",
            self.max_code_attempts
        )))
    }

    pub async fn list(&self) -> Result<Vec<Link>> {
        self.store.list_links().await
    }
}
