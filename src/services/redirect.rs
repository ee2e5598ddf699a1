use std::sync::Arc;

use tracing::{debug, instrument};

use crate::errors::{Result, ShortlyError};
use crate::storage::LinkStore;
use crate::utils::is_valid_short_code;

/// Where a short code points, after the visit has been recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub url: String,
    pub visits: i64,
}

pub struct RedirectResolver {
    store: Arc<dyn LinkStore>,
}

impl RedirectResolver {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Resolve `code` and record one visit.
    ///
    /// Unknown or malformed codes yield `NotFound` and touch nothing. A failure
    /// to record the visit is returned as an error; the redirect is not served.
    #[instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<RedirectTarget> {
        if !is_valid_short_code(code) {
            debug!("Rejected malformed short code");
            return Err(ShortlyError::not_found(format!("No link for code {}", code)));
        }

        let link = self
            .store
            .find_by_code(code)
            .await?
            .ok_or_else(|| ShortlyError::not_found(format!("No link for code {}", code)))?;

        let updated = self.store.increment_visits(&link).await?;

        Ok(RedirectTarget {
            url: updated.url,
            visits: updated.visits,
        })
    }
}
