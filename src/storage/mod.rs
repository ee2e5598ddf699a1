use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{Click, Link, User};

/// Durable store for links and their clicks.
///
/// `create` and `increment_visits` are durable once they return. Lookup
/// failures are returned as errors, never folded into `None`.
#[async_trait]
pub trait LinkStore: Send + Sync {
    async fn find_by_url(&self, url: &str) -> Result<Option<Link>>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>>;

    /// Insert a new link with zero visits.
    ///
    /// Fails with `ShortlyError::Conflict` when the url or the code is taken.
    async fn create(&self, url: &str, title: Option<&str>, code: &str) -> Result<Link>;

    /// Record one click and bump the visit counter in a single transaction.
    ///
    /// Returns the updated link, or `NotFound` if the row no longer exists.
    async fn increment_visits(&self, link: &Link) -> Result<Link>;

    /// All links ordered by id
    async fn list_links(&self) -> Result<Vec<Link>>;

    /// Clicks recorded for a link, oldest first
    async fn list_clicks(&self, link_id: i64) -> Result<Vec<Click>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<User>>;

    /// Fails with `ShortlyError::Conflict` when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = &config.database_url;

        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = backend::SeaOrmStorage::new(database_url, &backend_type, config).await?;
        Ok(Arc::new(storage))
    }
}
