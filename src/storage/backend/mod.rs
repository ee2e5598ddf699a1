//! SeaORM storage backend
//!
//! Database storage using SeaORM, supporting SQLite and PostgreSQL.

mod connection;
mod converters;
mod links;
pub mod retry;
mod users;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, ShortlyError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Infer the database backend from its URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
    {
        Ok("postgres".to_string())
    } else {
        Err(ShortlyError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported formats: sqlite://, postgres://",
            database_url
        )))
    }
}

/// Turn a bare file path into a sqlx SQLite URL
fn normalize_sqlite_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else if database_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", database_url)
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry: retry::RetryPolicy,
}

impl SeaOrmStorage {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ShortlyError::database_config("database_url is not set"));
        }

        let retry = retry::RetryPolicy::from(config);

        let db = match backend_name {
            "sqlite" => connect_sqlite(&normalize_sqlite_url(database_url), config.pool_size).await?,
            "postgres" => connect_generic(database_url, backend_name, config.pool_size).await?,
            other => {
                return Err(ShortlyError::database_config(format!(
                    "Unsupported database backend: {}",
                    other
                )));
            }
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry,
        };

        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Close the connection pool; used on shutdown.
    pub async fn close(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| ShortlyError::database_connection(format!("Failed to close pool: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("shortly.db").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("sqlite:///tmp/x.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(
            infer_backend_from_url("postgres://u:p@localhost/shortly").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("mysql://localhost/x").is_err());
    }

    #[test]
    fn test_normalize_sqlite_url() {
        assert_eq!(normalize_sqlite_url("shortly.db"), "sqlite://shortly.db");
        assert_eq!(normalize_sqlite_url("sqlite://a.db"), "sqlite://a.db");
        assert_eq!(normalize_sqlite_url(":memory:"), "sqlite::memory:");
    }
}
