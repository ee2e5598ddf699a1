//! Shared setup for integration tests: temporary SQLite stores and a
//! title fetcher that never touches the network.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use shortly::api::AppServices;
use shortly::config::{DatabaseConfig, StaticConfig};
use shortly::errors::{Result, ShortlyError};
use shortly::runtime::lifetime::startup::build_app_services;
use shortly::services::TitleFetcher;
use shortly::storage::SeaOrmStorage;

/// Open a fresh, migrated SQLite database inside a temp dir.
///
/// The `TempDir` must outlive the storage.
pub async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("shortly_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

/// Title fetcher with canned answers: urls containing `unreachable` fail,
/// everything else gets a fixed title.
pub struct StubTitles;

#[async_trait]
impl TitleFetcher for StubTitles {
    async fn fetch_title(&self, url: &str) -> Result<String> {
        if url.contains("unreachable") {
            Err(ShortlyError::title_fetch(format!("{} did not respond", url)))
        } else {
            Ok(format!("Title of {}", url))
        }
    }
}

pub fn test_config(require_login: bool) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.auth.require_login = require_login;
    config.auth.session_secret = "integration-test-secret".to_string();
    config
}

pub async fn create_services(require_login: bool) -> (AppServices, Arc<SeaOrmStorage>, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    let services = build_app_services(
        storage.clone(),
        Arc::new(StubTitles),
        &test_config(require_login),
    );
    (services, storage, dir)
}
