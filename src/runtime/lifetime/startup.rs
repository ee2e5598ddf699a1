use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::AppServices;
use crate::api::session::SessionService;
use crate::config::StaticConfig;
use crate::services::{
    LinkService, RedirectResolver, TitleFetcher, UserService, title_fetcher_from_config,
};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub services: AppServices,
}

/// Wire the services the HTTP layer needs on top of an open store
pub fn build_app_services(
    storage: Arc<SeaOrmStorage>,
    titles: Arc<dyn TitleFetcher>,
    config: &StaticConfig,
) -> AppServices {
    AppServices {
        link_service: Arc::new(LinkService::new(storage.clone(), titles, &config.links)),
        redirect_resolver: Arc::new(RedirectResolver::new(storage.clone())),
        user_service: Arc::new(UserService::new(storage)),
        session_service: Arc::new(SessionService::from_config(&config.auth)),
    }
}

/// Open and migrate the database, then build the services
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    if !config.title.enabled {
        info!("Title fetching is disabled; links will use their url as title");
    }
    if !config.auth.require_login {
        warn!("auth.require_login is false: link routes are open to anonymous clients");
    }

    let titles = title_fetcher_from_config(&config.title);
    let services = build_app_services(storage.clone(), titles, config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { storage, services })
}
