//! Server mode
//!
//! Builds the actix-web application from the startup context and runs it
//! until it stops or a shutdown signal arrives.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::config::get_config;
use crate::runtime::lifetime;

/// Upper bound for request bodies (`POST /links`, credentials)
const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// Run the HTTP server
///
/// Logging must be initialized before calling this function.
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let services = startup.services.clone();
    let storage = startup.storage.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker threads", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .app_data(web::JsonConfig::default().limit(MAX_PAYLOAD_BYTES))
            .configure(|cfg| services.configure(cfg))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(cpu_count)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    let handle = server.handle();
    warn!("Starting server at http://{}", bind_address);

    // The pool is closed after either branch finishes
    let result = tokio::select! {
        res = server => res,
        _ = lifetime::shutdown::wait_for_signal() => {
            handle.stop(true).await;
            Ok(())
        }
    };

    lifetime::shutdown::close_storage(&storage).await;
    warn!("Server stopped");

    result.map_err(Into::into)
}
