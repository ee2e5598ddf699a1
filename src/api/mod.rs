//! HTTP layer: sessions, middleware and route handlers

pub mod middleware;
pub mod services;
pub mod session;

use std::sync::Arc;

use actix_web::web;

use crate::services::{LinkService, RedirectResolver, UserService};
use session::SessionService;

/// Everything the handlers need, shared across workers
#[derive(Clone)]
pub struct AppServices {
    pub link_service: Arc<LinkService>,
    pub redirect_resolver: Arc<RedirectResolver>,
    pub user_service: Arc<UserService>,
    pub session_service: Arc<SessionService>,
}

impl AppServices {
    /// Register shared state and all routes on an app.
    ///
    /// ```ignore
    /// App::new()
    ///     .wrap(RequestIdMiddleware)
    ///     .configure(|cfg| services.configure(cfg))
    /// ```
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.link_service.clone()))
            .app_data(web::Data::new(self.redirect_resolver.clone()))
            .app_data(web::Data::new(self.user_service.clone()))
            .app_data(web::Data::new(self.session_service.clone()));

        services::configure_routes(cfg);
    }
}
