//! Per-request authentication context
//!
//! `AuthContext` is an extractor: handlers that take it get the user named by
//! the session cookie, if the cookie is present and valid.

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorInternalServerError, web};
use futures_util::future::{Ready, ready};
use tracing::{error, trace};

use crate::api::session::SessionService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct AuthContext {
    user: Option<SessionUser>,
    require_login: bool,
}

impl AuthContext {
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Whether protected routes may be served to this request
    pub fn is_permitted(&self) -> bool {
        !self.require_login || self.user.is_some()
    }

    fn from_request_sync(req: &HttpRequest) -> Result<Self, actix_web::Error> {
        let sessions = req
            .app_data::<web::Data<Arc<SessionService>>>()
            .ok_or_else(|| {
                error!("SessionService is not registered as app data");
                ErrorInternalServerError("session service unavailable")
            })?;

        let user = req
            .cookie(sessions.cookie_name())
            .and_then(|cookie| sessions.validate_token(cookie.value()))
            .and_then(|claims| {
                let id = claims.sub.parse().ok()?;
                Some(SessionUser {
                    id,
                    username: claims.username,
                })
            });

        trace!(authenticated = user.is_some(), "auth context built");

        Ok(Self {
            user,
            require_login: sessions.require_login(),
        })
    }
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_sync(req))
    }
}
