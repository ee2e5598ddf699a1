//! Login, signup and logout
//!
//! Every request ends in exactly one response: a redirect, or a JSON error
//! when the store itself fails.

use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::{HttpResponse, web};
use governor::middleware::NoOpMiddleware;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::api::session::SessionService;
use crate::errors::ShortlyError;
use crate::services::UserService;
use crate::storage::User;

use super::helpers::{error_from_shortly, login_redirect, redirect_to};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

type CredentialsBody = web::Either<web::Json<Credentials>, web::Form<Credentials>>;

fn into_credentials(body: CredentialsBody) -> Credentials {
    match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    }
}

/// Rate limit key: the TCP peer address
#[derive(Clone, Copy)]
pub struct PeerIpKeyExtractor;

impl KeyExtractor for PeerIpKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        // Requests without a peer (in-process tests, some UDS setups) share one bucket
        Ok(req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string()))
    }
}

/// Limiter for credential POSTs: 1 token per second, burst of 5.
///
/// Over the limit the client gets HTTP 429.
pub fn login_rate_limiter() -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!("Login rate limiter created: 1 req/s, burst 5");
    Governor::new(&config)
}

/// Response that logs `user` in and sends them to the index page
fn start_session(sessions: &SessionService, user: &User) -> HttpResponse {
    match sessions.session_cookie(user) {
        Ok(cookie) => HttpResponse::Found()
            .insert_header((actix_web::http::header::LOCATION, "/"))
            .cookie(cookie)
            .finish(),
        Err(e) => {
            error!("Failed to issue session for {}: {}", user.username, e);
            error_from_shortly(&e)
        }
    }
}

/// `POST /login`
pub async fn login(
    users: web::Data<Arc<UserService>>,
    sessions: web::Data<Arc<SessionService>>,
    body: CredentialsBody,
) -> HttpResponse {
    let credentials = into_credentials(body);

    match users
        .authenticate(&credentials.username, &credentials.password)
        .await
    {
        Ok(Some(user)) => {
            info!("User {} logged in", user.username);
            start_session(&sessions, &user)
        }
        Ok(None) => {
            warn!("Failed login for {:?}", credentials.username);
            login_redirect()
        }
        Err(e) => {
            error!("Login failed: {}", e);
            error_from_shortly(&e)
        }
    }
}

/// `POST /signup`
pub async fn signup(
    users: web::Data<Arc<UserService>>,
    sessions: web::Data<Arc<SessionService>>,
    body: CredentialsBody,
) -> HttpResponse {
    let credentials = into_credentials(body);

    match users
        .register(&credentials.username, &credentials.password)
        .await
    {
        Ok(user) => start_session(&sessions, &user),
        Err(e @ (ShortlyError::Validation(_) | ShortlyError::Conflict(_))) => {
            info!("Signup rejected: {}", e);
            redirect_to("/signup")
        }
        Err(e) => {
            error!("Signup failed: {}", e);
            error_from_shortly(&e)
        }
    }
}

/// `GET /logout`
pub async fn logout(sessions: web::Data<Arc<SessionService>>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, "/login"))
        .cookie(sessions.removal_cookie())
        .finish()
}
