//! Signed session cookies
//!
//! A session is an HS256 JWT stored in an HttpOnly cookie. Nothing about
//! sessions is kept server side; every request is checked against the token
//! it carries.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{AuthConfig, MAX_SESSION_MINUTES};
use crate::errors::{Result, ShortlyError};
use crate::storage::User;
use crate::utils::generate_random_code;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_minutes: u64,
    cookie_name: String,
    cookie_secure: bool,
    require_login: bool,
}

impl SessionService {
    pub fn new(secret: &str, config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_minutes: config.session_minutes.clamp(1, MAX_SESSION_MINUTES),
            cookie_name: config.cookie_name.clone(),
            cookie_secure: config.cookie_secure,
            require_login: config.require_login,
        }
    }

    /// Build from the auth section, generating a per-process secret when none is set.
    pub fn from_config(config: &AuthConfig) -> Self {
        if config.session_secret.is_empty() {
            warn!(
                "auth.session_secret is empty; using a random secret, sessions will not survive a restart"
            );
            Self::new(&generate_random_code(48), config)
        } else {
            Self::new(&config.session_secret, config)
        }
    }

    pub fn require_login(&self) -> bool {
        self.require_login
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.session_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ShortlyError::auth(format!("Failed to sign session: {}", e)))
    }

    /// Claims of a valid, unexpired token; `None` otherwise.
    pub fn validate_token(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding_key, &Validation::default()) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!("Rejected session token: {}", e);
                None
            }
        }
    }

    /// Cookie carrying a fresh session for `user`
    pub fn session_cookie(&self, user: &User) -> Result<Cookie<'static>> {
        let token = self.issue_token(user)?;
        Ok(Cookie::build(self.cookie_name.clone(), token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .max_age(CookieDuration::minutes(self.session_minutes as i64))
            .finish())
    }

    /// Cookie that clears the session in the browser
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .finish();
        cookie.make_removal();
        cookie
    }
}
