use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{Result, ShortlyError};
use crate::storage::{User, UserStore};
use crate::utils::password::{hash_password, verify_password};

/// Account registration and credential checks
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create an account. Fails with `Validation` on blank input and
    /// `Conflict` when the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ShortlyError::validation(
                "Username and password must not be empty",
            ));
        }

        if self.store.find_user(username).await?.is_some() {
            return Err(ShortlyError::conflict(format!(
                "Username {} is already taken",
                username
            )));
        }

        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ShortlyError::password_hash(e.to_string()))??;

        let user = self.store.create_user(username, &hash).await?;
        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// The user whose credentials match, or `None` for an unknown user or
    /// wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.store.find_user(username.trim()).await? else {
            debug!("Login attempt for unknown user");
            return Ok(None);
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| ShortlyError::password_hash(e.to_string()))??;

        Ok(matches.then_some(user))
    }
}
