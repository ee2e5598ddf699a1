use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL and its usage metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub code: String,
    pub title: Option<String>,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
}

/// One served redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Account allowed to use the management pages
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string, never serialized
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
