//! Retry policy for store operations
//!
//! Only failures that a second attempt can fix are retried: an exhausted or
//! dropped pool connection, a locked SQLite database, or a PostgreSQL
//! serialization failure. Unique violations and every other error surface on
//! the first attempt so that link creation can pick a new code.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use sea_orm::DbErr;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// Store operation being attempted, used in retry logs
#[derive(Debug, Clone, Copy)]
pub enum StoreOp<'a> {
    FindByUrl,
    FindByCode(&'a str),
    CreateLink(&'a str),
    RecordVisit(&'a str),
    ListLinks,
    ListClicks(i64),
    FindUser,
    CreateUser,
}

impl fmt::Display for StoreOp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::FindByUrl => write!(f, "find link by url"),
            StoreOp::FindByCode(code) => write!(f, "find link {}", code),
            StoreOp::CreateLink(code) => write!(f, "create link {}", code),
            StoreOp::RecordVisit(code) => write!(f, "record visit to {}", code),
            StoreOp::ListLinks => write!(f, "list links"),
            StoreOp::ListClicks(id) => write!(f, "list clicks of link #{}", id),
            StoreOp::FindUser => write!(f, "find user"),
            StoreOp::CreateUser => write!(f, "create user"),
        }
    }
}

/// Why a failure is worth another attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transient {
    /// No pooled connection, or the connection went away
    Connection,
    /// SQLite BUSY / LOCKED
    Locked,
    /// PostgreSQL serialization failure or deadlock
    Serialization,
}

impl Transient {
    pub fn classify(err: &DbErr) -> Option<Self> {
        use sea_orm::error::RuntimeErr;

        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => Some(Transient::Connection),
            DbErr::Exec(RuntimeErr::SqlxError(sqlx_err))
            | DbErr::Query(RuntimeErr::SqlxError(sqlx_err)) => {
                let code = sqlx_err
                    .as_database_error()
                    .and_then(|db_err| db_err.code().map(|c| c.into_owned()));
                match code.as_deref() {
                    Some("5" | "6") => Some(Transient::Locked),
                    Some("40001" | "40P01") => Some(Transient::Serialization),
                    Some(_) => None,
                    None => Self::from_message(&sqlx_err.to_string()),
                }
            }
            DbErr::Exec(RuntimeErr::Internal(msg)) | DbErr::Query(RuntimeErr::Internal(msg)) => {
                Self::from_message(msg)
            }
            _ => None,
        }
    }

    fn from_message(msg: &str) -> Option<Self> {
        let msg = msg.to_lowercase();
        if msg.contains("database is locked") || msg.contains("database table is locked") {
            Some(Transient::Locked)
        } else if msg.contains("deadlock") || msg.contains("could not serialize") {
            Some(Transient::Serialization)
        } else {
            None
        }
    }
}

/// Bounded exponential backoff with jitter
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl From<&DatabaseConfig> for RetryPolicy {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms.max(config.retry_base_delay_ms)),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): `base * 2^(retry-1)`,
    /// capped at `max_delay`, plus up to a quarter of that as jitter.
    pub fn delay_for(&self, retry: u32) -> Duration {
        use rand::Rng;

        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        let capped = self.base_delay.saturating_mul(factor).min(self.max_delay);
        let jitter_ms = rand::rng().random_range(0..=capped.as_millis() as u64 / 4);
        capped + Duration::from_millis(jitter_ms)
    }

    /// Run `operation`, retrying transient failures.
    pub async fn run<T, F, Fut>(&self, op: StoreOp<'_>, mut operation: F) -> Result<T, DbErr>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DbErr>>,
    {
        let mut retry = 0;
        loop {
            let err = match operation().await {
                Ok(value) => {
                    if retry > 0 {
                        debug!("{} succeeded after {} retries", op, retry);
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            match Transient::classify(&err) {
                Some(kind) if retry < self.max_retries => {
                    retry += 1;
                    let delay = self.delay_for(retry);
                    warn!(
                        "{} hit {:?} ({}), retry {}/{} in {} ms",
                        op,
                        kind,
                        err,
                        retry,
                        self.max_retries,
                        delay.as_millis()
                    );
                    sleep(delay).await;
                }
                _ => {
                    debug!("{} failed: {}", op, err);
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::error::{ConnAcquireErr, RuntimeErr};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(2),
            max_delay: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            Transient::classify(&DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)),
            Some(Transient::Connection)
        );
        assert_eq!(
            Transient::classify(&DbErr::Exec(RuntimeErr::Internal(
                "database is locked".to_string()
            ))),
            Some(Transient::Locked)
        );
        assert_eq!(
            Transient::classify(&DbErr::Query(RuntimeErr::Internal(
                "deadlock detected".to_string()
            ))),
            Some(Transient::Serialization)
        );
        assert_eq!(
            Transient::classify(&DbErr::RecordNotFound("urls".to_string())),
            None
        );
        assert_eq!(
            Transient::classify(&DbErr::Exec(RuntimeErr::Internal(
                "UNIQUE constraint failed: urls.code".to_string()
            ))),
            None
        );
    }

    #[test]
    fn test_policy_from_database_config() {
        let policy = RetryPolicy::from(&DatabaseConfig {
            retry_count: 4,
            retry_base_delay_ms: 300,
            retry_max_delay_ms: 100,
            ..DatabaseConfig::default()
        });

        assert_eq!(policy.max_retries, 4);
        // a cap below the base delay is raised to it
        assert_eq!(policy.max_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_delay_grows_then_caps() {
        let policy = RetryPolicy {
            max_retries: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(2000),
        };

        let first = policy.delay_for(1).as_millis();
        assert!((100..=125).contains(&first));
        let third = policy.delay_for(3).as_millis();
        assert!((400..=500).contains(&third));
        let late = policy.delay_for(40).as_millis();
        assert!((2000..=2500).contains(&late));
    }

    #[tokio::test]
    async fn test_locked_database_is_retried() {
        let calls = AtomicU32::new(0);

        let result = fast_policy(3)
            .run(StoreOp::RecordVisit("gh1"), || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(DbErr::Exec(RuntimeErr::Internal(
                            "database is locked".to_string(),
                        )))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);

        let result = fast_policy(2)
            .run(StoreOp::ListLinks, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let calls = AtomicU32::new(0);

        let result = fast_policy(5)
            .run(StoreOp::CreateLink("abc123"), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<(), _>(DbErr::Exec(RuntimeErr::Internal(
                        "UNIQUE constraint failed: urls.code".to_string(),
                    )))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_op_display_names_the_link() {
        assert_eq!(StoreOp::RecordVisit("gh1").to_string(), "record visit to gh1");
        assert_eq!(StoreOp::ListClicks(7).to_string(), "list clicks of link #7");
    }
}
