//! Memoized read-only handles with a bounded validity window.
//!
//! Handles are keyed by canonical path and reused across queries and
//! sessions instead of being reopened per query. Each entry expires
//! after a TTL (default two hours) so an underlying file replacement
//! is picked up without a process restart.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use tabletalk_types::error::ConnectionError;

use super::pool::ReadOnlyPool;

struct CachedHandle {
    pool: Arc<ReadOnlyPool>,
    opened_at: Instant,
}

/// Cache of read-only database handles keyed by path.
pub struct HandleCache {
    ttl: Duration,
    entries: DashMap<PathBuf, CachedHandle>,
}

impl HandleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Fetch the cached handle for `path`, opening (or reopening, when
    /// the entry has aged out) as needed.
    pub async fn get_or_open(&self, path: &Path) -> Result<Arc<ReadOnlyPool>, ConnectionError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(entry) = self.entries.get(&key) {
            if entry.opened_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.pool));
            }
            debug!(path = %key.display(), "cached handle expired, reopening");
        }

        let pool = Arc::new(ReadOnlyPool::open(&key).await?);
        self.entries.insert(
            key,
            CachedHandle {
                pool: Arc::clone(&pool),
                opened_at: Instant::now(),
            },
        );
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqliteConnectOptions;

    async fn seed_database(path: &Path) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();
        sqlx::query("CREATE TABLE t (x INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    }

    #[tokio::test]
    async fn test_fresh_handle_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cached.db");
        seed_database(&path).await;

        let cache = HandleCache::new(Duration::from_secs(3600));
        let first = cache.get_or_open(&path).await.unwrap();
        let second = cache.get_or_open(&path).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_expired_handle_is_reopened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expiring.db");
        seed_database(&path).await;

        let cache = HandleCache::new(Duration::from_millis(20));
        let first = cache.get_or_open(&path).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        let second = cache.get_or_open(&path).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_missing_file_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HandleCache::new(Duration::from_secs(3600));
        let err = cache
            .get_or_open(&dir.path().join("absent.db"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::NotFound { .. }));
    }
}
