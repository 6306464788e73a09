//! Read-only SQLite connection pool.
//!
//! The handle behind every agent query. Opened strictly read-only with
//! `create_if_missing(false)`: a missing file or a non-database file is
//! rejected at open time, and any mutating statement through the pool
//! fails at the SQLite layer instead of silently succeeding. The pool
//! is safely shareable across concurrent read-only queries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use tabletalk_types::error::ConnectionError;

/// A pooled, strictly read-only handle to one SQLite file.
#[derive(Clone, Debug)]
pub struct ReadOnlyPool {
    pool: SqlitePool,
    path: PathBuf,
}

impl ReadOnlyPool {
    /// Open `path` read-only.
    ///
    /// Fails with [`ConnectionError::NotFound`] when the file does not
    /// exist and [`ConnectionError::InvalidDatabase`] when it exists
    /// but is not a SQLite database (checked with a probe query
    /// against `sqlite_master`).
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ConnectionError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConnectionError::NotFound {
                path: path.display().to_string(),
            });
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
            .map_err(|e| ConnectionError::Open(e.to_string()))?;

        // SQLite defers reading the file; a probe query surfaces a
        // corrupt or non-database file now rather than mid-session.
        let probe: Result<i64, sqlx::Error> =
            sqlx::query_scalar("SELECT count(*) FROM sqlite_master")
                .fetch_one(&pool)
                .await;
        if probe.is_err() {
            pool.close().await;
            return Err(ConnectionError::InvalidDatabase {
                path: path.display().to_string(),
            });
        }

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;

    /// Create a populated database file for fixtures.
    async fn seed_database(path: &Path) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();
        sqlx::query("CREATE TABLE orders (id INTEGER PRIMARY KEY, item TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO orders (id, item) VALUES (1, 'widget'), (2, 'gadget')")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReadOnlyPool::open(dir.path().join("nope.db")).await.unwrap_err();
        assert!(matches!(err, ConnectionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_open_non_database_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_db.db");
        std::fs::write(&path, "definitely not a sqlite file, long enough to have a header").unwrap();

        let err = ReadOnlyPool::open(&path).await.unwrap_err();
        assert!(
            matches!(
                err,
                ConnectionError::InvalidDatabase { .. } | ConnectionError::Open(_)
            ),
            "got: {err}"
        );
    }

    #[tokio::test]
    async fn test_reads_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.db");
        seed_database(&path).await;

        let handle = ReadOnlyPool::open(&path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM orders")
            .fetch_one(handle.pool())
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_writes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.db");
        seed_database(&path).await;

        let handle = ReadOnlyPool::open(&path).await.unwrap();
        for stmt in [
            "INSERT INTO orders (id, item) VALUES (3, 'sprocket')",
            "UPDATE orders SET item = 'x'",
            "DELETE FROM orders",
            "DROP TABLE orders",
        ] {
            let result = sqlx::query(stmt).execute(handle.pool()).await;
            assert!(result.is_err(), "write should fail: {stmt}");
        }

        // Nothing changed.
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM orders")
            .fetch_one(handle.pool())
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_handle_shared_across_concurrent_queries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.db");
        seed_database(&path).await;

        let handle = ReadOnlyPool::open(&path).await.unwrap();
        let mut tasks = Vec::new();
        for _ in 0..8 {
            let h = handle.clone();
            tasks.push(tokio::spawn(async move {
                sqlx::query_scalar::<_, i64>("SELECT count(*) FROM orders")
                    .fetch_one(h.pool())
                    .await
                    .unwrap()
            }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap(), 2);
        }
    }
}
