//! `SqlToolkit` implementation over the read-only pool.
//!
//! Statement-level failures (bad SQL, unknown tables) map to
//! `ToolError::Statement` so the agent can revise its query; a write
//! attempt rejected by the read-only handle maps to
//! `ConnectionError::ReadOnlyViolation`, which aborts the invocation.

use std::sync::Arc;

use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use tabletalk_core::agent::{QueryResult, SqlToolkit, ToolError};
use tabletalk_types::error::ConnectionError;

use super::pool::ReadOnlyPool;

/// Sample rows shown per table by the schema tool.
const SCHEMA_SAMPLE_ROWS: u32 = 3;

/// Read-only SQLite toolkit bound to one handle.
#[derive(Clone)]
pub struct SqliteToolkit {
    handle: Arc<ReadOnlyPool>,
}

impl SqliteToolkit {
    pub fn new(handle: Arc<ReadOnlyPool>) -> Self {
        Self { handle }
    }

    async fn sample_rows(&self, table: &str) -> Result<QueryResult, ToolError> {
        let sql = format!(
            "SELECT * FROM \"{}\" LIMIT {SCHEMA_SAMPLE_ROWS}",
            table.replace('"', "\"\"")
        );
        self.fetch(&sql).await
    }

    async fn fetch(&self, sql: &str) -> Result<QueryResult, ToolError> {
        let rows = sqlx::query(sql)
            .fetch_all(self.handle.pool())
            .await
            .map_err(map_query_error)?;

        let columns = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => Vec::new(),
        };

        let mut decoded = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut cells = Vec::with_capacity(row.columns().len());
            for i in 0..row.columns().len() {
                cells.push(decode_cell(row, i).map_err(map_query_error)?);
            }
            decoded.push(cells);
        }

        Ok(QueryResult {
            columns,
            rows: decoded,
        })
    }
}

impl SqlToolkit for SqliteToolkit {
    async fn list_tables(&self) -> Result<Vec<String>, ToolError> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(self.handle.pool())
        .await
        .map_err(map_query_error)?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    async fn table_schema(&self, tables: &[String]) -> Result<String, ToolError> {
        let mut out = String::new();

        for table in tables {
            let ddl: Option<String> = sqlx::query_scalar(
                "SELECT sql FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            )
            .bind(table)
            .fetch_optional(self.handle.pool())
            .await
            .map_err(map_query_error)?;

            let Some(ddl) = ddl else {
                return Err(ToolError::Statement(format!("no such table: {table}")));
            };

            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&ddl);

            let sample = self.sample_rows(table).await?;
            out.push_str(&format!(
                "\n/*\n{} rows from {table}:\n{}\n",
                sample.rows.len(),
                sample.columns.join("\t")
            ));
            for row in &sample.rows {
                out.push_str(&row.join("\t"));
                out.push('\n');
            }
            out.push_str("*/");
        }

        Ok(out)
    }

    async fn run_query(&self, sql: &str) -> Result<QueryResult, ToolError> {
        self.fetch(sql).await
    }
}

/// Decode one cell to its display string.
///
/// SQLite's runtime type drives the decode; NULL renders as the bare
/// token `NULL`, blobs as a length placeholder.
fn decode_cell(row: &SqliteRow, i: usize) -> Result<String, sqlx::Error> {
    let raw = row.try_get_raw(i)?;
    if raw.is_null() {
        return Ok("NULL".to_string());
    }

    let type_name = raw.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => Ok(row.try_get::<i64, _>(i)?.to_string()),
        "REAL" => Ok(row.try_get::<f64, _>(i)?.to_string()),
        "BLOB" => Ok(format!(
            "<blob {} bytes>",
            row.try_get::<Vec<u8>, _>(i)?.len()
        )),
        _ => row.try_get::<String, _>(i),
    }
}

/// Classify a sqlx error into the tool error split.
fn map_query_error(e: sqlx::Error) -> ToolError {
    match e {
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            if message.contains("readonly database") {
                ToolError::Connection(ConnectionError::ReadOnlyViolation(message))
            } else {
                ToolError::Statement(message)
            }
        }
        other => ToolError::Connection(ConnectionError::Open(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqliteConnectOptions;
    use std::path::Path;

    async fn seed_database(path: &Path) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();
        sqlx::query(
            "CREATE TABLE orders (id INTEGER PRIMARY KEY, item TEXT, price REAL, note TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO orders (id, item, price, note) VALUES \
             (1, 'widget', 2.5, NULL), (2, 'gadget', 10.0, 'rush')",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    }

    async fn toolkit(dir: &tempfile::TempDir) -> SqliteToolkit {
        let path = dir.path().join("fixture.db");
        seed_database(&path).await;
        let handle = Arc::new(ReadOnlyPool::open(&path).await.unwrap());
        SqliteToolkit::new(handle)
    }

    #[tokio::test]
    async fn test_list_tables() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(&dir).await;
        let tables = toolkit.list_tables().await.unwrap();
        assert_eq!(tables, vec!["orders".to_string(), "users".to_string()]);
    }

    #[tokio::test]
    async fn test_table_schema_includes_ddl_and_samples() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(&dir).await;
        let schema = toolkit
            .table_schema(&["orders".to_string()])
            .await
            .unwrap();
        assert!(schema.contains("CREATE TABLE orders"));
        assert!(schema.contains("2 rows from orders:"));
        assert!(schema.contains("widget"));
    }

    #[tokio::test]
    async fn test_table_schema_unknown_table_is_statement_error() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(&dir).await;
        let err = toolkit
            .table_schema(&["missing".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Statement(_)));
        assert!(err.to_string().contains("no such table"));
    }

    #[tokio::test]
    async fn test_run_query_decodes_types() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(&dir).await;
        let result = toolkit
            .run_query("SELECT id, item, price, note FROM orders ORDER BY id")
            .await
            .unwrap();
        assert_eq!(result.columns, vec!["id", "item", "price", "note"]);
        assert_eq!(
            result.rows,
            vec![
                vec!["1".to_string(), "widget".to_string(), "2.5".to_string(), "NULL".to_string()],
                vec!["2".to_string(), "gadget".to_string(), "10".to_string(), "rush".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_run_query_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(&dir).await;
        let result = toolkit
            .run_query("SELECT id FROM orders WHERE id > 100")
            .await
            .unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.to_observation(), "[]");
    }

    #[tokio::test]
    async fn test_run_query_syntax_error_is_statement_error() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(&dir).await;
        let err = toolkit.run_query("SELEKT everything").await.unwrap_err();
        assert!(matches!(err, ToolError::Statement(_)));
    }

    #[tokio::test]
    async fn test_write_attempt_is_read_only_violation() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = toolkit(&dir).await;
        let err = toolkit
            .run_query("INSERT INTO orders (id, item) VALUES (9, 'x')")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Connection(ConnectionError::ReadOnlyViolation(_))
        ));
    }
}
