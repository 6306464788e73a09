//! The SQL toolkit port: the query and introspection surface the agent
//! is allowed to use.
//!
//! Three tools, mirroring the classic SQL-agent toolkit surface:
//! `sql_db_list_tables`, `sql_db_schema`, `sql_db_query`. The
//! implementation over a read-only SQLite pool lives in tabletalk-infra.

use std::fmt;
use std::str::FromStr;

use tabletalk_types::error::ConnectionError;

/// The tools the agent may invoke, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ListTables,
    Schema,
    Query,
}

impl ToolName {
    /// All tools, in the order they are described in the prompt.
    pub const ALL: [ToolName; 3] = [ToolName::ListTables, ToolName::Schema, ToolName::Query];

    /// One-line description used in the system prompt.
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::ListTables => {
                "Input is an empty string. Output is a comma-separated list of tables in the database."
            }
            ToolName::Schema => {
                "Input is a comma-separated list of table names. Output is the CREATE statement and three sample rows for those tables."
            }
            ToolName::Query => {
                "Input is a syntactically correct SQLite SELECT query. Output is the result rows, or an error message to revise the query from."
            }
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolName::ListTables => write!(f, "sql_db_list_tables"),
            ToolName::Schema => write!(f, "sql_db_schema"),
            ToolName::Query => write!(f, "sql_db_query"),
        }
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('`') {
            "sql_db_list_tables" => Ok(ToolName::ListTables),
            "sql_db_schema" => Ok(ToolName::Schema),
            "sql_db_query" => Ok(ToolName::Query),
            other => Err(format!("unknown tool: '{other}'")),
        }
    }
}

/// The result of one query: ordered column names plus rows of cells
/// already decoded to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Format rows as a tuple-list literal, the observation shape the
    /// agent prompt teaches the model to read.
    ///
    /// `[(1, 'a'), (2, 'b')]` -- numerics bare, everything else quoted.
    pub fn to_observation(&self) -> String {
        let mut out = String::from("[");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('(');
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                if is_bare_literal(cell) {
                    out.push_str(cell);
                } else {
                    out.push('\'');
                    out.push_str(&cell.replace('\'', "\\'"));
                    out.push('\'');
                }
            }
            out.push(')');
        }
        out.push(']');
        out
    }
}

/// Cells that render unquoted in an observation: numbers and NULL.
fn is_bare_literal(cell: &str) -> bool {
    cell == "NULL" || cell.parse::<f64>().is_ok()
}

/// Errors from a tool invocation.
///
/// Statement-level failures (bad SQL, unknown table) are fed back to
/// the model as observations so it can revise; connection-level
/// failures, including a write attempt rejected by the read-only
/// handle, abort the agent invocation.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    Statement(String),

    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// Query and introspection capability bound to one database handle.
///
/// All operations are non-mutating by construction: the handle behind
/// an implementation is opened read-only.
pub trait SqlToolkit: Send + Sync {
    /// Names of the user tables in the database.
    fn list_tables(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, ToolError>> + Send;

    /// DDL plus sample rows for the named tables.
    fn table_schema(
        &self,
        tables: &[String],
    ) -> impl std::future::Future<Output = Result<String, ToolError>> + Send;

    /// Execute one read-only query.
    fn run_query(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = Result<QueryResult, ToolError>> + Send;
}
