//! Error types for the database layer
//!
//! Builder-time failures (bad operator, unresolved relation) are raised
//! before any statement is sent; execution failures carry the rendered SQL
//! for diagnosis.

use thiserror::Error;

/// Result type alias for database operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for database operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrmError {
    /// Missing or invalid driver configuration, connect failure, or use of a
    /// disconnected context
    #[error("connection error: {0}")]
    Connection(String),

    /// Unsupported operator or malformed criteria shape
    #[error("query build error: {0}")]
    QueryBuild(String),

    /// No declared relation connects the two models
    #[error("no declared relation between `{from}` and `{to}`")]
    RelationNotFound { from: String, to: String },

    /// The engine rejected the rendered SQL
    #[error("statement execution failed: {message} (sql: {sql})")]
    StatementExecution { message: String, sql: String },
}

impl OrmError {
    pub(crate) fn execution(err: rusqlite::Error, sql: &str) -> Self {
        OrmError::StatementExecution {
            message: err.to_string(),
            sql: sql.to_string(),
        }
    }
}
