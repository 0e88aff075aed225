//! Error types for the Informix adapter.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Driver failures are carried through unchanged rather than being
//! wrapped or retried; rendering failures abort the operation before any SQL
//! reaches the driver.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Driver error: {message}")]
    Driver {
        message: String,
        /// e.g., "-206" for table not found
        sql_code: Option<String>,
    },

    #[error("Unsupported query construct: {construct}")]
    UnsupportedConstruct { construct: String },

    #[error("Schema error: {message} (object: {object})")]
    Schema { message: String, object: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a driver error with optional engine SQL code.
    pub fn driver(message: impl Into<String>, sql_code: Option<String>) -> Self {
        Self::Driver {
            message: message.into(),
            sql_code,
        }
    }

    /// Create an unsupported-construct error for an AST node kind with no
    /// rendering rule.
    pub fn unsupported_construct(construct: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            construct: construct.into(),
        }
    }

    /// Create a schema error.
    pub fn schema(message: impl Into<String>, object: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            object: object.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }
}

/// Result type alias for adapter operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbError::connection("Failed to connect", "Check credentials");
        assert!(err.to_string().contains("Connection failed"));
    }

    #[test]
    fn test_unsupported_construct_names_the_node() {
        let err = DbError::unsupported_construct("InsertStatement");
        assert!(err.to_string().contains("InsertStatement"));
    }

    #[test]
    fn test_driver_error_keeps_sql_code() {
        let err = DbError::driver("table not found", Some("-206".to_string()));
        match err {
            DbError::Driver { sql_code, .. } => assert_eq!(sql_code.as_deref(), Some("-206")),
            _ => panic!("expected driver error"),
        }
    }

    #[test]
    fn test_error_suggestion() {
        let err = DbError::connection("Failed to connect", "Check credentials");
        assert_eq!(err.suggestion(), Some("Check credentials"));
        assert_eq!(DbError::internal("oops").suggestion(), None);
    }
}
