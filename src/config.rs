//! Configuration handling for the Informix adapter.
//!
//! An [`AdapterConfig`] describes one adapter instance: the target database,
//! credentials and the parameter-rendering mode. The `prepared_statements`
//! flag is consulted exactly once, at adapter construction, to pick the
//! renderer strategy; it cannot be switched on a live adapter.

use serde::{Deserialize, Serialize};

/// Default for the `prepared_statements` flag when absent.
pub const DEFAULT_PREPARED_STATEMENTS: bool = false;

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Target database name.
    pub database: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Sensitive - not logged.
    #[serde(default)]
    pub password: Option<String>,
    /// Default: false. When true the renderer leaves `?` placeholders for
    /// the driver instead of substituting literal values.
    #[serde(default = "default_prepared_statements")]
    pub prepared_statements: bool,
}

fn default_prepared_statements() -> bool {
    DEFAULT_PREPARED_STATEMENTS
}

impl AdapterConfig {
    /// Create a config for the given database with default options.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            username: None,
            password: None,
            prepared_statements: DEFAULT_PREPARED_STATEMENTS,
        }
    }

    /// Set the connection credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Enable or disable prepared-statement rendering.
    pub fn with_prepared_statements(mut self, prepared: bool) -> Self {
        self.prepared_statements = prepared;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.database.is_empty() {
            return Err("database name must not be empty".to_string());
        }
        if self.password.is_some() && self.username.is_none() {
            return Err("password given without a username".to_string());
        }
        Ok(())
    }
}
