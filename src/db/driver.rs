//! Native driver boundary.
//!
//! The adapter only ever hands rendered SQL text to these traits and
//! consumes row mappings and raw results from them. Implementations wrap
//! the actual engine client; errors they return propagate to callers
//! unchanged (no wrapping, no retries at this layer).

use crate::error::DbResult;
use crate::models::RowMapping;
use serde_json::Value as JsonValue;

/// Engine server version, used to select the SQL dialect variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
}

impl ServerVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Raw column record as reported by the driver's introspection call, before
/// type mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeColumn {
    pub name: String,
    /// Native type name (e.g. `VARCHAR`, `SERIAL8`, `MONEY`).
    pub type_name: String,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: bool,
    pub default: Option<JsonValue>,
}

/// Establishes connections to the engine.
pub trait Driver {
    type Conn: Connection;

    fn connect(&self, database: &str, username: &str, password: &str) -> DbResult<Self::Conn>;
}

/// One open driver connection. An adapter wraps exactly one of these; all
/// calls are blocking and the connection is not safe for concurrent use.
pub trait Connection {
    type Cursor: Cursor;

    /// Server version of the connected engine.
    fn server_version(&self) -> ServerVersion;

    /// Declare a cursor for a SELECT. The cursor must be opened before
    /// fetching and freed on every exit path.
    fn cursor(&mut self, sql: &str) -> DbResult<Self::Cursor>;

    /// Execute a statement with no result set; returns affected rows.
    fn execute(&mut self, sql: &str) -> DbResult<u64>;

    /// Execute a statement with one out-of-band binary argument bound to its
    /// single `?` marker (large-object write-back).
    fn execute_with_blob(&mut self, sql: &str, data: &[u8]) -> DbResult<u64>;

    /// Column records for a table, straight from the engine catalog.
    fn column_metadata(&mut self, table: &str) -> DbResult<Vec<NativeColumn>>;

    fn commit(&mut self) -> DbResult<()>;

    fn rollback(&mut self) -> DbResult<()>;
}

/// A server-side result iterator requiring explicit open and release.
pub trait Cursor {
    fn open(&mut self) -> DbResult<()>;

    /// Fetch all remaining rows as ordered name-to-value mappings.
    fn fetch_all(&mut self) -> DbResult<Vec<RowMapping>>;

    /// Fetch the next row, or `None` when exhausted.
    fn fetch(&mut self) -> DbResult<Option<RowMapping>>;

    /// Release the cursor. Called exactly once per cursor, including on
    /// error paths.
    fn free(&mut self) -> DbResult<()>;
}
