//! The Informix adapter facade.
//!
//! One adapter instance wraps exactly one driver connection. All operations
//! are blocking calls with no internal concurrency: a query is rendered,
//! handed to the driver, and the cursor output is materialized before the
//! call returns. The adapter is not safe for concurrent use from multiple
//! execution contexts; serializing access is the caller's responsibility.

use crate::config::AdapterConfig;
use crate::db::driver::{Connection, Cursor, Driver, ServerVersion};
use crate::db::types::{self, TypeCategory};
use crate::db::{materialize, schema};
use crate::error::{DbError, DbResult};
use crate::models::{ColumnDescriptor, QueryNode, QueryParam, RowMapping, TabularResult};
use crate::render::{Dialect, DialectRenderer, RendererRegistry, SqlRenderer, quote};
use serde_json::Value as JsonValue;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct InformixAdapter<C: Connection> {
    conn: C,
    renderer: DialectRenderer,
    version: ServerVersion,
    config: AdapterConfig,
}

impl<C: Connection> InformixAdapter<C> {
    /// Connect through the driver and construct an adapter around the new
    /// connection.
    pub fn connect<D>(
        driver: &D,
        config: AdapterConfig,
        registry: &RendererRegistry,
    ) -> DbResult<Self>
    where
        D: Driver<Conn = C>,
    {
        config.validate().map_err(DbError::invalid_input)?;
        let conn = driver.connect(
            &config.database,
            config.username.as_deref().unwrap_or(""),
            config.password.as_deref().unwrap_or(""),
        )?;
        Self::new(conn, config, registry)
    }

    /// Wrap an already-established connection. The dialect follows the
    /// server's major version; the parameter strategy follows the
    /// configuration. Both are fixed for the adapter's lifetime.
    pub fn new(conn: C, config: AdapterConfig, registry: &RendererRegistry) -> DbResult<Self> {
        let version = conn.server_version();
        let dialect = Dialect::for_version(version.major);
        let renderer = registry.select_renderer(dialect, &config)?;

        debug!(
            database = %config.database,
            %version,
            %dialect,
            prepared_statements = config.prepared_statements,
            "Constructed adapter"
        );

        Ok(Self {
            conn,
            renderer,
            version,
            config,
        })
    }

    pub fn adapter_name(&self) -> &'static str {
        self.renderer.dialect().adapter_name()
    }

    pub fn dialect(&self) -> Dialect {
        self.renderer.dialect()
    }

    pub fn server_version(&self) -> ServerVersion {
        self.version
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Primary keys are prefetched from the table's sequence.
    pub fn prefetch_primary_key(&self) -> bool {
        true
    }

    pub fn supports_migrations(&self) -> bool {
        true
    }

    /// Render a query AST node into SQL text for this adapter's dialect.
    pub fn to_sql(&self, node: &QueryNode) -> DbResult<String> {
        self.renderer.render(node)
    }

    // DATABASE STATEMENTS =====================================

    /// Render and execute a SELECT, returning a materialized result.
    pub fn select(&mut self, node: &QueryNode) -> DbResult<TabularResult> {
        let sql = self.to_sql(node)?;
        self.select_sql(&sql)
    }

    /// Execute SELECT text and materialize the cursor output.
    pub fn select_sql(&mut self, sql: &str) -> DbResult<TabularResult> {
        let rows = self.select_rows(sql)?;
        Ok(materialize::materialize(rows))
    }

    /// Execute SELECT text and return the raw row mappings.
    pub fn select_rows(&mut self, sql: &str) -> DbResult<Vec<RowMapping>> {
        let start = Instant::now();
        debug!(sql = %sql, "Executing query");

        let rows = self.with_cursor(sql, |cursor| {
            cursor.open()?;
            cursor.fetch_all()
        })?;

        debug!(
            rows = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query complete"
        );
        Ok(rows)
    }

    /// Execute a statement with no result set; returns affected rows.
    pub fn execute(&mut self, sql: &str) -> DbResult<u64> {
        debug!(sql = %sql, "Executing statement");
        self.conn.execute(sql)
    }

    /// Run `f` against a declared cursor and free the cursor on every exit
    /// path. The release happens exactly once; when both the closure and
    /// the release fail, the closure's error wins.
    fn with_cursor<T>(
        &mut self,
        sql: &str,
        f: impl FnOnce(&mut C::Cursor) -> DbResult<T>,
    ) -> DbResult<T> {
        let mut cursor = self.conn.cursor(sql)?;
        let result = f(&mut cursor);
        let freed = cursor.free();

        match (result, freed) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(err), freed) => {
                if freed.is_err() {
                    warn!("Cursor release failed after query error");
                }
                Err(err)
            }
            (Ok(_), Err(err)) => Err(err),
        }
    }

    // TRANSACTIONS ============================================

    /// Open a transaction with an explicit `begin work` statement.
    pub fn begin_transaction(&mut self) -> DbResult<()> {
        self.execute("begin work").map(|_| ())
    }

    pub fn commit_transaction(&mut self) -> DbResult<()> {
        self.conn.commit()
    }

    pub fn rollback_transaction(&mut self) -> DbResult<()> {
        self.conn.rollback()
    }

    // SEQUENCES ===============================================

    /// Sequence backing a table's primary key.
    pub fn default_sequence_name(&self, table: &str) -> String {
        format!("{table}_seq")
    }

    /// Fetch the next value of a sequence.
    pub fn next_sequence_value(&mut self, sequence: &str) -> DbResult<Option<JsonValue>> {
        let result = self.select_sql(&schema::queries::next_sequence_value(sequence))?;
        Ok(result.rows.first().and_then(|row| row.first()).cloned())
    }

    // SCHEMA STATEMENTS =======================================

    /// List user table names.
    pub fn tables(&mut self) -> DbResult<Vec<String>> {
        let result = self.select_sql(schema::queries::LIST_TABLES)?;
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.first())
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect())
    }

    /// Column descriptors for a table, native types rendered through the
    /// type mapper.
    pub fn columns(&mut self, table: &str) -> DbResult<Vec<ColumnDescriptor>> {
        let native = self.conn.column_metadata(table)?;
        Ok(native.iter().map(schema::descriptor_from_native).collect())
    }

    /// Primary-key constraint name for a table, if one exists.
    pub fn primary_key(&mut self, table: &str) -> DbResult<Option<String>> {
        let sql = schema::queries::primary_key(table);
        let row = self.with_cursor(&sql, |cursor| {
            cursor.open()?;
            cursor.fetch()
        })?;
        Ok(row.and_then(|r| {
            r.values()
                .next()
                .and_then(|value| value.as_str().map(str::to_string))
        }))
    }

    // MIGRATION ===============================================

    /// Create the sequence backing a new table's primary key.
    pub fn create_table_sequence(&mut self, table: &str) -> DbResult<()> {
        self.execute(&format!("CREATE SEQUENCE {}", self.default_sequence_name(table)))
            .map(|_| ())
    }

    /// Drop the sequence of a removed table.
    pub fn drop_table_sequence(&mut self, table: &str) -> DbResult<()> {
        self.execute(&format!("DROP SEQUENCE {}", self.default_sequence_name(table)))
            .map(|_| ())
    }

    pub fn rename_column(
        &mut self,
        table: &str,
        column: &str,
        new_column_name: &str,
    ) -> DbResult<()> {
        self.execute(&format!("RENAME COLUMN {table}.{column} TO {new_column_name}"))
            .map(|_| ())
    }

    pub fn change_column(
        &mut self,
        table: &str,
        column: &str,
        category: TypeCategory,
        length: Option<u32>,
    ) -> DbResult<()> {
        let type_sql = types::type_to_sql(category, length)?;
        self.execute(&format!("ALTER TABLE {table} MODIFY {column} {type_sql}"))
            .map(|_| ())
    }

    pub fn remove_index(&mut self, index_name: &str) -> DbResult<()> {
        self.execute(&format!("DROP INDEX {index_name}")).map(|_| ())
    }

    // LARGE OBJECTS ===========================================

    /// Write a text or binary column back after save. LOB values never
    /// appear inline in statement text; the driver binds the data to the
    /// statement's single `?` marker.
    pub fn write_lob(
        &mut self,
        table: &str,
        column: &ColumnDescriptor,
        primary_key: &str,
        id: &QueryParam,
        value: &[u8],
    ) -> DbResult<u64> {
        if !matches!(
            column.category(),
            TypeCategory::Text | TypeCategory::Binary
        ) {
            debug!(column = %column.name, "Skipping write-back for non-LOB column");
            return Ok(0);
        }
        if value.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "UPDATE {table} SET {column} = ? WHERE {primary_key} = {id}",
            column = column.name,
            id = quote::quote_param(id)
        );
        self.conn.execute_with_blob(&sql, value)
    }
}
