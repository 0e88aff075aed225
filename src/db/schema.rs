//! Schema introspection.
//!
//! Column metadata comes from the driver's catalog call and is mapped into
//! [`ColumnDescriptor`]s here; table and primary-key lookups go through the
//! engine's system catalogs (`systables`, `sysconstraints`).

use crate::db::driver::NativeColumn;
use crate::db::types;
use crate::models::ColumnDescriptor;
use crate::render::quote;

// =============================================================================
// System Catalog Queries
// =============================================================================

pub(crate) mod queries {
    use super::quote;

    /// User tables only: catalog entries sit below tabid 100, 'Q' marks
    /// sequences.
    pub const LIST_TABLES: &str =
        "SELECT tabname FROM systables WHERE tabid > 99 AND tabtype != 'Q'";

    /// Primary-key constraint name for a table.
    pub fn primary_key(table: &str) -> String {
        format!(
            "SELECT FIRST 1 ct.constrname FROM sysconstraints ct, systables st \
             WHERE st.tabid = ct.tabid AND ct.constrtype = 'P' AND st.tabname = '{}'",
            quote::quote_string(table)
        )
    }

    /// Next value of a sequence, via the always-present tabid 1 row.
    pub fn next_sequence_value(sequence: &str) -> String {
        format!("select {sequence}.nextval id from systables where tabid=1")
    }
}

// =============================================================================
// Column Mapping
// =============================================================================

/// Map one raw driver column record into a descriptor, rendering its native
/// type syntax through the type mapper.
pub fn descriptor_from_native(column: &NativeColumn) -> ColumnDescriptor {
    let native_type = types::render_type(
        &column.type_name,
        column.length,
        column.precision,
        column.scale,
    );

    let mut descriptor = ColumnDescriptor::new(&column.name, native_type, column.nullable)
        .with_dimensions(column.length, column.precision, column.scale);
    if let Some(default) = &column.default {
        descriptor = descriptor.with_default(default.clone());
    }
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::TypeCategory;

    fn native(name: &str, type_name: &str) -> NativeColumn {
        NativeColumn {
            name: name.to_string(),
            type_name: type_name.to_string(),
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            default: None,
        }
    }

    #[test]
    fn test_descriptor_renders_native_type() {
        let mut column = native("price", "money");
        column.precision = Some(8);
        column.scale = Some(2);
        let descriptor = descriptor_from_native(&column);
        assert_eq!(descriptor.native_type, "DECIMAL(8,2)");
        assert_eq!(descriptor.category(), TypeCategory::Decimal);
    }

    #[test]
    fn test_serial_descriptor_is_primary_key() {
        let mut column = native("id", "serial8");
        column.nullable = false;
        let descriptor = descriptor_from_native(&column);
        assert_eq!(descriptor.category(), TypeCategory::PrimaryKey);
        assert!(!descriptor.nullable);
    }

    #[test]
    fn test_descriptor_keeps_default_value() {
        let mut column = native("active", "boolean");
        column.default = Some(serde_json::json!("t"));
        let descriptor = descriptor_from_native(&column);
        assert_eq!(descriptor.default, Some(serde_json::json!("t")));
    }

    #[test]
    fn test_primary_key_query_escapes_table_name() {
        let sql = queries::primary_key("it's");
        assert!(sql.contains("tabname = 'it''s'"));
    }
}
