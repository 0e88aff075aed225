//! Schema-related data models.
//!
//! This module defines the column descriptor produced by schema
//! introspection. Descriptors are immutable once constructed and are
//! discarded after the type mapping that consumes them.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One column as reported by schema introspection, with its native type
/// already rendered into engine syntax (e.g. `varchar(30)`, `decimal(8,2)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    /// Rendered native type syntax.
    pub native_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Create a new column descriptor.
    pub fn new(name: impl Into<String>, native_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            default: None,
            native_type: native_type.into(),
            length: None,
            precision: None,
            scale: None,
            nullable,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Set length, precision and scale as reported by the driver.
    pub fn with_dimensions(
        mut self,
        length: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Self {
        self.length = length;
        self.precision = precision;
        self.scale = scale;
        self
    }

    /// Canonical category of this column's native type.
    pub fn category(&self) -> crate::db::types::TypeCategory {
        crate::db::types::classify_native(&self.native_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let col = ColumnDescriptor::new("price", "decimal(8,2)", true)
            .with_default(serde_json::json!("0.00"))
            .with_dimensions(None, Some(8), Some(2));
        assert_eq!(col.native_type, "decimal(8,2)");
        assert_eq!(col.precision, Some(8));
        assert!(col.nullable);
    }

    #[test]
    fn test_descriptor_serialization_skips_empty_fields() {
        let col = ColumnDescriptor::new("id", "serial", false);
        let json = serde_json::to_string(&col).unwrap();
        assert!(!json.contains("default"));
        assert!(!json.contains("precision"));
    }
}
