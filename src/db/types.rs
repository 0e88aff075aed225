//! Engine type mappings.
//!
//! This module translates between abstract column descriptors and Informix
//! native type syntax.
//!
//! # Architecture
//!
//! Mapping is two-directional but deliberately not symmetric:
//! 1. [`render_type`] turns a type name plus dimensions into native syntax
//!    (the money alias and the precision-6 datetime collapse are lossy)
//! 2. [`classify_native`] buckets native type names into canonical
//!    categories the rest of the system can reason with
//!
//! The asymmetry matches the engine's own behavior.

use crate::error::{DbError, DbResult};

// =============================================================================
// Type Classification
// =============================================================================

/// Canonical category for engine column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    PrimaryKey,
    String,
    Text,
    Integer,
    Float,
    Decimal,
    Datetime,
    Time,
    Date,
    Binary,
    Boolean,
    Unknown,
}

/// Classify a native type name into a canonical category.
///
/// Any name containing `serial` is a primary key; everything else falls
/// through to the generic name-based classifier.
pub fn classify_native(native: &str) -> TypeCategory {
    let lower = native.to_lowercase();
    if lower.contains("serial") {
        return TypeCategory::PrimaryKey;
    }
    categorize(&lower)
}

/// Generic classifier over lowercase native type names.
fn categorize(lower: &str) -> TypeCategory {
    // Decimal/Numeric - checked first, "numeric" overlaps later rules
    if lower.contains("decimal") || lower.contains("numeric") || lower.contains("money") {
        return TypeCategory::Decimal;
    }

    // Interval before integer: "interval" contains "int"
    if lower.contains("interval") {
        return TypeCategory::Time;
    }

    if lower.contains("int") {
        return TypeCategory::Integer;
    }

    if lower.contains("float") || lower.contains("double") || lower == "real" {
        return TypeCategory::Float;
    }

    if lower.contains("bool") {
        return TypeCategory::Boolean;
    }

    // Datetime before date/time: the name contains both words. A qualifier
    // starting at "hour" carries no date part and is a time-of-day type.
    if lower.contains("datetime") {
        if lower.contains("hour to") {
            return TypeCategory::Time;
        }
        return TypeCategory::Datetime;
    }

    if lower == "date" {
        return TypeCategory::Date;
    }

    if lower.contains("time") {
        return TypeCategory::Time;
    }

    if lower.contains("byte") || lower.contains("blob") || lower.contains("binary") {
        return TypeCategory::Binary;
    }

    if lower.contains("text") || lower.contains("clob") {
        return TypeCategory::Text;
    }

    if lower.contains("char") {
        return TypeCategory::String;
    }

    TypeCategory::Unknown
}

// =============================================================================
// Native Type Rendering
// =============================================================================

/// Native types that carry a parenthesized dimension suffix.
const IFX_PARAMETRIC_TYPES: &[&str] = &[
    "char",
    "character",
    "character varying",
    "decimal",
    "float",
    "list",
    "lvarchar",
    "money",
    "multiset",
    "nchar",
    "numeric",
    "nvarchar",
    "serial",
    "serial8",
    "varchar",
];

/// Render a type name and its dimensions into native syntax.
///
/// Money-like names alias to DECIMAL before any other rule (a historical
/// engine naming alias). Parametric types render `name(length)` when the
/// precision is zero and `name(precision,scale)` otherwise. A datetime with
/// precision 6 collapses to plain `time`; byte-like names render `binary`;
/// everything else passes through unchanged.
pub fn render_type(
    type_name: &str,
    length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
) -> String {
    let type_name = replace_money_alias(type_name);
    let lower = type_name.to_lowercase();

    if IFX_PARAMETRIC_TYPES.contains(&lower.as_str()) {
        if precision.unwrap_or(0) == 0 {
            match length {
                Some(len) => format!("{type_name}({len})"),
                None => type_name,
            }
        } else {
            format!(
                "{}({},{})",
                type_name,
                precision.unwrap_or(0),
                scale.unwrap_or(0)
            )
        }
    } else if lower.contains("datetime") {
        if precision == Some(6) {
            "time".to_string()
        } else {
            type_name
        }
    } else if lower.contains("byte") {
        "binary".to_string()
    } else {
        type_name
    }
}

/// Replace the first `money` occurrence with `DECIMAL`, case-insensitive.
fn replace_money_alias(type_name: &str) -> String {
    let needle = b"money";
    match type_name
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
    {
        Some(pos) => format!(
            "{}DECIMAL{}",
            &type_name[..pos],
            &type_name[pos + needle.len()..]
        ),
        None => type_name.to_string(),
    }
}

// =============================================================================
// Abstract-to-Native Defaults
// =============================================================================

/// Default native syntax for a canonical category.
pub fn native_type_syntax(category: TypeCategory) -> Option<&'static str> {
    match category {
        TypeCategory::PrimaryKey => Some("serial primary key"),
        TypeCategory::String => Some("varchar(255)"),
        TypeCategory::Text => Some("text"),
        TypeCategory::Integer => Some("integer"),
        TypeCategory::Float => Some("float"),
        TypeCategory::Decimal => Some("decimal"),
        TypeCategory::Datetime => Some("datetime year to second"),
        TypeCategory::Time => Some("datetime hour to second"),
        TypeCategory::Date => Some("date"),
        TypeCategory::Binary => Some("byte"),
        TypeCategory::Boolean => Some("boolean"),
        TypeCategory::Unknown => None,
    }
}

/// Native column syntax for DDL, with an optional length override.
pub fn type_to_sql(category: TypeCategory, length: Option<u32>) -> DbResult<String> {
    let base = native_type_syntax(category).ok_or_else(|| {
        DbError::schema("no native type for category", format!("{category:?}"))
    })?;
    Ok(match (category, length) {
        (TypeCategory::String, Some(len)) => format!("varchar({len})"),
        (_, Some(len)) if !base.contains(' ') && !base.contains('(') => format!("{base}({len})"),
        _ => base.to_string(),
    })
}
