//! SQL literal quoting for the Informix dialect.
//!
//! Used by the literal-substitution renderer and by the thin statement
//! builders in the adapter. Large-object columns never appear as inline
//! literals; they are written back separately after save.

use crate::db::types::TypeCategory;
use crate::models::QueryParam;
use chrono::NaiveDate;
use serde_json::Value as JsonValue;

/// Escape a string for use inside single quotes (doubles embedded quotes).
pub fn quote_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Render a DATE value in the engine's `'m/d/Y'` form.
pub fn quote_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("'{}/{}/{}'", date.month(), date.day(), date.year())
}

/// Render a parameter as a SQL literal.
pub fn quote_param(param: &QueryParam) -> String {
    match param {
        QueryParam::Null => "NULL".to_string(),
        QueryParam::Bool(true) => "'t'".to_string(),
        QueryParam::Bool(false) => "'f'".to_string(),
        QueryParam::Int(v) => v.to_string(),
        QueryParam::Float(v) => v.to_string(),
        QueryParam::String(v) => format!("'{}'", quote_string(v)),
        // LOBs travel through write-back, never as inline literals
        QueryParam::Bytes(_) => "NULL".to_string(),
    }
}

/// Render a value as a SQL literal, honoring the target column's category
/// when one is known: binary and text columns quote as NULL, DATE columns
/// use the `'m/d/Y'` form.
pub fn quote_value(value: &JsonValue, category: Option<TypeCategory>) -> String {
    match category {
        Some(TypeCategory::Binary) | Some(TypeCategory::Text) => return "NULL".to_string(),
        Some(TypeCategory::Date) => {
            if let JsonValue::String(s) = value {
                if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return quote_date(date);
                }
            }
        }
        _ => {}
    }

    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::Bool(true) => "'t'".to_string(),
        JsonValue::Bool(false) => "'f'".to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => format!("'{}'", quote_string(s)),
        other => format!("'{}'", quote_string(&other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string_doubles_single_quotes() {
        assert_eq!(quote_string("O'Brien"), "O''Brien");
        assert_eq!(quote_string("plain"), "plain");
    }

    #[test]
    fn test_quote_param_literals() {
        assert_eq!(quote_param(&QueryParam::Null), "NULL");
        assert_eq!(quote_param(&QueryParam::Int(5)), "5");
        assert_eq!(quote_param(&QueryParam::Bool(true)), "'t'");
        assert_eq!(
            quote_param(&QueryParam::String("it's".to_string())),
            "'it''s'"
        );
    }

    #[test]
    fn test_bytes_param_quotes_as_null() {
        assert_eq!(quote_param(&QueryParam::Bytes(vec![1, 2, 3])), "NULL");
    }

    #[test]
    fn test_quote_value_date_column() {
        let value = JsonValue::String("2024-06-05".to_string());
        assert_eq!(
            quote_value(&value, Some(TypeCategory::Date)),
            "'6/5/2024'"
        );
    }

    #[test]
    fn test_quote_value_lob_columns_are_null() {
        let value = JsonValue::String("long text".to_string());
        assert_eq!(quote_value(&value, Some(TypeCategory::Text)), "NULL");
        assert_eq!(quote_value(&value, Some(TypeCategory::Binary)), "NULL");
    }
}
