//! Cursor result materialization.
//!
//! Converts the ordered row mappings a cursor fetch produces into the
//! stable [`TabularResult`] shape handed to callers: field names from the
//! first row's key order, row values in that positional order.

use crate::models::{RowMapping, TabularResult};

/// Materialize fetched rows into a tabular result.
///
/// The first row's key order defines the field order for the whole result
/// set; the engine guarantees a uniform column order across rows, so later
/// rows are not re-validated against the first (a mismatched row would
/// surface as a shorter or misaligned value sequence, not an error).
pub fn materialize(rows: Vec<RowMapping>) -> TabularResult {
    let Some(first) = rows.first() else {
        return TabularResult::empty();
    };

    let fields: Vec<String> = first.keys().cloned().collect();
    let rows = rows
        .iter()
        .map(|row| row.values().cloned().collect())
        .collect();

    TabularResult { fields, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, serde_json::Value)]) -> RowMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let result = materialize(Vec::new());
        assert!(result.fields.is_empty());
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_fields_come_from_first_row_in_order() {
        let rows = vec![
            row(&[("a", json!(1)), ("b", json!(2))]),
            row(&[("a", json!(3)), ("b", json!(4))]),
        ];
        let result = materialize(rows);
        assert_eq!(result.fields, vec!["a", "b"]);
        assert_eq!(result.rows, vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]]);
    }

    #[test]
    fn test_single_aggregate_column() {
        let rows = vec![row(&[("COUNT(*)", json!(33))])];
        let result = materialize(rows);
        assert_eq!(result.fields, vec!["COUNT(*)"]);
        assert_eq!(result.rows, vec![vec![json!(33)]]);
    }

    #[test]
    fn test_mismatched_rows_propagate_unchecked() {
        // The cursor contract guarantees uniform shape; a violation shows up
        // as a shorter value sequence rather than an error here.
        let rows = vec![
            row(&[("a", json!(1)), ("b", json!(2))]),
            row(&[("a", json!(3))]),
        ];
        let result = materialize(rows);
        assert_eq!(result.fields.len(), 2);
        assert_eq!(result.rows[1].len(), 1);
    }
}
