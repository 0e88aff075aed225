//! Dialect-specific SQL rendering.
//!
//! The renderer walks a generic query AST and emits Informix SQL text. Only
//! pagination needs real dialect work: the engine has no trailing
//! `LIMIT/OFFSET` clause, so the statement's leading `SELECT` keyword is
//! rewritten to `SELECT [SKIP n] <keyword> m` after the baseline rendering.
//! Everything else defers to the baseline rules unchanged.
//!
//! # Dialect variants
//!
//! Engine versions before 9 use a `LIMIT n` token; version 9 and later use
//! `FIRST n` (with `SKIP m` for offsets) and additionally render a
//! standalone `Limit` node inline. The variant is fixed when the adapter is
//! constructed and never varies per query.

use crate::error::{DbError, DbResult};
use crate::models::{Expr, QueryNode, SelectStatement};
use crate::render::params::ParamFormatter;
use crate::render::quote;
use crate::render::SqlRenderer;
use tracing::debug;

/// SQL dialect variant, selected by engine major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Pre-9 engines: `LIMIT n` row-count token.
    Informix,
    /// Version 9+: `FIRST n` token, inline limit clause support.
    Informix9,
}

impl Dialect {
    /// Pick the dialect for a server major version.
    pub fn for_version(major: u32) -> Self {
        if major >= 9 {
            Self::Informix9
        } else {
            Self::Informix
        }
    }

    /// The row-count-limiting keyword of this dialect.
    pub fn pagination_keyword(self) -> &'static str {
        match self {
            Self::Informix => "LIMIT",
            Self::Informix9 => "FIRST",
        }
    }

    /// Whether a standalone `Limit` node renders inline rather than being
    /// consumed by the `SELECT`-prefix rewrite.
    fn renders_inline_limit(self) -> bool {
        matches!(self, Self::Informix9)
    }

    /// Adapter name reported for this dialect.
    pub fn adapter_name(self) -> &'static str {
        match self {
            Self::Informix => "Informix",
            Self::Informix9 => "Informix9",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Informix => write!(f, "informix"),
            Self::Informix9 => write!(f, "informix9"),
        }
    }
}

/// Renderer for one dialect variant, composed with a parameter strategy.
#[derive(Debug)]
pub struct DialectRenderer {
    dialect: Dialect,
    params: Box<dyn ParamFormatter>,
}

impl DialectRenderer {
    /// Create a renderer for the given dialect and parameter strategy.
    pub fn new(dialect: Dialect, params: Box<dyn ParamFormatter>) -> Self {
        Self { dialect, params }
    }

    /// The parameter strategy this renderer was constructed with.
    pub fn param_mode(&self) -> crate::render::params::ParamMode {
        self.params.mode()
    }

    fn render_select(&self, stmt: &SelectStatement) -> DbResult<String> {
        // Baseline rendering first; the body carries the statement's own
        // SELECT keyword and no pagination clause.
        let sql = stmt.body.clone();

        let rendered = match (&stmt.limit, &stmt.offset) {
            (Some(limit), Some(offset)) => {
                let prefix = format!(
                    "SELECT SKIP {} {} {}",
                    self.render_expr(offset),
                    self.dialect.pagination_keyword(),
                    self.render_expr(limit)
                );
                rewrite_first_select(&sql, &prefix)?
            }
            (Some(limit), None) => {
                let prefix = format!(
                    "SELECT {} {}",
                    self.dialect.pagination_keyword(),
                    self.render_expr(limit)
                );
                rewrite_first_select(&sql, &prefix)?
            }
            _ => sql,
        };

        debug!(dialect = %self.dialect, sql = %rendered, "Rendered SELECT");
        Ok(rendered)
    }

    fn render_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(value) => quote::quote_param(value),
            Expr::Bind(value) => self.params.format(value),
        }
    }

    /// Baseline rules for node kinds this dialect does not special-case.
    fn render_base(&self, node: &QueryNode) -> DbResult<String> {
        match node {
            QueryNode::Raw(sql) => Ok(sql.clone()),
            QueryNode::Other { kind } => Err(DbError::unsupported_construct(kind.clone())),
            // Handled by the dialect before delegating here.
            QueryNode::Select(stmt) => Ok(stmt.body.clone()),
            QueryNode::Limit(_) | QueryNode::Offset(_) => Ok(String::new()),
        }
    }
}

impl SqlRenderer for DialectRenderer {
    fn render(&self, node: &QueryNode) -> DbResult<String> {
        match node {
            QueryNode::Select(stmt) => self.render_select(stmt),
            // Pagination is consumed by the SELECT-prefix rewrite; the
            // version 9 dialect also supports an inline limit clause.
            QueryNode::Limit(expr) if self.dialect.renders_inline_limit() => Ok(format!(
                "{} {}",
                self.dialect.pagination_keyword(),
                self.render_expr(expr)
            )),
            QueryNode::Limit(_) | QueryNode::Offset(_) => Ok(String::new()),
            other => self.render_base(other),
        }
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }
}

/// Find the first `SELECT` token, ASCII case-insensitive.
fn find_select(sql: &str) -> Option<usize> {
    sql.as_bytes()
        .windows("SELECT".len())
        .position(|window| window.eq_ignore_ascii_case(b"SELECT"))
}

/// Replace only the first occurrence of the `SELECT` keyword. The match
/// position is tracked explicitly so nested subquery keywords are never
/// touched.
fn rewrite_first_select(sql: &str, replacement: &str) -> DbResult<String> {
    let pos = find_select(sql).ok_or_else(|| {
        DbError::invalid_input("statement body has no SELECT keyword to rewrite")
    })?;
    let mut rewritten = String::with_capacity(sql.len() + replacement.len());
    rewritten.push_str(&sql[..pos]);
    rewritten.push_str(replacement);
    rewritten.push_str(&sql[pos + "SELECT".len()..]);
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueryParam;
    use crate::render::params::ParamMode;

    fn renderer(dialect: Dialect) -> DialectRenderer {
        DialectRenderer::new(dialect, ParamMode::Literal.formatter())
    }

    #[test]
    fn test_select_without_pagination_is_verbatim() {
        let stmt = SelectStatement::new("SELECT id, name FROM users");
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT id, name FROM users");
    }

    #[test]
    fn test_limit_only_rewrites_first_select() {
        let stmt = SelectStatement::new("SELECT id FROM users").with_limit(Expr::literal(5));
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT FIRST 5 id FROM users");
    }

    #[test]
    fn test_limit_and_offset_use_skip_prefix() {
        let stmt = SelectStatement::new("SELECT id FROM users")
            .with_limit(Expr::literal(5))
            .with_offset(Expr::literal(10));
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT SKIP 10 FIRST 5 id FROM users");
    }

    #[test]
    fn test_older_dialect_uses_limit_keyword() {
        let stmt = SelectStatement::new("SELECT id FROM users")
            .with_limit(Expr::literal(5))
            .with_offset(Expr::literal(10));
        let sql = renderer(Dialect::Informix)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT SKIP 10 LIMIT 5 id FROM users");
    }

    #[test]
    fn test_nested_subquery_select_is_untouched() {
        let stmt = SelectStatement::new(
            "SELECT id FROM users WHERE id IN (SELECT user_id FROM orders)",
        )
        .with_limit(Expr::literal(5));
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(
            sql,
            "SELECT FIRST 5 id FROM users WHERE id IN (SELECT user_id FROM orders)"
        );
    }

    #[test]
    fn test_lowercase_select_keyword_is_found() {
        let stmt = SelectStatement::new("select id from users").with_limit(Expr::literal(3));
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT FIRST 3 id from users");
    }

    #[test]
    fn test_offset_without_limit_is_verbatim() {
        let stmt = SelectStatement::new("SELECT id FROM users").with_offset(Expr::literal(10));
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT id FROM users");
    }

    #[test]
    fn test_standalone_limit_renders_empty_in_base_dialect() {
        let sql = renderer(Dialect::Informix)
            .render(&QueryNode::Limit(Expr::literal(5)))
            .unwrap();
        assert_eq!(sql, "");
    }

    #[test]
    fn test_standalone_limit_renders_inline_in_version9() {
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Limit(Expr::literal(5)))
            .unwrap();
        assert_eq!(sql, "FIRST 5");
    }

    #[test]
    fn test_standalone_offset_renders_empty() {
        for dialect in [Dialect::Informix, Dialect::Informix9] {
            let sql = renderer(dialect)
                .render(&QueryNode::Offset(Expr::literal(10)))
                .unwrap();
            assert_eq!(sql, "");
        }
    }

    #[test]
    fn test_bind_mode_leaves_placeholders_in_pagination() {
        let r = DialectRenderer::new(Dialect::Informix9, ParamMode::Bind.formatter());
        let stmt = SelectStatement::new("SELECT id FROM users")
            .with_limit(Expr::bind(5))
            .with_offset(Expr::bind(10));
        let sql = r.render(&QueryNode::Select(stmt)).unwrap();
        assert_eq!(sql, "SELECT SKIP ? FIRST ? id FROM users");
    }

    #[test]
    fn test_literal_mode_substitutes_bind_values() {
        let stmt = SelectStatement::new("SELECT id FROM users").with_limit(Expr::bind(5));
        let sql = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT FIRST 5 id FROM users");
    }

    #[test]
    fn test_unknown_construct_is_an_error() {
        let node = QueryNode::Other {
            kind: "InsertStatement".to_string(),
        };
        let err = renderer(Dialect::Informix9).render(&node).unwrap_err();
        match err {
            DbError::UnsupportedConstruct { construct } => {
                assert_eq!(construct, "InsertStatement")
            }
            other => panic!("expected unsupported construct, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_statement_passes_through() {
        let node = QueryNode::Raw("DELETE FROM users WHERE id = 1".to_string());
        let sql = renderer(Dialect::Informix9).render(&node).unwrap();
        assert_eq!(sql, "DELETE FROM users WHERE id = 1");
    }

    #[test]
    fn test_body_without_select_is_rejected() {
        let stmt = SelectStatement::new("EXECUTE PROCEDURE p()").with_limit(Expr::literal(1));
        let err = renderer(Dialect::Informix9)
            .render(&QueryNode::Select(stmt))
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidInput { .. }));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let r = renderer(Dialect::Informix9);
        let stmt = SelectStatement::new("SELECT id FROM users")
            .with_limit(Expr::literal(5))
            .with_offset(Expr::literal(10));
        let node = QueryNode::Select(stmt);
        let first = r.render(&node).unwrap();
        let second = r.render(&node).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pagination_values_use_the_literal_rules() {
        // Pagination amounts are rendered sub-expressions, not bare digits.
        let stmt = SelectStatement::new("SELECT id FROM t")
            .with_limit(Expr::Literal(QueryParam::String("7".to_string())));
        let sql = renderer(Dialect::Informix)
            .render(&QueryNode::Select(stmt))
            .unwrap();
        assert_eq!(sql, "SELECT LIMIT '7' id FROM t");
    }

    #[test]
    fn test_dialect_for_version() {
        assert_eq!(Dialect::for_version(7), Dialect::Informix);
        assert_eq!(Dialect::for_version(9), Dialect::Informix9);
        assert_eq!(Dialect::for_version(12), Dialect::Informix9);
    }
}
