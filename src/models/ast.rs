//! Generic query AST consumed by the dialect renderers.
//!
//! Nodes are produced by an upstream query builder and are read-only here.
//! The statement body arrives already rendered; only pagination and bound
//! parameters need dialect-specific treatment, so those are the only parts
//! kept structural.

use crate::models::QueryParam;

/// A rendered sub-expression used for limit/offset amounts.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value, always rendered inline.
    Literal(QueryParam),
    /// Bound parameter; rendered per the adapter's parameter strategy
    /// (placeholder or substituted literal).
    Bind(QueryParam),
}

impl Expr {
    /// Convenience constructor for integer literals.
    pub fn literal(value: i64) -> Self {
        Self::Literal(QueryParam::Int(value))
    }

    /// Convenience constructor for integer bind parameters.
    pub fn bind(value: i64) -> Self {
        Self::Bind(QueryParam::Int(value))
    }
}

/// A SELECT statement with its pagination split out. The body is the full
/// statement text as rendered by the upstream builder, carrying the leading
/// `SELECT` keyword and no pagination clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub body: String,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

impl SelectStatement {
    /// Create a statement with no pagination.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            limit: None,
            offset: None,
        }
    }

    /// Set the row limit expression.
    pub fn with_limit(mut self, limit: Expr) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the row offset expression.
    pub fn with_offset(mut self, offset: Expr) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// A query AST node. `Select` is the only kind this dialect treats
/// specially; `Limit`/`Offset` appear standalone when the upstream builder
/// asks for an inline clause; everything else is either pre-rendered text or
/// a construct with no rendering rule here.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Complete SELECT with optional pagination.
    Select(SelectStatement),
    /// Standalone LIMIT clause.
    Limit(Expr),
    /// Standalone OFFSET clause.
    Offset(Expr),
    /// A statement already rendered by the upstream builder, passed through.
    Raw(String),
    /// A construct the upstream builder could not lower; rendering it is an
    /// error, never empty text.
    Other { kind: String },
}

impl QueryNode {
    /// Short node-kind label used in error messages and logs.
    pub fn kind(&self) -> &str {
        match self {
            Self::Select(_) => "SelectStatement",
            Self::Limit(_) => "Limit",
            Self::Offset(_) => "Offset",
            Self::Raw(_) => "Raw",
            Self::Other { kind } => kind,
        }
    }
}
