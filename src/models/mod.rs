//! Data models for the Informix adapter.
//!
//! This module re-exports all model types used throughout the crate.

pub mod ast;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use ast::{Expr, QueryNode, SelectStatement};
pub use query::{QueryParam, RowMapping, TabularResult};
pub use schema::ColumnDescriptor;
