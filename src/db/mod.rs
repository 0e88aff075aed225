//! Database access layer.
//!
//! This module provides the adapter facade and its collaborators:
//! - Driver boundary traits (connection, cursor)
//! - Cursor result materialization
//! - Schema introspection
//! - Engine type mappings

pub mod adapter;
pub mod driver;
pub mod materialize;
pub mod schema;
pub mod types;

pub use adapter::InformixAdapter;
pub use driver::{Connection, Cursor, Driver, NativeColumn, ServerVersion};
pub use materialize::materialize;
pub use types::TypeCategory;
