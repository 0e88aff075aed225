//! SQL rendering layer.
//!
//! This module provides dialect-specific SQL text rendering over the generic
//! query AST:
//! - `dialect`: the Informix renderer variants and the pagination rewrite
//! - `params`: bind-placeholder vs. literal-substitution strategies
//! - `quote`: SQL literal quoting rules
//!
//! Renderer selection happens once at adapter construction through a
//! [`RendererRegistry`] value passed by reference - there is no process-wide
//! dialect table.

pub mod dialect;
pub mod params;
pub mod quote;

pub use dialect::{Dialect, DialectRenderer};
pub use params::{BindFormatter, LiteralFormatter, ParamFormatter, ParamMode};

use crate::config::AdapterConfig;
use crate::error::{DbError, DbResult};
use crate::models::QueryNode;
use std::collections::HashMap;

/// Renders query AST nodes into SQL text for one dialect.
pub trait SqlRenderer {
    /// Render a node, or fail with an unsupported-construct error. Must be
    /// free of hidden state: the same node always renders the same text.
    fn render(&self, node: &QueryNode) -> DbResult<String>;

    /// The dialect this renderer emits.
    fn dialect(&self) -> Dialect;
}

/// Builds a renderer for a dialect and parameter mode.
pub type RendererFactory = fn(Dialect, ParamMode) -> DialectRenderer;

/// Explicit mapping from dialect identifier to renderer factory.
///
/// Constructed once at process start and handed by reference to whatever
/// constructs adapters.
#[derive(Debug)]
pub struct RendererRegistry {
    factories: HashMap<Dialect, RendererFactory>,
}

impl RendererRegistry {
    /// Registry with the built-in dialect variants installed.
    pub fn builtin() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register(Dialect::Informix, DialectRenderer::new_boxed);
        registry.register(Dialect::Informix9, DialectRenderer::new_boxed);
        registry
    }

    /// Install or replace the factory for a dialect.
    pub fn register(&mut self, dialect: Dialect, factory: RendererFactory) {
        self.factories.insert(dialect, factory);
    }

    /// Build a renderer for the dialect with an explicit parameter mode.
    pub fn build(&self, dialect: Dialect, mode: ParamMode) -> DbResult<DialectRenderer> {
        let factory = self.factories.get(&dialect).ok_or_else(|| {
            DbError::internal(format!("no renderer registered for dialect '{dialect}'"))
        })?;
        Ok(factory(dialect, mode))
    }

    /// Select the renderer for an adapter: the parameter mode follows the
    /// configuration's `prepared_statements` flag. The choice is fixed for
    /// the adapter's lifetime.
    pub fn select_renderer(
        &self,
        dialect: Dialect,
        config: &AdapterConfig,
    ) -> DbResult<DialectRenderer> {
        let mode = if config.prepared_statements {
            ParamMode::Bind
        } else {
            ParamMode::Literal
        };
        self.build(dialect, mode)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DialectRenderer {
    /// Factory-signature constructor used by the registry.
    fn new_boxed(dialect: Dialect, mode: ParamMode) -> DialectRenderer {
        DialectRenderer::new(dialect, mode.formatter())
    }
}
