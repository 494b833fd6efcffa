//! Per-translation state threaded through the recursion.
//!
//! A [`TranslationContext`] lives for exactly one top-level translation. It is
//! created by [`crate::Transpiler`] and cannot be cloned.

use std::collections::HashMap;

use crate::ast::{FunctionRef, ResolvedType};
use crate::config::TranspilerConfig;
use crate::encoder::ValueEncoder;
use crate::error::{TranspileError, TranspileResult};
use crate::functions::{self, FunctionCatalog, FunctionRegistry};
use crate::names::NamePathCursor;

/// Formatted computed columns waiting for their projection.
///
/// Keys are output column names, values are `expr AS \`name\`` fragments.
#[derive(Debug, Default)]
pub struct ColumnExprMap {
    entries: HashMap<String, String>,
}

impl ColumnExprMap {
    pub fn insert(&mut self, name: impl Into<String>, sql: String) {
        self.entries.insert(name.into(), sql);
    }

    /// Remove and return the fragment for `name`.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Columns collected while formatting one analytic scan.
#[derive(Debug, Default)]
pub struct AnalyticScope {
    /// Correlation target of the emulating subquery.
    pub table_name: Option<String>,
    /// Partition, order and argument columns, in collection order.
    pub columns: Vec<String>,
    /// Partition columns of the current function group.
    pub partition_columns: Vec<String>,
    /// Order columns of the current function group with their ascending flag.
    pub order_columns: Vec<(String, bool)>,
}

impl AnalyticScope {
    /// Start a new function group.
    pub fn reset_group(&mut self) {
        self.partition_columns.clear();
        self.order_columns.clear();
    }
}

/// How a call site should invoke its function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee<'a> {
    /// Mangled builtin or forward-referenced user function name.
    Named(String),
    /// User function to inline, with its flattened name.
    Inline(String, &'a functions::FunctionSpec),
}

/// Mutable state of one translation.
pub struct TranslationContext<'a> {
    pub config: &'a TranspilerConfig,
    functions: &'a FunctionRegistry,
    encoder: &'a dyn ValueEncoder,
    pub names: NamePathCursor,
    pub columns: ColumnExprMap,
    pub analytic: Option<AnalyticScope>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(
        config: &'a TranspilerConfig,
        functions: &'a FunctionRegistry,
        encoder: &'a dyn ValueEncoder,
        names: NamePathCursor,
    ) -> Self {
        Self {
            config,
            functions,
            encoder,
            names,
            columns: ColumnExprMap::default(),
            analytic: None,
        }
    }

    pub fn encoder(&self) -> &'a dyn ValueEncoder {
        self.encoder
    }

    /// Prefix of emulation function names.
    pub fn prefix(&self) -> &'a str {
        &self.config.function_prefix
    }

    /// Classify a call and produce its callee.
    ///
    /// Builtins never touch the name-path cursor; user functions consume
    /// exactly one entry.
    pub fn resolve_callee(
        &mut self,
        function: &FunctionRef,
        catalog: FunctionCatalog,
        result_type: &ResolvedType,
    ) -> TranspileResult<Callee<'a>> {
        if let Some(bare) = functions::builtin_name(function, catalog) {
            return Ok(Callee::Named(functions::mangle(
                self.prefix(),
                catalog,
                bare,
                result_type,
            )));
        }
        let name = self.names.next_name()?;
        let registry: &'a FunctionRegistry = self.functions;
        Ok(match registry.get(&name) {
            Some(spec) => Callee::Inline(name, spec),
            None => Callee::Named(name),
        })
    }

    /// Run `f` with an empty column map and hand back what it left behind.
    ///
    /// The surrounding map is restored afterwards, so nested projections can
    /// never consume each other's computed columns.
    pub fn with_column_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> TranspileResult<T>,
    ) -> TranspileResult<(T, ColumnExprMap)> {
        let outer = std::mem::take(&mut self.columns);
        let result = f(self);
        let inner = std::mem::replace(&mut self.columns, outer);
        Ok((result?, inner))
    }

    /// Run `f` inside a fresh analytic scope and hand back the collected scope.
    pub fn with_analytic_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> TranspileResult<T>,
    ) -> TranspileResult<(T, AnalyticScope)> {
        let outer = self.analytic.replace(AnalyticScope::default());
        let result = f(self);
        let scope = std::mem::replace(&mut self.analytic, outer).unwrap_or_default();
        Ok((result?, scope))
    }

    /// The active analytic scope, or an error when outside an analytic scan.
    pub fn analytic_scope(&mut self) -> TranspileResult<&mut AnalyticScope> {
        self.analytic
            .as_mut()
            .ok_or(TranspileError::MissingAnalyticScope)
    }
}
