//! SQL transpiler for resolved statement trees.
//!
//! Converts analyzer output into SQLite SQL. Each node kind renders itself
//! through [`ToSql`]; fragments compose bottom-up into one statement.

pub mod aggregate;
pub mod analytic;
pub mod dml;
pub mod expr;
pub mod scan;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::ast::*;
use crate::config::TranspilerConfig;
use crate::context::TranslationContext;
use crate::encoder::{SqliteValueEncoder, ValueEncoder};
use crate::error::{TranspileError, TranspileResult};
use crate::functions::{FunctionRegistry, FunctionSpec};
use crate::names::NamePathCursor;

/// Trait for converting tree nodes to SQL.
pub trait ToSql {
    /// Render this node, threading translation state through `ctx`.
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String>;
}

impl ToSql for Node {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        match self {
            Node::Literal(n) => n.to_sql(ctx),
            Node::Parameter(n) => n.to_sql(ctx),
            Node::ColumnRef(n) => n.to_sql(ctx),
            Node::ArgumentRef(n) => n.to_sql(ctx),
            Node::FunctionCall(n) => n.to_sql(ctx),
            Node::AggregateFunctionCall(n) => n.to_sql(ctx),
            Node::AnalyticFunctionCall(n) => n.to_sql(ctx),
            Node::GetStructField(n) => n.to_sql(ctx),
            Node::SubqueryExpr(n) => n.to_sql(ctx),
            // Column defaults do not exist in the target; NULL is what an omitted value gets.
            Node::DmlDefault => Ok("NULL".to_string()),
            // A query without FROM.
            Node::SingleRowScan => Ok(String::new()),
            Node::TableScan(n) => n.to_sql(ctx),
            Node::ArrayScan(n) => n.to_sql(ctx),
            Node::FilterScan(n) => n.to_sql(ctx),
            Node::ProjectScan(n) => n.to_sql(ctx),
            Node::AggregateScan(n) => n.to_sql(ctx),
            Node::SetOperationScan(n) => n.to_sql(ctx),
            Node::OrderByScan(n) => n.to_sql(ctx),
            Node::LimitOffsetScan(n) => n.to_sql(ctx),
            Node::WithScan(n) => n.to_sql(ctx),
            Node::WithRefScan(n) => n.to_sql(ctx),
            Node::AnalyticScan(n) => n.to_sql(ctx),
            Node::QueryStmt(n) => n.query.to_sql(ctx),
            Node::InsertStmt(n) => n.to_sql(ctx),
            Node::DeleteStmt(n) => n.to_sql(ctx),
            Node::UpdateStmt(n) => n.to_sql(ctx),
            Node::Unsupported(kind) => Err(TranspileError::unsupported(kind.to_string())),
        }
    }
}

/// Absent optional children render as empty text.
impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        match self {
            Some(node) => node.to_sql(ctx),
            None => Ok(String::new()),
        }
    }
}

impl<T: ToSql + ?Sized> ToSql for Box<T> {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        (**self).to_sql(ctx)
    }
}

/// Render every item in order.
pub(crate) fn to_sql_list<T: ToSql>(
    items: &[T],
    ctx: &mut TranslationContext<'_>,
) -> TranspileResult<Vec<String>> {
    items.iter().map(|item| item.to_sql(ctx)).collect()
}

/// Entry point: translates whole statements, one fresh context per call.
pub struct Transpiler {
    config: TranspilerConfig,
    functions: FunctionRegistry,
    encoder: Box<dyn ValueEncoder>,
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler {
    pub fn new() -> Self {
        Self {
            config: TranspilerConfig::default(),
            functions: FunctionRegistry::new(),
            encoder: Box::new(SqliteValueEncoder),
        }
    }

    pub fn with_config(mut self, config: TranspilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Bodies of user functions to inline, keyed by flattened name.
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_encoder(mut self, encoder: impl ValueEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn config(&self) -> &TranspilerConfig {
        &self.config
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Translate one statement into SQL.
    ///
    /// The statement's `name_paths` must list one path per table/function
    /// reference in the order they are visited: computed expressions of a
    /// scan before its input, arguments before the function they are passed to.
    /// Analytic scans are the exception and visit their input before their
    /// function groups.
    pub fn transpile(&self, stmt: &ResolvedStatement) -> TranspileResult<String> {
        debug!(
            kind = %stmt.statement.kind(),
            references = stmt.name_paths.len(),
            "transpiling statement"
        );
        let names = NamePathCursor::new(stmt.declared_path.clone(), stmt.name_paths.clone());
        let mut ctx =
            TranslationContext::new(&self.config, &self.functions, self.encoder.as_ref(), names);
        let sql = stmt.statement.to_sql(&mut ctx)?;

        if ctx.names.remaining() > 0 {
            warn!(
                consumed = ctx.names.consumed(),
                remaining = ctx.names.remaining(),
                "name paths left unconsumed; analyzer reference order may not match traversal"
            );
        }
        if !ctx.columns.is_empty() {
            debug!(pending = ctx.columns.len(), "computed columns never projected");
        }
        Ok(sql)
    }

    /// Like [`Self::transpile`], but gives up if `cancel` is already set.
    pub fn transpile_cancellable(
        &self,
        stmt: &ResolvedStatement,
        cancel: &AtomicBool,
    ) -> TranspileResult<String> {
        if cancel.load(Ordering::Acquire) {
            return Err(TranspileError::Cancelled);
        }
        self.transpile(stmt)
    }

    /// Compile an analyzed function body into an inlineable [`FunctionSpec`].
    ///
    /// Argument references render as placeholders in order of appearance.
    pub fn function_spec(&self, body: &ResolvedStatement) -> TranspileResult<FunctionSpec> {
        Ok(FunctionSpec::new(self.transpile(body)?))
    }
}
