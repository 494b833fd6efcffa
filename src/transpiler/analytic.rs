//! Analytic (window) function SQL generation.
//!
//! Window calls are emulated: the input gets a synthetic row ordinal, and
//! every call becomes a correlated subquery over its source table passing
//! partitioning, ordering and frame as option arguments.
//!
//! ```text
//! SELECT x, SUM(y) OVER (PARTITION BY x) FROM t
//!   => SELECT `x`,( SELECT bqlite_window_sum_int64(`y`,bqlite_window_partition_string(`x`),
//!        bqlite_window_rowid_string(`rowid`)) FROM `t` ) AS `s`
//!      FROM ( SELECT *, ROW_NUMBER() OVER() AS `rowid` FROM `t` ) ORDER BY `x`,`y`
//! ```

use tracing::trace;

use super::ToSql;
use crate::ast::*;
use crate::context::{Callee, TranslationContext};
use crate::error::{TranspileError, TranspileResult};
use crate::functions::FunctionCatalog;
use crate::names::quote_identifier;

/// Formats the input first, then the function groups.
impl ToSql for AnalyticScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let input = self.input_scan.to_sql(ctx)?;
        let (_, scope) = ctx.with_analytic_scope(|ctx| {
            for group in &self.function_group_list {
                group.to_sql(ctx)?;
            }
            Ok(())
        })?;

        let mut sql = format!(
            "FROM ( SELECT *, ROW_NUMBER() OVER() AS {} {} )",
            quote_identifier(&ctx.config.row_id_column),
            input
        );
        if !scope.columns.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&scope.columns.join(","));
        }
        Ok(sql)
    }
}

impl ToSql for AnalyticFunctionGroup {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let scope = ctx.analytic_scope()?;
        scope.reset_group();

        if let Some(partition) = &self.partition_by {
            for column_ref in &partition.partition_by_list {
                let column = &column_ref.column;
                let name = quote_identifier(&column.name);
                if !column.table_name.is_empty() {
                    scope.table_name = Some(column.table_name.clone());
                }
                scope.columns.push(name.clone());
                scope.partition_columns.push(name);
            }
        }
        if let Some(ordering) = &self.order_by {
            for item in &ordering.order_by_item_list {
                let column = &item.column_ref.column;
                let name = quote_identifier(&column.name);
                if !column.table_name.is_empty() {
                    scope.table_name = Some(column.table_name.clone());
                }
                scope.columns.push(name.clone());
                scope.order_columns.push((name, !item.is_descending));
            }
        }

        let mut calls = Vec::with_capacity(self.analytic_function_list.len());
        for computed in &self.analytic_function_list {
            calls.push(computed.to_sql(ctx)?);
        }
        Ok(calls.join(","))
    }
}

impl ToSql for AnalyticFunctionCall {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let mut table_name = ctx.analytic_scope()?.table_name.clone();

        let mut args = Vec::with_capacity(self.arguments.len());
        for arg in &self.arguments {
            let sql = arg.to_sql(ctx)?;
            if let Node::ColumnRef(column_ref) = arg {
                if !column_ref.column.table_name.is_empty() {
                    table_name = Some(column_ref.column.table_name.clone());
                }
            }
            match arg {
                // A constant in ORDER BY would be read as a column position.
                Node::Literal(_) | Node::Parameter(_) => {}
                _ => ctx.analytic_scope()?.columns.push(sql.clone()),
            }
            args.push(sql);
        }
        let table_name = table_name.ok_or(TranspileError::MissingAnalyticScope)?;

        let callee =
            ctx.resolve_callee(&self.function, FunctionCatalog::Window, &self.result_type)?;
        let name = match callee {
            Callee::Inline(name, spec) => return spec.inline(&name, &args),
            Callee::Named(name) => name,
        };

        let prefix = ctx.prefix();
        if self.distinct {
            args.push(format!("{}_distinct_string()", prefix));
        }
        let scope = ctx.analytic_scope()?;
        for column in &scope.partition_columns {
            args.push(format!("{}_window_partition_string({})", prefix, column));
        }
        for (column, ascending) in &scope.order_columns {
            args.push(format!(
                "{}_window_order_by_string({}, {})",
                prefix, column, ascending
            ));
        }

        if let Some(frame) = &self.window_frame {
            let unit = FrameUnit::try_from(frame.frame_unit)?;
            args.push(format!("{}_window_frame_unit_string({})", prefix, unit.code()));
            if let Some(start) = &frame.start {
                args.push(boundary_option(ctx, start, "start")?);
            }
            if let Some(end) = &frame.end {
                args.push(boundary_option(ctx, end, "end")?);
            }
        }
        args.push(format!(
            "{}_window_rowid_string({})",
            prefix,
            quote_identifier(&ctx.config.row_id_column)
        ));

        trace!(function = %name, table = %table_name, "correlated window call");
        Ok(format!(
            "( SELECT {}({}) FROM {} )",
            name,
            args.join(","),
            quote_identifier(&table_name)
        ))
    }
}

fn boundary_option(
    ctx: &mut TranslationContext<'_>,
    boundary: &WindowFrameExpr,
    edge: &str,
) -> TranspileResult<String> {
    let kind = BoundaryType::try_from(boundary.boundary_type)?;
    let offset = if kind.has_offset() {
        let offset = boundary.expression.to_sql(ctx)?;
        if offset.is_empty() {
            return Err(TranspileError::contract(format!(
                "window boundary {} requires an offset expression",
                kind.code()
            )));
        }
        offset
    } else {
        "0".to_string()
    };
    Ok(format!(
        "{}_window_boundary_{}_string({}, {})",
        ctx.prefix(),
        edge,
        kind.code(),
        offset
    ))
}
