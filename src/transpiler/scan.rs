//! Relational scan SQL generation.
//!
//! Scans render as FROM-clause fragments (`FROM ...`, possibly followed by
//! WHERE, GROUP BY or HAVING) or full `SELECT` queries. Projections turn the
//! former into the latter.

use super::{to_sql_list, ToSql};
use crate::ast::*;
use crate::context::TranslationContext;
use crate::error::{TranspileError, TranspileResult};
use crate::names::quote_identifier;

impl ToSql for TableScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let name = ctx.names.next_name()?;
        Ok(format!("FROM {}", quote_identifier(&name)))
    }
}

impl ToSql for ArrayScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        if self.input_scan.is_some() {
            return Err(TranspileError::unsupported("array_scan with input_scan"));
        }
        let array = self.array_expr.to_sql(ctx)?;
        Ok(format!(
            "FROM ( SELECT json_each.value AS {} FROM json_each({}_decode_array_string({})) )",
            quote_identifier(&self.element_column.name),
            ctx.prefix(),
            array
        ))
    }
}

impl ToSql for FilterScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let input = self.input_scan.to_sql(ctx)?;
        let filter = self.filter_expr.to_sql(ctx)?;
        // A filter over grouped rows follows GROUP BY, where only HAVING is valid.
        let clause = match *self.input_scan {
            Node::AggregateScan(_) => "HAVING",
            _ => "WHERE",
        };
        Ok(format!("{} {} {}", input, clause, filter))
    }
}

/// Registers `expr AS name` for the enclosing projection; renders the bare expression.
impl ToSql for ComputedColumn {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let expr = self.expr.to_sql(ctx)?;
        ctx.columns.insert(
            self.column.name.clone(),
            format!("{} AS {}", expr, quote_identifier(&self.column.name)),
        );
        Ok(expr)
    }
}

impl ToSql for ProjectScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let (_, mut own) = ctx.with_column_scope(|ctx| to_sql_list(&self.expr_list, ctx))?;
        let (input, mut below) = ctx.with_column_scope(|ctx| self.input_scan.to_sql(ctx))?;

        let columns: Vec<String> = self
            .column_list
            .iter()
            .map(|column| {
                own.take(&column.name)
                    .or_else(|| below.take(&column.name))
                    .unwrap_or_else(|| quote_identifier(&column.name))
            })
            .collect();

        if input.is_empty() {
            Ok(format!("SELECT {}", columns.join(",")))
        } else {
            Ok(format!("SELECT {} {}", columns.join(","), input))
        }
    }
}

impl ToSql for AggregateScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        to_sql_list(&self.aggregate_list, ctx)?;
        let keys = to_sql_list(&self.group_by_list, ctx)?;

        let input = self.input_scan.to_sql(ctx)?;
        let mut sql = if input.starts_with("SELECT") {
            format!("FROM ( {} )", input)
        } else {
            input
        };
        if !keys.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&keys.join(","));
        }
        Ok(sql)
    }
}

impl ToSql for SetOperationItem {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        self.scan.to_sql(ctx)
    }
}

impl ToSql for SetOperationScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let op = SetOperationType::try_from(self.op_type)?;
        let branches = to_sql_list(&self.input_item_list, ctx)?;
        Ok(branches.join(&format!(" {} ", op.keywords())))
    }
}

impl ToSql for OrderByItem {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let column = self.column_ref.to_sql(ctx)?;
        let direction = if self.is_descending { "DESC" } else { "ASC" };
        Ok(format!("{} {}", column, direction))
    }
}

impl ToSql for OrderByScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let input = self.input_scan.to_sql(ctx)?;
        let items = to_sql_list(&self.order_by_item_list, ctx)?;
        if items.is_empty() {
            return Ok(input);
        }
        Ok(format!("{} ORDER BY {}", input, items.join(",")))
    }
}

impl ToSql for LimitOffsetScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let input = self.input_scan.to_sql(ctx)?;
        let mut sql = format!("{} LIMIT {}", input, self.limit.to_sql(ctx)?);
        if let Some(offset) = &self.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&offset.to_sql(ctx)?);
        }
        Ok(sql)
    }
}

impl ToSql for WithEntry {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let subquery = self.with_subquery.to_sql(ctx)?;
        Ok(format!("{} AS ( {} )", self.with_query_name, subquery))
    }
}

impl ToSql for WithScan {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        if self.recursive {
            return Err(TranspileError::unsupported("recursive with_scan"));
        }
        let entries = to_sql_list(&self.with_entry_list, ctx)?;
        let query = self.query.to_sql(ctx)?;
        Ok(format!("WITH {} {}", entries.join(", "), query))
    }
}

impl ToSql for WithRefScan {
    fn to_sql(&self, _ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        Ok(format!("FROM {}", self.with_query_name))
    }
}
