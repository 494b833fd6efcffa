//! INSERT / UPDATE / DELETE SQL generation.

use super::{to_sql_list, ToSql};
use crate::ast::*;
use crate::context::TranslationContext;
use crate::error::{TranspileError, TranspileResult};
use crate::names::quote_identifier;

impl ToSql for DmlValue {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        self.value.to_sql(ctx)
    }
}

impl ToSql for InsertRow {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let values = to_sql_list(&self.value_list, ctx)?;
        Ok(format!("({})", values.join(",")))
    }
}

impl ToSql for InsertStmt {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let table = quote_identifier(&ctx.names.next_name()?);
        let columns: Vec<String> = self
            .insert_column_list
            .iter()
            .map(|column| quote_identifier(&column.name))
            .collect();

        if let Some(query) = &self.query {
            if !self.row_list.is_empty() {
                return Err(TranspileError::contract(
                    "insert has both a row list and a query",
                ));
            }
            let query = query.to_sql(ctx)?;
            return Ok(format!("INSERT INTO {} ({}) {}", table, columns.join(","), query));
        }

        if self.row_list.is_empty() {
            return Err(TranspileError::contract("insert has neither rows nor a query"));
        }
        let mut rows = Vec::with_capacity(self.row_list.len());
        for (i, row) in self.row_list.iter().enumerate() {
            if row.value_list.len() != columns.len() {
                return Err(TranspileError::contract(format!(
                    "insert row {} has {} values for {} columns",
                    i,
                    row.value_list.len(),
                    columns.len()
                )));
            }
            rows.push(row.to_sql(ctx)?);
        }
        Ok(format!(
            "INSERT INTO {} ({}) VALUES {}",
            table,
            columns.join(","),
            rows.join(",")
        ))
    }
}

impl ToSql for DeleteStmt {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let table = quote_identifier(&ctx.names.next_name()?);
        let mut sql = format!("DELETE FROM {}", table);
        push_where(&mut sql, &self.where_expr, ctx)?;
        Ok(sql)
    }
}

impl ToSql for UpdateItem {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let target = self.target.to_sql(ctx)?;
        let value = self.set_value.to_sql(ctx)?;
        Ok(format!("{}={}", target, value))
    }
}

impl ToSql for UpdateStmt {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let table = quote_identifier(&ctx.names.next_name()?);
        if self.update_item_list.is_empty() {
            return Err(TranspileError::contract("update without assignments"));
        }
        let items = to_sql_list(&self.update_item_list, ctx)?;
        let mut sql = format!("UPDATE {} SET {}", table, items.join(","));
        push_where(&mut sql, &self.where_expr, ctx)?;
        Ok(sql)
    }
}

fn push_where(
    sql: &mut String,
    where_expr: &Option<Box<Node>>,
    ctx: &mut TranslationContext<'_>,
) -> TranspileResult<()> {
    let condition = where_expr.to_sql(ctx)?;
    if !condition.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&condition);
    }
    Ok(())
}
