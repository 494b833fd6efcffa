//! Scalar expression SQL generation.

use super::{to_sql_list, ToSql};
use crate::ast::*;
use crate::context::{Callee, TranslationContext};
use crate::error::TranspileResult;
use crate::functions::{FunctionCatalog, PLACEHOLDER};
use crate::names::quote_identifier;

impl ToSql for Literal {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        ctx.encoder().encode(&self.value, &self.value_type)
    }
}

impl ToSql for Parameter {
    fn to_sql(&self, _ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        match self.position {
            Some(position) if self.name.is_empty() => Ok(format!("?{}", position)),
            _ => Ok(format!("@{}", self.name)),
        }
    }
}

impl ToSql for ColumnRef {
    fn to_sql(&self, _ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        Ok(quote_identifier(&self.column.name))
    }
}

/// Inside a function body an argument is a positional placeholder.
impl ToSql for ArgumentRef {
    fn to_sql(&self, _ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        Ok(PLACEHOLDER.to_string())
    }
}

impl ToSql for FunctionCall {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        // Arguments first: their references precede the callee's in name-path order.
        let args = to_sql_list(&self.arguments, ctx)?;
        match ctx.resolve_callee(&self.function, FunctionCatalog::Scalar, &self.result_type)? {
            Callee::Inline(name, spec) => spec.inline(&name, &args),
            Callee::Named(name) => Ok(format!("{}({})", name, args.join(","))),
        }
    }
}

impl ToSql for GetStructField {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let expr = self.expr.to_sql(ctx)?;
        Ok(format!(
            "{}_get_struct_field_{}({}, {})",
            ctx.prefix(),
            self.field_type.family(),
            expr,
            self.field_idx
        ))
    }
}

impl ToSql for SubqueryExpr {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let sql = self.subquery.to_sql(ctx)?;
        match self.subquery_type {
            SubqueryType::Exists => Ok(format!("EXISTS ({})", sql)),
            _ => Ok(sql),
        }
    }
}
