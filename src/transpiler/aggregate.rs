//! Aggregate function SQL generation.
//!
//! Aggregate modifiers become trailing option arguments the target's
//! aggregate implementations understand:
//!
//! ```text
//! SUM(DISTINCT x ORDER BY y DESC LIMIT 3)
//!   => bqlite_sum_int64(`x`,bqlite_order_by_string(`y`, false),bqlite_distinct_string(),bqlite_limit_string(3))
//! ```

use super::{to_sql_list, ToSql};
use crate::ast::*;
use crate::context::{Callee, TranslationContext};
use crate::error::TranspileResult;
use crate::functions::FunctionCatalog;

impl ToSql for AggregateFunctionCall {
    fn to_sql(&self, ctx: &mut TranslationContext<'_>) -> TranspileResult<String> {
        let mut args = to_sql_list(&self.arguments, ctx)?;
        let callee =
            ctx.resolve_callee(&self.function, FunctionCatalog::Aggregate, &self.result_type)?;
        let name = match callee {
            Callee::Inline(name, spec) => return spec.inline(&name, &args),
            Callee::Named(name) => name,
        };

        let prefix = ctx.prefix();
        for item in &self.order_by {
            let column = item.column_ref.to_sql(ctx)?;
            args.push(format!(
                "{}_order_by_string({}, {})",
                prefix, column, !item.is_descending
            ));
        }
        if self.distinct {
            args.push(format!("{}_distinct_string()", prefix));
        }
        if let Some(limit) = &self.limit {
            let limit = limit.to_sql(ctx)?;
            args.push(format!("{}_limit_string({})", prefix, limit));
        }
        Ok(format!("{}({})", name, args.join(",")))
    }
}
