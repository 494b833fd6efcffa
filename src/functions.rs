//! Function identity and name mangling.
//!
//! Every called function ends up as one of:
//! - a builtin, mangled to `<prefix>_<name>_<family>` (window builtins get
//!   `<prefix>_window_<name>_<family>`), which the target engine registers;
//! - a user function with a known body, inlined in place;
//! - a user function without a known body, called by its flattened name.

use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while},
    character::complete::char,
    combinator::{map, recognize, value},
    multi::many0,
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{FunctionRef, ResolvedType};
use crate::error::{TranspileError, TranspileResult};

/// Prefix the analyzer puts on its private builtins (`$add`, `$equal`, ...).
pub const PRIVATE_BUILTIN_SIGIL: char = '$';

/// Placeholder marker in function body templates.
pub const PLACEHOLDER: char = '?';

const SCALAR_FUNCTIONS: &[&str] = &[
    "abs",
    "acos",
    "acosh",
    "array_concat",
    "array_length",
    "array_reverse",
    "array_to_string",
    "ascii",
    "asin",
    "asinh",
    "atan",
    "atan2",
    "atanh",
    "bit_count",
    "byte_length",
    "cbrt",
    "ceil",
    "ceiling",
    "char_length",
    "character_length",
    "chr",
    "code_points_to_bytes",
    "code_points_to_string",
    "coalesce",
    "concat",
    "cos",
    "cosh",
    "current_date",
    "current_datetime",
    "current_time",
    "current_timestamp",
    "date",
    "date_add",
    "date_diff",
    "date_from_unix_date",
    "date_sub",
    "date_trunc",
    "datetime",
    "datetime_add",
    "datetime_diff",
    "datetime_sub",
    "datetime_trunc",
    "div",
    "ends_with",
    "exp",
    "extract",
    "farm_fingerprint",
    "floor",
    "format",
    "format_date",
    "format_datetime",
    "format_time",
    "format_timestamp",
    "from_base32",
    "from_base64",
    "from_hex",
    "generate_array",
    "generate_date_array",
    "generate_timestamp_array",
    "greatest",
    "if",
    "ifnull",
    "ieee_divide",
    "initcap",
    "instr",
    "is_inf",
    "is_nan",
    "json_extract",
    "json_extract_scalar",
    "json_query",
    "json_value",
    "last_day",
    "least",
    "left",
    "length",
    "ln",
    "log",
    "log10",
    "lower",
    "lpad",
    "ltrim",
    "md5",
    "mod",
    "nullif",
    "offset",
    "ordinal",
    "parse_date",
    "parse_datetime",
    "parse_json",
    "parse_time",
    "parse_timestamp",
    "pow",
    "power",
    "rand",
    "regexp_contains",
    "regexp_extract",
    "regexp_extract_all",
    "regexp_instr",
    "regexp_replace",
    "repeat",
    "replace",
    "reverse",
    "right",
    "round",
    "rpad",
    "rtrim",
    "safe_cast",
    "safe_divide",
    "safe_multiply",
    "safe_negate",
    "safe_offset",
    "safe_ordinal",
    "safe_subtract",
    "safe_add",
    "sha1",
    "sha256",
    "sha512",
    "sign",
    "sin",
    "sinh",
    "split",
    "sqrt",
    "starts_with",
    "strpos",
    "substr",
    "substring",
    "tan",
    "tanh",
    "time",
    "time_add",
    "time_diff",
    "time_sub",
    "time_trunc",
    "timestamp",
    "timestamp_add",
    "timestamp_diff",
    "timestamp_micros",
    "timestamp_millis",
    "timestamp_seconds",
    "timestamp_sub",
    "timestamp_trunc",
    "to_base32",
    "to_base64",
    "to_code_points",
    "to_hex",
    "to_json",
    "to_json_string",
    "translate",
    "trim",
    "trunc",
    "unicode",
    "unix_date",
    "unix_micros",
    "unix_millis",
    "unix_seconds",
    "upper",
];

const AGGREGATE_FUNCTIONS: &[&str] = &[
    "any_value",
    "approx_count_distinct",
    "approx_quantiles",
    "approx_top_count",
    "approx_top_sum",
    "array_agg",
    "array_concat_agg",
    "avg",
    "bit_and",
    "bit_or",
    "bit_xor",
    "corr",
    "count",
    "countif",
    "covar_pop",
    "covar_samp",
    "logical_and",
    "logical_or",
    "max",
    "min",
    "stddev",
    "stddev_pop",
    "stddev_samp",
    "string_agg",
    "sum",
    "var_pop",
    "var_samp",
    "variance",
];

const WINDOW_FUNCTIONS: &[&str] = &[
    "any_value",
    "array_agg",
    "avg",
    "count",
    "countif",
    "cume_dist",
    "dense_rank",
    "first_value",
    "lag",
    "last_value",
    "lead",
    "logical_and",
    "logical_or",
    "max",
    "min",
    "nth_value",
    "ntile",
    "percent_rank",
    "percentile_cont",
    "percentile_disc",
    "rank",
    "row_number",
    "stddev",
    "stddev_pop",
    "stddev_samp",
    "string_agg",
    "sum",
    "var_pop",
    "var_samp",
    "variance",
];

/// Builtin catalog a call is classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCatalog {
    Scalar,
    Aggregate,
    Window,
}

impl FunctionCatalog {
    /// Builtin names of the catalog.
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            FunctionCatalog::Scalar => SCALAR_FUNCTIONS,
            FunctionCatalog::Aggregate => AGGREGATE_FUNCTIONS,
            FunctionCatalog::Window => WINDOW_FUNCTIONS,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().contains(&name)
    }

    /// Mangled name stem, e.g. `bqlite` or `bqlite_window`.
    pub fn stem(&self, prefix: &str) -> String {
        match self {
            FunctionCatalog::Window => format!("{}_window", prefix),
            _ => prefix.to_string(),
        }
    }
}

/// Mangle a builtin into the entry point registered by the target engine.
pub fn mangle(
    prefix: &str,
    catalog: FunctionCatalog,
    name: &str,
    result_type: &ResolvedType,
) -> String {
    format!("{}_{}_{}", catalog.stem(prefix), name, result_type.family())
}

/// If the function is a builtin of `catalog`, its bare name.
pub fn builtin_name<'f>(function: &'f FunctionRef, catalog: FunctionCatalog) -> Option<&'f str> {
    if let Some(bare) = function.name.strip_prefix(PRIVATE_BUILTIN_SIGIL) {
        return Some(bare);
    }
    catalog
        .contains(&function.name)
        .then_some(function.name.as_str())
}

/// SQL body of a user-defined function, with `?` marking each argument in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodySegment<'a> {
    Text(&'a str),
    Placeholder,
}

impl FunctionSpec {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Substitute formatted arguments into the body, one per placeholder.
    ///
    /// `function` is only used for error messages.
    pub fn inline(&self, function: &str, args: &[String]) -> TranspileResult<String> {
        let segments = scan_body(function, &self.body)?;
        let placeholders = segments
            .iter()
            .filter(|s| **s == BodySegment::Placeholder)
            .count();
        if placeholders != args.len() {
            return Err(TranspileError::ArityMismatch {
                function: function.to_string(),
                placeholders,
                arguments: args.len(),
            });
        }

        let mut args = args.iter();
        let mut body = String::with_capacity(self.body.len());
        for segment in segments {
            match segment {
                BodySegment::Text(text) => body.push_str(text),
                BodySegment::Placeholder => {
                    if let Some(arg) = args.next() {
                        body.push_str(arg);
                    }
                }
            }
        }
        debug!(function, "inlined function body");
        Ok(format!("( {} )", body))
    }
}

fn scan_body<'a>(function: &str, body: &'a str) -> TranspileResult<Vec<BodySegment<'a>>> {
    match body_segments(body) {
        Ok(("", segments)) => Ok(segments),
        Ok((rest, _)) => Err(TranspileError::MalformedFunctionBody {
            function: function.to_string(),
            near: rest.chars().take(20).collect(),
        }),
        Err(e) => Err(TranspileError::MalformedFunctionBody {
            function: function.to_string(),
            near: format!("{:?}", e),
        }),
    }
}

/// Split a body into text and placeholders. `?` inside quotes is text.
fn body_segments(input: &str) -> IResult<&str, Vec<BodySegment<'_>>> {
    many0(alt((
        value(BodySegment::Placeholder, char(PLACEHOLDER)),
        map(quoted('\''), BodySegment::Text),
        map(quoted('"'), BodySegment::Text),
        map(quoted('`'), BodySegment::Text),
        map(is_not("?'\"`"), BodySegment::Text),
    )))(input)
}

fn quoted(quote: char) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input| recognize(tuple((char(quote), take_while(|c| c != quote), char(quote))))(input)
}

/// User-defined function bodies keyed by flattened name.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionSpec>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load bodies from a JSON object of `name -> {"body": ...}`.
    pub fn load_from_json(&mut self, json: &str) -> TranspileResult<()> {
        let parsed: HashMap<String, FunctionSpec> = serde_json::from_str(json)?;
        self.functions.extend(parsed);
        Ok(())
    }

    pub fn register(&mut self, name: impl Into<String>, spec: FunctionSpec) {
        self.functions.insert(name.into(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StructFieldType;

    #[test]
    fn test_mangle_builtin() {
        assert_eq!(
            mangle("bqlite", FunctionCatalog::Aggregate, "sum", &ResolvedType::Int64),
            "bqlite_sum_int64"
        );
        assert_eq!(
            mangle("bqlite", FunctionCatalog::Window, "sum", &ResolvedType::Double),
            "bqlite_window_sum_double"
        );
    }

    #[test]
    fn test_mangle_struct_family() {
        let point = ResolvedType::Struct(vec![
            StructFieldType { name: "x".to_string(), field_type: ResolvedType::Int64 },
            StructFieldType { name: "y".to_string(), field_type: ResolvedType::Int64 },
        ]);
        let int = mangle("bqlite", FunctionCatalog::Scalar, "sum", &ResolvedType::Int64);
        let record = mangle("bqlite", FunctionCatalog::Scalar, "sum", &point);
        assert_ne!(int, record);
        assert_eq!(record, "bqlite_sum_struct");
        assert_eq!(
            mangle("bqlite", FunctionCatalog::Scalar, "sum", &ResolvedType::Struct(vec![])),
            record
        );
    }

    #[test]
    fn test_builtin_name() {
        assert_eq!(builtin_name(&FunctionRef::new("$add"), FunctionCatalog::Scalar), Some("add"));
        assert_eq!(
            builtin_name(&FunctionRef::new("concat"), FunctionCatalog::Scalar),
            Some("concat")
        );
        assert_eq!(builtin_name(&FunctionRef::new("rank"), FunctionCatalog::Scalar), None);
        assert_eq!(builtin_name(&FunctionRef::new("rank"), FunctionCatalog::Window), Some("rank"));
        assert_eq!(builtin_name(&FunctionRef::new("my_udf"), FunctionCatalog::Aggregate), None);
    }

    #[test]
    fn test_inline_body() {
        let spec = FunctionSpec::new("? + ?");
        let sql = spec.inline("add", &["1".to_string(), "2".to_string()]).unwrap();
        assert_eq!(sql, "( 1 + 2 )");
    }

    #[test]
    fn test_inline_ignores_quoted_marker() {
        let spec = FunctionSpec::new("CASE WHEN ? THEN 'yes?' ELSE `a?` END");
        assert!(spec.inline("f", &[]).is_err());
        let sql = spec.inline("f", &["`flag`".to_string()]).unwrap();
        assert_eq!(sql, "( CASE WHEN `flag` THEN 'yes?' ELSE `a?` END )");
    }

    #[test]
    fn test_inline_arity_mismatch() {
        let spec = FunctionSpec::new("? * 2");
        let err = spec
            .inline("double_it", &["1".to_string(), "2".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            TranspileError::ArityMismatch { placeholders: 1, arguments: 2, .. }
        ));
        assert!(spec.inline("double_it", &[]).is_err());
    }

    #[test]
    fn test_unterminated_quote() {
        let spec = FunctionSpec::new("'abc");
        assert!(matches!(
            spec.inline("f", &[]),
            Err(TranspileError::MalformedFunctionBody { .. })
        ));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(FunctionSpec::new("").inline("f", &[]).unwrap(), "(  )");
    }

    #[test]
    fn test_registry_from_json() {
        let mut registry = FunctionRegistry::new();
        registry
            .load_from_json(r#"{"proj_ds_add": {"body": "? + ?"}}"#)
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("proj_ds_add").unwrap().body, "? + ?");
        assert!(registry.get("add").is_none());
    }
}
