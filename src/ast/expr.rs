use serde::{Deserialize, Serialize};

use super::operators::SubqueryType;
use super::types::ResolvedType;
use super::values::Value;
use super::Node;

/// A column produced by some scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    pub name: String,
    /// Name of the table (or alias) owning the column.
    #[serde(default)]
    pub table_name: String,
    #[serde(rename = "type")]
    pub column_type: ResolvedType,
}

impl ResolvedColumn {
    pub fn new(table_name: &str, name: &str, column_type: ResolvedType) -> Self {
        Self {
            name: name.to_string(),
            table_name: table_name.to_string(),
            column_type,
        }
    }
}

/// Literal constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Value,
    #[serde(rename = "type")]
    pub value_type: ResolvedType,
}

/// Query parameter, either named (`@name`) or positional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(rename = "type")]
    pub value_type: ResolvedType,
}

/// Reference to a column of an input scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub column: ResolvedColumn,
}

impl ColumnRef {
    pub fn new(column: ResolvedColumn) -> Self {
        Self { column }
    }
}

/// Reference to an argument inside a function body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRef {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ResolvedType,
}

/// Identity of a called function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRef {
    /// Full name as reported by the analyzer; private builtins start with `$`.
    pub name: String,
}

impl FunctionRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Scalar function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub function: FunctionRef,
    #[serde(default)]
    pub arguments: Vec<Node>,
    pub result_type: ResolvedType,
}

/// `ORDER BY` item of an aggregate call, order-by scan or window ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub column_ref: ColumnRef,
    #[serde(default)]
    pub is_descending: bool,
}

/// Aggregate function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateFunctionCall {
    pub function: FunctionRef,
    #[serde(default)]
    pub arguments: Vec<Node>,
    pub result_type: ResolvedType,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub order_by: Vec<OrderByItem>,
    #[serde(default)]
    pub limit: Option<Box<Node>>,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFrameExpr {
    /// Analyzer boundary code.
    pub boundary_type: i32,
    /// Offset, present for `OFFSET PRECEDING` / `OFFSET FOLLOWING`.
    #[serde(default)]
    pub expression: Option<Box<Node>>,
}

/// Window frame of an analytic call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFrame {
    /// Analyzer frame unit code.
    pub frame_unit: i32,
    #[serde(default)]
    pub start: Option<WindowFrameExpr>,
    #[serde(default)]
    pub end: Option<WindowFrameExpr>,
}

/// Analytic (window) function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticFunctionCall {
    pub function: FunctionRef,
    #[serde(default)]
    pub arguments: Vec<Node>,
    pub result_type: ResolvedType,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub window_frame: Option<WindowFrame>,
}

/// Positional access into a struct value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetStructField {
    pub expr: Box<Node>,
    pub field_idx: usize,
    #[serde(rename = "type")]
    pub field_type: ResolvedType,
}

/// Expression wrapping a subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubqueryExpr {
    #[serde(default)]
    pub subquery_type: SubqueryType,
    pub subquery: Box<Node>,
    #[serde(rename = "type")]
    pub value_type: ResolvedType,
}
