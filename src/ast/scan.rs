use serde::{Deserialize, Serialize};

use super::expr::{ColumnRef, OrderByItem, ResolvedColumn};
use super::Node;

/// Scan over a physical table. Consumes one name path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableScan {
    pub table_name: String,
    #[serde(default)]
    pub column_list: Vec<ResolvedColumn>,
}

/// `UNNEST(array)` producing one row per element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayScan {
    /// Scan the array is joined to; not expressible in the target dialect.
    #[serde(default)]
    pub input_scan: Option<Box<Node>>,
    pub array_expr: Box<Node>,
    pub element_column: ResolvedColumn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterScan {
    pub input_scan: Box<Node>,
    pub filter_expr: Box<Node>,
}

/// Named expression computed by a projecting or aggregating scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedColumn {
    pub column: ResolvedColumn,
    pub expr: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectScan {
    pub column_list: Vec<ResolvedColumn>,
    #[serde(default)]
    pub expr_list: Vec<ComputedColumn>,
    pub input_scan: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScan {
    #[serde(default)]
    pub column_list: Vec<ResolvedColumn>,
    pub input_scan: Box<Node>,
    #[serde(default)]
    pub group_by_list: Vec<ComputedColumn>,
    #[serde(default)]
    pub aggregate_list: Vec<ComputedColumn>,
}

/// One branch of a set operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperationItem {
    pub scan: Box<Node>,
    #[serde(default)]
    pub output_column_list: Vec<ResolvedColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperationScan {
    /// Analyzer set operation code.
    pub op_type: i32,
    pub input_item_list: Vec<SetOperationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByScan {
    pub input_scan: Box<Node>,
    pub order_by_item_list: Vec<OrderByItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOffsetScan {
    pub input_scan: Box<Node>,
    pub limit: Box<Node>,
    #[serde(default)]
    pub offset: Option<Box<Node>>,
}

/// Named subquery of a `WITH` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithEntry {
    pub with_query_name: String,
    pub with_subquery: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithScan {
    pub with_entry_list: Vec<WithEntry>,
    pub query: Box<Node>,
    #[serde(default)]
    pub recursive: bool,
}

/// Reference to a `WITH` entry by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithRefScan {
    pub with_query_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPartitioning {
    pub partition_by_list: Vec<ColumnRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowOrdering {
    pub order_by_item_list: Vec<OrderByItem>,
}

/// Analytic calls sharing one `PARTITION BY` / `ORDER BY` specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticFunctionGroup {
    #[serde(default)]
    pub partition_by: Option<WindowPartitioning>,
    #[serde(default)]
    pub order_by: Option<WindowOrdering>,
    /// Each entry's expression is an analytic function call.
    pub analytic_function_list: Vec<ComputedColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticScan {
    #[serde(default)]
    pub column_list: Vec<ResolvedColumn>,
    pub input_scan: Box<Node>,
    pub function_group_list: Vec<AnalyticFunctionGroup>,
}
