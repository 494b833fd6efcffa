//! Resolved statement tree consumed by the transpiler.
//!
//! The tree is produced by an external analyzer and is never mutated here.
//! Nodes serialize as `{"kind": "<snake_case kind>", "node": {...}}`.

pub mod expr;
pub mod operators;
pub mod scan;
pub mod stmt;
pub mod types;
pub mod unsupported;
pub mod values;

pub use expr::*;
pub use operators::*;
pub use scan::*;
pub use stmt::*;
pub use types::*;
pub use unsupported::UnsupportedKind;
pub use values::*;

use serde::{Deserialize, Serialize};

/// A node of the resolved tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "node", rename_all = "snake_case")]
pub enum Node {
    // Expressions
    Literal(Literal),
    Parameter(Parameter),
    ColumnRef(ColumnRef),
    ArgumentRef(ArgumentRef),
    FunctionCall(FunctionCall),
    AggregateFunctionCall(AggregateFunctionCall),
    AnalyticFunctionCall(AnalyticFunctionCall),
    GetStructField(GetStructField),
    SubqueryExpr(SubqueryExpr),
    DmlDefault,
    // Scans
    SingleRowScan,
    TableScan(TableScan),
    ArrayScan(ArrayScan),
    FilterScan(FilterScan),
    ProjectScan(ProjectScan),
    AggregateScan(AggregateScan),
    SetOperationScan(SetOperationScan),
    OrderByScan(OrderByScan),
    LimitOffsetScan(LimitOffsetScan),
    WithScan(WithScan),
    WithRefScan(WithRefScan),
    AnalyticScan(AnalyticScan),
    // Statements
    QueryStmt(QueryStmt),
    InsertStmt(InsertStmt),
    DeleteStmt(DeleteStmt),
    UpdateStmt(UpdateStmt),
    Unsupported(UnsupportedKind),
}

impl Node {
    /// Wire name of the node kind.
    pub fn kind(&self) -> String {
        let name = match self {
            Node::Literal(_) => "literal",
            Node::Parameter(_) => "parameter",
            Node::ColumnRef(_) => "column_ref",
            Node::ArgumentRef(_) => "argument_ref",
            Node::FunctionCall(_) => "function_call",
            Node::AggregateFunctionCall(_) => "aggregate_function_call",
            Node::AnalyticFunctionCall(_) => "analytic_function_call",
            Node::GetStructField(_) => "get_struct_field",
            Node::SubqueryExpr(_) => "subquery_expr",
            Node::DmlDefault => "dml_default",
            Node::SingleRowScan => "single_row_scan",
            Node::TableScan(_) => "table_scan",
            Node::ArrayScan(_) => "array_scan",
            Node::FilterScan(_) => "filter_scan",
            Node::ProjectScan(_) => "project_scan",
            Node::AggregateScan(_) => "aggregate_scan",
            Node::SetOperationScan(_) => "set_operation_scan",
            Node::OrderByScan(_) => "order_by_scan",
            Node::LimitOffsetScan(_) => "limit_offset_scan",
            Node::WithScan(_) => "with_scan",
            Node::WithRefScan(_) => "with_ref_scan",
            Node::AnalyticScan(_) => "analytic_scan",
            Node::QueryStmt(_) => "query_stmt",
            Node::InsertStmt(_) => "insert_stmt",
            Node::DeleteStmt(_) => "delete_stmt",
            Node::UpdateStmt(_) => "update_stmt",
            Node::Unsupported(kind) => return kind.to_string(),
        };
        name.to_string()
    }

    pub fn literal(value: impl Into<Value>, value_type: ResolvedType) -> Self {
        Node::Literal(Literal {
            value: value.into(),
            value_type,
        })
    }

    pub fn column(column: ResolvedColumn) -> Self {
        Node::ColumnRef(ColumnRef::new(column))
    }

    pub fn function(name: &str, arguments: Vec<Node>, result_type: ResolvedType) -> Self {
        Node::FunctionCall(FunctionCall {
            function: FunctionRef::new(name),
            arguments,
            result_type,
        })
    }

    pub fn table_scan(table_name: &str, column_list: Vec<ResolvedColumn>) -> Self {
        Node::TableScan(TableScan {
            table_name: table_name.to_string(),
            column_list,
        })
    }

    pub fn boxed(self) -> Box<Node> {
        Box::new(self)
    }
}
