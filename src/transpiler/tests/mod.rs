//! Transpiler tests.

mod analytic;

use crate::ast::*;
use crate::transpiler::Transpiler;

pub(super) fn col(table: &str, name: &str) -> ResolvedColumn {
    ResolvedColumn::new(table, name, ResolvedType::Int64)
}

pub(super) fn column_ref(table: &str, name: &str) -> Node {
    Node::column(col(table, name))
}

pub(super) fn int(n: i64) -> Node {
    Node::literal(n, ResolvedType::Int64)
}

pub(super) fn computed(name: &str, expr: Node) -> ComputedColumn {
    ComputedColumn {
        column: col("", name),
        expr: expr.boxed(),
    }
}

pub(super) fn project(columns: &[&str], exprs: Vec<ComputedColumn>, input: Node) -> Node {
    Node::ProjectScan(ProjectScan {
        column_list: columns.iter().map(|name| col("", name)).collect(),
        expr_list: exprs,
        input_scan: input.boxed(),
    })
}

pub(super) fn query(scan: Node) -> Node {
    Node::QueryStmt(QueryStmt {
        output_column_list: Vec::new(),
        query: scan.boxed(),
    })
}

/// Statement declared under `proj.ds`.
pub(super) fn statement(node: Node) -> ResolvedStatement {
    ResolvedStatement::new(node).with_declared_path(["proj", "ds"])
}

pub(super) fn transpile(stmt: &ResolvedStatement) -> String {
    Transpiler::new().transpile(stmt).unwrap()
}
