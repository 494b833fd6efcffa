use serde::{Deserialize, Serialize};

use super::expr::{ColumnRef, ResolvedColumn};
use super::Node;

/// Catalog-namespace segments identifying a table, function or statement target.
pub type NamePath = Vec<String>;

/// A resolved statement as handed over by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStatement {
    /// Catalog prefix the statement runs in (e.g. `["project", "dataset"]`).
    #[serde(default)]
    pub declared_path: NamePath,
    /// One entry per table/function reference, in the order the translator visits them.
    #[serde(default)]
    pub name_paths: Vec<NamePath>,
    pub statement: Node,
}

impl ResolvedStatement {
    pub fn new(statement: Node) -> Self {
        Self {
            declared_path: Vec::new(),
            name_paths: Vec::new(),
            statement,
        }
    }

    pub fn with_declared_path<S: Into<String>>(
        mut self,
        path: impl IntoIterator<Item = S>,
    ) -> Self {
        self.declared_path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Append the name path of the next table/function reference.
    pub fn with_name_path<S: Into<String>>(
        mut self,
        path: impl IntoIterator<Item = S>,
    ) -> Self {
        self.name_paths.push(path.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryStmt {
    #[serde(default)]
    pub output_column_list: Vec<ResolvedColumn>,
    pub query: Box<Node>,
}

/// Wrapper of a value inside a DML row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmlValue {
    pub value: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertRow {
    pub value_list: Vec<DmlValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStmt {
    pub table_name: String,
    pub insert_column_list: Vec<ResolvedColumn>,
    #[serde(default)]
    pub row_list: Vec<InsertRow>,
    /// Source query of `INSERT ... SELECT`.
    #[serde(default)]
    pub query: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStmt {
    pub table_name: String,
    #[serde(default)]
    pub where_expr: Option<Box<Node>>,
}

/// `target = value` assignment of an UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub target: ColumnRef,
    pub set_value: DmlValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStmt {
    pub table_name: String,
    pub update_item_list: Vec<UpdateItem>,
    #[serde(default)]
    pub where_expr: Option<Box<Node>>,
}
