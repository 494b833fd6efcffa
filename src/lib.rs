//! # bqlite: BigQuery statements on SQLite
//!
//! Translates analyzed BigQuery statement trees into SQLite SQL. BigQuery
//! builtins become calls to mangled emulation functions
//! (`bqlite_<name>_<type family>`) that the executing engine registers, and
//! window functions are emulated with correlated subqueries.
//!
//! ## Quick Example
//!
//! ```
//! use bqlite::prelude::*;
//!
//! // SELECT a FROM proj.ds.t
//! let scan = Node::table_scan("t", vec![]);
//! let project = Node::ProjectScan(ProjectScan {
//!     column_list: vec![ResolvedColumn::new("t", "a", ResolvedType::Int64)],
//!     expr_list: vec![],
//!     input_scan: scan.boxed(),
//! });
//! let stmt = ResolvedStatement::new(project)
//!     .with_declared_path(["proj", "ds"])
//!     .with_name_path(["t"]);
//!
//! let sql = Transpiler::new().transpile(&stmt).unwrap();
//! assert_eq!(sql, "SELECT `a` FROM `proj_ds_t`");
//! ```
//!
//! ## Naming
//!
//! | Input                       | Output                          |
//! |-----------------------------|---------------------------------|
//! | table `proj.ds.t`           | `` `proj_ds_t` ``               |
//! | `$add` returning INT64      | `bqlite_add_int64(...)`         |
//! | `SUM(...) OVER (...)`       | `bqlite_window_sum_int64(...)`  |
//! | user function with a body   | inlined `( body )`              |

pub mod ast;
pub mod config;
pub mod context;
pub mod encoder;
pub mod error;
pub mod functions;
pub mod names;
pub mod transpiler;

pub use transpiler::Transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::TranspilerConfig;
    pub use crate::encoder::{SqliteValueEncoder, ValueEncoder};
    pub use crate::error::*;
    pub use crate::functions::{FunctionRegistry, FunctionSpec};
    pub use crate::transpiler::{ToSql, Transpiler};
}

/// Translate a JSON-encoded [`ast::ResolvedStatement`] with default settings.
///
/// # Example
///
/// ```
/// let json = r#"{
///     "declared_path": ["proj", "ds"],
///     "name_paths": [["t"]],
///     "statement": {"kind": "delete_stmt", "node": {"table_name": "t"}}
/// }"#;
/// assert_eq!(bqlite::transpile_json(json).unwrap(), "DELETE FROM `proj_ds_t`");
/// ```
pub fn transpile_json(input: &str) -> error::TranspileResult<String> {
    let stmt: ast::ResolvedStatement = serde_json::from_str(input)?;
    Transpiler::new().transpile(&stmt)
}
