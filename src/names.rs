//! Name-path resolution.
//!
//! The target schema has no multi-segment identifiers, so a catalog path such
//! as `project.dataset.table` is flattened into `project_dataset_table`.

use tracing::trace;

use crate::ast::NamePath;
use crate::error::{TranspileError, TranspileResult};

/// Merge the statement's declared path with a reference's resolved path.
///
/// Segments of `declared` are kept up to (not including) the first one equal
/// to `resolved[0]`, then `resolved` is appended. An empty `resolved` yields
/// `declared` unchanged.
pub fn merge_name_path(declared: &[String], resolved: &[String]) -> NamePath {
    let Some(first) = resolved.first() else {
        return declared.to_vec();
    };
    let mut merged: NamePath = declared
        .iter()
        .take_while(|segment| *segment != first)
        .cloned()
        .collect();
    merged.extend_from_slice(resolved);
    merged
}

/// Join path segments into one identifier.
pub fn format_name(path: &[String]) -> String {
    path.join("_")
}

/// Quote an identifier with backticks, doubling embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Cursor over the name paths of one statement.
///
/// The analyzer enumerates one path per table/function reference; each
/// reference the translator visits takes the next one.
#[derive(Debug)]
pub struct NamePathCursor {
    declared: NamePath,
    paths: Vec<NamePath>,
    index: usize,
}

impl NamePathCursor {
    pub fn new(declared: NamePath, paths: Vec<NamePath>) -> Self {
        Self {
            declared,
            paths,
            index: 0,
        }
    }

    /// Resolve the flattened name of the next reference and advance.
    pub fn next_name(&mut self) -> TranspileResult<String> {
        let path = self
            .paths
            .get(self.index)
            .ok_or(TranspileError::NamePathExhausted {
                index: self.index,
                available: self.paths.len(),
            })?;
        let name = format_name(&merge_name_path(&self.declared, path));
        trace!(index = self.index, name = %name, "resolved name path");
        self.index += 1;
        Ok(name)
    }

    /// Number of paths consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }

    /// Number of paths not consumed yet.
    pub fn remaining(&self) -> usize {
        self.paths.len() - self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> NamePath {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_empty_resolved() {
        let declared = path(&["proj", "ds"]);
        assert_eq!(merge_name_path(&declared, &[]), declared);
        assert!(merge_name_path(&[], &[]).is_empty());
    }

    #[test]
    fn test_merge_overlapping() {
        assert_eq!(
            merge_name_path(&path(&["a", "b", "c"]), &path(&["b", "c", "d"])),
            path(&["a", "b", "c", "d"])
        );
    }

    #[test]
    fn test_merge_disjoint() {
        assert_eq!(
            merge_name_path(&path(&["proj", "ds"]), &path(&["table"])),
            path(&["proj", "ds", "table"])
        );
    }

    #[test]
    fn test_merge_fully_qualified() {
        assert_eq!(
            merge_name_path(&path(&["proj", "ds"]), &path(&["proj", "other", "t"])),
            path(&["proj", "other", "t"])
        );
    }

    #[test]
    fn test_format_name() {
        assert_eq!(format_name(&path(&["a", "b", "c"])), "a_b_c");
        assert_eq!(format_name(&[]), "");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("id"), "`id`");
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_cursor_advances_once_per_reference() {
        let mut cursor = NamePathCursor::new(
            path(&["proj", "ds"]),
            vec![path(&["users"]), path(&["ds", "orders"])],
        );
        assert_eq!(cursor.next_name().unwrap(), "proj_ds_users");
        assert_eq!(cursor.next_name().unwrap(), "proj_ds_orders");
        assert_eq!(cursor.consumed(), 2);
        assert_eq!(cursor.remaining(), 0);
        assert!(matches!(
            cursor.next_name(),
            Err(TranspileError::NamePathExhausted { index: 2, available: 2 })
        ));
    }
}
