//! Window function emulation tests.

use pretty_assertions::assert_eq;

use super::*;
use crate::config::TranspilerConfig;
use crate::error::TranspileError;

fn window_call(name: &str, arguments: Vec<Node>) -> AnalyticFunctionCall {
    AnalyticFunctionCall {
        function: FunctionRef::new(name),
        arguments,
        result_type: ResolvedType::Int64,
        distinct: false,
        window_frame: None,
    }
}

fn partition_by(columns: &[&str]) -> Option<WindowPartitioning> {
    Some(WindowPartitioning {
        partition_by_list: columns.iter().map(|name| ColumnRef::new(col("t", name))).collect(),
    })
}

fn order_by(name: &str, is_descending: bool) -> Option<WindowOrdering> {
    Some(WindowOrdering {
        order_by_item_list: vec![OrderByItem {
            column_ref: ColumnRef::new(col("t", name)),
            is_descending,
        }],
    })
}

fn group(
    partition_by: Option<WindowPartitioning>,
    order_by: Option<WindowOrdering>,
    calls: Vec<(&str, AnalyticFunctionCall)>,
) -> AnalyticFunctionGroup {
    AnalyticFunctionGroup {
        partition_by,
        order_by,
        analytic_function_list: calls
            .into_iter()
            .map(|(name, call)| computed(name, Node::AnalyticFunctionCall(call)))
            .collect(),
    }
}

fn analytic_query(columns: &[&str], groups: Vec<AnalyticFunctionGroup>) -> ResolvedStatement {
    let scan = Node::AnalyticScan(AnalyticScan {
        column_list: columns.iter().map(|name| col("", name)).collect(),
        input_scan: Node::table_scan("t", vec![col("t", "a"), col("t", "b")]).boxed(),
        function_group_list: groups,
    });
    statement(query(project(columns, vec![], scan))).with_name_path(["t"])
}

#[test]
fn test_partitioned_sum() {
    let stmt = analytic_query(
        &["a", "s"],
        vec![group(
            partition_by(&["a"]),
            None,
            vec![("s", window_call("sum", vec![column_ref("t", "b")]))],
        )],
    );
    assert_eq!(
        transpile(&stmt),
        "SELECT `a`,( SELECT bqlite_window_sum_int64(`b`,bqlite_window_partition_string(`a`),\
         bqlite_window_rowid_string(`rowid`)) FROM `t` ) AS `s` \
         FROM ( SELECT *, ROW_NUMBER() OVER() AS `rowid` FROM `proj_ds_t` ) ORDER BY `a`,`b`"
    );
}

#[test]
fn test_option_order_with_frame() {
    let mut call = window_call("count", vec![column_ref("t", "b")]);
    call.distinct = true;
    call.window_frame = Some(WindowFrame {
        frame_unit: FrameUnit::Rows.code(),
        start: Some(WindowFrameExpr {
            boundary_type: BoundaryType::OffsetPreceding.code(),
            expression: Some(int(2).boxed()),
        }),
        end: Some(WindowFrameExpr {
            boundary_type: BoundaryType::CurrentRow.code(),
            expression: None,
        }),
    });
    let stmt = analytic_query(&["c"], vec![group(None, order_by("a", true), vec![("c", call)])]);
    assert_eq!(
        transpile(&stmt),
        "SELECT ( SELECT bqlite_window_count_int64(`b`,bqlite_distinct_string(),\
         bqlite_window_order_by_string(`a`, false),bqlite_window_frame_unit_string(0),\
         bqlite_window_boundary_start_string(1, 2),bqlite_window_boundary_end_string(2, 0),\
         bqlite_window_rowid_string(`rowid`)) FROM `t` ) AS `c` \
         FROM ( SELECT *, ROW_NUMBER() OVER() AS `rowid` FROM `proj_ds_t` ) ORDER BY `a`,`b`"
    );
}

#[test]
fn test_groups_reset_partition_and_order() {
    let stmt = analytic_query(
        &["s", "r"],
        vec![
            group(
                partition_by(&["a"]),
                None,
                vec![("s", window_call("sum", vec![column_ref("t", "b")]))],
            ),
            group(None, order_by("c", false), vec![("r", window_call("rank", vec![]))]),
        ],
    );
    assert_eq!(
        transpile(&stmt),
        "SELECT ( SELECT bqlite_window_sum_int64(`b`,bqlite_window_partition_string(`a`),\
         bqlite_window_rowid_string(`rowid`)) FROM `t` ) AS `s`,\
         ( SELECT bqlite_window_rank_int64(bqlite_window_order_by_string(`c`, true),\
         bqlite_window_rowid_string(`rowid`)) FROM `t` ) AS `r` \
         FROM ( SELECT *, ROW_NUMBER() OVER() AS `rowid` FROM `proj_ds_t` ) ORDER BY `a`,`b`,`c`"
    );
}

#[test]
fn test_literal_arguments_stay_out_of_order_by() {
    let call = window_call("lag", vec![column_ref("t", "b"), int(1)]);
    let stmt = analytic_query(&["l"], vec![group(partition_by(&["a"]), None, vec![("l", call)])]);
    let sql = transpile(&stmt);
    assert!(sql.starts_with("SELECT ( SELECT bqlite_window_lag_int64(`b`,1,"));
    assert!(sql.ends_with("ORDER BY `a`,`b`"));
}

#[test]
fn test_expression_arguments_join_order_by() {
    let expr = Node::function("$add", vec![column_ref("t", "b"), int(1)], ResolvedType::Int64);
    let call = window_call("sum", vec![expr]);
    let stmt = analytic_query(&["s"], vec![group(partition_by(&["a"]), None, vec![("s", call)])]);
    assert_eq!(
        transpile(&stmt),
        "SELECT ( SELECT bqlite_window_sum_int64(bqlite_add_int64(`b`,1),\
         bqlite_window_partition_string(`a`),bqlite_window_rowid_string(`rowid`)) \
         FROM `t` ) AS `s` \
         FROM ( SELECT *, ROW_NUMBER() OVER() AS `rowid` FROM `proj_ds_t` ) \
         ORDER BY `a`,bqlite_add_int64(`b`,1)"
    );
}

#[test]
fn test_scan_without_functions_omits_order_by() {
    let stmt = analytic_query(&["a"], vec![]);
    assert_eq!(
        transpile(&stmt),
        "SELECT `a` FROM ( SELECT *, ROW_NUMBER() OVER() AS `rowid` FROM `proj_ds_t` )"
    );
}

#[test]
fn test_custom_row_id_column() {
    let config = TranspilerConfig {
        row_id_column: "rn".to_string(),
        ..Default::default()
    };
    let stmt = analytic_query(
        &["s"],
        vec![group(
            partition_by(&["a"]),
            None,
            vec![("s", window_call("sum", vec![column_ref("t", "b")]))],
        )],
    );
    let sql = Transpiler::new().with_config(config).transpile(&stmt).unwrap();
    assert!(sql.contains("bqlite_window_rowid_string(`rn`)"));
    assert!(sql.contains("ROW_NUMBER() OVER() AS `rn`"));
}

#[test]
fn test_call_outside_analytic_scan() {
    let call = Node::AnalyticFunctionCall(window_call("sum", vec![column_ref("t", "b")]));
    let stmt = statement(query(project(
        &["s"],
        vec![computed("s", call)],
        Node::table_scan("t", vec![]),
    )))
    .with_name_path(["t"]);
    let err = Transpiler::new().transpile(&stmt).unwrap_err();
    assert!(matches!(err, TranspileError::MissingAnalyticScope));
}

#[test]
fn test_call_without_correlation_table() {
    let calls = vec![("n", window_call("row_number", vec![]))];
    let stmt = analytic_query(&["n"], vec![group(None, None, calls)]);
    let err = Transpiler::new().transpile(&stmt).unwrap_err();
    assert!(matches!(err, TranspileError::MissingAnalyticScope));
}

#[test]
fn test_unknown_boundary_type() {
    let mut call = window_call("sum", vec![column_ref("t", "b")]);
    call.window_frame = Some(WindowFrame {
        frame_unit: FrameUnit::Range.code(),
        start: Some(WindowFrameExpr {
            boundary_type: 7,
            expression: None,
        }),
        end: None,
    });
    let stmt = analytic_query(&["s"], vec![group(partition_by(&["a"]), None, vec![("s", call)])]);
    let err = Transpiler::new().transpile(&stmt).unwrap_err();
    assert!(matches!(err, TranspileError::UnknownBoundaryType(7)));
}

#[test]
fn test_unknown_frame_unit() {
    let mut call = window_call("sum", vec![column_ref("t", "b")]);
    call.window_frame = Some(WindowFrame {
        frame_unit: 5,
        start: None,
        end: None,
    });
    let stmt = analytic_query(&["s"], vec![group(partition_by(&["a"]), None, vec![("s", call)])]);
    let err = Transpiler::new().transpile(&stmt).unwrap_err();
    assert!(matches!(err, TranspileError::UnknownFrameUnit(5)));
}

#[test]
fn test_offset_boundary_requires_expression() {
    let mut call = window_call("sum", vec![column_ref("t", "b")]);
    call.window_frame = Some(WindowFrame {
        frame_unit: FrameUnit::Rows.code(),
        start: Some(WindowFrameExpr {
            boundary_type: BoundaryType::OffsetFollowing.code(),
            expression: None,
        }),
        end: None,
    });
    let stmt = analytic_query(&["s"], vec![group(partition_by(&["a"]), None, vec![("s", call)])]);
    let err = Transpiler::new().transpile(&stmt).unwrap_err();
    assert!(matches!(err, TranspileError::ContractViolation(_)));
}
