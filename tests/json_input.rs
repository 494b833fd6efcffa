use bqlite::prelude::*;
use pretty_assertions::assert_eq;

const PROJECTED_UDF: &str = r#"{
    "declared_path": ["proj", "ds"],
    "name_paths": [["twice"], ["t"]],
    "statement": {
        "kind": "query_stmt",
        "node": {
            "query": {
                "kind": "project_scan",
                "node": {
                    "column_list": [
                        {"name": "a", "table_name": "t", "type": {"type": "int64"}},
                        {"name": "d", "type": {"type": "int64"}}
                    ],
                    "expr_list": [{
                        "column": {"name": "d", "type": {"type": "int64"}},
                        "expr": {
                            "kind": "function_call",
                            "node": {
                                "function": {"name": "twice"},
                                "arguments": [{
                                    "kind": "column_ref",
                                    "node": {"column": {"name": "b", "table_name": "t", "type": {"type": "int64"}}}
                                }],
                                "result_type": {"type": "int64"}
                            }
                        }
                    }],
                    "input_scan": {
                        "kind": "filter_scan",
                        "node": {
                            "input_scan": {"kind": "table_scan", "node": {"table_name": "t"}},
                            "filter_expr": {
                                "kind": "function_call",
                                "node": {
                                    "function": {"name": "$greater"},
                                    "arguments": [
                                        {"kind": "column_ref", "node": {"column": {"name": "a", "type": {"type": "int64"}}}},
                                        {"kind": "literal", "node": {"value": {"type": "int", "value": 1}, "type": {"type": "int64"}}}
                                    ],
                                    "result_type": {"type": "bool"}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}"#;

#[test]
fn test_json_statement_with_inlined_function() {
    let stmt: ResolvedStatement =
        serde_json::from_str(PROJECTED_UDF).expect("valid statement json");

    let mut functions = FunctionRegistry::new();
    functions
        .load_from_json(r#"{"proj_ds_twice": {"body": "? * 2"}}"#)
        .unwrap();
    let sql = Transpiler::new().with_functions(functions).transpile(&stmt).unwrap();

    assert_eq!(
        sql,
        "SELECT `a`,( `b` * 2 ) AS `d` FROM `proj_ds_t` WHERE bqlite_greater_bool(`a`,1)"
    );
}

#[test]
fn test_json_statement_without_function_body() {
    let sql = bqlite::transpile_json(PROJECTED_UDF).unwrap();
    assert_eq!(
        sql,
        "SELECT `a`,proj_ds_twice(`b`) AS `d` FROM `proj_ds_t` WHERE bqlite_greater_bool(`a`,1)"
    );
}

#[test]
fn test_json_unsupported_kind() {
    let json = r#"{
        "name_paths": [],
        "statement": {"kind": "query_stmt", "node": {"query": {"kind": "unsupported", "node": "join_scan"}}}
    }"#;
    let err = bqlite::transpile_json(json).unwrap_err();
    assert!(matches!(err, TranspileError::Unsupported(ref kind) if kind == "join_scan"));
}

#[test]
fn test_json_unknown_kind_is_rejected() {
    let json = r#"{"statement": {"kind": "teleport_scan"}}"#;
    let err = bqlite::transpile_json(json).unwrap_err();
    assert!(matches!(err, TranspileError::Json(_)));
}

#[test]
fn test_config_from_toml() {
    let config = TranspilerConfig::from_toml_str("function_prefix = \"zeta\"\n").unwrap();
    let stmt: ResolvedStatement = serde_json::from_str(PROJECTED_UDF).unwrap();
    let sql = Transpiler::new().with_config(config).transpile(&stmt).unwrap();
    assert!(sql.ends_with("WHERE zeta_greater_bool(`a`,1)"));
}
