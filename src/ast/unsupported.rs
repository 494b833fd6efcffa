use serde::{Deserialize, Serialize};

/// Analyzer node kinds the target dialect cannot express.
///
/// Translating any of these fails with [`crate::error::TranspileError::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedKind {
    // Expressions
    ExpressionColumn,
    Constant,
    SystemVariable,
    InlineLambda,
    FilterFieldArg,
    FilterField,
    ExtendedCastElement,
    ExtendedCast,
    Cast,
    MakeStruct,
    MakeProto,
    MakeProtoField,
    GetProtoField,
    GetJsonField,
    Flatten,
    FlattenedArg,
    ReplaceFieldItem,
    ReplaceField,
    LetExpr,
    Model,
    Connection,
    Descriptor,
    // Scans
    JoinScan,
    ColumnHolder,
    GroupingSet,
    AnonymizedAggregateScan,
    SampleScan,
    TvfScan,
    GroupRowsScan,
    RecursiveRefScan,
    RecursiveScan,
    RelationArgumentScan,
    PivotColumn,
    PivotScan,
    UnpivotArg,
    UnpivotScan,
    // Table definitions
    ColumnAnnotations,
    GeneratedColumnInfo,
    ColumnDefaultValue,
    ColumnDefinition,
    PrimaryKey,
    ForeignKey,
    CheckConstraint,
    #[serde(rename = "option")]
    OptionItem,
    IndexItem,
    UnnestItem,
    WithPartitionColumns,
    // Statements
    ExplainStmt,
    CreateDatabaseStmt,
    CreateIndexStmt,
    CreateSchemaStmt,
    CreateTableStmt,
    CreateTableAsSelectStmt,
    CreateModelStmt,
    CreateViewStmt,
    CreateMaterializedViewStmt,
    CreateSnapshotTableStmt,
    CreateExternalTableStmt,
    CreateFunctionStmt,
    CreateTableFunctionStmt,
    CreateProcedureStmt,
    CreateConstantStmt,
    CreateEntityStmt,
    CreateRowAccessPolicyStmt,
    CreatePrivilegeRestrictionStmt,
    ExportModelStmt,
    ExportDataStmt,
    DefineTableStmt,
    DescribeStmt,
    ShowStmt,
    BeginStmt,
    SetTransactionStmt,
    CommitStmt,
    RollbackStmt,
    StartBatchStmt,
    RunBatchStmt,
    AbortBatchStmt,
    DropStmt,
    DropMaterializedViewStmt,
    DropSnapshotTableStmt,
    DropFunctionStmt,
    DropTableFunctionStmt,
    DropRowAccessPolicyStmt,
    DropPrivilegeRestrictionStmt,
    DropSearchIndexStmt,
    AssertStmt,
    AssertRowsModified,
    UpdateArrayItem,
    MergeWhen,
    MergeStmt,
    TruncateStmt,
    ObjectUnit,
    Privilege,
    GrantStmt,
    RevokeStmt,
    AlterDatabaseStmt,
    AlterMaterializedViewStmt,
    AlterSchemaStmt,
    AlterTableStmt,
    AlterViewStmt,
    AlterTableSetOptionsStmt,
    AlterPrivilegeRestrictionStmt,
    AlterRowAccessPolicyStmt,
    AlterAllRowAccessPoliciesStmt,
    AlterEntityStmt,
    SetOptionsAction,
    AddColumnAction,
    AddConstraintAction,
    DropConstraintAction,
    DropPrimaryKeyAction,
    AlterColumnOptionsAction,
    AlterColumnDropNotNullAction,
    AlterColumnSetDataTypeAction,
    AlterColumnSetDefaultAction,
    AlterColumnDropDefaultAction,
    DropColumnAction,
    RenameColumnAction,
    SetAsAction,
    SetCollateClause,
    RenameStmt,
    GrantToAction,
    RestrictToAction,
    AddToRestricteeListAction,
    RemoveFromRestricteeListAction,
    FilterUsingAction,
    RevokeFromAction,
    RenameToAction,
    ArgumentDef,
    ArgumentList,
    FunctionSignatureHolder,
    FunctionArgument,
    CallStmt,
    ImportStmt,
    ModuleStmt,
    AggregateHavingModifier,
    ExecuteImmediateArgument,
    ExecuteImmediateStmt,
    AssignmentStmt,
    ReturningClause,
    CloneDataStmt,
    TableAndColumnInfo,
    AnalyzeStmt,
    AuxLoadDataStmt,
}

impl std::fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Reuse the serde spelling so errors name the kind the analyzer sent.
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(name)) => write!(f, "{}", name),
            _ => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_wire_name() {
        assert_eq!(UnsupportedKind::MergeStmt.to_string(), "merge_stmt");
        assert_eq!(UnsupportedKind::PivotScan.to_string(), "pivot_scan");
    }
}
