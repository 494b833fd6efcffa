//! Error types for bqlite.

use thiserror::Error;

/// The main error type for translation and its surrounding tooling.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// The node kind cannot be expressed in the target dialect.
    #[error("Unsupported node: {0}")]
    Unsupported(String),

    /// Set operation code not known to this translator.
    #[error("Unknown set operation type: {0}")]
    UnknownSetOperation(i32),

    /// Window frame boundary code not known to this translator.
    #[error("Unknown window boundary type: {0}")]
    UnknownBoundaryType(i32),

    /// Window frame unit code not known to this translator.
    #[error("Unknown window frame unit: {0}")]
    UnknownFrameUnit(i32),

    /// More table/function references were visited than name paths supplied.
    #[error("Name path cursor exhausted: reference #{index} requested but only {available} name paths supplied")]
    NamePathExhausted { index: usize, available: usize },

    /// Analytic function call outside of an analytic scan.
    #[error("Analytic function call has no correlation table (not inside an analytic scan?)")]
    MissingAnalyticScope,

    /// Inline function body placeholders do not line up with the call arguments.
    #[error("Function '{function}' expects {placeholders} argument(s) but was called with {arguments}")]
    ArityMismatch {
        function: String,
        placeholders: usize,
        arguments: usize,
    },

    /// Function body template could not be scanned.
    #[error("Malformed body for function '{function}' near: {near}")]
    MalformedFunctionBody { function: String, near: String },

    /// The resolved tree breaks an assumption the analyzer is expected to uphold.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// A literal value could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Translation was cancelled before it started.
    #[error("Translation cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON input error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranspileError {
    /// Create an unsupported-kind error.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported(kind.into())
    }

    /// Create a contract violation error.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }
}

/// Result type alias for bqlite operations.
pub type TranspileResult<T> = Result<T, TranspileError>;
