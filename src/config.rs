//! Transpiler configuration.
//!
//! ```toml
//! function_prefix = "bqlite"
//! row_id_column = "rowid"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TranspileError, TranspileResult};

/// Naming knobs shared with the target engine's function catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspilerConfig {
    /// Prefix of every emulation function name.
    pub function_prefix: String,
    /// Synthetic row ordinal column added by analytic scans.
    pub row_id_column: String,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            function_prefix: "bqlite".to_string(),
            row_id_column: "rowid".to_string(),
        }
    }
}

impl TranspilerConfig {
    pub fn from_toml_str(s: &str) -> TranspileResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| TranspileError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> TranspileResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// `<config dir>/bqlite/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bqlite").join("config.toml"))
    }

    /// Load from [`Self::default_path`], falling back to defaults when absent.
    pub fn load_default() -> TranspileResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> TranspileResult<()> {
        let is_identifier =
            |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !is_identifier(&self.function_prefix) {
            return Err(TranspileError::Config(format!(
                "function_prefix '{}' must be a non-empty identifier",
                self.function_prefix
            )));
        }
        if self.row_id_column.is_empty() {
            return Err(TranspileError::Config("row_id_column must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranspilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, TranspilerConfig::default());
        assert_eq!(config.function_prefix, "bqlite");
    }

    #[test]
    fn test_partial_override() {
        let config = TranspilerConfig::from_toml_str("function_prefix = \"emu\"").unwrap();
        assert_eq!(config.function_prefix, "emu");
        assert_eq!(config.row_id_column, "rowid");
    }

    #[test]
    fn test_invalid_prefix() {
        let err = TranspilerConfig::from_toml_str("function_prefix = \"a-b\"").unwrap_err();
        assert!(matches!(err, TranspileError::Config(_)));
    }
}
