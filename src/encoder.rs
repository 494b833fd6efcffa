//! Literal encoding.
//!
//! The transpiler treats literal encoding as an opaque capability; any
//! [`ValueEncoder`] can be plugged into the [`crate::Transpiler`].

use crate::ast::{ResolvedType, Value};
use crate::error::{TranspileError, TranspileResult};

/// Encodes a literal value as target-dialect SQL text.
pub trait ValueEncoder: Send + Sync {
    fn encode(&self, value: &Value, value_type: &ResolvedType) -> TranspileResult<String>;
}

/// Default encoder producing SQLite literals.
///
/// Arrays and structs become quoted JSON text, which is what the
/// `decode_array` / `get_struct_field` emulation functions read.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteValueEncoder;

impl ValueEncoder for SqliteValueEncoder {
    fn encode(&self, value: &Value, value_type: &ResolvedType) -> TranspileResult<String> {
        let sql = match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Double(d) if d.is_nan() => quote_string("NaN"),
            Value::Double(d) if d.is_infinite() => {
                quote_string(if *d > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Double(d) => format_double(*d),
            Value::Numeric(s) => {
                if s.parse::<f64>().is_err() {
                    return Err(TranspileError::Encode(format!(
                        "invalid {} literal '{}'",
                        value_type, s
                    )));
                }
                quote_string(s)
            }
            Value::String(s) => quote_string(s),
            Value::Bytes(b) => {
                let hex: String = b.iter().map(|byte| format!("{:02X}", byte)).collect();
                format!("X'{}'", hex)
            }
            Value::Date(d) => quote_string(&d.format("%Y-%m-%d").to_string()),
            Value::Timestamp(ts) => quote_string(&ts.to_rfc3339()),
            Value::Json(v) => quote_string(&v.to_string()),
            Value::Array(_) | Value::Struct(_) => {
                let json = serde_json::to_string(&value.to_json())?;
                quote_string(&json)
            }
        };
        Ok(sql)
    }
}

fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Doubles keep a decimal point so SQLite treats them as REAL.
fn format_double(d: f64) -> String {
    let text = d.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{}.0", text)
    }
}
