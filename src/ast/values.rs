use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A literal value in the analyzer's native representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    /// Arbitrary precision numbers travel as their decimal text.
    Numeric(String),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
    Array(Vec<Value>),
    Struct(Vec<StructValueField>),
}

/// Named member of a struct value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructValueField {
    #[serde(default)]
    pub name: String,
    pub value: Value,
}

impl Value {
    /// JSON form used for nested values (array elements and struct members).
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(n) => Json::from(*n),
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map(Json::Number)
                .unwrap_or_else(|| Json::String(d.to_string())),
            Value::Numeric(s) | Value::String(s) => Json::String(s.clone()),
            Value::Bytes(b) => Json::Array(b.iter().map(|x| Json::from(*x)).collect()),
            Value::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
            Value::Timestamp(ts) => Json::String(ts.to_rfc3339()),
            Value::Json(v) => v.clone(),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            // Positional, so field access by index survives the round trip.
            Value::Struct(fields) => {
                Json::Array(fields.iter().map(|field| field.value.to_json()).collect())
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
