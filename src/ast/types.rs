use serde::{Deserialize, Serialize};

/// Declared type of a resolved expression or column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum ResolvedType {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    Float,
    Double,
    String,
    Bytes,
    Date,
    Timestamp,
    Time,
    Datetime,
    Interval,
    Geography,
    Numeric,
    BigNumeric,
    Json,
    Enum,
    Proto,
    Array(Box<ResolvedType>),
    Struct(Vec<StructFieldType>),
}

/// One field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructFieldType {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: ResolvedType,
}

impl ResolvedType {
    /// Name family used when mangling function names.
    ///
    /// Struct types collapse to `struct` regardless of their fields, and array
    /// types to `array`, so each function has one entry point per family.
    pub fn family(&self) -> &'static str {
        match self {
            ResolvedType::Int32 => "int32",
            ResolvedType::Int64 => "int64",
            ResolvedType::Uint32 => "uint32",
            ResolvedType::Uint64 => "uint64",
            ResolvedType::Bool => "bool",
            ResolvedType::Float => "float",
            ResolvedType::Double => "double",
            ResolvedType::String => "string",
            ResolvedType::Bytes => "bytes",
            ResolvedType::Date => "date",
            ResolvedType::Timestamp => "timestamp",
            ResolvedType::Time => "time",
            ResolvedType::Datetime => "datetime",
            ResolvedType::Interval => "interval",
            ResolvedType::Geography => "geography",
            ResolvedType::Numeric => "numeric",
            ResolvedType::BigNumeric => "bignumeric",
            ResolvedType::Json => "json",
            ResolvedType::Enum => "enum",
            ResolvedType::Proto => "proto",
            ResolvedType::Array(_) => "array",
            ResolvedType::Struct(_) => "struct",
        }
    }
}

impl std::fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedType::Array(elem) => write!(f, "ARRAY<{}>", elem),
            ResolvedType::Struct(fields) => {
                write!(f, "STRUCT<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if field.name.is_empty() {
                        write!(f, "{}", field.field_type)?;
                    } else {
                        write!(f, "{} {}", field.name, field.field_type)?;
                    }
                }
                write!(f, ">")
            }
            other => write!(f, "{}", other.family().to_uppercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_family_ignores_layout() {
        let a = ResolvedType::Struct(vec![StructFieldType {
            name: "x".to_string(),
            field_type: ResolvedType::Int64,
        }]);
        let b = ResolvedType::Struct(vec![]);
        assert_eq!(a.family(), "struct");
        assert_eq!(a.family(), b.family());
    }

    #[test]
    fn test_display() {
        let t = ResolvedType::Array(Box::new(ResolvedType::Struct(vec![StructFieldType {
            name: "id".to_string(),
            field_type: ResolvedType::Int64,
        }])));
        assert_eq!(t.to_string(), "ARRAY<STRUCT<id INT64>>");
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"type":"array","of":{"type":"string"}}"#;
        let t: ResolvedType = serde_json::from_str(json).unwrap();
        assert_eq!(t, ResolvedType::Array(Box::new(ResolvedType::String)));
    }
}
