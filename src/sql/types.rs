//! Column type normalization and compatibility.

/// Broad type families used to decide whether two columns can reference one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Integer,
    String,
    Decimal,
    DateTime,
    Uuid,
}

/// Strip any precision suffix and lower-case: `VARCHAR(100)` -> `varchar`.
pub fn normalize_type(sql_type: &str) -> String {
    let lower = sql_type.to_lowercase();
    lower.split('(').next().unwrap_or(&lower).trim().to_string()
}

/// Family of an already normalized type.
pub fn type_family(base: &str) -> Option<TypeFamily> {
    match base {
        "int" | "integer" | "bigint" | "smallint" | "serial" | "bigserial" | "tinyint"
        | "mediumint" => Some(TypeFamily::Integer),
        "varchar" | "char" | "text" | "nvarchar" | "nchar" => Some(TypeFamily::String),
        "decimal" | "numeric" | "float" | "double" | "real" | "money" => {
            Some(TypeFamily::Decimal)
        }
        "date" | "datetime" | "timestamp" | "time" => Some(TypeFamily::DateTime),
        "uuid" | "uniqueidentifier" => Some(TypeFamily::Uuid),
        _ => None,
    }
}

/// Same family, or identical after normalization. Unknown types only match themselves.
pub fn types_compatible(a: &str, b: &str) -> bool {
    let (a, b) = (normalize_type(a), normalize_type(b));
    if a == b {
        return true;
    }
    matches!((type_family(&a), type_family(&b)), (Some(x), Some(y)) if x == y)
}
