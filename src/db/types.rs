//! PostgreSQL value to JSON conversion.
//!
//! Raw SQL runs over the simple query protocol, so values arrive in text
//! format. Conversion is two-phase:
//! 1. `TypeCategory` classifies the column's PostgreSQL type name
//! 2. a per-category decoder extracts the value
//!
//! One-dimensional arrays become JSON arrays whose elements follow the same
//! rules. Anything without a dedicated category is returned as the server's
//! text representation (dates, UUIDs, ranges, enums, multi-dimensional
//! arrays, ...).

use crate::error::DbResult;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgHasArrayType, PgRow, PgTypeInfo, PgValueRef};
use sqlx::{Column, Decode, Postgres, Row, Type, TypeInfo, ValueRef};

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for PostgreSQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Boolean,
    Json,
    Binary,
    Array,
    Text,
}

/// Element type name of an array type, if `type_name` names one.
///
/// Built-in arrays are reported as `INT4[]`; arrays of types the driver
/// looked up by OID keep the catalog spelling `_int4`.
pub fn array_element_type(type_name: &str) -> Option<&str> {
    type_name
        .strip_suffix("[]")
        .or_else(|| type_name.strip_prefix('_'))
        .filter(|element| !element.is_empty())
}

/// Classify a PostgreSQL type name (as reported by the driver) into a category.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    if array_element_type(type_name).is_some() {
        return TypeCategory::Array;
    }
    match type_name.to_ascii_uppercase().as_str() {
        "INT2" | "INT4" | "INT8" | "OID" => TypeCategory::Integer,
        "FLOAT4" | "FLOAT8" => TypeCategory::Float,
        "NUMERIC" => TypeCategory::Decimal,
        "BOOL" => TypeCategory::Boolean,
        "JSON" | "JSONB" => TypeCategory::Json,
        "BYTEA" => TypeCategory::Binary,
        _ => TypeCategory::Text,
    }
}

// =============================================================================
// Raw Text Support
// =============================================================================

/// Wrapper that accepts any column type and yields its raw text form.
#[derive(Debug)]
pub struct RawText(pub String);

impl Type<Postgres> for RawText {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}

impl<'r> Decode<'r, Postgres> for RawText {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<Postgres>>::decode(value)?;
        Ok(RawText(s.to_string()))
    }
}

impl PgHasArrayType for RawText {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_text")
    }

    fn array_compatible(ty: &PgTypeInfo) -> bool {
        array_element_type(ty.name()).is_some()
    }
}

/// Convert the text form of a NUMERIC into a JSON number.
///
/// Whole values become integers, values with a fractional part become
/// floats. Whole values too large for 64 bits stay strings so no digits are
/// lost, as do `NaN` and the infinities.
pub fn decimal_to_json(raw: &str) -> JsonValue {
    let trimmed = raw.trim();
    if !trimmed.contains(['.', 'e', 'E']) {
        if let Ok(v) = trimmed.parse::<i64>() {
            return JsonValue::Number(v.into());
        }
        if let Ok(v) = trimmed.parse::<u64>() {
            return JsonValue::Number(v.into());
        }
        if is_integer_literal(trimmed) {
            return JsonValue::String(trimmed.to_string());
        }
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(trimmed.to_string()))
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn float_to_json(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string()))
}

/// FLOAT4 goes through its shortest decimal form so `0.1` stays `0.1`
/// instead of the widened `0.10000000149011612`.
fn float4_to_json(v: f32) -> JsonValue {
    if !v.is_finite() {
        return JsonValue::String(v.to_string());
    }
    v.to_string()
        .parse::<f64>()
        .map(float_to_json)
        .unwrap_or_else(|_| JsonValue::String(v.to_string()))
}

/// Decode the server's `\x...` hex form of a BYTEA value.
fn decode_bytea_hex(raw: &str) -> Option<Vec<u8>> {
    let hex = raw.strip_prefix("\\x")?;
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}

/// Convert one array element from its text form.
fn element_to_json(category: TypeCategory, raw: &str) -> JsonValue {
    match category {
        TypeCategory::Integer | TypeCategory::Decimal => decimal_to_json(raw),
        TypeCategory::Float => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => float_to_json(v),
            _ => JsonValue::String(raw.to_string()),
        },
        TypeCategory::Boolean => match raw {
            "t" => JsonValue::Bool(true),
            "f" => JsonValue::Bool(false),
            other => JsonValue::String(other.to_string()),
        },
        TypeCategory::Json => {
            serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()))
        }
        TypeCategory::Binary => match decode_bytea_hex(raw) {
            Some(bytes) => encode_binary(&bytes),
            None => JsonValue::String(raw.to_string()),
        },
        TypeCategory::Array | TypeCategory::Text => JsonValue::String(raw.to_string()),
    }
}

/// Binary data is returned base64 encoded.
pub fn encode_binary(bytes: &[u8]) -> JsonValue {
    JsonValue::String(STANDARD.encode(bytes))
}

// =============================================================================
// Row to JSON Trait
// =============================================================================

/// Trait for converting database rows to JSON maps.
pub trait RowToJson {
    fn column_names(&self) -> Vec<String>;
    fn to_json_map(&self) -> DbResult<serde_json::Map<String, JsonValue>>;
}

impl RowToJson for PgRow {
    fn column_names(&self) -> Vec<String> {
        self.columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect()
    }

    fn to_json_map(&self) -> DbResult<serde_json::Map<String, JsonValue>> {
        let mut map = serde_json::Map::with_capacity(self.len());
        for (idx, col) in self.columns().iter().enumerate() {
            let value = decode_column(self, idx, col.type_info().name())?;
            map.insert(col.name().to_string(), value);
        }
        Ok(map)
    }
}

fn decode_column(row: &PgRow, idx: usize, type_name: &str) -> DbResult<JsonValue> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(JsonValue::Null);
    }

    let value = match categorize_type(type_name) {
        TypeCategory::Integer => decode_integer(row, idx)?,
        TypeCategory::Float => decode_float(row, idx)?,
        TypeCategory::Decimal => decimal_to_json(&row.try_get::<RawText, _>(idx)?.0),
        TypeCategory::Boolean => JsonValue::Bool(row.try_get::<bool, _>(idx)?),
        TypeCategory::Json => row.try_get::<JsonValue, _>(idx)?,
        TypeCategory::Binary => encode_binary(&row.try_get::<Vec<u8>, _>(idx)?),
        TypeCategory::Array => decode_array(row, idx, type_name)?,
        TypeCategory::Text => JsonValue::String(row.try_get::<RawText, _>(idx)?.0),
    };
    Ok(value)
}

fn decode_integer(row: &PgRow, idx: usize) -> DbResult<JsonValue> {
    if let Ok(v) = row.try_get::<i16, _>(idx) {
        return Ok(JsonValue::Number(v.into()));
    }
    if let Ok(v) = row.try_get::<i32, _>(idx) {
        return Ok(JsonValue::Number(v.into()));
    }
    if let Ok(v) = row.try_get::<i64, _>(idx) {
        return Ok(JsonValue::Number(v.into()));
    }
    // OID and anything else integral
    let raw = row.try_get::<RawText, _>(idx)?.0;
    Ok(decimal_to_json(&raw))
}

fn decode_float(row: &PgRow, idx: usize) -> DbResult<JsonValue> {
    if let Ok(v) = row.try_get::<f64, _>(idx) {
        return Ok(float_to_json(v));
    }
    let v = row.try_get::<f32, _>(idx)?;
    Ok(float4_to_json(v))
}

fn decode_array(row: &PgRow, idx: usize, type_name: &str) -> DbResult<JsonValue> {
    let raw = row.try_get::<RawText, _>(idx)?.0;
    // Multi-dimensional arrays and explicit bounds (`[0:1]={..}`) stay text
    if !raw.starts_with('{') || raw.starts_with("{{") {
        return Ok(JsonValue::String(raw));
    }
    if raw == "{}" {
        return Ok(JsonValue::Array(Vec::new()));
    }

    let category = array_element_type(type_name)
        .map(categorize_type)
        .unwrap_or(TypeCategory::Text);
    let elements = row.try_get::<Vec<Option<RawText>>, _>(idx)?;
    Ok(JsonValue::Array(
        elements
            .into_iter()
            .map(|element| match element {
                Some(RawText(text)) => element_to_json(category, &text),
                None => JsonValue::Null,
            })
            .collect(),
    ))
}
