//! Bridging between dynamic `serde_json` values and the sqlite engine
//!
//! `serde_json::Value` is the lingua franca for bound parameters and record
//! fields; this module adapts it to rusqlite's binding and row-decoding
//! traits.

use rusqlite::types::{ToSqlOutput, Value as SqliteValue, ValueRef};
use rusqlite::ToSql;
use serde_json::{Map, Value};

/// A mapped result row: column name to decoded value. Columns sharing a
/// name (e.g. two `id` columns under `SELECT *` with joins) collapse to the
/// later one.
pub type Row = Map<String, Value>;

/// Bound-parameter adapter for a dynamic value.
pub(crate) struct Param<'a>(pub &'a Value);

impl ToSql for Param<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self.0 {
            Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Value::Bool(b) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*b))),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ToSqlOutput::Owned(SqliteValue::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    ToSqlOutput::Owned(SqliteValue::Real(f))
                } else {
                    ToSqlOutput::Owned(SqliteValue::Text(n.to_string()))
                }
            }
            Value::String(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            // Arrays and objects bind as their JSON text
            other => ToSqlOutput::Owned(SqliteValue::Text(other.to_string())),
        };
        Ok(out)
    }
}

/// Decode one sqlite column value into its dynamic representation.
///
/// Blobs decode lossily to text; this layer stores no binary columns.
pub(crate) fn decode(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_covers_sqlite_column_types() {
        assert_eq!(decode(ValueRef::Null), Value::Null);
        assert_eq!(decode(ValueRef::Integer(45)), Value::from(45));
        assert_eq!(decode(ValueRef::Real(1.5)), Value::from(1.5));
        assert_eq!(
            decode(ValueRef::Text(b"Ireland")),
            Value::String("Ireland".to_string())
        );
    }
}
