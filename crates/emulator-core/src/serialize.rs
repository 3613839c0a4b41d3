//! Conversion from sampled records to transport-safe JSON.
//!
//! Nested mappings and sequences are serialized recursively with key and
//! element order preserved (`serde_json` is built with `preserve_order`).
//! Timestamps become ISO-8601 strings with fixed offset notation; no timezone
//! is inferred beyond what the source value carries.

use crate::record::{Record, RecordValue};
use chrono::NaiveDateTime;
use thiserror::Error;

/// Error during record serialization.
///
/// Values that have no JSON rendering surface as a typed error instead of
/// being forwarded opaquely to the transport layer; the emulation loop skips
/// the affected record for that iteration only.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// NaN or infinite floats cannot be represented in JSON.
    #[error("non-finite number {0} cannot be represented in JSON")]
    NonFiniteNumber(f64),

    /// Raw non-UTF-8 binary data has no JSON rendering.
    #[error("binary value ({len} bytes) has no JSON representation")]
    Binary {
        /// Length of the binary value in bytes.
        len: usize,
    },
}

/// Render a timestamp in ISO-8601 notation.
///
/// Fractional seconds are printed only when nonzero, so a whole-second
/// timestamp renders as e.g. `2024-01-01T00:00:00`.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Serialize a single value to transport JSON.
pub fn serialize_value(value: &RecordValue) -> Result<serde_json::Value, SerializeError> {
    match value {
        RecordValue::Null => Ok(serde_json::Value::Null),
        RecordValue::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        RecordValue::Int(i) => Ok(serde_json::Value::Number((*i).into())),
        RecordValue::UInt(u) => Ok(serde_json::Value::Number((*u).into())),
        RecordValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or(SerializeError::NonFiniteNumber(*f)),
        RecordValue::String(s) => Ok(serde_json::Value::String(s.clone())),
        RecordValue::Bytes(b) => Err(SerializeError::Binary { len: b.len() }),
        RecordValue::DateTime(dt) => Ok(serde_json::Value::String(format_timestamp(dt))),
        RecordValue::Array(items) => items
            .iter()
            .map(serialize_value)
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array),
        RecordValue::Object(entries) => {
            let mut map = serde_json::Map::with_capacity(entries.len());
            for (name, value) in entries {
                map.insert(name.clone(), serialize_value(value)?);
            }
            Ok(serde_json::Value::Object(map))
        }
    }
}

/// Serialize a whole record to a JSON object, preserving field order.
pub fn serialize_record(record: &Record) -> Result<serde_json::Value, SerializeError> {
    let mut map = serde_json::Map::with_capacity(record.len());
    for (name, value) in record.iter() {
        map.insert(name.clone(), serialize_value(value)?);
    }
    Ok(serde_json::Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_timestamp_renders_iso8601_string() {
        let out = serialize_value(&RecordValue::DateTime(midnight())).unwrap();
        assert_eq!(out, serde_json::json!("2024-01-01T00:00:00"));
    }

    #[test]
    fn test_timestamp_with_microseconds() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_micro_opt(12, 34, 56, 123_456)
            .unwrap();
        let out = serialize_value(&RecordValue::DateTime(dt)).unwrap();
        assert_eq!(out, serde_json::json!("2024-06-30T12:34:56.123456"));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(
            serialize_value(&RecordValue::Int(-42)).unwrap(),
            serde_json::json!(-42)
        );
        assert_eq!(
            serialize_value(&RecordValue::Bool(true)).unwrap(),
            serde_json::json!(true)
        );
        assert_eq!(
            serialize_value(&RecordValue::String("x".to_string())).unwrap(),
            serde_json::json!("x")
        );
        assert_eq!(
            serialize_value(&RecordValue::Null).unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_nested_order_preserved() {
        let mut record = Record::new();
        record.push("zeta", RecordValue::Int(1));
        record.push(
            "nested",
            RecordValue::Object(vec![
                ("bbb".to_string(), RecordValue::Int(2)),
                ("aaa".to_string(), RecordValue::Int(3)),
            ]),
        );
        record.push("alpha", RecordValue::Array(vec![
            RecordValue::Int(3),
            RecordValue::Int(1),
            RecordValue::Int(2),
        ]));

        let out = serialize_record(&record).unwrap();
        let top: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(top, vec!["zeta", "nested", "alpha"]);

        let nested: Vec<&String> = out["nested"].as_object().unwrap().keys().collect();
        assert_eq!(nested, vec!["bbb", "aaa"]);

        assert_eq!(out["alpha"], serde_json::json!([3, 1, 2]));
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let mut record = Record::new();
        record.push("id", RecordValue::Int(7));
        record.push("created_at", RecordValue::DateTime(midnight()));
        record.push(
            "tags",
            RecordValue::Array(vec![
                RecordValue::String("a".to_string()),
                RecordValue::String("b".to_string()),
            ]),
        );

        let once = serialize_record(&record).unwrap();
        let twice = serialize_value(&RecordValue::from(once.clone())).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_finite_float_is_an_error() {
        let err = serialize_value(&RecordValue::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, SerializeError::NonFiniteNumber(_)));

        let err = serialize_value(&RecordValue::Float(f64::INFINITY)).unwrap_err();
        assert!(matches!(err, SerializeError::NonFiniteNumber(_)));
    }

    #[test]
    fn test_binary_is_an_error() {
        let err = serialize_value(&RecordValue::Bytes(vec![0xff, 0xfe])).unwrap_err();
        assert!(matches!(err, SerializeError::Binary { len: 2 }));
    }

    #[test]
    fn test_error_inside_nested_value_propagates() {
        let value = RecordValue::Object(vec![(
            "payload".to_string(),
            RecordValue::Array(vec![RecordValue::Float(f64::NEG_INFINITY)]),
        )]);
        assert!(serialize_value(&value).is_err());
    }
}
