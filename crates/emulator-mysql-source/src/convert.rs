//! Conversion from MySQL native values to the intermediate record model.

use crate::SourceError;
use chrono::NaiveDate;
use emulator_core::RecordValue;
use mysql_async::Value;

/// Convert one MySQL value to a [`RecordValue`].
///
/// Text protocol results arrive as `Bytes`; valid UTF-8 becomes a string,
/// anything else stays raw binary (which the serializer rejects with a typed
/// error rather than forwarding opaquely). DATETIME columns become naive
/// timestamps; TIME columns are rendered as `HH:MM:SS` strings since they
/// carry no date component.
pub fn convert_mysql_value(value: &Value, column: &str) -> Result<RecordValue, SourceError> {
    match value {
        Value::NULL => Ok(RecordValue::Null),
        Value::Int(i) => Ok(RecordValue::Int(*i)),
        Value::UInt(u) => Ok(RecordValue::UInt(*u)),
        Value::Float(f) => Ok(RecordValue::Float(f64::from(*f))),
        Value::Double(d) => Ok(RecordValue::Float(*d)),
        Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
            Ok(s) => Ok(RecordValue::String(s.to_string())),
            Err(_) => Ok(RecordValue::Bytes(bytes.clone())),
        },
        Value::Date(year, month, day, hour, minute, second, micros) => {
            let dt = NaiveDate::from_ymd_opt(i32::from(*year), u32::from(*month), u32::from(*day))
                .and_then(|date| {
                    date.and_hms_micro_opt(
                        u32::from(*hour),
                        u32::from(*minute),
                        u32::from(*second),
                        *micros,
                    )
                })
                .ok_or_else(|| SourceError::InvalidDateTime {
                    column: column.to_string(),
                })?;
            Ok(RecordValue::DateTime(dt))
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            Ok(RecordValue::String(format_time(
                *negative, *days, *hours, *minutes, *seconds, *micros,
            )))
        }
    }
}

fn format_time(negative: bool, days: u32, hours: u8, minutes: u8, seconds: u8, micros: u32) -> String {
    let sign = if negative { "-" } else { "" };
    let total_hours = days * 24 + u32::from(hours);
    if micros > 0 {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    } else {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}")
    }
}
