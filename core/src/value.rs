//! Scalar cell values
//!
//! A [`Value`] is one cell of a flat row: whatever the database client
//! produced for a single column. Values are never nested.

use compact_str::{CompactString, ToCompactString};
use core::fmt::Write;

/// One scalar cell of a flat row.
#[derive(Debug, Clone, PartialEq, PartialOrd, Default)]
pub enum Value {
    /// NULL value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value
    Text(CompactString),
    /// Binary data
    Blob(Vec<u8>),
    /// Calendar date without a zone
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate),
    /// Wall-clock time without a zone
    #[cfg(feature = "chrono")]
    Time(chrono::NaiveTime),
    /// Date and time without a zone, treated as UTC when rendered
    #[cfg(feature = "chrono")]
    DateTime(chrono::NaiveDateTime),
}

impl Value {
    /// Returns true if this value is NULL.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a BOOL.
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer value if this is an INTEGER.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` for INTEGER and REAL.
    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(value) => Some(*value),
            Value::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the text value if this is TEXT.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the blob value if this is BLOB.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// Canonical key form used for primary-key dedup and foreign-key matching.
    ///
    /// `None` for NULL. Integral reals key like integers, so a `1.0` foreign
    /// key matches a `1` primary key.
    pub fn key(&self) -> Option<CompactString> {
        let key = match self {
            Value::Null => return None,
            Value::Bool(b) => CompactString::const_new(if *b { "true" } else { "false" }),
            Value::Integer(i) => i.to_compact_string(),
            Value::Real(r) if r.fract() == 0.0 && r.abs() < i64::MAX as f64 => {
                (*r as i64).to_compact_string()
            }
            Value::Real(r) => r.to_compact_string(),
            Value::Text(s) => s.clone(),
            Value::Blob(bytes) => {
                let mut hex = CompactString::with_capacity(bytes.len() * 2);
                for byte in bytes {
                    let _ = write!(hex, "{byte:02x}");
                }
                hex
            }
            #[cfg(feature = "chrono")]
            Value::Date(_) | Value::Time(_) | Value::DateTime(_) => self.to_compact_string(),
        };
        Some(key)
    }

    /// Milliseconds since the Unix epoch for DATETIME values (read as UTC).
    #[cfg(feature = "chrono")]
    pub fn unix_millis(&self) -> Option<i64> {
        match self {
            Value::DateTime(dt) => Some(dt.and_utc().timestamp_millis()),
            _ => None,
        }
    }

    /// Seconds since the Unix epoch for DATETIME values (read as UTC).
    #[cfg(feature = "chrono")]
    pub fn unix_seconds(&self) -> Option<i64> {
        self.unix_millis().map(|millis| millis.div_euclid(1000))
    }

    /// Renders a date/time value with an explicit zone.
    ///
    /// A DATETIME is read as wall-clock time in `from`, shifted to `to`, and
    /// printed with milliseconds and the `to` offset (`2020-01-02T11:04:05.006+08:00`).
    /// DATE and TIME values carry no zone and render as ISO-8601 unchanged.
    #[cfg(feature = "chrono")]
    pub fn to_zone_string(
        &self,
        from: chrono::FixedOffset,
        to: chrono::FixedOffset,
    ) -> Option<String> {
        use chrono::TimeZone;

        match self {
            Value::DateTime(dt) => {
                let local = from.from_local_datetime(dt).single()?;
                Some(
                    local
                        .with_timezone(&to)
                        .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
                        .to_string(),
                )
            }
            Value::Date(_) | Value::Time(_) => Some(self.to_string()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
            Value::Blob(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            #[cfg(feature = "chrono")]
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            #[cfg(feature = "chrono")]
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.3f")),
            #[cfg(feature = "chrono")]
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
        }
    }
}
