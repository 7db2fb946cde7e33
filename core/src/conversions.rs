//! From implementations for Value and the FromValue read-back trait

use crate::error::Error;
use crate::value::Value;
use compact_str::CompactString;

//------------------------------------------------------------------------------
// From<T> implementations
//------------------------------------------------------------------------------

/// Macro to implement From<integer> for Value (converts to INTEGER)
macro_rules! impl_from_int_for_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Integer(value as i64)
                }
            }
        )*
    };
}

impl_from_int_for_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Real(value as f64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(CompactString::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(CompactString::from(value))
    }
}

impl From<CompactString> for Value {
    fn from(value: CompactString) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(value.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Value {
    fn from(value: chrono::NaiveDate) -> Self {
        Value::Date(value)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveTime> for Value {
    fn from(value: chrono::NaiveTime) -> Self {
        Value::Time(value)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDateTime> for Value {
    fn from(value: chrono::NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

//------------------------------------------------------------------------------
// FromValue implementations
//------------------------------------------------------------------------------

/// Reads a Rust value out of a [`Value`] cell.
///
/// Implemented for the primitive types projectors usually need; `Option<T>`
/// reads NULL as `None`.
pub trait FromValue: Sized {
    /// Convert from a cell, failing with [`Error::Projection`] on a type mismatch
    fn from_value(value: &Value) -> Result<Self, Error>;
}

fn mismatch(expected: &str, value: &Value) -> Error {
    Error::Projection(format!("expected {expected}, found {value:?}"))
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, Error> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, Error> {
        value.as_i64().ok_or_else(|| mismatch("integer", value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, Error> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide)
            .map_err(|_| Error::Projection(format!("integer {wide} out of range for i32")))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, Error> {
        value.as_f64().ok_or_else(|| mismatch("number", value))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            other => Err(mismatch("boolean", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, Error> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch("text", value))
    }
}

impl FromValue for CompactString {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            other => Err(mismatch("text", other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, Error> {
        value
            .as_bytes()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch("blob", value))
    }
}

#[cfg(feature = "chrono")]
impl FromValue for chrono::NaiveDateTime {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            other => Err(mismatch("datetime", other)),
        }
    }
}

#[cfg(feature = "chrono")]
impl FromValue for chrono::NaiveDate {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Date(d) => Ok(*d),
            other => Err(mismatch("date", other)),
        }
    }
}

#[cfg(feature = "chrono")]
impl FromValue for chrono::NaiveTime {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Time(t) => Ok(*t),
            other => Err(mismatch("time", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, Error> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl Value {
    /// Convert a reference to this value to a Rust type.
    ///
    /// ```
    /// # use unjoin_core::Value;
    /// let id: i64 = Value::Integer(42).convert().unwrap();
    /// assert_eq!(id, 42);
    /// ```
    pub fn convert<T: FromValue>(&self) -> Result<T, Error> {
        T::from_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_reads_null_as_none() {
        assert_eq!(Value::Null.convert::<Option<i64>>().unwrap(), None);
        assert_eq!(Value::Integer(4).convert::<Option<i64>>().unwrap(), Some(4));
    }

    #[test]
    fn mismatched_type_is_a_projection_error() {
        let err = Value::from("x").convert::<i64>().unwrap_err();
        assert!(matches!(err, Error::Projection(_)));
    }

    #[test]
    fn i32_range_is_checked() {
        assert!(Value::Integer(i64::MAX).convert::<i32>().is_err());
        assert_eq!(Value::Integer(-5).convert::<i32>().unwrap(), -5);
    }

    #[test]
    fn integer_flags_read_as_bool() {
        assert!(Value::Integer(1).convert::<bool>().unwrap());
        assert!(Value::Integer(2).convert::<bool>().is_err());
    }

    #[test]
    fn none_converts_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
