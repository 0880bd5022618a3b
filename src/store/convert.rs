//! Conversions between Rust types and `Value`
//!
//! Writing goes through `From<T> for Value`. Reading goes through
//! [`FromValue`], which is checked: a conversion that would lose the value
//! (out of range, wrong kind) yields `None`.
//!
//! Reading rules:
//! - integers accept `Int` in range and finite `Float` in range (truncated)
//! - `f32`/`f64` accept `Float` and `Int`
//! - `bool` accepts `Bool`, and numbers as "non-zero"
//! - `String`, `Document`, `Vec<Value>` accept only their own variant

use super::document::Document;
use super::value::Value;
use alloc::string::String;
use alloc::vec::Vec;

/// Checked conversion out of a stored value
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Int(i) => <$t>::try_from(*i).ok(),
                    // MIN and MAX + 1 are powers of two (or zero), so both
                    // bounds are exact in f64 even where MAX itself rounds up
                    Value::Float(f)
                        if f.is_finite()
                            && *f >= <$t>::MIN as f64
                            && *f < <$t>::MAX as f64 + 1.0 =>
                    {
                        Some(*f as $t)
                    }
                    _ => None,
                }
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().map(|f| f as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            Value::Float(f) => Some(*f != 0.0),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromValue for Document {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_document().cloned()
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array().map(<[Value]>::to_vec)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

macro_rules! impl_from_lossless_int {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        }
    )*};
}

impl_from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {$(
        // Values above i64::MAX are kept as floats
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                match i64::try_from(v) {
                    Ok(i) => Value::Int(i),
                    Err(_) => Value::Float(v as f64),
                }
            }
        }
    )*};
}

impl_from_wide_int!(isize, u64, usize);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(String::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_integer_range_checks() {
        assert_eq!(u8::from_value(&Value::Int(255)), Some(255));
        assert_eq!(u8::from_value(&Value::Int(256)), None);
        assert_eq!(u32::from_value(&Value::Int(-1)), None);
        assert_eq!(i16::from_value(&Value::Int(-32768)), Some(-32768));
        assert_eq!(i64::from_value(&Value::Int(i64::MIN)), Some(i64::MIN));
    }

    #[test]
    fn test_integer_from_float_truncates() {
        assert_eq!(i32::from_value(&Value::Float(3.9)), Some(3));
        assert_eq!(i32::from_value(&Value::Float(-3.9)), Some(-3));
        assert_eq!(u8::from_value(&Value::Float(300.0)), None);
        assert_eq!(i32::from_value(&Value::Float(f64::NAN)), None);
        assert_eq!(i32::from_value(&Value::Float(f64::INFINITY)), None);
    }

    #[test]
    fn test_float_at_integer_limits() {
        const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
        const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

        // i64::MAX / u64::MAX round up to these in f64; the cast would saturate
        assert_eq!(i64::from_value(&Value::Float(TWO_POW_63)), None);
        assert_eq!(u64::from_value(&Value::Float(TWO_POW_64)), None);
        assert_eq!(i64::from_value(&Value::Float(-TWO_POW_63)), Some(i64::MIN));

        // Fractions just below the next integer still truncate into range
        assert_eq!(u8::from_value(&Value::Float(255.9)), Some(255));
        assert_eq!(u8::from_value(&Value::Float(256.0)), None);
        assert_eq!(i32::from_value(&Value::Float(2_147_483_647.5)), Some(i32::MAX));
    }

    #[test]
    fn test_integer_rejects_other_kinds() {
        assert_eq!(i32::from_value(&Value::Null), None);
        assert_eq!(i32::from_value(&Value::Bool(true)), None);
        assert_eq!(i32::from_value(&Value::from("42")), None);
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(f64::from_value(&Value::Int(2)), Some(2.0));
        assert_eq!(f32::from_value(&Value::Float(0.5)), Some(0.5));
        assert_eq!(f64::from_value(&Value::from("1.5")), None);
    }

    #[test]
    fn test_bool_conversions() {
        assert_eq!(bool::from_value(&Value::Bool(true)), Some(true));
        assert_eq!(bool::from_value(&Value::Int(0)), Some(false));
        assert_eq!(bool::from_value(&Value::Int(-4)), Some(true));
        assert_eq!(bool::from_value(&Value::Float(0.0)), Some(false));
        assert_eq!(bool::from_value(&Value::from("true")), None);
    }

    #[test]
    fn test_string_and_containers() {
        assert_eq!(
            String::from_value(&Value::from("MyNetwork")),
            Some(String::from("MyNetwork"))
        );
        assert_eq!(String::from_value(&Value::Int(1)), None);

        let items = vec![Value::Int(1), Value::Bool(false)];
        assert_eq!(
            Vec::<Value>::from_value(&Value::from(items.clone())),
            Some(items)
        );

        let mut doc = Document::new();
        doc.insert("x", Value::Int(1));
        assert_eq!(
            Document::from_value(&Value::from(doc.clone())),
            Some(doc)
        );
        assert_eq!(Document::from_value(&Value::Null), None);
    }

    #[test]
    fn test_into_value() {
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(-7i32), Value::Int(-7));
        assert_eq!(Value::from(u64::MAX), Value::Float(u64::MAX as f64));
        assert_eq!(Value::from(1.5f32), Value::Float(1.5));
        assert_eq!(Value::from(Some(3i32)), Value::Int(3));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(()), Value::Null);
    }
}
