//! Leaf value coercion: convert an untyped [`Value`] into a typed target.
//!
//! The set of conversions is closed and explicit. Each target type names the
//! value kinds it accepts; everything else is a [`CoerceError`].
//!
//! | Target | Accepts |
//! |--------|---------|
//! | `String`, `PathBuf` | string |
//! | `bool` | bool |
//! | integers | integer in range, or a float with no fractional part |
//! | `f32`, `f64` | float or integer |
//! | `Option<T>` | null (→ `None`) or anything `T` accepts |
//! | `Vec<T>` | sequence whose every item `T` accepts |
//! | `Mapping` | mapping |
//! | `Value` | anything |
//!
//! Integers accept integral floats because some encoders write every number
//! as a float.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::{Mapping, Value};

/// Why a value could not be converted to a leaf's target type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("expected {expected}, found value of type {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("{value} has a fractional part and cannot be stored in {target}")]
    NotIntegral { value: f64, target: &'static str },

    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<CoerceError>,
    },

    #[error("{0}")]
    Custom(String),
}

impl CoerceError {
    fn mismatch(expected: &'static str, found: &Value) -> Self {
        CoerceError::TypeMismatch {
            expected,
            found: found.type_name(),
        }
    }
}

/// A type a leaf option can be coerced into.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, CoerceError>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(CoerceError::mismatch("string", other)),
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => Ok(PathBuf::from(s)),
            other => Err(CoerceError::mismatch("path string", other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(CoerceError::mismatch("bool", other)),
        }
    }
}

/// Integer view of a value: integers as-is, floats only when integral.
fn integer_of(value: &Value, target: &'static str) -> Result<i128, CoerceError> {
    match value {
        Value::Integer(i) => Ok(i128::from(*i)),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if *f < i128::MIN as f64 || *f > i128::MAX as f64 {
                return Err(CoerceError::OutOfRange {
                    value: f.to_string(),
                    target,
                });
            }
            Ok(*f as i128)
        }
        Value::Float(f) => Err(CoerceError::NotIntegral { value: *f, target }),
        other => Err(CoerceError::mismatch("integer", other)),
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, CoerceError> {
                    let wide = integer_of(value, stringify!($ty))?;
                    <$ty>::try_from(wide).map_err(|_| CoerceError::OutOfRange {
                        value: wide.to_string(),
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(CoerceError::mismatch("float", other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        let wide = f64::from_value(value)?;
        if wide.is_finite() && (wide < f32::MIN as f64 || wide > f32::MAX as f64) {
            return Err(CoerceError::OutOfRange {
                value: wide.to_string(),
                target: "f32",
            });
        }
        Ok(wide as f32)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        let Value::Sequence(items) = value else {
            return Err(CoerceError::mismatch("sequence", value));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item).map_err(|e| CoerceError::Item {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}

impl FromValue for Mapping {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Mapping(m) => Ok(m.clone()),
            other => Err(CoerceError::mismatch("mapping", other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_from_string() {
        assert_eq!(String::from_value(&Value::from("x")).unwrap(), "x");
    }

    #[test]
    fn string_rejects_integer() {
        let err = String::from_value(&Value::Integer(1)).unwrap_err();
        assert_eq!(
            err,
            CoerceError::TypeMismatch {
                expected: "string",
                found: "integer"
            }
        );
    }

    #[test]
    fn bool_rejects_string_true() {
        assert!(bool::from_value(&Value::from("true")).is_err());
    }

    #[test]
    fn u16_in_range() {
        assert_eq!(u16::from_value(&Value::Integer(8080)).unwrap(), 8080);
    }

    #[test]
    fn u16_out_of_range() {
        let err = u16::from_value(&Value::Integer(70000)).unwrap_err();
        assert!(matches!(err, CoerceError::OutOfRange { target: "u16", .. }));
    }

    #[test]
    fn unsigned_rejects_negative() {
        assert!(u32::from_value(&Value::Integer(-1)).is_err());
    }

    #[test]
    fn integral_float_into_integer() {
        assert_eq!(i32::from_value(&Value::Float(42.0)).unwrap(), 42);
    }

    #[test]
    fn fractional_float_into_integer_fails() {
        let err = i64::from_value(&Value::Float(1.5)).unwrap_err();
        assert!(matches!(err, CoerceError::NotIntegral { .. }));
    }

    #[test]
    fn float_accepts_integer() {
        assert_eq!(f64::from_value(&Value::Integer(3)).unwrap(), 3.0);
    }

    #[test]
    fn f32_out_of_range() {
        assert!(f32::from_value(&Value::Float(1e300)).is_err());
    }

    #[test]
    fn option_null_is_none() {
        assert_eq!(Option::<String>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(
            Option::<u8>::from_value(&Value::Integer(7)).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn vec_reports_failing_item() {
        let seq = Value::Sequence(vec![Value::Integer(1), Value::from("two")]);
        let err = Vec::<i64>::from_value(&seq).unwrap_err();
        assert!(matches!(err, CoerceError::Item { index: 1, .. }));
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn mapping_target() {
        let mut m = Mapping::new();
        m.insert("k".into(), Value::Bool(false));
        assert_eq!(Mapping::from_value(&Value::Mapping(m.clone())).unwrap(), m);
        assert!(Mapping::from_value(&Value::from("k")).is_err());
    }

    #[test]
    fn path_from_string() {
        assert_eq!(
            PathBuf::from_value(&Value::from("/etc/app")).unwrap(),
            PathBuf::from("/etc/app")
        );
    }
}
