//! Scalar values stored per cache field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value: text or a number.
///
/// Serialized untagged so the cache file stays a plain
/// `{"key": {"Field": value}}` JSON document. Integers are tried before
/// floats so vote counts round-trip without a trailing `.0`. A JSON `null`
/// loads as [`FieldValue::Null`], which reads like empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl FieldValue {
    /// Numeric view of the value, if it has one.
    ///
    /// Text is parsed after trimming; anything that does not parse yields
    /// `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f).filter(|f| f.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Self::Bool(_) | Self::Null => None,
        }
    }

    /// Returns `true` for empty text and `null`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Null => true,
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FieldValue {
    /// NaN and infinities have no JSON form; they are stored as empty text.
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Self::Float(v)
        } else {
            Self::Text(String::new())
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_stay_integers() {
        let value: FieldValue = serde_json::from_str("123456").unwrap();
        assert_eq!(value, FieldValue::Integer(123456));
        assert_eq!(serde_json::to_string(&value).unwrap(), "123456");
    }

    #[test]
    fn test_floats_and_text_deserialize() {
        let value: FieldValue = serde_json::from_str("7.9").unwrap();
        assert_eq!(value, FieldValue::Float(7.9));

        let value: FieldValue = serde_json::from_str("\"Drama-Crime\"").unwrap();
        assert_eq!(value, FieldValue::from("Drama-Crime"));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FieldValue::from(42i64).as_number(), Some(42.0));
        assert_eq!(FieldValue::from(3.5).as_number(), Some(3.5));
        assert_eq!(FieldValue::from(" 1999 ").as_number(), Some(1999.0));
        assert_eq!(FieldValue::from("Nobody").as_number(), None);
        assert_eq!(FieldValue::from("").as_number(), None);
        assert_eq!(FieldValue::from(true).as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from(2010u32).to_string(), "2010");
        assert_eq!(FieldValue::from(8.8).to_string(), "8.8");
        assert_eq!(FieldValue::from("Inception").to_string(), "Inception");
    }

    #[test]
    fn test_is_empty() {
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from("x").is_empty());
        assert!(!FieldValue::from(0i64).is_empty());
        assert!(FieldValue::Null.is_empty());
    }

    #[test]
    fn test_non_finite_floats_become_empty_text() {
        assert_eq!(FieldValue::from(f64::NAN), FieldValue::from(""));
        assert_eq!(FieldValue::from(f64::INFINITY), FieldValue::from(""));
        assert_eq!(FieldValue::from(f64::NEG_INFINITY).to_string(), "");
    }

    #[test]
    fn test_non_finite_text_is_not_a_number() {
        assert_eq!(FieldValue::from("nan").as_number(), None);
        assert_eq!(FieldValue::from("inf").as_number(), None);
        assert_eq!(FieldValue::Float(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_null_loads_as_empty() {
        let value: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, FieldValue::Null);
        assert_eq!(value.to_string(), "");
        assert_eq!(value.as_number(), None);
        assert_eq!(serde_json::to_string(&value).unwrap(), "null");
    }
}
