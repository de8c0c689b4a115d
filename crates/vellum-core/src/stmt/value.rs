use crate::{Error, Result};

use chrono::{DateTime, Utc};

/// A single column value as it travels between Vellum and a driver.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer. Narrower integer columns are widened on read.
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Structured JSON document
    Json(serde_json::Value),

    /// An instant in time, UTC
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::I64(_) => "I64",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Json(_) => "Json",
            Value::Timestamp(_) => "Timestamp",
        }
    }

    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Value::I64(v) => Ok(*v),
            _ => Err(Error::type_conversion(self.clone(), "i64")),
        }
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => Err(Error::type_conversion(self.clone(), "bool")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string, or `None` for null. Any other variant is an error.
    pub fn to_opt_string(&self) -> Result<Option<String>> {
        match self {
            Value::Null => Ok(None),
            Value::String(v) => Ok(Some(v.clone())),
            _ => Err(Error::type_conversion(self.clone(), "Option<String>")),
        }
    }

    /// Returns the timestamp, or `None` for null.
    pub fn to_opt_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        match self {
            Value::Null => Ok(None),
            Value::Timestamp(v) => Ok(Some(*v)),
            _ => Err(Error::type_conversion(self.clone(), "Option<DateTime<Utc>>")),
        }
    }

    /// Converts the value to its natural JSON representation. Timestamps
    /// become RFC 3339 strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::I64(v) => serde_json::Value::from(*v),
            Value::F64(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(v) => serde_json::Value::String(v.clone()),
            Value::Json(v) => v.clone(),
            Value::Timestamp(v) => serde_json::Value::String(v.to_rfc3339()),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src as i64)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(src: DateTime<Utc>) -> Self {
        Self::Timestamp(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}
