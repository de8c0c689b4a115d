use super::Value;
use crate::{Error, Result};

use indexmap::IndexMap;

/// One table row: column names mapped to values, in column order.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, Value>,
}

static NULL: Value = Value::Null;

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    /// Returns the value of `column`; a missing column reads as null.
    pub fn get(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&NULL)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.shift_remove(column)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads an integer column that must be present and non-null.
    pub fn get_i64(&self, column: &str) -> Result<i64> {
        match self.values.get(column) {
            Some(value) => value.to_i64(),
            None => Err(Error::from_args(format_args!(
                "missing column in row; column={column}"
            ))),
        }
    }

    /// Reads a string column that must be present and non-null.
    pub fn get_string(&self, column: &str) -> Result<String> {
        match self.get(column) {
            Value::String(v) => Ok(v.clone()),
            value => Err(Error::type_conversion(value.clone(), "String")),
        }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Row {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
