use crate::{
    schema::db::{ColumnArg, ColumnType},
    stmt::Value,
    Error, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// A value stored in a column of the owner's table.
    Scalar(Scalar),

    /// One component row (or an ordered list of them when `repeatable`),
    /// linked through the owner's join table.
    Component { component: String, repeatable: bool },

    /// An ordered list of components of any of the allowed types.
    DynamicZone { components: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    /// Column in the owner's table
    pub column: String,

    pub ty: ScalarType,

    /// Must be present and non-null on create
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Text,
    Integer,
    BigInteger,
    Float,
    Boolean,
    Json,
    DateTime,
}

impl Attribute {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Attribute::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns `true` for attributes stored through the join table.
    pub fn is_owned_component(&self) -> bool {
        matches!(
            self,
            Attribute::Component { .. } | Attribute::DynamicZone { .. }
        )
    }

    /// Component uids this attribute may hold.
    pub fn component_uids(&self) -> &[String] {
        match self {
            Attribute::Scalar(_) => &[],
            Attribute::Component { component, .. } => core::slice::from_ref(component),
            Attribute::DynamicZone { components } => components,
        }
    }
}

impl ScalarType {
    /// Column type and arguments used when creating the column.
    pub fn column_type(self) -> (ColumnType, Vec<ColumnArg>) {
        match self {
            ScalarType::String => (ColumnType::String, vec![ColumnArg::Int(255)]),
            ScalarType::Text => (ColumnType::Text, vec![ColumnArg::Str("longtext".into())]),
            ScalarType::Integer => (ColumnType::Integer, vec![]),
            ScalarType::BigInteger => (ColumnType::BigInteger, vec![]),
            ScalarType::Float => (ColumnType::Double, vec![]),
            ScalarType::Boolean => (ColumnType::Boolean, vec![]),
            ScalarType::Json => (ColumnType::Json, vec![]),
            ScalarType::DateTime => (
                ColumnType::Datetime,
                vec![ColumnArg::temporal(Some(false), 6)],
            ),
        }
    }

    /// Converts an input JSON value for attribute `name` into a column value.
    pub fn coerce(self, name: &str, json: &serde_json::Value) -> Result<Value> {
        use serde_json::Value as Json;

        let value = match (self, json) {
            (_, Json::Null) => Some(Value::Null),
            (ScalarType::Json, json) => Some(Value::Json(json.clone())),
            (ScalarType::String | ScalarType::Text, Json::String(s)) => {
                Some(Value::String(s.clone()))
            }
            (ScalarType::Integer | ScalarType::BigInteger, Json::Number(n)) => {
                n.as_i64().map(Value::I64)
            }
            (ScalarType::Float, Json::Number(n)) => n.as_f64().map(Value::F64),
            (ScalarType::Boolean, Json::Bool(b)) => Some(Value::Bool(*b)),
            (ScalarType::DateTime, Json::String(s)) => chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| Value::Timestamp(dt.with_timezone(&chrono::Utc))),
            _ => None,
        };

        value.ok_or_else(|| {
            Error::validation(format!(
                "Invalid value for attribute `{name}`: expected {}",
                self.expected()
            ))
        })
    }

    fn expected(self) -> &'static str {
        match self {
            ScalarType::String | ScalarType::Text => "a string",
            ScalarType::Integer | ScalarType::BigInteger => "an integer",
            ScalarType::Float => "a number",
            ScalarType::Boolean => "a boolean",
            ScalarType::Json => "JSON",
            ScalarType::DateTime => "an RFC 3339 datetime",
        }
    }
}
