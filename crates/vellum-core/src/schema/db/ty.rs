use serde::{Deserialize, Serialize};

/// Semantic column type.
///
/// Native database types are resolved to this fixed vocabulary. Anything
/// without a dedicated variant is carried as [`ColumnType::SpecificType`]
/// with the raw native type string as its single [`ColumnArg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    Integer,
    BigInteger,
    Text,
    String,
    Boolean,
    Datetime,
    Date,
    Time,
    Decimal,
    Double,
    Json,
    SpecificType,
}

/// Type-specific parameter of a column.
///
/// Serialized untagged so a column's arguments read like
/// `["longtext"]`, `[255]` or `[{"useTz": false, "precision": 6}]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnArg {
    Null,
    Int(i64),
    Str(String),
    Temporal(Temporal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temporal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_tz: Option<bool>,
    pub precision: u8,
}

impl ColumnArg {
    pub fn temporal(use_tz: Option<bool>, precision: u8) -> ColumnArg {
        ColumnArg::Temporal(Temporal { use_tz, precision })
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ColumnArg::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ColumnArg::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_temporal(&self) -> Option<&Temporal> {
        match self {
            ColumnArg::Temporal(v) => Some(v),
            _ => None,
        }
    }
}
