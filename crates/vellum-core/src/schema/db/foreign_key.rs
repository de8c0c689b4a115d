use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// Constraint name
    pub name: String,

    /// Owning columns, in constraint order
    pub columns: Vec<String>,

    pub referenced_table: String,

    /// `referenced_columns[i]` is referenced by `columns[i]`
    pub referenced_columns: Vec<String>,

    pub on_update: ReferentialAction,

    pub on_delete: ReferentialAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ReferentialAction {
    /// SQL spelling, as used in DDL and reported by `information_schema`.
    pub fn sql_name(self) -> &'static str {
        match self {
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}

impl FromStr for ReferentialAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NO ACTION" => Ok(ReferentialAction::NoAction),
            "RESTRICT" => Ok(ReferentialAction::Restrict),
            "CASCADE" => Ok(ReferentialAction::Cascade),
            "SET NULL" => Ok(ReferentialAction::SetNull),
            "SET DEFAULT" => Ok(ReferentialAction::SetDefault),
            other => Err(Error::from_args(format_args!(
                "unknown referential action; rule={other}"
            ))),
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}
