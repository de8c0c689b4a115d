use super::{ColumnArg, ColumnType};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// Semantic type of the column.
    #[serde(rename = "type")]
    pub ty: ColumnType,

    /// Type-specific parameters (length, precision, raw native type, ...).
    pub args: Vec<ColumnArg>,

    /// Literal default expression. Sequence-backed defaults are never
    /// surfaced here.
    pub default_to: Option<String>,

    pub not_nullable: bool,

    pub unsigned: bool,
}

impl Column {
    /// A nullable column without arguments or default.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Column {
        Column {
            name: name.into(),
            ty,
            args: vec![],
            default_to: None,
            not_nullable: false,
            unsigned: false,
        }
    }

    pub fn arg(mut self, arg: ColumnArg) -> Column {
        self.args.push(arg);
        self
    }

    pub fn not_null(mut self) -> Column {
        self.not_nullable = true;
        self
    }

    pub fn default_to(mut self, default: impl Into<String>) -> Column {
        self.default_to = Some(default.into());
        self
    }
}
