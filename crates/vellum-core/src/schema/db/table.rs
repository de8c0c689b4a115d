use super::{Column, ForeignKey, Index};

use serde::{Deserialize, Serialize};

/// A database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// The table's columns, in ordinal order
    pub columns: Vec<Column>,

    pub indexes: Vec<Index>,

    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            columns: vec![],
            indexes: vec![],
            foreign_keys: vec![],
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|index| index.is_primary())
    }
}
